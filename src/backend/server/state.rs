/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is built once at startup from `AppConfig` and holds:
 * - the configuration itself
 * - `Sessions`, the token signing and verification keys
 * - `Database`, the typed repositories over the document store
 *
 * Every field is cheap to clone (`Arc` inside), so handlers can extract
 * just the part they need:
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use devconnect::backend::store::Database;
 *
 * async fn handler(State(db): State<Database>) {
 *     let posts = db.posts.list().await;
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::sessions::Sessions;
use crate::backend::store::Database;
use crate::shared::AppConfig;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: Sessions,
    pub db: Database,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database) -> Self {
        let sessions = Sessions::from_config(&config);
        Self {
            config: Arc::new(config),
            sessions,
            db,
        }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

impl FromRef<AppState> for Sessions {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.config)
    }
}
