/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including store loading, state creation and route configuration.
 *
 * # Initialization Process
 *
 * 1. Load the document store (PostgreSQL or in-memory)
 * 2. Build `AppState` (configuration, token keys, repositories)
 * 3. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::backend::store::{Database, StorageResult};
use crate::shared::AppConfig;

/// Create the application router for `config`
///
/// Fails only when a configured database cannot be opened.
pub async fn create_app(config: AppConfig) -> StorageResult<Router> {
    tracing::info!("Initializing devconnect backend server");

    let db = load_database(&config).await?;
    let app = create_app_with_database(config, db);

    tracing::info!("Router configured");
    Ok(app)
}

/// Create the application router over an already opened store
pub fn create_app_with_database(config: AppConfig, db: Database) -> Router {
    create_router(AppState::new(config, db))
}
