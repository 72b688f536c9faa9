/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * - `TraceLayer` - a span per request, with status and latency
 * - `CorsLayer` - permissive CORS for browser clients
 *
 * Unmatched paths get a JSON 404.
 */

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the main application router
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/", get(api_running));

    let router = configure_api_routes(router, &app_state);

    router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Liveness string
async fn api_running() -> &'static str {
    "API Running"
}

async fn not_found() -> BackendError {
    BackendError::not_found("Not Found")
}
