/**
 * devconnect Server Entry Point
 *
 * Loads configuration, initializes tracing and serves the Axum app.
 */

use std::net::SocketAddr;

use devconnect::backend::server::init::create_app;
use devconnect::shared::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Reads .env before anything looks at the environment
    let config = AppConfig::from_env()?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!("Starting with {:?}", config);

    let port = config.port;
    let app = create_app(config).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server started on port {}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
