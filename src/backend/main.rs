/**
 * Blog API Server Entry Point
 *
 * Loads configuration, connects to PostgreSQL, and serves the REST API until
 * Ctrl-C. The connection pool is closed after the server drains.
 */

use std::net::SocketAddr;
use std::sync::Arc;

use blog_api::backend::server::{create_app, load_store};
use blog_api::shared::config::DEFAULT_LOG_FILTER;
use blog_api::shared::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();
    let log_filter = config
        .as_ref()
        .map(|c| c.log_filter.clone())
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    let config = match config {
        Ok(config) => config,
        Err(errors) => {
            for error in errors.iter() {
                tracing::error!(%error, "Invalid configuration");
            }
            std::process::exit(1);
        }
    };

    tracing::info!("Server initialization started");

    let store = Arc::new(load_store(&config).await?);
    let app = create_app(store.clone(), &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, closing database pool");
    store.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:?}", e);
    }
    tracing::info!("Shutdown signal received");
}
