//! HTTP server for the movie recommender.
//!
//! Configuration comes from the environment (see `Config`); the catalog file
//! is re-read on every request.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog::JsonFileCatalog;
use server::{AppState, Config, Recommender, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,pipeline=debug")),
        )
        .init();

    let config = Config::from_env()?;
    info!(?config, "Starting recommender server");

    let store = Arc::new(JsonFileCatalog::new(&config.catalog_path));
    let recommender = Recommender::new(store).with_limit(config.recommendation_limit);
    let app = create_router(AppState::new(recommender));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
