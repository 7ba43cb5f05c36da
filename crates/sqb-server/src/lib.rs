//! HTTP layer for SQL Query Bridge
//!
//! A thin presentation shell around the query workflow: one JSON endpoint
//! driving the pipeline (with an `execute` flag for the review-then-run
//! flow), provider listings, a health probe, and an embedded browser page.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod ui;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use sqb_infrastructure::bootstrap::build_workflow;
use sqb_infrastructure::config::ConfigLoader;
use sqb_infrastructure::logging::init_logging;

use crate::handlers::AppState;
use crate::routes::api_router;

/// Load configuration, wire the workflow, and serve the HTTP API until a
/// shutdown signal arrives.
///
/// # Arguments
/// * `config_path` - Optional path to a TOML configuration file
/// * `listen` - Optional bind address overriding the configured one
pub async fn run(
    config_path: Option<&Path>,
    listen: Option<SocketAddr>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = config_path {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;

    init_logging(&config.logging)?;

    let workflow = Arc::new(build_workflow(&config)?);
    let router = api_router(AppState { workflow });

    let listener = match listen {
        Some(addr) => tokio::net::TcpListener::bind(addr).await?,
        None => {
            tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
                .await?
        }
    };
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
