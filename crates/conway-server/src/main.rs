//! Binary entry point for the Conway board service.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `conway-config.yaml` (or `CONWAY_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Connect the board repository (and run migrations for `PostgreSQL`)
//! 4. Serve the HTTP API until a shutdown signal arrives

mod storage;
mod telemetry;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use conway_api::{AppState, BoardService, ServerConfig};
use conway_core::ServiceConfig;
use tracing::info;

/// Config file used when `CONWAY_CONFIG` is not set.
const DEFAULT_CONFIG_PATH: &str = "conway-config.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    telemetry::init(&config.logging);

    info!(
        host = config.server.host,
        port = config.server.port,
        storage = ?config.storage.backend,
        max_generations = config.limits.max_generations,
        max_attempts = config.limits.max_attempts,
        "conway-server starting"
    );

    let repository = storage::connect(&config.storage)
        .await
        .context("failed to initialize board storage")?;
    info!(backend = repository.backend_name(), "Board storage ready");

    let state = Arc::new(AppState::new(BoardService::new(repository, config.limits)));

    conway_api::start_server(&ServerConfig::from(&config.server), state)
        .await
        .context("HTTP server failed")?;

    info!("conway-server shutdown complete");
    Ok(())
}

/// Load the service configuration.
///
/// A missing file is not an error: defaults plus environment overrides
/// are used instead.
fn load_config() -> anyhow::Result<ServiceConfig> {
    let path = std::env::var("CONWAY_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    if path.exists() {
        ServiceConfig::from_file(&path)
            .with_context(|| format!("failed to load {}", path.display()))
    } else {
        ServiceConfig::from_env().context("invalid configuration override")
    }
}
