//! Entry point for the Hawaii Climate API.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration (defaults, `climate-api.toml`, `CLIMATE__*` env)
//! 3. Open the dataset read-only
//! 4. Serve HTTP until `Ctrl-C`
//! 5. Close the pool

use std::sync::Arc;

use climate_api::{ApiConfig, AppState, start_server};
use climate_db::ClimatePool;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the database connection, or the
/// HTTP server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("climate-api starting");

    // 2. Load configuration.
    let config = ApiConfig::load()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        database_url = config.database.url,
        earliest = config.dataset.earliest,
        latest = config.dataset.latest,
        "Configuration loaded"
    );

    // 3. Open the dataset.
    let pool = ClimatePool::connect(&config.sqlite_config()).await?;

    // 4. Serve.
    let state = Arc::new(AppState::new(pool.clone(), config.dataset.clone()));
    let result = start_server(&config.server_config(), state).await;

    // 5. Release connections whether or not serving succeeded.
    pool.close().await;
    result?;

    Ok(())
}
