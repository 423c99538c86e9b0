//! Diagsum API Server
//!
//! Run with: cargo run --bin diagsum-api
//!
//! # Configuration
//!
//! TOML config (see `diagsum config`) with environment overrides:
//! - `DIAGSUM_SHEET_BASE_URL`: Spreadsheet-to-JSON service base URL
//! - `DIAGSUM_SPREADSHEET_ID`: Spreadsheet document ID
//! - `DIAGSUM_SHEET_TAB`: Sheet tab name
//! - `DIAGSUM_DIAGNOSIS_KEY`: Grouping column header
//! - `DIAGSUM_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `DIAGSUM_API_PORT`: Port to listen on (default: 8083)
//! - `RUST_LOG`: Log level (default: info)

use diagsum::api::{serve, AppState};
use diagsum::config::Config;
use diagsum::sheet::SheetClient;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diagsum=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Diagsum API server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load_default();
    let api_config = config.api.clone().into();

    let sheet = Arc::new(SheetClient::new(config.sheet.into()));
    tracing::info!("Sheet source: {}", sheet.sheet_url());
    tracing::info!("Diagnosis key: {}", sheet.diagnosis_key());

    let state = AppState::new(Arc::clone(&sheet), api_config);

    // One-shot startup fetch; a failure logs and serves empty data
    state.fetch_initial().await;

    // Run server
    let api_config = Arc::clone(&state.config);
    tracing::info!("Starting server on {}", api_config.addr());
    serve(state, &api_config).await?;

    tracing::info!("Diagsum API server stopped");
    Ok(())
}
