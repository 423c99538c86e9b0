//! # Diagsum
//!
//! Diagnosis Summary Service - fetches tabular rows from a public
//! spreadsheet-to-JSON endpoint, aggregates row counts by diagnosis, and
//! serves the result as a ranked, searchable, windowed summary.
//!
//! ## Features
//!
//! - **One-shot row source**: single fetch of the whole sheet tab, no
//!   pagination contract, degrades to empty data on failure
//! - **Pure pipeline**: aggregate → rank → window, re-derived in full on
//!   every state change
//! - **REST API**: summary, chart payload, period options, refresh, health
//! - **CLI**: terminal summary without running a server
//!
//! ## Modules
//!
//! - [`sheet`]: spreadsheet endpoint client and row type
//! - [`summary`]: the aggregation/ranking/window pipeline
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use diagsum::sheet::{SheetClient, SheetConfig};
//! use diagsum::summary::{aggregate, rank, FilterState, VisibleWindow};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SheetClient::new(SheetConfig::default());
//!
//!     let rows = client.fetch_rows().await?;
//!     let tally = aggregate(&rows, client.diagnosis_key());
//!
//!     let ranked = rank(&tally, &FilterState::search("flu"));
//!     let window = VisibleWindow::new();
//!
//!     for entry in window.visible(&ranked) {
//!         println!("{}: {}", entry.label, entry.count);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod sheet;
pub mod summary;

// Re-export top-level types for convenience
pub use sheet::{Row, SheetClient, SheetConfig, SheetError, UNSPECIFIED_LABEL};

pub use summary::{
    aggregate, period_options, rank, DashboardSession, FilterState, RankedEntry, Tally,
    VisibleWindow, PAGE_SIZE,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{
    Config, ConfigError, LoggingConfig, SheetSourceConfig, ApiConfig as ConfigApiConfig,
};
