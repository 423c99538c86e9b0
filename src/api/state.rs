//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::sheet::{Row, SheetClient, SheetError};
use crate::summary::{aggregate, Tally};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// The current data snapshot: tally plus fetch bookkeeping
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    /// Aggregate counts per diagnosis label
    pub tally: Tally,
    /// Number of rows the tally was built from
    pub row_count: usize,
    /// When the rows were fetched, None until the first successful fetch
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Result of a refresh, for the operator-facing response
#[derive(Debug, Clone)]
pub struct RefreshStats {
    pub row_count: usize,
    pub label_count: usize,
    pub duration_ms: u64,
}

/// Shared application state for all handlers
pub struct AppState {
    /// Client for the spreadsheet endpoint
    pub sheet: Arc<SheetClient>,
    /// Latest data snapshot, replaced wholesale on (re)fetch
    data: RwLock<DashboardData>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state with no data loaded yet
    pub fn new(sheet: Arc<SheetClient>, config: ApiConfig) -> Self {
        Self {
            sheet,
            data: RwLock::new(DashboardData::default()),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Replace the data snapshot from a set of rows
    pub async fn load_rows(&self, rows: Vec<Row>) {
        let tally = aggregate(&rows, self.sheet.diagnosis_key());
        let snapshot = DashboardData {
            tally,
            row_count: rows.len(),
            fetched_at: Some(Utc::now()),
        };
        *self.data.write().await = snapshot;
    }

    /// One-shot startup fetch.
    ///
    /// A failure is logged and the state stays empty; the server remains
    /// up and serves the empty summary. No retry.
    pub async fn fetch_initial(&self) {
        match self.sheet.fetch_rows().await {
            Ok(rows) => {
                let count = rows.len();
                self.load_rows(rows).await;
                tracing::info!(rows = count, "Initial sheet fetch complete");
            }
            Err(e) => {
                tracing::error!(error = %e, "Initial sheet fetch failed, serving empty data");
            }
        }
    }

    /// Operator-triggered re-fetch. On failure the previous snapshot is kept.
    pub async fn refresh(&self) -> Result<RefreshStats, SheetError> {
        let start = Instant::now();
        let rows = self.sheet.fetch_rows().await?;
        let row_count = rows.len();
        self.load_rows(rows).await;

        let label_count = self.data.read().await.tally.len();
        Ok(RefreshStats {
            row_count,
            label_count,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Current data snapshot
    pub async fn snapshot(&self) -> DashboardData {
        self.data.read().await.clone()
    }

    /// Whether any rows have been loaded
    pub async fn has_data(&self) -> bool {
        self.data.read().await.row_count > 0
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Number of categories in the chart payload by default
    pub chart_top: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8083,
            chart_top: 10,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl From<crate::config::ApiConfig> for ApiConfig {
    fn from(config: crate::config::ApiConfig) -> Self {
        Self {
            host: config.host,
            port: config.port,
            chart_top: config.chart_top,
        }
    }
}
