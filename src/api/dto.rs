//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::summary::RankedEntry;

// ============================================
// SUMMARY DTOs
// ============================================

/// Query parameters for the summary endpoint
#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    /// Search text, case-insensitive substring over labels
    #[serde(default)]
    pub search: String,
    /// Selected period token; carried, not applied as a predicate
    #[serde(default)]
    pub period: Option<String>,
    /// Visible-window cursor; omit for the full ranked list
    #[serde(default)]
    pub limit: Option<usize>,
    /// Output format: json, csv, chart
    #[serde(default = "default_format")]
    pub format: String,
    /// Number of categories for format=chart (default from config)
    #[serde(default)]
    pub top: Option<usize>,
}

fn default_format() -> String {
    "json".to_string()
}

/// Summary response
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Visible ranked entries
    pub entries: Vec<RankedEntry>,
    pub meta: SummaryMeta,
}

/// Summary metadata
#[derive(Debug, Serialize)]
pub struct SummaryMeta {
    /// Ranked entries matching the filter, before windowing
    pub total: usize,
    /// Entries returned in this response
    pub visible: usize,
    /// Whether entries remain beyond the window
    pub has_more: bool,
    /// Rows behind the tally
    pub row_count: usize,
    /// RFC 3339 time of the last successful fetch
    pub fetched_at: Option<String>,
}

/// Chart payload for the top-categories pie chart
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    /// Category labels, ranked order
    pub labels: Vec<String>,
    /// Count per label
    pub data: Vec<u64>,
    /// Slice color per label
    pub colors: Vec<String>,
}

// ============================================
// PERIOD DTOs
// ============================================

/// Period dropdown options
#[derive(Debug, Serialize)]
pub struct PeriodsResponse {
    pub periods: Vec<String>,
}

// ============================================
// REFRESH DTOs
// ============================================

/// Refresh outcome
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// "success" or "failed"
    pub status: String,
    pub row_count: usize,
    pub label_count: usize,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// "ok" when rows are loaded, "empty" otherwise
    pub data: String,
    pub row_count: usize,
    pub fetched_at: Option<String>,
    pub uptime_seconds: u64,
    pub version: String,
}
