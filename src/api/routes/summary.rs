//! Summary Route
//!
//! The ranked diagnosis summary, in the shape the dashboard table and pie
//! chart consume.
//!
//! - GET /api/v1/summary - Ranked entries (json, csv, or chart format)
//!
//! `limit` is the dashboard's visible-window cursor: the response holds the
//! `min(limit, total)` prefix plus `has_more` so the client can offer "show
//! more". Without `limit` the full ranked list is returned.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ChartResponse, SummaryMeta, SummaryParams, SummaryResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::{AppState, DashboardData};
use crate::summary::{rank, FilterState, RankedEntry, VisibleWindow};

/// Slice color palette, cycled over chart categories
const CHART_COLORS: [&str; 5] = ["#4CAF50", "#2196F3", "#FF9800", "#9C27B0", "#F44336"];

/// GET /api/v1/summary
///
/// Derive the ranked summary for the current filter state. The whole
/// pipeline re-runs per request; an empty snapshot yields an empty summary,
/// not an error.
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummaryParams>,
) -> ApiResult<Response> {
    let snapshot = state.snapshot().await;

    let filter = FilterState {
        search: params.search.clone(),
        period: params.period.clone(),
    };
    let ranked = rank(&snapshot.tally, &filter);

    match params.format.to_lowercase().as_str() {
        "json" => Ok(format_json_response(&ranked, params.limit, &snapshot)),
        "csv" => Ok(format_csv_response(&ranked, params.limit)),
        "chart" => {
            let top = params.top.unwrap_or(state.config.chart_top);
            if top == 0 {
                return Err(ApiError::Validation("top must be positive".to_string()));
            }
            Ok(format_chart_response(&ranked, top))
        }
        other => Err(ApiError::Validation(format!(
            "Invalid format: {}. Use json, csv, or chart",
            other
        ))),
    }
}

/// Apply the visible window; no limit means the full list
fn windowed(ranked: &[RankedEntry], limit: Option<usize>) -> (&[RankedEntry], bool) {
    match limit {
        Some(cursor) => {
            let window = VisibleWindow::with_cursor(cursor);
            (window.visible(ranked), window.has_more(ranked))
        }
        None => (ranked, false),
    }
}

/// Format response as JSON
fn format_json_response(
    ranked: &[RankedEntry],
    limit: Option<usize>,
    snapshot: &DashboardData,
) -> Response {
    let (visible, has_more) = windowed(ranked, limit);

    let response = SummaryResponse {
        entries: visible.to_vec(),
        meta: SummaryMeta {
            total: ranked.len(),
            visible: visible.len(),
            has_more,
            row_count: snapshot.row_count,
            fetched_at: snapshot.fetched_at.map(|dt| dt.to_rfc3339()),
        },
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Format response as CSV
fn format_csv_response(ranked: &[RankedEntry], limit: Option<usize>) -> Response {
    let (visible, _) = windowed(ranked, limit);

    let mut csv = String::from("label,count\n");
    for entry in visible {
        // Quote labels so commas in diagnosis text survive
        csv.push_str(&format!("\"{}\",{}\n", entry.label.replace('"', "\"\""), entry.count));
    }

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/csv")],
        csv,
    )
        .into_response()
}

/// Format the top categories for the pie chart
fn format_chart_response(ranked: &[RankedEntry], top: usize) -> Response {
    let slice = &ranked[..top.min(ranked.len())];

    let labels: Vec<String> = slice.iter().map(|e| e.label.clone()).collect();
    let data: Vec<u64> = slice.iter().map(|e| e.count).collect();
    let colors: Vec<String> = (0..slice.len())
        .map(|i| CHART_COLORS[i % CHART_COLORS.len()].to_string())
        .collect();

    let response = ChartResponse {
        labels,
        data,
        colors,
    };

    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(n: usize) -> Vec<RankedEntry> {
        (0..n)
            .map(|i| RankedEntry {
                label: format!("diag-{i:02}"),
                count: (n - i) as u64,
            })
            .collect()
    }

    #[test]
    fn test_windowed_without_limit_returns_all() {
        let entries = ranked(50);
        let (visible, has_more) = windowed(&entries, None);
        assert_eq!(visible.len(), 50);
        assert!(!has_more);
    }

    #[test]
    fn test_windowed_with_limit() {
        let entries = ranked(50);
        let (visible, has_more) = windowed(&entries, Some(30));
        assert_eq!(visible.len(), 30);
        assert!(has_more);

        let (visible, has_more) = windowed(&entries, Some(60));
        assert_eq!(visible.len(), 50);
        assert!(!has_more);
    }

    #[test]
    fn test_csv_quotes_labels() {
        let entries = vec![RankedEntry {
            label: "Flu, severe".to_string(),
            count: 3,
        }];
        let response = format_csv_response(&entries, None);
        assert_eq!(response.status(), StatusCode::OK);
    }
}
