//! Refresh Route
//!
//! Operator-triggered re-fetch of the row source.
//!
//! - POST /api/v1/refresh - Fetch the sheet again and rebuild the tally
//!
//! A failed fetch keeps the previous snapshot and is reported in-body; the
//! summary keeps serving whatever data was last loaded.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::RefreshResponse;
use crate::api::state::AppState;

/// POST /api/v1/refresh
pub async fn trigger_refresh(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RefreshResponse>) {
    match state.refresh().await {
        Ok(stats) => {
            tracing::info!(
                rows = stats.row_count,
                labels = stats.label_count,
                duration_ms = stats.duration_ms,
                "Manual refresh completed"
            );

            (
                StatusCode::OK,
                Json(RefreshResponse {
                    status: "success".to_string(),
                    row_count: stats.row_count,
                    label_count: stats.label_count,
                    duration_ms: stats.duration_ms,
                    error: None,
                }),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Manual refresh failed, keeping previous data");

            (
                StatusCode::OK,
                Json(RefreshResponse {
                    status: "failed".to_string(),
                    row_count: 0,
                    label_count: 0,
                    duration_ms: 0,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
