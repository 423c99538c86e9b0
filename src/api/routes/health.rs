//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe. The empty-data state is a degraded mode the
/// service serves from, not an outage, so readiness does not depend on it.
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Full health status with data details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let snapshot = state.snapshot().await;
    let has_data = snapshot.row_count > 0;

    Json(HealthResponse {
        status: if has_data { "healthy" } else { "degraded" }.to_string(),
        data: if has_data { "ok" } else { "empty" }.to_string(),
        row_count: snapshot.row_count,
        fetched_at: snapshot.fetched_at.map(|dt| dt.to_rfc3339()),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
