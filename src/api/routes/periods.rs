//! Period Routes
//!
//! Options for the dashboard's period dropdown.
//!
//! - GET /api/v1/periods - Available period tokens
//!
//! The selected period is carried back as filter state on the summary
//! endpoint but does not filter the output.

use axum::Json;
use chrono::Utc;

use crate::api::dto::PeriodsResponse;
use crate::summary::period_options;

/// GET /api/v1/periods
pub async fn get_periods() -> Json<PeriodsResponse> {
    Json(PeriodsResponse {
        periods: period_options(Utc::now().date_naive()),
    })
}
