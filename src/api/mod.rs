//! Diagsum REST API
//!
//! HTTP API layer for the diagnosis summary, built with Axum.
//!
//! # Endpoints
//!
//! ## Summary
//! - `GET /api/v1/summary` - Ranked diagnosis counts (json, csv, chart)
//! - `GET /api/v1/periods` - Period dropdown options
//!
//! ## Refresh
//! - `POST /api/v1/refresh` - Re-fetch the sheet and rebuild the tally
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use diagsum::api::{serve, ApiConfig, AppState};
//! use diagsum::sheet::{SheetClient, SheetConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let sheet = Arc::new(SheetClient::new(SheetConfig::default()));
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(sheet, config.clone());
//!     state.fetch_initial().await;
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState, DashboardData};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/summary", get(routes::summary::get_summary))
        .route("/periods", get(routes::periods::get_periods))
        .route("/refresh", post(routes::refresh::trigger_refresh));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Diagsum API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Diagsum API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{Row, SheetClient, SheetConfig};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn test_rows(labels: &[&str]) -> Vec<Row> {
        labels
            .iter()
            .map(|l| serde_json::from_value(json!({"การวินิจฉัย": l})).unwrap())
            .collect()
    }

    fn unreachable_sheet() -> Arc<SheetClient> {
        // Discard port: connection refused immediately, no external traffic
        Arc::new(SheetClient::new(SheetConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_ms: 500,
            ..Default::default()
        }))
    }

    async fn create_test_app(labels: &[&str]) -> Router {
        let state = AppState::new(unreachable_sheet(), ApiConfig::default());
        if !labels.is_empty() {
            state.load_rows(test_rows(labels)).await;
        }
        build_router(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app(&[]).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full_degraded_when_empty() {
        let app = create_test_app(&[]).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["data"], "empty");
    }

    #[tokio::test]
    async fn test_summary_empty_data() {
        let app = create_test_app(&[]).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["entries"], json!([]));
        assert_eq!(body["meta"]["total"], 0);
        assert_eq!(body["meta"]["has_more"], false);
    }

    #[tokio::test]
    async fn test_summary_ranked_with_search() {
        let app = create_test_app(&["Flu", "Flu", "Cold", "-"]).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/summary?search=flu")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["entries"].as_array().unwrap().len(), 1);
        assert_eq!(body["entries"][0]["label"], "Flu");
        assert_eq!(body["entries"][0]["count"], 2);
        assert_eq!(body["meta"]["row_count"], 4);
    }

    #[tokio::test]
    async fn test_summary_limit_windows_output() {
        let labels: Vec<String> = (0..45).map(|i| format!("diag-{i:02}")).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let app = create_test_app(&refs).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/summary?limit=30")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["meta"]["total"], 45);
        assert_eq!(body["meta"]["visible"], 30);
        assert_eq!(body["meta"]["has_more"], true);
    }

    #[tokio::test]
    async fn test_summary_csv_format() {
        let app = create_test_app(&["Flu", "Flu", "Cold"]).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/summary?format=csv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "text/csv"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("label,count\n"));
        assert!(text.contains("\"Flu\",2"));
    }

    #[tokio::test]
    async fn test_summary_chart_format() {
        let app = create_test_app(&["Flu", "Flu", "Cold"]).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/summary?format=chart&top=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["labels"], json!(["Flu"]));
        assert_eq!(body["data"], json!([2]));
        assert_eq!(body["colors"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_summary_invalid_format() {
        let app = create_test_app(&["Flu"]).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/summary?format=xml")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_periods() {
        let app = create_test_app(&[]).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/periods")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["periods"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_data() {
        let state = AppState::new(unreachable_sheet(), ApiConfig::default());
        state.load_rows(test_rows(&["Flu", "Flu"])).await;
        let app = build_router(state);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/refresh")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "failed");

        // Previous snapshot still served
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["entries"][0]["count"], 2);
    }
}
