pub mod analyze;

pub use analyze::analyze_chart;

use crate::locale::Language;
use crate::startup::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

/// Health check endpoint for liveness probes.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.provider.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": "chart-analysis-service",
                "version": env!("CARGO_PKG_VERSION")
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": "chart-analysis-service",
                "error": e.to_string()
            })),
        ),
    }
}

/// Explicit 405 handler so non-POST methods get the `{ message }` body
/// instead of axum's empty default.
pub async fn method_not_allowed(headers: HeaderMap) -> impl IntoResponse {
    crate::error::ApiError::MethodNotAllowed(Language::from_headers(&headers))
}
