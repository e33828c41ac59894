//! Health check handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{repository::UnitMeasureRepository, state::AppState};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service name
    pub service: String,

    /// Version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Readiness check response
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Whether the database answered
    pub ready: bool,

    /// Service name
    pub service: String,

    /// Failure detail when not ready
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Root greeting
pub async fn index() -> impl IntoResponse {
    Json(json!({ "hello": "world" }))
}

/// Simple health check (liveness probe)
///
/// Always returns 200 OK if the process is serving requests.
pub async fn health<R: UnitMeasureRepository>(State(state): State<AppState<R>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: state.config().service.name.clone(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check (readiness probe)
///
/// Returns 503 Service Unavailable when the database does not answer.
pub async fn readiness<R: UnitMeasureRepository>(
    State(state): State<AppState<R>>,
) -> impl IntoResponse {
    let service = state.config().service.name.clone();

    match state.repository().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadinessResponse {
                ready: true,
                service,
                message: None,
            }),
        ),
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            let message = if state.debug() {
                e.to_string()
            } else {
                "database unavailable".to_string()
            };
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse {
                    ready: false,
                    service,
                    message: Some(message),
                }),
            )
        }
    }
}
