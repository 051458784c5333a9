//! Liveness endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// `GET /health`. 503 when the database stops answering.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.db().health_check().await {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "OK",
                message: "API Running",
            }),
        )
    } else {
        warn!("Health check failed: database unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "UNAVAILABLE",
                message: "Database unreachable",
            }),
        )
    }
}
