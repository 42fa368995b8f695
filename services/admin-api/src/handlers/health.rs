//! Liveness and readiness checks

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use orderdesk_types::api::ErrorBody;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}

/// Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        database: None,
    })
}

/// Readiness check; 503 while Postgres is unreachable
pub async fn ready(State(state): State<AppState>) -> Response {
    if let Err(e) = sqlx::query("SELECT 1").execute(&state.pool).await {
        tracing::warn!(error = %e, "Readiness check failed");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorBody::new("Database unavailable")),
        )
            .into_response();
    }

    Json(HealthResponse {
        status: "ready",
        version: env!("CARGO_PKG_VERSION"),
        database: Some("connected"),
    })
    .into_response()
}
