//! Diagnostics listener, served apart from the user API.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::infra::Database;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create diagnostics routes.
pub fn diagnostics_router(db: Database) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(db)
}

/// Health check endpoint - verifies database connectivity.
pub async fn health_check(State(db): State<Database>) -> Response {
    match db.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}
