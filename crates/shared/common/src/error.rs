//! Unified error handling for the user service.
//!
//! Every failure leaves the service as the `{"error": "<message>"}`
//! envelope. Caller mistakes map to 400, unknown paths to 404 and wrong
//! methods to 405. Everything the storage layer reports, including a
//! missing record, maps to 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ErrorResponse;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Routing
    #[error("no route for {0}")]
    RouteNotFound(String),

    #[error("method {0} not allowed")]
    MethodNotAllowed(String),

    // Resource errors
    #[error("user not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("{0}")]
    Database(#[from] sea_orm::DbErr),
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            // Absence is reported like any other storage failure.
            AppError::NotFound | AppError::Conflict(_) => StatusCode::INTERNAL_SERVER_ERROR,
            #[cfg(feature = "database")]
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the error envelope
    pub fn user_message(&self) -> String {
        match self {
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                e.to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse::new(self.user_message());

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    /// Validation error for a required parameter that was absent or empty
    pub fn missing_param(name: &str) -> Self {
        AppError::Validation(format!("param {} not set", name))
    }
}
