//! Axum responses built on the shared JSON envelope.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

pub use domain::{DataResponse, ErrorResponse};

/// 200 response with the value wrapped in the success envelope
pub struct Data<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Data<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(DataResponse { data: self.0 })).into_response()
    }
}
