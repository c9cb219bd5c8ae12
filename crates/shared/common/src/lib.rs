//! Common utilities shared by the user service and its consumers.
//!
//! This crate provides:
//! - Unified error handling with HTTP status mapping
//! - The uniform `{"data": ...}` / `{"error": ...}` JSON envelope

pub mod error;
pub mod response;

pub use error::{AppError, AppResult, OptionExt};
pub use response::{Data, DataResponse, ErrorResponse};
