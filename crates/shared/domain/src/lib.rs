//! Domain layer - the user record and the shapes it travels in.
//!
//! This crate has no infrastructure dependencies. The same types are
//! serialized by the service and deserialized by the client, so the
//! wire contract lives here.

pub mod constants;
pub mod envelope;
pub mod user;

pub use constants::*;
pub use envelope::{DataResponse, ErrorResponse};
pub use user::{CreateUser, UpdateUser, User, UserList};
