//! Typed consumer of the user service.
//!
//! [`HttpClient`] talks to a running service; [`FakeClient`] keeps users in
//! memory for tests that should not touch the network.

mod client;
mod error;
mod fake;

#[cfg(any(test, feature = "test-utils"))]
pub use client::MockClient;
pub use client::{Client, HttpClient};
pub use error::{ClientError, ClientResult};
pub use fake::FakeClient;

pub use domain::{CreateUser, UpdateUser, User, UserList};
