//! Repository layer for data access.
//!
//! `UserRepository` is the storage contract. `UserStore` persists through
//! SeaORM; `InMemoryUserRepository` keeps records in a map for tests and
//! local runs.

pub mod entities;
mod memory;
mod user_repository;

pub use memory::InMemoryUserRepository;
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
