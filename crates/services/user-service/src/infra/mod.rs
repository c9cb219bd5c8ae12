//! Infrastructure layer - database handle.

mod db;

pub use db::Database;
