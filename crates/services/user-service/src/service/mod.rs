//! HTTP-facing user service.

mod handlers;
mod user_service;


pub use handlers::user_routes;
pub use user_service::UserService;
