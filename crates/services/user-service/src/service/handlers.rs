//! User handlers.

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    routing::{get, post},
    Router,
};
use tracing::debug;

use common::{AppError, AppResult, Data};
use domain::{User, UserList};

use super::UserService;
use crate::extractors::FormValues;

/// Create user routes
///
/// Unknown paths and wrong methods answer with the error envelope too.
pub fn user_routes() -> Router<UserService> {
    Router::new()
        .route("/user/create", post(create_user).fallback(method_not_allowed))
        .route("/user/get", get(get_user).fallback(method_not_allowed))
        .route("/user/update", post(update_user).fallback(method_not_allowed))
        .route("/user/delete", post(delete_user).fallback(method_not_allowed))
        .route("/user/list", get(list_users).fallback(method_not_allowed))
        .fallback(route_not_found)
}

async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method.to_string())
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

/// Create a user from `name` and `email`
pub async fn create_user(
    State(service): State<UserService>,
    params: FormValues,
) -> AppResult<Data<User>> {
    let name = params.require("name")?;
    let email = params.require("email")?;

    let user = service.create_user(name, email).await?;
    Ok(Data(user))
}

/// Get a user by `id`, falling back to `email`
pub async fn get_user(
    State(service): State<UserService>,
    params: FormValues,
) -> AppResult<Data<User>> {
    debug!(?params, "Get user");
    let user = service
        .get_user(params.get("id"), params.get("email"))
        .await?;
    Ok(Data(user))
}

/// Rename the user identified by `id`
pub async fn update_user(
    State(service): State<UserService>,
    params: FormValues,
) -> AppResult<Data<User>> {
    let id = params.require("id")?;
    let name = params.require("name")?;

    let user = service.update_user(id, name).await?;
    Ok(Data(user))
}

/// Delete a user. Success carries no body.
pub async fn delete_user(
    State(service): State<UserService>,
    params: FormValues,
) -> AppResult<StatusCode> {
    let id = params.require("id")?;
    service.delete_user(id).await?;
    Ok(StatusCode::OK)
}

pub async fn list_users(State(service): State<UserService>) -> AppResult<Data<UserList>> {
    let list = service.list_users().await?;
    Ok(Data(list))
}
