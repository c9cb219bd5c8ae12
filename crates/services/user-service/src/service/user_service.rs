//! User service - translates user requests into repository calls.

use std::sync::Arc;

use axum::Router;
use tracing::{debug, info};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{
    constants::{LIST_PAGE, LIST_PAGE_SIZE},
    User, UserList,
};

use crate::repository::UserRepository;

/// Stateless user service over a shared repository.
///
/// Cloning is cheap; every clone talks to the same repository.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Router serving the `/user/*` endpoints.
    pub fn router(self) -> Router {
        super::user_routes().with_state(self)
    }

    /// Create a user under a freshly generated id and return the stored record.
    pub async fn create_user(&self, name: &str, email: &str) -> AppResult<User> {
        let id = Uuid::new_v4().to_string();
        debug!(user_id = %id, email, "Creating user");

        self.repo.create(&User::new(id, name, email)).await?;
        let user = self.repo.get_by_email(email).await?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Look up by id when given, otherwise by email.
    pub async fn get_user(&self, id: Option<&str>, email: Option<&str>) -> AppResult<User> {
        match (id, email) {
            (Some(id), _) => self.repo.get_by_id(id).await,
            (None, Some(email)) => self.repo.get_by_email(email).await,
            (None, None) => Err(AppError::validation("param id or email not set")),
        }
    }

    /// Rename an existing user.
    pub async fn update_user(&self, id: &str, name: &str) -> AppResult<User> {
        let mut user = self.repo.get_by_id(id).await?;
        user.name = name.to_string();

        let user = self.repo.update(&user).await?;
        info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    pub async fn delete_user(&self, id: &str) -> AppResult<()> {
        self.repo.delete_by_id(id).await?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// First page of users with the overall total.
    pub async fn list_users(&self) -> AppResult<UserList> {
        let (users, total) = self.repo.list(LIST_PAGE, LIST_PAGE_SIZE).await?;
        Ok(UserList { total, users })
    }
}
