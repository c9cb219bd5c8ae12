//! In-memory user repository for tests and local runs without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::UserRepository;
use common::{AppError, AppResult, OptionExt};
use domain::User;

/// In-memory implementation of UserRepository
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AppResult<()> {
        if user.id.is_empty() || user.name.is_empty() || user.email.is_empty() {
            return Err(AppError::validation("user id, name and email are required"));
        }

        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::conflict(format!(
                "user with email {} already exists",
                user.email
            )));
        }
        if users.contains_key(&user.id) {
            return Err(AppError::conflict(format!(
                "user with id {} already exists",
                user.id
            )));
        }

        let now = Utc::now();
        let stored = User {
            created_at: now,
            updated_at: now,
            ..user.clone()
        };
        users.insert(stored.id.clone(), stored);
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> AppResult<User> {
        let users = self.users.read().await;
        users.get(id).cloned().ok_or_not_found()
    }

    async fn get_by_email(&self, email: &str) -> AppResult<User> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_not_found()
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&user.id).ok_or(AppError::NotFound)?;

        stored.name = user.name.clone();
        stored.age = user.age;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        self.users.write().await.remove(id);
        Ok(())
    }

    async fn list(&self, page: u64, page_size: u64) -> AppResult<(Vec<User>, u64)> {
        let users = self.users.read().await;
        let total = users.len() as u64;

        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let offset = page.saturating_sub(1).saturating_mul(page_size);
        let page_users = all
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(page_size).unwrap_or(usize::MAX))
            .collect();

        Ok((page_users, total))
    }
}
