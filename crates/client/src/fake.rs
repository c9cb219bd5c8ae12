//! In-memory client for tests that should not need a running service.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use domain::{CreateUser, UpdateUser, User, UserList};

use crate::client::Client;
use crate::error::{ClientError, ClientResult};

#[derive(Default)]
struct FakeState {
    users: HashMap<String, User>,
    users_by_email: HashMap<String, String>,
}

/// [`Client`] keeping users in process memory.
///
/// Each instance owns its data. A single lock serializes every call, and
/// emails stay unique across live users. Updates refresh `updated_at` and
/// failures carry the same `ClientError::Api` messages the service sends.
/// Unlike the service, deleting an unknown id fails.
#[derive(Default)]
pub struct FakeClient {
    state: Mutex<FakeState>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The service's message for a missing user.
fn not_found() -> ClientError {
    ClientError::Api("user not found".to_string())
}

fn require(name: &str, value: &str) -> ClientResult<()> {
    if value.is_empty() {
        return Err(ClientError::Api(format!("param {} not set", name)));
    }
    Ok(())
}

#[async_trait]
impl Client for FakeClient {
    async fn user_create(&self, user: &CreateUser) -> ClientResult<User> {
        require("name", &user.name)?;
        require("email", &user.email)?;

        let mut state = self.state.lock().await;
        if state.users_by_email.contains_key(&user.email) {
            return Err(ClientError::Api(format!(
                "user with email {} already exists",
                user.email
            )));
        }

        let created = User::new(Uuid::new_v4().to_string(), &user.name, &user.email);
        state
            .users_by_email
            .insert(created.email.clone(), created.id.clone());
        state.users.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn user_get(&self, id: &str) -> ClientResult<User> {
        let state = self.state.lock().await;
        state.users.get(id).cloned().ok_or_else(not_found)
    }

    async fn user_get_by_email(&self, email: &str) -> ClientResult<User> {
        let state = self.state.lock().await;
        state
            .users_by_email
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned()
            .ok_or_else(not_found)
    }

    async fn user_update(&self, user: &UpdateUser) -> ClientResult<User> {
        require("name", &user.name)?;

        let mut state = self.state.lock().await;
        let stored = state.users.get_mut(&user.id).ok_or_else(not_found)?;
        stored.rename(&user.name);
        Ok(stored.clone())
    }

    async fn user_delete(&self, id: &str) -> ClientResult<()> {
        let mut state = self.state.lock().await;
        let removed = state.users.remove(id).ok_or_else(not_found)?;
        state.users_by_email.remove(&removed.email);
        Ok(())
    }

    async fn user_list(&self) -> ClientResult<UserList> {
        let state = self.state.lock().await;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(UserList {
            total: users.len() as u64,
            users,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_create_then_get() {
        let client = FakeClient::new();
        let created = client
            .user_create(&CreateUser::new("liuliu", "aa@bb.com"))
            .await
            .unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.name, "liuliu");
        assert_eq!(created.email, "aa@bb.com");
        assert_eq!(created.age, 0);
        assert_eq!(client.user_get(&created.id).await.unwrap(), created);
        assert_eq!(
            client.user_get_by_email("aa@bb.com").await.unwrap(),
            created
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let client = FakeClient::new();
        client
            .user_create(&CreateUser::new("liuliu", "aa@bb.com"))
            .await
            .unwrap();

        let err = client
            .user_create(&CreateUser::new("other", "aa@bb.com"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "user with email aa@bb.com already exists");
        assert_eq!(client.user_list().await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_create_requires_name_and_email() {
        let client = FakeClient::new();
        let err = client
            .user_create(&CreateUser::new("", "aa@bb.com"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "param name not set");
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let client = FakeClient::new();
        assert!(matches!(
            client.user_get("nope").await,
            Err(ClientError::Api(ref msg)) if msg == "user not found"
        ));
    }

    #[tokio::test]
    async fn test_update_changes_only_name() {
        let client = FakeClient::new();
        let created = client
            .user_create(&CreateUser::new("liuliu", "aa@bb.com"))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = client
            .user_update(&UpdateUser::new(&created.id, "liuliu2"))
            .await
            .unwrap();

        assert_eq!(updated.name, "liuliu2");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(client.user_get(&created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let client = FakeClient::new();
        let err = client
            .user_update(&UpdateUser::new("nope", "name"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "user not found");
    }

    #[tokio::test]
    async fn test_delete_then_get_fails() {
        let client = FakeClient::new();
        let created = client
            .user_create(&CreateUser::new("liuliu", "aa@bb.com"))
            .await
            .unwrap();

        client.user_delete(&created.id).await.unwrap();

        assert!(client.user_get(&created.id).await.is_err());
        assert!(client.user_get_by_email("aa@bb.com").await.is_err());
        assert!(matches!(
            client.user_delete(&created.id).await,
            Err(ClientError::Api(_))
        ));
        // The email is free again once its owner is gone.
        assert!(client
            .user_create(&CreateUser::new("again", "aa@bb.com"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_list_reports_total() {
        let client = FakeClient::new();
        assert_eq!(client.user_list().await.unwrap(), UserList::default());

        for i in 0..3 {
            client
                .user_create(&CreateUser::new(format!("u{i}"), format!("u{i}@x.com")))
                .await
                .unwrap();
        }

        let list = client.user_list().await.unwrap();
        assert_eq!(list.total, 3);
        assert_eq!(list.users.len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_creates_with_same_email() {
        let client = Arc::new(FakeClient::new());
        let attempts = (0..8).map(|i| {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                client
                    .user_create(&CreateUser::new(format!("u{i}"), "same@x.com"))
                    .await
            })
        });

        let results = futures::future::join_all(attempts).await;
        let created = results
            .into_iter()
            .map(|joined| joined.unwrap())
            .filter(Result::is_ok)
            .count();

        assert_eq!(created, 1);
        assert_eq!(client.user_list().await.unwrap().total, 1);
    }
}
