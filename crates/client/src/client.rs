//! HTTP client for the user service.

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::debug;

use domain::{CreateUser, DataResponse, ErrorResponse, UpdateUser, User, UserList};

use crate::error::{ClientError, ClientResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Typed calls mirroring the service endpoints.
///
/// Every call performs at most one request and reports failures to the
/// caller without retrying.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Client: Send + Sync {
    /// Create a user and return the stored record.
    async fn user_create(&self, user: &CreateUser) -> ClientResult<User>;

    /// Get a user by id.
    async fn user_get(&self, id: &str) -> ClientResult<User>;

    /// Get a user by email.
    async fn user_get_by_email(&self, email: &str) -> ClientResult<User>;

    /// Rename a user and return the updated record.
    async fn user_update(&self, user: &UpdateUser) -> ClientResult<User>;

    /// Delete a user by id.
    async fn user_delete(&self, id: &str) -> ClientResult<()>;

    /// First page of users with the overall total.
    async fn user_list(&self) -> ClientResult<UserList>;
}

/// [`Client`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    server: String,
}

impl HttpClient {
    /// Client for the service at `server`, e.g. `http://127.0.0.1:8000`.
    pub fn new(server: impl Into<String>) -> Self {
        Self::with_client(server, reqwest::Client::new())
    }

    /// Like [`HttpClient::new`], reusing an existing `reqwest::Client`.
    pub fn with_client(server: impl Into<String>, http: reqwest::Client) -> Self {
        let server = server.into().trim_end_matches('/').to_string();
        Self { http, server }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.server, path)
    }

    /// Send the request and return the raw body of a successful response.
    async fn send(&self, operation: &'static str, request: RequestBuilder) -> ClientResult<Vec<u8>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(operation, status = status.as_u16(), "User service responded");

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&body)
                .map(|envelope| envelope.error)
                .unwrap_or_default();
            if !message.is_empty() {
                return Err(ClientError::Api(message));
            }
            return Err(ClientError::Status {
                operation,
                status: status.as_u16(),
            });
        }

        Ok(body.to_vec())
    }

    /// Send the request and unwrap the `data` envelope.
    async fn call<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> ClientResult<T> {
        let body = self.send(operation, request).await?;
        let envelope: DataResponse<T> = serde_json::from_slice(&body)?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl Client for HttpClient {
    async fn user_create(&self, user: &CreateUser) -> ClientResult<User> {
        let request = self
            .http
            .post(self.url("/user/create"))
            .query(&[("name", user.name.as_str()), ("email", user.email.as_str())]);
        self.call("create user", request).await
    }

    async fn user_get(&self, id: &str) -> ClientResult<User> {
        let request = self.http.get(self.url("/user/get")).query(&[("id", id)]);
        self.call("get user", request).await
    }

    async fn user_get_by_email(&self, email: &str) -> ClientResult<User> {
        let request = self
            .http
            .get(self.url("/user/get"))
            .query(&[("email", email)]);
        self.call("get user", request).await
    }

    async fn user_update(&self, user: &UpdateUser) -> ClientResult<User> {
        let request = self
            .http
            .post(self.url("/user/update"))
            .query(&[("id", user.id.as_str()), ("name", user.name.as_str())]);
        self.call("update user", request).await
    }

    async fn user_delete(&self, id: &str) -> ClientResult<()> {
        let request = self.http.post(self.url("/user/delete")).query(&[("id", id)]);
        self.send("delete user", request).await?;
        Ok(())
    }

    async fn user_list(&self) -> ClientResult<UserList> {
        let request = self.http.get(self.url("/user/list"));
        self.call("list user", request).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        extract::Query,
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use chrono::{TimeZone, Utc};

    use super::*;

    const ID: &str = "0198271f-bc9d-74ac-a63b-41cf2c6c2f82";
    const USER_BODY: &str = r#"{"data":{"id":"0198271f-bc9d-74ac-a63b-41cf2c6c2f82","name":"liuliu","email":"aa@bb.com","age":0,"createdAt":"2025-07-20T16:13:21+08:00","updatedAt":"2025-07-20T16:13:21+08:00"}}"#;

    fn expected_user() -> User {
        let t = Utc.timestamp_opt(1752999201, 0).unwrap();
        User {
            id: ID.to_string(),
            name: "liuliu".to_string(),
            email: "aa@bb.com".to_string(),
            age: 0,
            created_at: t,
            updated_at: t,
        }
    }

    async fn stub(router: Router) -> HttpClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        HttpClient::new(format!("http://{}/", addr))
    }

    #[tokio::test]
    async fn test_create_sends_params() {
        let client = stub(Router::new().route(
            "/user/create",
            post(|Query(params): Query<HashMap<String, String>>| async move {
                let mut user = expected_user();
                user.name = params["name"].clone();
                user.email = params["email"].clone();
                Json(DataResponse { data: user })
            }),
        ))
        .await;

        let user = client
            .user_create(&CreateUser::new("liuliu", "aa@bb.com"))
            .await
            .unwrap();
        assert_eq!(user, expected_user());
    }

    #[tokio::test]
    async fn test_get_hits_get_endpoint() {
        let client = stub(Router::new().route(
            "/user/get",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("id").map(String::as_str) == Some(ID) {
                    (StatusCode::OK, USER_BODY)
                } else {
                    (StatusCode::BAD_REQUEST, r#"{"error":"param id or email not set"}"#)
                }
            }),
        ))
        .await;

        assert_eq!(client.user_get(ID).await.unwrap(), expected_user());
    }

    #[tokio::test]
    async fn test_get_by_email() {
        let client = stub(Router::new().route(
            "/user/get",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["email"], "aa@bb.com");
                USER_BODY
            }),
        ))
        .await;

        assert_eq!(
            client.user_get_by_email("aa@bb.com").await.unwrap(),
            expected_user()
        );
    }

    #[tokio::test]
    async fn test_update_returns_record() {
        let client = stub(Router::new().route(
            "/user/update",
            post(|Query(params): Query<HashMap<String, String>>| async move {
                let mut user = expected_user();
                user.id = params["id"].clone();
                user.name = params["name"].clone();
                Json(DataResponse { data: user })
            }),
        ))
        .await;

        let user = client
            .user_update(&UpdateUser::new(ID, "liuliu2"))
            .await
            .unwrap();
        assert_eq!(user.id, ID);
        assert_eq!(user.name, "liuliu2");
    }

    #[tokio::test]
    async fn test_update_error_envelope_is_reported() {
        let client = stub(Router::new().route(
            "/user/update",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"user not found"}"#) }),
        ))
        .await;

        let err = client
            .user_update(&UpdateUser::new(ID, "liuliu2"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Api(ref msg) if msg == "user not found"));
    }

    #[tokio::test]
    async fn test_delete_with_empty_body() {
        let client = stub(Router::new().route("/user/delete", post(|| async { StatusCode::OK }))).await;

        assert!(client.user_delete(ID).await.is_ok());
    }

    #[tokio::test]
    async fn test_status_without_envelope() {
        let client = stub(Router::new().route(
            "/user/delete",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        ))
        .await;

        let err = client.user_delete(ID).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Status {
                operation: "delete user",
                status: 502
            }
        ));
    }

    #[tokio::test]
    async fn test_list() {
        let client = stub(Router::new().route(
            "/user/list",
            get(|| async {
                r#"{"data":{"total":1,"users":[{"id":"0198271f-bc9d-74ac-a63b-41cf2c6c2f82","name":"liuliu","email":"aa@bb.com","age":0,"createdAt":"2025-07-20T16:13:21+08:00","updatedAt":"2025-07-20T16:13:21+08:00"}]}}"#
            }),
        ))
        .await;

        let list = client.user_list().await.unwrap();
        assert_eq!(list.total, 1);
        assert_eq!(list.users, vec![expected_user()]);
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let client = stub(Router::new().route("/user/list", get(|| async { "not json" }))).await;

        let err = client.user_list().await.unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpClient::new(format!("http://{}", addr));
        let err = client.user_list().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    async fn display_name(client: &dyn Client, id: &str) -> String {
        match client.user_get(id).await {
            Ok(user) => user.name,
            Err(_) => "<unknown>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_client_stands_in_for_consumers() {
        let mut client = MockClient::new();
        client
            .expect_user_get()
            .withf(|id: &str| id == ID)
            .times(1)
            .returning(|_| Ok(expected_user()));
        client
            .expect_user_get()
            .withf(|id: &str| id != ID)
            .returning(|_| Err(ClientError::Api("user not found".to_string())));

        assert_eq!(display_name(&client, ID).await, "liuliu");
        assert_eq!(display_name(&client, "other").await, "<unknown>");
    }
}
