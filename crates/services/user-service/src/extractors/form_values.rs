//! Form parameter extractor.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Query, Request},
    http::{header::CONTENT_TYPE, Method},
    Form,
};

use common::{AppError, AppResult};

/// Request parameters gathered from the query string and, for form-encoded
/// bodies, from the body. Body values win over query values of the same name.
#[derive(Debug, Default, Clone)]
pub struct FormValues(pub HashMap<String, String>);

impl FormValues {
    /// Value of `key`, treating an empty value as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Value of `key`, or a "param <key> not set" validation error.
    pub fn require(&self, key: &str) -> AppResult<&str> {
        self.get(key).ok_or_else(|| AppError::missing_param(key))
    }
}

fn is_form_encoded(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

#[async_trait]
impl<S> FromRequest<S> for FormValues
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(mut values) = Query::<HashMap<String, String>>::try_from_uri(req.uri())
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        if req.method() != Method::GET && is_form_encoded(&req) {
            let Form(body) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?;
            values.extend(body);
        }

        Ok(FormValues(values))
    }
}
