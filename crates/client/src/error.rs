use thiserror::Error;

/// Errors returned by a [`Client`](crate::Client).
#[derive(Error, Debug)]
pub enum ClientError {
    /// The service answered with an error envelope.
    #[error("{0}")]
    Api(String),

    /// The service answered with a failure status and no error message.
    #[error("{operation} failed: {status}")]
    Status { operation: &'static str, status: u16 },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("parse response failed: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
