//! Error types for remote API calls.

use thiserror::Error;

/// Errors returned by the remote process API client.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The server answered with a status other than 200 or 201.
    #[error("request failed with status {status}{}", body_suffix(.body))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The response body is not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The server does not know the requested process.
    #[error("process not found")]
    ProcessNotFound,
}

impl RemoteError {
    /// Whether this is the "process not found" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ProcessNotFound)
    }
}

fn body_suffix(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        RemoteError::Http(e.to_string())
    }
}

/// Result type for remote API operations.
pub type Result<T> = std::result::Result<T, RemoteError>;
