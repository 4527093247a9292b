//! Failures of a chat completion call

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    /// 401/403: missing, wrong or revoked key
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 400: the provider refused the request as sent (unknown model, bad parameters)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 429. Surfaced once, never retried here.
    #[error("Rate limited (retry after {retry_after:?})")]
    RateLimited { retry_after: Option<Duration> },

    /// Other non-2xx with a structured error body
    #[error("Provider error ({code}): {message}")]
    Api { code: String, message: String },

    /// Other non-2xx with an unrecognised body
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never got a response: DNS, connect, TLS, reset
    #[error("Transport error: {0}")]
    Transport(String),

    /// 2xx body that is not a chat completion
    #[error("Malformed response: {0}")]
    Decode(String),

    /// Well-formed completion with no text in the first choice
    #[error("Empty completion: {0}")]
    EmptyCompletion(String),
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => LlmError::Status {
                status: status.as_u16(),
                body: err.to_string(),
            },
            None => LlmError::Transport(err.to_string()),
        }
    }
}
