//! Errors returned by OpenAI-compatible endpoints.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by an OpenAI-compatible HTTP endpoint.
#[derive(Error, Debug)]
pub enum OpenAiError {
    /// No API key configured (config or `OPENAI_API_KEY`)
    #[error("OpenAI API key not set. Set OPENAI_API_KEY or configure api_key")]
    MissingApiKey,

    /// Invalid request parameters (HTTP 400 and other 4xx)
    #[error("Invalid request ({0}): {1}")]
    InvalidRequest(StatusCode, String),

    /// Invalid or missing API key (HTTP 401/403)
    #[error("Authentication failed ({0})")]
    Unauthorized(StatusCode),

    /// Model or endpoint not found (HTTP 404)
    #[error("Model not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded - too many requests")]
    RateLimitExceeded,

    /// Server error (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl OpenAiError {
    /// Classify a non-success response.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized(status),
            StatusCode::NOT_FOUND => Self::NotFound(body),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded,
            s if s.is_server_error() => Self::ServerError(s, body),
            s => Self::InvalidRequest(s, body),
        }
    }

    /// Returns true if this error is transient and should be retried
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded | Self::ServerError(_, _) | Self::NetworkError(_)
        )
    }

    /// True for a 404, which moves the embedder to its next model.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
