/// Error types for the query client
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the product database
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Connection, DNS or transport failures
    #[error("Network error: {0}")]
    Network(String),

    /// No response within the configured timeout
    #[error("Request timed out after {}s: {source_message}", .timeout.as_secs_f64())]
    Timeout {
        timeout: Duration,
        source_message: String,
    },

    /// The server answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status {
        status: u16,
        body: String,
    },

    /// The body was not the JSON we expected
    #[error("Failed to parse JSON: {0}")]
    Decode(String),
}

impl ApiError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ApiError::Timeout {
                timeout,
                source_message: err.to_string(),
            }
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
