//! Error types for backend calls.

use thiserror::Error;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never produced a response (refused, DNS, timeout).
    #[error("Request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-2xx status.
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not have the expected shape.
    #[error("Failed to decode response from '{url}': {message}")]
    Decode { url: String, message: String },

    /// Rejected before any request was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Short message for the status line.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport { source, .. } if source.is_timeout() => {
                "Backend did not respond in time".to_string()
            }
            ApiError::Transport { .. } => "Cannot reach the backend".to_string(),
            ApiError::Status { status, body } if body.trim().is_empty() => {
                format!("HTTP error! status: {}", status)
            }
            ApiError::Status { body, .. } => body.trim().to_string(),
            ApiError::Decode { .. } => "Unexpected response from the backend".to_string(),
            ApiError::InvalidRequest(message) => message.clone(),
        }
    }
}
