//! Error types for the MyAnimeList provider.

use anisync_core::ListError;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, MalError>;

/// Errors that can occur while talking to the remote service.
#[derive(Debug, Error)]
pub enum MalError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API error response from the remote service
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Authentication error (missing or invalid token)
    #[error("Authentication error: {0}")]
    Auth(String),
}

impl MalError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// HTTP status if this is an API error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<MalError> for ListError {
    fn from(err: MalError) -> Self {
        ListError::provider(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_carries_status() {
        let err = MalError::api(404, "anime not found");
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.to_string(), "API error (404): anime not found");
    }

    #[test]
    fn client_errors_pass_through_to_list_error_unchanged() {
        let err = ListError::from(MalError::api(503, "unavailable"));
        assert!(!err.is_invalid_value());
        assert_eq!(err.to_string(), "API error (503): unavailable");
    }
}
