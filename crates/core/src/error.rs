//! Error types shared across list providers.

use thiserror::Error;

/// Errors surfaced by list entries and providers.
#[derive(Debug, Error)]
pub enum ListError {
    /// A setter rejected its input before any remote call was issued.
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },

    /// A failure from the underlying provider client, passed through unchanged.
    #[error(transparent)]
    Provider(Box<dyn std::error::Error + Send + Sync>),

    /// A backup snapshot could not be parsed.
    #[error("malformed snapshot: {0}")]
    Snapshot(String),
}

impl ListError {
    /// Create a validation error for one entry field.
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }

    /// Wrap a provider client failure without altering it.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Box::new(err))
    }

    /// True when the error is a local validation failure.
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, Self::InvalidValue { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_formats_field_and_message() {
        let err = ListError::invalid_value("user_rating", "150 is outside 0-100");
        assert!(err.is_invalid_value());
        assert_eq!(
            err.to_string(),
            "invalid value for user_rating: 150 is outside 0-100"
        );
    }

    #[test]
    fn provider_error_display_is_transparent() {
        let inner = std::io::Error::new(std::io::ErrorKind::TimedOut, "request timed out");
        let err = ListError::provider(inner);
        assert!(!err.is_invalid_value());
        assert_eq!(err.to_string(), "request timed out");
    }
}
