//! Centralized error types for the workspace.
//!
//! Errors raised below the Vault layer (HTTP client construction, tracing
//! setup) are collected here so every crate reports them the same way.

use thiserror::Error;

/// Common error type for platform operations.
///
/// # Examples
///
/// ```
/// use rust_common::PlatformError;
///
/// let err = PlatformError::internal("subscriber already set");
/// assert_eq!(err.to_string(), "Internal error: subscriber already set");
/// ```
#[derive(Error, Debug)]
pub enum PlatformError {
    /// HTTP client construction failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlatformError {
    /// Create an internal error with the given message.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpConfig, build_http_client};

    #[test]
    fn test_error_display() {
        let err = PlatformError::internal("subscriber already set");
        assert_eq!(err.to_string(), "Internal error: subscriber already set");
    }

    #[test]
    fn test_from_reqwest_error() {
        // Header values cannot carry a newline.
        let config = HttpConfig::default().with_user_agent("bad\nagent");
        let err = build_http_client(&config).unwrap_err();
        assert!(matches!(err, PlatformError::Http(_)));
        assert!(err.to_string().starts_with("HTTP request failed"));
    }
}
