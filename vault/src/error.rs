//! Error types using thiserror 2.0.
//!
//! [`VaultError`] covers the transport and the Vault API, with retryability
//! classification. [`ResourceError`] is what the generic config resource
//! reports to its host.

use rust_common::PlatformError;
use thiserror::Error;

/// Vault-specific errors.
#[derive(Error, Debug)]
pub enum VaultError {
    /// Vault server unavailable or answered with an unexpected status
    #[error("Vault unavailable: {0}")]
    Unavailable(String),

    /// Token missing or rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Nothing stored at the path
    #[error("Secret not found at path: {0}")]
    SecretNotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Rate limited
    #[error("Rate limited")]
    RateLimited,

    /// Platform error
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Result type for Vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

impl VaultError {
    /// Check if error is retryable.
    ///
    /// Informational only; nothing in this crate retries.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::RateLimited | Self::Http(_))
    }

    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create an authentication failed error.
    #[must_use]
    pub fn auth_failed(msg: impl Into<String>) -> Self {
        Self::AuthenticationFailed(msg.into())
    }

    /// Create a secret not found error.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::SecretNotFound(path.into())
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Errors reported by the generic config resource.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// `data_json` is not valid JSON
    #[error("data_json {raw:?} syntax error: {message}")]
    Syntax {
        /// The offending text
        raw: String,
        /// Parser diagnostic
        message: String,
    },

    /// `data_json` is blank or `null`
    #[error("data_json must not be empty or null")]
    EmptyPayload,

    /// `data_json` is valid JSON but not an object
    #[error("data_json must be a JSON object, got {kind}")]
    NotAnObject {
        /// JSON kind that was supplied instead
        kind: &'static str,
    },

    /// Backend write failed; no identity was committed
    #[error("error writing to Vault: {0}")]
    BackendWrite(#[source] VaultError),

    /// Backend delete failed and the host asked for failures to propagate
    #[error("error deleting {path:?} from Vault: {source}")]
    BackendDelete {
        /// Path that could not be deleted
        path: String,
        /// Backend failure
        #[source]
        source: VaultError,
    },

    /// Backend read failed while fetching the stored value
    #[error("error reading {path:?} from Vault: {source}")]
    BackendRead {
        /// Path that could not be read
        path: String,
        /// Backend failure
        #[source]
        source: VaultError,
    },

    /// Required attribute absent or blank
    #[error("missing required attribute {0:?}")]
    MissingAttribute(String),
}

impl ResourceError {
    /// Build a syntax error from the offending text and the parser error.
    #[must_use]
    pub fn syntax(raw: &str, err: &serde_json::Error) -> Self {
        Self::Syntax {
            raw: raw.to_string(),
            message: err.to_string(),
        }
    }

    /// True for errors raised locally, before any backend call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Syntax { .. }
                | Self::EmptyPayload
                | Self::NotAnObject { .. }
                | Self::MissingAttribute(_)
        )
    }
}
