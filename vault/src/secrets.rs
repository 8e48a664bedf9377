//! Vault logical API response types.

use crate::json::ConfigData;
use serde::{Deserialize, Serialize};

/// Response body of a Vault logical read or write.
///
/// Writes to most mounts answer `204 No Content`; callers get `None` then.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Secret {
    /// Request identifier assigned by Vault
    #[serde(default)]
    pub request_id: String,
    /// Lease ID for leased secrets
    #[serde(default)]
    pub lease_id: String,
    /// Lease duration in seconds
    #[serde(default)]
    pub lease_duration: u64,
    /// Whether the lease is renewable
    #[serde(default)]
    pub renewable: bool,
    /// Stored data
    #[serde(default)]
    pub data: Option<ConfigData>,
    /// Warnings returned alongside the response
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}

/// Error body returned by Vault for non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    /// Error messages
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    /// Human-readable message from a response body.
    ///
    /// Falls back to the raw body when it is not Vault's error shape.
    #[must_use]
    pub fn message_from_body(body: &str) -> String {
        match serde_json::from_str::<Self>(body) {
            Ok(parsed) if !parsed.errors.is_empty() => parsed.errors.join("; "),
            _ => body.trim().to_string(),
        }
    }
}
