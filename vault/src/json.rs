//! `data_json` handling: parsing, validation and canonical form.
//!
//! The payload is an arbitrary JSON object. Values stay typed as
//! [`serde_json::Value`] (null, bool, number, string, array, object) so
//! nothing is flattened to strings on the way to Vault.

use crate::error::ResourceError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parsed `data_json` payload: string keys mapped to JSON values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigData(Map<String, Value>);

impl ConfigData {
    /// Parse JSON object text.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::EmptyPayload`] for blank text or `null`
    /// - [`ResourceError::Syntax`] when `raw` is not valid JSON
    /// - [`ResourceError::NotAnObject`] for any other non-object JSON value
    pub fn parse(raw: &str) -> Result<Self, ResourceError> {
        if raw.trim().is_empty() {
            return Err(ResourceError::EmptyPayload);
        }

        let value: Value = serde_json::from_str(raw).map_err(|e| ResourceError::syntax(raw, &e))?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Err(ResourceError::EmptyPayload),
            other => Err(ResourceError::NotAnObject {
                kind: json_kind(&other),
            }),
        }
    }

    /// Value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the object has no keys. `{}` is a valid payload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Canonical single-line JSON text with sorted keys.
    #[must_use]
    pub fn to_canonical_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

impl From<Map<String, Value>> for ConfigData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<ConfigData> for Map<String, Value> {
    fn from(data: ConfigData) -> Self {
        data.0
    }
}

/// Rebuild `raw` as a single-line JSON string.
///
/// Whitespace and key order differences collapse to the same output, so a
/// host comparing stored and configured values sees no change. Text that
/// does not parse is returned unchanged; reporting it is the job of
/// [`validate_data_json`].
#[must_use]
pub fn normalize_data_json(raw: &str) -> String {
    serde_json::from_str::<Value>(raw).map_or_else(|_| raw.to_string(), |value| value.to_string())
}

/// Check `raw` locally, without any I/O.
///
/// Returns an empty list when `raw` is acceptable as `data_json`.
#[must_use]
pub fn validate_data_json(raw: &str) -> Vec<ResourceError> {
    match ConfigData::parse(raw) {
        Ok(_) => Vec::new(),
        Err(err) => vec![err],
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
