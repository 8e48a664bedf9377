//! Test fixtures with sample configurations.

/// A `path` / `data_json` pair as a host would supply it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleConfig {
    /// Vault path
    pub path: &'static str,
    /// JSON payload as written by a user
    pub data_json: &'static str,
    /// Canonical form of `data_json`
    pub canonical: &'static str,
}

impl SampleConfig {
    /// Flat object under a KV mount.
    #[must_use]
    pub const fn secret_foo() -> Self {
        Self {
            path: "secret/foo",
            data_json: "{\"a\": 1, \"b\": \"x\"}",
            canonical: r#"{"a":1,"b":"x"}"#,
        }
    }

    /// CORS settings, with an array value.
    #[must_use]
    pub const fn cors() -> Self {
        Self {
            path: "sys/config/cors",
            data_json: r#"{
  "enabled": true,
  "allowed_origins": ["https://app.example.com", "https://admin.example.com"]
}"#,
            canonical: r#"{"allowed_origins":["https://app.example.com","https://admin.example.com"],"enabled":true}"#,
        }
    }

    /// Token role with nested values and mixed types.
    #[must_use]
    pub const fn token_role() -> Self {
        Self {
            path: "auth/token/roles/ci",
            data_json: r#"{"renewable": false, "token_period": 3600,
                "allowed_policies": ["ci"], "meta": {"team": "platform", "cost": 1.5}}"#,
            canonical: r#"{"allowed_policies":["ci"],"meta":{"cost":1.5,"team":"platform"},"renewable":false,"token_period":3600}"#,
        }
    }

    /// All samples.
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![Self::secret_foo(), Self::cors(), Self::token_role()]
    }
}

/// Payloads rejected before any backend call.
pub const REJECTED_PAYLOADS: &[&str] = &["", "   ", "null", "{invalid", "[1, 2]", "42", "\"text\""];
