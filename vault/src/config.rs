//! Vault client configuration.

use crate::error::{VaultError, VaultResult};
use rust_common::HttpConfig;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// Address used when `VAULT_ADDR` is not set.
pub const DEFAULT_ADDR: &str = "https://127.0.0.1:8200";

/// Vault client configuration.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Vault server address
    pub addr: String,
    /// Token sent as `X-Vault-Token`
    pub token: SecretString,
    /// Enterprise namespace sent as `X-Vault-Namespace`
    pub namespace: Option<String>,
    /// HTTP client settings
    pub http: HttpConfig,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            token: SecretString::from(String::new()),
            namespace: None,
            http: HttpConfig::default(),
        }
    }
}

impl VaultConfig {
    /// Create a new configuration.
    #[must_use]
    pub fn new(addr: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            token: SecretString::from(token.into()),
            ..Default::default()
        }
    }

    /// Read `VAULT_ADDR`, `VAULT_TOKEN`, `VAULT_NAMESPACE`,
    /// `VAULT_SKIP_VERIFY` and `VAULT_CLIENT_TIMEOUT` (seconds).
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfig`] for an unparsable timeout or
    /// skip-verify flag.
    pub fn from_env() -> VaultResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`VaultConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> VaultResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("VAULT_ADDR").filter(|v| !v.is_empty()) {
            config.addr = addr;
        }
        if let Some(token) = lookup("VAULT_TOKEN") {
            config.token = SecretString::from(token);
        }
        config.namespace = lookup("VAULT_NAMESPACE").filter(|v| !v.is_empty());

        if let Some(raw) = lookup("VAULT_SKIP_VERIFY").filter(|v| !v.is_empty()) {
            let skip = parse_bool(&raw).ok_or_else(|| {
                VaultError::invalid_config(format!("VAULT_SKIP_VERIFY {raw:?} is not a boolean"))
            })?;
            config.http = config.http.with_tls_skip_verify(skip);
        }

        if let Some(raw) = lookup("VAULT_CLIENT_TIMEOUT").filter(|v| !v.is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                VaultError::invalid_config(format!("VAULT_CLIENT_TIMEOUT {raw:?} is not a number of seconds"))
            })?;
            config.http = config.http.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Set the namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    /// Replace the HTTP settings.
    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Check the address and token before any request is made.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfig`] when the address is not an
    /// http(s) URL or the token is empty.
    pub fn validate(&self) -> VaultResult<()> {
        let url = Url::parse(&self.addr)
            .map_err(|e| VaultError::invalid_config(format!("address {:?}: {e}", self.addr)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(VaultError::invalid_config(format!(
                "address {:?} must use http or https",
                self.addr
            )));
        }

        if self.token.expose_secret().trim().is_empty() {
            return Err(VaultError::invalid_config("no Vault token configured"));
        }

        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" => Some(true),
        "0" | "false" | "f" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = VaultConfig::default();
        assert_eq!(config.addr, DEFAULT_ADDR);
        assert!(config.namespace.is_none());
        assert_eq!(config.http.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = VaultConfig::from_lookup(lookup(&[
            ("VAULT_ADDR", "http://vault.local:8200"),
            ("VAULT_TOKEN", "s.abc"),
            ("VAULT_NAMESPACE", "team-a"),
            ("VAULT_SKIP_VERIFY", "true"),
            ("VAULT_CLIENT_TIMEOUT", "5"),
        ]))
        .unwrap();

        assert_eq!(config.addr, "http://vault.local:8200");
        assert_eq!(config.token.expose_secret(), "s.abc");
        assert_eq!(config.namespace.as_deref(), Some("team-a"));
        assert!(config.http.tls_skip_verify);
        assert_eq!(config.http.timeout, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_empty_environment() {
        let config = VaultConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.addr, DEFAULT_ADDR);
        assert!(matches!(config.validate(), Err(VaultError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let result = VaultConfig::from_lookup(lookup(&[("VAULT_CLIENT_TIMEOUT", "soon")]));
        assert!(matches!(result, Err(VaultError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_lookup_rejects_bad_skip_verify() {
        let result = VaultConfig::from_lookup(lookup(&[("VAULT_SKIP_VERIFY", "maybe")]));
        assert!(matches!(result, Err(VaultError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_bad_address() {
        let config = VaultConfig::new("not a url", "token");
        assert!(matches!(config.validate(), Err(VaultError::InvalidConfig(_))));

        let config = VaultConfig::new("ftp://vault.local", "token");
        assert!(matches!(config.validate(), Err(VaultError::InvalidConfig(_))));
    }

    #[test]
    fn test_token_not_in_debug_output() {
        let config = VaultConfig::new("https://vault.local:8200", "s.super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("s.super-secret"));
    }
}
