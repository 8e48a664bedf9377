//! Vault HTTP client for the logical API.

use crate::{
    backend::LogicalBackend,
    config::VaultConfig,
    error::{VaultError, VaultResult},
    json::ConfigData,
    secrets::{ErrorResponse, Secret},
};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use rust_common::build_http_client;
use secrecy::ExposeSecret;
use tracing::{debug, instrument};
use url::Url;

/// Vault client issuing one HTTP request per logical operation.
///
/// No retries and no circuit breaking: a failed call is reported as is.
pub struct VaultClient {
    config: VaultConfig,
    base: Url,
    http: Client,
}

impl VaultClient {
    /// Create a new Vault client.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfig`] for a bad address or missing
    /// token, or a platform error if the HTTP client cannot be built.
    pub fn new(config: VaultConfig) -> VaultResult<Self> {
        config.validate()?;
        let base = Url::parse(&config.addr)
            .map_err(|e| VaultError::invalid_config(format!("invalid Vault address: {e}")))?;
        let http = build_http_client(&config.http)?;
        Ok(Self { config, base, http })
    }

    /// Create a client from the `VAULT_*` environment variables.
    ///
    /// # Errors
    ///
    /// See [`VaultConfig::from_env`] and [`VaultClient::new`].
    pub fn from_env() -> VaultResult<Self> {
        Self::new(VaultConfig::from_env()?)
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// `{addr}/v1/{path}`, each path segment percent-encoded.
    fn url(&self, path: &str) -> VaultResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| VaultError::invalid_config("Vault address cannot be a base URL"))?
            .pop_if_empty()
            .push("v1")
            .extend(path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&ConfigData>,
    ) -> VaultResult<Option<Secret>> {
        let mut request = self
            .http
            .request(method, self.url(path)?)
            .header("X-Vault-Token", self.config.token.expose_secret());

        if let Some(namespace) = &self.config.namespace {
            request = request.header("X-Vault-Namespace", namespace);
        }
        if let Some(data) = body {
            request = request.json(data);
        }

        let response = request
            .send()
            .await
            .map_err(|e| VaultError::unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, path, &text));
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

fn status_error(status: StatusCode, path: &str, body: &str) -> VaultError {
    let message = ErrorResponse::message_from_body(body);
    match status {
        StatusCode::NOT_FOUND => VaultError::not_found(path),
        StatusCode::UNAUTHORIZED => VaultError::auth_failed(format!("{path}: {message}")),
        StatusCode::FORBIDDEN => VaultError::PermissionDenied(format!("{path}: {message}")),
        StatusCode::TOO_MANY_REQUESTS => VaultError::RateLimited,
        _ => VaultError::unavailable(format!("Status {status}: {message}")),
    }
}

#[async_trait]
impl LogicalBackend for VaultClient {
    #[instrument(skip(self, data), fields(keys = data.len()))]
    async fn write(&self, path: &str, data: &ConfigData) -> VaultResult<Option<Secret>> {
        debug!(path, "Writing to Vault");
        self.request(Method::PUT, path, Some(data)).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &str) -> VaultResult<()> {
        debug!(path, "Deleting from Vault");
        self.request(Method::DELETE, path, None).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn read(&self, path: &str) -> VaultResult<Option<Secret>> {
        debug!(path, "Reading from Vault");
        match self.request(Method::GET, path, None).await {
            Err(VaultError::SecretNotFound(_)) => Ok(None),
            other => other,
        }
    }
}
