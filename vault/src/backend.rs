//! Logical backend abstraction.
//!
//! The resource talks to Vault only through [`LogicalBackend`], so tests and
//! alternative transports can stand in for [`crate::VaultClient`].

use crate::{error::VaultResult, json::ConfigData, secrets::Secret};
use async_trait::async_trait;
use std::sync::Arc;

/// Path-addressed logical write/delete/read against a secret store.
#[async_trait]
pub trait LogicalBackend: Send + Sync {
    /// Overwrite the value stored at `path` with `data`.
    ///
    /// Returns the response body when the backend sends one.
    async fn write(&self, path: &str, data: &ConfigData) -> VaultResult<Option<Secret>>;

    /// Remove the value stored at `path`.
    async fn delete(&self, path: &str) -> VaultResult<()>;

    /// Read the value stored at `path`; `None` when nothing is there.
    async fn read(&self, path: &str) -> VaultResult<Option<Secret>>;
}

#[async_trait]
impl<T: LogicalBackend + ?Sized> LogicalBackend for Arc<T> {
    async fn write(&self, path: &str, data: &ConfigData) -> VaultResult<Option<Secret>> {
        (**self).write(path, data).await
    }

    async fn delete(&self, path: &str) -> VaultResult<()> {
        (**self).delete(path).await
    }

    async fn read(&self, path: &str) -> VaultResult<Option<Secret>> {
        (**self).read(path).await
    }
}
