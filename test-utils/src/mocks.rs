//! Mock implementations for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use vault_generic_config::{ConfigData, LogicalBackend, Secret, VaultError, VaultResult};

/// A call received by [`MockLogicalBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    /// Logical write
    Write {
        /// Target path
        path: String,
        /// Payload as received
        data: ConfigData,
    },
    /// Logical delete
    Delete {
        /// Target path
        path: String,
    },
    /// Logical read
    Read {
        /// Target path
        path: String,
    },
}

impl BackendCall {
    /// Path the call addressed.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Write { path, .. } | Self::Delete { path } | Self::Read { path } => path,
        }
    }
}

/// Failure injected into a mock operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Network or server failure
    Unavailable(String),
    /// 403 from Vault
    PermissionDenied,
    /// 404 from Vault
    NotFound,
    /// 429 from Vault
    RateLimited,
}

impl Failure {
    fn to_error(&self, path: &str) -> VaultError {
        match self {
            Self::Unavailable(msg) => VaultError::unavailable(msg.clone()),
            Self::PermissionDenied => VaultError::PermissionDenied(path.to_string()),
            Self::NotFound => VaultError::not_found(path),
            Self::RateLimited => VaultError::RateLimited,
        }
    }
}

/// In-memory logical backend that records every call.
///
/// Deleting a missing path succeeds, as it does on a KV mount.
#[derive(Debug, Default)]
pub struct MockLogicalBackend {
    store: RwLock<HashMap<String, ConfigData>>,
    calls: RwLock<Vec<BackendCall>>,
    write_failure: RwLock<Option<Failure>>,
    delete_failure: RwLock<Option<Failure>>,
    read_failure: RwLock<Option<Failure>>,
}

impl MockLogicalBackend {
    /// Create an empty mock backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following write fail (or succeed again with `None`).
    pub async fn fail_writes(&self, failure: Option<Failure>) {
        *self.write_failure.write().await = failure;
    }

    /// Make every following delete fail (or succeed again with `None`).
    pub async fn fail_deletes(&self, failure: Option<Failure>) {
        *self.delete_failure.write().await = failure;
    }

    /// Make every following read fail (or succeed again with `None`).
    pub async fn fail_reads(&self, failure: Option<Failure>) {
        *self.read_failure.write().await = failure;
    }

    /// Store a value without recording a call, simulating out-of-band writes.
    pub async fn seed(&self, path: &str, data: ConfigData) {
        self.store.write().await.insert(path.to_string(), data);
    }

    /// Remove a value without recording a call.
    pub async fn evict(&self, path: &str) {
        self.store.write().await.remove(path);
    }

    /// Value currently stored at `path`.
    pub async fn stored(&self, path: &str) -> Option<ConfigData> {
        self.store.read().await.get(path).cloned()
    }

    /// All calls received so far.
    pub async fn calls(&self) -> Vec<BackendCall> {
        self.calls.read().await.clone()
    }

    /// Number of calls received so far.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Forget recorded calls, keeping stored values.
    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }
}

#[async_trait]
impl LogicalBackend for MockLogicalBackend {
    async fn write(&self, path: &str, data: &ConfigData) -> VaultResult<Option<Secret>> {
        self.calls.write().await.push(BackendCall::Write {
            path: path.to_string(),
            data: data.clone(),
        });

        if let Some(failure) = self.write_failure.read().await.as_ref() {
            return Err(failure.to_error(path));
        }

        self.store.write().await.insert(path.to_string(), data.clone());
        Ok(None)
    }

    async fn delete(&self, path: &str) -> VaultResult<()> {
        self.calls.write().await.push(BackendCall::Delete {
            path: path.to_string(),
        });

        if let Some(failure) = self.delete_failure.read().await.as_ref() {
            return Err(failure.to_error(path));
        }

        self.store.write().await.remove(path);
        Ok(())
    }

    async fn read(&self, path: &str) -> VaultResult<Option<Secret>> {
        self.calls.write().await.push(BackendCall::Read {
            path: path.to_string(),
        });

        if let Some(failure) = self.read_failure.read().await.as_ref() {
            return Err(failure.to_error(path));
        }

        Ok(self.store.read().await.get(path).map(|data| Secret {
            data: Some(data.clone()),
            ..Default::default()
        }))
    }
}
