//! Generic config resource.
//!
//! Writes an arbitrary JSON object to a Vault path, deletes it on destroy,
//! and uses the path as its identity. Updates are full overwrites; reads
//! never contact Vault.

use crate::{
    backend::LogicalBackend,
    error::{ResourceError, VaultError},
    json::ConfigData,
    schema::{DATA_JSON, PATH, Resource, ResourceData, ResourceSchema, generic_config_schema},
};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Result of a backend delete, before any policy is applied.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The backend accepted the delete
    Deleted,
    /// The backend reported nothing at the path
    AlreadyAbsent,
    /// The delete failed
    Failed(VaultError),
}

impl DeleteOutcome {
    /// True for [`DeleteOutcome::Failed`].
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// What [`GenericConfigResource::delete`] does with a failed delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Log the failure and report success, so destroy is never blocked by a
    /// backend that may already be clean
    #[default]
    AbsorbFailures,
    /// Return [`ResourceError::BackendDelete`]
    Propagate,
}

/// The `vault_generic_config` resource.
pub struct GenericConfigResource<B> {
    backend: B,
    delete_policy: DeletePolicy,
}

impl<B: LogicalBackend> GenericConfigResource<B> {
    /// Resource backed by `backend`, absorbing delete failures.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            delete_policy: DeletePolicy::default(),
        }
    }

    /// Choose how delete failures are reported.
    #[must_use]
    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    /// Delete policy in effect.
    #[must_use]
    pub const fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// Backend in use.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Parse `raw_json` and overwrite the value at `path`.
    ///
    /// Returns the identity, which is `path`. Used for create and update.
    ///
    /// # Errors
    ///
    /// A blank path ([`ResourceError::MissingAttribute`]) and payload errors
    /// ([`ResourceError::Syntax`], [`ResourceError::EmptyPayload`],
    /// [`ResourceError::NotAnObject`]) are raised before the backend is
    /// called. A backend failure is [`ResourceError::BackendWrite`].
    #[instrument(skip(self, raw_json))]
    pub async fn write(&self, path: &str, raw_json: &str) -> Result<String, ResourceError> {
        if path.trim().trim_matches('/').is_empty() {
            return Err(ResourceError::MissingAttribute(PATH.to_string()));
        }
        let data = ConfigData::parse(raw_json)?;

        debug!(path, "Writing generic Vault config");
        self.backend
            .write(path, &data)
            .await
            .map_err(ResourceError::BackendWrite)?;

        Ok(path.to_string())
    }

    /// Delete the value at `path` and report what happened.
    #[instrument(skip(self))]
    pub async fn delete_outcome(&self, path: &str) -> DeleteOutcome {
        debug!(path, "Deleting generic Vault config");
        match self.backend.delete(path).await {
            Ok(()) => DeleteOutcome::Deleted,
            Err(VaultError::SecretNotFound(_)) => DeleteOutcome::AlreadyAbsent,
            Err(e) => DeleteOutcome::Failed(e),
        }
    }

    /// Delete the value at `path`, applying the delete policy.
    ///
    /// # Errors
    ///
    /// Only under [`DeletePolicy::Propagate`]: [`ResourceError::BackendDelete`].
    pub async fn delete(&self, path: &str) -> Result<(), ResourceError> {
        match self.delete_outcome(path).await {
            DeleteOutcome::Deleted | DeleteOutcome::AlreadyAbsent => Ok(()),
            DeleteOutcome::Failed(source) => match self.delete_policy {
                DeletePolicy::AbsorbFailures => {
                    debug!(path, error = %source, "Error deleting generic Vault config, ignoring");
                    Ok(())
                }
                DeletePolicy::Propagate => {
                    warn!(path, error = %source, "Error deleting generic Vault config");
                    Err(ResourceError::BackendDelete {
                        path: path.to_string(),
                        source,
                    })
                }
            },
        }
    }

    /// Identity for `path`. Does not contact the backend, so out-of-band
    /// changes are not detected here; see [`GenericConfigResource::fetch`].
    #[must_use]
    pub fn read(&self, path: &str) -> String {
        path.to_string()
    }

    /// Read the value currently stored at `path`.
    ///
    /// `None` when nothing is stored or the backend returns no data.
    ///
    /// # Errors
    ///
    /// [`ResourceError::BackendRead`] when the backend read fails.
    #[instrument(skip(self))]
    pub async fn fetch(&self, path: &str) -> Result<Option<ConfigData>, ResourceError> {
        let secret = self
            .backend
            .read(path)
            .await
            .map_err(|source| ResourceError::BackendRead {
                path: path.to_string(),
                source,
            })?;

        Ok(secret.and_then(|s| s.data))
    }
}

fn required<'a>(d: &'a ResourceData, name: &str) -> Result<&'a str, ResourceError> {
    d.get(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ResourceError::MissingAttribute(name.to_string()))
}

#[async_trait]
impl<B: LogicalBackend> Resource for GenericConfigResource<B> {
    fn schema(&self) -> ResourceSchema {
        generic_config_schema()
    }

    async fn create(&self, d: &mut ResourceData) -> Result<(), ResourceError> {
        let id = self.write(required(d, PATH)?, required(d, DATA_JSON)?).await?;
        d.set_id(id);
        Ok(())
    }

    async fn update(&self, d: &mut ResourceData) -> Result<(), ResourceError> {
        self.create(d).await
    }

    async fn refresh(&self, d: &mut ResourceData) -> Result<(), ResourceError> {
        // An imported instance only carries its identity.
        let path = match d.get(PATH).or_else(|| d.id()) {
            Some(path) => path.to_string(),
            None => return Err(ResourceError::MissingAttribute(PATH.to_string())),
        };

        let id = self.read(&path);
        d.set(PATH, path);
        d.set_id(id);
        Ok(())
    }

    async fn destroy(&self, d: &mut ResourceData) -> Result<(), ResourceError> {
        let Some(path) = d.id().map(str::to_string) else {
            return Ok(());
        };

        self.delete(&path).await?;
        d.clear_id();
        Ok(())
    }
}
