//! Vault generic config resource.
//!
//! Writes an arbitrary JSON object to a configurable Vault path, deletes it
//! on destroy, and treats the path as the resource identity.

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod json;
pub mod resource;
pub mod schema;
pub mod secrets;

pub use backend::LogicalBackend;
pub use client::VaultClient;
pub use config::VaultConfig;
pub use error::{ResourceError, VaultError, VaultResult};
pub use json::{ConfigData, normalize_data_json, validate_data_json};
pub use resource::{DeleteOutcome, DeletePolicy, GenericConfigResource};
pub use schema::{PlanAction, Resource, ResourceData, ResourceSchema, generic_config_schema};
pub use secrets::Secret;
