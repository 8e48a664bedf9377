//! Shared test utilities for the Vault generic config workspace.
//!
//! This crate provides:
//! - Proptest generators for JSON payloads and Vault paths
//! - A recording mock of the logical backend
//! - Test fixtures with sample configurations

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod generators;
pub mod mocks;
pub mod fixtures;

pub use generators::*;
pub use mocks::{BackendCall, Failure, MockLogicalBackend};
