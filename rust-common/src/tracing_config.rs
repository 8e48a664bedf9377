//! Tracing subscriber initialisation.

use crate::error::PlatformError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Tracing configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Log level filter, used when `RUST_LOG` is not set
    pub log_level: String,
    /// Whether to output JSON format
    pub json_output: bool,
    /// Route output through the libtest capture writer
    pub test_writer: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_output: false,
            test_writer: false,
        }
    }
}

impl TracingConfig {
    /// Set the log level filter.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON output.
    #[must_use]
    pub const fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }

    /// Write through the test harness so output is captured per test.
    #[must_use]
    pub const fn for_tests(mut self) -> Self {
        self.test_writer = true;
        self
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns [`PlatformError::Internal`] if a global subscriber is already
/// installed. Test suites call this from several tests and ignore that case.
pub fn init_tracing(config: &TracingConfig) -> Result<(), PlatformError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match (config.json_output, config.test_writer) {
        (true, true) => registry
            .with(tracing_subscriber::fmt::layer().json().with_test_writer())
            .try_init(),
        (true, false) => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        (false, true) => registry
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init(),
        (false, false) => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    result.map_err(|e| PlatformError::internal(e.to_string()))
}
