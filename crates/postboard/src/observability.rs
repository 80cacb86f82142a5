//! Logging setup for the postboard binary.
//!
//! Logs go to stderr so they never mix with board output on stdout.

use std::env;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Service name recorded at startup
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Log level filter used when `RUST_LOG` is unset (e.g., "info", "debug")
    pub log_level: String,
    /// Enable JSON-formatted logs for structured logging
    pub json_logs: bool,
}

impl ObservabilityConfig {
    /// Create a new configuration with the given service name.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "warn".to_string(),
            json_logs: false,
        }
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    /// The filter directive in effect: `RUST_LOG` when set, else `log_level`.
    pub fn filter_directive(&self) -> String {
        env::var("RUST_LOG").unwrap_or_else(|_| self.log_level.clone())
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

/// Initialize logging with default configuration.
pub fn init_observability() -> Result<(), Box<dyn std::error::Error>> {
    init_observability_with_config(ObservabilityConfig::default())
}

/// Initialize logging with custom configuration.
///
/// Sets up an env filter and a text or JSON fmt layer writing to stderr.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or a global
/// subscriber is already installed.
pub fn init_observability_with_config(
    config: ObservabilityConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_new(config.filter_directive())?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!(
        service = %config.service_name,
        version = %config.service_version,
        "Logging initialized"
    );
    Ok(())
}
