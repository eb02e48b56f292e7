//! Structured logging setup for textrpc applications
//!
//! The library crates only emit `tracing` events and spans. Nothing is
//! printed unless the application installs a subscriber. This module offers
//! a ready-made one:
//!
//! - an `EnvFilter` taken from `RUST_LOG`, falling back to the configured level
//! - a fmt layer with target, thread id and line number, either human
//!   readable or JSON
//!
//! # Examples
//!
//! ```rust,no_run
//! use textrpc_core::logging::{init_logging, LoggingConfig};
//!
//! init_logging(
//!     LoggingConfig::new("billing-client")
//!         .with_log_level("textrpc_client=debug,info")
//!         .with_json(true),
//! )
//! .expect("logging already initialized");
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for [`init_logging`]
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Name recorded in the startup event, to tell processes apart in shared logs
    pub service_name: String,

    /// Filter directive used when `RUST_LOG` is unset or invalid
    ///
    /// Accepts anything `EnvFilter` does: "info", "debug",
    /// "textrpc_client=trace,warn", and so on.
    pub log_level: String,

    /// Emit one JSON object per event instead of human-readable lines
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            service_name: "textrpc".to_string(),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Create a configuration with a custom service name and default settings
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set the fallback filter directive
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Switch between JSON and plain text output
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

/// Install a global `tracing` subscriber according to `config`
///
/// # Errors
///
/// Fails if the filter directive can't be parsed or if a global subscriber
/// has already been installed.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    if config.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    tracing::info!(
        service_name = %config.service_name,
        log_level = %config.log_level,
        json = config.json,
        "Logging initialized"
    );

    Ok(())
}
