//! Logging Initialization
//!
//! Every diagnostic in this crate goes through `tracing`. Binaries call
//! [`init`] once at startup to install a subscriber; libraries embedding the
//! parser are free to install their own instead.
//!
//! # Usage
//!
//! ```ignore
//! use xccdf_bundle::observability::{self, ObservabilityConfig};
//!
//! observability::init(&ObservabilityConfig::from_env())?;
//! ```

use std::env;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable format for development
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
    /// Compact single-line format
    Compact,
}

impl LogFormat {
    /// Parse from a configuration string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Log output format
    pub log_format: LogFormat,
    /// Log level filter (e.g., "info", "xccdf_bundle=debug")
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LOG_FORMAT`: "pretty", "json", or "compact" (default: "pretty")
    /// - `RUST_LOG`: Log filter directive (default: "info")
    pub fn from_env() -> Self {
        let log_format = env::var("LOG_FORMAT")
            .ok()
            .and_then(|s| LogFormat::parse(&s))
            .unwrap_or_default();

        let log_filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            log_format,
            log_filter,
        }
    }

    /// Override the filter directive
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Override the output format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }
}

/// Logging initialization error
#[derive(Debug)]
pub enum ObservabilityError {
    /// Invalid configuration
    Config(String),
    /// Subscriber installation failed (usually: already installed)
    Provider(String),
}

impl std::fmt::Display for ObservabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "Observability config error: {}", msg),
            Self::Provider(msg) => write!(f, "Provider error: {}", msg),
        }
    }
}

impl std::error::Error for ObservabilityError {}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `config.log_filter` when set.
pub fn init(config: &ObservabilityConfig) -> Result<(), ObservabilityError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .map_err(|e| ObservabilityError::Config(format!("Invalid log filter: {}", e)))?;

    let subscriber = tracing_subscriber::registry().with(filter);

    let result = match config.log_format {
        LogFormat::Pretty => subscriber
            .with(fmt::layer().pretty().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => subscriber
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => subscriber
            .with(fmt::layer().compact().with_target(true).with_writer(std::io::stderr))
            .try_init(),
    };
    result.map_err(|e| ObservabilityError::Provider(format!("Failed to init tracing: {}", e)))?;

    tracing::debug!(log_format = ?config.log_format, "Logging initialized");
    Ok(())
}
