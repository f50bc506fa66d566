//! Error types for the xccdf-bundle CLI

use std::path::PathBuf;
use thiserror::Error;

use xccdf_bundle::parser::RecordKind;
use xccdf_bundle::{ConfigError, ParseError, TailoringError};

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Content extraction failed
    #[error("Parse failed: {0}")]
    Parse(#[from] ParseError),

    /// Tailoring could not be built
    #[error("Tailoring failed: {0}")]
    Tailoring(#[from] TailoringError),

    /// A record with this name is already stored
    #[error("{kind} '{name}' already exists")]
    AlreadyExists { kind: RecordKind, name: String },

    /// No record with this name is stored
    #[error("{kind} '{name}' not found")]
    NotFound { kind: RecordKind, name: String },

    /// The store has no bundle status yet
    #[error("No bundle has been parsed into {path}")]
    NoBundle { path: PathBuf },

    /// Output directory creation failed
    #[error("Failed to create output directory {path}: {source}")]
    OutputDirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File read error
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid command-line value
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create an invalid value error
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
