//! Error types for tailoring synthesis
//!
//! Covers validation of the override spec, resolution of variable
//! overrides against extracted variables, and XML serialization.

use crate::parser::VariableType;

/// Errors that can occur while building a tailoring document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TailoringError {
    /// The override spec does not name a profile to extend
    MissingExtends,

    /// The override spec could not be decoded
    InvalidSpec { message: String },

    /// A `setValues` entry names a variable that doesn't exist
    UnknownVariable { name: String },

    /// A `setValues` entry has a value the variable's type can't hold
    InvalidValue {
        name: String,
        value: String,
        expected: VariableType,
    },

    /// The document could not be written out
    Serialize { message: String },
}

impl std::fmt::Display for TailoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingExtends => write!(f, "tailored profile doesn't extend any profile"),
            Self::InvalidSpec { message } => write!(f, "invalid tailoring spec: {}", message),
            Self::UnknownVariable { name } => {
                write!(f, "variable '{}' not found in the extended profile's bundle", name)
            }
            Self::InvalidValue {
                name,
                value,
                expected,
            } => write!(
                f,
                "value '{}' for variable '{}' is not a valid {}",
                value, name, expected
            ),
            Self::Serialize { message } => {
                write!(f, "couldn't serialize tailoring document: {}", message)
            }
        }
    }
}

impl std::error::Error for TailoringError {}

impl From<serde_yaml::Error> for TailoringError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::InvalidSpec {
            message: e.to_string(),
        }
    }
}

/// Result type alias for tailoring operations
pub type Result<T> = std::result::Result<T, TailoringError>;
