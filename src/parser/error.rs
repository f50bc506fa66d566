//! Error types for content extraction
//!
//! Which errors end a pass and which only skip one item:
//!
//! | Error | Effect |
//! |-------|--------|
//! | [`ParseError::Structural`] | aborts the pass for that record kind |
//! | [`ParseError::MultipleDefaults`] | skips one variable |
//! | [`ParseError::FixDecode`] | drops one fix |
//! | [`ParseError::Text`] | field falls back to an empty string |
//! | [`ParseError::Pattern`] | fatal at startup, while building the registry |
//! | [`ParseError::Sink`] | aborts the profile pass; logged for rules and variables |

use std::path::PathBuf;

use thiserror::Error;

use super::types::RecordKind;
use crate::xccdf::TextError;

/// Error returned by a record sink
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Result of handing a record to a sink
pub type SinkResult = std::result::Result<(), SinkError>;

/// Errors that can occur while extracting records from content
#[derive(Debug, Error)]
pub enum ParseError {
    /// A mandatory field is missing from a Profile, Rule or Value element
    #[error("no {field} in {kind}{}", id.as_deref().map(|id| format!(" '{}'", id)).unwrap_or_default())]
    Structural {
        kind: RecordKind,
        field: &'static str,
        id: Option<String>,
    },

    /// A variable declares more than one default value
    #[error("attempting to set multiple values for variable {id}; already had {existing}, got {new}")]
    MultipleDefaults {
        id: String,
        existing: String,
        new: String,
    },

    /// A fix payload is not a YAML object
    #[error("couldn't decode fix for platform '{platform}': {message}")]
    FixDecode { platform: String, message: String },

    /// A compliance standard was registered with an invalid href pattern
    #[error("invalid href pattern for standard {standard}: {source}")]
    Pattern {
        standard: String,
        #[source]
        source: regex::Error,
    },

    /// The caller's sink rejected a record
    #[error("couldn't execute action for {kind} '{id}': {source}")]
    Sink {
        kind: RecordKind,
        id: String,
        #[source]
        source: SinkError,
    },

    /// The content is not well-formed XML
    #[error("couldn't read content XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Rich text could not be rendered
    #[error(transparent)]
    Text(#[from] TextError),

    /// The content file could not be read
    #[error("couldn't read content file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Missing mandatory field on an element
    pub fn structural(kind: RecordKind, field: &'static str, id: Option<&str>) -> Self {
        Self::Structural {
            kind,
            field,
            id: id.map(str::to_string),
        }
    }
}

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ParseError>;
