//! Security Content Extraction
//!
//! Walks a parsed XCCDF benchmark or SCAP datastream and turns its
//! `Profile`, `Rule` and `Value` elements into [`Profile`], [`Rule`] and
//! [`Variable`] records.
//!
//! # Usage
//!
//! ```ignore
//! use xccdf_bundle::parser::{read_content, ContentParser};
//! use xccdf_bundle::references::ReferenceParser;
//! use xccdf_bundle::xccdf::ContentDocument;
//!
//! let references = ReferenceParser::with_defaults()?;
//! let parser = ContentParser::new(&references);
//!
//! let text = read_content("/content/ssg-ocp4-ds.xml")?;
//! let doc = ContentDocument::parse(&text)?;
//!
//! parser.parse_profiles(&doc, |profile| {
//!     store.create(profile)?;
//!     Ok(())
//! })?;
//! ```
//!
//! # Record Sinks
//!
//! Each pass hands every record to a caller-supplied sink as soon as it is
//! built. The passes differ in how they react to failures:
//!
//! | Pass | Missing id/title | Sink error |
//! |------|------------------|------------|
//! | profiles | abort | abort |
//! | rules | abort | log, continue |
//! | variables | abort | log, continue |
//!
//! Profiles additionally require a description. Per-item problems (an
//! undecodable fix, a variable with two defaults, text that fails to
//! render) are logged and never end a pass.

pub mod error;

mod fix;
mod profile;
mod rule;
mod types;
mod variable;

#[cfg(test)]
pub(crate) mod fixtures;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use error::{ParseError, Result, SinkError, SinkResult};
pub use fix::{
    collect_fixes, decode_fix_object, is_relevant_fix, KUBERNETES_FIX_SYSTEM,
    MACHINE_CONFIG_FIX_SYSTEM,
};
pub use types::{
    FixDefinition, Profile, ProfileRule, ProfileValue, RecordKind, Rule, ValueSelection, Variable,
    VariableType,
};

use crate::references::ReferenceParser;
use crate::xccdf::{render_text, Element};

/// How descriptive text (descriptions, rationales, warnings) is extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    /// Character data of the element only, verbatim
    Raw,

    /// Inner markup flattened to readable text
    #[default]
    Rendered,
}

impl TextMode {
    /// Parse from a configuration string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "raw" | "verbatim" => Some(Self::Raw),
            "rendered" | "render" => Some(Self::Rendered),
            _ => None,
        }
    }
}

/// Extracts records from a content document
///
/// Holds the reference registry by reference; the registry must be fully
/// populated before the parser is created.
#[derive(Debug, Clone, Copy)]
pub struct ContentParser<'r> {
    references: &'r ReferenceParser,
    text_mode: TextMode,
}

impl<'r> ContentParser<'r> {
    /// Parser using rendered text
    pub fn new(references: &'r ReferenceParser) -> Self {
        Self {
            references,
            text_mode: TextMode::default(),
        }
    }

    /// Set how descriptive text is extracted
    pub fn with_text_mode(mut self, text_mode: TextMode) -> Self {
        self.text_mode = text_mode;
        self
    }

    /// The configured text mode
    pub fn text_mode(&self) -> TextMode {
        self.text_mode
    }

    /// Text of an optional descriptive child, empty if absent
    ///
    /// In rendered mode a fragment that fails to render is logged and
    /// yields an empty string.
    fn descriptive_text(&self, element: Option<Element<'_, '_>>, field: &str, id: &str) -> String {
        let Some(element) = element else {
            return String::new();
        };

        match self.text_mode {
            TextMode::Raw => element.text(),
            TextMode::Rendered => match rendered_text(&element) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(id = %id, field, error = %e, "Couldn't parse text field");
                    String::new()
                }
            },
        }
    }
}

/// Inner markup of an element flattened to plain text
fn rendered_text(element: &Element<'_, '_>) -> Result<String> {
    Ok(render_text(element.inner_xml())?)
}

/// Read a content file into memory
pub fn read_content(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })
}
