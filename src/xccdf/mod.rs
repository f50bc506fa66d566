//! XCCDF Vocabulary Helpers
//!
//! Shared pieces for reading and writing XCCDF content:
//!
//! - [`ids`]: conversion between XCCDF ids and short record names
//! - [`ContentDocument`] / [`Element`]: read-only tree navigation
//! - [`render_text`]: flattening of XHTML rich text into plain text

pub mod ids;

mod document;
mod text;

pub use document::{ContentDocument, Element};
pub use ids::{
    prefixed_name, profile_name_from_id, rule_name_from_id, tailoring_id,
    variable_name_from_id, xccdf_profile_id, xccdf_rule_id,
};
pub use text::{render_text, TextError};

/// XML declaration emitted at the top of generated documents
pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// XCCDF 1.2 namespace URI
pub const XCCDF_URI: &str = "http://checklists.nist.gov/xccdf/1.2";
