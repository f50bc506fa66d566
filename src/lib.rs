//! # xccdf-bundle
//!
//! Turns XCCDF security content (ComplianceAsCode benchmarks and SCAP
//! datastreams) into structured profile, rule and variable records, and
//! synthesizes XCCDF tailoring documents from user overrides.
//!
//! ## Features
//!
//! - **Record extraction**: profiles with their rule selections and
//!   variable settings, rules with remediation fixes and severity,
//!   variables with type, default and enumerated choices
//! - **Control annotations**: rule references to NIST SP 800-53 (or any
//!   registered standard) become annotation labels
//! - **Rich text**: XHTML in descriptions is flattened to readable text
//! - **Tailoring**: enable/disable rules, set variables and override
//!   title/description on top of an extracted profile
//!
//! ## Quick Start
//!
//! ```ignore
//! use xccdf_bundle::parser::{read_content, ContentParser};
//! use xccdf_bundle::xccdf::ContentDocument;
//! use xccdf_bundle::ParserConfig;
//!
//! let config = ParserConfig::from_env();
//! config.validate()?;
//! let references = config.reference_parser()?;
//! let parser = ContentParser::new(&references).with_text_mode(config.text_mode);
//!
//! let text = read_content(&config.content_path)?;
//! let doc = ContentDocument::parse(&text)?;
//!
//! parser.parse_profiles(&doc, |profile| store.create(profile))?;
//! parser.parse_rules(&doc, |rule| store.create(rule))?;
//! parser.parse_variables(&doc, |variable| store.create(variable))?;
//! ```

mod config;
pub mod observability;
pub mod parser;
pub mod references;
pub mod tailoring;
pub mod xccdf;

// Re-exports
pub use config::{
    ConfigError, ParserConfig, ParserConfigBuilder, StandardConfig, DEFAULT_BUNDLE_NAMESPACE,
    DEFAULT_CONTENT_PATH,
};
pub use parser::{ContentParser, ParseError, Profile, Rule, TextMode, Variable};
pub use references::ReferenceParser;
pub use tailoring::{TailoringError, TailoringOverrideSpec};
pub use xccdf::ContentDocument;
