//! XCCDF Tailoring Synthesis
//!
//! Builds an XCCDF tailoring document that overlays user overrides onto a
//! profile extracted from security content, without touching the content
//! itself.
//!
//! # Overview
//!
//! ```text
//! TailoringOverrideSpec ──┐
//!   (YAML)                │
//!                         ├──► resolve_variable_overrides ──► [VariableOverride]
//! [Variable] ─────────────┘                                        │
//!                                                                  ▼
//! base Profile ─────────────────────────────────► tailored_profile_to_xml ──► XML
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use xccdf_bundle::tailoring::{
//!     resolve_variable_overrides, tailored_profile_to_xml, TailoringOverrideSpec,
//! };
//!
//! let spec = TailoringOverrideSpec::from_yaml_str(&yaml)?;
//! spec.validate()?;
//!
//! let overrides = resolve_variable_overrides(&spec, &variables)?;
//! let xml = tailored_profile_to_xml(&spec, &base_profile, "ssg-ocp4-ds.xml", &overrides)?;
//! ```

mod error;
mod resolve;
mod spec;
mod writer;

pub use error::{Result, TailoringError};
pub use resolve::{resolve_variable_overrides, VariableOverride};
pub use spec::{RuleReferenceSpec, TailoringOverrideSpec, VariableValueSpec};
pub use writer::{content_href, tailored_profile_id, tailored_profile_to_xml, CONTENT_ROOT};
