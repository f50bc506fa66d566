//! Rule Reference Annotations
//!
//! Turns the `<reference>` elements of an XCCDF rule into key/value
//! annotations that tie the rule to the controls of external compliance
//! standards.
//!
//! # Overview
//!
//! ```text
//! <reference href="http://nvlpubs.nist.gov/.../NIST.SP.800-53r4.pdf">CM-6(a)</reference>
//!            │                                                          │
//!            ▼                                                          │
//!   ComplianceStandard ("NIST-800-53") ──── formatter chain ◄───────────┘
//!                                              │
//!                                              ▼
//!   control.compliance.openshift.io/NIST-800-53 = "CM-6(a)"
//!   policies.open-cluster-management.io/standards = "NIST-800-53"
//!   policies.open-cluster-management.io/controls = "CM-6(a)"
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use xccdf_bundle::references::ReferenceParser;
//!
//! let mut references = ReferenceParser::with_defaults()?;
//! references.register_standard("PCI-DSS", r"^https://www\.pcisecuritystandards\.org/")?;
//!
//! let annotations = references.parse(&rule_element)?;
//! ```

mod formatters;
mod registry;

use std::collections::BTreeMap;

pub use formatters::{
    append_with_separator, control_formatter, rhacm_formatter, CONTROL_ANNOTATION_BASE,
    RHACM_CONTROLS_ANNOTATION, RHACM_STANDARDS_ANNOTATION,
};
pub use registry::{AnnotationFormatter, ComplianceStandard, ReferenceParser};

use crate::parser::error::Result;

/// Annotations attached to a rule, keyed by annotation name
pub type Annotations = BTreeMap<String, String>;

/// Name of the NIST SP 800-53 standard in annotations
pub const NIST_800_53: &str = "NIST-800-53";

/// href of NIST SP 800-53 Rev. 4 as cited by ComplianceAsCode
pub const NIST_800_53_URL_PATTERN: &str =
    r"^http://nvlpubs\.nist\.gov/nistpubs/SpecialPublications/NIST\.SP\.800-53r4\.pdf$";

impl ReferenceParser {
    /// Registry with NIST SP 800-53 and both built-in formatters
    pub fn with_defaults() -> Result<Self> {
        let mut parser = Self::new();
        parser.register_standard(NIST_800_53, NIST_800_53_URL_PATTERN)?;
        parser.register_formatter(control_formatter);
        parser.register_formatter(rhacm_formatter);
        Ok(parser)
    }
}
