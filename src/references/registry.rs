//! Compliance standard registry and reference parser

use regex::Regex;

use super::Annotations;
use crate::parser::error::{ParseError, Result};
use crate::xccdf::Element;

/// A compliance standard recognized in rule references
///
/// XCCDF rules cite controls with `<reference href="...">CM-6(a)</reference>`.
/// The `href` identifies the document the control belongs to, so a
/// standard is recognized by matching the href against `href_matcher`.
#[derive(Debug, Clone)]
pub struct ComplianceStandard {
    /// Standard name used in annotations (e.g., "NIST-800-53")
    pub name: String,

    href_matcher: Regex,
}

impl ComplianceStandard {
    /// Whether a reference href points at this standard
    pub fn matches(&self, href: &str) -> bool {
        self.href_matcher.is_match(href)
    }

    /// The href pattern this standard was registered with
    pub fn url_pattern(&self) -> &str {
        self.href_matcher.as_str()
    }
}

/// Function turning one (standard, control) pair into annotations
///
/// Called with the annotations accumulated so far for the rule, the
/// standard name and the reference text.
pub type AnnotationFormatter = Box<dyn Fn(&mut Annotations, &str, &str) + Send + Sync>;

/// Registry of standards plus the formatter chain applied to every match
///
/// Built once at startup and shared by reference with every extraction
/// pass. Standards are tried, and formatters run, in registration order.
#[derive(Default)]
pub struct ReferenceParser {
    standards: Vec<ComplianceStandard>,
    formatters: Vec<AnnotationFormatter>,
}

impl ReferenceParser {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a standard recognized by a regular expression over the href
    pub fn register_standard(&mut self, name: impl Into<String>, url_pattern: &str) -> Result<()> {
        let name = name.into();
        let href_matcher = Regex::new(url_pattern).map_err(|source| ParseError::Pattern {
            standard: name.clone(),
            source,
        })?;

        tracing::debug!(standard = %name, pattern = url_pattern, "Registered compliance standard");
        self.standards.push(ComplianceStandard { name, href_matcher });
        Ok(())
    }

    /// Append a formatter to the chain
    pub fn register_formatter<F>(&mut self, formatter: F)
    where
        F: Fn(&mut Annotations, &str, &str) + Send + Sync + 'static,
    {
        self.formatters.push(Box::new(formatter));
    }

    /// Registered standards, in registration order
    pub fn standards(&self) -> &[ComplianceStandard] {
        &self.standards
    }

    /// Number of registered formatters
    pub fn formatter_count(&self) -> usize {
        self.formatters.len()
    }

    /// Build the annotations for a rule from its `reference` elements
    ///
    /// References without an `href` are ignored. A reference matching
    /// several standards is reported once per standard.
    pub fn parse(&self, rule: &Element<'_, '_>) -> Result<Annotations> {
        let mut annotations = Annotations::new();

        for reference in rule.find_all("reference") {
            let Some(href) = reference.non_empty_attribute("href") else {
                continue;
            };

            let control = reference.text();
            for standard in self.standards.iter().filter(|s| s.matches(href)) {
                for formatter in &self.formatters {
                    formatter(&mut annotations, &standard.name, &control);
                }
            }
        }

        Ok(annotations)
    }
}

impl std::fmt::Debug for ReferenceParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceParser")
            .field("standards", &self.standards)
            .field("formatters", &self.formatters.len())
            .finish()
    }
}
