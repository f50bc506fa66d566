//! Parser configuration
//!
//! Everything a parse run needs to know up front: which content file to
//! read, which bundle the records belong to, how descriptive text is
//! extracted, and any compliance standards beyond the built-in NIST one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parser::{ParseError, TextMode};
use crate::references::ReferenceParser;

/// Default location of the datastream inside the content image
pub const DEFAULT_CONTENT_PATH: &str = "/content/ssg-ocp4-ds.xml";

/// Default namespace records are stored under
pub const DEFAULT_BUNDLE_NAMESPACE: &str = "openshift-compliance";

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A required setting is missing or invalid
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// A configured standard could not be registered
    #[error(transparent)]
    Standard(#[from] ParseError),
}

/// An extra compliance standard to recognize in rule references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardConfig {
    /// Name used in annotations (e.g., "PCI-DSS")
    pub name: String,

    /// Regular expression matched against reference hrefs
    pub url_pattern: String,
}

/// Configuration of a parse run
///
/// # Example
///
/// ```ignore
/// use xccdf_bundle::ParserConfig;
///
/// // Load from environment variables
/// let config = ParserConfig::from_env();
///
/// // Or build programmatically
/// let config = ParserConfig::builder()
///     .content_path("/content/ssg-rhcos4-ds.xml")
///     .bundle_name("rhcos4")
///     .standard("PCI-DSS", r"^https://www\.pcisecuritystandards\.org/")
///     .build();
/// config.validate()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Path of the content file
    pub content_path: PathBuf,

    /// Name of the bundle records are parsed for
    pub bundle_name: String,

    /// Namespace the bundle and its records live in
    pub bundle_namespace: String,

    /// How descriptions, rationales and warnings are extracted
    pub text_mode: TextMode,

    /// Standards registered after the built-in ones
    pub standards: Vec<StandardConfig>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            content_path: PathBuf::from(DEFAULT_CONTENT_PATH),
            bundle_name: String::new(),
            bundle_namespace: DEFAULT_BUNDLE_NAMESPACE.to_string(),
            text_mode: TextMode::default(),
            standards: Vec::new(),
        }
    }
}

impl ParserConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `XCCDF_DS_PATH`: content file (default: "/content/ssg-ocp4-ds.xml")
    /// - `XCCDF_BUNDLE_NAME`: bundle name (default: empty)
    /// - `XCCDF_BUNDLE_NAMESPACE`: namespace (default: "openshift-compliance")
    /// - `XCCDF_TEXT_MODE`: "raw" or "rendered" (default: "rendered")
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let content_path = std::env::var("XCCDF_DS_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.content_path);

        let bundle_name = std::env::var("XCCDF_BUNDLE_NAME").unwrap_or(defaults.bundle_name);

        let bundle_namespace =
            std::env::var("XCCDF_BUNDLE_NAMESPACE").unwrap_or(defaults.bundle_namespace);

        let text_mode = std::env::var("XCCDF_TEXT_MODE")
            .ok()
            .and_then(|s| TextMode::parse(&s))
            .unwrap_or(defaults.text_mode);

        Self {
            content_path,
            bundle_name,
            bundle_namespace,
            text_mode,
            standards: defaults.standards,
        }
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Create a new builder for programmatic configuration.
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }

    /// Check the configuration is usable for a parse run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bundle_name.is_empty() {
            return Err(ConfigError::Invalid("bundle name is required".into()));
        }
        if self.bundle_namespace.is_empty() {
            return Err(ConfigError::Invalid("bundle namespace is required".into()));
        }
        Ok(())
    }

    /// Reference registry with the built-in standards plus configured ones
    pub fn reference_parser(&self) -> Result<ReferenceParser, ConfigError> {
        let mut parser = ReferenceParser::with_defaults()?;
        for standard in &self.standards {
            parser.register_standard(&standard.name, &standard.url_pattern)?;
        }
        Ok(parser)
    }
}

/// Builder for ParserConfig
#[derive(Debug, Clone, Default)]
pub struct ParserConfigBuilder {
    config: ParserConfig,
}

impl ParserConfigBuilder {
    /// Set the content file
    pub fn content_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.content_path = path.into();
        self
    }

    /// Set the bundle name
    pub fn bundle_name(mut self, name: impl Into<String>) -> Self {
        self.config.bundle_name = name.into();
        self
    }

    /// Set the bundle namespace
    pub fn bundle_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.bundle_namespace = namespace.into();
        self
    }

    /// Set the text extraction mode
    pub fn text_mode(mut self, mode: TextMode) -> Self {
        self.config.text_mode = mode;
        self
    }

    /// Recognize an additional compliance standard
    pub fn standard(mut self, name: impl Into<String>, url_pattern: impl Into<String>) -> Self {
        self.config.standards.push(StandardConfig {
            name: name.into(),
            url_pattern: url_pattern.into(),
        });
        self
    }

    /// Build the configuration
    pub fn build(self) -> ParserConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::references::NIST_800_53;

    fn sample_config_toml() -> &'static str {
        r#"
content_path = "/content/ssg-rhcos4-ds.xml"
bundle_name = "rhcos4"
text_mode = "raw"

[[standards]]
name = "PCI-DSS"
url_pattern = '^https://www\.pcisecuritystandards\.org/'
"#
    }

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.content_path, PathBuf::from("/content/ssg-ocp4-ds.xml"));
        assert_eq!(config.bundle_namespace, "openshift-compliance");
        assert_eq!(config.text_mode, TextMode::Rendered);
        assert!(config.standards.is_empty());
    }

    #[test]
    fn test_from_toml() {
        let config = ParserConfig::from_toml_str(sample_config_toml()).unwrap();
        assert_eq!(config.content_path, PathBuf::from("/content/ssg-rhcos4-ds.xml"));
        assert_eq!(config.bundle_name, "rhcos4");
        assert_eq!(config.bundle_namespace, "openshift-compliance");
        assert_eq!(config.text_mode, TextMode::Raw);
        assert_eq!(config.standards[0].name, "PCI-DSS");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parser.toml");
        std::fs::write(&path, sample_config_toml()).unwrap();
        assert_eq!(ParserConfig::from_file(&path).unwrap().bundle_name, "rhcos4");

        let missing = ParserConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let err = ParserConfig::from_toml_str("text_mode = \"markdown\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_requires_bundle() {
        assert!(ParserConfig::default().validate().is_err());

        let config = ParserConfig::builder()
            .bundle_name("ocp4")
            .bundle_namespace("")
            .build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_and_reference_parser() {
        let config = ParserConfig::builder()
            .content_path("/tmp/ds.xml")
            .bundle_name("ocp4")
            .text_mode(TextMode::Raw)
            .standard("PCI-DSS", r"^https://www\.pcisecuritystandards\.org/")
            .build();

        let parser = config.reference_parser().unwrap();
        let names: Vec<_> = parser.standards().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![NIST_800_53, "PCI-DSS"]);
    }

    #[test]
    fn test_bad_standard_pattern_fails_at_startup() {
        let config = ParserConfig::builder()
            .bundle_name("ocp4")
            .standard("broken", "(")
            .build();
        assert!(matches!(
            config.reference_parser().unwrap_err(),
            ConfigError::Standard(ParseError::Pattern { .. })
        ));
    }
}
