//! Records extracted from security content

use serde::{Deserialize, Serialize};

use crate::references::Annotations;

/// Kind of record an extraction pass produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// XCCDF `Profile`
    Profile,
    /// XCCDF `Rule`
    Rule,
    /// XCCDF `Value`
    Variable,
}

impl RecordKind {
    /// Directory-style plural name (e.g., "profiles")
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Profile => "profiles",
            Self::Rule => "rules",
            Self::Variable => "variables",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Profile => write!(f, "profile"),
            Self::Rule => write!(f, "rule"),
            Self::Variable => write!(f, "variable"),
        }
    }
}

/// A compliance profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// XCCDF id (e.g., "xccdf_org.ssgproject.content_profile_moderate")
    pub id: String,

    /// Short name, the id without its content prefix
    pub name: String,

    pub title: String,

    pub description: String,

    /// Rules selected by the profile, in document order
    #[serde(default)]
    pub rules: Vec<ProfileRule>,

    /// Variables the profile sets, in document order
    #[serde(default)]
    pub values: Vec<ProfileValue>,
}

/// A rule selected by a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRule {
    /// Rule short name
    pub name: String,

    pub selected: bool,
}

impl ProfileRule {
    /// An enabled rule reference
    pub fn selected(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selected: true,
        }
    }
}

/// A variable value set by a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileValue {
    /// The `idref` exactly as written in the content
    pub name: String,

    /// The value the profile assigns
    #[serde(default)]
    pub override_value: String,
}

/// A compliance rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,

    pub name: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub rationale: String,

    #[serde(default)]
    pub warning: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// Remediations, at most one per platform
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub available_fixes: Vec<FixDefinition>,

    /// Compliance standard annotations
    #[serde(default, skip_serializing_if = "Annotations::is_empty")]
    pub annotations: Annotations,
}

impl Rule {
    /// The fix for a platform, if the rule has one
    pub fn fix_for_platform(&self, platform: &str) -> Option<&FixDefinition> {
        self.available_fixes.iter().find(|f| f.platform == platform)
    }
}

/// An automated remediation attached to a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixDefinition {
    /// Platform the fix applies to (CPE name)
    #[serde(default)]
    pub platform: String,

    /// How disruptive applying the fix is (e.g., "low", "high")
    #[serde(default)]
    pub disruption: String,

    /// The decoded remediation object
    ///
    /// Opaque to this crate; consumers interpret it.
    pub fix_object: serde_yaml::Value,
}

/// Type of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    /// String value (default)
    #[default]
    String,

    /// Numeric value
    Number,

    /// Boolean value
    Boolean,
}

impl VariableType {
    /// Parse from the XCCDF `type` attribute
    ///
    /// Anything unrecognized, or no attribute at all, is a string.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("number") => Self::Number,
            Some("boolean") => Self::Boolean,
            _ => Self::String,
        }
    }
}

impl std::fmt::Display for VariableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Number => write!(f, "number"),
            Self::Boolean => write!(f, "boolean"),
        }
    }
}

/// A tunable variable (XCCDF `Value`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: String,

    pub name: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, rename = "type")]
    pub var_type: VariableType,

    /// Default value, if the content declares one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Enumerated choices, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selections: Vec<ValueSelection>,
}

/// One enumerated choice of a variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSelection {
    /// The selector label
    pub description: String,

    pub value: String,
}

impl ValueSelection {
    pub fn new(description: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            value: value.into(),
        }
    }
}
