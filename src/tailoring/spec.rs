//! Tailoring override spec
//!
//! The user-authored description of how a tailored profile differs from
//! the profile it extends. Read from YAML:
//!
//! ```yaml
//! name: moderate-no-root-login
//! extends: ocp4-moderate
//! title: Moderate without root login checks
//! enableRules:
//!   - name: sshd_disable_root_login
//!     rationale: Required by our hardening baseline
//! disableRules:
//!   - name: api_server_audit_log_maxsize
//!     rationale: Audit logs are shipped off-cluster
//! setValues:
//!   - name: ocp4-var-sshd-max-sessions
//!     value: "5"
//!     rationale: Fewer concurrent sessions
//! ```

use serde::{Deserialize, Serialize};

use super::error::{Result, TailoringError};

/// Overrides applied on top of a base profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailoringOverrideSpec {
    /// Name of the tailoring; becomes part of the generated ids
    pub name: String,

    /// Name of the profile being extended
    #[serde(default)]
    pub extends: String,

    /// Replacement title, ignored when empty
    #[serde(default)]
    pub title: String,

    /// Replacement description, ignored when empty
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub enable_rules: Vec<RuleReferenceSpec>,

    #[serde(default)]
    pub disable_rules: Vec<RuleReferenceSpec>,

    #[serde(default)]
    pub set_values: Vec<VariableValueSpec>,
}

/// A rule enabled or disabled by a tailoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleReferenceSpec {
    /// Rule short name
    pub name: String,

    #[serde(default)]
    pub rationale: String,
}

impl RuleReferenceSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rationale: String::new(),
        }
    }
}

/// A variable value set by a tailoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableValueSpec {
    /// Variable record name
    pub name: String,

    pub value: String,

    #[serde(default)]
    pub rationale: String,
}

impl TailoringOverrideSpec {
    /// Spec extending `extends`, with no overrides yet
    pub fn new(name: impl Into<String>, extends: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: extends.into(),
            ..Default::default()
        }
    }

    /// Decode a spec from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Check the spec can be synthesized
    pub fn validate(&self) -> Result<()> {
        if self.extends.is_empty() {
            return Err(TailoringError::MissingExtends);
        }
        Ok(())
    }
}
