//! Remediation fix selection and decoding

use std::collections::HashSet;

use super::error::{ParseError, Result};
use super::types::FixDefinition;
use crate::xccdf::Element;

/// Fix system for node configuration delivered through Ignition
pub const MACHINE_CONFIG_FIX_SYSTEM: &str = "urn:xccdf:fix:script:ignition";

/// Fix system for Kubernetes object manifests
pub const KUBERNETES_FIX_SYSTEM: &str = "urn:xccdf:fix:script:kubernetes";

/// Whether a fix uses a remediation system this crate can apply
pub fn is_relevant_fix(fix: &Element<'_, '_>) -> bool {
    matches!(
        fix.attribute("system"),
        Some(MACHINE_CONFIG_FIX_SYSTEM) | Some(KUBERNETES_FIX_SYSTEM)
    )
}

/// Decode a fix payload into a generic object
///
/// The payload must be a YAML (or JSON) mapping; scalars, sequences and
/// empty payloads are rejected.
pub fn decode_fix_object(platform: &str, payload: &str) -> Result<serde_yaml::Value> {
    let decode_error = |message: String| ParseError::FixDecode {
        platform: platform.to_string(),
        message,
    };

    if payload.trim().is_empty() {
        return Err(decode_error("empty payload".to_string()));
    }

    let value: serde_yaml::Value =
        serde_yaml::from_str(payload).map_err(|e| decode_error(e.to_string()))?;

    match value {
        serde_yaml::Value::Mapping(_) => Ok(value),
        other => Err(decode_error(format!(
            "expected an object, got {}",
            yaml_kind(&other)
        ))),
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

/// Collect the usable fixes of a rule
///
/// Only relevant fix systems are considered, and the first fix seen for a
/// platform wins. A fix whose payload doesn't decode is logged and
/// dropped, leaving its platform open for a later fix.
pub fn collect_fixes(rule: &Element<'_, '_>, rule_id: &str) -> Vec<FixDefinition> {
    let mut fixes = Vec::new();
    let mut platforms = HashSet::new();

    for fix in rule.find_all("fix").filter(is_relevant_fix) {
        let platform = fix.attribute("platform").unwrap_or_default();
        if platforms.contains(platform) {
            tracing::debug!(id = %rule_id, platform, "Already have a fix for platform, skipping");
            continue;
        }

        let fix_object = match decode_fix_object(platform, &fix.text()) {
            Ok(obj) => obj,
            Err(e) => {
                tracing::warn!(id = %rule_id, error = %e, "Couldn't parse Kubernetes object from fix");
                continue;
            }
        };

        fixes.push(FixDefinition {
            platform: platform.to_string(),
            disruption: fix.attribute("disruption").unwrap_or_default().to_string(),
            fix_object,
        });
        platforms.insert(platform);
    }

    fixes
}
