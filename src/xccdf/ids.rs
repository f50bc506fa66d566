//! XCCDF Identifier Conventions
//!
//! ComplianceAsCode content identifies every item with a fully qualified
//! XCCDF id such as `xccdf_org.ssgproject.content_rule_audit_rules_login_events`.
//! Records produced by this crate are keyed by the short name that follows
//! the type-specific prefix, and tailoring documents need the long form back.

/// Prefix of profile ids in ComplianceAsCode content
pub const PROFILE_ID_PREFIX: &str = "xccdf_org.ssgproject.content_profile_";

/// Prefix of rule ids in ComplianceAsCode content
pub const RULE_ID_PREFIX: &str = "xccdf_org.ssgproject.content_rule_";

/// Prefix of value (variable) ids in ComplianceAsCode content
pub const VARIABLE_ID_PREFIX: &str = "xccdf_org.ssgproject.content_value_";

/// XCCDF namespace that tailoring documents are authored under.
///
/// Per XCCDF 1.2 the namespace part of an id associates the item with its
/// author, so tailored profiles get their own namespace instead of reusing
/// `org.ssgproject.content`.
pub const TAILORING_NAMESPACE: &str = "compliance.openshift.io";

/// Profile short name from its XCCDF id
///
/// e.g., "xccdf_org.ssgproject.content_profile_moderate" -> "moderate"
pub fn profile_name_from_id(id: &str) -> &str {
    id.strip_prefix(PROFILE_ID_PREFIX).unwrap_or(id)
}

/// Rule short name from its XCCDF id
pub fn rule_name_from_id(id: &str) -> &str {
    id.strip_prefix(RULE_ID_PREFIX).unwrap_or(id)
}

/// Variable short name from its XCCDF value id
pub fn variable_name_from_id(id: &str) -> &str {
    id.strip_prefix(VARIABLE_ID_PREFIX).unwrap_or(id)
}

/// XCCDF rule id for a rule short name
pub fn xccdf_rule_id(name: &str) -> String {
    format!("{}{}", RULE_ID_PREFIX, name)
}

/// XCCDF profile id of a tailored profile
///
/// Uses [`TAILORING_NAMESPACE`], so the result never collides with a
/// profile id from the source content.
pub fn xccdf_profile_id(name: &str) -> String {
    format!("xccdf_{}_profile_{}", TAILORING_NAMESPACE, name)
}

/// XCCDF id of the tailoring element itself
pub fn tailoring_id(name: &str) -> String {
    format!("xccdf_{}_tailoring_{}", TAILORING_NAMESPACE, name)
}

/// Record name scoped to the bundle it was parsed from
///
/// Several bundles may ship a rule with the same short name, so persisted
/// records are named `<bundle>-<name>`.
pub fn prefixed_name(bundle: &str, name: &str) -> String {
    format!("{}-{}", bundle, name)
}
