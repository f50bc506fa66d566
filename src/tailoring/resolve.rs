//! Resolution of `setValues` entries against extracted variables

use super::error::{Result, TailoringError};
use super::spec::TailoringOverrideSpec;
use crate::parser::{Variable, VariableType};

/// A variable value to emit as a `set-value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableOverride {
    /// XCCDF id of the variable
    pub id: String,

    pub value: String,
}

impl VariableOverride {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Map each `setValues` entry of `spec` to the variable it names
///
/// Variables are looked up by record name. Entries keep the order of the
/// spec. Values are checked against the variable type: numbers must parse,
/// booleans must be `true` or `false`.
pub fn resolve_variable_overrides(
    spec: &TailoringOverrideSpec,
    variables: &[Variable],
) -> Result<Vec<VariableOverride>> {
    spec.set_values
        .iter()
        .map(|entry| {
            let variable = variables
                .iter()
                .find(|v| v.name == entry.name)
                .ok_or_else(|| TailoringError::UnknownVariable {
                    name: entry.name.clone(),
                })?;

            if !value_fits(variable.var_type, &entry.value) {
                return Err(TailoringError::InvalidValue {
                    name: entry.name.clone(),
                    value: entry.value.clone(),
                    expected: variable.var_type,
                });
            }

            tracing::debug!(variable = %variable.id, value = %entry.value, "Resolved variable override");
            Ok(VariableOverride::new(&variable.id, &entry.value))
        })
        .collect()
}

fn value_fits(var_type: VariableType, value: &str) -> bool {
    match var_type {
        VariableType::String => true,
        VariableType::Number => value.trim().parse::<f64>().is_ok(),
        VariableType::Boolean => matches!(value, "true" | "false"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tailoring::VariableValueSpec;

    fn variable(name: &str, var_type: VariableType) -> Variable {
        Variable {
            id: format!("xccdf_org.ssgproject.content_value_{}", name),
            name: format!("ocp4-{}", name),
            title: name.to_string(),
            description: String::new(),
            var_type,
            value: None,
            selections: Vec::new(),
        }
    }

    fn spec_setting(values: &[(&str, &str)]) -> TailoringOverrideSpec {
        let mut spec = TailoringOverrideSpec::new("tp", "ocp4-moderate");
        spec.set_values = values
            .iter()
            .map(|(name, value)| VariableValueSpec {
                name: name.to_string(),
                value: value.to_string(),
                rationale: String::new(),
            })
            .collect();
        spec
    }

    fn sample_variables() -> Vec<Variable> {
        vec![
            variable("var_sshd_priv_separation", VariableType::String),
            variable("var_sshd_max_sessions", VariableType::Number),
            variable("var_enable_feature", VariableType::Boolean),
        ]
    }

    #[test]
    fn test_resolves_to_document_ids_in_spec_order() {
        let spec = spec_setting(&[
            ("ocp4-var_enable_feature", "false"),
            ("ocp4-var_sshd_max_sessions", "5"),
            ("ocp4-var_sshd_priv_separation", "yes"),
        ]);
        let overrides = resolve_variable_overrides(&spec, &sample_variables()).unwrap();

        assert_eq!(
            overrides,
            vec![
                VariableOverride::new("xccdf_org.ssgproject.content_value_var_enable_feature", "false"),
                VariableOverride::new("xccdf_org.ssgproject.content_value_var_sshd_max_sessions", "5"),
                VariableOverride::new("xccdf_org.ssgproject.content_value_var_sshd_priv_separation", "yes"),
            ]
        );
    }

    #[test]
    fn test_unknown_variable() {
        let spec = spec_setting(&[("ocp4-var_missing", "1")]);
        assert_eq!(
            resolve_variable_overrides(&spec, &sample_variables()),
            Err(TailoringError::UnknownVariable {
                name: "ocp4-var_missing".into()
            })
        );
    }

    #[test]
    fn test_values_must_fit_the_type() {
        let variables = sample_variables();

        let spec = spec_setting(&[("ocp4-var_sshd_max_sessions", "ten")]);
        assert!(matches!(
            resolve_variable_overrides(&spec, &variables),
            Err(TailoringError::InvalidValue { expected: VariableType::Number, .. })
        ));

        let spec = spec_setting(&[("ocp4-var_enable_feature", "yes")]);
        assert!(matches!(
            resolve_variable_overrides(&spec, &variables),
            Err(TailoringError::InvalidValue { expected: VariableType::Boolean, .. })
        ));

        let spec = spec_setting(&[("ocp4-var_sshd_max_sessions", "2.5")]);
        assert!(resolve_variable_overrides(&spec, &variables).is_ok());
    }

    #[test]
    fn test_no_set_values() {
        let spec = TailoringOverrideSpec::new("tp", "ocp4-moderate");
        assert!(resolve_variable_overrides(&spec, &[]).unwrap().is_empty());
    }
}
