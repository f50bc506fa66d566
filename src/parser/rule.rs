//! Rule extraction

use super::error::{ParseError, Result, SinkResult};
use super::fix::collect_fixes;
use super::types::{RecordKind, Rule};
use super::ContentParser;
use crate::references::Annotations;
use crate::xccdf::{rule_name_from_id, ContentDocument, Element};

impl ContentParser<'_> {
    /// Extract every `Rule` element and hand it to `sink`
    ///
    /// A rule without an id or title ends the pass with an error. Sink
    /// errors are logged and the pass moves on to the next rule. Returns
    /// the number of rules the sink accepted.
    pub fn parse_rules<F>(&self, doc: &ContentDocument<'_>, mut sink: F) -> Result<usize>
    where
        F: FnMut(Rule) -> SinkResult,
    {
        let mut count = 0;

        for element in doc.find_all("Rule") {
            let rule = self.parse_rule(&element)?;
            let id = rule.id.clone();

            match sink(rule) {
                Ok(()) => count += 1,
                Err(source) => {
                    let err = ParseError::Sink {
                        kind: RecordKind::Rule,
                        id,
                        source,
                    };
                    tracing::error!(error = %err, "Skipping rule");
                }
            }
        }

        Ok(count)
    }

    fn parse_rule(&self, element: &Element<'_, '_>) -> Result<Rule> {
        let id = element.non_empty_attribute("id").ok_or_else(|| {
            let err = ParseError::structural(RecordKind::Rule, "id", None);
            tracing::info!(error = %err, "Invalid rule");
            err
        })?;
        let title = element.find_one("title").ok_or_else(|| {
            let err = ParseError::structural(RecordKind::Rule, "title", Some(id));
            tracing::info!(error = %err, "Invalid rule");
            err
        })?;
        tracing::debug!(id = %id, "Found rule");

        let description = self.descriptive_text(element.find_one("description"), "description", id);
        let rationale = self.descriptive_text(element.find_one("rationale"), "rationale", id);
        let warning = self.descriptive_text(element.find_one("warning"), "warning", id);

        Ok(Rule {
            id: id.to_string(),
            name: rule_name_from_id(id).to_string(),
            title: title.text(),
            description,
            rationale,
            warning,
            severity: severity(element),
            available_fixes: collect_fixes(element, id),
            annotations: self.annotations(element, id),
        })
    }

    fn annotations(&self, element: &Element<'_, '_>, id: &str) -> Annotations {
        match self.references.parse(element) {
            Ok(annotations) => annotations,
            Err(e) => {
                tracing::error!(id = %id, error = %e, "Couldn't annotate rule");
                Annotations::new()
            }
        }
    }
}

/// Severity from a `severity` child, falling back to the Rule attribute
fn severity(element: &Element<'_, '_>) -> Option<String> {
    element
        .find_one("severity")
        .map(|s| s.text())
        .filter(|s| !s.is_empty())
        .or_else(|| element.non_empty_attribute("severity").map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{collect_rules, SAMPLE_BENCHMARK};
    use super::super::TextMode;
    use super::*;
    use crate::references::{
        ReferenceParser, RHACM_CONTROLS_ANNOTATION, RHACM_STANDARDS_ANNOTATION,
    };

    const OCP_PLATFORM: &str = "cpe:/a:redhat:openshift_container_platform:4";

    fn parse(xml: &str) -> Result<Vec<Rule>> {
        let references = ReferenceParser::with_defaults().unwrap();
        collect_rules(&ContentParser::new(&references), xml)
    }

    #[test]
    fn test_parse_rules() {
        let rules = parse(SAMPLE_BENCHMARK).unwrap();
        let names: Vec<_> = rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "api_server_audit_log_maxsize",
                "sshd_disable_root_login",
                "sshd_set_keepalive"
            ]
        );

        let rule = &rules[0];
        assert_eq!(rule.id, "xccdf_org.ssgproject.content_rule_api_server_audit_log_maxsize");
        assert_eq!(rule.title, "Configure Kubernetes API Server Maximum Audit Log Size");
        assert_eq!(
            rule.description,
            "To rotate audit logs upon reaching a maximum size, set `maximumFileSizeMegabytes` in the `openshift-kube-apiserver` configmap."
        );
        assert_eq!(rule.rationale, "OpenShift automatically rotates the log files.");
        assert_eq!(rule.warning, "This rule's check operates on the cluster configuration dump.");
    }

    #[test]
    fn test_optional_text_defaults_to_empty() {
        let rules = parse(SAMPLE_BENCHMARK).unwrap();
        let rule = &rules[1];
        assert_eq!(rule.description, "");
        assert_eq!(rule.rationale, "");
        assert_eq!(rule.warning, "");
        assert!(rule.available_fixes.is_empty());
        assert!(rule.annotations.is_empty());
    }

    #[test]
    fn test_severity_child_then_attribute() {
        let rules = parse(SAMPLE_BENCHMARK).unwrap();
        assert_eq!(rules[0].severity.as_deref(), Some("medium"));
        assert_eq!(rules[1].severity.as_deref(), Some("high"));
        assert_eq!(rules[2].severity, None);
    }

    #[test]
    fn test_severity_child_text_is_verbatim() {
        let xml = r#"<Benchmark>
  <Rule id="xccdf_org.ssgproject.content_rule_r1" severity="low">
    <title>R1</title>
    <severity> high </severity>
  </Rule>
</Benchmark>"#;
        let rules = parse(xml).unwrap();
        assert_eq!(rules[0].severity.as_deref(), Some(" high "));
    }

    #[test]
    fn test_fixes_deduplicated_and_filtered() {
        let rules = parse(SAMPLE_BENCHMARK).unwrap();
        let fixes = &rules[0].available_fixes;

        // sh is not a usable system and the ignition payload isn't an object
        assert_eq!(fixes.len(), 1);
        let fix = rules[0].fix_for_platform(OCP_PLATFORM).unwrap();
        assert_eq!(fix.disruption, "low");
        assert_eq!(fix.fix_object["kind"].as_str(), Some("ConfigMap"));
        assert_eq!(
            fix.fix_object["data"]["maximumFileSizeMegabytes"].as_str(),
            Some("100")
        );
    }

    #[test]
    fn test_annotations_list_each_control_once() {
        let rules = parse(SAMPLE_BENCHMARK).unwrap();
        let annotations = &rules[0].annotations;

        assert_eq!(
            annotations["control.compliance.openshift.io/NIST-800-53"],
            "CM-6;AU-9"
        );
        assert_eq!(annotations[RHACM_STANDARDS_ANNOTATION], "NIST-800-53");
        assert_eq!(annotations[RHACM_CONTROLS_ANNOTATION], "CM-6,AU-9");
    }

    #[test]
    fn test_sub_rendered_as_template_variable() {
        let rules = parse(SAMPLE_BENCHMARK).unwrap();
        assert_eq!(
            rules[2].description,
            "Set {{ var_sshd_set_keepalive }} as the count."
        );
    }

    #[test]
    fn test_raw_text_mode() {
        let references = ReferenceParser::with_defaults().unwrap();
        let parser = ContentParser::new(&references).with_text_mode(TextMode::Raw);
        let rules = collect_rules(&parser, SAMPLE_BENCHMARK).unwrap();
        assert_eq!(rules[2].description, "Set  as the count.");
    }

    #[test]
    fn test_missing_id_or_title_aborts_the_pass() {
        let no_id = r#"<Benchmark><Rule><title>t</title></Rule></Benchmark>"#;
        assert!(matches!(
            parse(no_id).unwrap_err(),
            ParseError::Structural { kind: RecordKind::Rule, field: "id", .. }
        ));

        let no_title = r#"<Benchmark><Rule id="r"/></Benchmark>"#;
        assert!(matches!(
            parse(no_title).unwrap_err(),
            ParseError::Structural { kind: RecordKind::Rule, field: "title", .. }
        ));
    }

    #[test]
    fn test_sink_errors_do_not_stop_the_pass() {
        let references = ReferenceParser::with_defaults().unwrap();
        let parser = ContentParser::new(&references);
        let doc = ContentDocument::parse(SAMPLE_BENCHMARK).unwrap();

        let mut seen = Vec::new();
        let accepted = parser
            .parse_rules(&doc, |rule| {
                seen.push(rule.name.clone());
                if rule.name == "sshd_disable_root_login" {
                    return Err("already exists".into());
                }
                Ok(())
            })
            .unwrap();

        assert_eq!(seen.len(), 3);
        assert_eq!(accepted, 2);
    }
}
