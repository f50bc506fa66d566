//! Profile extraction

use super::error::{ParseError, Result, SinkResult};
use super::types::{Profile, ProfileRule, ProfileValue, RecordKind};
use super::ContentParser;
use crate::xccdf::{profile_name_from_id, rule_name_from_id, ContentDocument, Element};

impl ContentParser<'_> {
    /// Extract every `Profile` element and hand it to `sink`
    ///
    /// Stops at the first profile missing its id, title or description, and
    /// at the first sink error, returning that error. Returns the number of
    /// profiles the sink accepted.
    pub fn parse_profiles<F>(&self, doc: &ContentDocument<'_>, mut sink: F) -> Result<usize>
    where
        F: FnMut(Profile) -> SinkResult,
    {
        let mut count = 0;

        for element in doc.find_all("Profile") {
            let profile = self.parse_profile(&element)?;
            let id = profile.id.clone();

            sink(profile).map_err(|source| {
                tracing::error!(id = %id, error = %source, "Couldn't execute action for profile");
                ParseError::Sink {
                    kind: RecordKind::Profile,
                    id,
                    source,
                }
            })?;
            count += 1;
        }

        Ok(count)
    }

    fn parse_profile(&self, element: &Element<'_, '_>) -> Result<Profile> {
        let id = element
            .non_empty_attribute("id")
            .ok_or_else(|| missing("id", None))?;
        let title = element
            .find_one("title")
            .ok_or_else(|| missing("title", Some(id)))?;
        let description = element
            .find_one("description")
            .ok_or_else(|| missing("description", Some(id)))?;
        tracing::info!(id = %id, "Found profile");

        Ok(Profile {
            id: id.to_string(),
            name: profile_name_from_id(id).to_string(),
            title: title.text(),
            description: description.text(),
            rules: selected_rules(element, id),
            values: set_values(element, id),
        })
    }
}

fn missing(field: &'static str, id: Option<&str>) -> ParseError {
    let err = ParseError::structural(RecordKind::Profile, field, id);
    tracing::info!(error = %err, "Invalid profile");
    err
}

/// Rules with `selected="true"`; other selections are not carried over.
fn selected_rules(profile: &Element<'_, '_>, profile_id: &str) -> Vec<ProfileRule> {
    let mut rules = Vec::new();

    for select in profile.find_all("select") {
        let Some(idref) = select.non_empty_attribute("idref") else {
            tracing::info!(id = %profile_id, "No idref in rule selection");
            continue;
        };
        if select.attribute("selected") == Some("true") {
            rules.push(ProfileRule::selected(rule_name_from_id(idref)));
        }
    }

    rules
}

fn set_values(profile: &Element<'_, '_>, profile_id: &str) -> Vec<ProfileValue> {
    let mut values = Vec::new();

    for set_value in profile.find_all("set-value") {
        let Some(idref) = set_value.non_empty_attribute("idref") else {
            tracing::info!(id = %profile_id, "No idref in set-value");
            continue;
        };
        values.push(ProfileValue {
            name: idref.to_string(),
            override_value: set_value.text(),
        });
    }

    values
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{collect_profiles, SAMPLE_BENCHMARK};
    use super::*;
    use crate::references::ReferenceParser;

    fn parse(xml: &str) -> Result<Vec<Profile>> {
        let references = ReferenceParser::new();
        collect_profiles(&ContentParser::new(&references), xml)
    }

    #[test]
    fn test_parse_profiles() {
        let profiles = parse(SAMPLE_BENCHMARK).unwrap();
        assert_eq!(profiles.len(), 2);

        let moderate = &profiles[0];
        assert_eq!(moderate.id, "xccdf_org.ssgproject.content_profile_moderate");
        assert_eq!(moderate.name, "moderate");
        assert_eq!(moderate.title, "NIST 800-53 Moderate-Impact Baseline");
        assert!(moderate.description.starts_with("This compliance profile"));

        assert_eq!(profiles[1].name, "e8");
        assert!(profiles[1].rules.is_empty());
        assert!(profiles[1].values.is_empty());
    }

    #[test]
    fn test_only_selected_rules_are_kept() {
        let profiles = parse(SAMPLE_BENCHMARK).unwrap();
        assert_eq!(
            profiles[0].rules,
            vec![
                ProfileRule::selected("api_server_audit_log_maxsize"),
                ProfileRule::selected("sshd_set_keepalive"),
            ]
        );
    }

    #[test]
    fn test_set_values_keep_raw_idref() {
        let profiles = parse(SAMPLE_BENCHMARK).unwrap();
        assert_eq!(
            profiles[0].values,
            vec![ProfileValue {
                name: "xccdf_org.ssgproject.content_value_var_sshd_priv_separation".into(),
                override_value: "yes".into(),
            }]
        );
    }

    #[test]
    fn test_missing_fields_abort_the_pass() {
        let no_id = r#"<Benchmark><Profile><title>t</title><description>d</description></Profile></Benchmark>"#;
        assert!(matches!(
            parse(no_id).unwrap_err(),
            ParseError::Structural { kind: RecordKind::Profile, field: "id", .. }
        ));

        let no_title = r#"<Benchmark><Profile id="p"><description>d</description></Profile></Benchmark>"#;
        assert!(matches!(
            parse(no_title).unwrap_err(),
            ParseError::Structural { field: "title", .. }
        ));

        let no_description = r#"<Benchmark><Profile id="p"><title>t</title></Profile></Benchmark>"#;
        assert!(matches!(
            parse(no_description).unwrap_err(),
            ParseError::Structural { field: "description", .. }
        ));
    }

    #[test]
    fn test_later_invalid_profile_aborts_after_earlier_ones_were_emitted() {
        let xml = r#"<Benchmark>
<Profile id="p1"><title>t</title><description>d</description></Profile>
<Profile id="p2"><title>t</title></Profile>
<Profile id="p3"><title>t</title><description>d</description></Profile>
</Benchmark>"#;
        let references = ReferenceParser::new();
        let parser = ContentParser::new(&references);
        let doc = ContentDocument::parse(xml).unwrap();

        let mut seen = Vec::new();
        let result = parser.parse_profiles(&doc, |p| {
            seen.push(p.id);
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(seen, vec!["p1"]);
    }

    #[test]
    fn test_sink_error_aborts_the_pass() {
        let references = ReferenceParser::new();
        let parser = ContentParser::new(&references);
        let doc = ContentDocument::parse(SAMPLE_BENCHMARK).unwrap();

        let mut calls = 0;
        let err = parser
            .parse_profiles(&doc, |_| {
                calls += 1;
                Err("store unavailable".into())
            })
            .unwrap_err();

        assert_eq!(calls, 1);
        match err {
            ParseError::Sink { kind, id, .. } => {
                assert_eq!(kind, RecordKind::Profile);
                assert_eq!(id, "xccdf_org.ssgproject.content_profile_moderate");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_count_of_accepted_profiles() {
        let references = ReferenceParser::new();
        let parser = ContentParser::new(&references);
        let doc = ContentDocument::parse(SAMPLE_BENCHMARK).unwrap();
        assert_eq!(parser.parse_profiles(&doc, |_| Ok(())).unwrap(), 2);
    }
}
