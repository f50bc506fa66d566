//! Tailoring document serialization
//!
//! Output layout:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <xccdf-1.2:Tailoring xmlns:xccdf-1.2="..." id="xccdf_compliance.openshift.io_tailoring_<name>">
//!   <xccdf-1.2:benchmark href="/content/<content file>"/>
//!   <xccdf-1.2:Profile id="xccdf_compliance.openshift.io_profile_<name>" extends="<base id>">
//!     <xccdf-1.2:title override="true">...</xccdf-1.2:title>              (if overridden)
//!     <xccdf-1.2:description override="true">...</xccdf-1.2:description>  (if overridden)
//!     <xccdf-1.2:select idref="<rule id>" selected="true"/>               (enabled rules)
//!     <xccdf-1.2:select idref="<rule id>" selected="false"/>              (disabled rules)
//!     <xccdf-1.2:set-value idref="<value id>">value</xccdf-1.2:set-value>
//!   </xccdf-1.2:Profile>
//! </xccdf-1.2:Tailoring>
//! ```

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::error::{Result, TailoringError};
use super::resolve::VariableOverride;
use super::spec::{RuleReferenceSpec, TailoringOverrideSpec};
use crate::parser::Profile;
use crate::xccdf::{tailoring_id, xccdf_profile_id, xccdf_rule_id, XCCDF_URI, XML_HEADER};

/// Directory content files are mounted under
pub const CONTENT_ROOT: &str = "/content";

const TAILORING: &str = "xccdf-1.2:Tailoring";
const BENCHMARK: &str = "xccdf-1.2:benchmark";
const PROFILE: &str = "xccdf-1.2:Profile";
const TITLE: &str = "xccdf-1.2:title";
const DESCRIPTION: &str = "xccdf-1.2:description";
const SELECT: &str = "xccdf-1.2:select";
const SET_VALUE: &str = "xccdf-1.2:set-value";

/// XCCDF id of the profile a tailoring defines
pub fn tailored_profile_id(spec: &TailoringOverrideSpec) -> String {
    xccdf_profile_id(&spec.name)
}

/// Render the tailoring document for `spec` over `base`
///
/// `content_file` is the content file name relative to [`CONTENT_ROOT`].
/// The same inputs always produce the same document.
pub fn tailored_profile_to_xml(
    spec: &TailoringOverrideSpec,
    base: &Profile,
    content_file: &str,
    overrides: &[VariableOverride],
) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    let tailoring_id = tailoring_id(&spec.name);
    let href = content_href(content_file);
    let profile_id = tailored_profile_id(spec);

    write(
        &mut writer,
        Event::Start(
            BytesStart::new(TAILORING)
                .with_attributes([("xmlns:xccdf-1.2", XCCDF_URI), ("id", tailoring_id.as_str())]),
        ),
    )?;
    write(
        &mut writer,
        Event::Empty(BytesStart::new(BENCHMARK).with_attributes([("href", href.as_str())])),
    )?;
    write(
        &mut writer,
        Event::Start(
            BytesStart::new(PROFILE)
                .with_attributes([("id", profile_id.as_str()), ("extends", base.id.as_str())]),
        ),
    )?;

    if !spec.title.is_empty() {
        write_override(&mut writer, TITLE, &spec.title)?;
    }
    if !spec.description.is_empty() {
        write_override(&mut writer, DESCRIPTION, &spec.description)?;
    }

    write_selects(&mut writer, &spec.enable_rules, "true")?;
    write_selects(&mut writer, &spec.disable_rules, "false")?;

    for set_value in overrides {
        write(
            &mut writer,
            Event::Start(BytesStart::new(SET_VALUE).with_attributes([("idref", set_value.id.as_str())])),
        )?;
        write(&mut writer, Event::Text(BytesText::new(&set_value.value)))?;
        write(&mut writer, Event::End(BytesEnd::new(SET_VALUE)))?;
    }

    write(&mut writer, Event::End(BytesEnd::new(PROFILE)))?;
    write(&mut writer, Event::End(BytesEnd::new(TAILORING)))?;

    let body = String::from_utf8(writer.into_inner()).map_err(serialize_error)?;
    tracing::debug!(id = %tailoring_id, extends = %base.id, "Rendered tailoring document");

    Ok(format!("{}\n{}", XML_HEADER, body))
}

fn write_override(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<()> {
    write(
        writer,
        Event::Start(BytesStart::new(tag).with_attributes([("override", "true")])),
    )?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(tag)))
}

fn write_selects(
    writer: &mut Writer<Vec<u8>>,
    rules: &[RuleReferenceSpec],
    selected: &str,
) -> Result<()> {
    for rule in rules {
        let idref = xccdf_rule_id(&rule.name);
        write(
            writer,
            Event::Empty(
                BytesStart::new(SELECT)
                    .with_attributes([("idref", idref.as_str()), ("selected", selected)]),
            ),
        )?;
    }
    Ok(())
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(serialize_error)
}

fn serialize_error(e: impl std::fmt::Display) -> TailoringError {
    TailoringError::Serialize {
        message: e.to_string(),
    }
}

/// Absolute path of a content file under [`CONTENT_ROOT`]
pub fn content_href(content_file: &str) -> String {
    clean_path(&format!("{}/{}", CONTENT_ROOT, content_file))
}

/// Lexically normalize an absolute path
///
/// Repeated and trailing slashes are dropped, `.` segments removed and
/// `..` segments resolved; `..` never climbs above the root.
fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}
