//! Rendering of XCCDF rich text into plain text
//!
//! Descriptions, rationales and warnings in XCCDF may embed XHTML markup
//! (`<html:code>`, `<html:br/>`, lists, preformatted blocks) and `<sub>`
//! substitution references. Stored records want readable text, so the
//! inner markup of those elements is flattened here:
//!
//! | Markup | Rendered as |
//! |--------|-------------|
//! | `<br/>` | line break |
//! | `<p>` | blank line before the paragraph |
//! | `<li>` | `- ` list item on its own line |
//! | `<code>`, `<tt>` | wrapped in backticks |
//! | `<pre>` | kept verbatim on its own lines |
//! | `<sub idref="..."/>` | `{{ name }}` of the referenced value |
//!
//! Any other element is transparent: its text is kept, the tags dropped.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use super::ids::variable_name_from_id;

/// Failure to render a rich-text fragment
#[derive(Debug, Error)]
#[error("could not render XCCDF text: {message}")]
pub struct TextError {
    message: String,
}

impl TextError {
    fn new(e: impl std::fmt::Display) -> Self {
        Self {
            message: e.to_string(),
        }
    }
}

/// Render the inner markup of a rich-text element as plain text
pub fn render_text(inner_xml: &str) -> Result<String, TextError> {
    let mut reader = Reader::from_str(inner_xml);
    let mut out = String::new();
    let mut pre_depth = 0usize;

    loop {
        match reader.read_event().map_err(TextError::new)? {
            Event::Start(tag) => open_tag(&mut out, &tag, &mut pre_depth)?,
            Event::Empty(tag) => {
                open_tag(&mut out, &tag, &mut pre_depth)?;
                close_tag(&mut out, tag.local_name().as_ref(), &mut pre_depth);
            }
            Event::End(tag) => close_tag(&mut out, tag.local_name().as_ref(), &mut pre_depth),
            Event::Text(text) => {
                let text = text.unescape().map_err(TextError::new)?;
                push_text(&mut out, &text, pre_depth > 0);
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data).into_owned();
                push_text(&mut out, &text, pre_depth > 0);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(tidy(&out))
}

fn open_tag(out: &mut String, tag: &BytesStart<'_>, pre_depth: &mut usize) -> Result<(), TextError> {
    match tag.local_name().as_ref() {
        b"br" => newline(out),
        b"p" => paragraph(out),
        b"li" => {
            newline(out);
            out.push_str("- ");
        }
        b"code" | b"tt" => out.push('`'),
        b"pre" => {
            newline(out);
            *pre_depth += 1;
        }
        b"sub" => {
            let idref = tag.try_get_attribute("idref").map_err(TextError::new)?;
            if let Some(attr) = idref {
                let idref = attr.unescape_value().map_err(TextError::new)?;
                out.push_str(&format!("{{{{ {} }}}}", variable_name_from_id(&idref)));
            }
        }
        _ => {}
    }
    Ok(())
}

fn close_tag(out: &mut String, name: &[u8], pre_depth: &mut usize) {
    match name {
        b"code" | b"tt" => out.push('`'),
        b"pre" => {
            *pre_depth = pre_depth.saturating_sub(1);
            newline(out);
        }
        b"p" | b"ul" | b"ol" => newline(out),
        _ => {}
    }
}

fn push_text(out: &mut String, text: &str, preformatted: bool) {
    if preformatted {
        out.push_str(text);
        return;
    }

    let mut collapsed = String::with_capacity(text.len());
    let mut last_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !last_space {
                collapsed.push(' ');
            }
            last_space = true;
        } else {
            collapsed.push(c);
            last_space = false;
        }
    }

    let at_line_start = out.is_empty() || out.ends_with('\n');
    if at_line_start || out.ends_with(' ') {
        out.push_str(collapsed.trim_start());
    } else {
        out.push_str(&collapsed);
    }
}

fn newline(out: &mut String) {
    trim_trailing_spaces(out);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn paragraph(out: &mut String) {
    newline(out);
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push('\n');
    }
}

fn trim_trailing_spaces(out: &mut String) {
    let len = out.trim_end_matches(' ').len();
    out.truncate(len);
}

/// Drop trailing spaces on each line, squeeze runs of blank lines and trim
/// the result.
fn tidy(out: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in out.lines().map(str::trim_end) {
        if line.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    lines.join("\n").trim().to_string()
}
