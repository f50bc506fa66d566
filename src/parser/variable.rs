//! Variable extraction

use super::error::{ParseError, Result, SinkResult};
use super::types::{RecordKind, ValueSelection, Variable, VariableType};
use super::ContentParser;
use crate::xccdf::{variable_name_from_id, ContentDocument, Element};

impl ContentParser<'_> {
    /// Extract every user-facing `Value` element and hand it to `sink`
    ///
    /// Hidden values are skipped. A value without an id or title ends the
    /// pass with an error; one declaring two defaults is logged and
    /// skipped. Sink errors are logged and the pass continues. Returns the
    /// number of variables the sink accepted.
    pub fn parse_variables<F>(&self, doc: &ContentDocument<'_>, mut sink: F) -> Result<usize>
    where
        F: FnMut(Variable) -> SinkResult,
    {
        let mut count = 0;

        for element in doc.find_all("Value") {
            if element.attribute("hidden") == Some("true") {
                tracing::debug!(id = ?element.attribute("id"), "Skipping hidden value");
                continue;
            }

            let variable = match self.parse_variable(&element) {
                Ok(variable) => variable,
                Err(e @ ParseError::MultipleDefaults { .. }) => {
                    tracing::error!(error = %e, "Skipping variable");
                    continue;
                }
                Err(e) => return Err(e),
            };
            let id = variable.id.clone();

            match sink(variable) {
                Ok(()) => count += 1,
                Err(source) => {
                    let err = ParseError::Sink {
                        kind: RecordKind::Variable,
                        id,
                        source,
                    };
                    tracing::error!(error = %err, "Skipping variable");
                }
            }
        }

        Ok(count)
    }

    fn parse_variable(&self, element: &Element<'_, '_>) -> Result<Variable> {
        let id = element.non_empty_attribute("id").ok_or_else(|| {
            let err = ParseError::structural(RecordKind::Variable, "id", None);
            tracing::info!(error = %err, "Invalid variable");
            err
        })?;
        let title = element.find_one("title").ok_or_else(|| {
            let err = ParseError::structural(RecordKind::Variable, "title", Some(id));
            tracing::info!(error = %err, "Invalid variable");
            err
        })?;
        tracing::debug!(id = %id, "Found variable");

        let mut value: Option<String> = None;
        let mut selections = Vec::new();

        for choice in element.find_all("value") {
            let text = choice.text();
            match choice.attribute("selector") {
                Some(selector) => selections.push(ValueSelection::new(selector, text)),
                None => {
                    if let Some(existing) = value {
                        return Err(ParseError::MultipleDefaults {
                            id: id.to_string(),
                            existing,
                            new: text,
                        });
                    }
                    value = Some(text);
                }
            }
        }

        Ok(Variable {
            id: id.to_string(),
            name: variable_name_from_id(id).to_string(),
            title: title.text(),
            description: self.descriptive_text(element.find_one("description"), "description", id),
            var_type: VariableType::from_attribute(element.attribute("type")),
            value,
            selections,
        })
    }
}
