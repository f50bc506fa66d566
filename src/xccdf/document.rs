//! Read-only view over a parsed security-content document
//!
//! Extraction only ever needs to look things up by element name, read
//! attributes and pull out text, so the tree is exposed through that small
//! surface instead of handing `roxmltree` types to every extractor.
//! Element and attribute names are matched on their local part, which lets
//! the same queries work on plain XCCDF benchmarks and on SCAP datastreams
//! where everything lives under the `xccdf-1.2` namespace.

use roxmltree::{Document, Node, ParsingOptions};

/// A parsed content document
///
/// Borrows the source text for its whole lifetime; the tree is never
/// mutated once parsed.
pub struct ContentDocument<'input> {
    doc: Document<'input>,
}

impl<'input> ContentDocument<'input> {
    /// Parse a document from its text
    ///
    /// An internal DTD subset is accepted so that entities it declares
    /// resolve in attribute values and text.
    pub fn parse(text: &'input str) -> Result<Self, roxmltree::Error> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;

        Ok(Self {
            doc: Document::parse_with_options(text, options)?,
        })
    }

    /// The document's root element
    pub fn root(&self) -> Element<'_, 'input> {
        Element {
            node: self.doc.root_element(),
        }
    }

    /// All elements with the given local name, in document order
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = Element<'a, 'input>> + 'a {
        self.doc
            .descendants()
            .filter(move |n| n.is_element() && n.tag_name().name() == tag)
            .map(|node| Element { node })
    }
}

impl std::fmt::Debug for ContentDocument<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentDocument")
            .field("root", &self.root().name())
            .finish()
    }
}

/// An element within a [`ContentDocument`]
#[derive(Debug, Clone, Copy)]
pub struct Element<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> Element<'a, 'input> {
    /// Local name of the element (namespace prefix removed)
    pub fn name(&self) -> &'a str {
        self.node.tag_name().name()
    }

    /// Attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.node.attribute(name)
    }

    /// Attribute value, treating an empty value like a missing one
    pub fn non_empty_attribute(&self, name: &str) -> Option<&'a str> {
        self.attribute(name).filter(|v| !v.is_empty())
    }

    /// All descendant elements with the given local name, in document order
    pub fn find_all(&self, tag: &'a str) -> impl Iterator<Item = Element<'a, 'input>> + 'a {
        self.node
            .descendants()
            .skip(1)
            .filter(move |n| n.is_element() && n.tag_name().name() == tag)
            .map(|node| Element { node })
    }

    /// First descendant element with the given local name
    pub fn find_one(&self, tag: &'a str) -> Option<Element<'a, 'input>> {
        self.find_all(tag).next()
    }

    /// Character data directly inside this element
    ///
    /// Text belonging to child elements is not included.
    pub fn text(&self) -> String {
        self.node
            .children()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect()
    }

    /// The raw markup between this element's start and end tags
    pub fn inner_xml(&self) -> &'a str {
        let Some(first) = self.node.first_child() else {
            return "";
        };
        let input = self.node.document().input_text();
        let range = self.node.range();
        let start = first.range().start;
        // The last "</" inside an element's markup opens its own end tag.
        let end = input[start..range.end]
            .rfind("</")
            .map_or(range.end, |pos| start + pos);
        &input[start..end]
    }
}
