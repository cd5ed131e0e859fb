//! Markup element tree and XML text output.
//!
//! Documents are assembled as [`Element`] trees and serialized with
//! [`Element::to_xml`]. Attributes keep their insertion order, so the
//! produced text is deterministic and reproducible for identical input —
//! the host's plugin loader is schema-strict about parts of the document.

use serde::Serialize;

/// A single markup element: tag, ordered attributes, optional text content,
/// and child elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Creates an empty element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Sets an attribute and returns the element (builder form).
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Sets an attribute, replacing an existing value for the same name.
    /// New attributes are appended, so serialization order follows the
    /// order of first insertion.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    /// Sets the text content and returns the element (builder form).
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends a child and returns the element (builder form).
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a child element.
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Returns the element's tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Looks up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the child elements in insertion order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Serializes the element tree to pretty-printed XML text.
    ///
    /// Two-space indentation, `<Tag/>` for empty elements, a trailing
    /// newline after the root. Repeated calls on the same tree produce
    /// byte-identical output.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out, 0);
        out
    }

    fn write_into(&self, out: &mut String, depth: usize) {
        let pad = "  ".repeat(depth);
        out.push_str(&pad);
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }

        if self.text.is_none() && self.children.is_empty() {
            out.push_str("/>\n");
            return;
        }

        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape_text(text));
        }
        if self.children.is_empty() {
            out.push_str("</");
            out.push_str(&self.tag);
            out.push_str(">\n");
            return;
        }

        out.push('\n');
        for child in &self.children {
            child.write_into(out, depth + 1);
        }
        out.push_str(&pad);
        out.push_str("</");
        out.push_str(&self.tag);
        out.push_str(">\n");
    }
}

/// Escapes text content (`&`, `<`, `>`).
fn escape_text(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Escapes a double-quoted attribute value. Angle brackets are escaped on
/// top of the quote/ampersand set, and newlines, carriage returns, and tabs
/// become numeric character references so multi-line values (script bodies)
/// survive an attribute round-trip through the host's parser.
fn escape_attribute(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value)
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}
