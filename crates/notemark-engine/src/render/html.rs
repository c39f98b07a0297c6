//! A minimal HTML tree with a pretty-printing serializer.
//!
//! Elements holding block content put each child element on its own
//! indented line. Elements holding phrasing content (`p`, `a`, headings and
//! so on) are written on one line so no whitespace is added to the text.

use html_escape::{encode_double_quoted_attribute, encode_text};

const INDENT: &str = "  ";

const INLINE_TAGS: &[&str] = &[
    "a", "b", "code", "h1", "h2", "h3", "h4", "h5", "h6", "i", "p", "pre", "span",
];

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    Element(HtmlElement),
    /// Text, escaped when serialized.
    Text(String),
    /// Markup written as is.
    Raw(String),
}

impl From<HtmlElement> for HtmlNode {
    fn from(element: HtmlElement) -> Self {
        HtmlNode::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HtmlElement {
    pub tag: &'static str,
    /// Attributes in insertion order; `None` values are written bare.
    pub attributes: Vec<(&'static str, Option<String>)>,
    pub children: Vec<HtmlNode>,
}

impl HtmlElement {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute, replacing an earlier value.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set_attribute(name, Some(value.into()));
        self
    }

    /// Sets a valueless attribute such as `allowfullscreen`.
    pub fn flag(mut self, name: &'static str) -> Self {
        self.set_attribute(name, None);
        self
    }

    /// Adds one class to the `class` attribute.
    pub fn class(mut self, class: &str) -> Self {
        let value = match self.attribute("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set_attribute("class", Some(value));
        self
    }

    pub fn child(mut self, node: impl Into<HtmlNode>) -> Self {
        self.push(node);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(HtmlNode::Text(text.into()))
    }

    pub fn raw(self, markup: impl Into<String>) -> Self {
        self.child(HtmlNode::Raw(markup.into()))
    }

    pub fn push(&mut self, node: impl Into<HtmlNode>) {
        self.children.push(node.into());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    fn set_attribute(&mut self, name: &'static str, value: Option<String>) {
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Serializes the element and its subtree, ending with a newline.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(&mut out, self, 0);
        out.push('\n');
        out
    }
}

fn write_element(out: &mut String, element: &HtmlElement, depth: usize) {
    out.push('<');
    out.push_str(element.tag);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        if let Some(value) = value {
            out.push_str("=\"");
            out.push_str(&encode_double_quoted_attribute(value));
            out.push('"');
        }
    }
    out.push('>');

    if VOID_TAGS.contains(&element.tag) {
        return;
    }

    let block = !INLINE_TAGS.contains(&element.tag);
    let mut broke_lines = false;
    for child in &element.children {
        match child {
            HtmlNode::Element(child) if block => {
                out.push('\n');
                out.push_str(&INDENT.repeat(depth + 1));
                write_element(out, child, depth + 1);
                broke_lines = true;
            }
            HtmlNode::Element(child) => write_element(out, child, depth),
            HtmlNode::Text(text) => out.push_str(&encode_text(text)),
            HtmlNode::Raw(markup) => out.push_str(markup),
        }
    }
    if broke_lines {
        out.push('\n');
        out.push_str(&INDENT.repeat(depth));
    }

    out.push_str("</");
    out.push_str(element.tag);
    out.push('>');
}
