//! # Tag Grammar
//!
//! A tag invocation is a tag token followed by optional attributes and
//! optional content:
//!
//! ```text
//! \name[positional, key=value]{content}
//! \name|12|exactly 12 b
//! ```
//!
//! Attributes must follow the name directly. Content comes in three shapes:
//!
//! - **delimited**: `{` up to the first unescaped `}`; braces do not nest
//! - **balanced**: `{` up to the `}` that brings the brace depth back to zero
//! - **length-prefixed**: `|N|` followed by exactly `N` bytes, for content
//!   that would otherwise need escaping
//!
//! Parsing is speculative. When attributes or content are malformed the
//! lexer is rewound and the invocation reports them as absent, leaving the
//! caller to fall back to literal text.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::inline::{InlineLexer, InlineToken, InlineTokenKind};

/// Attributes of a tag: bare values in order, plus `key=value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagAttributes {
    pub positional: Vec<String>,
    pub named: BTreeMap<String, String>,
}

impl TagAttributes {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }

    pub fn has_flag(&self, value: &str) -> bool {
        self.positional.iter().any(|p| p == value)
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    fn push_item(&mut self, key: Option<String>, value: &str) {
        let value = value.trim();
        match key {
            Some(key) => {
                self.named.insert(key, value.to_string());
            }
            None if !value.is_empty() => self.positional.push(value.to_string()),
            None => {}
        }
    }
}

/// How a tag's `{...}` content is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    Delimited,
    Balanced,
}

/// Captured tag content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagContent {
    pub text: String,
    /// False when end of input was reached before the closing delimiter.
    pub terminated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInvocation {
    pub name: String,
    pub attributes: Option<TagAttributes>,
    pub content: Option<TagContent>,
    /// Source range from the backslash to the end of the last consumed
    /// delimiter.
    pub span: Range<usize>,
}

impl TagInvocation {
    pub fn attributes(&self) -> TagAttributes {
        self.attributes.clone().unwrap_or_default()
    }

    pub fn content_text(&self) -> Option<&str> {
        self.content.as_ref().map(|c| c.text.as_str())
    }

    /// The consumed source text, exactly as written. `source` is the content
    /// the invocation was parsed from.
    pub fn literal<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.clone()).unwrap_or_default()
    }
}

/// Parses attributes and content after an already-consumed tag token.
pub fn parse_tag(lexer: &mut InlineLexer<'_>, tag: &InlineToken<'_>, mode: ContentMode) -> TagInvocation {
    let attributes = parse_attributes(lexer);
    let content = parse_content(lexer, mode);
    TagInvocation {
        name: tag.tag_name().to_string(),
        attributes,
        content,
        span: tag.span.start..lexer.pos(),
    }
}

/// Parses `[...]` at the current position. Restores the lexer and returns
/// `None` when there is no well-formed attribute list.
pub fn parse_attributes(lexer: &mut InlineLexer<'_>) -> Option<TagAttributes> {
    let saved = lexer.pos();
    if !lexer.next_token().is_operator('[') {
        lexer.restore(saved);
        return None;
    }

    let mut attributes = TagAttributes::default();
    let mut key: Option<String> = None;
    let mut value = String::new();
    loop {
        let token = lexer.next_token();
        match token.kind {
            InlineTokenKind::End => {
                lexer.restore(saved);
                return None;
            }
            InlineTokenKind::Operator if token.text == "]" => {
                attributes.push_item(key.take(), &value);
                return Some(attributes);
            }
            InlineTokenKind::Operator if token.text == "," => {
                attributes.push_item(key.take(), &value);
                value.clear();
            }
            InlineTokenKind::Operator if token.text == "=" && key.is_none() => {
                key = Some(value.trim().to_string());
                value.clear();
            }
            _ => value.push_str(token.text),
        }
    }
}

/// Parses tag content at the current position. Restores the lexer and
/// returns `None` when no content follows.
pub fn parse_content(lexer: &mut InlineLexer<'_>, mode: ContentMode) -> Option<TagContent> {
    let saved = lexer.pos();
    let open = lexer.next_token();
    let content = if open.is_operator('{') {
        match mode {
            ContentMode::Delimited => Some(scan_delimited(lexer)),
            ContentMode::Balanced => Some(scan_balanced(lexer)),
        }
    } else if open.is_operator('|') {
        scan_length_prefixed(lexer)
    } else {
        None
    };

    if content.is_none() {
        lexer.restore(saved);
    }
    content
}

fn scan_delimited(lexer: &mut InlineLexer<'_>) -> TagContent {
    let mut text = String::new();
    loop {
        let token = lexer.next_token();
        match token.kind {
            InlineTokenKind::End => return TagContent { text, terminated: false },
            InlineTokenKind::Operator if token.text == "}" => {
                return TagContent { text, terminated: true };
            }
            _ => text.push_str(token.text),
        }
    }
}

fn scan_balanced(lexer: &mut InlineLexer<'_>) -> TagContent {
    let mut text = String::new();
    let mut depth = 1usize;
    loop {
        let token = lexer.next_token();
        if token.kind == InlineTokenKind::End {
            return TagContent { text, terminated: false };
        }
        if token.is_operator('{') {
            depth += 1;
        } else if token.is_operator('}') {
            depth -= 1;
            if depth == 0 {
                return TagContent { text, terminated: true };
            }
        }
        // Escapes are kept verbatim: balanced content is usually code or
        // math where the backslash matters.
        text.push_str(lexer.slice(token.span));
    }
}

fn scan_length_prefixed(lexer: &mut InlineLexer<'_>) -> Option<TagContent> {
    let digits = lexer.next_token();
    if digits.kind != InlineTokenKind::Text || !digits.text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let len: usize = digits.text.parse().ok()?;
    if !lexer.next_token().is_operator('|') {
        return None;
    }

    let start = lexer.pos();
    let wanted = start.saturating_add(len);
    let src = lexer.source();
    let mut end = wanted.min(src.len());
    while !src.is_char_boundary(end) {
        end += 1;
    }
    lexer.restore(end);
    Some(TagContent {
        text: src[start..end].to_string(),
        terminated: wanted <= src.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn invoke(src: &str, mode: ContentMode) -> (TagInvocation, usize) {
        let mut lexer = InlineLexer::new(src);
        let tag = lexer.next_token();
        let invocation = parse_tag(&mut lexer, &tag, mode);
        (invocation, lexer.pos())
    }

    #[test]
    fn positional_and_named_attributes() {
        let (tag, _) = invoke("\\image[ left , width = 300px, height=20]{a.png}", ContentMode::Delimited);
        let attributes = tag.attributes.as_ref().unwrap();
        assert_eq!(attributes.positional, vec!["left".to_string()]);
        assert_eq!(attributes.get("width"), Some("300px"));
        assert_eq!(attributes.get("height"), Some("20"));
        assert_eq!(tag.content_text(), Some("a.png"));
    }

    #[test]
    fn empty_attribute_list() {
        let (tag, _) = invoke("\\x[]{y}", ContentMode::Delimited);
        assert_eq!(tag.attributes, Some(TagAttributes::default()));
    }

    #[test]
    fn unclosed_attributes_are_ignored() {
        let (tag, pos) = invoke("\\x[a, b", ContentMode::Delimited);
        assert_eq!(tag.attributes, None);
        assert_eq!(tag.content, None);
        assert_eq!(pos, 2);
    }

    #[test]
    fn attributes_must_follow_name_directly() {
        let (tag, pos) = invoke("\\x [a]{b}", ContentMode::Delimited);
        assert_eq!(tag.attributes, None);
        assert_eq!(tag.content, None);
        assert_eq!(pos, 2);
        assert_eq!(tag.span, 0..2);
    }

    #[test]
    fn delimited_content_stops_at_first_close() {
        let (tag, pos) = invoke("\\html{<b>{x}</b>} rest", ContentMode::Delimited);
        assert_eq!(tag.content_text(), Some("<b>{x"));
        assert_eq!(pos, 12);
    }

    #[test]
    fn delimited_content_unescapes_braces() {
        let (tag, _) = invoke("\\html{a \\} b}", ContentMode::Delimited);
        assert_eq!(tag.content_text(), Some("a } b"));
    }

    #[test]
    fn delimited_content_keeps_raw_whitespace() {
        let (tag, _) = invoke("\\note{Two\n  lines}", ContentMode::Delimited);
        assert_eq!(tag.content_text(), Some("Two\n  lines"));
    }

    #[test]
    fn balanced_content_nests() {
        let src = "\\code{fn f() { if x { y } }} after";
        let (tag, pos) = invoke(src, ContentMode::Balanced);
        assert_eq!(tag.content_text(), Some("fn f() { if x { y } }"));
        assert!(tag.content.unwrap().terminated);
        assert_eq!(&src[pos..], " after");
    }

    #[test]
    fn balanced_content_keeps_escapes() {
        let (tag, _) = invoke("\\math{\\{x\\}}", ContentMode::Balanced);
        assert_eq!(tag.content_text(), Some("\\{x\\}"));
    }

    #[test]
    fn unterminated_content_runs_to_end() {
        let (tag, _) = invoke("\\b{never closed", ContentMode::Delimited);
        let content = tag.content.unwrap();
        assert_eq!(content.text, "never closed");
        assert!(!content.terminated);

        let (tag, _) = invoke("\\code{a { b }", ContentMode::Balanced);
        let content = tag.content.unwrap();
        assert_eq!(content.text, "a { b }");
        assert!(!content.terminated);
    }

    #[test]
    fn length_prefixed_content() {
        let src = "\\html|5|a}b{c tail";
        let (tag, pos) = invoke(src, ContentMode::Delimited);
        assert_eq!(tag.content_text(), Some("a}b{c"));
        assert_eq!(&src[pos..], " tail");
    }

    #[test]
    fn length_prefixed_content_past_end() {
        let (tag, _) = invoke("\\html|50|short", ContentMode::Delimited);
        let content = tag.content.unwrap();
        assert_eq!(content.text, "short");
        assert!(!content.terminated);
    }

    #[test]
    fn malformed_length_prefix_is_no_content() {
        let (tag, pos) = invoke("\\html|x|abc", ContentMode::Delimited);
        assert_eq!(tag.content, None);
        assert_eq!(pos, 5);
    }

    #[test]
    fn missing_content_restores_after_attributes() {
        let (tag, pos) = invoke("\\i[x] plain", ContentMode::Delimited);
        assert!(tag.attributes.is_some());
        assert_eq!(tag.content, None);
        assert_eq!(pos, 5);
        assert_eq!(tag.literal("\\i[x] plain"), "\\i[x]");
    }

    #[test]
    fn literal_is_the_source_as_written() {
        let src = "\\tag[ z=1 ,k= v,b]{x}";
        let (tag, _) = invoke(src, ContentMode::Delimited);
        assert_eq!(tag.literal(src), src);

        let src = "\\link[z=1, a] rest";
        let (tag, _) = invoke(src, ContentMode::Delimited);
        assert_eq!(tag.literal(src), "\\link[z=1, a]");
    }
}
