//! # Inline Lexer
//!
//! Tokenizes the inline content of one leaf block using [Logos].
//!
//! [Logos]: https://docs.rs/logos
//!
//! The inline alphabet is small:
//!
//! - `\name` is a **tag**; the name is a run of characters that are neither
//!   operators nor whitespace
//! - `, = [ ] { } \ | `` ` `` are single-character **operators**
//! - `\` followed by an operator is an **escaped** operator and lexes as text
//!   holding just that operator (`\}` is the text `}`)
//! - runs of spaces, tabs and newlines collapse into one **space** token;
//!   newlines carry no meaning inside a block's inline content
//! - everything else groups into **text** runs
//!
//! Unlike the block tokenizer, the inline lexer is freely rewindable: it is a
//! position into the content, and callers save and [`restore`] it when a
//! speculative parse (tag attributes, tag content) does not pan out.
//!
//! [`restore`]: InlineLexer::restore

use std::ops::Range;

use logos::Logos;

/// Raw token kinds recognised by Logos.
///
/// Kept separate from [`InlineTokenKind`] because escaped operators are lexed
/// on their own but surface as text.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawKind {
    #[regex(r"\\[^ \t\r\n,=\[\]{}\\|`]+")]
    Tag,

    #[regex(r"\\[,=\[\]{}\\|`]")]
    Escaped,

    #[regex(r"[ \t\r\n]+")]
    Space,

    #[regex(r"[,=\[\]{}\\|`]")]
    Operator,

    #[regex(r"[^ \t\r\n,=\[\]{}\\|`]+")]
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineTokenKind {
    Text,
    Space,
    Operator,
    Tag,
    End,
}

impl RawKind {
    fn to_token_kind(self) -> InlineTokenKind {
        match self {
            RawKind::Tag => InlineTokenKind::Tag,
            RawKind::Escaped | RawKind::Text => InlineTokenKind::Text,
            RawKind::Space => InlineTokenKind::Space,
            RawKind::Operator => InlineTokenKind::Operator,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineToken<'s> {
    pub kind: InlineTokenKind,
    /// Token text. For escaped operators this is the operator without its
    /// backslash; for tags it includes the backslash.
    pub text: &'s str,
    /// Byte range in the content, backslashes included.
    pub span: Range<usize>,
}

impl<'s> InlineToken<'s> {
    /// Tag name without the leading backslash, or `""` for other tokens.
    pub fn tag_name(&self) -> &'s str {
        match self.kind {
            InlineTokenKind::Tag => &self.text[1..],
            _ => "",
        }
    }

    pub fn is_operator(&self, op: char) -> bool {
        self.kind == InlineTokenKind::Operator && self.text.starts_with(op)
    }

    /// Text the token stands for when re-emitted literally. Whitespace runs
    /// collapse to a single space.
    pub fn literal(&self) -> &'s str {
        match self.kind {
            InlineTokenKind::Space => " ",
            _ => self.text,
        }
    }
}

/// Rewindable lexer over one inline content string.
#[derive(Debug, Clone)]
pub struct InlineLexer<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> InlineLexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0 }
    }

    pub fn source(&self) -> &'s str {
        self.src
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn restore(&mut self, pos: usize) {
        self.pos = pos.min(self.src.len());
    }

    pub fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Source text between two positions.
    pub fn slice(&self, span: Range<usize>) -> &'s str {
        &self.src[span]
    }

    pub fn next_token(&mut self) -> InlineToken<'s> {
        let start = self.pos;
        if self.at_end() {
            return InlineToken {
                kind: InlineTokenKind::End,
                text: "",
                span: start..start,
            };
        }

        let mut lex = RawKind::lexer(self.rest());
        // Every character is covered by some rule; treat anything
        // unexpected as text so lexing never fails.
        let raw = lex.next().and_then(Result::ok).unwrap_or(RawKind::Text);
        let len = lex.span().end.max(1);
        let end = next_boundary(self.src, start + len);
        self.pos = end;

        let text = match raw {
            RawKind::Escaped => &self.src[start + 1..end],
            _ => &self.src[start..end],
        };
        InlineToken {
            kind: raw.to_token_kind(),
            text,
            span: start..end,
        }
    }

    pub fn peek_token(&self) -> InlineToken<'s> {
        self.clone().next_token()
    }
}

fn next_boundary(src: &str, mut pos: usize) -> usize {
    while pos < src.len() && !src.is_char_boundary(pos) {
        pos += 1;
    }
    pos.min(src.len())
}

/// Lexes a whole content string, excluding the `End` token.
pub fn lex(src: &str) -> Vec<InlineToken<'_>> {
    let mut lexer = InlineLexer::new(src);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        if token.kind == InlineTokenKind::End {
            return tokens;
        }
        tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{LexContext, is_operator};
    use InlineTokenKind::*;
    use pretty_assertions::assert_eq;

    fn token(kind: InlineTokenKind, text: &str) -> (InlineTokenKind, &str) {
        (kind, text)
    }

    fn simple(src: &str) -> Vec<(InlineTokenKind, &str)> {
        lex(src).into_iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn text_and_spaces() {
        assert_eq!(
            simple("hello  big\n\tworld"),
            vec![
                token(Text, "hello"),
                token(Space, "  "),
                token(Text, "big"),
                token(Space, "\n\t"),
                token(Text, "world"),
            ]
        );
    }

    #[test]
    fn tag_with_attributes_and_content() {
        assert_eq!(
            simple("\\image[width=300]{cat.png}"),
            vec![
                token(Tag, "\\image"),
                token(Operator, "["),
                token(Text, "width"),
                token(Operator, "="),
                token(Text, "300"),
                token(Operator, "]"),
                token(Operator, "{"),
                token(Text, "cat.png"),
                token(Operator, "}"),
            ]
        );
    }

    #[test]
    fn link_arrow_is_plain_text() {
        assert_eq!(
            simple("\\link{Example->http://example.com}"),
            vec![
                token(Tag, "\\link"),
                token(Operator, "{"),
                token(Text, "Example->http://example.com"),
                token(Operator, "}"),
            ]
        );
    }

    #[test]
    fn escaped_operators_lex_as_text() {
        let tokens = lex("a\\}b\\\\");
        assert_eq!(
            tokens.iter().map(|t| (t.kind, t.text)).collect::<Vec<_>>(),
            vec![token(Text, "a"), token(Text, "}"), token(Text, "b"), token(Text, "\\")]
        );
        assert_eq!(tokens[1].span, 1..3);
    }

    #[test]
    fn lone_backslash_is_an_operator() {
        assert_eq!(
            simple("a \\ b\\"),
            vec![
                token(Text, "a"),
                token(Space, " "),
                token(Operator, "\\"),
                token(Space, " "),
                token(Text, "b"),
                token(Operator, "\\"),
            ]
        );
    }

    #[test]
    fn tag_name_stops_at_operator() {
        let tokens = lex("\\b{x}");
        assert_eq!(tokens[0].tag_name(), "b");
        assert!(tokens[1].is_operator('{'));
        assert_eq!(tokens[2].tag_name(), "");
    }

    #[test]
    fn multibyte_text() {
        assert_eq!(
            simple("héllo wörld"),
            vec![token(Text, "héllo"), token(Space, " "), token(Text, "wörld")]
        );
    }

    #[test]
    fn space_literal_collapses() {
        let tokens = lex("a \n  b");
        assert_eq!(tokens[1].literal(), " ");
        assert_eq!(tokens[1].text, " \n  ");
    }

    #[test]
    fn lexer_restore_rewinds() {
        let mut lexer = InlineLexer::new("one two");
        let saved = lexer.pos();
        assert_eq!(lexer.next_token().text, "one");
        lexer.restore(saved);
        assert_eq!(lexer.next_token().text, "one");
        assert_eq!(lexer.peek_token().kind, Space);
        assert_eq!(lexer.next_token().kind, Space);
        assert_eq!(lexer.rest(), "two");
    }

    #[test]
    fn end_token_repeats() {
        let mut lexer = InlineLexer::new("x");
        lexer.next_token();
        assert_eq!(lexer.next_token().kind, End);
        assert_eq!(lexer.next_token().kind, End);
    }

    #[test]
    fn operators_agree_with_classifier() {
        for c in (0x20u8..0x7f).map(char::from) {
            let src = c.to_string();
            let tokens = lex(&src);
            assert_eq!(tokens.len(), 1, "{c:?}");
            let lexed_as_operator = tokens[0].kind == Operator;
            assert_eq!(lexed_as_operator, is_operator(c, LexContext::Inline), "{c:?}");
        }
    }
}
