//! # Block Tokenizer
//!
//! Turns note source into block-level tokens, one line (or line prefix) at a
//! time. Tokens are produced lazily: the tree builder pulls them with
//! [`BlockTokenizer::next_token`] and looks ahead with [`BlockTokenizer::peek`].
//!
//! ## Line shapes
//!
//! After skipping leading spaces (the token's *margin*), a line is:
//!
//! | starts with                      | token                |
//! |----------------------------------|----------------------|
//! | end of input                     | `End`                |
//! | `- ` or `* `                     | `BulletMarker`       |
//! | 1 to 9 digits then `. `          | `NumberedMarker`     |
//! | 1 to 6 `#` then a space          | `Title`              |
//! | `\code`, optional `[...]`, no `{` | `CodeHeader`        |
//! | `\|`                             | `CodeLine`           |
//! | line break                       | `BlankLine`          |
//! | anything else                    | `ParagraphLine`      |
//!
//! List markers only consume the marker and the spaces after it; the rest of
//! the line is lexed again on the next call, so `- some text` yields a
//! `BulletMarker` followed by a `ParagraphLine`.
//!
//! ## Lookahead
//!
//! Exactly one token of lookahead is available. [`BlockTokenizer::peek`]
//! returns a [`Lookahead`] that mutably borrows the tokenizer, so a second
//! peek (or a `next_token`) cannot happen until the first lookahead has been
//! committed or dropped:
//!
//! ```compile_fail
//! use notemark_syntax::block::BlockTokenizer;
//!
//! let mut tokens = BlockTokenizer::new("# Title\npara\n");
//! let first = tokens.peek();
//! let second = tokens.peek();
//! first.commit();
//! ```

use crate::classify::{LexContext, is_digit, is_newline, is_operator, is_space};
use crate::cursor::Cursor;

/// Keyword that opens a code block when it stands alone on its line.
pub const CODE_KEYWORD: &str = "\\code";

/// Longest digit run accepted as a numbered list marker.
pub const MAX_NUMBER_DIGITS: usize = 9;

/// Deepest heading marker (`######`).
pub const MAX_HEADING_LEVEL: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTokenKind {
    Title,
    ParagraphLine,
    BulletMarker,
    NumberedMarker,
    CodeHeader,
    CodeLine,
    BlankLine,
    End,
}

/// A block-level token borrowing its value from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockToken<'s> {
    pub kind: BlockTokenKind,
    /// Title text, marker text, code header attributes, or line text.
    pub value: Option<&'s str>,
    /// Leading whitespace columns on the token's line.
    pub margin: usize,
    /// Columns from the start of a list marker to the start of its content.
    pub content_start: usize,
    /// Number of `#` for titles, 0 otherwise.
    pub heading_level: u8,
    pub ends_line: bool,
}

impl<'s> BlockToken<'s> {
    fn new(kind: BlockTokenKind, value: Option<&'s str>, margin: usize) -> Self {
        Self {
            kind,
            value,
            margin,
            content_start: 0,
            heading_level: 0,
            ends_line: false,
        }
    }

    pub fn is_list_marker(&self) -> bool {
        matches!(
            self.kind,
            BlockTokenKind::BulletMarker | BlockTokenKind::NumberedMarker
        )
    }

    pub fn value_or_empty(&self) -> &'s str {
        self.value.unwrap_or("")
    }
}

/// Lazy block tokenizer over one note's source.
#[derive(Debug, Clone)]
pub struct BlockTokenizer<'s> {
    cur: Cursor<'s>,
}

impl<'s> BlockTokenizer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self {
            cur: Cursor::new(src),
        }
    }

    /// Byte offset of the next unread character.
    pub fn pos(&self) -> usize {
        self.cur.pos()
    }

    /// Produces the next token and advances past it. Returns `End` forever
    /// once the input is exhausted.
    pub fn next_token(&mut self) -> BlockToken<'s> {
        scan(&mut self.cur)
    }

    /// Computes the next token without consuming it.
    pub fn peek(&mut self) -> Lookahead<'_, 's> {
        let mut ahead = self.cur.clone();
        let token = scan(&mut ahead);
        Lookahead {
            end: ahead.pos(),
            token,
            tokenizer: self,
        }
    }
}

/// A token that has been looked at but not consumed.
///
/// Dropping the lookahead leaves the tokenizer where it was; [`commit`]
/// consumes the token exactly as `next_token` would have.
///
/// [`commit`]: Lookahead::commit
#[must_use = "a lookahead must be committed or explicitly dropped"]
pub struct Lookahead<'t, 's> {
    tokenizer: &'t mut BlockTokenizer<'s>,
    token: BlockToken<'s>,
    end: usize,
}

impl<'s> Lookahead<'_, 's> {
    pub fn token(&self) -> &BlockToken<'s> {
        &self.token
    }

    pub fn kind(&self) -> BlockTokenKind {
        self.token.kind
    }

    pub fn commit(self) -> BlockToken<'s> {
        self.tokenizer.cur.set_pos(self.end);
        self.token
    }
}

/// Tokenizes the whole source, including the trailing `End` token.
pub fn tokenize(src: &str) -> Vec<BlockToken<'_>> {
    let mut tokenizer = BlockTokenizer::new(src);
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.next_token();
        tokens.push(token);
        if token.kind == BlockTokenKind::End {
            return tokens;
        }
    }
}

fn space(b: u8) -> bool {
    is_space(b as char)
}

fn digit(b: u8) -> bool {
    is_digit(b as char)
}

fn scan<'s>(cur: &mut Cursor<'s>) -> BlockToken<'s> {
    let margin = cur.eat_while(space);
    let start = cur.pos();

    let Some(first) = cur.peek() else {
        return BlockToken::new(BlockTokenKind::End, None, margin);
    };

    let token = match first {
        b'-' | b'*' => bullet_marker(cur, margin),
        b'0'..=b'9' => numbered_marker(cur, margin),
        b'#' => title(cur, margin),
        b'\\' => code_header(cur, margin),
        b'|' => Some(code_line(cur, margin)),
        b'\n' => {
            cur.bump();
            Some(BlockToken::new(BlockTokenKind::BlankLine, None, margin))
        }
        _ => None,
    };

    token.unwrap_or_else(|| {
        cur.set_pos(start);
        paragraph_line(cur, margin)
    })
}

fn bullet_marker<'s>(cur: &mut Cursor<'s>, margin: usize) -> Option<BlockToken<'s>> {
    if cur.nth(1) != Some(b' ') {
        return None;
    }
    let start = cur.pos();
    cur.bump();
    let value = cur.slice(start);
    let spaces = cur.eat_while(space);

    let mut token = BlockToken::new(BlockTokenKind::BulletMarker, Some(value), margin);
    token.content_start = 1 + spaces;
    Some(token)
}

fn numbered_marker<'s>(cur: &mut Cursor<'s>, margin: usize) -> Option<BlockToken<'s>> {
    let start = cur.pos();
    let digits = cur.eat_while(digit);
    if digits > MAX_NUMBER_DIGITS || !cur.starts_with(". ") {
        return None;
    }
    let value = cur.slice(start);
    cur.bump();
    let spaces = cur.eat_while(space);

    let mut token = BlockToken::new(BlockTokenKind::NumberedMarker, Some(value), margin);
    token.content_start = digits + 1 + spaces;
    Some(token)
}

fn title<'s>(cur: &mut Cursor<'s>, margin: usize) -> Option<BlockToken<'s>> {
    let hashes = cur.eat_while(|b| b == b'#');
    if hashes > MAX_HEADING_LEVEL as usize || cur.peek() != Some(b' ') {
        return None;
    }
    let line = cur.bump_line();

    let mut token = BlockToken::new(BlockTokenKind::Title, Some(line.trim()), margin);
    token.heading_level = hashes as u8;
    token.ends_line = true;
    Some(token)
}

fn code_header<'s>(cur: &mut Cursor<'s>, margin: usize) -> Option<BlockToken<'s>> {
    if !cur.starts_with(CODE_KEYWORD) {
        return None;
    }
    cur.bump_n(CODE_KEYWORD.len());
    if let Some(next) = cur.peek()
        && !is_operator(next as char, LexContext::Block)
        && !space(next)
    {
        // `\codex` is some other tag
        return None;
    }

    let mut attributes = None;
    if cur.peek() == Some(b'[') {
        cur.bump();
        let attr_start = cur.pos();
        cur.eat_while(|b| b != b']' && !is_newline(b as char));
        if cur.peek() != Some(b']') {
            return None;
        }
        attributes = Some(cur.slice(attr_start));
        cur.bump();
    }

    if cur.peek() == Some(b'{') {
        return None;
    }

    let consumed = cur.eat_while(|b| space(b) || is_newline(b as char));
    let mut token = BlockToken::new(BlockTokenKind::CodeHeader, attributes, margin);
    token.ends_line = consumed > 0 || cur.eof();
    Some(token)
}

fn code_line<'s>(cur: &mut Cursor<'s>, margin: usize) -> BlockToken<'s> {
    cur.bump();
    let line = cur.bump_line();
    let mut token = BlockToken::new(BlockTokenKind::CodeLine, Some(line), margin);
    token.ends_line = true;
    token
}

fn paragraph_line<'s>(cur: &mut Cursor<'s>, margin: usize) -> BlockToken<'s> {
    let line = cur.bump_line();
    let mut token = BlockToken::new(BlockTokenKind::ParagraphLine, Some(line), margin);
    token.ends_line = true;
    token
}
