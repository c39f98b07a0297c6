//! Character classes shared by the block and inline tokenizers.
//!
//! The two tokenizers read the same characters through different alphabets:
//! block lexing treats `#` and the line break as structural, while inline
//! lexing treats the tag punctuation (`, = [ ] { } \`) as operators and any
//! run of whitespace, newlines included, as a single space.

/// Which tokenizer is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexContext {
    Block,
    Inline,
}

/// Operator characters of the block alphabet.
pub const BLOCK_OPERATORS: &[char] = &['#', '[', ']', '{', '}', '\\', '\n'];

/// Operator characters of the inline alphabet.
///
/// `|` introduces length-prefixed tag content and `` ` `` delimits code spans.
pub const INLINE_OPERATORS: &[char] = &[',', '=', '[', ']', '{', '}', '\\', '|', '`'];

pub fn is_operator(c: char, cx: LexContext) -> bool {
    match cx {
        LexContext::Block => BLOCK_OPERATORS.contains(&c),
        LexContext::Inline => INLINE_OPERATORS.contains(&c),
    }
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Horizontal whitespace. A carriage return counts as space so CRLF lines
/// end in the same place as LF lines.
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r')
}

pub fn is_newline(c: char) -> bool {
    c == '\n'
}

/// A character that may appear in a tag name.
pub fn is_name_char(c: char) -> bool {
    !is_operator(c, LexContext::Inline) && !is_space(c) && !is_newline(c)
}
