//! Code block bodies: dedent normalization of collected code lines.
//!
//! Lines arrive as the text after the `|` marker, terminators included.
//! Blank lines before the first non-blank line are dropped; blank lines
//! after it are kept, trailing ones included. Every kept line then loses
//! the same number of leading space columns: the smallest indentation of
//! any non-blank line.

use notemark_syntax::classify::is_space;

fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|&b| is_space(b as char)).count()
}

fn is_blank(line: &str) -> bool {
    line.chars().all(|c| c.is_ascii_whitespace())
}

/// Smallest indentation over the non-blank lines, or 0 when all are blank.
pub fn min_leading_spaces(lines: &[&str]) -> usize {
    lines
        .iter()
        .filter(|line| !is_blank(line))
        .map(|line| leading_spaces(line))
        .min()
        .unwrap_or(0)
}

/// Joins code lines, dropping leading blank lines and the common
/// indentation.
pub fn dedent_lines(lines: &[&str]) -> String {
    let min = min_leading_spaces(lines);
    let mut out = String::new();
    let mut started = false;
    for line in lines {
        if !started && is_blank(line) {
            continue;
        }
        started = true;
        if min < line.len() {
            out.push_str(&line[min..]);
        } else if line.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// [`dedent_lines`] over a block of text.
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    dedent_lines(&lines)
}

/// Code block body as stored in the tree: dedented, then HTML-escaped.
pub fn normalize_code_lines(lines: &[&str]) -> String {
    html_escape::encode_text(&dedent_lines(lines)).into_owned()
}
