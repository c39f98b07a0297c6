use notemark_syntax::block::tokenize;
use notemark_syntax::inline::lex;
use notemark_syntax::tag::parse_tag;
use notemark_syntax::{BlockTokenKind, ContentMode, InlineLexer, InlineTokenKind};
use pretty_assertions::assert_eq;

const NOTE: &str = "# Reading list
Start with \\link{the book -> https://example.com/book}.

- chapter one
  12. re-read \\i{slowly}
\\code[rust]
|  let x = 1;
";

/// Markers consume the spaces after them, so the paragraph line that
/// follows on the same line has no margin of its own.
#[test]
fn block_tokens_of_a_note() {
    let tokens = tokenize(NOTE);
    let summary: Vec<_> = tokens
        .iter()
        .map(|t| (t.kind, t.margin, t.value))
        .collect();

    assert_eq!(
        summary,
        vec![
            (BlockTokenKind::Title, 0, Some("Reading list")),
            (
                BlockTokenKind::ParagraphLine,
                0,
                Some("Start with \\link{the book -> https://example.com/book}.\n")
            ),
            (BlockTokenKind::BlankLine, 0, None),
            (BlockTokenKind::BulletMarker, 0, Some("-")),
            (BlockTokenKind::ParagraphLine, 0, Some("chapter one\n")),
            (BlockTokenKind::NumberedMarker, 2, Some("12")),
            (BlockTokenKind::ParagraphLine, 0, Some("re-read \\i{slowly}\n")),
            (BlockTokenKind::CodeHeader, 0, Some("rust")),
            (BlockTokenKind::CodeLine, 0, Some("  let x = 1;\n")),
            (BlockTokenKind::End, 0, None),
        ]
    );
}

#[test]
fn paragraph_content_lexes_into_tags() {
    let tokens = tokenize(NOTE);
    let paragraph = tokens[1].value.unwrap();

    let tags: Vec<_> = lex(paragraph)
        .into_iter()
        .filter(|t| t.kind == InlineTokenKind::Tag)
        .map(|t| t.tag_name())
        .collect();
    assert_eq!(tags, vec!["link"]);

    let mut lexer = InlineLexer::new(paragraph);
    let tag = loop {
        let token = lexer.next_token();
        if token.kind == InlineTokenKind::Tag {
            break token;
        }
    };
    let invocation = parse_tag(&mut lexer, &tag, ContentMode::Delimited);
    assert_eq!(
        invocation.content_text(),
        Some("the book -> https://example.com/book")
    );
    assert_eq!(lexer.rest(), ".\n");
}
