use notemark_syntax::ContentMode;

use super::registry::{TagContext, TagHandler, TagOutcome};
use crate::blocks::{BlockKind, BlockNode, parse_blocks};
use crate::error::HandlerError;
use crate::inline::kinds::Math;

/// `\math{...}` and `\Math{...}`: typesets the formula once, ahead of
/// inline parsing.
pub struct MathTag {
    pub display: bool,
}

impl TagHandler for MathTag {
    fn handle(&self, cx: &mut TagContext<'_, '_>) -> Result<TagOutcome, HandlerError> {
        let invocation = cx.parse(ContentMode::Balanced);
        let Some(expression) = invocation.content_text() else {
            return Ok(TagOutcome::Keep);
        };
        Ok(TagOutcome::Replace(Math::to_html_tag(
            expression,
            self.display,
            cx.env.math,
        )))
    }
}

/// `\summary{Note title}`: replaces its block with a linked heading for the
/// note and the note's opening paragraph.
pub struct SummaryTag;

impl SummaryTag {
    pub const TAG: &'static str = "summary";
    pub const HEADING_LEVEL: u8 = 2;
}

impl TagHandler for SummaryTag {
    fn handle(&self, cx: &mut TagContext<'_, '_>) -> Result<TagOutcome, HandlerError> {
        let invocation = cx.parse(ContentMode::Delimited);
        let title = invocation
            .content_text()
            .map(|text| text.replace('\n', " ").trim().to_string())
            .filter(|title| !title.is_empty())
            .ok_or_else(|| HandlerError::MissingContent(Self::TAG.to_string()))?;

        let notes = cx.env.notes;
        let body = notes
            .resolve_title(&title)
            .and_then(|id| notes.note_body(&id))
            .ok_or_else(|| HandlerError::NoteNotFound(title.clone()))?;

        // The summarized note is parsed without its own tag-rewrite pass,
        // so summaries never expand recursively.
        let summarized = parse_blocks(body).map_err(|source| HandlerError::MalformedNote {
            title: title.clone(),
            source,
        })?;

        let margin = cx.block.margin;
        let mut blocks = vec![BlockNode::heading(
            Self::HEADING_LEVEL,
            margin,
            format!("\\note{{{}}}", title.replace('}', "\\}")),
        )];
        if let Some(first) = summarized.children().get(1)
            && first.kind == BlockKind::Paragraph
        {
            blocks.push(BlockNode::paragraph(
                margin,
                first.inline_content().unwrap_or_default(),
            ));
        }
        Ok(TagOutcome::Splice(blocks))
    }
}
