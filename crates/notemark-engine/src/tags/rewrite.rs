use std::ops::Range;

use notemark_syntax::{InlineLexer, InlineTokenKind};

use super::registry::{TagContext, TagOutcome, TagRegistry};
use crate::blocks::{BlockKind, BlockNode};
use crate::env::Environment;
use crate::error::HandlerError;
use crate::inline::kinds::Html;

enum LeafEdit {
    /// Source spans of the leaf's content and their replacements, in order.
    Substitute(Vec<(Range<usize>, String)>),
    Splice(Vec<BlockNode>),
}

struct Edit {
    /// Child indices from the root to the leaf.
    path: Vec<usize>,
    change: LeafEdit,
}

/// Runs registered tag handlers over every heading and paragraph.
///
/// The tree is scanned first without changes; the collected edits are then
/// applied last to first so the paths of pending edits stay valid. Blocks
/// spliced in by a handler are not scanned again.
pub fn apply_user_tags(root: &mut BlockNode, registry: &TagRegistry, env: &Environment<'_>) {
    let mut edits = Vec::new();
    collect_edits(root, root, &mut Vec::new(), registry, env, &mut edits);
    for edit in edits.into_iter().rev() {
        apply_edit(root, edit);
    }
}

fn collect_edits(
    root: &BlockNode,
    node: &BlockNode,
    path: &mut Vec<usize>,
    registry: &TagRegistry,
    env: &Environment<'_>,
    edits: &mut Vec<Edit>,
) {
    match node.kind {
        BlockKind::Heading { .. } | BlockKind::Paragraph => {
            if let Some(change) = scan_leaf(root, node, registry, env) {
                edits.push(Edit {
                    path: path.clone(),
                    change,
                });
            }
        }
        // Code is raw text, tags in it are not tags.
        BlockKind::Code => {}
        BlockKind::Root | BlockKind::List { .. } | BlockKind::ListItem => {
            for (i, child) in node.children().iter().enumerate() {
                path.push(i);
                collect_edits(root, child, path, registry, env, edits);
                path.pop();
            }
        }
    }
}

fn scan_leaf(
    root: &BlockNode,
    block: &BlockNode,
    registry: &TagRegistry,
    env: &Environment<'_>,
) -> Option<LeafEdit> {
    let content = block.inline_content()?;
    let mut lexer = InlineLexer::new(content);
    let mut replacements = Vec::new();

    loop {
        let token = lexer.next_token();
        match token.kind {
            InlineTokenKind::End => break,
            InlineTokenKind::Tag => {}
            _ => continue,
        }
        let name = token.tag_name();
        let Some(handler) = registry.get(name) else {
            continue;
        };

        let span_start = token.span.start;
        let token_end = token.span.end;
        let outcome = {
            let mut cx = TagContext::new(&mut lexer, token, root, block, *env);
            handler.handle(&mut cx)
        };
        // A handler may rewind past its own tag; never scan it twice.
        if lexer.pos() < token_end {
            lexer.restore(token_end);
        }
        let span = span_start..lexer.pos();

        match outcome {
            Ok(TagOutcome::Keep) => {}
            Ok(TagOutcome::Replace(text)) => replacements.push((span, text)),
            Ok(TagOutcome::Splice(blocks)) => return Some(LeafEdit::Splice(blocks)),
            Err(e) => {
                log::warn!("failed parsing of custom tag '\\{name}': {e}");
                replacements.push((span, error_marker(&e)));
            }
        }
    }

    (!replacements.is_empty()).then_some(LeafEdit::Substitute(replacements))
}

/// Inline markup shown in place of a tag whose handler failed.
fn error_marker(error: &HandlerError) -> String {
    Html::passthrough(&format!(
        "<span class=\"tag-error\">{}</span>",
        html_escape::encode_text(&error.to_string())
    ))
}

fn apply_edit(root: &mut BlockNode, edit: Edit) {
    match edit.change {
        LeafEdit::Substitute(replacements) => {
            if let Some(content) = root
                .descendant_mut(&edit.path)
                .and_then(BlockNode::inline_content_mut)
            {
                for (span, text) in replacements.into_iter().rev() {
                    content.replace_range(span, &text);
                }
            }
        }
        LeafEdit::Splice(blocks) => {
            let Some((&index, parent_path)) = edit.path.split_last() else {
                return;
            };
            if let Some(children) = root
                .descendant_mut(parent_path)
                .and_then(BlockNode::children_vec_mut)
                && index < children.len()
            {
                children.splice(index..=index, blocks);
            }
        }
    }
}
