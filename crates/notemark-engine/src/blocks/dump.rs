use std::fmt::Write;

use super::types::{BlockKind, BlockNode, ListKind};

/// Renders a block tree as indented text, one node per line.
///
/// Inline content is shown after a colon with line breaks drawn as `↲`
/// and its end as `∎`, so trailing whitespace stays visible.
pub fn dump_tree(root: &BlockNode) -> String {
    let mut out = String::new();
    dump_node(root, 0, &mut out);
    out
}

fn dump_node(node: &BlockNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}{}", node.kind.name());
    match node.kind {
        BlockKind::List {
            list_kind,
            content_start,
        } => {
            let kind = match list_kind {
                ListKind::Bullet => "bullet",
                ListKind::Numbered => "numbered",
            };
            let _ = write!(out, " {kind} content_start={content_start}");
        }
        BlockKind::Heading { level } => {
            let _ = write!(out, " level={level}");
        }
        _ => {}
    }
    let _ = write!(out, " margin={}", node.margin);
    if let Some(content) = node.inline_content() {
        let _ = write!(out, ": {}∎", content.replace('\n', "↲"));
    }
    out.push('\n');

    for child in node.children() {
        dump_node(child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::parse_blocks;

    #[test]
    fn dump_shows_structure_and_content() {
        let root = parse_blocks("# Shopping\n- eggs\n  - brown\n1. first\n\\code\n|  x\n").unwrap();
        insta::assert_snapshot!(dump_tree(&root), @r"
        root margin=0
          heading level=1 margin=0: Shopping∎
          list bullet content_start=2 margin=0
            item margin=0
              paragraph margin=2: eggs↲∎
              list bullet content_start=2 margin=2
                item margin=2
                  paragraph margin=4: brown↲∎
          list numbered content_start=3 margin=0
            item margin=0
              paragraph margin=3: first↲∎
          code margin=0: x↲∎
        ");
    }
}
