use notemark_syntax::block::{BlockToken, BlockTokenKind, BlockTokenizer};

use super::{
    code::normalize_code_lines,
    types::{BlockNode, ContainerFrame, ListKind},
};
use crate::error::StructureError;

/// Builds the block tree of one note from its block tokens.
///
/// The builder keeps a stack of open containers. Index 0 is the root and
/// every following entry is the last child of the entry before it, so the
/// stack doubles as a path into the tree being built.
pub struct BlockTreeBuilder<'s> {
    tokens: BlockTokenizer<'s>,
    root: BlockNode,
    stack: Vec<ContainerFrame>,
}

/// Parses note source into its block tree.
pub fn parse_blocks(source: &str) -> Result<BlockNode, StructureError> {
    BlockTreeBuilder::new(source).build()
}

/// Title of a note, read from its first line.
pub fn parse_note_title(source: &str) -> Result<&str, StructureError> {
    let token = BlockTokenizer::new(source).next_token();
    match token.kind {
        BlockTokenKind::Title => Ok(token.value_or_empty()),
        _ => Err(StructureError::MissingTitle),
    }
}

fn list_kind(token: &BlockToken<'_>) -> Option<ListKind> {
    match token.kind {
        BlockTokenKind::BulletMarker => Some(ListKind::Bullet),
        BlockTokenKind::NumberedMarker => Some(ListKind::Numbered),
        _ => None,
    }
}

impl<'s> BlockTreeBuilder<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            tokens: BlockTokenizer::new(source),
            root: BlockNode::root(),
            stack: vec![ContainerFrame::Root],
        }
    }

    pub fn build(mut self) -> Result<BlockNode, StructureError> {
        self.title()?;

        loop {
            let token = self.tokens.next_token();
            match token.kind {
                BlockTokenKind::End => break,
                BlockTokenKind::BlankLine => continue,
                _ => {}
            }

            self.reconcile(&token);

            match token.kind {
                BlockTokenKind::Title => self.heading(&token)?,
                BlockTokenKind::ParagraphLine => {
                    self.paragraph(token.margin, token.value_or_empty())
                }
                BlockTokenKind::CodeHeader => self.code(token.margin, None),
                BlockTokenKind::CodeLine => {
                    log::debug!("code line without a code header, opening a code block");
                    self.code(token.margin, Some(token.value_or_empty()))
                }
                BlockTokenKind::BulletMarker | BlockTokenKind::NumberedMarker => {
                    self.list_item(&token)
                }
                BlockTokenKind::BlankLine | BlockTokenKind::End => {}
            }
        }

        Ok(self.root)
    }

    fn title(&mut self) -> Result<(), StructureError> {
        let token = self.tokens.next_token();
        if token.kind != BlockTokenKind::Title {
            return Err(StructureError::MissingTitle);
        }
        if token.heading_level != 1 {
            log::warn!(
                "note title '{}' has heading level {}, using 1",
                token.value_or_empty(),
                token.heading_level
            );
        }
        self.append(BlockNode::heading(1, token.margin, token.value_or_empty()));
        Ok(())
    }

    /// Pops every container the token does not continue.
    fn reconcile(&mut self, token: &BlockToken<'_>) {
        let token_list = list_kind(token);
        let mut depth = 0;

        while let Some(&ContainerFrame::List {
            list_kind,
            margin,
            content_start,
        }) = self.stack.get(depth + 1)
        {
            let nested = token.margin > margin;
            let sibling = token_list == Some(list_kind) && token.margin == margin;
            if !nested && !sibling {
                break;
            }
            depth += 1;

            // Content indented past the list's margin belongs to its last
            // item; a marker only does once it reaches the content column.
            let into_item = nested && (token_list.is_none() || token.margin >= margin + content_start);
            if into_item && matches!(self.stack.get(depth + 1), Some(ContainerFrame::ListItem { .. })) {
                depth += 1;
            }
        }

        self.stack.truncate(depth + 1);
    }

    fn heading(&mut self, token: &BlockToken<'_>) -> Result<(), StructureError> {
        if token.heading_level == 1 {
            return Err(StructureError::ExtraTitle {
                title: token.value_or_empty().to_string(),
            });
        }
        self.append(BlockNode::heading(
            token.heading_level,
            token.margin,
            token.value_or_empty(),
        ));
        Ok(())
    }

    fn paragraph(&mut self, margin: usize, first_line: &str) {
        let mut content = first_line.to_string();
        loop {
            let next = self.tokens.peek();
            if next.kind() != BlockTokenKind::ParagraphLine {
                break;
            }
            content.push_str(next.commit().value_or_empty());
        }
        self.append(BlockNode::paragraph(margin, content));
    }

    fn code(&mut self, margin: usize, first_line: Option<&'s str>) {
        let mut lines: Vec<&'s str> = first_line.into_iter().collect();
        loop {
            let next = self.tokens.peek();
            if next.kind() != BlockTokenKind::CodeLine {
                break;
            }
            lines.push(next.commit().value_or_empty());
        }
        self.append(BlockNode::code(margin, normalize_code_lines(&lines)));
    }

    fn list_item(&mut self, token: &BlockToken<'_>) {
        let Some(list_kind) = list_kind(token) else {
            return;
        };

        let open_list = match self.stack.last() {
            Some(ContainerFrame::List {
                margin,
                content_start,
                ..
            }) => token.margin >= margin + content_start,
            _ => true,
        };
        if open_list {
            self.open(
                BlockNode::list(list_kind, token.margin, token.content_start),
                ContainerFrame::List {
                    list_kind,
                    margin: token.margin,
                    content_start: token.content_start,
                },
            );
        }
        self.open(
            BlockNode::list_item(token.margin),
            ContainerFrame::ListItem {
                margin: token.margin,
            },
        );

        let next = self.tokens.peek();
        if next.kind() != BlockTokenKind::ParagraphLine {
            return;
        }
        let line = next.commit();
        self.paragraph(token.margin + token.content_start, line.value_or_empty());
    }

    /// The innermost open container.
    fn top_mut(&mut self) -> &mut BlockNode {
        fn descend(node: &mut BlockNode, depth: usize) -> &mut BlockNode {
            if depth == 0 || node.children().is_empty() {
                return node;
            }
            let last = node.children().len() - 1;
            descend(&mut node.children_mut()[last], depth - 1)
        }
        let depth = self.stack.len() - 1;
        descend(&mut self.root, depth)
    }

    fn append(&mut self, node: BlockNode) {
        if let Some(children) = self.top_mut().children_vec_mut() {
            children.push(node);
        }
    }

    fn open(&mut self, node: BlockNode, frame: ContainerFrame) {
        self.append(node);
        self.stack.push(frame);
    }
}
