#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Numbered,
}

/// What a block node is, with the data specific to its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Root,
    List {
        list_kind: ListKind,
        /// Columns from the marker to its content on the line that opened
        /// the list.
        content_start: usize,
    },
    ListItem,
    Heading {
        level: u8,
    },
    Paragraph,
    Code,
}

impl BlockKind {
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            BlockKind::Root | BlockKind::List { .. } | BlockKind::ListItem
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Root => "root",
            BlockKind::List { .. } => "list",
            BlockKind::ListItem => "item",
            BlockKind::Heading { .. } => "heading",
            BlockKind::Paragraph => "paragraph",
            BlockKind::Code => "code",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BlockBody {
    Children(Vec<BlockNode>),
    Inline(String),
}

/// A node of the block tree.
///
/// Containers (root, list, list item) own child blocks; leaves (heading,
/// paragraph, code) own raw inline content. The constructors are the only
/// way to make a node, so a leaf never has children and a container never
/// has inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    pub kind: BlockKind,
    /// Indentation column at which the block was opened.
    pub margin: usize,
    body: BlockBody,
}

impl BlockNode {
    fn container(kind: BlockKind, margin: usize) -> Self {
        Self {
            kind,
            margin,
            body: BlockBody::Children(Vec::new()),
        }
    }

    fn leaf(kind: BlockKind, margin: usize, content: String) -> Self {
        Self {
            kind,
            margin,
            body: BlockBody::Inline(content),
        }
    }

    pub fn root() -> Self {
        Self::container(BlockKind::Root, 0)
    }

    pub fn list(list_kind: ListKind, margin: usize, content_start: usize) -> Self {
        Self::container(
            BlockKind::List {
                list_kind,
                content_start,
            },
            margin,
        )
    }

    pub fn list_item(margin: usize) -> Self {
        Self::container(BlockKind::ListItem, margin)
    }

    pub fn heading(level: u8, margin: usize, content: impl Into<String>) -> Self {
        Self::leaf(BlockKind::Heading { level }, margin, content.into())
    }

    pub fn paragraph(margin: usize, content: impl Into<String>) -> Self {
        Self::leaf(BlockKind::Paragraph, margin, content.into())
    }

    /// A code leaf. `html` is already escaped.
    pub fn code(margin: usize, html: impl Into<String>) -> Self {
        Self::leaf(BlockKind::Code, margin, html.into())
    }

    /// Adds children to a container. Children given to a leaf are dropped.
    pub fn with_children(mut self, children: impl IntoIterator<Item = BlockNode>) -> Self {
        if let Some(own) = self.children_vec_mut() {
            own.extend(children);
        }
        self
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Child blocks; empty for leaves.
    pub fn children(&self) -> &[BlockNode] {
        match &self.body {
            BlockBody::Children(children) => children,
            BlockBody::Inline(_) => &[],
        }
    }

    pub fn children_mut(&mut self) -> &mut [BlockNode] {
        match &mut self.body {
            BlockBody::Children(children) => children,
            BlockBody::Inline(_) => &mut [],
        }
    }

    /// The child list of a container, for inserting or removing children.
    pub fn children_vec_mut(&mut self) -> Option<&mut Vec<BlockNode>> {
        match &mut self.body {
            BlockBody::Children(children) => Some(children),
            BlockBody::Inline(_) => None,
        }
    }

    /// Raw inline content of a leaf.
    pub fn inline_content(&self) -> Option<&str> {
        match &self.body {
            BlockBody::Inline(content) => Some(content),
            BlockBody::Children(_) => None,
        }
    }

    pub fn inline_content_mut(&mut self) -> Option<&mut String> {
        match &mut self.body {
            BlockBody::Inline(content) => Some(content),
            BlockBody::Children(_) => None,
        }
    }

    /// Node reached by following child indices from this node.
    pub fn descendant(&self, path: &[usize]) -> Option<&BlockNode> {
        let mut node = self;
        for &i in path {
            node = node.children().get(i)?;
        }
        Some(node)
    }

    pub fn descendant_mut(&mut self, path: &[usize]) -> Option<&mut BlockNode> {
        let mut node = self;
        for &i in path {
            node = node.children_mut().get_mut(i)?;
        }
        Some(node)
    }
}

/// One open container on the builder's stack, with what the margin
/// reconciliation needs to know about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFrame {
    Root,
    List {
        list_kind: ListKind,
        margin: usize,
        content_start: usize,
    },
    ListItem {
        margin: usize,
    },
}
