use crate::models::NoteId;
use crate::navigation::NavigationIntent;

/// A rendered inline element of a leaf block.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineNode {
    Text(String),
    Emphasis(Vec<InlineNode>),
    Strong(Vec<InlineNode>),
    /// External link, opened in a new tab.
    Link {
        title: String,
        href: String,
    },
    /// Cross-reference to another note. `target` is `None` when the title
    /// did not resolve.
    NoteLink {
        title: String,
        target: Option<NoteId>,
    },
    /// Inline code. `html` is already escaped.
    Code {
        html: String,
        language: Option<String>,
    },
    Image {
        src: String,
        width: Option<f64>,
        height: Option<f64>,
    },
    Video {
        video_id: String,
        width: f64,
        height: f64,
    },
    /// Markup passed through unescaped.
    Html(String),
}

impl InlineNode {
    pub fn text(text: impl Into<String>) -> Self {
        InlineNode::Text(text.into())
    }

    /// Navigation this node asks for when activated.
    pub fn navigation_intent(&self) -> Option<NavigationIntent> {
        match self {
            InlineNode::NoteLink {
                target: Some(id), ..
            } => Some(NavigationIntent::open_note(id.clone())),
            _ => None,
        }
    }

    pub fn children(&self) -> &[InlineNode] {
        match self {
            InlineNode::Emphasis(children) | InlineNode::Strong(children) => children,
            _ => &[],
        }
    }
}

/// Calls `f` on every node, depth first.
pub fn walk_inline(nodes: &[InlineNode], f: &mut impl FnMut(&InlineNode)) {
    for node in nodes {
        f(node);
        walk_inline(node.children(), f);
    }
}
