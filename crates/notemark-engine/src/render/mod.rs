//! # Rendering
//!
//! Maps a rewritten block tree, and the inline content of its leaves, to an
//! [`HtmlElement`] tree. Resolved note links are also reported as
//! [`NavigationIntent`]s so a host can prefetch or list them.

pub mod html;

pub use html::{HtmlElement, HtmlNode};

use crate::blocks::{BlockKind, BlockNode, ListKind, parse_blocks};
use crate::env::Environment;
use crate::error::StructureError;
use crate::inline::kinds::{YouTube, format_dimension};
use crate::inline::{InlineNode, render_inline};
use crate::models::NoteId;
use crate::navigation::NavigationIntent;
use crate::tags::{TagRegistry, apply_user_tags};

/// A note ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedNote {
    pub id: NoteId,
    pub html: HtmlElement,
    /// One intent per distinct linked note, in document order.
    pub intents: Vec<NavigationIntent>,
}

impl RenderedNote {
    pub fn to_html(&self) -> String {
        self.html.to_html()
    }
}

/// The whole pipeline: block tree, tag rewriting, then HTML.
#[derive(Debug, Clone, Copy)]
pub struct NoteRenderer<'a> {
    registry: &'a TagRegistry,
    env: Environment<'a>,
}

impl<'a> NoteRenderer<'a> {
    pub fn new(registry: &'a TagRegistry, env: Environment<'a>) -> Self {
        Self { registry, env }
    }

    /// Block tree of a note with registered tags applied.
    pub fn parse(&self, source: &str) -> Result<BlockNode, StructureError> {
        let mut root = parse_blocks(source)?;
        apply_user_tags(&mut root, self.registry, &self.env);
        Ok(root)
    }

    pub fn render(&self, id: &NoteId, source: &str) -> Result<RenderedNote, StructureError> {
        let root = self.parse(source)?;
        Ok(render_tree(id, &root, &self.env))
    }
}

/// Renders an already built tree.
pub fn render_tree(id: &NoteId, root: &BlockNode, env: &Environment<'_>) -> RenderedNote {
    let mut intents = Vec::new();
    let mut html = HtmlElement::new("div")
        .attr("id", id.as_str())
        .class("note")
        .class("expanded");
    for child in root.children() {
        html.push(render_block(child, env, &mut intents));
    }
    RenderedNote {
        id: id.clone(),
        html,
        intents,
    }
}

fn render_block(
    block: &BlockNode,
    env: &Environment<'_>,
    intents: &mut Vec<NavigationIntent>,
) -> HtmlElement {
    let content = block.inline_content().unwrap_or_default();
    match block.kind {
        BlockKind::Root => {
            let mut div = HtmlElement::new("div");
            for child in block.children() {
                div.push(render_block(child, env, intents));
            }
            div
        }
        BlockKind::List { list_kind, .. } => {
            let tag = match list_kind {
                ListKind::Bullet => "ul",
                ListKind::Numbered => "ol",
            };
            let mut list = HtmlElement::new(tag);
            for child in block.children() {
                list.push(render_block(child, env, intents));
            }
            list
        }
        BlockKind::ListItem => {
            let mut item = HtmlElement::new("li");
            for child in block.children() {
                item.push(render_block(child, env, intents));
            }
            item
        }
        BlockKind::Heading { level } => {
            let tag = match level {
                1 => "h1",
                2 => "h2",
                3 => "h3",
                4 => "h4",
                5 => "h5",
                _ => "h6",
            };
            render_leaf(HtmlElement::new(tag), content, env, intents)
        }
        BlockKind::Paragraph => render_leaf(HtmlElement::new("p"), content, env, intents),
        BlockKind::Code => HtmlElement::new("pre")
            .child(HtmlElement::new("code").class("code-block").raw(content)),
    }
}

fn render_leaf(
    mut element: HtmlElement,
    content: &str,
    env: &Environment<'_>,
    intents: &mut Vec<NavigationIntent>,
) -> HtmlElement {
    for node in render_inline(content, env) {
        element.push(inline_to_html(&node, intents));
    }
    element
}

fn inline_to_html(node: &InlineNode, intents: &mut Vec<NavigationIntent>) -> HtmlNode {
    if let Some(intent) = node.navigation_intent()
        && !intents.contains(&intent)
    {
        intents.push(intent);
    }

    match node {
        InlineNode::Text(text) => HtmlNode::Text(text.clone()),
        InlineNode::Html(markup) => HtmlNode::Raw(markup.clone()),
        InlineNode::Emphasis(children) | InlineNode::Strong(children) => {
            let tag = if matches!(node, InlineNode::Emphasis(_)) { "i" } else { "b" };
            let mut span = HtmlElement::new(tag);
            for child in children {
                span.push(inline_to_html(child, intents));
            }
            span.into()
        }
        InlineNode::Link { title, href } => HtmlElement::new("a")
            .attr("href", href.as_str())
            .attr("target", "_blank")
            .text(title.as_str())
            .into(),
        InlineNode::NoteLink { title, target } => {
            let link = HtmlElement::new("a").attr("href", "#");
            let link = match target {
                Some(id) => link.class("note-link").attr("data-note-id", id.as_str()),
                None => link.class("note-link-broken"),
            };
            link.text(title.as_str()).into()
        }
        InlineNode::Code { html, language } => {
            let mut code = HtmlElement::new("code").class("code-inline");
            if let Some(language) = language {
                code = code.class(&format!("language-{language}"));
            }
            code.raw(html.as_str()).into()
        }
        InlineNode::Image { src, width, height } => {
            let mut img = HtmlElement::new("img").attr("src", src.as_str());
            if let Some(width) = width {
                img = img.attr("width", format_dimension(*width));
            }
            if let Some(height) = height {
                img = img.attr("height", format_dimension(*height));
            }
            img.into()
        }
        InlineNode::Video {
            video_id,
            width,
            height,
        } => HtmlElement::new("iframe")
            .attr("width", format_dimension(*width))
            .attr("height", format_dimension(*height))
            .attr("style", "margin: 0 auto; display: block;")
            .attr("src", YouTube::embed_url(video_id))
            .attr("frameborder", "0")
            .attr("allow", YouTube::ALLOW)
            .flag("allowfullscreen")
            .into(),
    }
}
