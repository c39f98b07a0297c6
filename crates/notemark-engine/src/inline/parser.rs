use notemark_syntax::tag::{self, ContentMode, TagInvocation};
use notemark_syntax::{InlineLexer, InlineToken, InlineTokenKind};

use super::kinds::{Html, Link, Math, YouTube, compute_media_size, parse_dimension};
use super::types::InlineNode;
use crate::env::Environment;

/// Parses the inline content of one leaf block.
///
/// Trailing whitespace is dropped. Anything that is not valid markup is
/// kept as literal text, so this never fails.
pub fn render_inline(content: &str, env: &Environment<'_>) -> Vec<InlineNode> {
    InlineParser::new(content.trim_end(), *env).parse()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    Emphasis,
    Strong,
}

/// An `\i{` or `\b{` waiting for its `}`.
struct OpenSpan {
    kind: SpanKind,
    opener: &'static str,
    children: Vec<InlineNode>,
}

struct InlineParser<'s, 'e> {
    lexer: InlineLexer<'s>,
    env: Environment<'e>,
    root: Vec<InlineNode>,
    open: Vec<OpenSpan>,
}

impl<'s, 'e> InlineParser<'s, 'e> {
    fn new(content: &'s str, env: Environment<'e>) -> Self {
        Self {
            lexer: InlineLexer::new(content),
            env,
            root: Vec::new(),
            open: Vec::new(),
        }
    }

    fn parse(mut self) -> Vec<InlineNode> {
        loop {
            let token = self.lexer.next_token();
            match token.kind {
                InlineTokenKind::End => break,
                InlineTokenKind::Text => self.push_text(token.text),
                InlineTokenKind::Space => self.push_text(" "),
                InlineTokenKind::Operator => self.operator(&token),
                InlineTokenKind::Tag => self.tag(&token),
            }
        }
        self.finish()
    }

    /// Children list of the innermost open span, or the top level.
    fn children_mut(&mut self) -> &mut Vec<InlineNode> {
        match self.open.last_mut() {
            Some(span) => &mut span.children,
            None => &mut self.root,
        }
    }

    fn push_node(&mut self, node: InlineNode) {
        let children = self.children_mut();
        if let InlineNode::Text(text) = &node
            && let Some(InlineNode::Text(last)) = children.last_mut()
        {
            last.push_str(text);
            return;
        }
        children.push(node);
    }

    fn push_text(&mut self, text: &str) {
        if !text.is_empty() {
            self.push_node(InlineNode::text(text));
        }
    }

    fn operator(&mut self, token: &InlineToken<'s>) {
        if token.is_operator('}')
            && let Some(span) = self.open.pop()
        {
            let node = match span.kind {
                SpanKind::Emphasis => InlineNode::Emphasis(span.children),
                SpanKind::Strong => InlineNode::Strong(span.children),
            };
            self.push_node(node);
        } else if token.is_operator('`') {
            self.code_span();
        } else {
            self.push_text(token.text);
        }
    }

    /// `` `raw code` `` up to the next backtick. A lone backtick is literal.
    fn code_span(&mut self) {
        let rest = self.lexer.rest();
        let Some(len) = rest.find('`') else {
            self.push_text("`");
            return;
        };
        let code = &rest[..len];
        self.lexer.restore(self.lexer.pos() + len + 1);
        if !code.is_empty() {
            self.push_node(InlineNode::Code {
                html: html_escape::encode_text(code).into_owned(),
                language: None,
            });
        }
    }

    fn tag(&mut self, token: &InlineToken<'s>) {
        let name = token.tag_name();
        match name {
            "i" => self.open_span(token, SpanKind::Emphasis, "\\i{"),
            "b" => self.open_span(token, SpanKind::Strong, "\\b{"),
            Link::TAG | "note" | "image" | YouTube::TAG | Html::TAG => {
                self.content_tag(token, ContentMode::Delimited)
            }
            "code" | Math::INLINE_TAG | Math::DISPLAY_TAG => {
                self.content_tag(token, ContentMode::Balanced)
            }
            _ => self.push_text(token.text),
        }
    }

    /// Spans take no attributes: the `{` must follow the name directly.
    fn open_span(&mut self, token: &InlineToken<'s>, kind: SpanKind, opener: &'static str) {
        if self.lexer.peek_token().is_operator('{') {
            self.lexer.next_token();
            self.open.push(OpenSpan {
                kind,
                opener,
                children: Vec::new(),
            });
        } else {
            self.push_text(token.text);
        }
    }

    fn content_tag(&mut self, token: &InlineToken<'s>, mode: ContentMode) {
        let invocation = tag::parse_tag(&mut self.lexer, token, mode);
        let Some(content) = &invocation.content else {
            let literal = invocation.literal(self.lexer.source());
            self.push_text(literal);
            return;
        };
        if !content.terminated {
            log::debug!(
                "content of tag '\\{}' is not terminated, using the rest of the block",
                invocation.name
            );
        }
        let text = content.text.as_str();

        match invocation.name.as_str() {
            Link::TAG => {
                let (title, href) = Link::split(text);
                self.push_node(InlineNode::Link { title, href });
            }
            "note" => self.note_link(text),
            "code" => self.inline_code(&invocation, text),
            "image" => self.image(&invocation, text),
            YouTube::TAG => self.video(&invocation, text),
            Html::TAG => self.push_node(InlineNode::Html(text.to_string())),
            name => {
                let wrapped = Math::to_html_tag(text, Math::is_display(name), self.env.math);
                for node in render_inline(&wrapped, &self.env) {
                    self.push_node(node);
                }
            }
        }
    }

    /// `\note{Title#section}` links to the note titled `Title`.
    fn note_link(&mut self, text: &str) {
        let title = text.replace('\n', " ");
        let lookup = title.split('#').next().unwrap_or_default().trim();
        let target = self.env.notes.resolve_title(lookup);
        if target.is_none() {
            log::warn!("broken note link, couldn't find note for title '{lookup}'");
        }
        self.push_node(InlineNode::NoteLink {
            title: title.trim().to_string(),
            target,
        });
    }

    fn inline_code(&mut self, invocation: &TagInvocation, text: &str) {
        if text.is_empty() {
            return;
        }
        let attributes = invocation.attributes();
        let language = if attributes.has_flag("plain") {
            None
        } else {
            attributes
                .get("lang")
                .or_else(|| attributes.positional.first().map(String::as_str))
                .map(str::to_string)
        };
        self.push_node(InlineNode::Code {
            html: html_escape::encode_text(text).into_owned(),
            language,
        });
    }

    /// Images keep their own aspect ratio, so a single dimension is passed
    /// through and only a width/height pair is fitted to the column.
    fn image(&mut self, invocation: &TagInvocation, text: &str) {
        let attributes = invocation.attributes();
        let max_width = f64::from(self.env.content_width);
        let width = attributes.get("width").and_then(parse_dimension);
        let height = attributes.get("height").and_then(parse_dimension);

        let (width, height) = match (width, height) {
            (Some(w), Some(h)) => {
                let size = compute_media_size(&attributes, w / h, max_width);
                (Some(size.width), Some(size.height))
            }
            (Some(w), None) => (Some(w.min(max_width)), None),
            (None, Some(h)) => (None, Some(h)),
            (None, None) => (Some(max_width), None),
        };
        self.push_node(InlineNode::Image {
            src: format!("files/{}", text.trim()),
            width,
            height,
        });
    }

    fn video(&mut self, invocation: &TagInvocation, text: &str) {
        let Some(video_id) = YouTube::video_id(text) else {
            log::warn!("no YouTube video id in '{}'", text.trim());
            let literal = invocation.literal(self.lexer.source());
            self.push_text(literal);
            return;
        };
        let size = compute_media_size(
            &invocation.attributes(),
            YouTube::ASPECT_RATIO,
            YouTube::max_width(self.env.content_width),
        );
        self.push_node(InlineNode::Video {
            video_id,
            width: size.width,
            height: size.height,
        });
    }

    /// Unclosed spans become their opener text followed by what they held.
    fn finish(mut self) -> Vec<InlineNode> {
        while let Some(span) = self.open.pop() {
            self.push_text(span.opener);
            for child in span.children {
                self.push_node(child);
            }
        }
        self.root
    }
}
