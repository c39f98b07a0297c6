use std::collections::HashMap;
use std::fmt;

use notemark_syntax::tag::{self, ContentMode, TagInvocation};
use notemark_syntax::{InlineLexer, InlineToken};

use super::builtins::{MathTag, SummaryTag};
use crate::blocks::BlockNode;
use crate::env::Environment;
use crate::error::HandlerError;
use crate::inline::kinds::Math;

/// What a handler wants done with the tag it was called for.
#[derive(Debug, Clone, PartialEq)]
pub enum TagOutcome {
    /// Leave the source as it is and continue after the tag.
    Keep,
    /// Replace the consumed source span with this text.
    Replace(String),
    /// Replace the whole enclosing block with these blocks.
    Splice(Vec<BlockNode>),
}

/// What a handler sees while the tag-rewrite pass is stopped on its tag.
///
/// The lexer sits just after the tag name. Whatever the handler consumes
/// from it becomes the span that a [`TagOutcome::Replace`] substitutes.
pub struct TagContext<'c, 's> {
    lexer: &'c mut InlineLexer<'s>,
    tag: InlineToken<'s>,
    /// The document being rewritten, as it was before the pass.
    pub root: &'c BlockNode,
    /// The leaf block holding the tag.
    pub block: &'c BlockNode,
    pub env: Environment<'c>,
}

impl<'c, 's> TagContext<'c, 's> {
    pub fn new(
        lexer: &'c mut InlineLexer<'s>,
        tag: InlineToken<'s>,
        root: &'c BlockNode,
        block: &'c BlockNode,
        env: Environment<'c>,
    ) -> Self {
        Self {
            lexer,
            tag,
            root,
            block,
            env,
        }
    }

    pub fn name(&self) -> &'s str {
        self.tag.tag_name()
    }

    /// Parses the tag's attributes and content.
    pub fn parse(&mut self, mode: ContentMode) -> TagInvocation {
        tag::parse_tag(self.lexer, &self.tag, mode)
    }

    /// Direct access to the inline lexer for handlers with their own syntax.
    pub fn lexer(&mut self) -> &mut InlineLexer<'s> {
        self.lexer
    }
}

/// A user-defined tag.
pub trait TagHandler: Send + Sync {
    fn handle(&self, cx: &mut TagContext<'_, '_>) -> Result<TagOutcome, HandlerError>;
}

struct FnHandler<F>(F);

impl<F> TagHandler for FnHandler<F>
where
    F: Fn(&mut TagContext<'_, '_>) -> Result<TagOutcome, HandlerError> + Send + Sync,
{
    fn handle(&self, cx: &mut TagContext<'_, '_>) -> Result<TagOutcome, HandlerError> {
        (self.0)(cx)
    }
}

/// Tag handlers by tag name.
#[derive(Default)]
pub struct TagRegistry {
    handlers: HashMap<String, Box<dyn TagHandler>>,
}

impl TagRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with `math`, `Math` and `summary`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Math::INLINE_TAG, MathTag { display: false });
        registry.register(Math::DISPLAY_TAG, MathTag { display: true });
        registry.register(SummaryTag::TAG, SummaryTag);
        registry
    }

    /// Registers a handler, replacing any earlier one for the same name.
    pub fn register(&mut self, name: impl Into<String>, handler: impl TagHandler + 'static) {
        self.handlers.insert(name.into(), Box::new(handler));
    }

    pub fn register_fn<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&mut TagContext<'_, '_>) -> Result<TagOutcome, HandlerError> + Send + Sync + 'static,
    {
        self.register(name, FnHandler(handler));
    }

    pub fn get(&self, name: &str) -> Option<&dyn TagHandler> {
        self.handlers.get(name).map(Box::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("TagRegistry").field("tags", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered() {
        let registry = TagRegistry::with_builtins();
        for name in ["math", "Math", "summary"] {
            assert!(registry.contains(name), "{name}");
        }
        assert!(!registry.contains("note"));
        assert_eq!(
            format!("{registry:?}"),
            r#"TagRegistry { tags: ["Math", "math", "summary"] }"#
        );
    }

    #[test]
    fn later_registration_wins() {
        let mut registry = TagRegistry::new();
        registry.register_fn("x", |_| Ok(TagOutcome::Keep));
        registry.register_fn("x", |_| Ok(TagOutcome::Replace("y".into())));

        let root = BlockNode::root();
        let mut lexer = InlineLexer::new("\\x");
        let tag = lexer.next_token();
        let mut cx = TagContext::new(&mut lexer, tag, &root, &root, Environment::standalone());
        assert_eq!(cx.name(), "x");

        let handler = registry.get("x").unwrap();
        assert_eq!(handler.handle(&mut cx).unwrap(), TagOutcome::Replace("y".into()));
    }
}
