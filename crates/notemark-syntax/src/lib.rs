//! # notemark-syntax
//!
//! Tokenizers for note text, the markup language of the notes wiki.
//!
//! Note text is lexed in two independent phases:
//!
//! 1. The **block tokenizer** ([`block`]) reads whole lines and reports their
//!    structural role: a title, a list marker, a code line, a paragraph line.
//!    Indentation (the *margin*) is recorded on every token so the tree
//!    builder can decide nesting.
//! 2. The **inline lexer** ([`inline`]) reads the content of a single leaf
//!    block: text, whitespace, operators and backslash tags. The [`tag`]
//!    module parses tag attributes and content on top of it.
//!
//! Both phases share one set of character predicates ([`classify`]).
//!
//! ```
//! use notemark_syntax::block::{BlockTokenKind, tokenize};
//!
//! let kinds: Vec<_> = tokenize("# Groceries\n- eggs\n")
//!     .iter()
//!     .map(|t| t.kind)
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         BlockTokenKind::Title,
//!         BlockTokenKind::BulletMarker,
//!         BlockTokenKind::ParagraphLine,
//!         BlockTokenKind::End,
//!     ]
//! );
//! ```
//!
//! This crate does no I/O and builds no trees; see `notemark-engine` for the
//! block tree, tag rewriting and rendering.

pub mod block;
pub mod classify;
pub mod cursor;
pub mod inline;
pub mod tag;

pub use block::{BlockToken, BlockTokenKind, BlockTokenizer, Lookahead};
pub use inline::{InlineLexer, InlineToken, InlineTokenKind};
pub use tag::{ContentMode, TagAttributes, TagContent, TagInvocation};
