//! # Tag Rewriting
//!
//! Registered tags run before inline parsing, over the raw content of every
//! heading and paragraph. A handler can keep its tag, replace the source it
//! consumed, or replace its whole block with new blocks.
//!
//! A failing handler never fails the note: its tag is replaced by an error
//! marker and the failure is logged.

pub mod builtins;
pub mod registry;
pub mod rewrite;

pub use builtins::{MathTag, SummaryTag};
pub use registry::{TagContext, TagHandler, TagOutcome, TagRegistry};
pub use rewrite::apply_user_tags;
