//! # Inline Parsing
//!
//! Turns the raw inline content of a heading or paragraph into
//! [`InlineNode`]s.
//!
//! ## Markup
//!
//! - `\i{...}` and `\b{...}` open emphasis and strong spans, closed by `}`
//! - `\link{Title -> url}`, `\note{Note title#section}`
//! - `\code[lang]{...}` and `` `...` `` for inline code
//! - `\image[width=.., height=..]{path}`, `\youtube{url or id}`
//! - `\html{...}` for raw markup, `\math{...}` / `\Math{...}` for formulas
//!
//! Unknown tags and operators that close nothing are kept as literal text.
//!
//! ## Modules
//!
//! - **`parser`**: [`render_inline`]
//! - **`types`**: [`InlineNode`]
//! - **`kinds`**: per-tag helpers (link splitting, media sizing, video ids)

pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::render_inline;
pub use types::{InlineNode, walk_inline};
