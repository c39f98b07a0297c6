pub mod blocks;
pub mod env;
pub mod error;
pub mod inline;
pub mod io;
pub mod models;
pub mod navigation;
pub mod render;
pub mod tags;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use blocks::{BlockKind, BlockNode, ListKind, dump_tree, parse_blocks, parse_note_title};
pub use env::{Environment, MathTypesetter, NoNotes, NoteLookup, PlaceholderMath};
pub use error::{HandlerError, StructureError};
pub use inline::{InlineNode, render_inline};
pub use io::*;
pub use models::{Note, NoteId, NoteIndex};
pub use navigation::{NavigationIntent, NavigationTarget};
pub use render::{HtmlElement, HtmlNode, NoteRenderer, RenderedNote, render_tree};
pub use tags::{TagContext, TagHandler, TagOutcome, TagRegistry, apply_user_tags};
