//! # Block Parsing
//!
//! Builds the block tree of a note from the block tokens of
//! `notemark_syntax::block`.
//!
//! ## Tree shape
//!
//! - **root**: the whole note; its first child is always the title heading
//! - **list** / **item**: containers opened by bullet or numbered markers
//! - **heading**, **paragraph**, **code**: leaves holding raw inline content
//!
//! ## Nesting
//!
//! Nesting is decided by margins (indentation). Before each structural
//! token the builder pops every open list the token does not continue:
//!
//! - a marker of the same kind at a list's margin is a sibling item
//! - anything indented past a list's margin continues that list; content
//!   lines join its last item, markers join it once they reach the item's
//!   content column and are siblings before that
//! - anything else closes the list
//!
//! Blank lines end paragraphs but never close containers.
//!
//! ## Modules
//!
//! - **`types`**: `BlockNode`, `BlockKind`, `ContainerFrame`
//! - **`builder`**: `BlockTreeBuilder` and the `parse_blocks` entry point
//! - **`code`**: dedent normalization of code block lines
//! - **`dump`**: stable text dump of a tree

pub mod builder;
pub mod code;
pub mod dump;
pub mod types;

pub use builder::{BlockTreeBuilder, parse_blocks, parse_note_title};
pub use code::dedent;
pub use dump::dump_tree;
pub use types::{BlockKind, BlockNode, ContainerFrame, ListKind};
