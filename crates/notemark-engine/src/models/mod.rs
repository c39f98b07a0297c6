pub mod note;
pub mod note_index;

pub use note::{Note, NoteId};
pub use note_index::NoteIndex;
