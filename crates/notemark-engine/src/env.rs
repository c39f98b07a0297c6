//! Collaborators the parser calls out to.
//!
//! The pipeline never does I/O of its own. Everything it needs to know about
//! other notes, and the formula typesetter, comes in through an
//! [`Environment`] supplied by the caller.

use std::fmt;

use crate::models::NoteId;

/// Default width, in pixels, of the column notes are rendered into.
pub const DEFAULT_CONTENT_WIDTH: u32 = 588;

/// Read access to the notes known to the application.
pub trait NoteLookup: Send + Sync {
    /// Resolves a note title to its id.
    fn resolve_title(&self, title: &str) -> Option<NoteId>;

    /// Source text of an already loaded note.
    fn note_body(&self, id: &NoteId) -> Option<&str>;
}

/// A lookup that knows no notes; every note link dangles.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNotes;

impl NoteLookup for NoNotes {
    fn resolve_title(&self, _title: &str) -> Option<NoteId> {
        None
    }

    fn note_body(&self, _id: &NoteId) -> Option<&str> {
        None
    }
}

/// Formula typesetting.
///
/// Implementations must not fail: on a malformed expression they still
/// return best-effort HTML, which may be unbalanced.
pub trait MathTypesetter: Send + Sync {
    fn typeset(&self, expression: &str, display: bool) -> String;
}

/// Typesetter used when no formula renderer is available. Shows the
/// escaped expression inside a marker span.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderMath;

impl MathTypesetter for PlaceholderMath {
    fn typeset(&self, expression: &str, display: bool) -> String {
        let mode = if display { "display" } else { "inline" };
        format!(
            "<span>{{{mode} math: {}}}</span>",
            html_escape::encode_text(expression)
        )
    }
}

/// Everything a parse may consult besides its own source.
#[derive(Clone, Copy)]
pub struct Environment<'a> {
    pub notes: &'a dyn NoteLookup,
    pub math: &'a dyn MathTypesetter,
    pub content_width: u32,
}

impl<'a> Environment<'a> {
    pub fn new(notes: &'a dyn NoteLookup, math: &'a dyn MathTypesetter) -> Self {
        Self {
            notes,
            math,
            content_width: DEFAULT_CONTENT_WIDTH,
        }
    }

    pub fn with_content_width(mut self, content_width: u32) -> Self {
        self.content_width = content_width;
        self
    }
}

impl fmt::Debug for Environment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("content_width", &self.content_width)
            .finish_non_exhaustive()
    }
}

impl Environment<'static> {
    /// No notes, placeholder math, default width.
    pub fn standalone() -> Self {
        Self::new(&NoNotes, &PlaceholderMath)
    }
}
