use std::fmt;

use crate::models::NoteId;

/// Where a navigation leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NavigationTarget {
    Note(NoteId),
    /// Something that is not a note file, such as a tag page or a search.
    VirtualEntity(String),
}

/// A request, produced by rendered content, to move to another target.
///
/// Intents are collected while rendering and only acted on by the host
/// once `requested` is set, for example when the user follows a link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavigationIntent {
    pub target: NavigationTarget,
    pub requested: bool,
}

impl NavigationIntent {
    pub fn open_note(id: NoteId) -> Self {
        Self {
            target: NavigationTarget::Note(id),
            requested: false,
        }
    }

    pub fn open_virtual_entity(id: impl Into<String>) -> Self {
        Self {
            target: NavigationTarget::VirtualEntity(id.into()),
            requested: false,
        }
    }

    pub fn request(mut self) -> Self {
        self.requested = true;
        self
    }
}

impl fmt::Display for NavigationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            NavigationTarget::Note(id) => write!(f, "open note {id}"),
            NavigationTarget::VirtualEntity(id) => write!(f, "open virtual entity {id}"),
        }
    }
}
