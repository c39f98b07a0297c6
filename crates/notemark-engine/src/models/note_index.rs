use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::{Note, NoteId};
use crate::blocks::parse_note_title;
use crate::env::NoteLookup;
use crate::io::{self, IoError};

/// In-memory notes, looked up by id or by title.
#[derive(Debug, Default, Clone)]
pub struct NoteIndex {
    notes: BTreeMap<NoteId, Note>,
    titles: HashMap<String, NoteId>,
}

impl NoteIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a note. When another note already has the same title, the
    /// earlier one keeps it and the new note is only reachable by id.
    pub fn insert(&mut self, note: Note) {
        let taken_by = self
            .titles
            .get(&note.title)
            .filter(|existing| **existing != note.id)
            .cloned();
        match taken_by {
            Some(existing) => log::warn!(
                "duplicate note title '{}' in {existing} and {}, keeping {existing}",
                note.title,
                note.id
            ),
            None => {
                self.titles.insert(note.title.clone(), note.id.clone());
            }
        }
        self.notes.insert(note.id.clone(), note);
    }

    /// Loads every note below `notes_root`. Notes without a title line are
    /// skipped.
    pub fn from_notes_dir(notes_root: &Path, extension: &str) -> Result<Self, IoError> {
        let mut index = Self::new();
        for path in io::scan_note_files(notes_root, extension)? {
            let Some(id) = io::note_id_for(notes_root, &path) else {
                continue;
            };
            let body = std::fs::read_to_string(&path)?;
            match parse_note_title(&body) {
                Ok(title) => {
                    let title = title.to_string();
                    index.insert(Note::new(id, title, body));
                }
                Err(e) => log::warn!("skipping note {id}: {e}"),
            }
        }
        log::info!("indexed {} notes from {}", index.len(), notes_root.display());
        Ok(index)
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Notes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }
}

impl NoteLookup for NoteIndex {
    fn resolve_title(&self, title: &str) -> Option<NoteId> {
        self.titles.get(title).cloned()
    }

    fn note_body(&self, id: &NoteId) -> Option<&str> {
        self.notes.get(id).map(|note| note.body.as_str())
    }
}
