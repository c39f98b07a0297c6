use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::NoteId;

/// File extension of note files when none is configured.
pub const NOTE_EXTENSION: &str = "note";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Note not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
}

/// Path of a note file relative to the notes directory.
pub fn note_path(id: &NoteId, extension: &str) -> RelativePathBuf {
    RelativePath::new(id.as_str()).with_extension(extension)
}

/// Read the source of a note
pub fn read_note(notes_root: &Path, id: &NoteId, extension: &str) -> Result<String, IoError> {
    let absolute_path = note_path(id, extension).to_path(notes_root);
    if !absolute_path.is_file() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Scan for note files in the notes directory
pub fn scan_note_files(notes_root: &Path, extension: &str) -> Result<Vec<PathBuf>, IoError> {
    if !notes_root.exists() {
        return Err(IoError::InvalidNotesDir(
            "notes directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, extension, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(
    dir: &Path,
    extension: &str,
    files: &mut Vec<PathBuf>,
) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, extension, files)?;
        } else if let Some(ext) = path.extension()
            && ext == extension
        {
            files.push(path);
        }
    }

    Ok(())
}

/// Id of the note stored at `path`: its path below `notes_root` with the
/// extension removed. `None` for paths outside the notes directory.
pub fn note_id_for(notes_root: &Path, path: &Path) -> Option<NoteId> {
    let relative = path.strip_prefix(notes_root).ok()?;
    let relative = RelativePathBuf::from_path(relative).ok()?;
    let id = relative.with_extension("");
    Some(NoteId::new(id.as_str()))
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidNotesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_file, create_test_notes_dir};

    #[test]
    fn test_scan_finds_nested_notes_only() {
        // Given a notes directory with notes, nested notes and other files
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "garden.note", "# Garden");
        create_test_file(&notes_dir, "projects/shed.note", "# Shed");
        create_test_file(&notes_dir, "photo.png", "fake image data");

        // When scanning for notes
        let files = scan_note_files(notes_dir.path(), NOTE_EXTENSION).unwrap();

        // Then only the note files are found, sorted
        let ids: Vec<_> = files
            .iter()
            .filter_map(|f| note_id_for(notes_dir.path(), f))
            .collect();
        assert_eq!(ids, vec![NoteId::new("garden"), NoteId::new("projects/shed")]);
    }

    #[test]
    fn test_scan_missing_directory() {
        let result = scan_note_files(Path::new("/this/path/does/not/exist"), NOTE_EXTENSION);
        assert!(result.unwrap_err().to_string().contains("notes directory"));
    }

    #[test]
    fn test_read_note_by_id() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "projects/shed.note", "# Shed\nwood\n");

        let content = read_note(notes_dir.path(), &NoteId::new("projects/shed"), NOTE_EXTENSION).unwrap();
        assert_eq!(content, "# Shed\nwood\n");
    }

    #[test]
    fn test_read_missing_note() {
        let notes_dir = create_test_notes_dir();
        let result = read_note(notes_dir.path(), &NoteId::new("nowhere"), NOTE_EXTENSION);
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_note_path_uses_extension() {
        assert_eq!(note_path(&NoteId::new("a/b"), "txt").as_str(), "a/b.txt");
    }

    #[test]
    fn test_validate_notes_dir() {
        let notes_dir = create_test_notes_dir();
        assert!(validate_notes_dir(notes_dir.path()).is_ok());
        assert!(matches!(
            validate_notes_dir(Path::new("/nonexistent/path")),
            Err(IoError::InvalidNotesDir(_))
        ));
    }
}
