use thiserror::Error;

/// A note whose block structure cannot be rendered at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("note must start with a title heading")]
    MissingTitle,

    #[error("only the note title can have heading level 1, found '{title}'")]
    ExtraTitle { title: String },
}

/// Failure reported by a tag handler during the tag-rewrite pass.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("can't find note with title '{0}'")]
    NoteNotFound(String),

    #[error("tag '{0}' needs content")]
    MissingContent(String),

    #[error("note '{title}' is malformed: {source}")]
    MalformedNote {
        title: String,
        #[source]
        source: StructureError,
    },

    #[error("{0}")]
    Custom(String),
}
