use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoirError {
    #[error("Invalid note: {0}")]
    Validation(String),

    #[error("Invalid note type: {0}. Valid types: PROJECT, INFRA, PERSONAL")]
    InvalidNoteType(String),

    #[error("Note with ID {0} not found.")]
    NoteNotFound(u64),

    #[error("Refusing to delete without confirmation. Use --force in non-interactive mode.")]
    ConfirmationRequired,

    #[error("Corrupt note store {}: {reason}", path.display())]
    CorruptStore { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NoirError>;
