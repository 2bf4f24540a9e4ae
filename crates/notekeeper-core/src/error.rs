//! Error types for notekeeper-core

use thiserror::Error;

/// Result type alias using notekeeper-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in note store operations
#[derive(Error, Debug)]
pub enum Error {
    /// No backing file exists for the requested note
    #[error("Note not found: {0}")]
    NotFound(String),

    /// Create target already has a backing file
    #[error("Note already exists: {0}")]
    AlreadyExists(String),

    /// Invalid identifier or missing required field
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
