//! Note storage

mod file;

pub use file::FileNoteStore;

use crate::error::Result;
use crate::models::{Note, NoteName};

/// Trait for note storage operations
///
/// Every operation runs to completion synchronously and reports failures
/// through [`crate::Error`] without retrying.
pub trait NoteStore: Send + Sync {
    /// Read the full text of a note
    fn get(&self, name: &NoteName) -> Result<String>;

    /// List every note in the store
    fn list(&self) -> Result<Vec<Note>>;

    /// Create a new note; fails with `AlreadyExists` instead of overwriting
    fn create(&self, name: &NoteName, text: &str) -> Result<()>;

    /// Replace the full text of an existing note
    fn update(&self, name: &NoteName, text: &str) -> Result<()>;

    /// Remove a note
    fn delete(&self, name: &NoteName) -> Result<()>;

    /// Check whether a note exists
    fn contains(&self, name: &NoteName) -> Result<bool>;
}
