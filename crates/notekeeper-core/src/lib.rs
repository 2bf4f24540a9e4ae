//! notekeeper-core - Core library for Notekeeper
//!
//! This crate contains the note model, identifier validation, and the
//! file-backed note store used by the HTTP service.

pub mod error;
pub mod models;
pub mod store;

pub use error::{Error, Result};
pub use models::{Note, NoteName};
pub use store::{FileNoteStore, NoteStore};
