//! Data models for Notekeeper

mod note;

pub use note::{Note, NoteName, MAX_NAME_LEN, RESERVED_PREFIX};
