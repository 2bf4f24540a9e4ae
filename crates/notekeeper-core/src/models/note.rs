//! Note model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Longest accepted note name in bytes, matching the usual filename limit.
pub const MAX_NAME_LEN: usize = 255;

/// Filename prefix reserved for the store's in-flight temporary files.
pub const RESERVED_PREFIX: &str = ".notekeeper-";

/// A validated note identifier.
///
/// The name doubles as the filename of the note inside the storage root, so
/// it must be a single, non-special path segment. Construction goes through
/// [`NoteName::parse`], which rejects anything that could escape the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteName(String);

impl NoteName {
    /// Validate and wrap a note name
    ///
    /// # Examples
    ///
    /// ```
    /// use notekeeper_core::NoteName;
    ///
    /// assert!(NoteName::parse("groceries").is_ok());
    /// assert!(NoteName::parse("../secret").is_err());
    /// ```
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validate_name(&value)?;
        Ok(Self(value))
    }

    /// Get the string representation of this name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate_name(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_input("Note name cannot be empty"));
    }
    if value == "." || value == ".." {
        return Err(Error::invalid_input(format!(
            "Note name cannot be a directory reference: {value}"
        )));
    }
    if value.len() > MAX_NAME_LEN {
        return Err(Error::invalid_input(format!(
            "Note name exceeds {MAX_NAME_LEN} bytes"
        )));
    }
    if let Some(separator) = value.chars().find(|c| matches!(c, '/' | '\\')) {
        return Err(Error::invalid_input(format!(
            "Note name cannot contain path separator '{separator}'"
        )));
    }
    if value.starts_with(RESERVED_PREFIX) {
        return Err(Error::invalid_input(format!(
            "Note name cannot start with reserved prefix {RESERVED_PREFIX}"
        )));
    }
    if value.chars().any(char::is_control) {
        return Err(Error::invalid_input(
            "Note name cannot contain control characters",
        ));
    }
    Ok(())
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NoteName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NoteName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<NoteName> for String {
    fn from(name: NoteName) -> Self {
        name.0
    }
}

impl AsRef<str> for NoteName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A note in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Identifier, also the backing filename
    pub name: NoteName,
    /// Full note content
    pub text: String,
}

impl Note {
    #[must_use]
    pub fn new(name: NoteName, text: impl Into<String>) -> Self {
        Self {
            name,
            text: text.into(),
        }
    }
}
