//! Directory-backed note store: one file per note

use std::fs::{self, Metadata};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::error::{Error, Result};
use crate::models::{Note, NoteName, RESERVED_PREFIX};
use crate::store::NoteStore;

/// `NoteStore` implementation over a directory of plain files
///
/// The filename is the note name and the file content is the note text.
/// The directory listing is the only index. Only regular files count as
/// notes; directories and symlinks in the root are never followed.
///
/// Writes go to a temporary file in the root (named with
/// [`RESERVED_PREFIX`], which no note name may use) and are moved into place
/// with a single rename, so a failed write never leaves a truncated note.
#[derive(Debug, Clone)]
pub struct FileNoteStore {
    root: PathBuf,
}

impl FileNoteStore {
    /// Open a store over an existing directory. The directory is never created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let metadata = fs::metadata(&root)?;
        if !metadata.is_dir() {
            return Err(Error::invalid_input(format!(
                "Storage root is not a directory: {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    /// Get the storage root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn note_path(&self, name: &NoteName) -> PathBuf {
        self.root.join(name.as_str())
    }

    /// Resolve the backing file of a note without following symlinks.
    fn note_file(&self, name: &NoteName) -> Result<(PathBuf, Metadata)> {
        let path = self.note_path(name);
        match fs::symlink_metadata(&path) {
            Ok(metadata) if metadata.is_file() => Ok((path, metadata)),
            Ok(_) => Err(Error::NotFound(name.to_string())),
            Err(error) => Err(missing_note(error, name)),
        }
    }

    /// Write `text` into a synced temporary file inside the root.
    fn staged(&self, text: &str) -> io::Result<NamedTempFile> {
        let mut temp = Builder::new()
            .prefix(RESERVED_PREFIX)
            .tempfile_in(&self.root)?;
        temp.write_all(text.as_bytes())?;
        temp.as_file().sync_all()?;
        Ok(temp)
    }
}

impl NoteStore for FileNoteStore {
    fn get(&self, name: &NoteName) -> Result<String> {
        let (path, _) = self.note_file(name)?;
        let bytes = fs::read(path).map_err(|error| missing_note(error, name))?;
        Ok(decode_text(bytes))
    }

    fn list(&self) -> Result<Vec<Note>> {
        let mut notes = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            // Skips non-UTF-8 filenames and in-flight temporary files.
            let Some(name) = entry
                .file_name()
                .to_str()
                .and_then(|name| NoteName::parse(name).ok())
            else {
                continue;
            };

            match fs::read(entry.path()) {
                Ok(bytes) => notes.push(Note::new(name, decode_text(bytes))),
                // Deleted between enumeration and read.
                Err(error) if error.kind() == io::ErrorKind::NotFound => {}
                Err(error) => return Err(error.into()),
            }
        }

        notes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(notes)
    }

    fn create(&self, name: &NoteName, text: &str) -> Result<()> {
        let path = self.note_path(name);
        let temp = self.staged(text)?;

        // Atomic create-if-absent; the temporary file is removed on failure.
        match temp.persist_noclobber(&path) {
            Ok(_) => Ok(()),
            Err(error) if error.error.kind() == io::ErrorKind::AlreadyExists => {
                if self.note_file(name).is_ok() {
                    Err(Error::AlreadyExists(name.to_string()))
                } else {
                    Err(Error::invalid_input(format!(
                        "Note name is taken by a non-note entry: {name}"
                    )))
                }
            }
            Err(error) => Err(error.error.into()),
        }
    }

    fn update(&self, name: &NoteName, text: &str) -> Result<()> {
        let (path, metadata) = self.note_file(name)?;
        let temp = self.staged(text)?;
        temp.as_file().set_permissions(metadata.permissions())?;
        temp.persist(&path).map_err(|error| Error::Io(error.error))?;
        Ok(())
    }

    fn delete(&self, name: &NoteName) -> Result<()> {
        let (path, _) = self.note_file(name)?;
        fs::remove_file(path).map_err(|error| missing_note(error, name))
    }

    fn contains(&self, name: &NoteName) -> Result<bool> {
        match self.note_file(name) {
            Ok(_) => Ok(true),
            Err(Error::NotFound(_)) => Ok(false),
            Err(error) => Err(error),
        }
    }
}

/// Decode note bytes, replacing invalid UTF-8 sequences with U+FFFD.
fn decode_text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|error| String::from_utf8_lossy(error.as_bytes()).into_owned())
}

fn missing_note(error: io::Error, name: &NoteName) -> Error {
    if error.kind() == io::ErrorKind::NotFound {
        Error::NotFound(name.to_string())
    } else {
        Error::Io(error)
    }
}
