//! Document state
//!
//! The single open document: its text, the file it belongs to (if any) and the text as it was
//! last loaded or saved.
//!
//! # Dirty tracking
//!
//! A document is dirty exactly when its text differs from the last loaded/saved text. The
//! comparison is structural, so typing a character and deleting it again leaves the document
//! clean, and undoing back to the saved state clears the flag without any bookkeeping.
//!
//! # Example
//!
//! ```rust
//! use pad_core::Document;
//!
//! let doc = Document::from_text("hello");
//! assert!(!doc.is_dirty());
//! assert_eq!(doc.display_name(), "Untitled");
//! assert_eq!(doc.title("Pad"), "Pad - Untitled");
//! ```

use crate::delta::EditDelta;
use crate::error::CommandError;
use ropey::Rope;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Document state snapshot for status displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
    /// Total line count
    pub line_count: usize,
    /// Total character count
    pub char_count: usize,
    /// Total byte count (UTF-8)
    pub byte_count: usize,
    /// Whether the text differs from the last saved text
    pub is_modified: bool,
    /// Associated file, if any
    pub path: Option<PathBuf>,
}

/// The open document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    text: Rope,
    source_path: Option<PathBuf>,
    last_saved: Rope,
}

impl Document {
    /// Create an empty, untitled document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an untitled document whose text counts as saved.
    pub fn from_text(text: &str) -> Self {
        let text = Rope::from_str(text);
        Self {
            last_saved: text.clone(),
            text,
            source_path: None,
        }
    }

    /// Create an empty document that will be saved to `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Read `path` and make it the current document.
    ///
    /// On failure the current document is left exactly as it was.
    pub fn load(&mut self, path: &Path) -> Result<(), CommandError> {
        let content = fs::read_to_string(path).map_err(|source| CommandError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

        self.text = Rope::from_str(&content);
        self.last_saved = self.text.clone();
        self.source_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Write the text to `path`, or to the current file when `path` is `None`.
    ///
    /// The text is written byte-for-byte as stored. On success the target becomes the
    /// document's file and the document is clean; on failure nothing changes.
    pub fn save(&mut self, path: Option<&Path>) -> Result<(), CommandError> {
        let target = match path {
            Some(path) => path.to_path_buf(),
            None => self.source_path.clone().ok_or(CommandError::MissingPath)?,
        };

        self.write_to(&target)
            .map_err(|source| CommandError::FileAccess {
                path: target.clone(),
                source,
            })?;

        self.last_saved = self.text.clone();
        self.source_path = Some(target);
        Ok(())
    }

    /// Write into a sibling temp file and rename it over `target`, so a failed write never
    /// leaves a truncated file behind.
    fn write_to(&self, target: &Path) -> std::io::Result<()> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)?;
        if let Ok(metadata) = fs::metadata(target) {
            temp.as_file().set_permissions(metadata.permissions())?;
        }

        let mut writer = BufWriter::new(temp.as_file_mut());
        self.text.write_to(&mut writer)?;
        writer.flush()?;
        drop(writer);
        temp.as_file().sync_all()?;

        temp.persist(target).map_err(|err| err.error)?;
        Ok(())
    }

    /// Whether the text differs from the last loaded/saved text.
    pub fn is_dirty(&self) -> bool {
        self.text != self.last_saved
    }

    /// Drop the text and the file association (File > New).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The text buffer.
    pub fn text(&self) -> &Rope {
        &self.text
    }

    /// The associated file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// File name shown to the user: the path's basename or `"Untitled"`.
    pub fn display_name(&self) -> String {
        self.source_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Window title, e.g. `"Pad - notes.txt"`.
    pub fn title(&self, app_name: &str) -> String {
        format!("{} - {}", app_name, self.display_name())
    }

    /// Snapshot for status displays.
    pub fn state(&self) -> DocumentState {
        DocumentState {
            line_count: self.text.len_lines(),
            char_count: self.text.len_chars(),
            byte_count: self.text.len_bytes(),
            is_modified: self.is_dirty(),
            path: self.source_path.clone(),
        }
    }

    /// Apply a delta. The caller guarantees `delta.deleted_text` is present at `delta.start`.
    pub(crate) fn apply(&mut self, delta: &EditDelta) {
        let deleted_len = delta.deleted_len();
        if deleted_len > 0 {
            self.text.remove(delta.start..delta.start + deleted_len);
        }
        if !delta.inserted_text.is_empty() {
            self.text.insert(delta.start, &delta.inserted_text);
        }
    }
}
