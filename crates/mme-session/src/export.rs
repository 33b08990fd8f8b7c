//! # Export
//!
//! The downloadable artifact: the current document text, byte for byte,
//! named `model.json`. Nothing is re-serialized or validated on the way
//! out, so malformed text exports as-is.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// File name of every export.
pub const EXPORT_FILE_NAME: &str = "model.json";

/// Content type of every export.
pub const EXPORT_CONTENT_TYPE: &str = "application/json";

/// A snapshot of the document ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Export {
    /// Always [`EXPORT_FILE_NAME`].
    pub file_name: &'static str,
    /// Always [`EXPORT_CONTENT_TYPE`].
    pub content_type: &'static str,
    /// Document text, verbatim.
    pub contents: String,
}

impl Export {
    pub(crate) fn new(contents: String) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME,
            content_type: EXPORT_CONTENT_TYPE,
            contents,
        }
    }

    /// `Content-Disposition` header value that triggers a save.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }

    /// Write the export into `dir`, replacing any existing `model.json`.
    pub fn write_into(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(self.file_name);
        std::fs::write(&path, self.contents.as_bytes())?;
        Ok(path)
    }
}
