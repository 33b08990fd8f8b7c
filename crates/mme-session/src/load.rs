//! # File Loading
//!
//! Reads run outside the session and may finish in any order. Each load
//! is stamped with a [`LoadTicket`] when it starts; the session accepts a
//! completion only if nothing newer (another load, or an edit) has
//! happened since.

use std::path::Path;

use serde::Serialize;

use crate::error::SessionError;

/// Stamp identifying one in-flight load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub(crate) generation: u64,
}

/// What happened to a completed load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// The file contents replaced the document text.
    Applied,
    /// A newer load or edit overtook this one; state was left alone.
    Superseded,
    /// The read failed; state was left alone.
    Failed(String),
}

/// Decode file bytes as UTF-8, replacing malformed sequences with U+FFFD.
pub fn decode_document(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Read a document file asynchronously.
///
/// # Errors
///
/// Returns [`SessionError::Read`] if the file cannot be read.
pub async fn read_document(path: &Path) -> Result<String, SessionError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| SessionError::Read {
            path: path.display().to_string(),
            source,
        })?;
    Ok(decode_document(&bytes))
}
