//! # Error Types
//!
//! Failures an editor session can surface. Parse errors and schema
//! violations are not errors here: they become a [`ValidationResult`].
//!
//! [`ValidationResult`]: crate::ValidationResult

use thiserror::Error;

/// Error raised by session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Form output could not be turned back into JSON text.
    #[error("form data could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A document file could not be read.
    #[error("cannot read '{path}': {source}")]
    Read {
        /// Path that was being read.
        path: String,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The schema could not be loaded or compiled.
    #[error(transparent)]
    Schema(#[from] mme_schema::SchemaError),
}
