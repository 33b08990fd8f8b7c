//! # mme-session - Editor Session
//!
//! The single owner of an edited model mapping document. A session holds
//! three pieces of state and nothing else:
//!
//! - **Document text**: the canonical JSON text. Replaced verbatim by code
//!   edits and file loads, or by re-serialized form output.
//! - **View mode**: whether the code view or the form view is mounted.
//!   Switching never touches the text.
//! - **Validation result**: `unknown`, `valid`, or `invalid` with one message
//!   per problem. Computed only by [`EditorSession::validate`] and reset to
//!   `unknown` by every text mutation, so a result always describes the
//!   current text.
//!
//! The form view never reads the text directly. It is handed a snapshot
//! from [`derive_form_snapshot`], which falls back to `{}` when the text
//! does not parse.
//!
//! ## File Loads
//!
//! Loading is the only asynchronous operation. A load takes a
//! [`LoadTicket`] before reading and presents it on completion; a
//! completion whose ticket was overtaken by a newer load or by an edit is
//! dropped as [`LoadOutcome::Superseded`].
//!
//! ## Crate Policy
//!
//! - The session is plain data plus a shared [`mme_schema::ModelSchema`];
//!   callers decide how to share it (the API wraps it in a lock).
//! - No `.unwrap()` outside tests.

pub mod error;
pub mod export;
pub mod load;
pub mod mode;
pub mod session;
pub mod snapshot;
pub mod validation;

pub use error::SessionError;
pub use export::{Export, EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};
pub use load::{decode_document, read_document, LoadOutcome, LoadTicket};
pub use mode::ViewMode;
pub use session::{EditorSession, INITIAL_TEXT};
pub use snapshot::{derive_form_snapshot, is_truthy};
pub use validation::ValidationResult;
