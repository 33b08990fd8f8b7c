//! # API Route Modules
//!
//! - `session` - the editor session: code view text, form view snapshot and
//!   submission, view mode, upload, download, validation.
//! - `schema` - the fixed model mapping schema the form view renders from.

pub mod schema;
pub mod session;
