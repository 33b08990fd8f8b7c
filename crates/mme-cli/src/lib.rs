//! # mme-cli - Model Mapping Editor from the Command Line
//!
//! Runs the same editor session the web page uses, one file at a time:
//!
//! ```bash
//! mme validate mappings/blood-pressure.json
//! mme export mappings/blood-pressure.json --reformat --output-dir out/
//! mme --schema my.schema.json schema
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; session semantics live in `mme-session`.
//! - Exit codes: 0 success, 1 validation failure, 2 operational error.

pub mod export;
pub mod schema;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use mme_schema::ModelSchema;
use mme_session::{EditorSession, LoadOutcome};

/// Compile the schema at `path`, or the bundled one.
pub fn load_schema(path: Option<&Path>) -> Result<Arc<ModelSchema>> {
    let schema = match path {
        Some(path) => ModelSchema::from_path(path)
            .with_context(|| format!("failed to load schema {}", path.display()))?,
        None => ModelSchema::bundled().context("failed to compile bundled schema")?,
    };
    tracing::debug!(schema = %schema.name(), "schema ready");
    Ok(Arc::new(schema))
}

/// Open a session over the contents of `path`.
pub fn open_session(schema: Arc<ModelSchema>, path: &Path) -> Result<EditorSession> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let mut session = EditorSession::new(schema);
    match runtime.block_on(session.load_file(path)) {
        LoadOutcome::Applied => Ok(session),
        LoadOutcome::Failed(reason) => bail!(reason),
        LoadOutcome::Superseded => bail!("load of {} was superseded", path.display()),
    }
}
