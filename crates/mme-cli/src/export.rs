//! # Export Subcommand
//!
//! Writes a mapping file out as `model.json`. By default the text is
//! copied verbatim, parse errors and all; `--reformat` first sends it
//! through the form path, which re-serializes with two-space indentation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use mme_schema::ModelSchema;

/// Arguments for the `mme export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Mapping file to export.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Directory to write model.json into.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Re-serialize through the form view before writing.
    #[arg(long)]
    pub reformat: bool,
}

/// Execute the export subcommand.
pub fn run_export(args: &ExportArgs, schema: Arc<ModelSchema>) -> Result<u8> {
    let mut session = crate::open_session(schema, &args.path)?;

    if args.reformat {
        let value: serde_json::Value = match serde_json::from_str(session.text()) {
            Ok(value) => value,
            Err(e) => bail!("cannot reformat {}: {e}", args.path.display()),
        };
        session.set_from_form(&value)?;
    }

    let export = session.download();
    let written = export
        .write_into(&args.output_dir)
        .with_context(|| format!("failed to write into {}", args.output_dir.display()))?;

    tracing::info!(path = %written.display(), bytes = export.contents.len(), "exported");
    println!("{}", written.display());
    Ok(0)
}
