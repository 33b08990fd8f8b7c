//! # Validate Subcommand
//!
//! Loads one file into an editor session and validates it, printing the
//! same messages the page shows in its result region.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use mme_schema::ModelSchema;
use mme_session::ValidationResult;

/// Arguments for the `mme validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Mapping file to validate.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when valid, 1 when invalid.
pub fn run_validate(args: &ValidateArgs, schema: Arc<ModelSchema>) -> Result<u8> {
    let mut session = crate::open_session(schema, &args.path)?;
    let result = session.validate();
    report(&mut std::io::stdout().lock(), &args.path, result)?;
    Ok(if result.is_valid() { 0 } else { 1 })
}

fn report(out: &mut impl Write, path: &Path, result: &ValidationResult) -> Result<()> {
    if result.is_valid() {
        writeln!(out, "OK: {}", path.display())?;
    } else {
        writeln!(out, "FAIL: {}", path.display())?;
        for message in result.messages() {
            writeln!(out, "  {message}")?;
        }
    }
    Ok(())
}
