//! # mme CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mme_cli::export::{run_export, ExportArgs};
use mme_cli::schema::{run_schema, SchemaArgs};
use mme_cli::validate::{run_validate, ValidateArgs};

/// FHIRConnect model mapping editor.
///
/// Validates model mapping documents against the model mapping schema
/// and exports them as model.json.
#[derive(Parser, Debug)]
#[command(name = "mme", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Schema file to use instead of the bundled model mapping schema.
    #[arg(long, global = true, env = "MME_SCHEMA_PATH")]
    schema: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a mapping file against the schema.
    Validate(ValidateArgs),

    /// Write a mapping file out as model.json.
    Export(ExportArgs),

    /// Print the active schema.
    Schema(SchemaArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let schema = match mme_cli::load_schema(cli.schema.as_deref()) {
        Ok(schema) => schema,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, schema),
        Commands::Export(args) => run_export(&args, schema),
        Commands::Schema(args) => run_schema(&args, &schema),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
