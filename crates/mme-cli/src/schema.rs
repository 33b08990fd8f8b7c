//! # Schema Subcommand
//!
//! Prints the schema the other subcommands validate against.

use anyhow::Result;
use clap::Args;
use mme_schema::ModelSchema;

/// Arguments for the `mme schema` subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Print on one line instead of pretty-printing.
    #[arg(long)]
    pub compact: bool,
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs, schema: &ModelSchema) -> Result<u8> {
    println!("{}", render(args, schema)?);
    Ok(0)
}

fn render(args: &SchemaArgs, schema: &ModelSchema) -> Result<String> {
    let text = if args.compact {
        serde_json::to_string(schema.schema())?
    } else {
        serde_json::to_string_pretty(schema.schema())?
    };
    Ok(text)
}
