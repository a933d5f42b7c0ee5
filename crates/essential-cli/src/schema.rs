//! # Schema Subcommand
//!
//! Prints the union schema the content loader registers for the
//! `essential` collection.

use anyhow::{Context, Result};
use clap::Args;

use essential_schema::{audit_closed_shapes, collection_schema};

/// Arguments for the `essential schema` subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Report object shapes that accept unknown fields instead of printing.
    #[arg(long)]
    pub audit: bool,
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs) -> Result<u8> {
    let schema = collection_schema();

    if !args.audit {
        let rendered =
            serde_json::to_string_pretty(&schema).context("failed to render collection schema")?;
        println!("{rendered}");
        return Ok(0);
    }

    let findings = audit_closed_shapes(&schema);
    if findings.is_empty() {
        println!("OK: all frame shapes are closed");
        return Ok(0);
    }

    println!("Open shapes: {}", findings.len());
    for finding in &findings {
        println!("{finding}");
    }
    Ok(1)
}
