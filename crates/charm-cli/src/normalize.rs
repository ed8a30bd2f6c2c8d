//! # Normalize Subcommand
//!
//! Prints a metadata file in its compact re-encoded form: defaults left
//! out, shorthand relations collapsed. With `--json` the typed record is
//! printed instead, every default spelled out.

use std::path::PathBuf;

use anyhow::{Context, Result};
use charm_meta::Meta;
use clap::Args;

/// Arguments for the `charm normalize` subcommand.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Metadata file to normalize.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Print the decoded record as JSON instead of YAML.
    #[arg(long)]
    pub json: bool,
}

/// Execute the normalize subcommand.
pub fn run_normalize(args: &NormalizeArgs) -> Result<u8> {
    let meta = crate::load_meta(&args.path)?;
    print!("{}", render(&meta, args.json)?);
    Ok(0)
}

/// Render `meta` as YAML, or as pretty JSON with a trailing newline.
pub fn render(meta: &Meta, json: bool) -> Result<String> {
    if json {
        let mut out =
            serde_json::to_string_pretty(meta).context("failed to serialize metadata as JSON")?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(meta.to_yaml()?)
    }
}
