//! # Hooks Subcommand
//!
//! Lists every hook a charm may implement, one per line, sorted.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

/// Arguments for the `charm hooks` subcommand.
#[derive(Args, Debug)]
pub struct HooksArgs {
    /// Metadata file to read.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Execute the hooks subcommand.
pub fn run_hooks(args: &HooksArgs) -> Result<u8> {
    let meta = crate::load_meta(&args.path)?;
    let hooks = meta.hooks();
    tracing::info!(charm = %meta.name, count = hooks.len(), "listing hooks");
    for hook in hooks {
        println!("{hook}");
    }
    Ok(0)
}
