//! # charm CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use charm_cli::hooks::{run_hooks, HooksArgs};
use charm_cli::normalize::{run_normalize, NormalizeArgs};
use charm_cli::validate::{run_validate, ValidateArgs};

/// Charm metadata toolchain.
///
/// Validates `metadata.yaml` files, prints their normalized form, and
/// lists the hooks a charm may implement.
#[derive(Parser, Debug)]
#[command(name = "charm", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode and validate metadata files.
    Validate(ValidateArgs),

    /// Print a metadata file in normalized form.
    Normalize(NormalizeArgs),

    /// List the hooks a charm may implement.
    Hooks(HooksArgs),
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

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Normalize(args) => run_normalize(&args),
        Commands::Hooks(args) => run_hooks(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
