//! # Validate Subcommand
//!
//! Decodes each given `metadata.yaml` and reports `OK` or `FAIL` per file.
//! Every file is checked even after a failure.

use std::path::{Path, PathBuf};

use anyhow::Result;
use charm_meta::MetaError;
use clap::Args;

/// Arguments for the `charm validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Metadata files to validate.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every file is valid, 1 otherwise.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let mut failed = 0usize;
    for path in &args.paths {
        match validate_path(path) {
            Ok(()) => println!("OK: {}", path.display()),
            Err(e) => {
                if !e.is_input_error() {
                    tracing::warn!(path = %path.display(), error = %e, "metadata could not be checked");
                }
                println!("FAIL: {} — {}", path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        println!(
            "\n{} of {} metadata file(s) failed validation.",
            failed,
            args.paths.len()
        );
        Ok(1)
    } else {
        Ok(0)
    }
}

/// Decode and validate a single file.
pub fn validate_path(path: &Path) -> Result<(), MetaError> {
    let file = std::fs::File::open(path)?;
    charm_meta::read_meta(file).map(|_| ())
}
