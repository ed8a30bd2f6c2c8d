//! # charm-cli — Charm Metadata Command-Line Interface
//!
//! Provides the `charm` binary, a thin front end over `charm-meta`.
//!
//! ## Subcommands
//!
//! - `charm validate`: decode and validate one or more `metadata.yaml` files.
//! - `charm normalize`: print the compact re-encoded form, or the typed
//!   record as JSON.
//! - `charm hooks`: list every hook name the charm may implement.
//!
//! ```bash
//! charm validate mysql/metadata.yaml wordpress/metadata.yaml
//! charm normalize mysql/metadata.yaml --json
//! charm -v hooks mysql/metadata.yaml
//! ```
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `charm-meta`; no metadata rules live here.

pub mod hooks;
pub mod normalize;
pub mod validate;

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use charm_meta::Meta;

/// Open `path` and decode it as charm metadata.
pub fn load_meta(path: &Path) -> Result<Meta> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let meta = charm_meta::read_meta(file)
        .with_context(|| format!("invalid charm metadata in {}", path.display()))?;
    tracing::debug!(path = %path.display(), charm = %meta.name, "loaded metadata");
    Ok(meta)
}
