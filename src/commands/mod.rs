//! Command handlers for the castmirror CLI.
//!
//! Each submodule handles one subcommand; dispatch lives in main.rs.

pub mod config;
pub mod meta;
pub mod play;
pub mod serve;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use castmirror::{source, Cast, CastSource, Config};

/// Point the source at `dir` when one was given on the command line.
pub fn apply_dir_override(config: &mut Config, dir: Option<String>) {
    if let Some(dir) = dir {
        config.source.directory = Some(dir);
    }
}

/// Load a recording named on the command line.
///
/// An existing file path is read directly; anything else is treated as a
/// recording id and fetched from the configured source.
pub async fn load_cast(target: &str, config: &Config) -> Result<Cast> {
    let path = PathBuf::from(target);
    if path.is_file() {
        return load_file(&path).await;
    }

    let source = source::from_config(&config.source)?;
    let raw = source.fetch_raw(target).await?;
    Cast::parse(&raw).with_context(|| format!("Recording {} is not a valid cast", target))
}

async fn load_file(path: &Path) -> Result<Cast> {
    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Cast::parse(&raw).with_context(|| format!("{} is not a valid cast", path.display()))
}
