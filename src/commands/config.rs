//! Config subcommands handler

use anyhow::Result;
use std::path::Path;

use castmirror::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Print where the configuration is read from.
#[cfg(not(tarpaulin_include))]
pub fn handle_path(path: &Path) -> Result<()> {
    let note = if path.exists() { "" } else { " (not present, using defaults)" };
    println!("{}{}", path.display(), note);
    Ok(())
}
