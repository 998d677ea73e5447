//! Meta command handler

use anyhow::Result;

use castmirror::Config;

use super::load_cast;

/// Print a recording's metadata as pretty JSON.
#[cfg(not(tarpaulin_include))]
pub async fn handle(target: &str, config: &Config) -> Result<()> {
    let cast = load_cast(target, config).await?;
    if cast.metadata.is_empty() {
        anyhow::bail!("Recording {} has no metadata", target);
    }
    println!("{}", serde_json::to_string_pretty(&cast.metadata)?);
    Ok(())
}
