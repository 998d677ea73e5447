//! Play command handler

use anyhow::Result;
use futures::StreamExt;
use tokio::io::{self, AsyncWriteExt};
use tracing::info;

use castmirror::{playback, Config};

use super::load_cast;

/// Replay a recording to stdout, flushing every chunk as it comes due.
#[cfg(not(tarpaulin_include))]
pub async fn handle(target: &str, config: &Config) -> Result<()> {
    let cast = load_cast(target, config).await?;
    if cast.is_empty() {
        anyhow::bail!("Recording {} has no output to play", target);
    }

    info!(
        recording = target,
        events = cast.events.len(),
        duration = cast.duration(),
        "playing"
    );

    let mut stdout = io::stdout();
    let chunks = playback::schedule(cast.events, config.playback.frame_interval());
    futures::pin_mut!(chunks);
    while let Some(chunk) = chunks.next().await {
        stdout.write_all(chunk.as_bytes()).await?;
        stdout.flush().await?;
    }
    Ok(())
}
