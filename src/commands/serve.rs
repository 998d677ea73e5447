//! Serve command handler

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use castmirror::{server, source, App, Config};

use super::apply_dir_override;

/// Command-line overrides for the `[server]`, `[source]` and `[playback]` sections.
#[derive(Debug, Default)]
pub struct ServeOverrides {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub dir: Option<String>,
    pub frame_interval_ms: Option<u64>,
}

impl ServeOverrides {
    pub fn apply(self, config: &mut Config) {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ms) = self.frame_interval_ms {
            config.playback.frame_interval_ms = ms;
        }
        apply_dir_override(config, self.dir);
    }
}

/// Bind the listener and serve until Ctrl+C.
#[cfg(not(tarpaulin_include))]
pub async fn handle(mut config: Config, overrides: ServeOverrides) -> Result<()> {
    overrides.apply(&mut config);
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;

    let source = source::from_config(&config.source)?;
    let app = App::new(source, config.playback.frame_interval())
        .with_hostname(config.server.hostname.clone());

    let address = config.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tokio::select! {
        _ = server::run(listener, Arc::new(app), config.server.read_timeout()) => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl+C")?;
            info!("shutting down");
        }
    }
    Ok(())
}
