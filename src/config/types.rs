//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::source::ID_PLACEHOLDER;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Listener configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the listener to
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Host name shown in the front page examples
    #[serde(default = "default_hostname")]
    pub hostname: String,
    /// How long a client may take to send its request line
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
}

pub fn default_bind() -> String {
    "127.0.0.1".to_string()
}

pub fn default_port() -> u16 {
    1965
}

pub fn default_hostname() -> String {
    "localhost".to_string()
}

pub fn default_read_timeout() -> u64 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            hostname: default_hostname(),
            read_timeout_secs: default_read_timeout(),
        }
    }
}

impl ServerConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// `bind:port` as accepted by `TcpListener::bind`
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// Where recordings are fetched from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Download URL with `{id}` standing in for the recording id
    #[serde(default = "default_url_template")]
    pub url_template: String,
    /// Serve `<id>.cast` files from this directory instead of downloading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    #[serde(default = "default_source_timeout")]
    pub timeout_secs: u64,
}

pub fn default_url_template() -> String {
    "https://asciinema.org/a/{id}.cast".to_string()
}

pub fn default_source_timeout() -> u64 {
    10
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url_template: default_url_template(),
            directory: None,
            timeout_secs: default_source_timeout(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Expand ~ in the recordings directory path
    pub fn directory_path(&self) -> Option<PathBuf> {
        let dir = self.directory.as_deref()?;
        if let Some(stripped) = dir.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return Some(home.join(stripped));
            }
        }
        Some(PathBuf::from(dir))
    }
}

/// Playback pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Minimum spacing between chunks written to a client
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
}

pub fn default_frame_interval() -> u64 {
    100
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval(),
        }
    }
}

impl PlaybackConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
}

pub fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Check values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), String> {
        if self.playback.frame_interval_ms == 0 {
            return Err("playback.frame_interval_ms must be greater than 0".to_string());
        }
        if self.source.directory.is_none() && !self.source.url_template.contains(ID_PLACEHOLDER) {
            return Err(format!(
                "source.url_template must contain {}",
                ID_PLACEHOLDER
            ));
        }
        if self.server.read_timeout_secs == 0 {
            return Err("server.read_timeout_secs must be greater than 0".to_string());
        }
        if self.source.timeout_secs == 0 {
            return Err("source.timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}
