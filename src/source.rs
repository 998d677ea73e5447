//! Recording retrieval
//!
//! Raw cast bytes are fetched per request and never cached. Two sources are
//! provided:
//! - [`HttpSource`]: downloads from a URL template (asciinema.org by default)
//! - [`DirSource`]: reads `<id>.cast` files from a local directory

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::config::SourceConfig;

/// Placeholder replaced by the recording id in URL templates.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Errors that can occur while fetching a recording.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("recording {id} not found")]
    NotFound { id: String },

    #[error("upstream returned HTTP {status} for recording {id}")]
    Status { id: String, status: u16 },

    #[error("request for recording {id} failed: {source}")]
    Http {
        id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read recording {id}: {source}")]
    Io {
        id: String,
        #[source]
        source: io::Error,
    },
}

/// Somewhere recordings can be fetched from by id.
#[async_trait]
pub trait CastSource: Send + Sync {
    /// Fetch the raw (possibly compressed) bytes of a recording.
    async fn fetch_raw(&self, id: &str) -> Result<Vec<u8>, RetrievalError>;
}

/// Build the source described by the configuration.
///
/// A configured directory takes precedence over the URL template.
pub fn from_config(config: &SourceConfig) -> anyhow::Result<Arc<dyn CastSource>> {
    if let Some(dir) = config.directory_path() {
        debug!(dir = %dir.display(), "serving recordings from directory");
        return Ok(Arc::new(DirSource::new(dir)));
    }
    let source = HttpSource::new(&config.url_template, config.timeout())?;
    Ok(Arc::new(source))
}

// ============================================================================
// HTTP
// ============================================================================

/// Fetches recordings over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url_template: String,
}

impl HttpSource {
    /// Create a source for `url_template`, where `{id}` marks the recording id.
    ///
    /// `timeout` bounds the whole request so a stalled upstream fails fast.
    pub fn new(url_template: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("castmirror/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url_template: url_template.into(),
        })
    }

    pub fn url_for(&self, id: &str) -> String {
        self.url_template.replace(ID_PLACEHOLDER, id)
    }
}

#[async_trait]
impl CastSource for HttpSource {
    async fn fetch_raw(&self, id: &str) -> Result<Vec<u8>, RetrievalError> {
        let url = self.url_for(id);
        debug!(%url, "fetching recording");

        let http_err = |source| RetrievalError::Http {
            id: id.to_string(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(http_err)?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(RetrievalError::NotFound { id: id.to_string() });
        }
        if !status.is_success() {
            return Err(RetrievalError::Status {
                id: id.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(http_err)?;
        debug!(%url, bytes = body.len(), "fetched recording");
        Ok(body.to_vec())
    }
}

// ============================================================================
// Local directory
// ============================================================================

/// Reads recordings from `<root>/<id>.cast`.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path for `id`, or `None` if the id is not a plain file name.
    pub fn path_for(&self, id: &str) -> Option<PathBuf> {
        let plain = !id.is_empty()
            && !id.starts_with('.')
            && !id.contains(['/', '\\']);
        plain.then(|| self.root.join(format!("{}.cast", id)))
    }
}

#[async_trait]
impl CastSource for DirSource {
    async fn fetch_raw(&self, id: &str) -> Result<Vec<u8>, RetrievalError> {
        let path = self
            .path_for(id)
            .ok_or_else(|| RetrievalError::NotFound { id: id.to_string() })?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(RetrievalError::NotFound { id: id.to_string() })
            }
            Err(source) => Err(RetrievalError::Io {
                id: id.to_string(),
                source,
            }),
        }
    }
}
