//! Request routing and handlers.
//!
//! Maps a request path to one of a fixed set of routes:
//!
//! | Path              | Response                                   |
//! |-------------------|--------------------------------------------|
//! | `/`               | front page (gemtext)                       |
//! | `/<id>`           | timed playback of recording `<id>`         |
//! | `/meta/<id>`      | recording metadata as JSON                 |
//! | `/robots.txt`     | crawler exclusion policy                   |
//! | `/source`         | index of this program's source files       |
//! | `/source/<file>`  | one embedded source file                   |
//!
//! Recording ids are numeric path segments. Any failure to produce a
//! recording (retrieval, format, or nothing to play) is answered with
//! "not found".

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::asciicast::Cast;
use crate::error::CastError;
use crate::playback;
use crate::server::response::{ANSI, GEMTEXT, JSON, PLAIN};
use crate::server::Response;
use crate::source::CastSource;

const ROBOTS: &str = "User-agent: *\nDisallow: /\n";

/// Source files served under `/source`.
const SOURCE_FILES: &[(&str, &str)] = &[
    ("Cargo.toml", include_str!("../Cargo.toml")),
    ("src/lib.rs", include_str!("lib.rs")),
    ("src/main.rs", include_str!("main.rs")),
    ("src/cli.rs", include_str!("cli.rs")),
    ("src/commands/mod.rs", include_str!("commands/mod.rs")),
    ("src/commands/serve.rs", include_str!("commands/serve.rs")),
    ("src/commands/play.rs", include_str!("commands/play.rs")),
    ("src/commands/meta.rs", include_str!("commands/meta.rs")),
    ("src/commands/config.rs", include_str!("commands/config.rs")),
    ("src/asciicast/mod.rs", include_str!("asciicast/mod.rs")),
    ("src/asciicast/types.rs", include_str!("asciicast/types.rs")),
    ("src/asciicast/reader.rs", include_str!("asciicast/reader.rs")),
    ("src/asciicast/error.rs", include_str!("asciicast/error.rs")),
    ("src/playback.rs", include_str!("playback.rs")),
    ("src/playback/cursor.rs", include_str!("playback/cursor.rs")),
    ("src/source.rs", include_str!("source.rs")),
    ("src/handlers.rs", include_str!("handlers.rs")),
    ("src/server.rs", include_str!("server.rs")),
    ("src/server/request.rs", include_str!("server/request.rs")),
    ("src/server/response.rs", include_str!("server/response.rs")),
    ("src/error.rs", include_str!("error.rs")),
    ("src/config/mod.rs", include_str!("config/mod.rs")),
    ("src/config/types.rs", include_str!("config/types.rs")),
    ("src/config/io.rs", include_str!("config/io.rs")),
];

/// A parsed request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Front,
    Robots,
    SourceIndex,
    SourceFile(String),
    Play(String),
    Meta(String),
}

impl Route {
    /// Match `path` against the route table; `None` means not found.
    pub fn parse(path: &str) -> Option<Self> {
        match path {
            "" | "/" => return Some(Route::Front),
            "/robots.txt" => return Some(Route::Robots),
            "/source" | "/source/" => return Some(Route::SourceIndex),
            _ => {}
        }

        if let Some(name) = path.strip_prefix("/source/") {
            return Some(Route::SourceFile(name.to_string()));
        }
        if let Some(id) = path.strip_prefix("/meta/") {
            return recording_id(id).map(Route::Meta);
        }
        path.strip_prefix('/')
            .and_then(recording_id)
            .map(Route::Play)
    }
}

fn recording_id(segment: &str) -> Option<String> {
    let numeric = !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit());
    numeric.then(|| segment.to_string())
}

/// Shared, read-only handler state.
pub struct App {
    source: Arc<dyn CastSource>,
    frame_interval: Duration,
    hostname: String,
}

impl App {
    pub fn new(source: Arc<dyn CastSource>, frame_interval: Duration) -> Self {
        Self {
            source,
            frame_interval,
            hostname: "localhost".to_string(),
        }
    }

    /// Host name used in the front page examples.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    /// Produce the response for a request path.
    pub async fn handle(&self, path: &str) -> Response {
        match Route::parse(path) {
            Some(Route::Front) => Response::text(GEMTEXT, self.front_page()),
            Some(Route::Robots) => Response::text(PLAIN, ROBOTS),
            Some(Route::SourceIndex) => Response::text(GEMTEXT, source_index()),
            Some(Route::SourceFile(name)) => source_file(&name),
            Some(Route::Play(id)) => self.play(&id).await,
            Some(Route::Meta(id)) => self.meta(&id).await,
            None => Response::not_found(),
        }
    }

    /// Fetch and parse recording `id`.
    pub async fn load(&self, id: &str) -> Result<Cast, CastError> {
        let raw = self.source.fetch_raw(id).await?;
        Ok(Cast::parse(&raw)?)
    }

    /// Stream recording `id` with its original timing.
    pub async fn play(&self, id: &str) -> Response {
        let cast = match self.load(id).await {
            Ok(cast) => cast,
            Err(e) => {
                warn!(id, error = %e, "recording unavailable");
                return Response::not_found();
            }
        };

        if cast.is_empty() {
            info!(id, "recording has no output");
            return Response::not_found();
        }

        info!(
            id,
            format = cast.format.version(),
            events = cast.events.len(),
            duration = cast.duration(),
            "starting playback"
        );
        Response::stream(ANSI, playback::schedule(cast.events, self.frame_interval))
    }

    /// Metadata of recording `id` as pretty-printed JSON.
    pub async fn meta(&self, id: &str) -> Response {
        let cast = match self.load(id).await {
            Ok(cast) => cast,
            Err(e) => {
                warn!(id, error = %e, "recording unavailable");
                return Response::not_found();
            }
        };

        if cast.metadata.is_empty() {
            return Response::not_found();
        }

        match serde_json::to_string_pretty(&cast.metadata) {
            Ok(json) => Response::text(JSON, json + "\n"),
            Err(e) => {
                warn!(id, error = %e, "failed to serialize metadata");
                Response::not_found()
            }
        }
    }

    fn front_page(&self) -> String {
        format!(
            "# Asciinema Gemini mirror\n\
             => https://asciinema.org/ Asciinema over HTTPS\n\
             \n\
             ## Usage\n\
             \n\
             Watch asciinema recordings from a streaming-capable client in an ANSI capable terminal. \
             Playback URLs are /<id>, for example:\n\
             \n\
             ```\n\
             gemget -o- gemini://{host}/22767\n\
             ```\n\
             \n\
             Some recordings only look right at the terminal size they were recorded with. \
             Fetch /meta/<id> for the original size and other details.\n\
             \n\
             To record and publish recordings, use the official asciinema CLI.\n\
             \n\
             ## About this site\n\
             \n\
             => /source Source code\n",
            host = self.hostname
        )
    }
}

fn source_index() -> String {
    let mut page = String::from("# Source code\n\n");
    for (name, _) in SOURCE_FILES {
        page.push_str(&format!("=> /source/{} {}\n", name, name));
    }
    page
}

fn source_file(name: &str) -> Response {
    SOURCE_FILES
        .iter()
        .find(|(file, _)| *file == name)
        .map(|(_, text)| Response::text(PLAIN, *text))
        .unwrap_or_else(Response::not_found)
}
