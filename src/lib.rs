//! castmirror library
//!
//! Parses asciinema recordings (v1 and v2, optionally gzip-compressed) and
//! replays their output with the original timing over a Gemini-style text
//! protocol.

pub mod asciicast;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod playback;
pub mod server;
pub mod source;

pub use asciicast::{Cast, CastFormat, FormatError, Metadata, OutputEvent};
pub use config::Config;
pub use error::CastError;
pub use handlers::App;
pub use source::{CastSource, DirSource, HttpSource, RetrievalError};
