//! Cast recording parser
//!
//! This module turns raw asciinema recordings into a uniform stream of
//! output events, whichever of the two supported formats (and whether or
//! not gzip compression) was used to store them.
//!
//! # Structure
//!
//! - `types` - Normalized recording representation
//! - `reader` - Format detection and parsing
//! - `error` - Parse failure reasons

mod error;
mod reader;
mod types;

pub use error::{FormatError, ShapeError};
pub use reader::{decompress, parse_v1, parse_v2};
pub use types::{Cast, CastFormat, Direction, Metadata, OutputEvent};
