//! Type definitions for parsed cast recordings.
//!
//! Both supported serialization formats are normalized into the same shape:
//! a free-form metadata document and an ordered list of output events with
//! relative delays.
//!
//! # Normalized Form
//!
//! ```text
//! metadata: {"version":2,"width":80,"height":24,"title":"demo"}
//! events:   (0.5, "Hello ") (0.3, "world!")
//! ```
//!
//! Each delay is the time elapsed since the previous output event, so a
//! recording can be replayed without reference to any wall-clock origin.

use serde_json::{Map, Value};

/// Recording metadata: every header field of the recording, passed through
/// verbatim.
pub type Metadata = Map<String, Value>;

// ============================================================================
// Event Types
// ============================================================================

/// Stream direction tag used by line-oriented (v2) recordings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Output (data written to terminal)
    Output, // "o"
    /// Input (data read from terminal)
    Input, // "i"
    /// Marker (annotation)
    Marker, // "m"
    /// Resize (terminal resize)
    Resize, // "r"
}

impl Direction {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "o" => Some(Direction::Output),
            "i" => Some(Direction::Input),
            "m" => Some(Direction::Marker),
            "r" => Some(Direction::Resize),
            _ => None,
        }
    }
}

/// A single terminal write.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputEvent {
    /// Seconds since the previous output event (never negative)
    pub delay: f64,
    /// Text written to the terminal
    pub text: String,
}

impl OutputEvent {
    /// Create an event, clamping negative delays to zero.
    pub fn new(delay: f64, text: impl Into<String>) -> Self {
        Self {
            delay: delay.max(0.0),
            text: text.into(),
        }
    }
}

// ============================================================================
// Cast
// ============================================================================

/// Which serialization format a recording was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastFormat {
    /// Single JSON document with an embedded `stdout` frame list
    V1,
    /// Header line followed by `[time, code, data]` event lines
    V2,
}

impl CastFormat {
    pub fn version(&self) -> u8 {
        match self {
            CastFormat::V1 => 1,
            CastFormat::V2 => 2,
        }
    }
}

/// A fully parsed recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Cast {
    pub format: CastFormat,
    pub metadata: Metadata,
    pub events: Vec<OutputEvent>,
}

impl Cast {
    /// True when the recording never wrote to the terminal.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total duration of the recording in seconds.
    pub fn duration(&self) -> f64 {
        self.events.iter().map(|e| e.delay).sum()
    }

    /// All output text concatenated in recording order.
    pub fn output(&self) -> String {
        self.events.iter().map(|e| e.text.as_str()).collect()
    }

    /// Terminal dimensions from the metadata, if recorded.
    ///
    /// Checks the top-level `width`/`height` fields first, then the nested
    /// `term.cols`/`term.rows` form used by newer recorders.
    pub fn terminal_size(&self) -> Option<(u64, u64)> {
        let top = self
            .metadata
            .get("width")
            .and_then(Value::as_u64)
            .zip(self.metadata.get("height").and_then(Value::as_u64));
        top.or_else(|| {
            let term = self.metadata.get("term")?;
            term.get("cols")
                .and_then(Value::as_u64)
                .zip(term.get("rows").and_then(Value::as_u64))
        })
    }

    /// Recording title from the metadata, if any.
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").and_then(Value::as_str)
    }
}
