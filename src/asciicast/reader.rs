//! Cast file parser.
//!
//! Recordings come in two incompatible serializations and do not reliably
//! advertise which one they use, so the format is detected by structure:
//! each parser is a pure function that either accepts the whole payload or
//! reports why it does not fit, and they are tried in a fixed order.
//!
//! # Formats
//!
//! Version 1, a single JSON document with the frames embedded:
//!
//! ```text
//! {"version":1,"width":80,"height":24,"stdout":[[0.5,"Hello "],[0.3,"world!"]]}
//! ```
//!
//! Version 2, a header line followed by events with absolute timestamps:
//!
//! ```text
//! {"version":2,"width":80,"height":24}  <- Header (JSON object)
//! [0.5,"o","Hello "]                    <- Event (JSON array)
//! [0.6,"i","q"]                         <- Input, discarded
//! [0.8,"o","world!"]                    <- Event (JSON array)
//! ```
//!
//! Either form may additionally be gzip-compressed.
//!
//! # Example
//!
//! ```
//! use castmirror::Cast;
//!
//! let content = br#"{"version":2,"width":80,"height":24}
//! [0.1,"o","hello"]"#;
//! let cast = Cast::parse(content)?;
//! assert_eq!(cast.output(), "hello");
//! # Ok::<(), castmirror::FormatError>(())
//! ```

use std::borrow::Cow;
use std::io::Read;

use flate2::read::MultiGzDecoder;
use serde_json::Value;
use tracing::debug;

use super::error::{FormatError, ShapeError};
use super::types::{Cast, CastFormat, Direction, Metadata, OutputEvent};

/// Key holding the frame list in a version 1 document.
const STDOUT_KEY: &str = "stdout";

/// Gunzip `raw` if it is gzip data, otherwise hand it back untouched.
///
/// Any decompression failure means "was never compressed".
pub fn decompress(raw: &[u8]) -> Cow<'_, [u8]> {
    let mut decoder = MultiGzDecoder::new(raw);
    let mut inflated = Vec::new();
    match decoder.read_to_end(&mut inflated) {
        Ok(_) => Cow::Owned(inflated),
        Err(_) => Cow::Borrowed(raw),
    }
}

/// Parse a version 1 document into metadata and events.
///
/// The `stdout` key is removed from the document; everything else is
/// metadata. Each frame must be exactly `[delay, text]`.
pub fn parse_v1(text: &str) -> Result<(Metadata, Vec<OutputEvent>), ShapeError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ShapeError::Json(e.to_string()))?;
    let Value::Object(mut metadata) = value else {
        return Err(ShapeError::NotObject);
    };

    let frames = metadata
        .remove(STDOUT_KEY)
        .ok_or(ShapeError::MissingStdout)?;
    let Value::Array(frames) = frames else {
        return Err(ShapeError::StdoutNotArray);
    };

    let events = frames
        .iter()
        .enumerate()
        .map(|(index, frame)| {
            parse_frame(frame).map_err(|reason| ShapeError::BadFrame { index, reason })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((metadata, events))
}

fn parse_frame(frame: &Value) -> Result<OutputEvent, &'static str> {
    let pair = frame.as_array().ok_or("frame must be an array")?;
    if pair.len() != 2 {
        return Err("frame must have exactly 2 elements");
    }
    let delay = pair[0].as_f64().ok_or("frame delay must be a number")?;
    let text = pair[1].as_str().ok_or("frame data must be a string")?;
    Ok(OutputEvent::new(delay, text))
}

/// Parse a version 2 recording into metadata and events.
///
/// Only output (`"o"`) lines become events. Their delay is measured from the
/// previous output line, so input, markers and resizes in between do not
/// shift the timing. Any malformed line, blank ones included, rejects the
/// whole recording.
///
/// A header with no event lines at all is only accepted when it declares
/// `"version": 2`, so an arbitrary one-line JSON object is not mistaken for
/// an empty recording.
pub fn parse_v2(text: &str) -> Result<(Metadata, Vec<OutputEvent>), ShapeError> {
    let mut lines = text.lines().enumerate();

    let (_, header_line) = lines.next().ok_or(ShapeError::Empty)?;
    let header: Value =
        serde_json::from_str(header_line).map_err(|e| ShapeError::Json(e.to_string()))?;
    let Value::Object(metadata) = header else {
        return Err(ShapeError::NotObject);
    };

    let mut events = Vec::new();
    let mut event_lines = 0usize;
    let mut last_output = 0.0;

    for (index, line) in lines {
        event_lines += 1;

        let bad_line = |reason: String| ShapeError::BadLine {
            line: index + 1,
            reason,
        };

        if let Some((time, text)) = parse_event_line(line).map_err(bad_line)? {
            events.push(OutputEvent::new(time - last_output, text));
            last_output = time;
        }
    }

    if event_lines == 0 && metadata.get("version").and_then(Value::as_u64) != Some(2) {
        return Err(ShapeError::NotV2);
    }

    Ok((metadata, events))
}

/// Parse one `[time, code, data]` line.
///
/// Returns `Ok(None)` for well-formed lines that are not terminal output.
fn parse_event_line(line: &str) -> Result<Option<(f64, String)>, String> {
    let value: Value = serde_json::from_str(line).map_err(|e| format!("invalid JSON: {}", e))?;
    let arr = value.as_array().ok_or("event must be a JSON array")?;

    if arr.len() != 3 {
        return Err(format!("event must have 3 elements, got {}", arr.len()));
    }

    let time = arr[0].as_f64().ok_or("event time must be a number")?;
    let code = arr[1].as_str().ok_or("event type must be a string")?;

    if Direction::from_code(code) != Some(Direction::Output) {
        return Ok(None);
    }

    let data = arr[2].as_str().ok_or("output data must be a string")?;
    Ok(Some((time, data.to_string())))
}

impl Cast {
    /// Parse raw recording bytes, compressed or not, in either format.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::NotUtf8`] if the (decompressed) payload is not
    /// text, and [`FormatError::Unrecognized`] with both rejection reasons if
    /// neither format fits.
    pub fn parse(raw: &[u8]) -> Result<Self, FormatError> {
        let bytes = decompress(raw).into_owned();
        let text = String::from_utf8(bytes)?;
        Self::parse_str(&text)
    }

    /// Parse an already decompressed recording.
    pub fn parse_str(text: &str) -> Result<Self, FormatError> {
        let v1 = match parse_v1(text) {
            Ok((metadata, events)) => {
                return Ok(Cast {
                    format: CastFormat::V1,
                    metadata,
                    events,
                })
            }
            Err(reason) => reason,
        };
        debug!(reason = %v1, "not a v1 recording, trying v2");

        match parse_v2(text) {
            Ok((metadata, events)) => Ok(Cast {
                format: CastFormat::V2,
                metadata,
                events,
            }),
            Err(v2) => Err(FormatError::Unrecognized { v1, v2 }),
        }
    }
}
