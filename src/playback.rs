//! Timed session playback
//!
//! Turns a recording's output events into a lazy stream of text chunks that
//! are released at roughly the pace they were originally written. Bursts of
//! output closer together than the frame interval are coalesced into one
//! chunk, bounding how often the transport has to write.
//!
//! The stream is single-pass and owns its [`PlaybackCursor`]. Dropping it
//! abandons the pending wait; nothing keeps running in the background.

mod cursor;

pub use cursor::{Frame, PlaybackCursor, DEFAULT_FRAME_INTERVAL};

use std::time::Duration;

use futures::stream::{self, Stream};
use tokio::time::{self, Instant};

use crate::asciicast::OutputEvent;

/// Schedule `events` for real-time playback.
///
/// The first event's text is yielded immediately; after that each chunk is
/// yielded once the wall clock reaches its simulated timestamp.
pub fn schedule(
    events: Vec<OutputEvent>,
    frame_interval: Duration,
) -> impl Stream<Item = String> + Send + 'static {
    let cursor = PlaybackCursor::new(events, frame_interval);
    stream::unfold(cursor, |mut cursor| async move {
        let frame = cursor.next_frame(Instant::now())?;
        time::sleep_until(frame.due).await;
        Some((frame.text, cursor))
    })
}
