//! Resumable playback state.
//!
//! The cursor decides *what* goes into each chunk and *when* it is due, but
//! never waits itself. Callers pass in the current time and sleep until the
//! returned deadline, which keeps the pacing logic testable and lets the
//! wait be dropped at any point.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;

use crate::asciicast::OutputEvent;

/// Default spacing between emitted chunks (10 Hz).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// One chunk of coalesced output and the time it should be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub due: Instant,
    pub text: String,
}

/// Position within a single playback.
#[derive(Debug)]
pub struct PlaybackCursor {
    events: VecDeque<OutputEvent>,
    frame_interval: Duration,
    /// Simulated timeline. Starts when the first paced frame is requested.
    ts: Option<Instant>,
    opened: bool,
}

impl PlaybackCursor {
    pub fn new(events: Vec<OutputEvent>, frame_interval: Duration) -> Self {
        Self {
            events: events.into(),
            frame_interval,
            ts: None,
            opened: false,
        }
    }

    /// Compute the next frame, or `None` once every event has been emitted.
    ///
    /// The opening event is due immediately and its delay is ignored. Every
    /// later frame drains events until the simulated clock reaches
    /// `max(ts + frame_interval, now)`, so a slow consumer gets one larger
    /// catch-up chunk instead of a flood of small ones. Each frame contains at
    /// least one event.
    pub fn next_frame(&mut self, now: Instant) -> Option<Frame> {
        if !self.opened {
            self.opened = true;
            let first = self.events.pop_front()?;
            return Some(Frame {
                due: now,
                text: first.text,
            });
        }

        if self.events.is_empty() {
            return None;
        }

        let mut ts = *self.ts.get_or_insert(now);
        let deadline = advance(ts, self.frame_interval).max(now);

        let mut text = String::new();
        while let Some(event) = self.events.pop_front() {
            ts = advance(ts, delay_of(&event));
            text.push_str(&event.text);
            if ts >= deadline {
                break;
            }
        }

        self.ts = Some(ts);
        Some(Frame { due: ts, text })
    }
}

/// Event delay as a duration; negative or unrepresentable delays count as zero.
fn delay_of(event: &OutputEvent) -> Duration {
    Duration::try_from_secs_f64(event.delay).unwrap_or(Duration::ZERO)
}

fn advance(ts: Instant, by: Duration) -> Instant {
    ts.checked_add(by).unwrap_or(ts)
}
