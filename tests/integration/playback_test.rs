//! Timed playback of fixture recordings

use std::time::Duration;

use castmirror::playback::{schedule, DEFAULT_FRAME_INTERVAL};
use castmirror::Cast;
use futures::StreamExt;
use tokio::time::Instant;

use crate::helpers::{load_fixture, V2_OUTPUT};

async fn play_timed(name: &str, interval: Duration) -> Vec<(Duration, String)> {
    let cast = Cast::parse(&load_fixture(name)).unwrap();
    let start = Instant::now();
    schedule(cast.events, interval)
        .map(|chunk| (start.elapsed(), chunk))
        .collect()
        .await
}

#[tokio::test(start_paused = true)]
async fn v2_fixture_plays_back_in_real_time() {
    let chunks = play_timed("2.cast", DEFAULT_FRAME_INTERVAL).await;

    let texts: Vec<&str> = chunks.iter().map(|(_, t)| t.as_str()).collect();
    assert_eq!(texts, vec!["$ ", "ls\r\n", "a.txt  b.txt\r\n"]);

    let millis: Vec<u128> = chunks.iter().map(|(at, _)| at.as_millis()).collect();
    assert!(millis[0] <= 2, "{:?}", millis);
    assert!((149..=153).contains(&millis[1]), "{:?}", millis);
    assert!((299..=303).contains(&millis[2]), "{:?}", millis);
}

#[tokio::test(start_paused = true)]
async fn wide_frame_interval_coalesces_everything_after_the_first_event() {
    let chunks = play_timed("2.cast", Duration::from_secs(1)).await;

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].1, "$ ");
    assert_eq!(chunks[1].1, "ls\r\na.txt  b.txt\r\n");

    let joined: String = chunks.into_iter().map(|(_, t)| t).collect();
    assert_eq!(joined, V2_OUTPUT);
}

#[tokio::test(start_paused = true)]
async fn header_only_fixture_plays_nothing() {
    let chunks = play_timed("3.cast", DEFAULT_FRAME_INTERVAL).await;
    assert!(chunks.is_empty());
}
