//! Now-playing tracker
//!
//! Polled on a fixed interval by the owner of the queue; each poll reads the
//! engine and republishes a [`NowPlaying`] snapshot.

use crate::engine::PlaybackEngine;
use crate::queue::QueueController;
use serde::Serialize;
use std::time::Duration;
use tunes_core::Track;

/// Default poll interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Snapshot of the engine as of the last poll
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NowPlaying {
    /// `None` only while no queue has ever been non-empty
    pub track: Option<Track>,
    pub index: Option<usize>,
    pub position_ms: u64,
    /// Zero when the engine does not know the duration
    pub duration_ms: u64,
    pub is_playing: bool,
}

#[derive(Debug, Default)]
pub struct NowPlayingTracker {
    current: NowPlaying,
}

impl NowPlayingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &NowPlaying {
        &self.current
    }

    /// Read the engine and update the snapshot
    ///
    /// An engine index past the end of the queue (possible right after a
    /// replace) leaves the track as it was.
    pub fn poll<E: PlaybackEngine>(&mut self, queue: &QueueController<E>) -> &NowPlaying {
        let engine = queue.engine();
        let index = engine.current_index();

        match index.and_then(|i| queue.queue().get(i)) {
            Some(track) => {
                self.current.track = Some(track.clone());
                self.current.index = index;
            }
            None => {
                if index.is_some() {
                    tracing::trace!(?index, len = queue.queue().len(), "Engine index ahead of queue");
                }
            }
        }
        self.seed(queue.queue());

        self.current.position_ms = engine.position().as_millis() as u64;
        self.current.duration_ms = engine.duration().map_or(0, |d| d.as_millis() as u64);
        self.current.is_playing = engine.is_playing();
        &self.current
    }

    /// Show the first entry of a freshly loaded queue when nothing is shown yet
    pub fn seed(&mut self, queue: &[Track]) {
        if self.current.track.is_none() {
            if let Some(first) = queue.first() {
                self.current.track = Some(first.clone());
                self.current.index = Some(0);
            }
        }
    }
}

/// Format milliseconds as `m:ss`; zero and negative values give `0:00`
pub fn format_ms(ms: i64) -> String {
    if ms <= 0 {
        return "0:00".to_string();
    }
    let total_seconds = ms / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
