//! Queue controller
//!
//! Hands whole track lists to the engine and exposes the transport the view
//! layer uses. The queue is never patched in place: every change is a full
//! replace, and the engine owns index and position.

use crate::engine::{EngineGuard, PlaybackEngine};
use crate::error::{PlaybackError, Result};
use std::time::Duration;
use tunes_core::Track;

/// Position past which "previous" restarts the current track
pub const DEFAULT_RESTART_THRESHOLD: Duration = Duration::from_millis(3000);

/// Owns the engine and the list of tracks loaded into it
pub struct QueueController<E: PlaybackEngine> {
    engine: EngineGuard<E>,
    queue: Vec<Track>,
    restart_threshold: Duration,
}

impl<E: PlaybackEngine> QueueController<E> {
    pub fn new(engine: E) -> Self {
        Self::with_restart_threshold(engine, DEFAULT_RESTART_THRESHOLD)
    }

    pub fn with_restart_threshold(engine: E, restart_threshold: Duration) -> Self {
        Self {
            engine: EngineGuard::new(engine),
            queue: Vec::new(),
            restart_threshold,
        }
    }

    /// Replace the whole queue
    ///
    /// With `start_index`, the engine jumps to that track at offset zero.
    /// With `auto_play`, playback starts; otherwise the play/pause state is
    /// left as it was. An out-of-range start index is rejected before
    /// anything changes. If the engine fails to prepare, the new list stays
    /// loaded so the queue and the engine still agree.
    pub fn set_queue(
        &mut self,
        tracks: Vec<Track>,
        start_index: Option<usize>,
        auto_play: bool,
    ) -> Result<()> {
        if let Some(index) = start_index {
            if index >= tracks.len() {
                return Err(PlaybackError::IndexOutOfBounds {
                    index,
                    len: tracks.len(),
                });
            }
        }

        self.engine
            .set_items(tracks.iter().map(|t| t.locator.clone()).collect());
        // The engine holds the new items from here on, even if prepare fails
        self.queue = tracks;
        self.engine.prepare()?;
        if let Some(index) = start_index {
            self.engine.seek_to_item(index, Duration::ZERO)?;
        }
        if auto_play {
            self.engine.play();
        }

        tracing::debug!(
            len = self.queue.len(),
            start = ?start_index,
            auto_play,
            "Queue replaced"
        );
        Ok(())
    }

    /// Tracks currently loaded into the engine
    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable engine access for platform glue (e.g. refreshing durations)
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Play when paused, pause when playing; nothing on an empty queue
    pub fn toggle_play_pause(&mut self) {
        if !self.can_toggle() {
            return;
        }
        if self.engine.is_playing() {
            self.engine.pause();
        } else {
            self.engine.play();
        }
    }

    /// Seek inside the current track
    pub fn seek_to(&mut self, offset: Duration) {
        if self.queue.is_empty() {
            return;
        }
        self.engine.seek(offset);
    }

    /// Skip to the next track when there is one
    pub fn next(&mut self) {
        if self.can_next() {
            self.engine.next_item();
        }
    }

    /// Restart the current track when past the restart threshold, else go
    /// to the previous track
    pub fn previous(&mut self) {
        if self.engine.position() > self.restart_threshold {
            self.engine.seek(Duration::ZERO);
        } else {
            self.engine.previous_item();
        }
    }

    pub fn can_next(&self) -> bool {
        self.engine.has_next()
    }

    pub fn can_previous(&self) -> bool {
        self.engine.has_previous() || self.engine.position() > self.restart_threshold
    }

    pub fn can_toggle(&self) -> bool {
        self.engine.item_count() > 0
    }
}
