//! Wall-clock reference engine
//!
//! Decodes nothing: it advances a position with the system clock and moves
//! through its items using the durations it was given. Items without a known
//! duration play until paused or skipped.

use crate::engine::PlaybackEngine;
use crate::error::{PlaybackError, Result};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tunes_core::Locator;

/// Where the clock stood at the last state change
#[derive(Debug, Clone, Copy)]
struct Anchor {
    index: usize,
    offset: Duration,
    /// Set while the clock is running
    since: Option<Instant>,
}

/// Transport state derived from an anchor at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Resolved {
    index: usize,
    position: Duration,
    playing: bool,
}

/// Playback engine driven by the system clock
#[derive(Debug)]
pub struct ClockEngine {
    durations: HashMap<Locator, Duration>,
    items: Vec<Locator>,
    anchor: Anchor,
    play_when_ready: bool,
    prepared: bool,
    released: bool,
}

impl Default for ClockEngine {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl ClockEngine {
    /// Create an engine that knows the durations of `durations`' locators
    pub fn new(durations: HashMap<Locator, Duration>) -> Self {
        Self {
            durations,
            items: Vec::new(),
            anchor: Anchor {
                index: 0,
                offset: Duration::ZERO,
                since: None,
            },
            play_when_ready: false,
            prepared: false,
            released: false,
        }
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn item_duration(&self, index: usize) -> Option<Duration> {
        self.items
            .get(index)
            .and_then(|locator| self.durations.get(locator))
            .copied()
    }

    fn resolve_at(&self, now: Instant) -> Resolved {
        let mut index = self.anchor.index;
        let mut position = self.anchor.offset
            + self
                .anchor
                .since
                .map_or(Duration::ZERO, |since| now.saturating_duration_since(since));
        let mut playing = self.anchor.since.is_some();

        while let Some(duration) = self.item_duration(index) {
            if position < duration || !playing {
                break;
            }
            if index + 1 < self.items.len() {
                position -= duration;
                index += 1;
            } else {
                position = duration;
                playing = false;
            }
        }

        Resolved {
            index,
            position,
            playing,
        }
    }

    fn resolve(&self) -> Resolved {
        self.resolve_at(Instant::now())
    }

    fn can_run(&self) -> bool {
        self.play_when_ready && self.prepared && !self.items.is_empty()
    }

    /// Fold elapsed time into the anchor
    fn settle(&mut self) {
        let now = Instant::now();
        let resolved = self.resolve_at(now);
        self.anchor = Anchor {
            index: resolved.index,
            offset: resolved.position,
            since: resolved.playing.then_some(now),
        };
    }

    fn move_to(&mut self, index: usize, offset: Duration) {
        let offset = self
            .item_duration(index)
            .map_or(offset, |duration| offset.min(duration));
        self.anchor = Anchor {
            index,
            offset,
            since: self.can_run().then(Instant::now),
        };
    }
}

impl PlaybackEngine for ClockEngine {
    fn set_items(&mut self, items: Vec<Locator>) {
        self.items = items;
        self.prepared = false;
        self.move_to(0, Duration::ZERO);
    }

    fn prepare(&mut self) -> Result<()> {
        if self.released {
            return Err(PlaybackError::Released);
        }
        self.settle();
        self.prepared = true;
        if self.can_run() && self.anchor.since.is_none() {
            self.anchor.since = Some(Instant::now());
        }
        Ok(())
    }

    fn seek_to_item(&mut self, index: usize, offset: Duration) -> Result<()> {
        if index >= self.items.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        self.move_to(index, offset);
        Ok(())
    }

    fn seek(&mut self, offset: Duration) {
        self.settle();
        self.move_to(self.anchor.index, offset);
    }

    fn play(&mut self) {
        self.settle();
        self.play_when_ready = true;
        if self.can_run() && self.anchor.since.is_none() {
            self.anchor.since = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        self.settle();
        self.play_when_ready = false;
        self.anchor.since = None;
    }

    fn has_next(&self) -> bool {
        !self.items.is_empty() && self.resolve().index + 1 < self.items.len()
    }

    fn has_previous(&self) -> bool {
        !self.items.is_empty() && self.resolve().index > 0
    }

    fn next_item(&mut self) {
        if self.has_next() {
            let index = self.resolve().index + 1;
            self.move_to(index, Duration::ZERO);
        }
    }

    fn previous_item(&mut self) {
        if self.has_previous() {
            let index = self.resolve().index - 1;
            self.move_to(index, Duration::ZERO);
        }
    }

    fn current_index(&self) -> Option<usize> {
        (!self.items.is_empty()).then(|| self.resolve().index)
    }

    fn position(&self) -> Duration {
        if self.items.is_empty() {
            return Duration::ZERO;
        }
        self.resolve().position
    }

    fn duration(&self) -> Option<Duration> {
        self.current_index().and_then(|index| self.item_duration(index))
    }

    fn is_playing(&self) -> bool {
        !self.items.is_empty() && self.resolve().playing
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn release(&mut self) {
        self.items.clear();
        self.play_when_ready = false;
        self.prepared = false;
        self.released = true;
        self.anchor = Anchor {
            index: 0,
            offset: Duration::ZERO,
            since: None,
        };
    }
}
