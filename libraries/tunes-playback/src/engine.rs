//! Playback engine abstraction
//!
//! The engine owns the item list, current index and position. Everything in
//! this crate drives it through [`PlaybackEngine`] so a platform player can
//! stand in for [`crate::ClockEngine`].

use crate::error::Result;
use std::ops::{Deref, DerefMut};
use std::time::Duration;
use tunes_core::Locator;

/// Transport contract of a playback engine
///
/// Positions and durations are relative to the current item.
pub trait PlaybackEngine: Send {
    /// Replace the item list; the engine moves to the first item at offset zero
    ///
    /// The play/pause intent is kept.
    fn set_items(&mut self, items: Vec<Locator>);

    /// Get the engine ready to play the current item list
    fn prepare(&mut self) -> Result<()>;

    /// Jump to `offset` inside item `index`
    fn seek_to_item(&mut self, index: usize, offset: Duration) -> Result<()>;

    /// Jump to `offset` inside the current item
    fn seek(&mut self, offset: Duration);

    fn play(&mut self);

    fn pause(&mut self);

    fn has_next(&self) -> bool;

    fn has_previous(&self) -> bool;

    /// Move to the start of the next item; no-op at the last item
    fn next_item(&mut self);

    /// Move to the start of the previous item; no-op at the first item
    fn previous_item(&mut self);

    /// Current item index, `None` while the item list is empty
    fn current_index(&self) -> Option<usize>;

    fn position(&self) -> Duration;

    /// Duration of the current item, `None` when unknown
    fn duration(&self) -> Option<Duration>;

    fn is_playing(&self) -> bool;

    fn item_count(&self) -> usize;

    /// Free the engine's resources; the engine is unusable afterwards
    fn release(&mut self);
}

/// Owns an engine and releases it when dropped
///
/// Dropping covers every exit path of the owner, including unwinding.
pub struct EngineGuard<E: PlaybackEngine> {
    engine: E,
}

impl<E: PlaybackEngine> EngineGuard<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }
}

impl<E: PlaybackEngine> Deref for EngineGuard<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.engine
    }
}

impl<E: PlaybackEngine> DerefMut for EngineGuard<E> {
    fn deref_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

impl<E: PlaybackEngine> Drop for EngineGuard<E> {
    fn drop(&mut self) {
        self.engine.release();
        tracing::debug!("Playback engine released");
    }
}
