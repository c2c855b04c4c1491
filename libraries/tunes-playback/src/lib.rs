//! StrawHat Tunes - Playback Management
//!
//! Platform-agnostic queue and transport management for StrawHat Tunes.
//!
//! This crate provides:
//! - The [`PlaybackEngine`] transport contract and an [`EngineGuard`] that
//!   releases the engine on drop
//! - [`ClockEngine`], a wall-clock reference engine
//! - [`QueueController`]: whole-queue replace and previous-with-restart
//! - [`NowPlayingTracker`]: the polled now-playing snapshot
//!
//! # Architecture
//!
//! `tunes-playback` knows nothing about storage, async runtimes or views.
//! The owner of the queue decides when to poll; decoding and audio output
//! sit behind [`PlaybackEngine`].
//!
//! # Example
//!
//! ```rust
//! use tunes_core::Track;
//! use tunes_playback::{ClockEngine, NowPlayingTracker, PlaybackEngine, QueueController};
//! use std::time::Duration;
//!
//! let mut queue = QueueController::new(ClockEngine::default());
//! let tracks = vec![
//!     Track::new(1, "Binks' Sake", Some("Brook".to_string())),
//!     Track::new(2, "We Are!", None),
//! ];
//!
//! queue.set_queue(tracks, Some(1), true).unwrap();
//! assert_eq!(queue.engine().current_index(), Some(1));
//!
//! // Past three seconds, "previous" restarts the track
//! queue.seek_to(Duration::from_secs(5));
//! queue.previous();
//! assert_eq!(queue.engine().current_index(), Some(1));
//!
//! let mut tracker = NowPlayingTracker::new();
//! let now = tracker.poll(&queue);
//! assert_eq!(now.track.as_ref().map(|t| t.title.as_str()), Some("We Are!"));
//! ```

mod clock;
mod engine;
pub mod error;
mod queue;
mod tracker;

pub use clock::ClockEngine;
pub use engine::{EngineGuard, PlaybackEngine};
pub use error::{PlaybackError, Result};
pub use queue::{QueueController, DEFAULT_RESTART_THRESHOLD};
pub use tracker::{format_ms, NowPlaying, NowPlayingTracker, DEFAULT_POLL_INTERVAL};
