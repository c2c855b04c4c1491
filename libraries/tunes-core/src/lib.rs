//! StrawHat Tunes Core
//!
//! Platform-agnostic types, collaborator traits, and error handling shared by
//! every StrawHat Tunes crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `PlaylistEntry`
//! - **Collaborator Traits**: `SongSource` (the media index), `PlaylistStore`
//!   (persistent playlists)
//! - **Catalog Loading**: music-only filtering, title ordering and artist
//!   normalization on top of any `SongSource`
//! - **Error Handling**: unified `TunesError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tunes_core::catalog::{build_catalog, normalize_artist};
//! use tunes_core::types::RawSong;
//!
//! let rows = vec![
//!     RawSong::music(2, Some("B"), Some("X")),
//!     RawSong::music(1, Some("A"), Some("  <UNKNOWN> ")),
//! ];
//!
//! let catalog = build_catalog(rows);
//! assert_eq!(catalog[0].title, "A");
//! assert_eq!(catalog[0].artist, None);
//! assert_eq!(normalize_artist(Some(" X ")), Some("X".to_string()));
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod storage;
pub mod types;

pub use catalog::{build_catalog, load_catalog, normalize_artist, Access, SongSource};
pub use error::{Result, TunesError};
pub use storage::PlaylistStore;
pub use types::{Locator, Playlist, PlaylistEntry, PlaylistId, RawSong, Track, TrackId};
