//! Track types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier assigned by the media index
pub type TrackId = i64;

/// Opaque playable reference handed to the playback engine
///
/// Derived from the track id, so a track rebuilt from a playlist membership
/// row points at the same media as the catalog entry it was copied from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    const SCHEME: &'static str = "media:";

    /// Locator for the media-index entry `id`
    pub fn for_track(id: TrackId) -> Self {
        Self(format!("{}{}", Self::SCHEME, id))
    }

    /// Track id encoded in this locator, if it is a media-index locator
    pub fn track_id(&self) -> Option<TrackId> {
        self.0.strip_prefix(Self::SCHEME)?.parse().ok()
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A playable track from the catalog
///
/// Immutable once built; the catalog is re-fetched wholesale on each load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    /// `None` means unknown / unattributed, never an empty string
    pub artist: Option<String>,
    pub locator: Locator,
}

impl Track {
    /// Create a track whose locator points at media-index entry `id`
    pub fn new(id: TrackId, title: impl Into<String>, artist: Option<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist,
            locator: Locator::for_track(id),
        }
    }
}

/// Row returned by a `SongSource` query, before filtering and normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSong {
    pub id: TrackId,
    pub title: Option<String>,
    /// Artist exactly as stored in the index (may be blank or a placeholder)
    pub artist: Option<String>,
    pub locator: Locator,
    /// Mirrors the platform "is music" flag (ringtones, notifications etc. are not)
    pub is_music: bool,
}

impl RawSong {
    /// Music row with a media-index locator
    pub fn music(id: TrackId, title: Option<&str>, artist: Option<&str>) -> Self {
        Self {
            id,
            title: title.map(str::to_string),
            artist: artist.map(str::to_string),
            locator: Locator::for_track(id),
            is_music: true,
        }
    }

    /// Same row flagged as non-music
    pub fn not_music(mut self) -> Self {
        self.is_music = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_round_trips_track_id() {
        let locator = Locator::for_track(42);
        assert_eq!(locator.as_str(), "media:42");
        assert_eq!(locator.track_id(), Some(42));
    }

    #[test]
    fn foreign_locator_has_no_track_id() {
        let locator = Locator("file:///music/a.mp3".to_string());
        assert_eq!(locator.track_id(), None);
    }

    #[test]
    fn track_locator_matches_id() {
        let track = Track::new(7, "Song", None);
        assert_eq!(track.locator, Locator::for_track(7));
    }
}
