//! Playlist types

use super::track::{Track, TrackId};
use serde::{Deserialize, Serialize};

pub type PlaylistId = i64;

/// A user-defined playlist
///
/// Name uniqueness is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
}

/// Membership row linking one playlist to one track
///
/// Title and artist are denormalized at insert time so a playlist can be
/// listed without touching the media index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub playlist_id: PlaylistId,
    pub track_id: TrackId,
    pub title: String,
    pub artist: Option<String>,
}

impl PlaylistEntry {
    /// Membership row for `track` in `playlist_id`
    pub fn new(playlist_id: PlaylistId, track: &Track) -> Self {
        Self {
            playlist_id,
            track_id: track.id,
            title: track.title.clone(),
            artist: track.artist.clone(),
        }
    }

    /// Rebuild a playable track from the denormalized row
    pub fn to_track(&self) -> Track {
        Track::new(self.track_id, self.title.clone(), self.artist.clone())
    }
}
