//! Storage trait for user playlists

use crate::error::Result;
use crate::types::{Playlist, PlaylistId, Track, TrackId};
use async_trait::async_trait;

/// Persistent playlist store
///
/// Every operation is a single atomic statement (or one transaction) against
/// the backing store, so callers may issue them from background tasks
/// without extra locking.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Get all playlists sorted by name ascending
    async fn list_playlists(&self) -> Result<Vec<Playlist>>;

    /// Create a playlist and return it
    ///
    /// Callers reject blank names before getting here.
    async fn create_playlist(&self, name: &str) -> Result<Playlist>;

    /// Delete a playlist and its membership rows
    async fn delete_playlist(&self, id: PlaylistId) -> Result<()>;

    /// Add a track to a playlist
    ///
    /// Adding a track that is already a member is a silent no-op.
    async fn add_track_to_playlist(&self, playlist_id: PlaylistId, track: &Track) -> Result<()>;

    /// Remove a track from a playlist
    ///
    /// Removing a non-member is a silent no-op.
    async fn remove_track_from_playlist(
        &self,
        playlist_id: PlaylistId,
        track_id: TrackId,
    ) -> Result<()>;

    /// Get the tracks of a playlist ordered by title
    async fn list_tracks_in_playlist(&self, playlist_id: PlaylistId) -> Result<Vec<Track>>;
}
