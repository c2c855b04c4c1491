use crate::playlists;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tunes_core::{error::Result, Playlist, PlaylistId, PlaylistStore, Track, TrackId};

/// Local playlist store using `SQLite`
///
/// Cheap to clone: clones share the same pool.
#[derive(Clone)]
pub struct LocalStore {
    pool: SqlitePool,
}

impl LocalStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaylistStore for LocalStore {
    async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        playlists::get_all(&self.pool).await
    }

    async fn create_playlist(&self, name: &str) -> Result<Playlist> {
        let playlist = playlists::create(&self.pool, name).await?;
        tracing::debug!(id = playlist.id, name, "Playlist created");
        Ok(playlist)
    }

    async fn delete_playlist(&self, id: PlaylistId) -> Result<()> {
        playlists::delete(&self.pool, id).await
    }

    async fn add_track_to_playlist(&self, playlist_id: PlaylistId, track: &Track) -> Result<()> {
        playlists::add_track(&self.pool, playlist_id, track).await
    }

    async fn remove_track_from_playlist(
        &self,
        playlist_id: PlaylistId,
        track_id: TrackId,
    ) -> Result<()> {
        playlists::remove_track(&self.pool, playlist_id, track_id).await
    }

    async fn list_tracks_in_playlist(&self, playlist_id: PlaylistId) -> Result<Vec<Track>> {
        playlists::get_tracks(&self.pool, playlist_id).await
    }
}
