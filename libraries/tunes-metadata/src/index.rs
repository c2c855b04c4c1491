//! Directory-backed song source

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tunes_core::{error::Result, Access, Locator, RawSong, SongSource};
use tunes_storage::media;

/// The scanned media index plus the music roots it was scanned from
///
/// Access is granted while at least one root can be listed. Queries read
/// the `media` table only; run a [`crate::MediaScanner`] to refresh it.
#[derive(Clone)]
pub struct LibraryIndex {
    pool: SqlitePool,
    roots: Vec<PathBuf>,
}

impl LibraryIndex {
    pub fn new(pool: SqlitePool, roots: Vec<PathBuf>) -> Self {
        Self { pool, roots }
    }

    /// Known durations of music rows, keyed by locator
    pub async fn durations(&self) -> Result<HashMap<Locator, Duration>> {
        let rows = media::get_music(&self.pool).await?;
        Ok(rows
            .iter()
            .filter_map(|row| Some((row.locator(), row.duration()?)))
            .collect())
    }
}

#[async_trait]
impl SongSource for LibraryIndex {
    async fn access(&self) -> Access {
        for root in &self.roots {
            if tokio::fs::read_dir(root).await.is_ok() {
                return Access::Granted;
            }
        }
        tracing::debug!(roots = self.roots.len(), "No readable music root");
        Access::Denied
    }

    async fn query_music(&self) -> Result<Vec<RawSong>> {
        if !self.access().await.is_granted() {
            return Err(tunes_core::TunesError::access_denied(
                "no readable music directory",
            ));
        }
        let rows = media::get_music(&self.pool).await?;
        Ok(rows.iter().map(media::MediaRow::to_raw_song).collect())
    }
}
