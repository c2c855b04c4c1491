//! Media index slice
//!
//! The scanner upserts one row per audio file; the catalog reads music rows
//! back ordered by title.

use sqlx::{Row, SqlitePool};
use std::time::Duration;
use tunes_core::{error::Result, Locator, RawSong, TrackId};

/// Data for inserting or refreshing a media row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedia {
    pub path: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub is_music: bool,
    pub duration_ms: Option<u64>,
}

/// Stored media row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRow {
    pub id: TrackId,
    pub path: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub is_music: bool,
    pub duration_ms: Option<u64>,
}

impl MediaRow {
    pub fn locator(&self) -> Locator {
        Locator::for_track(self.id)
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration_ms.map(Duration::from_millis)
    }

    /// Raw catalog row; artist stays un-normalized
    pub fn to_raw_song(&self) -> RawSong {
        RawSong {
            id: self.id,
            title: self.title.clone(),
            artist: self.artist.clone(),
            locator: self.locator(),
            is_music: self.is_music,
        }
    }
}

fn row_to_media(row: &sqlx::sqlite::SqliteRow) -> MediaRow {
    MediaRow {
        id: row.get("id"),
        path: row.get("path"),
        title: row.get("title"),
        artist: row.get("artist"),
        is_music: row.get::<i64, _>("is_music") != 0,
        duration_ms: row
            .get::<Option<i64>, _>("duration_ms")
            .map(|ms| ms.max(0) as u64),
    }
}

/// Insert a media row, or refresh the existing row for the same path
///
/// Returns the row id, which stays the same across rescans of one path.
pub async fn upsert(pool: &SqlitePool, media: NewMedia) -> Result<TrackId> {
    let row = sqlx::query(
        r#"
        INSERT INTO media (path, title, artist, is_music, duration_ms)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(path) DO UPDATE SET
            title = excluded.title,
            artist = excluded.artist,
            is_music = excluded.is_music,
            duration_ms = excluded.duration_ms
        RETURNING id
        "#,
    )
    .bind(&media.path)
    .bind(&media.title)
    .bind(&media.artist)
    .bind(i64::from(media.is_music))
    .bind(media.duration_ms.map(|ms| ms as i64))
    .fetch_one(pool)
    .await?;

    Ok(row.get("id"))
}

/// Get all music rows ordered by title ascending
pub async fn get_music(pool: &SqlitePool) -> Result<Vec<MediaRow>> {
    let rows = sqlx::query(
        r#"
        SELECT id, path, title, artist, is_music, duration_ms
        FROM media
        WHERE is_music = 1
        ORDER BY title ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(row_to_media).collect())
}

/// Get media row by ID
pub async fn get_by_id(pool: &SqlitePool, id: TrackId) -> Result<Option<MediaRow>> {
    let row = sqlx::query(
        "SELECT id, path, title, artist, is_music, duration_ms FROM media WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(row_to_media))
}

/// Get every indexed path
pub async fn get_all_paths(pool: &SqlitePool) -> Result<Vec<String>> {
    let rows = sqlx::query("SELECT path FROM media ORDER BY path")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(|row| row.get("path")).collect())
}

/// Delete the row for a path that no longer exists on disk
pub async fn delete_by_path(pool: &SqlitePool, path: &str) -> Result<()> {
    sqlx::query("DELETE FROM media WHERE path = ?")
        .bind(path)
        .execute(pool)
        .await?;

    Ok(())
}
