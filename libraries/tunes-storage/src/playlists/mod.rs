use sqlx::{Row, SqlitePool};
use tunes_core::{error::Result, Playlist, PlaylistEntry, PlaylistId, Track, TrackId};

/// Get all playlists sorted by name
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Playlist>> {
    let rows = sqlx::query("SELECT id, name FROM playlists ORDER BY name ASC")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| Playlist {
            id: row.get("id"),
            name: row.get("name"),
        })
        .collect())
}

/// Get playlist by ID
pub async fn get_by_id(pool: &SqlitePool, id: PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query("SELECT id, name FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| Playlist {
        id: row.get("id"),
        name: row.get("name"),
    }))
}

/// Create new playlist
pub async fn create(pool: &SqlitePool, name: &str) -> Result<Playlist> {
    let result = sqlx::query("INSERT INTO playlists (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;

    Ok(Playlist {
        id: result.last_insert_rowid(),
        name: name.to_string(),
    })
}

/// Delete playlist and its membership rows
pub async fn delete(pool: &SqlitePool, id: PlaylistId) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

/// Add track to playlist
///
/// Insert-or-ignore: a second add of the same track changes nothing.
pub async fn add_track(pool: &SqlitePool, playlist_id: PlaylistId, track: &Track) -> Result<()> {
    let entry = PlaylistEntry::new(playlist_id, track);

    sqlx::query(
        r#"
        INSERT INTO playlist_songs (playlist_id, media_id, title, artist)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(playlist_id, media_id) DO NOTHING
        "#,
    )
    .bind(entry.playlist_id)
    .bind(entry.track_id)
    .bind(&entry.title)
    .bind(&entry.artist)
    .execute(pool)
    .await?;

    Ok(())
}

/// Remove track from playlist
pub async fn remove_track(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    track_id: TrackId,
) -> Result<()> {
    sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND media_id = ?")
        .bind(playlist_id)
        .bind(track_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Get membership rows of a playlist ordered by title
pub async fn get_entries(pool: &SqlitePool, playlist_id: PlaylistId) -> Result<Vec<PlaylistEntry>> {
    let rows = sqlx::query(
        r#"
        SELECT playlist_id, media_id, title, artist
        FROM playlist_songs
        WHERE playlist_id = ?
        ORDER BY title ASC
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| PlaylistEntry {
            playlist_id: row.get("playlist_id"),
            track_id: row.get("media_id"),
            title: row.get("title"),
            artist: row.get("artist"),
        })
        .collect())
}

/// Get playable tracks of a playlist ordered by title
pub async fn get_tracks(pool: &SqlitePool, playlist_id: PlaylistId) -> Result<Vec<Track>> {
    let entries = get_entries(pool, playlist_id).await?;
    Ok(entries.iter().map(PlaylistEntry::to_track).collect())
}
