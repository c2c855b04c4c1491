//! StrawHat Tunes Storage
//!
//! `SQLite` database layer for StrawHat Tunes.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each feature owns its own queries (`media`, `playlists`)
//! - **Explicit handle**: the pool is created at startup and passed to
//!   whatever owns application state; there is no global instance
//! - **Single-statement operations**: every playlist call is one statement or
//!   one transaction, so background tasks can issue them concurrently
//!
//! # Example
//!
//! ```rust,no_run
//! use tunes_storage::{create_pool, run_migrations, LocalStore};
//! use tunes_core::PlaylistStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://tunes.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = LocalStore::new(pool);
//! let road_trip = store.create_playlist("Road Trip").await?;
//! let tracks = store.list_tracks_in_playlist(road_trip.id).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod media;
pub mod playlists;

pub use context::LocalStore;
pub use error::{Result, StorageError};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup, before handing the pool to a `LocalStore`.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    tracing::debug!("Database migrations applied");
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://tunes.db>`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!(database_url, "Database pool ready");

    Ok(pool)
}

/// Create a pool and bring its schema up to date
pub async fn open(database_url: &str) -> Result<SqlitePool> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
