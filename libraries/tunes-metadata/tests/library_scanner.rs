//! Integration tests for the media scanner and library index
//!
//! Tests use real directories, generated WAV files and an on-disk `SQLite`
//! database.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tunes_core::{load_catalog, Access, Locator, SongSource};
use tunes_metadata::{LibraryIndex, MediaScanner, ScanProgress};
use tunes_storage::media;

/// Write a silent 16-bit mono PCM WAV lasting `millis`
fn write_wav(path: &Path, millis: u32) {
    const SAMPLE_RATE: u32 = 8_000;
    let data_len = SAMPLE_RATE * 2 * millis / 1000;

    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    bytes.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 0);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, bytes).unwrap();
}

struct Fixture {
    _db_dir: TempDir,
    music_dir: TempDir,
    pool: sqlx::SqlitePool,
}

impl Fixture {
    async fn new() -> Self {
        let db_dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", db_dir.path().join("index.db").display());
        let pool = tunes_storage::open(&url).await.unwrap();
        Self {
            _db_dir: db_dir,
            music_dir: tempfile::tempdir().unwrap(),
            pool,
        }
    }

    fn root(&self) -> PathBuf {
        self.music_dir.path().to_path_buf()
    }
}

#[tokio::test]
async fn scan_indexes_music_and_skips_other_files() {
    let fx = Fixture::new().await;
    write_wav(&fx.root().join("b_side.wav"), 1000);
    write_wav(&fx.root().join("album/a_side.wav"), 500);
    std::fs::write(fx.root().join("cover.jpg"), b"jpeg").unwrap();

    let stats = MediaScanner::new(fx.pool.clone())
        .scan(&[fx.root()], None)
        .await
        .unwrap();

    assert_eq!(stats.files_discovered, 2);
    assert_eq!(stats.music_files, 2);

    let index = LibraryIndex::new(fx.pool.clone(), vec![fx.root()]);
    let catalog = load_catalog(&index).await;
    let titles: Vec<_> = catalog.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["a_side", "b_side"]);
    assert!(catalog.iter().all(|t| t.artist.is_none()));
}

#[tokio::test]
async fn broken_and_ringtone_files_are_not_music() {
    let fx = Fixture::new().await;
    write_wav(&fx.root().join("song.wav"), 1000);
    write_wav(&fx.root().join("Ringtones/ding.wav"), 200);
    std::fs::write(fx.root().join("broken.mp3"), b"not audio at all").unwrap();

    let stats = MediaScanner::new(fx.pool.clone())
        .scan(&[fx.root()], None)
        .await
        .unwrap();

    assert_eq!(stats.files_indexed, 3);
    assert_eq!(stats.music_files, 1);

    let music = media::get_music(&fx.pool).await.unwrap();
    assert_eq!(music.len(), 1);
    assert_eq!(music[0].title.as_deref(), Some("song"));
}

#[tokio::test]
async fn root_inside_alarms_folder_is_still_music() {
    let fx = Fixture::new().await;
    let root = fx.root().join("alarms/library");
    write_wav(&root.join("wake_up.wav"), 500);
    write_wav(&root.join("Notifications/ping.wav"), 100);

    let stats = MediaScanner::new(fx.pool.clone())
        .scan(&[root], None)
        .await
        .unwrap();

    assert_eq!(stats.files_indexed, 2);
    assert_eq!(stats.music_files, 1);

    let music = media::get_music(&fx.pool).await.unwrap();
    assert_eq!(music.len(), 1);
    assert_eq!(music[0].title.as_deref(), Some("wake_up"));
}

#[tokio::test]
async fn rescan_keeps_ids_and_prunes_deleted_files() {
    let fx = Fixture::new().await;
    let keep = fx.root().join("keep.wav");
    let gone = fx.root().join("gone.wav");
    write_wav(&keep, 1000);
    write_wav(&gone, 1000);

    let scanner = MediaScanner::new(fx.pool.clone());
    scanner.scan(&[fx.root()], None).await.unwrap();
    let before = media::get_music(&fx.pool).await.unwrap();

    std::fs::remove_file(&gone).unwrap();
    let stats = scanner.scan(&[fx.root()], None).await.unwrap();
    let after = media::get_music(&fx.pool).await.unwrap();

    assert_eq!(stats.files_removed, 1);
    assert_eq!(after.len(), 1);
    let kept_before = before.iter().find(|r| r.title.as_deref() == Some("keep")).unwrap();
    assert_eq!(after[0].id, kept_before.id);
}

#[tokio::test]
async fn durations_are_recorded() {
    let fx = Fixture::new().await;
    write_wav(&fx.root().join("one_second.wav"), 1000);
    MediaScanner::new(fx.pool.clone())
        .scan(&[fx.root()], None)
        .await
        .unwrap();

    let index = LibraryIndex::new(fx.pool.clone(), vec![fx.root()]);
    let row = &media::get_music(&fx.pool).await.unwrap()[0];
    let durations = index.durations().await.unwrap();

    let duration = durations[&Locator::for_track(row.id)];
    assert!((900..=1100).contains(&duration.as_millis()), "{:?}", duration);
}

#[tokio::test]
async fn missing_root_denies_access_and_yields_empty_catalog() {
    let fx = Fixture::new().await;
    let missing = fx.root().join("does-not-exist");

    let stats = MediaScanner::new(fx.pool.clone())
        .scan(&[missing.clone()], None)
        .await
        .unwrap();
    assert_eq!(stats.missing_roots, vec![missing.clone()]);

    let index = LibraryIndex::new(fx.pool.clone(), vec![missing.clone()]);
    assert_eq!(index.access().await, Access::Denied);
    assert!(index.query_music().await.is_err());
    assert!(load_catalog(&index).await.is_empty());

    // Granting is a re-check: the root appearing flips the answer
    std::fs::create_dir_all(&missing).unwrap();
    assert_eq!(index.request_access().await, Access::Granted);
}

#[tokio::test]
async fn progress_is_reported() {
    let fx = Fixture::new().await;
    write_wav(&fx.root().join("song.wav"), 100);

    let (tx, mut rx) = tokio::sync::mpsc::channel(16);
    MediaScanner::new(fx.pool.clone())
        .scan(&[fx.root()], Some(tx))
        .await
        .unwrap();

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }

    assert!(matches!(events.first(), Some(ScanProgress::Started { total_files: 1 })));
    assert!(matches!(
        events.get(1),
        Some(ScanProgress::FileScanned { is_music: true, .. })
    ));
    assert!(matches!(events.last(), Some(ScanProgress::Completed { .. })));
}
