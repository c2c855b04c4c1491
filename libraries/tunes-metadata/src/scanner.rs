//! Media index scanner

use crate::error::{MetadataError, Result};
use crate::reader::{LoftyMetadataReader, TagInfo};
use sqlx::SqlitePool;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tunes_storage::media::{self, NewMedia};

/// Scan configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Supported audio file extensions (lowercase, no dot)
    pub extensions: Vec<String>,

    /// Directory names whose files are indexed but never treated as music
    pub non_music_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: ["mp3", "flac", "ogg", "opus", "wav", "m4a", "aac"]
                .into_iter()
                .map(String::from)
                .collect(),
            non_music_dirs: ["ringtones", "notifications", "alarms"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Scan progress updates
#[derive(Debug, Clone)]
pub enum ScanProgress {
    /// Scanning started
    Started { total_files: usize },

    /// File scanned
    FileScanned {
        path: PathBuf,
        is_music: bool,
        error: Option<String>,
    },

    /// Scanning completed
    Completed { stats: ScanStats },
}

/// Scan statistics
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    /// Number of files discovered
    pub files_discovered: usize,

    /// Number of rows written to the index
    pub files_indexed: usize,

    /// Rows written with the music flag set
    pub music_files: usize,

    /// Rows removed because their file disappeared
    pub files_removed: usize,

    /// Roots that could not be read
    pub missing_roots: Vec<PathBuf>,

    /// Files that failed to probe or store
    pub errors: Vec<(PathBuf, String)>,
}

/// Walks music directories and keeps the `media` table in sync with them
pub struct MediaScanner {
    reader: LoftyMetadataReader,
    pool: SqlitePool,
    config: ScanConfig,
}

impl MediaScanner {
    /// Create a new scanner
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_config(pool, ScanConfig::default())
    }

    /// Create a scanner with custom configuration
    pub fn with_config(pool: SqlitePool, config: ScanConfig) -> Self {
        Self {
            reader: LoftyMetadataReader::new(),
            pool,
            config,
        }
    }

    /// Scan `roots`, upsert one row per audio file, then drop rows for
    /// files that no longer exist
    ///
    /// Unreadable roots are skipped and reported in the stats. A file that
    /// fails to probe is still indexed, flagged as non-music.
    pub async fn scan(
        &self,
        roots: &[PathBuf],
        progress_tx: Option<mpsc::Sender<ScanProgress>>,
    ) -> Result<ScanStats> {
        let mut stats = ScanStats::default();

        let mut files = Vec::new();
        for root in roots {
            if root.is_dir() {
                files.extend(
                    self.discover_files(root)
                        .into_iter()
                        .map(|file| (root.as_path(), file)),
                );
            } else {
                tracing::warn!(root = %root.display(), "Music root not readable, skipping");
                stats.missing_roots.push(root.clone());
            }
        }
        stats.files_discovered = files.len();

        if let Some(ref tx) = progress_tx {
            let _ = tx
                .send(ScanProgress::Started {
                    total_files: files.len(),
                })
                .await;
        }

        let mut seen = HashSet::with_capacity(files.len());
        for (root, file_path) in files {
            let (is_music, error) = match self.process_file(root, &file_path).await {
                Ok(is_music) => {
                    stats.files_indexed += 1;
                    if is_music {
                        stats.music_files += 1;
                    }
                    (is_music, None)
                }
                Err(e) => {
                    tracing::debug!(path = %file_path.display(), error = %e, "Failed to index file");
                    stats.errors.push((file_path.clone(), e.to_string()));
                    (false, Some(e.to_string()))
                }
            };
            seen.insert(file_path.display().to_string());

            if let Some(ref tx) = progress_tx {
                let _ = tx
                    .send(ScanProgress::FileScanned {
                        path: file_path,
                        is_music,
                        error,
                    })
                    .await;
            }
        }

        stats.files_removed = self.prune(&seen).await?;

        tracing::info!(
            discovered = stats.files_discovered,
            music = stats.music_files,
            removed = stats.files_removed,
            errors = stats.errors.len(),
            "Scan finished"
        );

        if let Some(ref tx) = progress_tx {
            let _ = tx
                .send(ScanProgress::Completed {
                    stats: stats.clone(),
                })
                .await;
        }

        Ok(stats)
    }

    /// Discover audio files below `root` recursively
    fn discover_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && self.is_supported_file(e.path()))
            .map(walkdir::DirEntry::into_path)
            .collect();
        files.sort();
        files
    }

    fn is_supported_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.config.extensions.contains(&e.to_lowercase()))
    }

    /// Whether a folder between `root` and the file is a non-music folder
    ///
    /// Folders above the root do not count.
    fn in_non_music_dir(&self, root: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        relative.parent().into_iter().flat_map(Path::components).any(|c| {
            c.as_os_str()
                .to_str()
                .is_some_and(|name| self.config.non_music_dirs.contains(&name.to_lowercase()))
        })
    }

    /// Index a single file
    ///
    /// Returns whether the row was flagged as music.
    async fn process_file(&self, root: &Path, path: &Path) -> Result<bool> {
        let reader = self.reader;
        let probe_path = path.to_path_buf();
        let probed = tokio::task::spawn_blocking(move || reader.read(&probe_path))
            .await
            .map_err(|e| MetadataError::Task(e.to_string()))?;

        let (tags, probe_ok) = match probed {
            Ok(tags) => (tags, true),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Probe failed, indexing as non-music");
                (TagInfo::default(), false)
            }
        };

        let is_music = probe_ok && !self.in_non_music_dir(root, path);
        let title = tags.title.or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        });

        media::upsert(
            &self.pool,
            NewMedia {
                path: path.display().to_string(),
                title,
                artist: tags.artist,
                is_music,
                duration_ms: tags.duration_ms,
            },
        )
        .await?;

        Ok(is_music)
    }

    /// Delete rows whose file is gone
    async fn prune(&self, seen: &HashSet<String>) -> Result<usize> {
        let mut removed = 0;
        for path in media::get_all_paths(&self.pool).await? {
            if seen.contains(&path) || Path::new(&path).exists() {
                continue;
            }
            media::delete_by_path(&self.pool, &path).await?;
            removed += 1;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> MediaScanner {
        let pool = SqlitePool::connect_lazy("sqlite::memory:").unwrap();
        MediaScanner::new(pool)
    }

    #[tokio::test]
    async fn default_extensions_cover_common_formats() {
        let scanner = scanner();
        assert!(scanner.is_supported_file(Path::new("/m/a.mp3")));
        assert!(scanner.is_supported_file(Path::new("/m/a.FLAC")));
        assert!(!scanner.is_supported_file(Path::new("/m/cover.jpg")));
        assert!(!scanner.is_supported_file(Path::new("/m/noext")));
    }

    #[tokio::test]
    async fn ringtone_folders_are_not_music() {
        let scanner = scanner();
        let root = Path::new("/sdcard");
        assert!(scanner.in_non_music_dir(root, Path::new("/sdcard/Ringtones/beep.ogg")));
        assert!(scanner.in_non_music_dir(root, Path::new("/sdcard/media/alarms/wake.mp3")));
        assert!(!scanner.in_non_music_dir(root, Path::new("/sdcard/Music/Alarms.mp3")));
    }

    #[tokio::test]
    async fn folders_above_the_root_are_ignored() {
        let scanner = scanner();
        let root = Path::new("/home/me/alarms/music");
        assert!(!scanner.in_non_music_dir(root, Path::new("/home/me/alarms/music/a.mp3")));
        assert!(!scanner.in_non_music_dir(root, Path::new("/home/me/alarms/music/rock/b.mp3")));
        assert!(scanner.in_non_music_dir(
            root,
            Path::new("/home/me/alarms/music/ringtones/c.mp3")
        ));
    }
}
