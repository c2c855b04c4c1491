//! Console configuration

use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TunesConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_library")]
    pub library: LibrarySettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibrarySettings {
    /// Music roots; access is denied while none of them can be read
    #[serde(default = "default_scan_directories")]
    pub scan_directories: Vec<PathBuf>,

    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Rescan the roots before `run` loads the catalog
    #[serde(default = "default_scan_on_start")]
    pub scan_on_start: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_restart_threshold_ms")]
    pub restart_threshold_ms: u64,
}

impl PlaybackSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn restart_threshold(&self) -> Duration {
        Duration::from_millis(self.restart_threshold_ms)
    }
}

impl TunesConfig {
    /// Load configuration from file and environment
    ///
    /// Without an explicit `path`, `tunes.toml` in the working directory is
    /// used when present. Environment variables override the file, e.g.
    /// `TUNES_STORAGE__DATABASE_URL` or
    /// `TUNES_LIBRARY__SCAN_DIRECTORIES=/music,/more-music`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("tunes.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("TUNES")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("library.scan_directories")
                .with_list_parse_key("library.extensions"),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playback.poll_interval_ms == 0 {
            return Err(ConsoleError::Config(
                "playback.poll_interval_ms must be greater than zero".to_string(),
            ));
        }

        if self.library.extensions.is_empty() {
            return Err(ConsoleError::Config(
                "library.extensions must list at least one extension".to_string(),
            ));
        }

        Ok(())
    }

    /// Scanner settings derived from the library section
    pub fn scan_config(&self) -> tunes_metadata::ScanConfig {
        tunes_metadata::ScanConfig {
            extensions: self
                .library
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            ..tunes_metadata::ScanConfig::default()
        }
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://tunes.db".to_string()
}

fn default_library() -> LibrarySettings {
    LibrarySettings {
        scan_directories: default_scan_directories(),
        extensions: default_extensions(),
        scan_on_start: default_scan_on_start(),
    }
}

fn default_scan_directories() -> Vec<PathBuf> {
    vec![]
}

fn default_extensions() -> Vec<String> {
    tunes_metadata::ScanConfig::default().extensions
}

fn default_scan_on_start() -> bool {
    true
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        poll_interval_ms: default_poll_interval_ms(),
        restart_threshold_ms: default_restart_threshold_ms(),
    }
}

fn default_poll_interval_ms() -> u64 {
    tunes_playback::DEFAULT_POLL_INTERVAL.as_millis() as u64
}

fn default_restart_threshold_ms() -> u64 {
    tunes_playback::DEFAULT_RESTART_THRESHOLD.as_millis() as u64
}

impl Default for TunesConfig {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            library: default_library(),
            playback: default_playback(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_player_behavior() {
        let config = TunesConfig::default();
        assert_eq!(config.playback.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.playback.restart_threshold(), Duration::from_millis(3000));
        assert!(config.library.extensions.contains(&"mp3".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let mut config = TunesConfig::default();
        config.playback.poll_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConsoleError::Config(_))));
    }

    #[test]
    fn empty_extensions_are_rejected() {
        let mut config = TunesConfig::default();
        config.library.extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tunes.toml");
        std::fs::write(
            &path,
            r#"
[library]
scan_directories = ["/srv/music"]
extensions = [".FLAC"]

[playback]
poll_interval_ms = 100
"#,
        )
        .unwrap();

        let config = TunesConfig::load(Some(&path)).unwrap();
        assert_eq!(config.library.scan_directories, vec![PathBuf::from("/srv/music")]);
        assert_eq!(config.playback.poll_interval_ms, 100);
        assert_eq!(config.playback.restart_threshold_ms, 3000);
        assert_eq!(config.storage.database_url, "sqlite://tunes.db");
        assert_eq!(config.scan_config().extensions, vec!["flac".to_string()]);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = TunesConfig::load(Some(Path::new("/nonexistent/tunes.toml")));
        assert!(matches!(result, Err(ConsoleError::Config(_))));
    }
}
