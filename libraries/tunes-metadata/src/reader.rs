//! Tag reader implementation using lofty

use crate::error::{MetadataError, Result};
use lofty::{AudioFile, TaggedFileExt};
use std::path::Path;

/// The tag fields the media index keeps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInfo {
    pub title: Option<String>,
    /// Artist text exactly as tagged; normalization happens at catalog load
    pub artist: Option<String>,
    pub duration_ms: Option<u64>,
}

/// Tag reader using the lofty library
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyMetadataReader;

impl LoftyMetadataReader {
    /// Create a new tag reader
    pub fn new() -> Self {
        Self
    }

    fn extract_from_tag(tag: &lofty::Tag, info: &mut TagInfo) {
        for item in tag.items() {
            match item.key() {
                lofty::ItemKey::TrackTitle => {
                    info.title = item.value().text().map(|s| s.to_string());
                }
                lofty::ItemKey::TrackArtist => {
                    info.artist = item.value().text().map(|s| s.to_string());
                }
                _ => {}
            }
        }
    }

    /// Probe `path` and read its tags
    ///
    /// Files without tags still succeed, with only the duration filled in.
    pub fn read(&self, path: &Path) -> Result<TagInfo> {
        if !path.is_file() {
            return Err(MetadataError::FileNotFound(path.display().to_string()));
        }

        let tagged_file = lofty::read_from_path(path)?;

        let mut info = TagInfo {
            duration_ms: Some(tagged_file.properties().duration().as_millis() as u64),
            ..TagInfo::default()
        };

        if let Some(tag) = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.tags().first())
        {
            Self::extract_from_tag(tag, &mut info);
        }

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_nonexistent_file_returns_error() {
        let reader = LoftyMetadataReader::new();
        let result = reader.read(Path::new("/nonexistent/file.mp3"));
        assert!(matches!(result, Err(MetadataError::FileNotFound(_))));
    }

    #[test]
    fn read_directory_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LoftyMetadataReader::new().read(dir.path()).is_err());
    }

    #[test]
    fn read_garbage_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.mp3");
        std::fs::write(&path, b"definitely not audio").unwrap();

        assert!(LoftyMetadataReader::new().read(&path).is_err());
    }
}
