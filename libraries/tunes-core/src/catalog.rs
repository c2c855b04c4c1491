//! Song catalog loading
//!
//! Turns rows from the media index into the ordered, normalized catalog the
//! library screen and the initial queue are built from.

use crate::error::Result;
use crate::types::{RawSong, Track};
use async_trait::async_trait;

/// Placeholder artist written by the app itself
pub const UNKNOWN_ARTIST: &str = "<unknown>";

/// Placeholder some platforms store in the artist column (`MediaStore.UNKNOWN_STRING`)
pub const PLATFORM_UNKNOWN_ARTIST: &str = "<unknown>";

/// Title used when the index has no title for a row
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Whether the app may read the media index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied,
}

impl Access {
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// The media index the catalog is queried from
///
/// Implementations answer the "music only, sorted by title" query; callers
/// still filter and sort so a sloppy source cannot break catalog order.
#[async_trait]
pub trait SongSource: Send + Sync {
    /// Current read permission for the index
    async fn access(&self) -> Access;

    /// Ask for read permission again; returns the resulting state
    ///
    /// Defaults to re-checking, for sources with no interactive grant flow.
    async fn request_access(&self) -> Access {
        self.access().await
    }

    /// Query music rows ordered by title ascending
    async fn query_music(&self) -> Result<Vec<RawSong>>;
}

/// Normalize a raw artist string
///
/// Trims whitespace. Blank values and the unknown placeholders (compared
/// case-insensitively) become `None`, never an empty string.
pub fn normalize_artist(raw: Option<&str>) -> Option<String> {
    let value = raw?.trim();
    if value.is_empty()
        || value.eq_ignore_ascii_case(UNKNOWN_ARTIST)
        || value.eq_ignore_ascii_case(PLATFORM_UNKNOWN_ARTIST)
    {
        return None;
    }
    Some(value.to_string())
}

/// Build the catalog from raw index rows
///
/// Keeps music rows only, normalizes artists, fills missing titles and sorts
/// by title (stable, so equal titles keep index order).
pub fn build_catalog(rows: Vec<RawSong>) -> Vec<Track> {
    let mut tracks: Vec<Track> = rows
        .into_iter()
        .filter(|row| row.is_music)
        .map(|row| Track {
            id: row.id,
            title: row.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            artist: normalize_artist(row.artist.as_deref()),
            locator: row.locator,
        })
        .collect();

    tracks.sort_by(|a, b| a.title.cmp(&b.title));
    tracks
}

/// Load the catalog from `source`
///
/// A failed query and an empty index both yield an empty catalog; only the
/// log line tells them apart.
pub async fn load_catalog<S: SongSource + ?Sized>(source: &S) -> Vec<Track> {
    match source.query_music().await {
        Ok(rows) => {
            let tracks = build_catalog(rows);
            if tracks.is_empty() {
                tracing::debug!("Media index returned no music");
            } else {
                tracing::debug!(count = tracks.len(), "Catalog loaded");
            }
            tracks
        }
        Err(e) => {
            tracing::warn!(error = %e, "Catalog query failed, showing empty library");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TunesError;
    use proptest::prelude::*;

    struct FixedSource(Vec<RawSong>);

    #[async_trait]
    impl SongSource for FixedSource {
        async fn access(&self) -> Access {
            Access::Granted
        }

        async fn query_music(&self) -> Result<Vec<RawSong>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl SongSource for BrokenSource {
        async fn access(&self) -> Access {
            Access::Granted
        }

        async fn query_music(&self) -> Result<Vec<RawSong>> {
            Err(TunesError::storage("index unavailable"))
        }
    }

    #[test]
    fn placeholders_normalize_to_none() {
        for raw in ["", "   ", "<unknown>", "<UNKNOWN>", "  <Unknown>\t"] {
            assert_eq!(normalize_artist(Some(raw)), None, "raw = {:?}", raw);
        }
        assert_eq!(normalize_artist(None), None);
    }

    #[test]
    fn real_artist_is_trimmed() {
        assert_eq!(normalize_artist(Some("  Nami ")), Some("Nami".to_string()));
        assert_eq!(normalize_artist(Some("unknown")), Some("unknown".to_string()));
    }

    #[test]
    fn catalog_sorted_by_title_with_absent_artist() {
        let rows = vec![
            RawSong::music(1, Some("B"), Some("X")),
            RawSong::music(2, Some("A"), Some("Y")),
            RawSong::music(3, Some("C"), None),
        ];

        let catalog = build_catalog(rows);
        let titles: Vec<_> = catalog.iter().map(|t| t.title.as_str()).collect();

        assert_eq!(titles, ["A", "B", "C"]);
        assert_eq!(catalog[0].artist.as_deref(), Some("Y"));
        assert_eq!(catalog[1].artist.as_deref(), Some("X"));
        assert_eq!(catalog[2].artist, None);
    }

    #[test]
    fn non_music_rows_are_dropped() {
        let rows = vec![
            RawSong::music(1, Some("Ringtone"), None).not_music(),
            RawSong::music(2, Some("Song"), None),
        ];

        let catalog = build_catalog(rows);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].id, 2);
    }

    #[test]
    fn missing_title_becomes_unknown() {
        let catalog = build_catalog(vec![RawSong::music(9, None, Some("Artist"))]);
        assert_eq!(catalog[0].title, UNKNOWN_TITLE);
    }

    #[tokio::test]
    async fn failed_query_degrades_to_empty() {
        assert!(load_catalog(&BrokenSource).await.is_empty());
    }

    #[tokio::test]
    async fn load_catalog_uses_source_rows() {
        let source = FixedSource(vec![
            RawSong::music(1, Some("Zoro"), Some("<unknown>")),
            RawSong::music(2, Some("Luffy"), Some("Crew")),
        ]);

        let catalog = load_catalog(&source).await;
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].title, "Luffy");
        assert_eq!(catalog[1].artist, None);
    }

    proptest! {
        /// Property: blank or placeholder artists never survive normalization
        #[test]
        fn placeholder_artists_are_absent(
            pad_left in "[ \t]{0,3}",
            pad_right in "[ \t]{0,3}",
            upper in proptest::collection::vec(any::<bool>(), 9),
        ) {
            let marker: String = UNKNOWN_ARTIST
                .chars()
                .zip(upper)
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect();
            let raw = format!("{}{}{}", pad_left, marker, pad_right);
            prop_assert_eq!(normalize_artist(Some(&raw)), None);

            let blank = format!("{}{}", pad_left, pad_right);
            prop_assert_eq!(normalize_artist(Some(&blank)), None);
        }

        /// Property: any other non-blank artist comes back trimmed and otherwise unchanged
        #[test]
        fn real_artists_are_trimmed_only(
            core in "[A-Za-z0-9][A-Za-z0-9 &'.-]{0,20}[A-Za-z0-9]",
            pad in "[ \t]{0,3}",
        ) {
            prop_assume!(!core.eq_ignore_ascii_case(UNKNOWN_ARTIST));
            let raw = format!("{}{}{}", pad, core, pad);
            prop_assert_eq!(normalize_artist(Some(&raw)), Some(core.clone()));
        }
    }
}
