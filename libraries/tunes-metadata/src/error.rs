//! Metadata-specific errors

use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata error types
#[derive(Error, Debug)]
pub enum MetadataError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Tag parsing error
    #[error("Tag parsing error: {0}")]
    ParseError(String),

    /// Writing to the media index failed
    #[error("Index error: {0}")]
    Index(#[from] tunes_core::TunesError),

    /// Blocking probe task was cancelled or panicked
    #[error("Scan task failed: {0}")]
    Task(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),
}

impl From<MetadataError> for tunes_core::TunesError {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::Index(inner) => inner,
            other => tunes_core::TunesError::metadata(other.to_string()),
        }
    }
}
