//! Core error types for StrawHat Tunes

use thiserror::Error;

/// Result type alias using `TunesError`
pub type Result<T> = std::result::Result<T, TunesError>;

/// Core error type for StrawHat Tunes
#[derive(Error, Debug)]
pub enum TunesError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Metadata parsing errors
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Playback engine errors
    #[error("Playback error: {0}")]
    Playback(String),

    /// Read access to the media index was not granted
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl TunesError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    /// Create a playback error
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Create an access denied error
    pub fn access_denied(msg: impl Into<String>) -> Self {
        Self::AccessDenied(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for TunesError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
