//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Index out of bounds
    #[error("Index out of bounds: {index} (queue length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Engine was used after release
    #[error("Playback engine already released")]
    Released,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

impl From<PlaybackError> for tunes_core::TunesError {
    fn from(err: PlaybackError) -> Self {
        tunes_core::TunesError::playback(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunes_core::TunesError;

    #[test]
    fn converts_into_playback_error() {
        let err: TunesError = PlaybackError::IndexOutOfBounds { index: 4, len: 2 }.into();
        assert!(matches!(&err, TunesError::Playback(msg) if msg.contains("queue length 2")));

        let err: TunesError = PlaybackError::Released.into();
        assert_eq!(err.to_string(), "Playback error: Playback engine already released");
    }
}
