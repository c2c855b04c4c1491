//! Console application error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConsoleError>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Tunes(#[from] tunes_core::TunesError),

    #[error("App actor stopped")]
    ActorStopped,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ConsoleError {
    fn from(err: config::ConfigError) -> Self {
        ConsoleError::Config(err.to_string())
    }
}

impl From<tunes_storage::StorageError> for ConsoleError {
    fn from(err: tunes_storage::StorageError) -> Self {
        ConsoleError::Tunes(err.into())
    }
}

impl From<tunes_metadata::MetadataError> for ConsoleError {
    fn from(err: tunes_metadata::MetadataError) -> Self {
        ConsoleError::Tunes(err.into())
    }
}
