//! StrawHat Tunes Metadata
//!
//! Builds and serves the media index the catalog is loaded from.
//!
//! This crate provides:
//! - Tag reading from audio files (title, artist, duration)
//! - Directory scanning into the `media` table, with pruning of vanished files
//! - [`LibraryIndex`], the directory-backed [`tunes_core::SongSource`]
//!
//! # Example
//!
//! ```rust,no_run
//! use tunes_metadata::{LibraryIndex, MediaScanner};
//! use tunes_core::load_catalog;
//! use std::path::PathBuf;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = tunes_storage::open("sqlite://tunes.db").await?;
//! let roots = vec![PathBuf::from("/home/me/Music")];
//!
//! MediaScanner::new(pool.clone()).scan(&roots, None).await?;
//!
//! let index = LibraryIndex::new(pool, roots);
//! let catalog = load_catalog(&index).await;
//! # Ok(())
//! # }
//! ```

mod error;
mod index;
mod reader;
mod scanner;

pub use error::{MetadataError, Result};
pub use index::LibraryIndex;
pub use reader::{LoftyMetadataReader, TagInfo};
pub use scanner::{MediaScanner, ScanConfig, ScanProgress, ScanStats};
