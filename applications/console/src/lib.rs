//! StrawHat Tunes console
//!
//! The app actor, navigation state, text view and configuration behind the
//! `tunes` binary. Exposed as a library for integration tests.

pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod state;

pub use app::{App, AppCommand, AppHandle};
pub use config::TunesConfig;
pub use error::{ConsoleError, Result};
pub use state::{AppState, Dialogs, QueueSource, ViewMode};
