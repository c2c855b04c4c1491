mod playlist;
mod track;

pub use playlist::{Playlist, PlaylistEntry, PlaylistId};
pub use track::{Locator, RawSong, Track, TrackId};
