//! Application state owned by the app actor
//!
//! Plain data: the actor mutates it, the view renders clones of it.

use tunes_core::{Access, Playlist, PlaylistId, Track};
use tunes_playback::NowPlaying;

/// Which screen is showing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Library,
    PlaylistList,
    PlaylistDetail(Playlist),
}

impl ViewMode {
    /// Playlist open in the detail screen
    pub fn selected_playlist(&self) -> Option<&Playlist> {
        match self {
            ViewMode::PlaylistDetail(playlist) => Some(playlist),
            _ => None,
        }
    }
}

/// Modal dialogs, each independent of the others and of the mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dialogs {
    /// Open create-playlist dialog with its name draft
    pub create_playlist: Option<String>,
    /// Track waiting for a target playlist
    pub add_to_playlist: Option<Track>,
    /// Track waiting for remove confirmation
    pub confirm_remove: Option<Track>,
}

impl Dialogs {
    pub fn any_open(&self) -> bool {
        self.create_playlist.is_some()
            || self.add_to_playlist.is_some()
            || self.confirm_remove.is_some()
    }

    pub fn close_all(&mut self) {
        *self = Self::default();
    }
}

/// The list the current queue was built from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueueSource {
    #[default]
    Library,
    Playlist(PlaylistId),
}

/// Transport buttons the view may enable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transport {
    pub can_previous: bool,
    pub can_toggle: bool,
    pub can_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub access: Access,
    pub catalog: Vec<Track>,
    pub playlists: Vec<Playlist>,
    /// Tracks of the playlist in the detail screen
    pub playlist_tracks: Vec<Track>,
    pub mode: ViewMode,
    pub dialogs: Dialogs,
    pub queue_source: QueueSource,
    pub now_playing: NowPlaying,
    pub transport: Transport,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            access: Access::Denied,
            catalog: Vec::new(),
            playlists: Vec::new(),
            playlist_tracks: Vec::new(),
            mode: ViewMode::default(),
            dialogs: Dialogs::default(),
            queue_source: QueueSource::default(),
            now_playing: NowPlaying::default(),
            transport: Transport::default(),
        }
    }
}

impl AppState {
    /// Whether the detail screen shows `playlist_id`
    pub fn viewing_playlist(&self, playlist_id: PlaylistId) -> bool {
        self.mode
            .selected_playlist()
            .is_some_and(|p| p.id == playlist_id)
    }

    /// Track at `index` of the track list on screen
    ///
    /// The playlist list screen shows no tracks.
    pub fn visible_track(&self, index: usize) -> Option<&Track> {
        match self.mode {
            ViewMode::Library => self.catalog.get(index),
            ViewMode::PlaylistDetail(_) => self.playlist_tracks.get(index),
            ViewMode::PlaylistList => None,
        }
    }
}
