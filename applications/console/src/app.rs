//! App actor
//!
//! One task owns [`AppState`], the queue controller and the now-playing
//! tracker. User intents arrive as [`AppCommand`]s; storage and catalog calls
//! run on spawned tasks and report back on an internal channel, so every
//! mutation happens inside [`App::run`].

use crate::error::{ConsoleError, Result};
use crate::state::{AppState, QueueSource, Transport, ViewMode};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tunes_core::{load_catalog, Access, Playlist, PlaylistId, PlaylistStore, SongSource, Track};
use tunes_playback::{NowPlayingTracker, PlaybackEngine, QueueController};

const COMMAND_BUFFER: usize = 64;

/// User intents; list indices refer to the lists in [`AppState`]
#[derive(Debug)]
pub enum AppCommand {
    // Navigation
    ShowLibrary,
    ShowPlaylists,
    OpenPlaylist(usize),
    Back,

    // Queue
    /// Play track `n` of whichever list is on screen
    PlayAt(usize),
    PlayLibraryTrack(usize),
    PlayPlaylistTrack(usize),
    PlayAll,
    TogglePlayPause,
    Next,
    Previous,
    SeekTo(Duration),

    // Dialogs
    OpenCreatePlaylist,
    SetPlaylistDraft(String),
    ConfirmCreatePlaylist,
    OpenAddToPlaylist(usize),
    AddToPlaylist(usize),
    RequestRemove(usize),
    ConfirmRemove,
    DismissDialog,

    // Library access
    GrantAccess,
    Reload,

    /// Reply with the current state
    Snapshot(oneshot::Sender<AppState>),
    /// Reply once no background task is outstanding
    Settled(oneshot::Sender<AppState>),
    Shutdown,
}

/// Results of background work, applied by the actor
#[derive(Debug)]
enum TaskOutput {
    Catalog { access: Access, tracks: Vec<Track> },
    Playlists(Vec<Playlist>),
    PlaylistTracks {
        playlist_id: PlaylistId,
        tracks: Vec<Track>,
    },
    TrackRemoved {
        playlist_id: PlaylistId,
        tracks: Vec<Track>,
    },
    /// Work finished with nothing to apply
    Done,
}

/// Cloneable sender side of the actor
#[derive(Clone)]
pub struct AppHandle {
    tx: mpsc::Sender<AppCommand>,
}

impl AppHandle {
    pub async fn send(&self, command: AppCommand) -> Result<()> {
        self.tx
            .send(command)
            .await
            .map_err(|_| ConsoleError::ActorStopped)
    }

    /// Current state, including anything still loading
    pub async fn snapshot(&self) -> Result<AppState> {
        let (reply, rx) = oneshot::channel();
        self.send(AppCommand::Snapshot(reply)).await?;
        rx.await.map_err(|_| ConsoleError::ActorStopped)
    }

    /// State after every outstanding background task has been applied
    pub async fn settled(&self) -> Result<AppState> {
        let (reply, rx) = oneshot::channel();
        self.send(AppCommand::Settled(reply)).await?;
        rx.await.map_err(|_| ConsoleError::ActorStopped)
    }

    pub async fn shutdown(&self) {
        let _ = self.tx.send(AppCommand::Shutdown).await;
    }
}

pub struct App<S, P, E>
where
    S: SongSource + 'static,
    P: PlaylistStore + 'static,
    E: PlaybackEngine + 'static,
{
    source: Arc<S>,
    store: Arc<P>,
    queue: QueueController<E>,
    tracker: NowPlayingTracker,
    state: AppState,
    poll_interval: Duration,
    results_tx: mpsc::UnboundedSender<TaskOutput>,
    results_rx: mpsc::UnboundedReceiver<TaskOutput>,
    pending: usize,
    idle_waiters: Vec<oneshot::Sender<AppState>>,
}

impl<S, P, E> App<S, P, E>
where
    S: SongSource + 'static,
    P: PlaylistStore + 'static,
    E: PlaybackEngine + 'static,
{
    pub fn new(
        source: Arc<S>,
        store: Arc<P>,
        queue: QueueController<E>,
        poll_interval: Duration,
    ) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            source,
            store,
            queue,
            tracker: NowPlayingTracker::new(),
            state: AppState::default(),
            poll_interval,
            results_tx,
            results_rx,
            pending: 0,
            idle_waiters: Vec::new(),
        }
    }

    /// Start the actor on the current runtime
    ///
    /// The catalog and playlist list start loading immediately.
    pub fn spawn(self) -> (AppHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        let task = tokio::spawn(self.run(rx));
        (AppHandle { tx }, task)
    }

    /// Drive the actor until shutdown or until every handle is dropped
    ///
    /// The engine is released when `self` drops at the end, whichever way
    /// the loop ends.
    pub async fn run(mut self, mut commands: mpsc::Receiver<AppCommand>) {
        tracing::info!("App actor started");
        self.reload_catalog(false);
        self.load_playlists();

        let mut poll = tokio::time::interval(self.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                command = commands.recv() => {
                    match command {
                        None | Some(AppCommand::Shutdown) => break,
                        Some(command) => self.handle_command(command),
                    }
                }
                Some(output) = self.results_rx.recv() => {
                    self.apply(output);
                    self.pending = self.pending.saturating_sub(1);
                    self.notify_if_idle();
                }
                _ = poll.tick() => {
                    self.refresh_now_playing();
                }
            }
        }

        tracing::info!("App actor stopped");
    }

    fn handle_command(&mut self, command: AppCommand) {
        tracing::debug!(?command, "Handling command");

        match command {
            AppCommand::ShowLibrary => self.show_library(),
            AppCommand::ShowPlaylists => {
                self.state.mode = ViewMode::PlaylistList;
                self.state.playlist_tracks.clear();
            }
            AppCommand::OpenPlaylist(index) => self.open_playlist(index),
            AppCommand::Back => {
                if matches!(self.state.mode, ViewMode::PlaylistDetail(_)) {
                    self.state.mode = ViewMode::PlaylistList;
                    self.state.playlist_tracks.clear();
                }
            }

            AppCommand::PlayAt(index) => match self.state.mode {
                ViewMode::Library => self.play_library_track(index),
                ViewMode::PlaylistDetail(_) => self.play_playlist_track(index),
                ViewMode::PlaylistList => {}
            },
            AppCommand::PlayLibraryTrack(index) => self.play_library_track(index),
            AppCommand::PlayPlaylistTrack(index) => self.play_playlist_track(index),
            AppCommand::PlayAll => self.play_playlist_track(0),
            AppCommand::TogglePlayPause => self.queue.toggle_play_pause(),
            AppCommand::Next => self.queue.next(),
            AppCommand::Previous => self.queue.previous(),
            AppCommand::SeekTo(offset) => self.queue.seek_to(offset),

            AppCommand::OpenCreatePlaylist => {
                self.state.dialogs.create_playlist = Some(String::new());
            }
            AppCommand::SetPlaylistDraft(draft) => {
                if let Some(current) = self.state.dialogs.create_playlist.as_mut() {
                    *current = draft;
                }
            }
            AppCommand::ConfirmCreatePlaylist => self.create_playlist(),
            AppCommand::OpenAddToPlaylist(index) => {
                if let Some(track) = self.state.visible_track(index).cloned() {
                    self.state.dialogs.add_to_playlist = Some(track);
                }
            }
            AppCommand::AddToPlaylist(index) => self.add_to_playlist(index),
            AppCommand::RequestRemove(index) => {
                if let Some(track) = self.state.playlist_tracks.get(index) {
                    self.state.dialogs.confirm_remove = Some(track.clone());
                }
            }
            AppCommand::ConfirmRemove => self.confirm_remove(),
            AppCommand::DismissDialog => self.state.dialogs.close_all(),

            AppCommand::GrantAccess => self.reload_catalog(true),
            AppCommand::Reload => {
                self.reload_catalog(false);
                self.load_playlists();
            }

            AppCommand::Snapshot(reply) => {
                let _ = reply.send(self.state.clone());
            }
            AppCommand::Settled(reply) => {
                self.idle_waiters.push(reply);
                self.notify_if_idle();
            }
            AppCommand::Shutdown => {}
        }

        self.refresh_now_playing();
    }

    fn apply(&mut self, output: TaskOutput) {
        match output {
            TaskOutput::Catalog { access, tracks } => {
                self.state.access = access;
                self.state.catalog = tracks;
                if self.queue.queue().is_empty() && !self.state.catalog.is_empty() {
                    let tracks = self.state.catalog.clone();
                    if self.set_queue(tracks, None, false) {
                        self.state.queue_source = QueueSource::Library;
                    }
                }
            }
            TaskOutput::Playlists(playlists) => {
                self.state.playlists = playlists;
            }
            TaskOutput::PlaylistTracks {
                playlist_id,
                tracks,
            } => {
                if self.state.viewing_playlist(playlist_id) {
                    self.state.playlist_tracks = tracks;
                }
            }
            TaskOutput::TrackRemoved {
                playlist_id,
                tracks,
            } => {
                if self.state.viewing_playlist(playlist_id) {
                    self.state.playlist_tracks = tracks.clone();
                }
                if self.state.queue_source == QueueSource::Playlist(playlist_id) {
                    let was_playing = self.queue.engine().is_playing();
                    self.set_queue(tracks, None, was_playing);
                }
            }
            TaskOutput::Done => {}
        }
        self.refresh_now_playing();
    }

    fn notify_if_idle(&mut self) {
        if self.pending == 0 {
            for waiter in self.idle_waiters.drain(..) {
                let _ = waiter.send(self.state.clone());
            }
        }
    }

    fn refresh_now_playing(&mut self) {
        self.state.now_playing = self.tracker.poll(&self.queue).clone();
        self.state.transport = Transport {
            can_previous: self.queue.can_previous(),
            can_toggle: self.queue.can_toggle(),
            can_next: self.queue.can_next(),
        };
    }

    /// Replace the queue; failures are logged and leave the old queue
    fn set_queue(&mut self, tracks: Vec<Track>, start: Option<usize>, auto_play: bool) -> bool {
        match self.queue.set_queue(tracks, start, auto_play) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to replace queue");
                false
            }
        }
    }

    /// Entering the library always reloads the whole catalog into the queue
    fn show_library(&mut self) {
        self.state.mode = ViewMode::Library;
        self.state.playlist_tracks.clear();
        if !self.state.catalog.is_empty() {
            let tracks = self.state.catalog.clone();
            if self.set_queue(tracks, None, false) {
                self.state.queue_source = QueueSource::Library;
            }
        }
    }

    fn open_playlist(&mut self, index: usize) {
        let Some(playlist) = self.state.playlists.get(index).cloned() else {
            return;
        };
        let playlist_id = playlist.id;
        self.state.mode = ViewMode::PlaylistDetail(playlist);
        self.state.playlist_tracks.clear();

        let store = Arc::clone(&self.store);
        self.spawn_task(async move {
            let tracks = store
                .list_tracks_in_playlist(playlist_id)
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!(playlist_id, error = %e, "Failed to load playlist tracks");
                    Vec::new()
                });
            TaskOutput::PlaylistTracks {
                playlist_id,
                tracks,
            }
        });
    }

    fn play_library_track(&mut self, index: usize) {
        if index >= self.state.catalog.len() {
            return;
        }
        let tracks = self.state.catalog.clone();
        if self.set_queue(tracks, Some(index), true) {
            self.state.queue_source = QueueSource::Library;
        }
    }

    /// Queue the open playlist from `index`; "play all" starts at 0
    fn play_playlist_track(&mut self, index: usize) {
        let Some(playlist_id) = self.state.mode.selected_playlist().map(|p| p.id) else {
            return;
        };
        if index >= self.state.playlist_tracks.len() {
            return;
        }
        let tracks = self.state.playlist_tracks.clone();
        if self.set_queue(tracks, Some(index), true) {
            self.state.queue_source = QueueSource::Playlist(playlist_id);
        }
    }

    fn create_playlist(&mut self) {
        let Some(draft) = self.state.dialogs.create_playlist.as_deref() else {
            return;
        };
        let name = draft.trim().to_string();
        if name.is_empty() {
            return;
        }
        self.state.dialogs.create_playlist = None;

        let store = Arc::clone(&self.store);
        self.spawn_task(async move {
            if let Err(e) = store.create_playlist(&name).await {
                tracing::warn!(name, error = %e, "Failed to create playlist");
                return TaskOutput::Done;
            }
            fetch_playlists(store.as_ref()).await
        });
    }

    fn add_to_playlist(&mut self, index: usize) {
        let Some(track) = self.state.dialogs.add_to_playlist.clone() else {
            return;
        };
        let Some(playlist_id) = self.state.playlists.get(index).map(|p| p.id) else {
            return;
        };
        self.state.dialogs.add_to_playlist = None;

        let store = Arc::clone(&self.store);
        self.spawn_task(async move {
            if let Err(e) = store.add_track_to_playlist(playlist_id, &track).await {
                tracing::warn!(playlist_id, track_id = track.id, error = %e, "Failed to add track");
            }
            TaskOutput::Done
        });
    }

    fn confirm_remove(&mut self) {
        let Some(track) = self.state.dialogs.confirm_remove.take() else {
            return;
        };
        let Some(playlist_id) = self.state.mode.selected_playlist().map(|p| p.id) else {
            return;
        };

        let store = Arc::clone(&self.store);
        self.spawn_task(async move {
            if let Err(e) = store.remove_track_from_playlist(playlist_id, track.id).await {
                tracing::warn!(playlist_id, track_id = track.id, error = %e, "Failed to remove track");
                return TaskOutput::Done;
            }
            match store.list_tracks_in_playlist(playlist_id).await {
                Ok(tracks) => TaskOutput::TrackRemoved {
                    playlist_id,
                    tracks,
                },
                Err(e) => {
                    tracing::warn!(playlist_id, error = %e, "Failed to reload playlist");
                    TaskOutput::Done
                }
            }
        });
    }

    fn reload_catalog(&mut self, request: bool) {
        let source = Arc::clone(&self.source);
        self.spawn_task(async move {
            let access = if request {
                source.request_access().await
            } else {
                source.access().await
            };
            let tracks = if access.is_granted() {
                load_catalog(source.as_ref()).await
            } else {
                tracing::info!("Media access not granted");
                Vec::new()
            };
            TaskOutput::Catalog { access, tracks }
        });
    }

    fn load_playlists(&mut self) {
        let store = Arc::clone(&self.store);
        self.spawn_task(async move { fetch_playlists(store.as_ref()).await });
    }

    /// Run `work` in the background; its output is applied by the actor
    ///
    /// A task that panics still reports back, so `pending` always drains.
    fn spawn_task<F>(&mut self, work: F)
    where
        F: Future<Output = TaskOutput> + Send + 'static,
    {
        self.pending += 1;
        let results = self.results_tx.clone();
        let task = tokio::spawn(work);
        tokio::spawn(async move {
            let output = task.await.unwrap_or_else(|e| {
                tracing::error!(error = %e, "Background task failed");
                TaskOutput::Done
            });
            let _ = results.send(output);
        });
    }
}

async fn fetch_playlists<P: PlaylistStore + ?Sized>(store: &P) -> TaskOutput {
    match store.list_playlists().await {
        Ok(playlists) => TaskOutput::Playlists(playlists),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load playlists");
            TaskOutput::Done
        }
    }
}
