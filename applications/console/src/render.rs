//! Text view
//!
//! Immediate-mode: every call renders the whole screen from one state.

use crate::state::{AppState, ViewMode};
use std::fmt::Write;
use tunes_core::Track;
use tunes_playback::format_ms;

const TITLE: &str = "StrawHat Tunes";

/// Render `state` as plain text
pub fn render(state: &AppState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", TITLE);

    let nav = match &state.mode {
        ViewMode::Library => "[Library]  Playlists",
        ViewMode::PlaylistList => " Library  [Playlists]",
        ViewMode::PlaylistDetail(_) => " Library  [Playlists]  Back",
    };
    let _ = writeln!(out, "{}", nav);
    out.push('\n');

    if !state.access.is_granted() {
        out.push_str("Permission is required to list and play your audio.\n");
        out.push_str("Type `grant` to check again.\n");
        return out;
    }

    match &state.mode {
        ViewMode::Library => {
            out.push_str("Library\n");
            if state.catalog.is_empty() {
                out.push_str("  No music found.\n");
            }
            render_tracks(&mut out, &state.catalog);
        }
        ViewMode::PlaylistList => {
            out.push_str("Playlists\n");
            if state.playlists.is_empty() {
                out.push_str("  No playlists yet. Create one with `new <name>`.\n");
            }
            for (i, playlist) in state.playlists.iter().enumerate() {
                let _ = writeln!(out, "  {:>3}. {}", i + 1, playlist.name);
            }
        }
        ViewMode::PlaylistDetail(playlist) => {
            let _ = writeln!(out, "{}", playlist.name);
            if state.playlist_tracks.is_empty() {
                out.push_str("  This playlist is empty.\n");
            } else {
                out.push_str("  `all` plays every track\n");
            }
            render_tracks(&mut out, &state.playlist_tracks);
        }
    }

    render_dialogs(&mut out, state);
    render_now_playing(&mut out, state);
    out
}

fn render_tracks(out: &mut String, tracks: &[Track]) {
    for (i, track) in tracks.iter().enumerate() {
        match &track.artist {
            Some(artist) => {
                let _ = writeln!(out, "  {:>3}. {} - {}", i + 1, track.title, artist);
            }
            None => {
                let _ = writeln!(out, "  {:>3}. {}", i + 1, track.title);
            }
        }
    }
}

fn render_dialogs(out: &mut String, state: &AppState) {
    let dialogs = &state.dialogs;

    if let Some(draft) = &dialogs.create_playlist {
        out.push_str("\n== Create playlist ==\n");
        let _ = writeln!(out, "Name: {}", draft);
        out.push_str("`name <text>` to edit, `create` to confirm, `cancel` to close\n");
    }

    if let Some(track) = &dialogs.add_to_playlist {
        let _ = write!(out, "\n== Add \"{}\" to playlist ==\n", track.title);
        if state.playlists.is_empty() {
            out.push_str("No playlists yet. Create one first.\n");
        }
        for (i, playlist) in state.playlists.iter().enumerate() {
            let _ = writeln!(out, "  {:>3}. {}", i + 1, playlist.name);
        }
        out.push_str("`to <n>` to choose, `cancel` to close\n");
    }

    if let Some(track) = &dialogs.confirm_remove {
        out.push_str("\n== Remove from playlist? ==\n");
        let _ = writeln!(out, "Remove \"{}\" from this playlist?", track.title);
        out.push_str("`confirm` to remove, `cancel` to keep\n");
    }
}

fn render_now_playing(out: &mut String, state: &AppState) {
    let now = &state.now_playing;
    out.push('\n');

    let Some(track) = &now.track else {
        out.push_str("Nothing playing\n");
        return;
    };

    let marker = if now.is_playing { ">" } else { "||" };
    let _ = write!(out, "{} {}", marker, track.title);
    if let Some(artist) = &track.artist {
        let _ = write!(out, " - {}", artist);
    }
    let _ = writeln!(
        out,
        "  {} / {}",
        format_ms(now.position_ms as i64),
        format_ms(now.duration_ms as i64)
    );

    let transport = state.transport;
    let _ = writeln!(
        out,
        "{}prev  {}{}  {}next",
        if transport.can_previous { "" } else { "~" },
        if transport.can_toggle { "" } else { "~" },
        if now.is_playing { "pause" } else { "play" },
        if transport.can_next { "" } else { "~" },
    );
}
