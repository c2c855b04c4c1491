//! Interactive command parsing
//!
//! Users type 1-based list numbers; commands carry 0-based indices.

use crate::app::AppCommand;
use std::time::Duration;

pub const HELP: &str = "\
Navigation: library | playlists | open <n> | back
Playback:   play <n> | all | toggle | next | prev | seek <m:ss or seconds>
Playlists:  new [name] | name <text> | create | add <n> | to <n>
            remove <n> | confirm | cancel
Other:      grant | reload | show | help | quit";

/// One parsed console line
#[derive(Debug)]
pub enum Input {
    Command(AppCommand),
    /// Open the create dialog with a name already typed
    NewPlaylist(String),
    Show,
    Help,
    Quit,
}

/// Parse one line of user input
pub fn parse(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let command = match word.to_lowercase().as_str() {
        "" | "show" | "ls" => return Ok(Input::Show),
        "help" | "?" => return Ok(Input::Help),
        "quit" | "exit" | "q" => return Ok(Input::Quit),
        "new" if !rest.is_empty() => return Ok(Input::NewPlaylist(rest.to_string())),

        "library" | "lib" => AppCommand::ShowLibrary,
        "playlists" | "pl" => AppCommand::ShowPlaylists,
        "open" => AppCommand::OpenPlaylist(index(rest)?),
        "back" => AppCommand::Back,

        "play" => match rest {
            "" => AppCommand::TogglePlayPause,
            _ => AppCommand::PlayAt(index(rest)?),
        },
        "all" => AppCommand::PlayAll,
        "toggle" | "pause" | "p" => AppCommand::TogglePlayPause,
        "next" | "n" => AppCommand::Next,
        "prev" | "previous" => AppCommand::Previous,
        "seek" => AppCommand::SeekTo(offset(rest)?),

        "new" => AppCommand::OpenCreatePlaylist,
        "name" => AppCommand::SetPlaylistDraft(rest.to_string()),
        "create" => AppCommand::ConfirmCreatePlaylist,
        "add" => AppCommand::OpenAddToPlaylist(index(rest)?),
        "to" => AppCommand::AddToPlaylist(index(rest)?),
        "remove" | "rm" => AppCommand::RequestRemove(index(rest)?),
        "confirm" | "yes" => AppCommand::ConfirmRemove,
        "cancel" | "no" => AppCommand::DismissDialog,

        "grant" => AppCommand::GrantAccess,
        "reload" => AppCommand::Reload,

        other => return Err(format!("Unknown command `{}` (try `help`)", other)),
    };

    Ok(Input::Command(command))
}

fn index(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Expected a list number, got `{}`", arg)),
    }
}

fn offset(arg: &str) -> Result<Duration, String> {
    let invalid = || format!("Expected m:ss or seconds, got `{}`", arg);

    let seconds = match arg.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u64 = minutes.parse().map_err(|_| invalid())?;
            let seconds: u64 = seconds.parse().map_err(|_| invalid())?;
            if seconds >= 60 {
                return Err(invalid());
            }
            minutes * 60 + seconds
        }
        None => arg.parse().map_err(|_| invalid())?,
    };
    Ok(Duration::from_secs(seconds))
}
