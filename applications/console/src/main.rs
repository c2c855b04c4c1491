//! StrawHat Tunes - console music player

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tunes_console::{input, input::Input, render, App, AppCommand, TunesConfig};
use tunes_core::PlaylistStore;
use tunes_metadata::{LibraryIndex, MediaScanner};
use tunes_playback::{ClockEngine, QueueController};
use tunes_storage::LocalStore;

#[derive(Parser)]
#[command(name = "tunes")]
#[command(about = "StrawHat Tunes console music player", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "TUNES_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive player
    Run {
        /// Extra music directory (repeatable)
        #[arg(short, long)]
        music: Vec<PathBuf>,

        /// Skip the startup rescan
        #[arg(long)]
        no_scan: bool,
    },
    /// Scan music directories into the media index
    Scan {
        /// Directories to scan (defaults to the configured ones)
        paths: Vec<PathBuf>,
    },
    /// List playlists with their tracks
    Playlists,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the rendered view
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tunes=info,tunes_console=info,tunes_core=warn,tunes_storage=warn,\
                 tunes_metadata=info,tunes_playback=warn"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = TunesConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Run { music, no_scan } => {
            config.library.scan_directories.extend(music);
            if no_scan {
                config.library.scan_on_start = false;
            }
            run(config).await?;
        }
        Commands::Scan { paths } => {
            let roots = if paths.is_empty() {
                config.library.scan_directories.clone()
            } else {
                paths
            };
            scan(&config, &roots).await?;
        }
        Commands::Playlists => {
            list_playlists(&config).await?;
        }
    }

    Ok(())
}

async fn run(config: TunesConfig) -> anyhow::Result<()> {
    tracing::info!("Starting StrawHat Tunes");

    let pool = tunes_storage::open(&config.storage.database_url)
        .await
        .with_context(|| format!("opening database {}", config.storage.database_url))?;

    let roots = config.library.scan_directories.clone();
    if config.library.scan_on_start && !roots.is_empty() {
        MediaScanner::with_config(pool.clone(), config.scan_config())
            .scan(&roots, None)
            .await?;
    }

    let index = LibraryIndex::new(pool.clone(), roots);
    let durations = index.durations().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Could not read track durations");
        Default::default()
    });
    let queue = QueueController::with_restart_threshold(
        ClockEngine::new(durations),
        config.playback.restart_threshold(),
    );

    let app = App::new(
        Arc::new(index),
        Arc::new(LocalStore::new(pool)),
        queue,
        config.playback.poll_interval(),
    );
    let (handle, actor) = app.spawn();

    println!("{}", render::render(&handle.settled().await?));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match input::parse(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::Help) => {
                println!("{}", input::HELP);
                continue;
            }
            Ok(Input::Show) => {}
            Ok(Input::NewPlaylist(name)) => {
                handle.send(AppCommand::OpenCreatePlaylist).await?;
                handle.send(AppCommand::SetPlaylistDraft(name)).await?;
            }
            Ok(Input::Command(command)) => handle.send(command).await?,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        }
        println!("{}", render::render(&handle.settled().await?));
    }

    handle.shutdown().await;
    actor.await?;
    Ok(())
}

async fn scan(config: &TunesConfig, roots: &[PathBuf]) -> anyhow::Result<()> {
    if roots.is_empty() {
        anyhow::bail!("No music directories given or configured");
    }

    let pool = tunes_storage::open(&config.storage.database_url).await?;
    let stats = MediaScanner::with_config(pool, config.scan_config())
        .scan(roots, None)
        .await?;

    println!(
        "Scanned {} files: {} music, {} removed, {} errors",
        stats.files_discovered,
        stats.music_files,
        stats.files_removed,
        stats.errors.len()
    );
    for root in &stats.missing_roots {
        println!("  unreadable: {}", root.display());
    }
    for (path, error) in &stats.errors {
        println!("  {}: {}", path.display(), error);
    }
    Ok(())
}

async fn list_playlists(config: &TunesConfig) -> anyhow::Result<()> {
    let pool = tunes_storage::open(&config.storage.database_url).await?;
    let store = LocalStore::new(pool);

    let playlists = store.list_playlists().await?;
    if playlists.is_empty() {
        println!("No playlists");
    }
    for playlist in playlists {
        let tracks = store.list_tracks_in_playlist(playlist.id).await?;
        println!("{} ({} tracks)", playlist.name, tracks.len());
        for track in tracks {
            match track.artist {
                Some(artist) => println!("  {} - {}", track.title, artist),
                None => println!("  {}", track.title),
            }
        }
    }
    Ok(())
}
