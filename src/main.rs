// src/main.rs
//! Versify - terminal entry point.

use std::{fs::File, path::PathBuf, sync::Mutex};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use versify::{
    cli::Cli,
    config,
    library::{Playlist, scan_songs, tracks_from_files},
    ui,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone())?;

    let mut config = config::discover(cli.config.as_deref());
    cli.apply_overrides(&mut config);
    config.validate()?;

    let tracks = if cli.files.is_empty() {
        let library = &config.library;
        scan_songs(&library.songs_dir, &library.lyrics_dir)
            .with_context(|| format!("Cannot read songs directory {}", library.songs_dir.display()))?
    } else {
        tracks_from_files(&cli.files, &config.library.lyrics_dir)
    };

    if tracks.is_empty() {
        bail!(
            "No songs found. Add MP3/WAV/OGG/FLAC files to '{}' and matching .lrc files to '{}', \
             or pass files on the command line.",
            config.library.songs_dir.display(),
            config.library.lyrics_dir.display()
        );
    }

    if cli.list {
        for (i, track) in tracks.iter().enumerate() {
            let lyrics = if track.lyrics.is_some() { "  [lrc]" } else { "" };
            println!("{:>3}. {}{}", i + 1, track.name(), lyrics);
        }
        return Ok(());
    }

    info!("Starting versify with {} tracks", tracks.len());
    ui::run(config, Playlist::new(tracks), cli.start_index())
}

/// Log to a file; the terminal is owned by the UI. `RUST_LOG` overrides
/// the default `versify=info`.
fn init_logging(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(|| std::env::temp_dir().join("versify.log"));
    let file = File::create(&path).with_context(|| format!("Cannot create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("versify=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
