// src/cli.rs
//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::audio::VisualizationMode;
use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "versify", version, about = "Terminal music player with synchronized lyrics and a live equalizer")]
pub struct Cli {
    /// Audio files to play, in order. Without files the songs directory is scanned.
    pub files: Vec<PathBuf>,

    /// Config file (default: ./versify.toml, then the user config directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory scanned for songs
    #[arg(long, value_name = "DIR")]
    pub songs_dir: Option<PathBuf>,

    /// Directory searched for `<song>.lrc` files
    #[arg(long, value_name = "DIR")]
    pub lyrics_dir: Option<PathBuf>,

    /// Initial visualization mode
    #[arg(short, long, value_enum)]
    pub mode: Option<VisualizationMode>,

    /// Number of equalizer bands
    #[arg(long, value_name = "N")]
    pub bands: Option<usize>,

    /// Smoothing factor in [0, 1]
    #[arg(long, value_name = "FACTOR")]
    pub smoothing: Option<f32>,

    /// Print the playlist and exit
    #[arg(short, long)]
    pub list: bool,

    /// Track number to start with (1-based)
    #[arg(short, long, value_name = "N")]
    pub start: Option<usize>,

    /// Log file (the terminal belongs to the UI)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Command-line values win over the config file.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(dir) = &self.songs_dir {
            config.library.songs_dir = dir.clone();
        }
        if let Some(dir) = &self.lyrics_dir {
            config.library.lyrics_dir = dir.clone();
        }
        if let Some(mode) = self.mode {
            config.visualizer.mode = mode;
        }
        if let Some(bands) = self.bands {
            config.visualizer.num_bands = bands;
        }
        if let Some(smoothing) = self.smoothing {
            config.visualizer.smoothing_factor = smoothing;
        }
    }

    /// Zero-based start index.
    pub fn start_index(&self) -> Option<usize> {
        self.start.map(|n| n.saturating_sub(1))
    }
}
