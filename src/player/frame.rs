// src/player/frame.rs
//! What one render tick hands to the display.

use std::fmt;

use crate::audio::{Cell, VisualizationMode};
use crate::lyrics::LyricView;

/// Transport state shown in the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
    Finished,
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Stopped => "Stopped",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Finished => "Finished",
        };
        write!(f, "{}", s)
    }
}

/// Progress region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Progress {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Hz, when the container reports it
    pub sample_rate: Option<u32>,
    /// kbps
    pub bitrate: Option<u32>,
    pub position_secs: f64,
    pub duration_secs: f64,
    pub status: PlaybackStatus,
    pub mode: VisualizationMode,
    pub volume: f32,
    pub smoothing: f32,
}

impl Progress {
    /// Completed fraction in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        (self.position_secs / self.duration_secs).clamp(0.0, 1.0)
    }
}

/// One complete display update: equalizer, lyrics and progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayFrame {
    pub equalizer: Vec<Cell>,
    pub lyrics: LyricView,
    pub progress: Progress,
}

/// Anything that can show a `DisplayFrame`.
pub trait FrameSink: Send {
    /// Number of equalizer cells the next frame should carry.
    fn equalizer_width(&self) -> usize;

    /// Paint a frame. Called once per render tick.
    fn present(&mut self, frame: &DisplayFrame) -> anyhow::Result<()>;
}
