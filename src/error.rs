// src/error.rs
//! Player error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by loading and controlling playback.
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Decoded track is empty: {0}")]
    EmptyTrack(PathBuf),

    #[error("No audio output device available: {0}")]
    NoOutputDevice(String),

    #[error("Audio backend error: {0}")]
    Backend(String),

    #[error("Audio thread is gone")]
    BackendGone,

    #[error("No track loaded")]
    NotLoaded,

    #[error("Invalid lyrics: {0}")]
    Lyrics(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for player operations.
pub type PlayerResult<T> = Result<T, PlayerError>;
