// src/library/mod.rs
//! Library module - finds songs and their lyrics, and keeps the play order.

pub mod detection;
pub mod playlist;

// Re-export commonly used types
pub use detection::{FileCategory, FileType, detect_file_type, is_audio};
pub use playlist::{Playlist, RepeatMode, Track, scan_songs, tracks_from_files};
