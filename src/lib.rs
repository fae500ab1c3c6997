// src/lib.rs
//! Versify - a terminal music player with synchronized lyrics and a live
//! equalizer.
//!
//! This library provides the audio analysis pipeline, the lyric scheduler
//! and the playback session that drives both, plus the terminal front end.

pub mod app;
pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod lyrics;
pub mod player;
pub mod ui;

pub use error::{PlayerError, PlayerResult};
