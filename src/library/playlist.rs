// src/library/playlist.rs
//! Track list with next/previous, repeat and shuffle.

use std::fmt;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use super::detection::is_audio;
use crate::error::PlayerResult;

/// A playable file and its lyrics, if any were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    pub lyrics: Option<PathBuf>,
}

impl Track {
    /// Pair `path` with `<lyrics_dir>/<stem>.lrc`, or a `.lrc` next to the
    /// song.
    pub fn with_lyrics_from(path: PathBuf, lyrics_dir: &Path) -> Self {
        let lyrics = path.file_stem().and_then(|stem| {
            let name = format!("{}.lrc", stem.to_string_lossy());
            let beside = path.with_file_name(&name);
            [lyrics_dir.join(&name), beside].into_iter().find(|p| p.is_file())
        });
        Self { path, lyrics }
    }

    /// File name for display.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// List the audio files in `songs_dir`, sorted by name, each paired with
/// its lyrics.
pub fn scan_songs(songs_dir: &Path, lyrics_dir: &Path) -> PlayerResult<Vec<Track>> {
    let mut songs: Vec<PathBuf> = std::fs::read_dir(songs_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_audio(path))
        .collect();
    songs.sort();

    let tracks: Vec<Track> = songs
        .into_iter()
        .map(|path| Track::with_lyrics_from(path, lyrics_dir))
        .collect();
    info!(
        "Found {} songs in {} ({} with lyrics)",
        tracks.len(),
        songs_dir.display(),
        tracks.iter().filter(|t| t.lyrics.is_some()).count()
    );
    Ok(tracks)
}

/// Tracks for files named on the command line, in the given order.
pub fn tracks_from_files(files: &[PathBuf], lyrics_dir: &Path) -> Vec<Track> {
    files
        .iter()
        .map(|path| Track::with_lyrics_from(path.clone(), lyrics_dir))
        .collect()
}

/// What happens when a track ends by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Stop after the last track
    #[default]
    None,
    /// Wrap around to the first track
    All,
    /// Replay the same track
    One,
}

impl RepeatMode {
    /// none → all → one → none
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::All,
            Self::All => Self::One,
            Self::One => Self::None,
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "off",
            Self::All => "all",
            Self::One => "one",
        };
        write!(f, "{}", s)
    }
}

/// Ordered tracks plus a cursor. The play order is a permutation of the
/// track indices so shuffling never moves the tracks themselves.
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
    order: Vec<usize>,
    /// Position in `order`
    cursor: Option<usize>,
    repeat: RepeatMode,
    shuffle: bool,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        let order = (0..tracks.len()).collect();
        Self {
            tracks,
            order,
            cursor: None,
            repeat: RepeatMode::default(),
            shuffle: false,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    /// Index into `tracks` of the current track.
    pub fn current_index(&self) -> Option<usize> {
        self.cursor.map(|c| self.order[c])
    }

    pub fn current(&self) -> Option<&Track> {
        self.current_index().map(|i| &self.tracks[i])
    }

    /// Make track `index` current.
    pub fn select(&mut self, index: usize) -> Option<&Track> {
        let pos = self.order.iter().position(|&i| i == index)?;
        self.cursor = Some(pos);
        self.current()
    }

    /// User-requested next: always wraps.
    pub fn next(&mut self) -> Option<&Track> {
        self.step(1)
    }

    /// User-requested previous: always wraps.
    pub fn prev(&mut self) -> Option<&Track> {
        self.step(-1)
    }

    fn step(&mut self, direction: isize) -> Option<&Track> {
        if self.order.is_empty() {
            return None;
        }
        let len = self.order.len() as isize;
        let pos = match self.cursor {
            Some(c) => (c as isize + direction).rem_euclid(len) as usize,
            // Nothing current yet: start from first or last based on direction
            None if direction > 0 => 0,
            None => self.order.len() - 1,
        };
        self.cursor = Some(pos);
        self.current()
    }

    /// Track to play after the current one finished by itself, honoring
    /// the repeat mode. `None` means playback should stop.
    pub fn advance_after_finish(&mut self) -> Option<&Track> {
        let cursor = self.cursor?;
        match self.repeat {
            RepeatMode::One => self.current(),
            RepeatMode::All => self.next(),
            RepeatMode::None if cursor + 1 < self.order.len() => self.next(),
            RepeatMode::None => None,
        }
    }

    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.next();
        debug!("Repeat mode: {}", self.repeat);
        self.repeat
    }

    /// Toggle shuffle. Turning it on keeps the current track first in the
    /// new order; turning it off restores file order.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.toggle_shuffle_with(&mut rand::thread_rng())
    }

    pub fn toggle_shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let current = self.current_index();
        self.shuffle = !self.shuffle;

        if self.shuffle {
            self.order.shuffle(rng);
            if let Some(index) = current {
                if let Some(pos) = self.order.iter().position(|&i| i == index) {
                    self.order.swap(0, pos);
                }
                self.cursor = Some(0);
            }
        } else {
            self.order = (0..self.tracks.len()).collect();
            self.cursor = current;
        }

        debug!("Shuffle: {}", self.shuffle);
        self.shuffle
    }
}
