// src/lyrics/scheduler.rs
//! Active-line tracking and the typewriter reveal.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use ratatui::style::Color;
use ringbuf::{HeapRb, traits::*};

use super::lrc::LyricLine;

/// Display colors, picked by line index.
pub const LYRIC_COLORS: [Color; 6] = [
    Color::LightCyan,
    Color::LightMagenta,
    Color::LightYellow,
    Color::LightGreen,
    Color::LightBlue,
    Color::LightRed,
];

pub fn line_color(index: usize) -> Color {
    LYRIC_COLORS[index % LYRIC_COLORS.len()]
}

/// A line as it should be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewLine {
    pub text: String,
    pub color: Color,
}

/// Snapshot of the scheduler for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LyricView {
    /// Finished lines, oldest first
    pub completed: Vec<ViewLine>,
    /// Typed prefix of the active line
    pub typing: Option<ViewLine>,
    pub has_lyrics: bool,
}

/// Tracks which lyric line is active for the playback position and how
/// much of it has been revealed.
pub struct LyricScheduler {
    lines: Arc<[LyricLine]>,
    active: Option<usize>,
    typed_chars: usize,
    last_reveal: Instant,
    typing_interval: Duration,
    history: HeapRb<usize>,
    history_len: usize,
}

impl LyricScheduler {
    /// `lines` must be sorted by timestamp.
    pub fn new(lines: Arc<[LyricLine]>, history: usize, typing_interval: Duration, now: Instant) -> Self {
        Self {
            lines,
            active: None,
            typed_chars: 0,
            last_reveal: now,
            typing_interval,
            history: HeapRb::new(history.max(1)),
            history_len: history.max(1),
        }
    }

    /// Scheduler for a track without lyrics.
    pub fn empty(history: usize, typing_interval: Duration) -> Self {
        Self::new(Arc::from(Vec::new()), history, typing_interval, Instant::now())
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    pub fn has_lyrics(&self) -> bool {
        !self.lines.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn typed_chars(&self) -> usize {
        self.typed_chars
    }

    /// Indices of finished lines, oldest first.
    pub fn history(&self) -> Vec<usize> {
        self.history.iter().copied().collect()
    }

    /// Move the active line to match `current_time` (seconds). Returns the
    /// new active index when a new line started.
    pub fn advance(&mut self, current_time: f64, now: Instant) -> Option<usize> {
        let found = find_active(&self.lines, current_time);
        if found == self.active {
            return None;
        }

        if let Some(previous) = self.active {
            self.history.push_overwrite(previous);
        }
        self.active = found;
        self.typed_chars = 0;
        self.last_reveal = now;
        found
    }

    /// Reveal one more character of the active line if the typing interval
    /// has passed. Returns whether anything changed.
    pub fn reveal(&mut self, now: Instant) -> bool {
        let Some(index) = self.active else {
            return false;
        };
        let len = self.lines[index].text.chars().count();
        if self.typed_chars >= len {
            return false;
        }
        if now.duration_since(self.last_reveal) < self.typing_interval {
            return false;
        }
        self.typed_chars += 1;
        self.last_reveal = now;
        true
    }

    pub fn view(&self) -> LyricView {
        let completed = self
            .history
            .iter()
            .map(|&i| ViewLine {
                text: self.lines[i].text.clone(),
                color: line_color(i),
            })
            .collect();

        let typing = self.active.map(|i| ViewLine {
            text: self.lines[i].text.chars().take(self.typed_chars).collect(),
            color: line_color(i),
        });

        LyricView {
            completed,
            typing,
            has_lyrics: self.has_lyrics(),
        }
    }

    /// Forget progress, e.g. before replaying from the start.
    pub fn reset(&mut self, now: Instant) {
        self.active = None;
        self.typed_chars = 0;
        self.last_reveal = now;
        self.history = HeapRb::new(self.history_len);
    }
}

/// Greatest index whose timestamp is `<= current_time`.
pub fn find_active(lines: &[LyricLine], current_time: f64) -> Option<usize> {
    lines
        .partition_point(|line| line.timestamp <= current_time)
        .checked_sub(1)
}
