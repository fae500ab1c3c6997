// src/lyrics/lrc.rs
//! LRC lyric files: `[mm:ss.xx]text`, one timestamp group per line.

use std::path::Path;

use crate::error::{PlayerError, PlayerResult};

/// First timestamp given to converted plain-text lyrics, in seconds.
const PLAIN_TEXT_START: f64 = 10.0;
/// Spacing between converted plain-text lines, in seconds.
const PLAIN_TEXT_STEP: f64 = 5.0;

/// One timed lyric line.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    /// Seconds from track start
    pub timestamp: f64,
    pub text: String,
}

impl LyricLine {
    pub fn new(timestamp: f64, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            text: text.into(),
        }
    }

    /// Build from the `(minutes, seconds, milliseconds)` triple of an LRC tag.
    pub fn from_parts(minutes: u32, seconds: u32, milliseconds: u32, text: impl Into<String>) -> Self {
        let timestamp = minutes as f64 * 60.0 + seconds as f64 + milliseconds as f64 / 1000.0;
        Self::new(timestamp, text)
    }
}

/// Parse LRC content into lines sorted by timestamp. Lines sharing a
/// timestamp keep their file order. Metadata tags such as `[ar:...]` are
/// skipped; content without a single timed line is an error.
pub fn parse_lrc(content: &str) -> PlayerResult<Vec<LyricLine>> {
    let mut lines = Vec::new();

    for raw in content.lines() {
        let mut rest = raw.trim();
        let mut stamps = Vec::new();

        while let Some(inner) = rest.strip_prefix('[') {
            let Some(close) = inner.find(']') else {
                break;
            };
            match parse_timestamp(&inner[..close]) {
                Some(ts) => stamps.push(ts),
                // Metadata tag, or a bracket that is part of the text
                None => break,
            }
            rest = &inner[close + 1..];
        }

        let text = rest.trim();
        lines.extend(stamps.into_iter().map(|ts| LyricLine::new(ts, text)));
    }

    if lines.is_empty() {
        return Err(PlayerError::Lyrics("no timestamped lines".into()));
    }

    lines.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    Ok(lines)
}

/// `mm:ss`, `mm:ss.f{1,3}` or `mm:ss:ff`.
fn parse_timestamp(tag: &str) -> Option<f64> {
    let (minutes, rest) = tag.split_once(':')?;
    let minutes: u32 = minutes.trim().parse().ok()?;

    let (seconds, fraction) = match rest.split_once(['.', ':']) {
        Some((s, f)) => (s, Some(f)),
        None => (rest, None),
    };
    let seconds: u32 = seconds.trim().parse().ok()?;

    let milliseconds = match fraction {
        None => 0,
        Some(f) if f.is_empty() || f.len() > 3 || !f.bytes().all(|b| b.is_ascii_digit()) => {
            return None;
        }
        // "5" → 500, "45" → 450, "456" → 456
        Some(f) => f.parse::<u32>().ok()? * 10u32.pow(3 - f.len() as u32),
    };

    Some(LyricLine::from_parts(minutes, seconds, milliseconds, "").timestamp)
}

/// Give unsynchronized lyrics a basic timing: line `k` at `10 + 5k`
/// seconds. Blank lines are dropped but still take a slot.
pub fn from_plain_text(text: &str) -> Vec<LyricLine> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(k, line)| LyricLine::new(PLAIN_TEXT_START + k as f64 * PLAIN_TEXT_STEP, line.trim()))
        .collect()
}

/// Parse lyrics pulled out of a tag: LRC when it looks like LRC, plain
/// text otherwise.
pub fn from_embedded(text: &str) -> Vec<LyricLine> {
    if text.trim_start().starts_with('[') {
        if let Ok(lines) = parse_lrc(text) {
            return lines;
        }
    }
    from_plain_text(text)
}

/// Read and parse an `.lrc` file.
pub fn load_lrc(path: &Path) -> PlayerResult<Vec<LyricLine>> {
    let content = std::fs::read_to_string(path)?;
    parse_lrc(&content)
}
