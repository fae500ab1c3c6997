// src/lyrics/mod.rs
//! Lyrics - LRC parsing and playback-synchronized scheduling.

mod lrc;
mod scheduler;

use std::path::Path;

use tracing::{debug, warn};

pub use lrc::{LyricLine, from_embedded, from_plain_text, load_lrc, parse_lrc};
pub use scheduler::{LYRIC_COLORS, LyricScheduler, LyricView, ViewLine, find_active, line_color};

/// Resolve lyrics for a track: the `.lrc` file when given and parseable,
/// then lyrics embedded in the tags, else none. Failures only degrade to
/// the next source.
pub fn resolve_lyrics(lrc_path: Option<&Path>, embedded: Option<&str>) -> Vec<LyricLine> {
    if let Some(path) = lrc_path {
        match load_lrc(path) {
            Ok(lines) => {
                debug!("Loaded {} lyric lines from {}", lines.len(), path.display());
                return lines;
            }
            Err(e) => warn!("Could not load lyrics {}: {}", path.display(), e),
        }
    }

    if let Some(text) = embedded {
        let lines = from_embedded(text);
        if !lines.is_empty() {
            debug!("Using {} embedded lyric lines", lines.len());
            return lines;
        }
    }

    Vec::new()
}
