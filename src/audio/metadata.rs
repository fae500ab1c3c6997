// src/audio/metadata.rs
//! Track metadata extraction using Lofty.

use std::path::Path;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey};
use tracing::debug;

use crate::error::{PlayerError, PlayerResult};

/// Display information for the current track, plus any lyrics embedded in
/// its tags.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackInfo {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub sample_rate: Option<u32>,
    /// Bitrate in kbps.
    pub bitrate: Option<u32>,
    /// Unsynchronized lyrics (USLT frame or a comment described "lyrics").
    pub embedded_lyrics: Option<String>,
}

impl TrackInfo {
    /// Information derived from the file name alone.
    pub fn fallback(path: &Path) -> Self {
        Self {
            title: file_stem(path),
            artist: "Unknown Artist".into(),
            album: "Unknown Album".into(),
            sample_rate: None,
            bitrate: None,
            embedded_lyrics: None,
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read tags and audio properties for `path`.
pub fn load_track_info(path: &Path) -> PlayerResult<TrackInfo> {
    let tagged_file = Probe::open(path)
        .and_then(|probe| probe.read())
        .map_err(|e| PlayerError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut info = TrackInfo::fallback(path);

    if let Some(tag) = tagged_file.primary_tag() {
        if let Some(title) = tag.title().filter(|t| !t.trim().is_empty()) {
            info.title = title.into_owned();
        }
        if let Some(artist) = tag.artist().filter(|a| !a.trim().is_empty()) {
            info.artist = artist.into_owned();
        }
        if let Some(album) = tag.album().filter(|a| !a.trim().is_empty()) {
            info.album = album.into_owned();
        }

        // Prefer a dedicated lyrics frame, then a comment described "lyrics"
        info.embedded_lyrics = tag
            .get_string(&ItemKey::Lyrics)
            .map(str::to_owned)
            .or_else(|| {
                tag.get_items(&ItemKey::Comment)
                    .find(|item| item.description().eq_ignore_ascii_case("lyrics"))
                    .cloned()
                    .and_then(|item| item.into_value().into_string())
            })
            .filter(|l| !l.trim().is_empty());
    }

    let props = tagged_file.properties();
    info.sample_rate = props.sample_rate();
    info.bitrate = props.audio_bitrate();

    debug!("Metadata for {}: {:?}", path.display(), info);
    Ok(info)
}

/// Like `load_track_info`, but never fails: unreadable tags yield the
/// file-name fallback.
pub fn track_info_or_fallback(path: &Path) -> TrackInfo {
    load_track_info(path).unwrap_or_else(|e| {
        debug!("No metadata for {}: {}", path.display(), e);
        TrackInfo::fallback(path)
    })
}
