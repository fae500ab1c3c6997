// src/ui/icons.rs
//! Icon mappings for playlist entries and transport state.

use crate::player::PlaybackStatus;

/// Icon for a playlist entry.
pub fn icon_for_track(has_lyrics: bool) -> &'static str {
    if has_lyrics {
        "\u{f001}" // music note
    } else {
        "\u{f1c7}" // audio file
    }
}

/// Icon for the transport state.
pub fn icon_for_status(status: PlaybackStatus) -> &'static str {
    match status {
        PlaybackStatus::Playing => "⏵",
        PlaybackStatus::Paused => "⏸",
        PlaybackStatus::Stopped => "⏹",
        PlaybackStatus::Finished => "⏭",
    }
}
