// src/ui/widgets/mod.rs
//! Custom widgets for the versify UI.

pub mod equalizer;
pub mod lyrics;
pub mod player_panel;
pub mod playlist;

// Re-export widget rendering functions
pub use equalizer::render_equalizer;
pub use lyrics::render_lyrics;
pub use player_panel::render_player_panel;
pub use playlist::{PlaylistView, render_playlist};
