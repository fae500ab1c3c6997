// src/ui/widgets/playlist.rs
//! Playlist widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::library::{Playlist, RepeatMode};
use crate::ui::icons::icon_for_track;

/// What the playlist panel shows. Owned by the frame sink so the render
/// thread can draw it alongside every frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistView {
    /// (name, has lyrics)
    pub entries: Vec<(String, bool)>,
    /// Index of the track being played
    pub current: Option<usize>,
    /// Cursor of the list
    pub selected: usize,
    pub repeat: RepeatMode,
    pub shuffle: bool,
}

impl PlaylistView {
    pub fn from_playlist(playlist: &Playlist, selected: usize) -> Self {
        Self {
            entries: playlist
                .tracks()
                .iter()
                .map(|t| (t.name(), t.lyrics.is_some()))
                .collect(),
            current: playlist.current_index(),
            selected,
            repeat: playlist.repeat(),
            shuffle: playlist.is_shuffled(),
        }
    }
}

/// Render the playlist.
pub fn render_playlist(f: &mut Frame<'_>, area: Rect, view: &PlaylistView) {
    let items: Vec<ListItem> = view
        .entries
        .iter()
        .enumerate()
        .map(|(i, (name, has_lyrics))| {
            let item = ListItem::new(format!("{} {}", icon_for_track(*has_lyrics), name));
            if view.current == Some(i) {
                item.style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            } else {
                item
            }
        })
        .collect();

    let title = format!(
        "1: Playlist [repeat {}{}]",
        view.repeat,
        if view.shuffle { ", shuffle" } else { "" }
    );
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    let mut state = ListState::default();
    if !view.entries.is_empty() {
        state.select(Some(view.selected.min(view.entries.len() - 1)));
    }
    f.render_stateful_widget(list, area, &mut state);
}
