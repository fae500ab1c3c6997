// src/ui/widgets/lyrics.rs
//! Scrolling lyrics widget: finished lines above, the line being typed at
//! the bottom.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::lyrics::LyricView;

/// Typewriter cursor.
const CURSOR: &str = "▌";

/// Lines to draw, newest last, trimmed to `height`.
pub fn lyric_lines(view: &LyricView, height: usize) -> Vec<Line<'static>> {
    if !view.has_lyrics {
        return vec![Line::styled(
            "No lyrics for this track",
            Style::default().fg(Color::DarkGray),
        )];
    }

    let mut lines: Vec<Line<'static>> = view
        .completed
        .iter()
        .map(|l| Line::styled(l.text.clone(), Style::default().fg(l.color).add_modifier(Modifier::DIM)))
        .collect();

    if let Some(active) = &view.typing {
        lines.push(Line::from(vec![
            Span::styled(
                active.text.clone(),
                Style::default().fg(active.color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(CURSOR, Style::default().fg(active.color)),
        ]));
    }

    let skip = lines.len().saturating_sub(height);
    lines.into_iter().skip(skip).collect()
}

/// Render the lyrics panel.
pub fn render_lyrics(f: &mut Frame<'_>, area: Rect, view: &LyricView) {
    let height = area.height.saturating_sub(2) as usize;
    f.render_widget(
        Paragraph::new(lyric_lines(view, height))
            .block(Block::default().borders(Borders::ALL).title("3: Lyrics"))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}
