// src/ui/widgets/equalizer.rs
//! Equalizer row widget.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::audio::{Cell, VisualizationMode};

/// Styled spans for a rendered equalizer row.
pub fn equalizer_line(cells: &[Cell]) -> Line<'static> {
    Line::from(
        cells
            .iter()
            .map(|c| Span::styled(c.glyph.to_string(), Style::default().fg(c.color)))
            .collect::<Vec<_>>(),
    )
}

/// Render the equalizer panel.
pub fn render_equalizer(f: &mut Frame<'_>, area: Rect, cells: &[Cell], mode: VisualizationMode) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("2: Equalizer [{}]", mode));
    f.render_widget(
        Paragraph::new(equalizer_line(cells))
            .block(block)
            .alignment(Alignment::Left),
        area,
    );
}
