// src/ui/layout.rs
//! Layout computation for the UI panels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Visibility state for the optional sections.
#[derive(Debug, Clone, Copy)]
pub struct SectionVisibility {
    pub playlist: bool,
    pub equalizer: bool,
    pub lyrics: bool,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            playlist: true,
            equalizer: true,
            lyrics: true,
        }
    }
}

impl SectionVisibility {
    /// Toggle a section by number (1-3).
    pub fn toggle(&mut self, section: usize) {
        match section {
            1 => self.playlist = !self.playlist,
            2 => self.equalizer = !self.equalizer,
            3 => self.lyrics = !self.lyrics,
            _ => {}
        }
    }
}

/// Computed layout areas for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedLayout {
    pub playlist: Option<Rect>,
    pub equalizer: Option<Rect>,
    pub lyrics: Option<Rect>,
    /// Always shown
    pub progress: Rect,
}

/// Height of the progress panel: border, track line, status line, gauge.
const PROGRESS_HEIGHT: u16 = 5;
/// Height of the equalizer panel including borders.
const EQUALIZER_HEIGHT: u16 = 3;

/// Compute the layout based on total area and section visibility.
pub fn compute_layout(area: Rect, visibility: &SectionVisibility) -> ComputedLayout {
    // Playlist column on the left, 28% of the width when visible
    let (playlist, main) = if visibility.playlist {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
            .split(area);
        (Some(columns[0]), columns[1])
    } else {
        (None, area)
    };

    let mut constraints = Vec::new();
    if visibility.equalizer {
        constraints.push(Constraint::Length(EQUALIZER_HEIGHT));
    }
    if visibility.lyrics {
        constraints.push(Constraint::Min(3));
    }
    constraints.push(if visibility.lyrics {
        Constraint::Length(PROGRESS_HEIGHT)
    } else {
        Constraint::Min(PROGRESS_HEIGHT)
    });

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(main);

    let mut rows = rows.iter().copied();
    let equalizer = if visibility.equalizer { rows.next() } else { None };
    let lyrics = if visibility.lyrics { rows.next() } else { None };
    let progress = rows.next().unwrap_or(main);

    ComputedLayout {
        playlist,
        equalizer,
        lyrics,
        progress,
    }
}

/// Drawable width inside a bordered block.
pub fn inner_width(area: Rect) -> usize {
    area.width.saturating_sub(2) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sections_visible() {
        let layout = compute_layout(Rect::new(0, 0, 100, 30), &SectionVisibility::default());
        let playlist = layout.playlist.unwrap();
        let equalizer = layout.equalizer.unwrap();
        assert!((27..=29).contains(&playlist.width));
        assert_eq!(equalizer.x, playlist.width);
        assert_eq!(equalizer.height, EQUALIZER_HEIGHT);
        assert_eq!(layout.progress.height, PROGRESS_HEIGHT);
        assert!(layout.lyrics.is_some());
    }

    #[test]
    fn hidden_sections_give_space_back() {
        let mut vis = SectionVisibility::default();
        vis.toggle(1);
        vis.toggle(3);
        let layout = compute_layout(Rect::new(0, 0, 80, 24), &vis);
        assert!(layout.playlist.is_none());
        assert!(layout.lyrics.is_none());
        assert_eq!(layout.equalizer.unwrap().width, 80);
        assert_eq!(layout.progress.height, 24 - EQUALIZER_HEIGHT);
    }

    #[test]
    fn inner_width_excludes_borders() {
        assert_eq!(inner_width(Rect::new(0, 0, 42, 3)), 40);
        assert_eq!(inner_width(Rect::new(0, 0, 1, 3)), 0);
    }
}
