// src/ui/tui.rs
//! Terminal frame sink and the foreground event loop.

use std::{
    io,
    sync::{Arc, Mutex},
};

use anyhow::Result;
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::Rect,
};
use tracing::info;

use crate::app::App;
use crate::audio::RodioBackend;
use crate::config::Config;
use crate::library::Playlist;
use crate::player::{DisplayFrame, FrameSink};
use crate::ui::{
    layout::{SectionVisibility, compute_layout, inner_width},
    widgets::{PlaylistView, render_equalizer, render_lyrics, render_player_panel, render_playlist},
};

/// Paints display frames onto a ratatui terminal. The playlist panel and
/// section visibility are set by the foreground and drawn with every frame.
pub struct TerminalSink<B: Backend> {
    terminal: Terminal<B>,
    playlist: PlaylistView,
    visibility: SectionVisibility,
}

impl<B: Backend> TerminalSink<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            playlist: PlaylistView::default(),
            visibility: SectionVisibility::default(),
        }
    }

    pub fn set_playlist(&mut self, playlist: PlaylistView) {
        self.playlist = playlist;
    }

    pub fn playlist(&self) -> &PlaylistView {
        &self.playlist
    }

    pub fn toggle_section(&mut self, section: usize) {
        self.visibility.toggle(section);
    }

    pub fn visibility(&self) -> SectionVisibility {
        self.visibility
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    fn area(&self) -> Rect {
        self.terminal
            .size()
            .map(|s| Rect::new(0, 0, s.width, s.height))
            .unwrap_or_default()
    }
}

impl<B: Backend + Send> FrameSink for TerminalSink<B> {
    fn equalizer_width(&self) -> usize {
        compute_layout(self.area(), &self.visibility)
            .equalizer
            .map(inner_width)
            .unwrap_or(0)
    }

    fn present(&mut self, frame: &DisplayFrame) -> Result<()> {
        let playlist = &self.playlist;
        let visibility = self.visibility;
        self.terminal
            .draw(|f| draw_frame(f, frame, playlist, &visibility))?;
        Ok(())
    }
}

/// Draw every visible section of `frame`.
pub fn draw_frame(
    f: &mut Frame<'_>,
    frame: &DisplayFrame,
    playlist: &PlaylistView,
    visibility: &SectionVisibility,
) {
    let layout = compute_layout(f.area(), visibility);

    if let Some(area) = layout.playlist {
        render_playlist(f, area, playlist);
    }
    if let Some(area) = layout.equalizer {
        render_equalizer(f, area, &frame.equalizer, frame.progress.mode);
    }
    if let Some(area) = layout.lyrics {
        render_lyrics(f, area, &frame.lyrics);
    }
    render_player_panel(f, layout.progress, &frame.progress);
}

/// Set up the terminal, run the player until the user quits, restore the
/// terminal.
pub fn run(config: Config, playlist: Playlist, start: Option<usize>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = run_app(config, playlist, start);

    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen).ok();
    result
}

fn run_app(config: Config, playlist: Playlist, start: Option<usize>) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let tick_rate = config.timing.render_interval();
    let ui = Arc::new(Mutex::new(TerminalSink::new(terminal)));
    let backend = Arc::new(RodioBackend::new());
    let mut app = App::new(config, backend, ui, playlist);
    app.start(start);

    loop {
        if event::poll(tick_rate)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.on_key(key) {
                    break;
                }
            }
        }
        app.tick()?;
    }

    info!("Quitting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    use crate::audio::{Cell, VisualizationMode};
    use crate::player::{PlaybackStatus, Progress};

    fn sink(width: u16, height: u16) -> TerminalSink<TestBackend> {
        TerminalSink::new(Terminal::new(TestBackend::new(width, height)).unwrap())
    }

    fn buffer_text(sink: &TerminalSink<TestBackend>) -> String {
        let buffer = sink.terminal().backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn equalizer_width_follows_layout() {
        let mut s = sink(100, 30);
        let with_playlist = s.equalizer_width();
        s.toggle_section(1);
        assert_eq!(s.equalizer_width(), 98);
        assert!(with_playlist < 98);
        s.toggle_section(2);
        assert_eq!(s.equalizer_width(), 0);
    }

    #[test]
    fn present_draws_all_regions() {
        let mut s = sink(80, 24);
        s.set_playlist(PlaylistView {
            entries: vec![("intro.mp3".into(), true)],
            current: Some(0),
            ..Default::default()
        });
        let width = s.equalizer_width();
        let frame = DisplayFrame {
            equalizer: vec![
                Cell {
                    glyph: '█',
                    color: ratatui::style::Color::Rgb(255, 0, 0),
                };
                width
            ],
            progress: Progress {
                title: "Intro".into(),
                position_secs: 65.0,
                duration_secs: 180.0,
                status: PlaybackStatus::Playing,
                mode: VisualizationMode::Bars,
                volume: 1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        s.present(&frame).unwrap();

        let text = buffer_text(&s);
        assert!(text.contains("intro.mp3"));
        assert!(text.contains("Intro"));
        assert!(text.contains("01:05 / 03:00"));
        assert!(text.contains("No lyrics for this track"));
        assert!(text.contains('█'));
    }
}
