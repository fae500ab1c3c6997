// src/ui/widgets/player_panel.rs
//! Now-playing panel: track, status line and progress gauge.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::player::{PlaybackStatus, Progress};
use crate::ui::icons::icon_for_status;

/// `mm:ss`
pub fn format_time(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// `mm:ss / mm:ss`
pub fn time_label(progress: &Progress) -> String {
    format!(
        "{} / {}",
        format_time(progress.position_secs),
        format_time(progress.duration_secs)
    )
}

/// `artist - title [album]`, leaving out whatever is unknown.
pub fn track_line(progress: &Progress) -> String {
    let mut line = if progress.artist.is_empty() {
        progress.title.clone()
    } else {
        format!("{} - {}", progress.artist, progress.title)
    };
    if !progress.album.is_empty() {
        line.push_str(&format!(" [{}]", progress.album));
    }
    line
}

/// `44.1 kHz | 320 kbps`, from whatever the container reported.
pub fn audio_details(progress: &Progress) -> Option<String> {
    let parts: Vec<String> = [
        progress
            .sample_rate
            .map(|hz| format!("{:.1} kHz", hz as f64 / 1000.0)),
        progress.bitrate.map(|kbps| format!("{} kbps", kbps)),
    ]
    .into_iter()
    .flatten()
    .collect();
    (!parts.is_empty()).then(|| parts.join(" | "))
}

/// Status line: transport, mode, volume, smoothing, audio format.
pub fn status_line(progress: &Progress) -> Line<'static> {
    let color = match progress.status {
        PlaybackStatus::Playing => Color::Green,
        PlaybackStatus::Paused => Color::Yellow,
        PlaybackStatus::Stopped => Color::Gray,
        PlaybackStatus::Finished => Color::Cyan,
    };
    let mut spans = vec![
        Span::styled(
            format!("{} {}", icon_for_status(progress.status), progress.status),
            Style::default().fg(color),
        ),
        Span::raw(format!(
            "  mode: {}  vol: {:.0}%  smoothing: {:.2}",
            progress.mode,
            progress.volume * 100.0,
            progress.smoothing
        )),
    ];
    if let Some(details) = audio_details(progress) {
        spans.push(Span::styled(
            format!("  {}", details),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Render the now-playing panel.
pub fn render_player_panel(f: &mut Frame<'_>, area: Rect, progress: &Progress) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Player"), area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(Line::styled(track_line(progress), Style::default().add_modifier(Modifier::BOLD)))
            .alignment(Alignment::Center),
        inner[0],
    );
    f.render_widget(
        Paragraph::new(status_line(progress)).alignment(Alignment::Center),
        inner[1],
    );

    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC))
            .ratio(progress.ratio())
            .label(time_label(progress)),
        inner[2],
    );
}
