// src/app/state.rs
//! Application state management.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::backend::Backend;
use tracing::warn;

use crate::{
    audio::AudioBackend,
    config::Config,
    library::{Playlist, Track},
    player::{FrameSink, PlaybackStatus, Player},
    ui::{
        keybindings::{Action, key_to_action},
        tui::TerminalSink,
        widgets::PlaylistView,
    },
};

/// Main application state.
pub struct App<B: Backend + Send + 'static> {
    /// Player instance
    pub player: Player,
    /// Tracks and play order
    pub playlist: Playlist,
    /// Cursor in the playlist panel
    pub selected: usize,
    /// Terminal sink shared with the render loop
    ui: Arc<Mutex<TerminalSink<B>>>,
}

impl<B: Backend + Send + 'static> App<B> {
    /// Create a new application instance.
    pub fn new(
        config: Config,
        backend: Arc<dyn AudioBackend>,
        ui: Arc<Mutex<TerminalSink<B>>>,
        playlist: Playlist,
    ) -> Self {
        let sink: Arc<Mutex<dyn FrameSink>> = ui.clone();
        let app = Self {
            player: Player::new(config, backend, sink),
            playlist,
            selected: 0,
            ui,
        };
        app.sync_playlist();
        app
    }

    /// Start playing track `index` (or the first one) if there is anything
    /// to play.
    pub fn start(&mut self, index: Option<usize>) {
        if self.playlist.is_empty() {
            warn!("Playlist is empty, nothing to play");
            return;
        }
        let index = index.unwrap_or(0).min(self.playlist.len() - 1);
        self.selected = index;
        let track = self.playlist.select(index).cloned();
        self.play_track(track);
    }

    /// Handle a key event and return true if the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match key_to_action(&key) {
            Action::Down => {
                if self.selected + 1 < self.playlist.len() {
                    self.selected += 1;
                }
            }
            Action::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            Action::PlaySelected => {
                let track = self.playlist.select(self.selected).cloned();
                self.play_track(track);
            }
            Action::TogglePause => match self.player.status() {
                PlaybackStatus::Stopped | PlaybackStatus::Finished if self.player.is_loaded() => {
                    if let Err(e) = self.player.play() {
                        warn!("Could not start playback: {}", e);
                    }
                }
                _ => {
                    self.player.toggle_pause();
                }
            },
            Action::Stop => self.player.stop(),
            Action::NextTrack => {
                let track = self.playlist.next().cloned();
                self.play_track(track);
            }
            Action::PreviousTrack => {
                let track = self.playlist.prev().cloned();
                self.play_track(track);
            }
            Action::CycleMode => {
                self.player.cycle_mode();
            }
            Action::SelectMode(mode) => self.player.set_mode(mode),
            Action::VolumeUp => {
                self.player.volume_up();
            }
            Action::VolumeDown => {
                self.player.volume_down();
            }
            Action::SmoothingUp => {
                self.player.smoothing_up();
            }
            Action::SmoothingDown => {
                self.player.smoothing_down();
            }
            Action::CycleRepeat => {
                self.playlist.cycle_repeat();
            }
            Action::ToggleShuffle => {
                self.playlist.toggle_shuffle();
            }
            Action::ToggleSection(d) => {
                if let Ok(mut ui) = self.ui.lock() {
                    ui.toggle_section(d);
                }
            }
            Action::Quit => {
                self.player.stop();
                return true; // Signal to quit
            }
            Action::None => {}
        }

        self.sync_playlist();
        false
    }

    /// Periodic work from the foreground loop: reap a finished session,
    /// auto-advance, and paint when no session is painting.
    pub fn tick(&mut self) -> Result<()> {
        if self.player.poll_finished() {
            let track = self.playlist.advance_after_finish().cloned();
            if track.is_some() {
                self.play_track(track);
            }
            self.sync_playlist();
        }
        self.player.present_idle()
    }

    /// stop → load → play for `track`. Failures are logged and leave the
    /// player stopped.
    fn play_track(&mut self, track: Option<Track>) {
        let Some(track) = track else {
            return;
        };
        if let Some(index) = self.playlist.current_index() {
            self.selected = index;
        }
        if let Err(e) = self.player.switch_to(&track.path, track.lyrics.as_deref()) {
            warn!("Could not play {}: {}", track.path.display(), e);
        }
        self.sync_playlist();
    }

    /// Push the playlist panel state to the terminal sink.
    fn sync_playlist(&self) {
        let view = PlaylistView::from_playlist(&self.playlist, self.selected);
        if let Ok(mut ui) = self.ui.lock() {
            ui.set_playlist(view);
        }
    }
}
