// src/player/mod.rs
//! Player - track loading, transport controls and the playback session.

mod frame;
mod session;
mod shared;

pub use frame::{DisplayFrame, FrameSink, PlaybackStatus, Progress};
pub use session::{PlaybackSession, SessionContext, SessionState};
pub use shared::{Controls, SharedBands, SharedLyrics};

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tracing::{info, warn};

use crate::audio::visualizer::render;
use crate::audio::{
    AudioBackend, SampleBuffer, SmoothingStage, TrackInfo, VisualizationMode, decode_file,
    track_info_or_fallback,
};
use crate::config::Config;
use crate::error::{PlayerError, PlayerResult};
use crate::lyrics::{LyricScheduler, resolve_lyrics};

/// Volume change per key press.
pub const VOLUME_STEP: f32 = 0.1;
/// Smoothing factor change per key press.
pub const SMOOTHING_STEP: f32 = 0.05;

/// A decoded track ready to play.
struct LoadedTrack {
    path: PathBuf,
    info: Arc<TrackInfo>,
    buffer: Arc<SampleBuffer>,
    /// Sitting in the backend, not yet played
    primed: bool,
}

/// Owns the backend, the shared pipeline state and at most one session.
pub struct Player {
    config: Config,
    ctx: SessionContext,
    track: Option<LoadedTrack>,
    session: Option<PlaybackSession>,
}

impl Player {
    pub fn new(config: Config, backend: Arc<dyn AudioBackend>, sink: Arc<Mutex<dyn FrameSink>>) -> Self {
        let v = &config.visualizer;
        let bands = SharedBands::new(SmoothingStage::new(v.num_bands, v.decay_rate, v.smoothing_factor));
        let lyrics = SharedLyrics::new(LyricScheduler::empty(
            config.lyrics.history,
            config.timing.typing_interval(),
        ));
        let controls = Controls::new(v.mode, 1.0);
        backend.set_volume(controls.volume());

        Self {
            ctx: SessionContext {
                backend,
                bands: Arc::new(bands),
                lyrics: Arc::new(lyrics),
                controls: Arc::new(controls),
                sink,
            },
            config,
            track: None,
            session: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Decode `song`, resolve its lyrics and hand it to the backend. Any
    /// running session is stopped first. On error the player is left with
    /// nothing loaded.
    pub fn load(&mut self, song: &Path, lrc: Option<&Path>) -> PlayerResult<()> {
        self.stop();
        self.track = None;
        self.ctx.lyrics.replace(LyricScheduler::empty(
            self.config.lyrics.history,
            self.config.timing.typing_interval(),
        ));
        self.ctx.bands.reset();

        let buffer = Arc::new(decode_file(song)?);
        let info = track_info_or_fallback(song);
        self.ctx.backend.load(buffer.clone())?;

        let lines = resolve_lyrics(lrc, info.embedded_lyrics.as_deref());
        if lines.is_empty() {
            warn!("No lyrics for {}", song.display());
        }
        self.ctx.lyrics.replace(LyricScheduler::new(
            lines.into(),
            self.config.lyrics.history,
            self.config.timing.typing_interval(),
            Instant::now(),
        ));
        info!("Loaded {} ({:.1}s)", song.display(), buffer.duration_secs());

        self.track = Some(LoadedTrack {
            path: song.to_path_buf(),
            info: Arc::new(info),
            buffer,
            primed: true,
        });
        Ok(())
    }

    /// Start playback of the loaded track, or resume it when paused.
    /// Replays from the start after a stop or the end of the track.
    pub fn play(&mut self) -> PlayerResult<()> {
        if let Some(session) = &self.session {
            if !session.is_stopped() {
                session.resume();
                return Ok(());
            }
        }
        self.stop();

        let track = self.track.as_mut().ok_or(PlayerError::NotLoaded)?;
        if !track.primed {
            self.ctx.backend.load(track.buffer.clone())?;
            self.ctx.bands.reset();
            self.ctx.lyrics.reset(Instant::now());
        }
        track.primed = false;

        let session = PlaybackSession::start(
            self.ctx.clone(),
            track.buffer.clone(),
            track.info.clone(),
            &self.config,
        )?;
        info!("Playing {}", track.path.display());
        self.session = Some(session);
        Ok(())
    }

    /// Pause or resume. Returns whether playback is now paused.
    pub fn toggle_pause(&mut self) -> bool {
        match &self.session {
            Some(session) if !session.is_stopped() => session.toggle_pause(),
            _ => false,
        }
    }

    /// Stop and join the current session, if any.
    pub fn stop(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.stop();
        }
    }

    /// stop → load → play
    pub fn switch_to(&mut self, song: &Path, lrc: Option<&Path>) -> PlayerResult<()> {
        self.stop();
        self.load(song, lrc)?;
        self.play()
    }

    /// Reap a session that ended by itself. Returns true once per natural
    /// end of track.
    pub fn poll_finished(&mut self) -> bool {
        let finished = self.session.as_ref().is_some_and(PlaybackSession::is_finished);
        if finished {
            self.stop();
        }
        finished
    }

    pub fn status(&self) -> PlaybackStatus {
        match &self.session {
            Some(session) => session.status(),
            None => PlaybackStatus::Stopped,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.track.is_some()
    }

    pub fn track_info(&self) -> Option<&TrackInfo> {
        self.track.as_ref().map(|t| t.info.as_ref())
    }

    pub fn volume(&self) -> f32 {
        self.ctx.controls.volume()
    }

    pub fn set_volume(&self, volume: f32) -> f32 {
        let volume = self.ctx.controls.set_volume(volume);
        self.ctx.backend.set_volume(volume);
        volume
    }

    pub fn volume_up(&self) -> f32 {
        self.set_volume(step(self.volume(), VOLUME_STEP))
    }

    pub fn volume_down(&self) -> f32 {
        self.set_volume(step(self.volume(), -VOLUME_STEP))
    }

    pub fn smoothing_factor(&self) -> f32 {
        self.ctx.bands.smoothing_factor()
    }

    /// Set the smoothing factor; out-of-range values are rejected.
    pub fn set_smoothing_factor(&self, factor: f32) -> bool {
        self.ctx.bands.set_smoothing_factor(factor)
    }

    pub fn smoothing_up(&self) -> f32 {
        self.set_smoothing_factor(step(self.smoothing_factor(), SMOOTHING_STEP));
        self.smoothing_factor()
    }

    pub fn smoothing_down(&self) -> f32 {
        self.set_smoothing_factor(step(self.smoothing_factor(), -SMOOTHING_STEP));
        self.smoothing_factor()
    }

    pub fn mode(&self) -> VisualizationMode {
        self.ctx.controls.mode()
    }

    pub fn set_mode(&self, mode: VisualizationMode) {
        self.ctx.controls.set_mode(mode);
    }

    pub fn cycle_mode(&self) -> VisualizationMode {
        let next = self.mode().next();
        self.set_mode(next);
        next
    }

    /// A frame for when no session is painting: flat equalizer, the last
    /// lyric view and the loaded track's details.
    pub fn idle_frame(&self, width: usize) -> DisplayFrame {
        let bands = vec![0.0; self.ctx.bands.num_bands()];
        let mut progress = match &self.track {
            Some(t) => Progress {
                title: t.info.title.clone(),
                artist: t.info.artist.clone(),
                album: t.info.album.clone(),
                sample_rate: t.info.sample_rate,
                bitrate: t.info.bitrate,
                duration_secs: t.buffer.duration_secs(),
                ..Default::default()
            },
            None => Progress {
                title: "No track loaded".to_string(),
                ..Default::default()
            },
        };
        progress.status = self.status();
        progress.mode = self.mode();
        progress.volume = self.volume();
        progress.smoothing = self.smoothing_factor();

        DisplayFrame {
            equalizer: render(&bands, width, self.mode()),
            lyrics: self.ctx.lyrics.view(),
            progress,
        }
    }

    /// Paint `idle_frame` unless a session is already painting.
    pub fn present_idle(&self) -> anyhow::Result<()> {
        if self.session.as_ref().is_some_and(|s| !s.is_stopped()) {
            return Ok(());
        }
        let mut sink = self
            .ctx
            .sink
            .lock()
            .map_err(|_| anyhow::anyhow!("frame sink lock poisoned"))?;
        let frame = self.idle_frame(sink.equalizer_width());
        sink.present(&frame)
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.stop();
    }
}

/// `value + delta` clamped to `[0, 1]` and rounded to two decimals.
fn step(value: f32, delta: f32) -> f32 {
    ((value + delta) * 100.0).round().clamp(0.0, 100.0) / 100.0
}
