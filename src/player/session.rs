// src/player/session.rs
//! One playing track: the analysis loop (producer) and the render loop
//! (consumer), each on its own thread.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicI64, Ordering},
};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::frame::{DisplayFrame, FrameSink, PlaybackStatus, Progress};
use super::shared::{Controls, SharedBands, SharedLyrics};
use crate::audio::visualizer::render;
use crate::audio::{AudioBackend, BandAnalyzer, NOT_PLAYING, SampleBuffer, TrackInfo};
use crate::config::Config;
use crate::error::PlayerResult;

/// Flags both loops poll at the top of every iteration.
#[derive(Debug, Default)]
pub struct SessionState {
    stopped: AtomicBool,
    paused: AtomicBool,
    finished: AtomicBool,
    /// Last position seen by the analysis loop, ms
    position_ms: AtomicI64,
}

impl SessionState {
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn position_ms(&self) -> i64 {
        self.position_ms.load(Ordering::Relaxed)
    }

    pub fn status(&self) -> PlaybackStatus {
        if self.is_finished() {
            PlaybackStatus::Finished
        } else if self.is_stopped() {
            PlaybackStatus::Stopped
        } else if self.is_paused() {
            PlaybackStatus::Paused
        } else {
            PlaybackStatus::Playing
        }
    }
}

/// Everything a session reads from or writes to.
#[derive(Clone)]
pub struct SessionContext {
    pub backend: Arc<dyn AudioBackend>,
    pub bands: Arc<SharedBands>,
    pub lyrics: Arc<SharedLyrics>,
    pub controls: Arc<Controls>,
    pub sink: Arc<Mutex<dyn FrameSink>>,
}

/// Loop cadence and analysis parameters, fixed for the session.
#[derive(Debug, Clone)]
struct LoopSettings {
    analysis_interval: Duration,
    render_interval: Duration,
    window_samples: usize,
}

/// A track being played and analyzed.
///
/// `stop` is the only terminal transition; it joins both loops and drops
/// the sample buffer. Dropping the session stops it.
pub struct PlaybackSession {
    state: Arc<SessionState>,
    backend: Arc<dyn AudioBackend>,
    track: Option<Arc<SampleBuffer>>,
    analysis: Option<JoinHandle<()>>,
    render: Option<JoinHandle<()>>,
}

impl PlaybackSession {
    /// Start the backend and spawn both loops. The track must already be
    /// loaded into the backend.
    pub fn start(
        ctx: SessionContext,
        track: Arc<SampleBuffer>,
        info: Arc<TrackInfo>,
        config: &Config,
    ) -> PlayerResult<Self> {
        let settings = LoopSettings {
            analysis_interval: config.timing.analysis_interval(),
            render_interval: config.timing.render_interval(),
            window_samples: config.window_samples(track.sample_rate()),
        };
        let analyzer = BandAnalyzer::with_config(config.visualizer.num_bands, &config.analysis);
        let state = Arc::new(SessionState::default());

        ctx.backend.play();

        let analysis = {
            let ctx = ctx.clone();
            let state = state.clone();
            let track = track.clone();
            let settings = settings.clone();
            thread::Builder::new()
                .name("versify-analysis".into())
                .spawn(move || analysis_loop(ctx, state, track, analyzer, settings))
        };
        let analysis = match analysis {
            Ok(handle) => handle,
            Err(e) => {
                ctx.backend.stop();
                return Err(e.into());
            }
        };

        let render = {
            let ctx = ctx.clone();
            let state = state.clone();
            let duration_secs = track.duration_secs();
            thread::Builder::new()
                .name("versify-render".into())
                .spawn(move || render_loop(ctx, state, info, duration_secs, settings))
        };

        let mut session = Self {
            state,
            backend: ctx.backend,
            track: Some(track),
            analysis: Some(analysis),
            render: None,
        };
        match render {
            Ok(handle) => session.render = Some(handle),
            Err(e) => {
                session.stop();
                return Err(e.into());
            }
        }

        info!("Playback session started");
        Ok(session)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> PlaybackStatus {
        self.state.status()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Both loops have exited or were asked to.
    pub fn is_stopped(&self) -> bool {
        self.state.is_stopped()
    }

    pub fn pause(&self) {
        if self.state.is_stopped() {
            return;
        }
        self.state.paused.store(true, Ordering::SeqCst);
        self.backend.pause();
        debug!("Session paused");
    }

    pub fn resume(&self) {
        if self.state.is_stopped() {
            return;
        }
        self.state.paused.store(false, Ordering::SeqCst);
        self.backend.resume();
        debug!("Session resumed");
    }

    /// Flip pause, returning whether the session is now paused.
    pub fn toggle_pause(&self) -> bool {
        if self.state.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
        self.state.is_paused()
    }

    /// Stop playback, join both loops and release the track. Idempotent.
    pub fn stop(&mut self) {
        if self.analysis.is_none() && self.render.is_none() && self.track.is_none() {
            return;
        }

        self.state.stopped.store(true, Ordering::SeqCst);
        self.backend.stop();

        for (name, handle) in [("analysis", self.analysis.take()), ("render", self.render.take())] {
            if let Some(handle) = handle {
                if handle.join().is_err() {
                    warn!("The {} loop panicked", name);
                }
            }
        }

        self.track = None;
        info!("Playback session stopped");
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Producer: position → window → bands → smoothing, plus lyric advance.
fn analysis_loop(
    ctx: SessionContext,
    state: Arc<SessionState>,
    track: Arc<SampleBuffer>,
    mut analyzer: BandAnalyzer,
    settings: LoopSettings,
) {
    debug!("Analysis loop started");
    while !state.is_stopped() {
        if state.is_paused() {
            thread::sleep(settings.analysis_interval);
            continue;
        }

        let position = ctx.backend.position_ms();
        if position == NOT_PLAYING {
            finish(&ctx, &state, "backend is no longer playing");
            break;
        }

        let window = track.extract_window(position.max(0) as u64, settings.window_samples);
        if window.is_empty() {
            finish(&ctx, &state, "reached end of track");
            break;
        }

        let raw = analyzer.compute(&window, track.sample_rate());
        ctx.bands.update(&raw);

        if let Some(line) = ctx.lyrics.advance(position as f64 / 1000.0, Instant::now()) {
            debug!("Lyric line {} active at {} ms", line, position);
        }
        state.position_ms.store(position, Ordering::Relaxed);

        thread::sleep(settings.analysis_interval);
    }
    debug!("Analysis loop exited");
}

/// End of track seen from inside the analysis loop. The loop cannot join
/// itself; the owner joins on its next `stop`.
fn finish(ctx: &SessionContext, state: &SessionState, reason: &str) {
    info!("Session finishing: {}", reason);
    state.finished.store(true, Ordering::SeqCst);
    state.stopped.store(true, Ordering::SeqCst);
    ctx.backend.stop();
}

/// Consumer: smoothed bands and lyric cursor → frame.
fn render_loop(
    ctx: SessionContext,
    state: Arc<SessionState>,
    info: Arc<TrackInfo>,
    duration_secs: f64,
    settings: LoopSettings,
) {
    debug!("Render loop started");
    let mut failed = false;
    while !state.is_stopped() {
        let now = Instant::now();
        ctx.lyrics.reveal(now);

        let bands = ctx.bands.snapshot();
        let lyrics = ctx.lyrics.view();
        let progress = Progress {
            title: info.title.clone(),
            artist: info.artist.clone(),
            album: info.album.clone(),
            sample_rate: info.sample_rate,
            bitrate: info.bitrate,
            position_secs: state.position_ms().max(0) as f64 / 1000.0,
            duration_secs,
            status: state.status(),
            mode: ctx.controls.mode(),
            volume: ctx.controls.volume(),
            smoothing: ctx.bands.smoothing_factor(),
        };

        let Ok(width) = ctx.sink.lock().map(|sink| sink.equalizer_width()) else {
            warn!("Frame sink lock poisoned, render loop exiting");
            break;
        };
        let frame = DisplayFrame {
            equalizer: render(&bands, width, progress.mode),
            lyrics,
            progress,
        };

        match ctx.sink.lock() {
            Ok(mut sink) => {
                if let Err(e) = sink.present(&frame) {
                    // Log once per session
                    if !failed {
                        warn!("Failed to present frame: {}", e);
                        failed = true;
                    }
                }
            }
            Err(_) => {
                warn!("Frame sink lock poisoned, render loop exiting");
                break;
            }
        }

        thread::sleep(settings.render_interval);
    }
    debug!("Render loop exited");
}
