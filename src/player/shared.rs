// src/player/shared.rs
//! State shared between the foreground, the analysis loop and the render
//! loop. Every reader copies out under the lock and works on the copy.

use std::sync::{
    Mutex, MutexGuard,
    atomic::{AtomicU8, AtomicU32, Ordering},
};
use std::time::Instant;

use tracing::warn;

use crate::audio::{SmoothingStage, VisualizationMode};
use crate::lyrics::{LyricScheduler, LyricView};

/// Lock `mutex`, recovering the data if a loop panicked while holding it.
fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        warn!("{} lock was poisoned, recovering", what);
        poisoned.into_inner()
    })
}

/// Smoothed equalizer bands.
pub struct SharedBands {
    stage: Mutex<SmoothingStage>,
}

impl SharedBands {
    pub fn new(stage: SmoothingStage) -> Self {
        Self {
            stage: Mutex::new(stage),
        }
    }

    pub fn update(&self, raw: &[f32]) {
        lock(&self.stage, "bands").update(raw);
    }

    pub fn snapshot(&self) -> Vec<f32> {
        lock(&self.stage, "bands").snapshot()
    }

    pub fn num_bands(&self) -> usize {
        lock(&self.stage, "bands").num_bands()
    }

    pub fn smoothing_factor(&self) -> f32 {
        lock(&self.stage, "bands").smoothing_factor()
    }

    pub fn set_smoothing_factor(&self, factor: f32) -> bool {
        lock(&self.stage, "bands").set_smoothing_factor(factor)
    }

    pub fn reset(&self) {
        lock(&self.stage, "bands").reset();
    }
}

/// Lyric cursor of the current track.
pub struct SharedLyrics {
    scheduler: Mutex<LyricScheduler>,
}

impl SharedLyrics {
    pub fn new(scheduler: LyricScheduler) -> Self {
        Self {
            scheduler: Mutex::new(scheduler),
        }
    }

    /// Swap in the scheduler of a newly loaded track.
    pub fn replace(&self, scheduler: LyricScheduler) {
        *lock(&self.scheduler, "lyrics") = scheduler;
    }

    pub fn advance(&self, current_time: f64, now: Instant) -> Option<usize> {
        lock(&self.scheduler, "lyrics").advance(current_time, now)
    }

    pub fn reveal(&self, now: Instant) -> bool {
        lock(&self.scheduler, "lyrics").reveal(now)
    }

    pub fn view(&self) -> LyricView {
        lock(&self.scheduler, "lyrics").view()
    }

    pub fn active_index(&self) -> Option<usize> {
        lock(&self.scheduler, "lyrics").active_index()
    }

    pub fn reset(&self, now: Instant) {
        lock(&self.scheduler, "lyrics").reset(now);
    }
}

/// User-facing knobs the render loop reads every frame.
pub struct Controls {
    mode: AtomicU8,
    /// `f32` bits
    volume: AtomicU32,
}

impl Controls {
    pub fn new(mode: VisualizationMode, volume: f32) -> Self {
        Self {
            mode: AtomicU8::new(mode.as_u8()),
            volume: AtomicU32::new(volume.clamp(0.0, 1.0).to_bits()),
        }
    }

    pub fn mode(&self) -> VisualizationMode {
        VisualizationMode::from_u8(self.mode.load(Ordering::Relaxed))
    }

    pub fn set_mode(&self, mode: VisualizationMode) {
        self.mode.store(mode.as_u8(), Ordering::Relaxed);
    }

    pub fn volume(&self) -> f32 {
        f32::from_bits(self.volume.load(Ordering::Relaxed))
    }

    /// Store the clamped volume and return it.
    pub fn set_volume(&self, volume: f32) -> f32 {
        let volume = volume.clamp(0.0, 1.0);
        self.volume.store(volume.to_bits(), Ordering::Relaxed);
        volume
    }
}
