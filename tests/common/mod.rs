// tests/common/mod.rs
//! Scripted backend, recording sink and helpers shared by the integration
//! tests.

#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicI64, Ordering},
};
use std::thread;
use std::time::{Duration, Instant};

use versify::audio::{AudioBackend, NOT_PLAYING, SampleBuffer};
use versify::config::Config;
use versify::error::{PlayerError, PlayerResult};
use versify::player::{DisplayFrame, FrameSink};

/// Backend whose position is set by the test.
#[derive(Default)]
pub struct FakeBackend {
    loaded: Mutex<Option<Arc<SampleBuffer>>>,
    position: AtomicI64,
    playing: AtomicBool,
    paused: AtomicBool,
    fail_loads: AtomicBool,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_position(&self, ms: i64) {
        self.position.store(ms, Ordering::SeqCst);
    }

    /// Make every following `load` fail as if no output device existed.
    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl AudioBackend for FakeBackend {
    fn load(&self, track: Arc<SampleBuffer>) -> PlayerResult<()> {
        self.record("load");
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(PlayerError::NoOutputDevice("no device in tests".into()));
        }
        *self.loaded.lock().unwrap() = Some(track);
        self.position.store(0, Ordering::SeqCst);
        Ok(())
    }

    fn play(&self) {
        self.record("play");
        self.playing.store(true, Ordering::SeqCst);
    }

    fn pause(&self) {
        self.record("pause");
        self.paused.store(true, Ordering::SeqCst);
    }

    fn resume(&self) {
        self.record("resume");
        self.paused.store(false, Ordering::SeqCst);
    }

    fn stop(&self) {
        self.record("stop");
        self.playing.store(false, Ordering::SeqCst);
        *self.loaded.lock().unwrap() = None;
    }

    fn position_ms(&self) -> i64 {
        if self.loaded.lock().unwrap().is_none() {
            return NOT_PLAYING;
        }
        self.position.load(Ordering::SeqCst)
    }

    fn set_volume(&self, _volume: f32) {
        self.record("volume");
    }
}

/// Frame sink that keeps every frame it is given.
pub struct RecordingSink {
    width: usize,
    frames: Arc<Mutex<Vec<DisplayFrame>>>,
}

impl RecordingSink {
    pub fn new(width: usize) -> (Arc<Mutex<dyn FrameSink>>, Arc<Mutex<Vec<DisplayFrame>>>) {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let sink = RecordingSink {
            width,
            frames: frames.clone(),
        };
        (Arc::new(Mutex::new(sink)), frames)
    }
}

impl FrameSink for RecordingSink {
    fn equalizer_width(&self) -> usize {
        self.width
    }

    fn present(&mut self, frame: &DisplayFrame) -> anyhow::Result<()> {
        self.frames.lock().unwrap().push(frame.clone());
        Ok(())
    }
}

/// Defaults with fast loops so tests finish quickly.
pub fn fast_config() -> Config {
    let mut config = Config::default();
    config.timing.analysis_interval_ms = 10;
    config.timing.render_interval_ms = 5;
    config.timing.typing_interval_ms = 5;
    config
}

/// `seconds` of a mono sine at `freq` Hz, amplitude 0.5.
pub fn sine(freq: f32, seconds: f32, sample_rate: u32) -> Vec<i16> {
    let n = (seconds * sample_rate as f32) as usize;
    (0..n)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            ((2.0 * std::f32::consts::PI * freq * t).sin() * 0.5 * i16::MAX as f32) as i16
        })
        .collect()
}

/// 16-bit PCM WAV file contents.
pub fn wav_bytes(samples: &[i16], channels: u16, sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let byte_rate = sample_rate * channels as u32 * 2;
    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVEfmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&(channels * 2).to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out
}

/// Poll `cond` for up to two seconds.
pub fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    cond()
}
