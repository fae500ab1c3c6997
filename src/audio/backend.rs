// src/audio/backend.rs
//! Audio output backend: the playback half of the player.
//!
//! The analysis loop only ever polls `position_ms`; it never drives
//! playback timing itself.

use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use rodio::{OutputStream, Sink};
use tracing::{debug, info, warn};

use super::buffer::SampleBuffer;
use super::source::BufferSource;
use crate::error::{PlayerError, PlayerResult};

/// Sentinel returned by `position_ms` when nothing is playing.
pub const NOT_PLAYING: i64 = -1;

/// Contract between the player core and whatever actually makes sound.
pub trait AudioBackend: Send + Sync {
    /// Queue `track` for playback, paused at position zero.
    fn load(&self, track: Arc<SampleBuffer>) -> PlayerResult<()>;
    fn play(&self);
    fn pause(&self);
    fn resume(&self);
    /// Drop the loaded track. Safe to call when nothing is loaded.
    fn stop(&self);
    /// Playback position in milliseconds, or `NOT_PLAYING`.
    fn position_ms(&self) -> i64;
    /// Output gain in `0.0..=1.0`.
    fn set_volume(&self, volume: f32);
}

/// Commands sent to the audio thread.
enum BackendCommand {
    Load(Arc<SampleBuffer>, Sender<PlayerResult<()>>),
}

/// rodio-backed output.
///
/// `OutputStream` must stay on the thread that created it, so a dedicated
/// audio thread owns it and builds sinks on request. The current sink is
/// shared so transport controls and position queries act on it directly.
pub struct RodioBackend {
    /// Sender to the audio thread for commands
    cmd_tx: Sender<BackendCommand>,
    sink: Arc<Mutex<Option<Sink>>>,
    volume: Mutex<f32>,
}

impl RodioBackend {
    /// Spawn the audio thread. Opening the output device is deferred to
    /// the thread; a missing device surfaces as an error from `load`.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<BackendCommand>();
        let sink: Arc<Mutex<Option<Sink>>> = Arc::new(Mutex::new(None));
        let sink_slot = sink.clone();

        thread::spawn(move || {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    warn!("No audio output available: {}", e);
                    let reason = e.to_string();
                    // Answer every request with the same failure until the
                    // sender is dropped.
                    while let Ok(cmd) = rx.recv() {
                        let BackendCommand::Load(_, reply) = cmd;
                        let _ = reply.send(Err(PlayerError::NoOutputDevice(reason.clone())));
                    }
                    return;
                }
            };
            info!("Audio thread started");

            while let Ok(cmd) = rx.recv() {
                match cmd {
                    BackendCommand::Load(track, reply) => {
                        let result = Sink::try_new(&handle)
                            .map_err(|e| PlayerError::Backend(e.to_string()))
                            .map(|new_sink| {
                                new_sink.pause();
                                new_sink.append(BufferSource::new(track));
                                new_sink
                            });
                        let result = match result {
                            Ok(new_sink) => match sink_slot.lock() {
                                Ok(mut slot) => {
                                    if let Some(old) = slot.replace(new_sink) {
                                        old.stop();
                                    }
                                    Ok(())
                                }
                                Err(_) => Err(PlayerError::Backend("sink lock poisoned".into())),
                            },
                            Err(e) => Err(e),
                        };
                        let _ = reply.send(result);
                    }
                }
            }

            if let Ok(mut slot) = sink_slot.lock() {
                if let Some(s) = slot.take() {
                    s.stop();
                }
            }
            // Keep stream alive until thread exits
            drop(stream);
            debug!("Audio thread exiting");
        });

        Self {
            cmd_tx: tx,
            sink,
            volume: Mutex::new(1.0),
        }
    }

    fn with_sink(&self, f: impl FnOnce(&Sink)) {
        if let Ok(slot) = self.sink.lock() {
            if let Some(s) = slot.as_ref() {
                f(s);
            }
        }
    }
}

impl Default for RodioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for RodioBackend {
    fn load(&self, track: Arc<SampleBuffer>) -> PlayerResult<()> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.cmd_tx
            .send(BackendCommand::Load(track, reply_tx))
            .map_err(|_| PlayerError::BackendGone)?;
        reply_rx.recv().map_err(|_| PlayerError::BackendGone)??;

        let volume = self.volume.lock().map(|v| *v).unwrap_or(1.0);
        self.with_sink(|s| s.set_volume(volume));
        Ok(())
    }

    fn play(&self) {
        self.with_sink(Sink::play);
    }

    fn pause(&self) {
        self.with_sink(Sink::pause);
    }

    fn resume(&self) {
        self.with_sink(Sink::play);
    }

    fn stop(&self) {
        if let Ok(mut slot) = self.sink.lock() {
            if let Some(s) = slot.take() {
                s.stop();
            }
        }
    }

    fn position_ms(&self) -> i64 {
        let Ok(slot) = self.sink.lock() else {
            return NOT_PLAYING;
        };
        match slot.as_ref() {
            Some(s) if !s.empty() => s.get_pos().as_millis() as i64,
            _ => NOT_PLAYING,
        }
    }

    fn set_volume(&self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        if let Ok(mut v) = self.volume.lock() {
            *v = volume;
        }
        self.with_sink(|s| s.set_volume(volume));
    }
}
