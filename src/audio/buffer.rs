// src/audio/buffer.rs
//! Decoded PCM held in memory for the lifetime of a loaded track.

/// Full scale of a 16-bit sample.
const I16_FULL_SCALE: f32 = 32768.0;

/// Stereo 16-bit frames plus the rate they were decoded at.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    frames: Vec<[i16; 2]>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Build a buffer from stereo frames.
    pub fn new(frames: Vec<[i16; 2]>, sample_rate: u32) -> Self {
        Self {
            frames,
            sample_rate,
        }
    }

    /// Duplicate a mono signal into both channels.
    pub fn from_mono(samples: &[i16], sample_rate: u32) -> Self {
        let frames = samples.iter().map(|&s| [s, s]).collect();
        Self::new(frames, sample_rate)
    }

    /// Build from interleaved samples with `channels` channels. Channels
    /// beyond the first two are dropped; a trailing partial frame is ignored.
    pub fn from_interleaved(samples: &[i16], channels: u16, sample_rate: u32) -> Self {
        match channels {
            0 => Self::new(Vec::new(), sample_rate),
            1 => Self::from_mono(samples, sample_rate),
            n => {
                let frames = samples
                    .chunks_exact(n as usize)
                    .map(|frame| [frame[0], frame[1]])
                    .collect();
                Self::new(frames, sample_rate)
            }
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frames(&self) -> &[[i16; 2]] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Track length in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames.len() as f64 / self.sample_rate as f64
    }

    /// Extract a mono window of up to `window_samples` frames centered on
    /// `playback_ms`, scaled by 1/32768.
    ///
    /// Returns an empty vector when there is not enough audio left to
    /// analyze: fewer than half a window after the center, or a slice
    /// shorter than half a window. Callers treat that as end of analysis.
    pub fn extract_window(&self, playback_ms: u64, window_samples: usize) -> Vec<f32> {
        let total = self.frames.len();
        let half = window_samples / 2;
        if total == 0 || window_samples == 0 {
            return Vec::new();
        }

        let center = (playback_ms as f64 / 1000.0 * self.sample_rate as f64) as usize;
        if center >= total || total - center < half {
            return Vec::new();
        }

        let start = center.saturating_sub(half);
        let end = total.min(start + window_samples);
        if end - start < half {
            return Vec::new();
        }

        self.frames[start..end]
            .iter()
            .map(|&[l, r]| (l as f32 + r as f32) / 2.0 / I16_FULL_SCALE)
            .collect()
    }
}
