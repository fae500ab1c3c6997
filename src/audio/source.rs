// src/audio/source.rs
//! A rodio source that streams a shared `SampleBuffer`.

use std::{sync::Arc, time::Duration};

use rodio::Source;

use super::buffer::SampleBuffer;

/// Plays a decoded track straight from memory, interleaving left/right,
/// so the buffer used for analysis is also the one being heard.
pub struct BufferSource {
    buffer: Arc<SampleBuffer>,
    /// Next interleaved sample index (frame * 2 + channel)
    cursor: usize,
}

impl BufferSource {
    pub fn new(buffer: Arc<SampleBuffer>) -> Self {
        Self { buffer, cursor: 0 }
    }
}

impl Iterator for BufferSource {
    type Item = i16;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.buffer.frames().get(self.cursor / 2)?;
        let sample = frame[self.cursor % 2];
        self.cursor += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.buffer.len() * 2).saturating_sub(self.cursor);
        (remaining, Some(remaining))
    }
}

impl Source for BufferSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some((self.buffer.len() * 2).saturating_sub(self.cursor))
    }

    fn channels(&self) -> u16 {
        2
    }

    fn sample_rate(&self) -> u32 {
        self.buffer.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f64(self.buffer.duration_secs()))
    }
}
