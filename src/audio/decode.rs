// src/audio/decode.rs
//! Full-track decoding into a `SampleBuffer`.

use std::{fs::File, io::BufReader, path::Path};

use rodio::{Decoder, Source};
use tracing::info;

use super::buffer::SampleBuffer;
use crate::error::{PlayerError, PlayerResult};

/// Decode `path` completely into memory as 16-bit stereo frames.
pub fn decode_file(path: &Path) -> PlayerResult<SampleBuffer> {
    let file = File::open(path).map_err(|source| PlayerError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| PlayerError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let channels = decoder.channels();
    let sample_rate = decoder.sample_rate();
    if channels == 0 || sample_rate == 0 {
        return Err(PlayerError::Decode {
            path: path.to_path_buf(),
            reason: format!("unsupported layout: {channels} channels at {sample_rate} Hz"),
        });
    }

    let samples: Vec<i16> = decoder.collect();
    let buffer = SampleBuffer::from_interleaved(&samples, channels, sample_rate);
    if buffer.is_empty() {
        return Err(PlayerError::EmptyTrack(path.to_path_buf()));
    }

    info!(
        "Decoded {}: {} frames, {} Hz, {} ch, {:.1}s",
        path.display(),
        buffer.len(),
        sample_rate,
        channels,
        buffer.duration_secs()
    );

    Ok(buffer)
}
