// src/audio/mod.rs
//! Audio module - decoding, playback backend, metadata and the equalizer
//! pipeline.

pub mod backend;
pub mod buffer;
pub mod decode;
pub mod metadata;
pub mod source;
pub mod visualizer;

// Re-export commonly used types
pub use backend::{AudioBackend, NOT_PLAYING, RodioBackend};
pub use buffer::SampleBuffer;
pub use decode::decode_file;
pub use metadata::{TrackInfo, load_track_info, track_info_or_fallback};
pub use source::BufferSource;
pub use visualizer::{BandAnalyzer, Cell, SmoothingStage, VisualizationMode, compute_bands};
