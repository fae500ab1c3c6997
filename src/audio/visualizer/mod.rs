// src/audio/visualizer/mod.rs
//! Equalizer pipeline: FFT band analysis, temporal smoothing and glyph
//! rendering.

mod fft;
mod mode;
pub mod renderer;
mod smoothing;

pub use fft::{BandAnalyzer, compute_bands};
pub use mode::VisualizationMode;
pub use renderer::{Cell, render};
pub use smoothing::SmoothingStage;
