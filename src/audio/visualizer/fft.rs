// src/audio/visualizer/fft.rs
//! FFT computation and logarithmic frequency band grouping.

use rustfft::{FftPlanner, num_complex::Complex};

use crate::config::AnalysisConfig;

/// Turns a mono sample window into normalized equalizer bands.
///
/// The planner caches FFT plans between calls; output depends only on the
/// window, sample rate and band count.
pub struct BandAnalyzer {
    /// FFT planner for frequency analysis
    fft_planner: FftPlanner<f32>,
    /// Number of frequency bands to output
    num_bands: usize,
    /// Gain applied before `ln(1 + x)` compression
    gain: f32,
    /// Minimum normalization divisor, keeps near-silence from filling the bars
    floor: f32,
    /// Lowest band edge in Hz
    min_freq: f32,
}

impl BandAnalyzer {
    /// Create an analyzer with the default gain (5x) and floor (5.0).
    pub fn new(num_bands: usize) -> Self {
        Self::with_config(num_bands, &AnalysisConfig::default())
    }

    pub fn with_config(num_bands: usize, config: &AnalysisConfig) -> Self {
        Self {
            fft_planner: FftPlanner::new(),
            num_bands,
            gain: config.gain,
            floor: config.normalization_floor,
            min_freq: config.min_frequency,
        }
    }

    pub fn num_bands(&self) -> usize {
        self.num_bands
    }

    /// Compute `num_bands` values in `[0, 1]` for `window`.
    pub fn compute(&mut self, window: &[f32], sample_rate: u32) -> Vec<f32> {
        if window.is_empty() || self.num_bands == 0 || sample_rate == 0 {
            return vec![0.0; self.num_bands];
        }

        let magnitudes = self.magnitude_spectrum(window);
        let mut bands = self.group_into_bands(&magnitudes, window.len(), sample_rate);

        for band in bands.iter_mut() {
            *band = (self.gain * *band).ln_1p();
        }

        let peak = bands.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let divisor = peak.max(self.floor);
        for band in bands.iter_mut() {
            *band = (*band / divisor).clamp(0.0, 1.0);
        }
        bands
    }

    /// Magnitudes of the non-negative frequency bins (`n/2 + 1` of them).
    fn magnitude_spectrum(&mut self, window: &[f32]) -> Vec<f32> {
        let n = window.len();
        let mut buffer: Vec<Complex<f32>> =
            window.iter().map(|&s| Complex::new(s, 0.0)).collect();

        let fft = self.fft_planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        buffer.iter().take(n / 2 + 1).map(|c| c.norm()).collect()
    }

    /// Average bin magnitudes between log-spaced edges from `min_freq` to
    /// Nyquist. A band that covers no bin is 0.
    fn group_into_bands(&self, magnitudes: &[f32], window_len: usize, sample_rate: u32) -> Vec<f32> {
        let resolution = sample_rate as f64 / window_len as f64;
        let edges = log_edges(self.min_freq as f64, sample_rate as f64 / 2.0, self.num_bands);

        // First bin whose frequency is >= the edge
        let bin_at = |freq: f64| -> usize {
            magnitudes
                .iter()
                .enumerate()
                .position(|(k, _)| k as f64 * resolution >= freq)
                .unwrap_or(magnitudes.len())
        };

        edges
            .windows(2)
            .map(|edge| {
                let lo = bin_at(edge[0]);
                let hi = bin_at(edge[1]);
                if lo >= hi {
                    return 0.0;
                }
                let sum: f32 = magnitudes[lo..hi].iter().sum();
                sum / (hi - lo) as f32
            })
            .collect()
    }
}

/// `count + 1` frequencies evenly spaced on a log10 axis.
fn log_edges(min_freq: f64, max_freq: f64, count: usize) -> Vec<f64> {
    let lo = min_freq.log10();
    let hi = max_freq.log10();
    (0..=count)
        .map(|i| 10f64.powf(lo + (hi - lo) * i as f64 / count as f64))
        .collect()
}

/// One-shot band computation with default tuning.
pub fn compute_bands(window: &[f32], sample_rate: u32, num_bands: usize) -> Vec<f32> {
    BandAnalyzer::new(num_bands).compute(window, sample_rate)
}
