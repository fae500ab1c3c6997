// src/audio/visualizer/smoothing.rs
//! Peak-hold decay followed by an exponential moving average.

/// Per-band temporal smoothing of raw analyzer output.
#[derive(Debug, Clone)]
pub struct SmoothingStage {
    /// Held values, falling at most `decay_rate` per tick
    decayed: Vec<f32>,
    /// Displayed values
    smoothed: Vec<f32>,
    decay_rate: f32,
    /// Weight of the newest decayed value (0.0 = frozen, 1.0 = no smoothing)
    smoothing_factor: f32,
}

impl SmoothingStage {
    pub fn new(num_bands: usize, decay_rate: f32, smoothing_factor: f32) -> Self {
        Self {
            decayed: vec![0.0; num_bands],
            smoothed: vec![0.0; num_bands],
            decay_rate,
            smoothing_factor: smoothing_factor.clamp(0.0, 1.0),
        }
    }

    pub fn num_bands(&self) -> usize {
        self.smoothed.len()
    }

    /// Fold one raw band vector into the state. Missing bands count as 0.
    pub fn update(&mut self, raw: &[f32]) {
        let a = self.smoothing_factor;
        for (i, (held, shown)) in self
            .decayed
            .iter_mut()
            .zip(self.smoothed.iter_mut())
            .enumerate()
        {
            let v = raw.get(i).copied().unwrap_or(0.0);
            *held = (*held - self.decay_rate).max(0.0).max(v);
            *shown = a * *held + (1.0 - a) * *shown;
        }
    }

    /// Copy of the displayed values.
    pub fn snapshot(&self) -> Vec<f32> {
        self.smoothed.clone()
    }

    pub fn smoothing_factor(&self) -> f32 {
        self.smoothing_factor
    }

    /// Change the smoothing factor. Values outside `[0, 1]` are rejected.
    pub fn set_smoothing_factor(&mut self, factor: f32) -> bool {
        if (0.0..=1.0).contains(&factor) {
            self.smoothing_factor = factor;
            true
        } else {
            false
        }
    }

    /// Zero all state, for a new track.
    pub fn reset(&mut self) {
        self.decayed.fill(0.0);
        self.smoothed.fill(0.0);
    }
}
