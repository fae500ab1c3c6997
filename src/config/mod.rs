// src/config/mod.rs
//! Configuration for the analysis pipeline, render timing, lyrics and the
//! song library.
//!
//! Values come from an optional TOML file; every field has a default so a
//! partial file (or none at all) is valid. Command-line flags are applied
//! on top by the binary.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::audio::VisualizationMode;
use crate::error::{PlayerError, PlayerResult};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "versify.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub visualizer: VisualizerConfig,
    pub analysis: AnalysisConfig,
    pub timing: TimingConfig,
    pub lyrics: LyricsConfig,
    pub library: LibraryConfig,
}

/// Equalizer band count, smoothing and initial mode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Number of equalizer bands
    pub num_bands: usize,
    /// Maximum per-tick fall of a held band value
    pub decay_rate: f32,
    /// Moving-average weight of the newest decayed value (0.0-1.0)
    pub smoothing_factor: f32,
    /// Initial visualization mode
    pub mode: VisualizationMode,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            num_bands: 16,
            decay_rate: 0.2,
            smoothing_factor: 0.3,
            mode: VisualizationMode::Bars,
        }
    }
}

/// Band analyzer tuning knobs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Linear gain applied before log compression
    pub gain: f32,
    /// Lower bound of the normalization divisor
    pub normalization_floor: f32,
    /// Lowest band edge in Hz
    pub min_frequency: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            gain: 5.0,
            normalization_floor: 5.0,
            min_frequency: 20.0,
        }
    }
}

/// Loop cadences.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub analysis_interval_ms: u64,
    pub render_interval_ms: u64,
    /// Delay between two revealed lyric characters
    pub typing_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            analysis_interval_ms: 100,
            render_interval_ms: 50,
            typing_interval_ms: 50,
        }
    }
}

impl TimingConfig {
    pub fn analysis_interval(&self) -> Duration {
        Duration::from_millis(self.analysis_interval_ms)
    }

    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms)
    }

    pub fn typing_interval(&self) -> Duration {
        Duration::from_millis(self.typing_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LyricsConfig {
    /// Number of completed lines kept on screen
    pub history: usize,
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self { history: 10 }
    }
}

/// Where songs and their `.lrc` files live.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub songs_dir: PathBuf,
    pub lyrics_dir: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            songs_dir: PathBuf::from("songs"),
            lyrics_dir: PathBuf::from("lyrics"),
        }
    }
}

impl Config {
    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> PlayerResult<()> {
        let v = &self.visualizer;
        if v.num_bands == 0 || v.num_bands > 256 {
            return Err(PlayerError::Config(format!(
                "num_bands must be in 1..=256, got {}",
                v.num_bands
            )));
        }
        if !(0.0..=1.0).contains(&v.decay_rate) {
            return Err(PlayerError::Config(format!(
                "decay_rate must be in [0, 1], got {}",
                v.decay_rate
            )));
        }
        if !(0.0..=1.0).contains(&v.smoothing_factor) {
            return Err(PlayerError::Config(format!(
                "smoothing_factor must be in [0, 1], got {}",
                v.smoothing_factor
            )));
        }
        if self.analysis.gain <= 0.0 || self.analysis.normalization_floor <= 0.0 {
            return Err(PlayerError::Config(
                "gain and normalization_floor must be positive".into(),
            ));
        }
        if self.analysis.min_frequency <= 0.0 {
            return Err(PlayerError::Config("min_frequency must be positive".into()));
        }
        let t = &self.timing;
        if t.analysis_interval_ms == 0 || t.render_interval_ms == 0 {
            return Err(PlayerError::Config("loop intervals must be non-zero".into()));
        }
        Ok(())
    }

    /// Number of samples analyzed per tick at `sample_rate`.
    pub fn window_samples(&self, sample_rate: u32) -> usize {
        (sample_rate as u64 * self.timing.analysis_interval_ms / 1000) as usize
    }
}

/// Parse a config file.
pub fn load_config(path: &Path) -> PlayerResult<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config =
        toml::from_str(&content).map_err(|e| PlayerError::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Resolve the config file: an explicit path, then `./versify.toml`, then
/// the platform config directory. Falls back to defaults when nothing
/// usable is found.
pub fn discover(explicit: Option<&Path>) -> Config {
    let candidate = explicit.map(Path::to_path_buf).or_else(|| {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("versify").join("config.toml"))
            .filter(|p| p.exists())
    });

    let Some(path) = candidate else {
        return Config::default();
    };

    match load_config(&path) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Ignoring config {}: {}", path.display(), e);
            Config::default()
        }
    }
}
