// src/audio/visualizer/mode.rs
//! Visualization modes.

use std::fmt;

use serde::Deserialize;

/// How band values are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationMode {
    #[default]
    Bars,
    Waveform,
    Spectrum,
}

impl VisualizationMode {
    pub const ALL: [VisualizationMode; 3] = [Self::Bars, Self::Waveform, Self::Spectrum];

    /// bars → waveform → spectrum → bars
    pub fn next(self) -> Self {
        match self {
            Self::Bars => Self::Waveform,
            Self::Waveform => Self::Spectrum,
            Self::Spectrum => Self::Bars,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Self::Bars => 0,
            Self::Waveform => 1,
            Self::Spectrum => 2,
        }
    }

    /// Inverse of `as_u8`; unknown values map to bars.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Waveform,
            2 => Self::Spectrum,
            _ => Self::Bars,
        }
    }
}

impl fmt::Display for VisualizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Bars => "bars",
            Self::Waveform => "waveform",
            Self::Spectrum => "spectrum",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_visits_every_mode() {
        let mut mode = VisualizationMode::Bars;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(seen, VisualizationMode::ALL);
        assert_eq!(mode, VisualizationMode::Bars);
    }

    #[test]
    fn u8_round_trip() {
        for mode in VisualizationMode::ALL {
            assert_eq!(VisualizationMode::from_u8(mode.as_u8()), mode);
        }
        assert_eq!(VisualizationMode::from_u8(200), VisualizationMode::Bars);
    }
}
