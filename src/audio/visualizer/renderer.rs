// src/audio/visualizer/renderer.rs
//! Band vector to styled glyph row, one strategy per visualization mode.
//!
//! All amplitude breakpoints are fixed so a given band vector always
//! renders the same way, independent of what was drawn before.

use ratatui::style::Color;

use super::mode::VisualizationMode;

/// Bar ramp, empty to full block.
pub const BAR_GLYPHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Waveform ramp, space through increasingly dense symbols.
pub const WAVE_GLYPHS: [char; 16] = [
    ' ', ' ', ' ', ' ', ' ', ' ', ' ', '.', '-', '~', '=', '+', '*', '#', '%', '@',
];

/// Spectrum cells below this amplitude are blank.
pub const SPECTRUM_SILENCE: f32 = 0.15;
/// Amplitude breakpoints between the three glyph levels of a zone.
pub const SPECTRUM_LEVELS: [f32; 2] = [0.45, 0.75];
/// Glyph sets for the low, mid and high thirds of the width.
pub const SPECTRUM_GLYPHS: [[char; 3]; 3] = [['.', 'o', 'O'], ['-', '=', '#'], ['\'', '*', '@']];
/// Hue range (start, end) across each zone: red→orange, yellow→green, green→purple.
const SPECTRUM_HUES: [(f32, f32); 3] = [(0.0, 0.08), (0.15, 0.33), (0.33, 0.80)];

/// One output character and its 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: Color,
}

/// Render `bands` into exactly `width` cells.
pub fn render(bands: &[f32], width: usize, mode: VisualizationMode) -> Vec<Cell> {
    match mode {
        VisualizationMode::Bars => render_bars(bands, width),
        VisualizationMode::Waveform => render_waveform(bands, width),
        VisualizationMode::Spectrum => render_spectrum(bands, width),
    }
}

/// Glyphs a mode may emit.
pub fn glyph_set(mode: VisualizationMode) -> Vec<char> {
    match mode {
        VisualizationMode::Bars => BAR_GLYPHS.to_vec(),
        VisualizationMode::Waveform => WAVE_GLYPHS.to_vec(),
        VisualizationMode::Spectrum => std::iter::once(' ')
            .chain(SPECTRUM_GLYPHS.iter().flatten().copied())
            .collect(),
    }
}

fn render_bars(bands: &[f32], width: usize) -> Vec<Cell> {
    (0..width)
        .map(|i| {
            let amp = nearest_band(bands, i, width);
            let glyph = BAR_GLYPHS[ramp_index(amp, BAR_GLYPHS.len())];
            let hue = i as f32 / width as f32;
            Cell {
                glyph,
                color: hsl_to_rgb(hue, 0.8, 0.5 + amp * 0.4),
            }
        })
        .collect()
}

fn render_waveform(bands: &[f32], width: usize) -> Vec<Cell> {
    (0..width)
        .map(|i| {
            let amp = nearest_band(bands, i, width);
            Cell {
                glyph: WAVE_GLYPHS[ramp_index(amp, WAVE_GLYPHS.len())],
                color: hsl_to_rgb(0.3, 0.7, 0.3 + amp * 0.6),
            }
        })
        .collect()
}

fn render_spectrum(bands: &[f32], width: usize) -> Vec<Cell> {
    (0..width)
        .map(|i| {
            let amp = interpolated_band(bands, i, width);

            // Which third of the width, and how far across it
            let x = i as f32 * 3.0 / width as f32;
            let zone = (x as usize).min(2);
            let t = (x - zone as f32).clamp(0.0, 1.0);

            let glyph = if amp < SPECTRUM_SILENCE {
                ' '
            } else if amp < SPECTRUM_LEVELS[0] {
                SPECTRUM_GLYPHS[zone][0]
            } else if amp < SPECTRUM_LEVELS[1] {
                SPECTRUM_GLYPHS[zone][1]
            } else {
                SPECTRUM_GLYPHS[zone][2]
            };

            let (start, end) = SPECTRUM_HUES[zone];
            let hue = start + (end - start) * t;
            Cell {
                glyph,
                color: hsl_to_rgb(hue, 0.6 + amp * 0.4, 0.35 + amp * 0.45),
            }
        })
        .collect()
}

/// Band under cell `i` (nearest neighbor), clamped to `[0, 1]`.
fn nearest_band(bands: &[f32], i: usize, width: usize) -> f32 {
    if bands.is_empty() {
        return 0.0;
    }
    let index = (i * bands.len() / width).min(bands.len() - 1);
    bands[index].clamp(0.0, 1.0)
}

/// Linear interpolation between the two bands around cell `i`.
fn interpolated_band(bands: &[f32], i: usize, width: usize) -> f32 {
    let n = bands.len();
    if n == 0 {
        return 0.0;
    }
    let pos = i as f32 / width as f32 * (n - 1) as f32;
    let lo = (pos as usize).min(n - 1);
    let hi = (lo + 1).min(n - 1);
    let ratio = pos - lo as f32;
    (bands[lo] * (1.0 - ratio) + bands[hi] * ratio).clamp(0.0, 1.0)
}

/// Quantize `amp` into one of `levels` buckets.
fn ramp_index(amp: f32, levels: usize) -> usize {
    ((amp * (levels - 1) as f32) as usize).min(levels - 1)
}

/// HSL (all components in `[0, 1]`) to a 24-bit color.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    let (s, l) = (s.clamp(0.0, 1.0), l.clamp(0.0, 1.0));
    if s == 0.0 {
        let v = channel(l);
        return Color::Rgb(v, v, v);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    Color::Rgb(
        channel(hue_component(m1, m2, h + 1.0 / 3.0)),
        channel(hue_component(m1, m2, h)),
        channel(hue_component(m1, m2, h - 1.0 / 3.0)),
    )
}

fn hue_component(m1: f32, m2: f32, hue: f32) -> f32 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

fn channel(x: f32) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f32> {
        (0..n).map(|i| i as f32 / (n - 1) as f32).collect()
    }

    #[test]
    fn every_mode_fills_target_width_with_its_glyphs() {
        let bands = ramp(16);
        for mode in VisualizationMode::ALL {
            let cells = render(&bands, 40, mode);
            assert_eq!(cells.len(), 40, "{mode}");
            let allowed = glyph_set(mode);
            for cell in &cells {
                assert!(allowed.contains(&cell.glyph), "{mode}: {:?}", cell.glyph);
                assert!(matches!(cell.color, Color::Rgb(..)));
            }
        }
    }

    #[test]
    fn bars_quantize_into_nine_levels() {
        let cells = render(&[0.0, 0.5, 1.0], 3, VisualizationMode::Bars);
        let glyphs: Vec<char> = cells.iter().map(|c| c.glyph).collect();
        assert_eq!(glyphs, vec![' ', '▄', '█']);
    }

    #[test]
    fn bars_get_brighter_when_louder() {
        let quiet = render(&[0.1], 1, VisualizationMode::Bars)[0].color;
        let loud = render(&[0.9], 1, VisualizationMode::Bars)[0].color;
        let sum = |c: Color| match c {
            Color::Rgb(r, g, b) => r as u32 + g as u32 + b as u32,
            _ => 0,
        };
        assert!(sum(loud) > sum(quiet));
    }

    #[test]
    fn waveform_uses_sixteen_level_ramp() {
        let cells = render(&[0.0, 1.0], 2, VisualizationMode::Waveform);
        assert_eq!(cells[0].glyph, ' ');
        assert_eq!(cells[1].glyph, '@');
        let mid = render(&[0.5], 1, VisualizationMode::Waveform);
        assert_eq!(mid[0].glyph, WAVE_GLYPHS[7]);
    }

    #[test]
    fn spectrum_zones_use_their_own_glyphs() {
        let cells = render(&[1.0; 16], 40, VisualizationMode::Spectrum);
        assert_eq!(cells[0].glyph, 'O');
        assert_eq!(cells[20].glyph, '#');
        assert_eq!(cells[39].glyph, '@');

        let quiet = render(&[0.3; 16], 40, VisualizationMode::Spectrum);
        assert_eq!(quiet[0].glyph, '.');
        assert_eq!(quiet[39].glyph, '\'');

        let silent = render(&[0.05; 16], 40, VisualizationMode::Spectrum);
        assert!(silent.iter().all(|c| c.glyph == ' '));
    }

    #[test]
    fn spectrum_interpolates_between_bands() {
        // Halfway between a silent and a full band
        let cells = render(&[0.0, 1.0], 2, VisualizationMode::Spectrum);
        assert_eq!(cells[0].glyph, ' ');
        assert_eq!(cells[1].glyph, SPECTRUM_GLYPHS[1][1]);
    }

    #[test]
    fn rendering_is_reproducible() {
        let bands = ramp(16);
        for mode in VisualizationMode::ALL {
            assert_eq!(render(&bands, 57, mode), render(&bands, 57, mode));
        }
    }

    #[test]
    fn degenerate_inputs() {
        assert!(render(&ramp(16), 0, VisualizationMode::Bars).is_empty());
        let cells = render(&[], 10, VisualizationMode::Spectrum);
        assert_eq!(cells.len(), 10);
        assert!(cells.iter().all(|c| c.glyph == ' '));
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.5), Color::Rgb(127, 127, 127));
        assert_eq!(hsl_to_rgb(0.5, 1.0, 1.0), Color::Rgb(255, 255, 255));
        if let Color::Rgb(r, g, b) = hsl_to_rgb(1.0 / 3.0, 1.0, 0.5) {
            assert!(g == 255 && r < 2 && b < 2);
        }
    }
}
