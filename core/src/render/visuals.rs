//! Per-frame visual parameters derived from band energy.

use serde::Serialize;

use super::surface::Hsla;
use crate::spectrum::EnergyProbe;

/// Background colour behind both visualizers.
pub const BACKGROUND: [u8; 3] = [6, 6, 6];

const BASS: EnergyProbe = EnergyProbe::bass(1.5);
const MID: EnergyProbe = EnergyProbe::mid(1.3);
const HIGH: EnergyProbe = EnergyProbe::high(1.2);

/// Colour, stroke and grid settings for one pattern frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualParams {
    pub bass: f32,
    pub mid: f32,
    pub high: f32,
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
    pub line_width: f32,
    /// Grid spacing in logical pixels. Louder bass gives a denser grid.
    pub step: f32,
    /// Opacity of the background wash that fades earlier frames.
    pub fade_alpha: f32,
}

impl VisualParams {
    pub fn from_bands(bands: &[f32], time: f32) -> Self {
        let bass = BASS.read(bands);
        let mid = MID.read(bands);
        let high = HIGH.read(bands);

        Self {
            bass,
            mid,
            high,
            hue: (210.0 + bass * 40.0 + mid * 20.0 + high * 30.0 + time * 5.0).rem_euclid(360.0),
            saturation: 70.0 + high * 30.0,
            lightness: 45.0 + bass * 35.0,
            alpha: 0.6 + mid * 0.4,
            line_width: 1.0 + bass * 0.5,
            step: (8.0 - bass * 4.0).max(4.0),
            fade_alpha: 0.1 + bass * 0.1,
        }
    }

    pub fn stroke_color(&self) -> Hsla {
        Hsla::new(self.hue, self.saturation, self.lightness, self.alpha)
    }

    /// Pattern clock increment for this frame.
    pub fn time_step(&self) -> f32 {
        0.02 * (1.0 + self.bass * 0.5)
    }
}

/// Colour of bar `index` at `height_percent`.
pub fn bar_color(index: usize, height_percent: f32) -> Hsla {
    Hsla::hsl(210.0 + index as f32 * 2.0, 70.0, 50.0 + height_percent * 0.2)
}
