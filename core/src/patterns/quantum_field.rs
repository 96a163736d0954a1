//! Quantum Field: radial interference folded by angular harmonics.

use super::{polar, Point2D};
use crate::spectrum::EnergyProbe;

const BASS: EnergyProbe = EnergyProbe::bass(2.0);
const MID: EnergyProbe = EnergyProbe::mid(1.6);
const HIGH: EnergyProbe = EnergyProbe::high(1.4);

pub(super) fn displace(x: f32, y: f32, t: f32, bands: &[f32]) -> Point2D {
    let bass = BASS.read(bands);
    let mid = MID.read(bands);
    let high = HIGH.read(bands);

    let (dx, dy, angle, dist) = polar(x, y);

    let wave = (dist * (0.1 + high * 0.2) - t).sin();
    let fold = (angle * (2.0 + mid * 4.0)).cos();
    let gain = wave * fold * (0.5 + bass) * (1.0 + mid);

    Point2D::new(x + dx * gain, y + dy * gain)
}
