//! Spectrum Vortex: points swing around the centre on a bass-driven spiral.

use super::{polar, Point2D, CENTER};
use crate::spectrum::EnergyProbe;

const BASS: EnergyProbe = EnergyProbe::bass(2.0);
const MID: EnergyProbe = EnergyProbe::mid(1.5);
const HIGH: EnergyProbe = EnergyProbe::high(1.3);

pub(super) fn displace(x: f32, y: f32, t: f32, bands: &[f32]) -> Point2D {
    let bass = BASS.read(bands);
    let mid = MID.read(bands);
    let high = HIGH.read(bands);

    let (_, _, angle, dist) = polar(x, y);

    let spiral = angle + dist * (0.02 + bass * 0.04);
    let swing = (spiral + t).sin() * (1.0 + mid);
    let radius = dist + high * 20.0;

    Point2D::new(
        CENTER + radius * spiral.cos() * swing,
        CENTER + radius * spiral.sin() * swing,
    )
}
