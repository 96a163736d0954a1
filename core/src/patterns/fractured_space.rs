//! Fractured Space: quadratic fracture lines that slide with time.

use super::Point2D;
use crate::spectrum::EnergyProbe;
use std::f32::consts::PI;

const BASS: EnergyProbe = EnergyProbe::bass(2.0);
const MID: EnergyProbe = EnergyProbe::mid(1.7);
const HIGH: EnergyProbe = EnergyProbe::high(1.5);

const AMPLITUDE: f32 = 20.0;

pub(super) fn displace(x: f32, y: f32, t: f32, bands: &[f32]) -> Point2D {
    let bass = BASS.read(bands);
    let mid = MID.read(bands);
    let high = HIGH.read(bands);

    let zoom = 6.0 + bass * 10.0;
    let kx = x / zoom - 30.0;
    let ky = y / zoom - 30.0;
    let dist = (kx * kx + ky * ky) / (80.0 + mid * 40.0);

    let fracture = (dist - t + high * PI).sin() * (dist * (0.5 + mid)).cos();
    let gain = AMPLITUDE * fracture * (1.0 + bass);

    Point2D::new(
        x + (y * 0.05 + t).sin() * gain,
        y + (x * 0.05 + t).cos() * gain,
    )
}
