//! Crystal Flow: angular facets with a travelling ripple.

use super::{polar, Point2D};
use crate::spectrum::EnergyProbe;

const BASS: EnergyProbe = EnergyProbe::bass(1.5);
const LOW_MID: EnergyProbe = EnergyProbe::new(4, 8, 1.2);
const HIGH_MID: EnergyProbe = EnergyProbe::new(8, 16, 1.3);
const HIGH: EnergyProbe = EnergyProbe::high(1.4);

pub(super) fn displace(x: f32, y: f32, t: f32, bands: &[f32]) -> Point2D {
    let bass = BASS.read(bands);
    let low_mid = LOW_MID.read(bands);
    let high_mid = HIGH_MID.read(bands);
    let high = HIGH.read(bands);

    let (dx, dy, angle, dist) = polar(x, y);

    let crystal = (angle * (3.0 + high_mid * 5.0)).sin() * (dist * 0.05 + bass * 2.0).sin();
    let spread = 0.3 + low_mid;
    let ripple = 10.0 + high * 20.0;

    Point2D::new(
        x + dx * crystal * spread + (dy * 0.02 + t).sin() * ripple,
        y + dy * crystal * spread + (dx * 0.02 + t).cos() * ripple,
    )
}
