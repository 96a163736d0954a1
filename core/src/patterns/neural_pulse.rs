//! Neural Pulse: radial waves that fade with distance.

use super::{Point2D, CENTER};
use crate::spectrum::EnergyProbe;
use std::f32::consts::PI;

const BASS: EnergyProbe = EnergyProbe::bass(1.8);
const MID: EnergyProbe = EnergyProbe::mid(1.4);
const HIGH: EnergyProbe = EnergyProbe::high(1.2);

const AMPLITUDE: f32 = 30.0;

pub(super) fn displace(x: f32, y: f32, t: f32, bands: &[f32]) -> Point2D {
    let bass = BASS.read(bands);
    let mid = MID.read(bands);
    let high = HIGH.read(bands);

    let zoom = 8.0 + bass * 10.0;
    let kx = (x - CENTER) / zoom;
    let ky = (y - CENTER) / zoom;
    let dist = kx.hypot(ky);

    let pulse = (dist - t * (1.0 + mid)).sin() * (-dist * (0.1 + high * 0.2)).exp();
    let phase = dist * 0.5 + t + mid * PI;

    Point2D::new(
        x + AMPLITUDE * pulse * phase.cos(),
        y + AMPLITUDE * pulse * phase.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_is_fixed_at_zero_time() {
        // dist = 0 and t = 0 gives sin(0) = 0
        let bands = vec![120.0f32; 32];
        let p = displace(200.0, 200.0, 0.0, &bands);
        assert_relative_eq!(p.x, 200.0);
        assert_relative_eq!(p.y, 200.0);
    }

    #[test]
    fn test_displacement_is_bounded_by_amplitude() {
        let bands = vec![255.0f32; 32];
        for i in 0..40 {
            let x = 50.0 + i as f32 * 7.5;
            let p = displace(x, 90.0, i as f32 * 0.3, &bands);
            let moved = (p.x - x).hypot(p.y - 90.0);
            assert!(moved <= AMPLITUDE + 1e-3);
        }
    }

    #[test]
    fn test_pulse_decays_with_distance() {
        let bands = vec![0.0f32; 32];
        // Pick phases where sin(d - t) = 1 at two radii
        let near_d = 1.0f32;
        let far_d = 20.0f32;
        let t_near = near_d - std::f32::consts::FRAC_PI_2;
        let t_far = far_d - std::f32::consts::FRAC_PI_2;

        let near = displace(200.0 + near_d * 8.0, 200.0, t_near, &bands);
        let far = displace(200.0 + far_d * 8.0, 200.0, t_far, &bands);
        let near_shift = (near.x - (200.0 + near_d * 8.0)).hypot(near.y - 200.0);
        let far_shift = (far.x - (200.0 + far_d * 8.0)).hypot(far.y - 200.0);
        assert!(near_shift > far_shift);
    }
}
