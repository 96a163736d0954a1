//! Scalar energy over a band sub-range.

/// Normalized energy of `bands[start..end]` raised to `sensitivity`.
///
/// Bands are normalized against 255 per band. Pattern-mode bands are log
/// weighted and can exceed 255, so the result is not clamped to 1. A
/// sensitivity above 1 pushes quiet ranges toward zero.
///
/// `start < end <= bands.len()` is required; release builds clamp `end` to the
/// slice and read an empty range as 0.
pub fn energy(bands: &[f32], start: usize, end: usize, sensitivity: f32) -> f32 {
    debug_assert!(
        start < end && end <= bands.len(),
        "energy range {}..{} outside {} bands",
        start,
        end,
        bands.len()
    );

    let end = end.min(bands.len());
    if start >= end {
        return 0.0;
    }

    let sum: f32 = bands[start..end].iter().sum();
    (sum / ((end - start) as f32 * 255.0)).powf(sensitivity)
}

/// A fixed band range and sensitivity, read against each frame's bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyProbe {
    pub start: usize,
    pub end: usize,
    pub sensitivity: f32,
}

impl EnergyProbe {
    pub const fn new(start: usize, end: usize, sensitivity: f32) -> Self {
        Self {
            start,
            end,
            sensitivity,
        }
    }

    /// Bands 0..4.
    pub const fn bass(sensitivity: f32) -> Self {
        Self::new(0, 4, sensitivity)
    }

    /// Bands 4..16.
    pub const fn mid(sensitivity: f32) -> Self {
        Self::new(4, 16, sensitivity)
    }

    /// Bands 16..32.
    pub const fn high(sensitivity: f32) -> Self {
        Self::new(16, 32, sensitivity)
    }

    #[inline]
    pub fn read(&self, bands: &[f32]) -> f32 {
        energy(bands, self.start, self.end, self.sensitivity)
    }
}
