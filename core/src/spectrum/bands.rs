//! Hz band tables for the bar display.

use super::BAND_COUNT;

/// A frequency range in Hz, start inclusive, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarBand {
    pub start_hz: f32,
    pub end_hz: f32,
}

impl BarBand {
    pub const fn new(start_hz: f32, end_hz: f32) -> Self {
        Self { start_hz, end_hz }
    }

    /// Snapshot bin range covered by this band.
    ///
    /// `bin = floor(hz * bin_count / nyquist)`. The range may be empty when the
    /// band is narrower than one bin.
    pub fn bin_range(&self, bin_count: usize, sample_rate: u32) -> (usize, usize) {
        let nyquist = sample_rate as f32 / 2.0;
        let to_bin = |hz: f32| (hz * bin_count as f32 / nyquist).floor().max(0.0) as usize;
        (to_bin(self.start_hz), to_bin(self.end_hz))
    }
}

/// The 32 standard bars, sub-bass through 20 kHz.
///
/// Low end is deliberately narrow so kick and bass get their own bars.
pub const STANDARD_BAR_BANDS: [BarBand; BAND_COUNT] = [
    BarBand::new(20.0, 40.0),
    BarBand::new(40.0, 80.0),
    BarBand::new(80.0, 120.0),
    BarBand::new(120.0, 180.0),
    BarBand::new(180.0, 250.0),
    BarBand::new(250.0, 350.0),
    BarBand::new(350.0, 500.0),
    BarBand::new(500.0, 700.0),
    BarBand::new(700.0, 1000.0),
    BarBand::new(1000.0, 1400.0),
    BarBand::new(1400.0, 1800.0),
    BarBand::new(1800.0, 2300.0),
    BarBand::new(2300.0, 2800.0),
    BarBand::new(2800.0, 3400.0),
    BarBand::new(3400.0, 4000.0),
    BarBand::new(4000.0, 4800.0),
    BarBand::new(4800.0, 5600.0),
    BarBand::new(5600.0, 6400.0),
    BarBand::new(6400.0, 7400.0),
    BarBand::new(7400.0, 8400.0),
    BarBand::new(8400.0, 9400.0),
    BarBand::new(9400.0, 10400.0),
    BarBand::new(10400.0, 11400.0),
    BarBand::new(11400.0, 12400.0),
    BarBand::new(12400.0, 13400.0),
    BarBand::new(13400.0, 14400.0),
    BarBand::new(14400.0, 15400.0),
    BarBand::new(15400.0, 16400.0),
    BarBand::new(16400.0, 17400.0),
    BarBand::new(17400.0, 18400.0),
    BarBand::new(18400.0, 19400.0),
    BarBand::new(19400.0, 20000.0),
];

/// Ordered list of bar bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    bands: Vec<BarBand>,
}

impl Default for BarLayout {
    fn default() -> Self {
        Self::standard()
    }
}

impl BarLayout {
    /// The 32-band layout.
    pub fn standard() -> Self {
        Self {
            bands: STANDARD_BAR_BANDS.to_vec(),
        }
    }

    /// Finer binning: `count` contiguous log-spaced bands from `min_hz` to `max_hz`.
    ///
    /// # Panics
    ///
    /// Panics if `count == 0` or the frequency range is not positive and increasing.
    pub fn log_spaced(count: usize, min_hz: f32, max_hz: f32) -> Self {
        assert!(count > 0, "bar layout needs at least one band");
        assert!(
            min_hz > 0.0 && max_hz > min_hz,
            "invalid bar range {min_hz}..{max_hz} Hz"
        );

        let log_min = min_hz.ln();
        let log_max = max_hz.ln();
        let edge = |i: usize| (log_min + (log_max - log_min) * i as f32 / count as f32).exp();

        let bands = (0..count)
            .map(|i| BarBand::new(edge(i), edge(i + 1)))
            .collect();
        Self { bands }
    }

    /// Layout from explicit bands.
    pub fn custom(bands: Vec<BarBand>) -> Self {
        Self { bands }
    }

    pub fn bands(&self) -> &[BarBand] {
        &self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Gain applied to bar `index`.
    ///
    /// Tiers are defined on the 32-band table; other layouts use the tier at the
    /// band's proportional position.
    pub fn boost(&self, index: usize) -> f32 {
        let position = if self.bands.len() == BAND_COUNT {
            index
        } else {
            index * BAND_COUNT / self.bands.len().max(1)
        };
        boost_tier(position)
    }
}

fn boost_tier(index: usize) -> f32 {
    match index {
        0..=2 => 1.1,
        3..=7 => 1.4,
        8..=15 => 1.2,
        _ => 1.0,
    }
}
