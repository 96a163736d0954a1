//! Band extraction from byte-valued FFT snapshots.
//!
//! This module provides:
//! - `FrequencySnapshot`, the per-frame byte spectrum pulled from the analyser
//! - `BandEnergy`, the fixed-length band sequence derived from a snapshot
//! - Pattern-mode and bar-mode sampling (`sampler`, `bands`)
//! - Scalar energy reads over band sub-ranges (`energy`)

pub mod bands;
pub mod energy;
pub mod sampler;

pub use bands::{BarBand, BarLayout, STANDARD_BAR_BANDS};
pub use energy::{energy, EnergyProbe};
pub use sampler::{sample, sample_bars, sample_pattern_bands, SamplingMode};

use serde::Serialize;

/// Number of bands produced in pattern mode and by the standard bar layout.
pub const BAND_COUNT: usize = 32;

/// One frame of byte-quantized FFT magnitudes (0 to 255 per bin).
///
/// Length is half the analyser's FFT size.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequencySnapshot {
    bins: Vec<u8>,
}

impl FrequencySnapshot {
    pub fn new(bins: Vec<u8>) -> Self {
        Self { bins }
    }

    /// Snapshot of `len` bins all holding `value`.
    pub fn filled(len: usize, value: u8) -> Self {
        Self {
            bins: vec![value; len],
        }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn bins(&self) -> &[u8] {
        &self.bins
    }
}

impl From<Vec<u8>> for FrequencySnapshot {
    fn from(bins: Vec<u8>) -> Self {
        Self::new(bins)
    }
}

/// Per-band magnitudes for one frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct BandEnergy {
    values: Vec<f32>,
}

impl BandEnergy {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// All-zero bands, used before the first frame is drawn.
    pub fn silent(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f32> {
        self.values.iter()
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.values
    }
}

impl AsRef<[f32]> for BandEnergy {
    fn as_ref(&self) -> &[f32] {
        &self.values
    }
}

impl From<Vec<f32>> for BandEnergy {
    fn from(values: Vec<f32>) -> Self {
        Self::new(values)
    }
}
