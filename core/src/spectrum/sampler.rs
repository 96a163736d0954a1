//! Snapshot → band energy sampling.
//!
//! Two strategies share one entry point:
//! - Pattern mode groups bins uniformly into 32 bands with log weighting
//! - Bar mode maps explicit Hz ranges to bins, keeps the peak, and boosts

use super::{BandEnergy, BarLayout, FrequencySnapshot, BAND_COUNT};

/// Peak bar height in percent.
const BAR_MAX_PERCENT: f32 = 100.0;

/// Exponent applied to normalized bar peaks.
const BAR_CURVE: f32 = 0.8;

/// How a snapshot is reduced to bands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SamplingMode {
    /// 32 uniform groups, `v * log10(10 + v)` weighted.
    #[default]
    Pattern,
    /// Explicit Hz bands with peak hold and tiered boost, scaled to percent.
    Bars(BarLayout),
}

impl SamplingMode {
    /// Number of bands this mode produces.
    pub fn band_count(&self) -> usize {
        match self {
            Self::Pattern => BAND_COUNT,
            Self::Bars(layout) => layout.len(),
        }
    }
}

/// Sample a snapshot according to `mode`.
///
/// `sample_rate` is only consulted in bar mode.
pub fn sample(snapshot: &FrequencySnapshot, mode: &SamplingMode, sample_rate: u32) -> BandEnergy {
    match mode {
        SamplingMode::Pattern => sample_pattern_bands(snapshot),
        SamplingMode::Bars(layout) => sample_bars(snapshot, layout, sample_rate),
    }
}

/// Pattern-mode sampling.
///
/// Each of the 32 bands averages `floor(N / 32)` consecutive bins weighted by
/// `log10(10 + v)`, which flattens near-silence and compresses loud peaks.
/// Bins past `32 * floor(N / 32)` are not read.
///
/// Snapshots shorter than 32 bins yield silence.
pub fn sample_pattern_bands(snapshot: &FrequencySnapshot) -> BandEnergy {
    let bins = snapshot.bins();
    let bin_size = bins.len() / BAND_COUNT;
    if bin_size == 0 {
        return BandEnergy::silent(BAND_COUNT);
    }

    let values = bins
        .chunks_exact(bin_size)
        .take(BAND_COUNT)
        .map(|group| {
            let sum: f32 = group
                .iter()
                .map(|&v| {
                    let v = v as f32;
                    v * (10.0 + v).log10()
                })
                .sum();
            sum / bin_size as f32
        })
        .collect();

    BandEnergy::new(values)
}

/// Bar-mode sampling.
///
/// Each band takes the peak bin in its Hz range (peaks survive where an average
/// would smear transients), then `(peak / 255)^0.8 * 100 * boost`, capped at 100.
/// A band narrower than one bin reads 0.
pub fn sample_bars(snapshot: &FrequencySnapshot, layout: &BarLayout, sample_rate: u32) -> BandEnergy {
    let bins = snapshot.bins();

    let values = layout
        .bands()
        .iter()
        .enumerate()
        .map(|(index, band)| {
            let (start_bin, end_bin) = band.bin_range(bins.len(), sample_rate);
            let end_bin = end_bin.min(bins.len());

            let peak = if end_bin > start_bin {
                bins[start_bin..end_bin].iter().copied().max().unwrap_or(0)
            } else {
                0
            };

            let scaled = (peak as f32 / 255.0).powf(BAR_CURVE) * BAR_MAX_PERCENT * layout.boost(index);
            scaled.clamp(0.0, BAR_MAX_PERCENT)
        })
        .collect();

    BandEnergy::new(values)
}
