//! Integration tests for spectrum sampling and band energy.

mod common;

use approx::assert_relative_eq;
use audioscape::audio::synth::generate_sine;
use audioscape::audio::{AnalyserConfig, AnalyserNode, FrequencySource};
use audioscape::spectrum::{
    energy, sample, sample_bars, sample_pattern_bands, BarBand, BarLayout, EnergyProbe,
    SamplingMode, BAND_COUNT,
};
use common::{ramp_snapshot, stepped_bands, uniform_snapshot, SAMPLE_RATE};

#[test]
fn test_constant_snapshot_pattern_bands_are_equal() {
    let bands = sample_pattern_bands(&uniform_snapshot(32, 128));

    assert_eq!(bands.len(), BAND_COUNT);
    let first = bands.values()[0];
    assert_relative_eq!(first, 128.0 * 138.0f32.log10(), epsilon = 1e-3);
    assert!(bands.iter().all(|&b| b == first));
}

#[test]
fn test_pattern_mode_always_yields_32_bands() {
    for size in [0, 16, 31, 32, 100, 1024, 4096] {
        let bands = sample(&ramp_snapshot(size), &SamplingMode::Pattern, SAMPLE_RATE);
        assert_eq!(bands.len(), BAND_COUNT, "snapshot of {} bins", size);
        assert!(bands.iter().all(|&b| b.is_finite() && b >= 0.0));
    }
}

#[test]
fn test_zero_width_bar_band_reads_zero() {
    // Both edges land on bin 1 of 2048 at 44.1 kHz
    let layout = BarLayout::custom(vec![BarBand::new(20.0, 21.0)]);
    let bands = sample_bars(&uniform_snapshot(2048, 255), &layout, SAMPLE_RATE);

    assert_eq!(bands.values(), &[0.0]);
}

#[test]
fn test_bar_output_stays_in_percent_range() {
    let layouts = [BarLayout::standard(), BarLayout::log_spaced(64, 20.0, 20000.0)];
    for layout in layouts {
        for value in [0u8, 1, 64, 200, 255] {
            let bands = sample_bars(&uniform_snapshot(4096, value), &layout, SAMPLE_RATE);
            assert_eq!(bands.len(), layout.len());
            assert!(bands.iter().all(|&b| (0.0..=100.0).contains(&b)));
        }
    }
}

#[test]
fn test_bass_energy_bounds() {
    let bass = EnergyProbe::bass(1.0);
    assert_eq!(bass.read(&[0.0; 32]), 0.0);
    assert_eq!(bass.read(&[255.0; 32]), 1.0);
}

#[test]
fn test_energy_is_monotone_in_band_values() {
    let quiet = stepped_bands(10.0, 1.0);
    let loud = stepped_bands(50.0, 1.0);
    for sensitivity in [0.8, 1.0, 1.5, 2.0] {
        let a = energy(&quiet, 4, 16, sensitivity);
        let b = energy(&loud, 4, 16, sensitivity);
        assert!(a >= 0.0);
        assert!(b > a, "sensitivity {}", sensitivity);
    }
}

#[test]
fn test_analyser_to_bars_finds_tone() {
    let mut analyser = AnalyserNode::new(AnalyserConfig::bars(), SAMPLE_RATE).unwrap();
    analyser.push_samples(&generate_sine(1200.0, SAMPLE_RATE, 0.1, 0.5));

    let snapshot = analyser.frequency_snapshot();
    assert_eq!(snapshot.len(), 2048);

    let bands = sample(&snapshot, &SamplingMode::Bars(BarLayout::standard()), SAMPLE_RATE);
    let loudest = bands
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap();

    // 1000-1400 Hz bar
    assert_eq!(loudest, 9);
    assert_eq!(bands.values()[0], 0.0);
}

#[test]
fn test_analyser_silence_gives_silent_bands() {
    let mut analyser = AnalyserNode::new(AnalyserConfig::patterns(), SAMPLE_RATE).unwrap();
    analyser.push_samples(&vec![0.0; 8192]);

    let bands = sample(&analyser.frequency_snapshot(), &SamplingMode::Pattern, SAMPLE_RATE);
    assert!(bands.iter().all(|&b| b == 0.0));
}
