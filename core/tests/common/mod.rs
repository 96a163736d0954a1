//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use audioscape::audio::synth::{generate_bass_pulse, generate_sine, write_wav};
use audioscape::audio::AudioData;
use audioscape::render::RecordingSurface;
use audioscape::spectrum::FrequencySnapshot;
use audioscape::{VisualizerConfig, VisualizerSession};

pub const SAMPLE_RATE: u32 = 44100;

/// A snapshot where every bin holds `value`.
pub fn uniform_snapshot(size: usize, value: u8) -> FrequencySnapshot {
    FrequencySnapshot::filled(size, value)
}

/// A snapshot rising linearly from 0 to 255.
pub fn ramp_snapshot(size: usize) -> FrequencySnapshot {
    FrequencySnapshot::new((0..size).map(|i| (i * 255 / size.max(1)) as u8).collect())
}

/// Band values `base + i * step` for 32 bands.
pub fn stepped_bands(base: f32, step: f32) -> Vec<f32> {
    (0..32).map(|i| base + i as f32 * step).collect()
}

/// A 220 Hz tone of `duration` seconds.
pub fn tone(duration: f32) -> AudioData {
    AudioData::from_mono(generate_sine(220.0, SAMPLE_RATE, duration, 0.8), SAMPLE_RATE)
}

/// Write a bass pulse track to `dir` and return its path.
pub fn write_pulse_wav(dir: &Path, name: &str, duration: f32) -> PathBuf {
    let path = dir.join(name);
    write_wav(&path, &generate_bass_pulse(120.0, SAMPLE_RATE, duration), SAMPLE_RATE)
        .expect("failed to write test wav");
    path
}

/// A pattern session drawing into a recording surface.
pub fn recording_session() -> VisualizerSession<RecordingSurface> {
    VisualizerSession::new(VisualizerConfig::default(), RecordingSurface::default())
}
