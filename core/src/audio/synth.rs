//! Synthetic signals for tests, benches and demos.

use std::f32::consts::PI;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn sample_count(sample_rate: u32, duration: f32) -> usize {
    (duration * sample_rate as f32) as usize
}

/// Generate a sine wave.
///
/// # Arguments
/// * `frequency` - Frequency in Hz
/// * `sample_rate` - Sample rate in Hz
/// * `duration` - Duration in seconds
/// * `amplitude` - Amplitude (0.0 to 1.0)
pub fn generate_sine(frequency: f32, sample_rate: u32, duration: f32, amplitude: f32) -> Vec<f32> {
    (0..sample_count(sample_rate, duration))
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            amplitude * (2.0 * PI * frequency * t).sin()
        })
        .collect()
}

/// Sum of equal-weight sines, peaking at `amplitude`.
pub fn generate_chord(frequencies: &[f32], sample_rate: u32, duration: f32, amplitude: f32) -> Vec<f32> {
    if frequencies.is_empty() {
        return vec![0.0; sample_count(sample_rate, duration)];
    }

    let gain = amplitude / frequencies.len() as f32;
    (0..sample_count(sample_rate, duration))
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            frequencies
                .iter()
                .map(|f| (2.0 * PI * f * t).sin())
                .sum::<f32>()
                * gain
        })
        .collect()
}

/// Generate white noise.
///
/// Uses a linear congruential generator so the same seed gives the same noise.
pub fn generate_white_noise(sample_rate: u32, duration: f32, amplitude: f32, seed: u64) -> Vec<f32> {
    const A: u64 = 6364136223846793005;
    const C: u64 = 1442695040888963407;

    let mut state = seed;
    (0..sample_count(sample_rate, duration))
        .map(|_| {
            state = state.wrapping_mul(A).wrapping_add(C);
            let unit = (state >> 40) as f32 / (1u64 << 24) as f32;
            amplitude * (unit * 2.0 - 1.0)
        })
        .collect()
}

/// A single kick drum hit: a sine sweeping 150 → 50 Hz with a fast decay.
pub fn generate_kick(sample_rate: u32) -> Vec<f32> {
    (0..sample_count(sample_rate, 0.15))
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let freq = 50.0 + 100.0 * (-t * 30.0).exp();
            let amp = (-t * 15.0).exp();
            amp * (2.0 * PI * freq * t).sin()
        })
        .collect()
}

/// Kicks at `bpm` over a quiet high tone, so bass energy pulses while the
/// upper bands stay steady.
pub fn generate_bass_pulse(bpm: f32, sample_rate: u32, duration: f32) -> Vec<f32> {
    let mut samples = generate_sine(6000.0, sample_rate, duration, 0.1);
    let kick = generate_kick(sample_rate);
    let beat = ((60.0 / bpm) * sample_rate as f32) as usize;
    if beat == 0 {
        return samples;
    }

    for start in (0..samples.len()).step_by(beat) {
        for (dst, &k) in samples[start..].iter_mut().zip(&kick) {
            *dst = (*dst + k * 0.9).clamp(-1.0, 1.0);
        }
    }
    samples
}

/// Write mono samples as a 16-bit PCM WAV file.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    let data_size = samples.len() as u32 * 2;

    file.write_all(b"RIFF")?;
    file.write_all(&(36 + data_size).to_le_bytes())?;
    file.write_all(b"WAVE")?;

    file.write_all(b"fmt ")?;
    file.write_all(&16u32.to_le_bytes())?;
    file.write_all(&1u16.to_le_bytes())?; // PCM
    file.write_all(&1u16.to_le_bytes())?; // mono
    file.write_all(&sample_rate.to_le_bytes())?;
    file.write_all(&(sample_rate * 2).to_le_bytes())?;
    file.write_all(&2u16.to_le_bytes())?;
    file.write_all(&16u16.to_le_bytes())?;

    file.write_all(b"data")?;
    file.write_all(&data_size.to_le_bytes())?;
    for &sample in samples {
        let pcm = (sample.clamp(-1.0, 1.0) * 32767.0) as i16;
        file.write_all(&pcm.to_le_bytes())?;
    }

    file.flush()
}
