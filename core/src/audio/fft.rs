//! FFT magnitude spectrum using RustFFT.
//!
//! Windowing and scaling match the Web Audio analyser: a Blackman window
//! (α = 0.16) and magnitudes divided by the FFT size.

use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Blackman window coefficient.
const BLACKMAN_ALPHA: f32 = 0.16;

/// Build a Blackman window of `size` samples.
pub fn blackman_window(size: usize) -> Vec<f32> {
    let a0 = 0.5 * (1.0 - BLACKMAN_ALPHA);
    let a1 = 0.5;
    let a2 = 0.5 * BLACKMAN_ALPHA;
    (0..size)
        .map(|i| {
            let t = i as f32 / size as f32;
            a0 - a1 * (2.0 * PI * t).cos() + a2 * (4.0 * PI * t).cos()
        })
        .collect()
}

/// Spectrum analyzer for audio data.
///
/// Converts a block of time-domain samples into linear magnitudes for the
/// positive frequencies.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    fft_size: usize,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl SpectrumAnalyzer {
    /// Create a new spectrum analyzer with the given FFT size.
    ///
    /// # Panics
    ///
    /// Panics if `fft_size` is not a power of two.
    pub fn new(fft_size: usize) -> Self {
        assert!(fft_size.is_power_of_two(), "FFT size must be a power of 2");

        let fft = FftPlanner::new().plan_fft_forward(fft_size);
        let scratch = vec![Complex::default(); fft.get_inplace_scratch_len()];

        Self {
            fft,
            fft_size,
            window: blackman_window(fft_size),
            buffer: vec![Complex::default(); fft_size],
            scratch,
        }
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of frequency bins in the output (FFT size / 2).
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2
    }

    /// Compute the magnitude spectrum of the first `fft_size` samples.
    ///
    /// Returns `fft_size / 2` magnitudes from DC up to (excluding) Nyquist.
    ///
    /// # Panics
    ///
    /// Panics if `samples.len() < fft_size`.
    pub fn analyze(&mut self, samples: &[f32]) -> Vec<f32> {
        let mut out = vec![0.0; self.num_bins()];
        self.analyze_into(samples, &mut out);
        out
    }

    /// Like [`analyze`](Self::analyze) but writes into `out`, which must hold
    /// at least `fft_size / 2` values.
    pub fn analyze_into(&mut self, samples: &[f32], out: &mut [f32]) {
        assert!(
            samples.len() >= self.fft_size,
            "Not enough samples: need {} but got {}",
            self.fft_size,
            samples.len()
        );

        for ((slot, &s), &w) in self.buffer.iter_mut().zip(samples).zip(&self.window) {
            *slot = Complex::new(s * w, 0.0);
        }

        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        let scale = 1.0 / self.fft_size as f32;
        for (mag, c) in out.iter_mut().zip(&self.buffer[..self.fft_size / 2]) {
            *mag = c.norm() * scale;
        }
    }

    /// Get the frequency in Hz for a given bin index.
    pub fn bin_to_freq(&self, bin: usize, sample_rate: u32) -> f32 {
        bin as f32 * sample_rate as f32 / self.fft_size as f32
    }

    /// Get the bin index for a given frequency in Hz.
    pub fn freq_to_bin(&self, freq: f32, sample_rate: u32) -> usize {
        (freq * self.fft_size as f32 / sample_rate as f32).round() as usize
    }
}

impl std::fmt::Debug for SpectrumAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectrumAnalyzer")
            .field("fft_size", &self.fft_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::synth::generate_sine;
    use approx::assert_relative_eq;

    #[test]
    fn test_spectrum_analyzer_creation() {
        let analyzer = SpectrumAnalyzer::new(1024);
        assert_eq!(analyzer.fft_size(), 1024);
        assert_eq!(analyzer.num_bins(), 512);
    }

    #[test]
    fn test_blackman_window_shape() {
        let window = blackman_window(64);
        assert_relative_eq!(window[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(window[32], 1.0, epsilon = 1e-6);
        assert!(window.iter().all(|&w| (-1e-6..=1.0 + 1e-6).contains(&w)));
    }

    #[test]
    fn test_sine_wave_spectrum() {
        let sample_rate = 44100;
        let freq = 440.0;
        let samples = generate_sine(freq, sample_rate, 0.1, 1.0);

        let mut analyzer = SpectrumAnalyzer::new(2048);
        let spectrum = analyzer.analyze(&samples);

        let peak_bin = spectrum
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();

        let peak_freq = analyzer.bin_to_freq(peak_bin, sample_rate);
        assert!(
            (peak_freq - freq).abs() < 50.0,
            "Expected peak near {} Hz, got {} Hz",
            freq,
            peak_freq
        );
    }

    #[test]
    fn test_magnitude_scaling() {
        // Unit sine: peak ≈ 0.5 * a0 = 0.21 after Blackman and 1/N scaling
        let samples = generate_sine(1000.0, 48000, 0.1, 1.0);
        let mut analyzer = SpectrumAnalyzer::new(4096);
        let peak = analyzer.analyze(&samples).into_iter().fold(0.0f32, f32::max);
        assert!(peak > 0.15 && peak < 0.25, "peak magnitude {}", peak);
    }

    #[test]
    fn test_silence_has_zero_magnitude() {
        let mut analyzer = SpectrumAnalyzer::new(256);
        let spectrum = analyzer.analyze(&[0.0; 256]);
        assert!(spectrum.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_bin_freq_conversion() {
        let analyzer = SpectrumAnalyzer::new(2048);
        let sample_rate = 44100;

        let nyquist = sample_rate as f32 / 2.0;
        assert_eq!(analyzer.freq_to_bin(nyquist, sample_rate), 1024);

        let bin = analyzer.freq_to_bin(1000.0, sample_rate);
        let freq = analyzer.bin_to_freq(bin, sample_rate);
        assert!((freq - 1000.0).abs() < 50.0);
    }
}
