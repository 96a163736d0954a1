//! Streaming frequency analyser.
//!
//! [`AnalyserNode`] keeps the most recent `fft_size` samples and turns them
//! into a byte spectrum on demand, following the Web Audio `AnalyserNode`
//! model: Blackman window, FFT magnitude scaled by `1 / fft_size`, temporal
//! smoothing against the previous frame, then decibels mapped linearly onto
//! `0..=255` between `min_decibels` and `max_decibels`.

use std::cmp::Ordering;
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::fft::SpectrumAnalyzer;
use crate::spectrum::FrequencySnapshot;

/// Smallest accepted FFT size.
pub const MIN_FFT_SIZE: usize = 32;

/// Largest accepted FFT size.
pub const MAX_FFT_SIZE: usize = 32768;

/// Errors raised while creating an analyser.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyserError {
    #[error("FFT size must be a power of 2 between 32 and 32768, got {0}")]
    InvalidFftSize(usize),

    #[error("Smoothing time constant must be within 0..=1, got {0}")]
    InvalidSmoothing(f32),

    #[error("Decibel range is empty: min {min} dB must be below max {max} dB")]
    InvalidDecibelRange { min: f32, max: f32 },

    #[error("Sample rate must be non-zero")]
    ZeroSampleRate,
}

/// Anything that can produce a byte spectrum once per frame.
pub trait FrequencySource {
    /// Snapshot of the current spectrum, `bin_count()` bytes long.
    fn frequency_snapshot(&mut self) -> FrequencySnapshot;

    /// Sample rate of the analysed signal in Hz.
    fn sample_rate(&self) -> u32;

    /// Number of bins per snapshot.
    fn bin_count(&self) -> usize;
}

impl<T: FrequencySource + ?Sized> FrequencySource for Box<T> {
    fn frequency_snapshot(&mut self) -> FrequencySnapshot {
        (**self).frequency_snapshot()
    }

    fn sample_rate(&self) -> u32 {
        (**self).sample_rate()
    }

    fn bin_count(&self) -> usize {
        (**self).bin_count()
    }
}

/// Analyser settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyserConfig {
    pub fft_size: usize,
    /// Weight of the previous frame when smoothing, `0..=1`.
    pub smoothing: f32,
    pub min_decibels: f32,
    pub max_decibels: f32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self::patterns()
    }
}

impl AnalyserConfig {
    /// High-resolution settings used by the pattern visualizer.
    pub fn patterns() -> Self {
        Self {
            fft_size: 8192,
            smoothing: 0.8,
            min_decibels: -90.0,
            max_decibels: -20.0,
        }
    }

    /// Settings used by the bar visualizer.
    pub fn bars() -> Self {
        Self {
            fft_size: 4096,
            smoothing: 0.85,
            min_decibels: -85.0,
            max_decibels: -25.0,
        }
    }

    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    pub fn validate(&self) -> Result<(), AnalyserError> {
        if !self.fft_size.is_power_of_two() || !(MIN_FFT_SIZE..=MAX_FFT_SIZE).contains(&self.fft_size) {
            return Err(AnalyserError::InvalidFftSize(self.fft_size));
        }
        if !(0.0..=1.0).contains(&self.smoothing) {
            return Err(AnalyserError::InvalidSmoothing(self.smoothing));
        }
        if self.min_decibels.partial_cmp(&self.max_decibels) != Some(Ordering::Less) {
            return Err(AnalyserError::InvalidDecibelRange {
                min: self.min_decibels,
                max: self.max_decibels,
            });
        }
        Ok(())
    }
}

/// Streaming analyser over a mono signal.
#[derive(Debug)]
pub struct AnalyserNode {
    config: AnalyserConfig,
    sample_rate: u32,
    fft: SpectrumAnalyzer,
    /// Last `fft_size` samples, oldest first.
    history: VecDeque<f32>,
    frame: Vec<f32>,
    magnitudes: Vec<f32>,
    smoothed: Vec<f32>,
}

impl AnalyserNode {
    pub fn new(config: AnalyserConfig, sample_rate: u32) -> Result<Self, AnalyserError> {
        config.validate()?;
        if sample_rate == 0 {
            return Err(AnalyserError::ZeroSampleRate);
        }

        let size = config.fft_size;
        log::debug!(
            "Analyser created: fft_size={}, smoothing={}, range={}..{} dB, {} Hz",
            size,
            config.smoothing,
            config.min_decibels,
            config.max_decibels,
            sample_rate
        );

        Ok(Self {
            config,
            sample_rate,
            fft: SpectrumAnalyzer::new(size),
            history: std::iter::repeat(0.0).take(size).collect(),
            frame: vec![0.0; size],
            magnitudes: vec![0.0; size / 2],
            smoothed: vec![0.0; size / 2],
        })
    }

    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    pub fn fft_size(&self) -> usize {
        self.config.fft_size
    }

    /// Feed newly played samples. Only the last `fft_size` are retained.
    pub fn push_samples(&mut self, samples: &[f32]) {
        let size = self.config.fft_size;
        let fresh = if samples.len() > size {
            &samples[samples.len() - size..]
        } else {
            samples
        };

        let overflow = (self.history.len() + fresh.len()).saturating_sub(size);
        self.history.drain(..overflow);
        self.history.extend(fresh.iter().copied());
    }

    /// Forget buffered samples and smoothing state.
    pub fn reset(&mut self) {
        self.history.iter_mut().for_each(|s| *s = 0.0);
        self.smoothed.iter_mut().for_each(|s| *s = 0.0);
    }

    /// Smoothed linear magnitudes from the last snapshot.
    pub fn smoothed_magnitudes(&self) -> &[f32] {
        &self.smoothed
    }

    fn analyse_frame(&mut self) {
        for (dst, &src) in self.frame.iter_mut().zip(self.history.iter()) {
            *dst = src;
        }
        self.fft.analyze_into(&self.frame, &mut self.magnitudes);

        let tau = self.config.smoothing;
        for (prev, &mag) in self.smoothed.iter_mut().zip(&self.magnitudes) {
            let next = tau * *prev + (1.0 - tau) * mag;
            *prev = if next.is_finite() { next } else { 0.0 };
        }
    }

    fn to_byte(&self, magnitude: f32) -> u8 {
        let AnalyserConfig {
            min_decibels,
            max_decibels,
            ..
        } = self.config;

        let db = 20.0 * magnitude.log10();
        let scaled = 255.0 * (db - min_decibels) / (max_decibels - min_decibels);
        // -inf for silent bins clamps to 0
        scaled.clamp(0.0, 255.0).floor() as u8
    }
}

impl FrequencySource for AnalyserNode {
    fn frequency_snapshot(&mut self) -> FrequencySnapshot {
        self.analyse_frame();
        let bins = self.smoothed.iter().map(|&m| self.to_byte(m)).collect();
        FrequencySnapshot::new(bins)
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn bin_count(&self) -> usize {
        self.config.bin_count()
    }
}
