//! Audio loading, analysis and playback.
//!
//! This module provides:
//! - Audio file loading via Symphonia (WAV, MP3, FLAC, AAC)
//! - FFT magnitude spectra via RustFFT
//! - A streaming analyser producing byte spectra per frame
//! - A playhead-driven track player
//! - Synthetic test signals

pub mod analyser;
pub mod fft;
pub mod loader;
pub mod playback;
pub mod synth;

pub use analyser::{AnalyserConfig, AnalyserError, AnalyserNode, FrequencySource};
pub use fft::SpectrumAnalyzer;
pub use loader::{load_audio, AudioData, AudioError};
pub use playback::{Playback, PlaybackError, TrackPlayer};
pub use synth::{generate_bass_pulse, generate_chord, generate_sine, generate_white_noise, write_wav};
