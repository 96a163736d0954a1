//! Audioscape Core
//!
//! Audio-reactive visualizer library: spectrum bars and generative grid
//! patterns driven by FFT band energy.
//!
//! # Features
//!
//! - Audio loading (WAV, MP3, FLAC, AAC) via Symphonia
//! - Web Audio style frequency analysis via RustFFT
//! - 32-band spectrum sampling and band energy probes
//! - Five deterministic grid displacement patterns
//! - Frame loop with recording and raster (PNG) surfaces
//! - Session controller with play/pause, mute and an error slot
//! - Offline PNG sequence rendering and band traces
//! - Async realtime driver via Tokio (when `realtime` feature is enabled)

pub mod audio;
pub mod patterns;
pub mod pipeline;
pub mod render;
pub mod spectrum;

// Re-export commonly used types
pub use audio::{
    load_audio, AnalyserConfig, AnalyserError, AnalyserNode, AudioData, AudioError,
    FrequencySource, Playback, PlaybackError, SpectrumAnalyzer, TrackPlayer,
};
pub use patterns::{GridWalk, PatternKind, Point2D};
pub use pipeline::{
    render_frames, trace_bands, BandTrace, PipelineError, VisualMode, VisualizerConfig,
    VisualizerError, VisualizerSession,
};
pub use render::{
    DrawCommand, FrameHandle, FrameScheduler, Hsla, PatternState, RasterCanvas, RecordingSurface,
    RenderLoop, Surface,
};
pub use spectrum::{
    energy, sample, BandEnergy, BarLayout, EnergyProbe, FrequencySnapshot, SamplingMode, BAND_COUNT,
};
