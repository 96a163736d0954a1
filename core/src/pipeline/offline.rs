//! Offline rendering and band tracing.

use std::path::Path;

use serde::Serialize;

use super::config::{VisualMode, VisualizerConfig};
use super::session::{VisualizerError, VisualizerSession};
use crate::audio::{load_audio, AnalyserError, AnalyserNode, AudioData, AudioError, FrequencySource};
use crate::render::RasterCanvas;
use crate::spectrum::{sample, BandEnergy};

/// Errors that can occur during offline rendering.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),
    #[error("Analyser error: {0}")]
    Analyser(#[from] AnalyserError),
    #[error("Visualizer error: {0}")]
    Visualizer(#[from] VisualizerError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] anyhow::Error),
}

/// File name of frame `index` (1-based) in a PNG sequence.
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{:05}.png", index)
}

/// Render `audio_path` into a PNG sequence in `out_dir`, one image per frame
/// at the configured fps. Returns the number of frames written.
///
/// Frames run through the full session: player, analyser, sampler, render
/// loop and raster canvas.
pub fn render_frames(
    audio_path: &Path,
    out_dir: &Path,
    config: &VisualizerConfig,
    progress: Option<&dyn Fn(f32)>,
) -> Result<usize, PipelineError> {
    config.validate()?;
    let audio = load_audio(audio_path)?;
    std::fs::create_dir_all(out_dir)?;

    let label = audio_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut session = VisualizerSession::new(config.clone(), RasterCanvas::new(config.canvas_scale));
    session.load_audio(&audio, label);
    if let Some(err) = session.current_error() {
        return Err(err.clone().into());
    }
    if !session.toggle_play() {
        let err = session
            .current_error()
            .cloned()
            .unwrap_or_else(|| VisualizerError::Source("playback did not start".into()));
        return Err(err.into());
    }

    let total_frames = (audio.duration() * config.fps as f64).ceil() as usize;
    let dt = 1.0 / config.fps as f64;
    log::info!(
        "Rendering {} frames of {:.2}s audio at {} fps to {}",
        total_frames,
        audio.duration(),
        config.fps,
        out_dir.display()
    );

    for index in 1..=total_frames {
        session.advance(dt);
        session
            .surface()
            .save_png(&out_dir.join(frame_file_name(index)))?;

        if let Some(report) = progress {
            report(index as f32 / total_frames as f32);
        }
    }

    Ok(total_frames)
}

/// Bands sampled for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct TraceFrame {
    /// Frame end time in seconds.
    pub time: f64,
    pub bands: BandEnergy,
}

/// Per-frame band energies of a whole track.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandTrace {
    pub mode: VisualMode,
    pub fps: u32,
    pub sample_rate: u32,
    pub band_count: usize,
    pub frames: Vec<TraceFrame>,
}

impl BandTrace {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Index of the loudest band averaged over all frames.
    pub fn dominant_band(&self) -> Option<usize> {
        if self.frames.is_empty() {
            return None;
        }
        let mut totals = vec![0.0f32; self.band_count];
        for frame in &self.frames {
            for (total, &v) in totals.iter_mut().zip(frame.bands.iter()) {
                *total += v;
            }
        }
        totals
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }
}

/// Sample `audio` frame by frame without drawing.
pub fn trace_bands(audio: &AudioData, config: &VisualizerConfig) -> Result<BandTrace, PipelineError> {
    config.validate()?;
    let mut analyser = AnalyserNode::new(config.to_analyser_config(), audio.sample_rate)?;
    let mode = config.to_sampling_mode();
    let mono = audio.to_mono();

    let total_frames = (audio.duration() * config.fps as f64).ceil() as usize;
    let mut frames = Vec::with_capacity(total_frames);
    let mut consumed = 0usize;

    for index in 1..=total_frames {
        let time = index as f64 / config.fps as f64;
        let until = ((time * audio.sample_rate as f64) as usize).min(mono.len());
        analyser.push_samples(&mono[consumed..until]);
        consumed = until;

        let snapshot = analyser.frequency_snapshot();
        frames.push(TraceFrame {
            time,
            bands: sample(&snapshot, &mode, audio.sample_rate),
        });
    }

    Ok(BandTrace {
        mode: config.mode,
        fps: config.fps,
        sample_rate: audio.sample_rate,
        band_count: mode.band_count(),
        frames,
    })
}
