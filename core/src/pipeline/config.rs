//! Visualizer configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::audio::AnalyserConfig;
use crate::patterns::PatternKind;
use crate::spectrum::{BarLayout, SamplingMode};

/// Which visualizer to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VisualMode {
    #[default]
    Patterns,
    Bars,
}

/// Hz layout for bar mode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BarLayoutSpec {
    /// The fixed 32-band table.
    #[default]
    Standard,
    /// `count` log-spaced bands between `min_hz` and `max_hz`.
    #[serde(rename_all = "camelCase")]
    LogSpaced { count: usize, min_hz: f32, max_hz: f32 },
}

impl BarLayoutSpec {
    pub fn build(&self) -> BarLayout {
        match *self {
            Self::Standard => BarLayout::standard(),
            Self::LogSpaced {
                count,
                min_hz,
                max_hz,
            } => BarLayout::log_spaced(count, min_hz, max_hz),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisualizerConfig {
    pub mode: VisualMode,
    /// Initial pattern; ignored in bar mode.
    pub pattern: PatternKind,
    pub analyser: AnalyserConfig,
    pub bar_layout: BarLayoutSpec,
    /// Frames per second for offline rendering and the realtime driver.
    pub fps: u32,
    /// Integer upscale of the 400×400 raster canvas.
    pub canvas_scale: u32,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self::patterns()
    }
}

impl VisualizerConfig {
    /// Pattern visualizer preset.
    pub fn patterns() -> Self {
        Self {
            mode: VisualMode::Patterns,
            pattern: PatternKind::default(),
            analyser: AnalyserConfig::patterns(),
            bar_layout: BarLayoutSpec::Standard,
            fps: 60,
            canvas_scale: 1,
        }
    }

    /// Bar visualizer preset.
    pub fn bars() -> Self {
        Self {
            mode: VisualMode::Bars,
            analyser: AnalyserConfig::bars(),
            ..Self::patterns()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse visualizer config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize visualizer config")
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.fps > 0, "fps must be positive");
        ensure!(
            (1..=8).contains(&self.canvas_scale),
            "canvas scale must be between 1 and 8, got {}",
            self.canvas_scale
        );
        self.analyser.validate()?;

        if let BarLayoutSpec::LogSpaced {
            count,
            min_hz,
            max_hz,
        } = self.bar_layout
        {
            ensure!(count > 0, "bar layout needs at least one band");
            ensure!(
                min_hz > 0.0 && max_hz > min_hz,
                "invalid bar range {}..{} Hz",
                min_hz,
                max_hz
            );
        }
        Ok(())
    }

    pub fn to_analyser_config(&self) -> AnalyserConfig {
        self.analyser
    }

    pub fn to_sampling_mode(&self) -> SamplingMode {
        match self.mode {
            VisualMode::Patterns => SamplingMode::Pattern,
            VisualMode::Bars => SamplingMode::Bars(self.bar_layout.build()),
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_patterns_preset() {
        let config = VisualizerConfig::default();
        assert_eq!(config.mode, VisualMode::Patterns);
        assert_eq!(config.analyser.fft_size, 8192);
        assert_eq!(config.fps, 60);
        assert!(config.validate().is_ok());
        assert_eq!(config.to_sampling_mode(), SamplingMode::Pattern);
    }

    #[test]
    fn test_bars_preset() {
        let config = VisualizerConfig::bars();
        assert_eq!(config.analyser, AnalyserConfig::bars());
        assert_eq!(config.to_sampling_mode().band_count(), 32);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = VisualizerConfig::from_json_str(
            r#"{
                "mode": "bars",
                "pattern": "spectrumVortex",
                "barLayout": { "kind": "logSpaced", "count": 48, "minHz": 20.0, "maxHz": 16000.0 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.mode, VisualMode::Bars);
        assert_eq!(config.pattern, PatternKind::SpectrumVortex);
        assert_eq!(config.fps, 60);
        assert_eq!(config.to_sampling_mode().band_count(), 48);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(VisualizerConfig::from_json_str(r#"{"fps": 0}"#).is_err());
        assert!(VisualizerConfig::from_json_str(r#"{"canvasScale": 12}"#).is_err());
        assert!(VisualizerConfig::from_json_str(r#"{"analyser": {"fftSize": 100}}"#).is_err());
        assert!(VisualizerConfig::from_json_str(
            r#"{"barLayout": {"kind": "logSpaced", "count": 0, "minHz": 20.0, "maxHz": 100.0}}"#
        )
        .is_err());
        assert!(VisualizerConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visualizer.json");
        let config = VisualizerConfig {
            pattern: PatternKind::FracturedSpace,
            fps: 30,
            ..VisualizerConfig::patterns()
        };
        std::fs::write(&path, config.to_json_string().unwrap()).unwrap();

        assert_eq!(VisualizerConfig::from_json_file(&path).unwrap(), config);
        assert!(VisualizerConfig::from_json_file(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_frame_interval() {
        let config = VisualizerConfig {
            fps: 50,
            ..VisualizerConfig::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(20));
    }
}
