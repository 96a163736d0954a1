//! Playback and session controller.
//!
//! A [`VisualizerSession`] wires a [`TrackPlayer`] into an [`AnalyserNode`]
//! and drives a [`RenderLoop`] onto a [`Surface`]. Failures never escape as
//! panics or return values: each one is logged and kept in a single
//! current-error slot that the host can display.

use std::path::Path;

use thiserror::Error;

use super::config::VisualizerConfig;
use crate::audio::{
    load_audio, AnalyserError, AnalyserNode, AudioData, AudioError, FrequencySource, Playback,
    PlaybackError, TrackPlayer,
};
use crate::patterns::PatternKind;
use crate::render::{PatternState, RenderLoop, Surface};
use crate::spectrum::BandEnergy;

/// Sample rate the analyser starts with before a track is connected.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Errors surfaced to the user through the session's error slot.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VisualizerError {
    /// The analyser could not be created. The session stays without visuals.
    #[error("Error initializing audio analysis: {0}")]
    AnalysisInit(#[from] AnalyserError),

    /// The source could not be linked to the analyser. `connect` may be retried.
    #[error("Error connecting audio source: {0}")]
    Connection(String),

    #[error("Error playing audio: {0}")]
    Playback(#[from] PlaybackError),

    /// The source cannot be decoded. Controls stay disabled until a new source loads.
    #[error("Audio format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Error loading audio source: {0}")]
    Source(String),
}

impl VisualizerError {
    /// Whether this error disables transport controls.
    pub fn disables_controls(&self) -> bool {
        matches!(self, Self::UnsupportedFormat(_) | Self::Source(_))
    }
}

impl From<AudioError> for VisualizerError {
    fn from(err: AudioError) -> Self {
        match err {
            AudioError::UnsupportedFormat(what) => Self::UnsupportedFormat(what),
            other => Self::Source(other.to_string()),
        }
    }
}

/// One visualizer instance: track, analyser, render loop and surface.
#[derive(Debug)]
pub struct VisualizerSession<S: Surface> {
    config: VisualizerConfig,
    surface: S,
    player: TrackPlayer,
    analyser: Option<AnalyserNode>,
    connected: bool,
    render: RenderLoop,
    error: Option<VisualizerError>,
    controls_enabled: bool,
    torn_down: bool,
}

impl<S: Surface> VisualizerSession<S> {
    /// Create a session. Analyser failures are recorded, not returned.
    pub fn new(config: VisualizerConfig, surface: S) -> Self {
        let render = RenderLoop::new(config.to_sampling_mode(), config.pattern);

        let mut session = Self {
            config,
            surface,
            player: TrackPlayer::new(),
            analyser: None,
            connected: false,
            render,
            error: None,
            controls_enabled: false,
            torn_down: false,
        };

        match AnalyserNode::new(session.config.to_analyser_config(), DEFAULT_SAMPLE_RATE) {
            Ok(node) => session.analyser = Some(node),
            Err(e) => session.record(e.into()),
        }

        log::info!(
            "Visualizer session created ({:?}, pattern {})",
            session.config.mode,
            session.config.pattern
        );
        session
    }

    /// Decode and load an audio file, labelled by its file name.
    pub fn load_track(&mut self, path: &Path) {
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match load_audio(path) {
            Ok(audio) => self.load_audio(&audio, label),
            Err(e) => self.reject_source(e.into()),
        }
    }

    /// Load decoded audio as the current track and connect it.
    pub fn load_audio(&mut self, audio: &AudioData, label: impl Into<String>) {
        if self.torn_down {
            log::warn!("Ignoring track load on a torn down session");
            return;
        }

        self.render.stop();
        self.player.load(audio, label);
        self.controls_enabled = true;
        self.error = None;
        self.connected = false;
        if let Some(analyser) = self.analyser.as_mut() {
            analyser.reset();
        }
        self.connect();
    }

    /// Link the loaded track to the analyser. Safe to call again after a
    /// connection error.
    pub fn connect(&mut self) -> bool {
        if self.connected {
            return true;
        }
        let Some(rate) = self.player.sample_rate() else {
            self.record(VisualizerError::Connection("no audio source loaded".into()));
            return false;
        };
        let Some(analyser) = self.analyser.as_ref() else {
            self.record(VisualizerError::Connection("audio analysis is not available".into()));
            return false;
        };

        if analyser.sample_rate() != rate {
            match AnalyserNode::new(*analyser.config(), rate) {
                Ok(node) => self.analyser = Some(node),
                Err(e) => {
                    self.record(VisualizerError::Connection(e.to_string()));
                    return false;
                }
            }
        }

        self.connected = true;
        log::debug!("Source connected to analyser at {} Hz", rate);
        true
    }

    /// Toggle play/pause. Returns whether the track is playing afterwards.
    pub fn toggle_play(&mut self) -> bool {
        if !self.controls_enabled {
            log::warn!("Playback controls are disabled");
            return false;
        }

        if self.player.is_playing() {
            if let Err(e) = self.player.pause() {
                self.record(e.into());
            }
            self.render.stop();
        } else {
            match self.player.play() {
                Ok(()) => {
                    self.render.start();
                }
                Err(e) => self.record(e.into()),
            }
        }
        self.player.is_playing()
    }

    /// Toggle mute. Returns the new mute state.
    pub fn toggle_mute(&mut self) -> bool {
        if self.controls_enabled {
            let muted = !self.player.is_muted();
            self.player.set_muted(muted);
        }
        self.player.is_muted()
    }

    pub fn set_pattern(&mut self, pattern: PatternKind) {
        self.render.set_pattern(pattern);
    }

    /// Advance playback by `dt` seconds, feed the played samples to the
    /// analyser, and run the pending frame. Returns whether a frame was drawn.
    pub fn advance(&mut self, dt: f64) -> bool {
        let played = self.player.advance(dt);
        let Some(analyser) = self.analyser.as_mut() else {
            return false;
        };
        if self.connected {
            analyser.push_samples(played);
        }

        let playing = self.player.is_playing();
        self.render
            .run_pending_frame(playing, analyser, &mut self.surface)
    }

    /// Stop rendering and release the analyser and source link. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.render.stop();
        // Pausing a track player cannot fail
        let _ = self.player.pause();
        self.analyser = None;
        self.connected = false;
        self.controls_enabled = false;
        self.torn_down = true;
        log::debug!("Visualizer session torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn reject_source(&mut self, err: VisualizerError) {
        self.render.stop();
        self.player.unload();
        self.connected = false;
        self.controls_enabled = false;
        self.record(err);
    }

    fn record(&mut self, err: VisualizerError) {
        log::error!("{}", err);
        if err.disables_controls() {
            self.controls_enabled = false;
        }
        self.error = Some(err);
    }

    pub fn current_error(&self) -> Option<&VisualizerError> {
        self.error.as_ref()
    }

    /// Text for the error display, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    pub fn is_muted(&self) -> bool {
        self.player.is_muted()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn has_analyser(&self) -> bool {
        self.analyser.is_some()
    }

    pub fn track_label(&self) -> Option<&str> {
        self.player.label()
    }

    pub fn position(&self) -> f64 {
        self.player.position()
    }

    pub fn duration(&self) -> f64 {
        self.player.duration()
    }

    pub fn pattern(&self) -> PatternKind {
        self.render.pattern()
    }

    pub fn pattern_state(&self) -> PatternState {
        self.render.state()
    }

    pub fn time(&self) -> f32 {
        self.render.time()
    }

    pub fn bands(&self) -> &BandEnergy {
        self.render.bands()
    }

    pub fn render_loop(&self) -> &RenderLoop {
        &self.render
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

impl<S: Surface> Drop for VisualizerSession<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
