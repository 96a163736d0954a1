//! Per-frame render driver.
//!
//! [`RenderLoop`] owns the pattern clock and the last sampled bands. Each
//! frame pulls a snapshot from a [`FrequencySource`], samples it, and draws
//! either the pattern grid or the bar display onto a [`Surface`].

use serde::Serialize;

use super::scheduler::{FrameHandle, FrameScheduler};
use super::surface::Surface;
use super::visuals::{bar_color, VisualParams, BACKGROUND};
use crate::audio::analyser::FrequencySource;
use crate::patterns::{GridWalk, PatternKind};
use crate::spectrum::{sample, BandEnergy, SamplingMode};

/// Pattern clock and selection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PatternState {
    pub time: f32,
    pub pattern: PatternKind,
}

#[derive(Debug)]
pub struct RenderLoop {
    mode: SamplingMode,
    state: PatternState,
    scheduler: FrameScheduler,
    bands: BandEnergy,
    last_params: Option<VisualParams>,
}

impl RenderLoop {
    pub fn new(mode: SamplingMode, pattern: PatternKind) -> Self {
        let bands = BandEnergy::silent(mode.band_count());
        Self {
            mode,
            state: PatternState { time: 0.0, pattern },
            scheduler: FrameScheduler::new(),
            bands,
            last_params: None,
        }
    }

    /// Pattern visualizer with the given pattern.
    pub fn patterns(pattern: PatternKind) -> Self {
        Self::new(SamplingMode::Pattern, pattern)
    }

    pub fn mode(&self) -> &SamplingMode {
        &self.mode
    }

    pub fn state(&self) -> PatternState {
        self.state
    }

    pub fn time(&self) -> f32 {
        self.state.time
    }

    pub fn pattern(&self) -> PatternKind {
        self.state.pattern
    }

    /// Switch pattern. The clock keeps running from where it was.
    pub fn set_pattern(&mut self, pattern: PatternKind) {
        if pattern != self.state.pattern {
            log::debug!("Pattern {} -> {}", self.state.pattern, pattern);
        }
        self.state.pattern = pattern;
    }

    /// Bands sampled on the last frame.
    pub fn bands(&self) -> &BandEnergy {
        &self.bands
    }

    /// Parameters of the last pattern frame.
    pub fn last_params(&self) -> Option<&VisualParams> {
        self.last_params.as_ref()
    }

    /// Schedule a frame unless one is already pending.
    pub fn start(&mut self) -> FrameHandle {
        self.scheduler.request_frame()
    }

    /// Cancel the pending frame, if any.
    pub fn stop(&mut self) -> bool {
        self.scheduler.cancel_pending()
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Run the pending frame, if there is one, and schedule the next while
    /// `playing`. Returns whether a frame was drawn.
    pub fn run_pending_frame<F, S>(&mut self, playing: bool, source: &mut F, surface: &mut S) -> bool
    where
        F: FrequencySource + ?Sized,
        S: Surface + ?Sized,
    {
        if self.scheduler.take_due().is_none() {
            return false;
        }

        self.draw_frame(source, surface);

        if playing {
            self.scheduler.request_frame();
        }
        true
    }

    /// Sample one snapshot and draw it, regardless of scheduling.
    pub fn draw_frame<F, S>(&mut self, source: &mut F, surface: &mut S)
    where
        F: FrequencySource + ?Sized,
        S: Surface + ?Sized,
    {
        let snapshot = source.frequency_snapshot();
        self.bands = sample(&snapshot, &self.mode, source.sample_rate());

        match self.mode {
            SamplingMode::Pattern => self.draw_pattern(surface),
            SamplingMode::Bars(_) => self.draw_bars(surface),
        }
    }

    fn draw_pattern<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let bands = self.bands.values();
        let params = VisualParams::from_bands(bands, self.state.time);

        surface.clear_with_alpha(BACKGROUND, params.fade_alpha);
        surface.set_stroke_color(params.stroke_color());
        surface.begin_path();

        let pattern = self.state.pattern;
        let time = self.state.time;
        for (i, point) in GridWalk::new(params.step).enumerate() {
            let moved = pattern.transform(point.x, point.y, time, bands);
            if i == 0 {
                surface.move_to(moved);
            } else {
                surface.line_to(moved);
            }
        }

        surface.set_line_width(params.line_width);
        surface.stroke_path();

        self.state.time += params.time_step();
        self.last_params = Some(params);
    }

    fn draw_bars<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear_with_alpha(BACKGROUND, 1.0);
        surface.set_bar_count(self.bands.len());
        for (i, &value) in self.bands.iter().enumerate() {
            surface.set_bar(i, value, bar_color(i, value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::{DrawCommand, RecordingSurface};
    use crate::spectrum::{BarLayout, FrequencySnapshot};
    use approx::assert_relative_eq;

    /// Returns the same snapshot every frame.
    struct FixedSource {
        snapshot: FrequencySnapshot,
        calls: usize,
    }

    impl FixedSource {
        fn new(len: usize, value: u8) -> Self {
            Self {
                snapshot: FrequencySnapshot::filled(len, value),
                calls: 0,
            }
        }
    }

    impl FrequencySource for FixedSource {
        fn frequency_snapshot(&mut self) -> FrequencySnapshot {
            self.calls += 1;
            self.snapshot.clone()
        }

        fn sample_rate(&self) -> u32 {
            44100
        }

        fn bin_count(&self) -> usize {
            self.snapshot.len()
        }
    }

    #[test]
    fn test_pattern_frame_draws_single_path() {
        let mut source = FixedSource::new(4096, 0);
        let mut surface = RecordingSurface::default();
        let mut render = RenderLoop::patterns(PatternKind::CrystalFlow);

        render.draw_frame(&mut source, &mut surface);

        let commands = surface.commands();
        assert_eq!(
            commands[0],
            DrawCommand::Clear {
                rgb: [6, 6, 6],
                alpha: 0.1
            }
        );
        assert!(matches!(commands[2], DrawCommand::BeginPath));
        assert!(matches!(commands[3], DrawCommand::MoveTo(_)));
        assert_eq!(surface.stroke_count(), 1);
        // Silent bands: step 8 gives a 38×38 grid
        assert_eq!(surface.path_points().len(), 38 * 38);
        assert_eq!(commands.last(), Some(&DrawCommand::Stroke));
        assert_eq!(commands[commands.len() - 2], DrawCommand::LineWidth(1.0));
    }

    #[test]
    fn test_time_advances_with_bass() {
        let mut quiet = RenderLoop::patterns(PatternKind::NeuralPulse);
        let mut loud = RenderLoop::patterns(PatternKind::NeuralPulse);
        let mut surface = RecordingSurface::default();

        quiet.draw_frame(&mut FixedSource::new(4096, 0), &mut surface);
        loud.draw_frame(&mut FixedSource::new(4096, 255), &mut surface);

        assert_relative_eq!(quiet.time(), 0.02);
        assert!(loud.time() > quiet.time());
        assert!(loud.last_params().unwrap().bass > 1.0);
    }

    #[test]
    fn test_set_pattern_keeps_time() {
        let mut render = RenderLoop::patterns(PatternKind::CrystalFlow);
        let mut source = FixedSource::new(1024, 40);
        let mut surface = RecordingSurface::default();
        for _ in 0..5 {
            render.draw_frame(&mut source, &mut surface);
        }
        let time = render.time();

        render.set_pattern(PatternKind::QuantumField);
        assert_eq!(render.pattern(), PatternKind::QuantumField);
        assert_eq!(render.time(), time);
    }

    #[test]
    fn test_run_pending_frame_reschedules_only_while_playing() {
        let mut render = RenderLoop::patterns(PatternKind::default());
        let mut source = FixedSource::new(1024, 10);
        let mut surface = RecordingSurface::default();

        assert!(!render.run_pending_frame(true, &mut source, &mut surface));
        assert_eq!(source.calls, 0);

        render.start();
        assert!(render.run_pending_frame(true, &mut source, &mut surface));
        assert!(render.is_running());

        assert!(render.run_pending_frame(false, &mut source, &mut surface));
        assert!(!render.is_running());
        assert!(!render.run_pending_frame(true, &mut source, &mut surface));
        assert_eq!(source.calls, 2);
    }

    #[test]
    fn test_stop_cancels_pending_frame() {
        let mut render = RenderLoop::patterns(PatternKind::default());
        let first = render.start();
        assert_eq!(render.start(), first);
        assert!(render.stop());
        assert!(!render.stop());
        assert!(!render.is_running());
    }

    #[test]
    fn test_bar_frame_sets_every_bar() {
        let mut render = RenderLoop::new(SamplingMode::Bars(BarLayout::standard()), PatternKind::default());
        let mut source = FixedSource::new(2048, 255);
        let mut surface = RecordingSurface::default();

        render.draw_frame(&mut source, &mut surface);

        assert_eq!(
            surface.commands()[0],
            DrawCommand::Clear {
                rgb: [6, 6, 6],
                alpha: 1.0
            }
        );
        assert_eq!(surface.commands()[1], DrawCommand::BarCount(32));
        let heights = surface.bar_heights();
        assert_eq!(heights.len(), 32);
        assert!(heights.iter().all(|&h| h == 100.0));
        assert_eq!(render.bands().len(), 32);
        // Bars never advance the pattern clock
        assert_eq!(render.time(), 0.0);
    }
}
