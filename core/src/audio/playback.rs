//! Track playback state.
//!
//! [`TrackPlayer`] does not drive an output device. It advances a playhead
//! over decoded mono samples as frame time passes and hands back the samples
//! "played" in each interval so they can be fed to an analyser.

use thiserror::Error;

use super::loader::AudioData;

/// Errors returned by play and pause requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("No track loaded")]
    NoTrack,

    #[error("Track '{0}' has no samples")]
    EmptyTrack(String),
}

/// Transport controls shared by playback backends.
pub trait Playback {
    fn is_playing(&self) -> bool;

    /// Start or resume playback.
    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self) -> Result<(), PlaybackError>;

    /// Muting affects audible output only. Analysis keeps receiving samples.
    fn set_muted(&mut self, muted: bool);

    fn is_muted(&self) -> bool;
}

#[derive(Debug, Clone)]
struct Track {
    label: String,
    samples: Vec<f32>,
    sample_rate: u32,
}

/// Playhead over one loaded track.
#[derive(Debug, Default)]
pub struct TrackPlayer {
    track: Option<Track>,
    position: usize,
    /// Fractional samples carried between `advance` calls.
    carry: f64,
    playing: bool,
    muted: bool,
}

impl TrackPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current track. Playback stops and the playhead rewinds.
    /// The mute setting is kept.
    pub fn load(&mut self, audio: &AudioData, label: impl Into<String>) {
        let label = label.into();
        log::info!(
            "Loaded track '{}' ({:.2}s, {} Hz)",
            label,
            audio.duration(),
            audio.sample_rate
        );

        self.track = Some(Track {
            label,
            samples: audio.to_mono(),
            sample_rate: audio.sample_rate,
        });
        self.rewind();
        self.playing = false;
    }

    pub fn unload(&mut self) {
        self.track = None;
        self.rewind();
        self.playing = false;
    }

    pub fn has_track(&self) -> bool {
        self.track.is_some()
    }

    pub fn label(&self) -> Option<&str> {
        self.track.as_ref().map(|t| t.label.as_str())
    }

    pub fn sample_rate(&self) -> Option<u32> {
        self.track.as_ref().map(|t| t.sample_rate)
    }

    /// Playhead in seconds.
    pub fn position(&self) -> f64 {
        match &self.track {
            Some(t) if t.sample_rate > 0 => self.position as f64 / t.sample_rate as f64,
            _ => 0.0,
        }
    }

    /// Track length in seconds.
    pub fn duration(&self) -> f64 {
        match &self.track {
            Some(t) if t.sample_rate > 0 => t.samples.len() as f64 / t.sample_rate as f64,
            _ => 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.track
            .as_ref()
            .is_some_and(|t| self.position >= t.samples.len())
    }

    /// Move the playhead forward by `dt` seconds while playing and return the
    /// samples covered. Reaching the end of the track stops playback.
    pub fn advance(&mut self, dt: f64) -> &[f32] {
        let Some(track) = self.track.as_ref() else {
            return &[];
        };
        if !self.playing || dt <= 0.0 {
            return &[];
        }

        let wanted = dt * track.sample_rate as f64 + self.carry;
        let whole = wanted.floor();
        self.carry = wanted - whole;

        let start = self.position;
        let end = (start + whole as usize).min(track.samples.len());
        self.position = end;

        if end >= track.samples.len() {
            self.playing = false;
            self.carry = 0.0;
            log::info!("Track '{}' ended", track.label);
        }

        &track.samples[start..end]
    }

    fn rewind(&mut self) {
        self.position = 0;
        self.carry = 0.0;
    }
}

impl Playback for TrackPlayer {
    fn is_playing(&self) -> bool {
        self.playing
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let track = self.track.as_ref().ok_or(PlaybackError::NoTrack)?;
        if track.samples.is_empty() {
            return Err(PlaybackError::EmptyTrack(track.label.clone()));
        }

        if self.is_finished() {
            self.rewind();
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.playing = false;
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}
