//! Example: Drive a live session in real time.
//!
//! Loads an audio file (or a synthetic chord when none is given), plays it
//! through a recording surface at 60 fps, and switches pattern every second.
//!
//! Run with:
//!     cargo run --example live_session --features realtime -- [audio file]

use anyhow::Result;
use audioscape::audio::synth::generate_chord;
use audioscape::audio::AudioData;
use audioscape::pipeline::drive;
use audioscape::render::RecordingSurface;
use audioscape::{PatternKind, VisualizerConfig, VisualizerSession};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = VisualizerConfig::patterns();
    let fps = config.fps;
    let mut session = VisualizerSession::new(config, RecordingSurface::default());

    match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => session.load_track(&path),
        None => {
            let chord = generate_chord(&[110.0, 164.8, 220.0, 1760.0], 44100, 5.0, 0.7);
            session.load_audio(&AudioData::from_mono(chord, 44100), "synthetic chord");
        }
    }

    if let Some(message) = session.error_message() {
        anyhow::bail!(message);
    }
    println!(
        "Playing '{}' ({:.1}s)",
        session.track_label().unwrap_or("untitled"),
        session.duration()
    );
    session.toggle_play();

    for &pattern in PatternKind::all().iter().cycle() {
        if !session.is_playing() {
            break;
        }
        session.set_pattern(pattern);
        let frames = drive(&mut session, fps, Some(fps as usize)).await;
        let commands = session.surface_mut().take_commands().len();
        println!(
            "{:<16} t={:6.2} frames={:3} draw commands={}",
            pattern.label(),
            session.time(),
            frames,
            commands
        );
    }

    session.teardown();
    Ok(())
}
