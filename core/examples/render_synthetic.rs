//! Example: Render every pattern from synthetic audio.
//!
//! This example generates a bass pulse, writes it to a WAV file, and renders
//! a short PNG sequence per pattern plus one for the bar visualizer.
//!
//! Run with:
//!     cargo run --example render_synthetic

use anyhow::{Context, Result};
use audioscape::audio::synth::{generate_bass_pulse, write_wav};
use audioscape::audio::load_audio;
use audioscape::pipeline::{render_frames, trace_bands};
use audioscape::{PatternKind, VisualizerConfig};
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    println!("Audioscape - Synthetic Audio Example");
    println!("====================================\n");

    let sample_rate: u32 = 44100;
    let duration_secs: f32 = 2.0;
    let bpm: f32 = 120.0;

    println!("Generating synthetic bass pulse...");
    println!("  Sample rate: {} Hz", sample_rate);
    println!("  Duration: {} seconds", duration_secs);
    println!("  BPM: {}", bpm);

    let out_root = Path::new("synthetic_demo");
    std::fs::create_dir_all(out_root).context("Failed to create output directory")?;
    let wav_path = out_root.join("pulse.wav");
    let samples = generate_bass_pulse(bpm, sample_rate, duration_secs);
    write_wav(&wav_path, &samples, sample_rate).context("Failed to write WAV")?;
    println!("  Wrote {} samples to {}\n", samples.len(), wav_path.display());

    let fps = 30;
    let progress = |p: f32| {
        if (p * 10.0).fract() < 0.05 {
            log::debug!("{:.0}%", p * 100.0);
        }
    };

    for &pattern in PatternKind::all() {
        let config = VisualizerConfig {
            pattern,
            fps,
            ..VisualizerConfig::patterns()
        };
        let out_dir = out_root.join(pattern.id());
        let frames = render_frames(&wav_path, &out_dir, &config, Some(&progress))
            .with_context(|| format!("Failed to render {}", pattern.label()))?;
        println!("  {:<16} {} frames -> {}", pattern.label(), frames, out_dir.display());
    }

    let bars = VisualizerConfig {
        fps,
        ..VisualizerConfig::bars()
    };
    let out_dir = out_root.join("bars");
    let frames = render_frames(&wav_path, &out_dir, &bars, None).context("Failed to render bars")?;
    println!("  {:<16} {} frames -> {}", "Bars", frames, out_dir.display());

    // Dump the band trace alongside the frames
    let audio = load_audio(&wav_path)?;
    let trace = trace_bands(&audio, &bars)?;
    let trace_path = out_root.join("bars_trace.json");
    std::fs::write(&trace_path, trace.to_json()?)?;
    println!("\nDominant bar: {:?}", trace.dominant_band());
    println!("Band trace written to {}", trace_path.display());

    Ok(())
}
