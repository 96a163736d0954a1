//! Session control, configuration and offline rendering.

pub mod config;
pub mod offline;
#[cfg(feature = "realtime")]
pub mod realtime;
pub mod session;

pub use config::{BarLayoutSpec, VisualMode, VisualizerConfig};
pub use offline::{frame_file_name, render_frames, trace_bands, BandTrace, PipelineError, TraceFrame};
#[cfg(feature = "realtime")]
pub use realtime::drive;
pub use session::{VisualizerError, VisualizerSession, DEFAULT_SAMPLE_RATE};
