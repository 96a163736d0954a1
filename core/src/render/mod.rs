//! Frame rendering.
//!
//! This module provides:
//! - The [`Surface`] drawing abstraction with recording and raster backends
//! - Visual parameters derived from band energy
//! - Single-slot frame scheduling
//! - The per-frame render loop

pub mod canvas;
pub mod frame_loop;
pub mod scheduler;
pub mod surface;
pub mod visuals;

pub use canvas::RasterCanvas;
pub use frame_loop::{PatternState, RenderLoop};
pub use scheduler::{FrameHandle, FrameScheduler};
pub use surface::{DrawCommand, Hsla, RecordingSurface, Surface};
pub use visuals::{bar_color, VisualParams, BACKGROUND};
