//! Drawing surface abstraction.
//!
//! Pattern frames draw one stroked path over a translucent clear; bar frames
//! clear opaquely and set one rectangle per band. Coordinates passed to
//! path operations are in the 400×400 logical pattern space.

use std::fmt;

use serde::Serialize;

use crate::patterns::Point2D;

/// Colour in hue (degrees), saturation and lightness (percent) and alpha (0–1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    pub const fn new(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    /// Opaque colour.
    pub const fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self::new(hue, saturation, lightness, 1.0)
    }

    /// Convert to 8-bit RGB, ignoring alpha.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let h = self.hue.rem_euclid(360.0) / 360.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return [v, v, v];
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        let channel = |t: f32| {
            let t = t.rem_euclid(1.0);
            let v = if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            };
            (v * 255.0).round().clamp(0.0, 255.0) as u8
        };

        [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)]
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({}, {}%, {}%, {})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

/// A 2D drawing target.
pub trait Surface {
    /// Size in physical pixels.
    fn size(&self) -> (u32, u32);

    /// Paint `rgb` over the whole surface at `alpha`. An alpha below 1 leaves
    /// a fading trail of earlier frames.
    fn clear_with_alpha(&mut self, rgb: [u8; 3], alpha: f32);

    fn set_stroke_color(&mut self, color: Hsla);

    fn set_line_width(&mut self, width: f32);

    fn begin_path(&mut self);

    fn move_to(&mut self, point: Point2D);

    fn line_to(&mut self, point: Point2D);

    /// Stroke the current path with the current colour and width.
    fn stroke_path(&mut self);

    /// Announce how many bars the following `set_bar` calls cover.
    fn set_bar_count(&mut self, _count: usize) {}

    /// Set bar `index` to `height_percent` (0–100) of the surface height.
    fn set_bar(&mut self, index: usize, height_percent: f32, color: Hsla);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", content = "args", rename_all = "camelCase")]
pub enum DrawCommand {
    Clear { rgb: [u8; 3], alpha: f32 },
    StrokeColor(Hsla),
    LineWidth(f32),
    BeginPath,
    MoveTo(Point2D),
    LineTo(Point2D),
    Stroke,
    BarCount(usize),
    Bar {
        index: usize,
        height_percent: f32,
        color: Hsla,
    },
}

/// Surface that records every call, for tests and inspection.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(400, 400)
    }
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke))
            .count()
    }

    /// Points of every move-to and line-to, in order.
    pub fn path_points(&self) -> Vec<Point2D> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::MoveTo(p) | DrawCommand::LineTo(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    /// Heights of the bar commands, in order.
    pub fn bar_heights(&self) -> Vec<f32> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Bar { height_percent, .. } => Some(*height_percent),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear_with_alpha(&mut self, rgb: [u8; 3], alpha: f32) {
        self.commands.push(DrawCommand::Clear { rgb, alpha });
    }

    fn set_stroke_color(&mut self, color: Hsla) {
        self.commands.push(DrawCommand::StrokeColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: Point2D) {
        self.commands.push(DrawCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Point2D) {
        self.commands.push(DrawCommand::LineTo(point));
    }

    fn stroke_path(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn set_bar_count(&mut self, count: usize) {
        self.commands.push(DrawCommand::BarCount(count));
    }

    fn set_bar(&mut self, index: usize, height_percent: f32, color: Hsla) {
        self.commands.push(DrawCommand::Bar {
            index,
            height_percent,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(Hsla::hsl(0.0, 100.0, 50.0).to_rgb8(), [255, 0, 0]);
        assert_eq!(Hsla::hsl(120.0, 100.0, 50.0).to_rgb8(), [0, 255, 0]);
        assert_eq!(Hsla::hsl(240.0, 100.0, 50.0).to_rgb8(), [0, 0, 255]);
        assert_eq!(Hsla::hsl(360.0, 100.0, 50.0).to_rgb8(), [255, 0, 0]);
    }

    #[test]
    fn test_hsl_greys() {
        assert_eq!(Hsla::hsl(210.0, 0.0, 0.0).to_rgb8(), [0, 0, 0]);
        assert_eq!(Hsla::hsl(210.0, 0.0, 100.0).to_rgb8(), [255, 255, 255]);
        assert_eq!(Hsla::hsl(210.0, 70.0, 100.0).to_rgb8(), [255, 255, 255]);
    }

    #[test]
    fn test_css_formatting() {
        let color = Hsla::new(215.5, 70.0, 45.0, 0.6);
        assert_eq!(color.to_string(), "hsla(215.5, 70%, 45%, 0.6)");
    }

    #[test]
    fn test_recording_surface_log() {
        let mut surface = RecordingSurface::default();
        surface.clear_with_alpha([6, 6, 6], 0.1);
        surface.begin_path();
        surface.move_to(Point2D::new(1.0, 2.0));
        surface.line_to(Point2D::new(3.0, 4.0));
        surface.stroke_path();
        surface.set_bar(0, 42.0, Hsla::hsl(210.0, 70.0, 58.4));

        assert_eq!(surface.size(), (400, 400));
        assert_eq!(surface.stroke_count(), 1);
        assert_eq!(
            surface.path_points(),
            vec![Point2D::new(1.0, 2.0), Point2D::new(3.0, 4.0)]
        );
        assert_eq!(surface.bar_heights(), vec![42.0]);

        let taken = surface.take_commands();
        assert_eq!(taken.len(), 6);
        assert!(surface.commands().is_empty());
    }
}
