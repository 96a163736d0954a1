//! CPU raster surface backed by an `image::RgbaImage`.

use std::path::Path;

use image::{ImageResult, Rgba, RgbaImage};

use super::surface::{Hsla, Surface};
use crate::patterns::{Point2D, CANVAS_SIZE};

/// Gap between adjacent bars, in logical pixels.
const BAR_GAP: f32 = 1.0;

/// Long segments are split into pieces of about this many physical pixels so
/// each piece only scans a small bounding box.
const SEGMENT_PIECE: f32 = 8.0;

const MAX_PIECES: usize = 1024;

/// Anti-aliased raster canvas.
///
/// Paths are given in the 400×400 logical space and scaled by an integer
/// factor. A stroke builds a coverage mask over all its segments first, so
/// overlapping segments of one path are blended once.
pub struct RasterCanvas {
    image: RgbaImage,
    scale: u32,
    stroke: Hsla,
    line_width: f32,
    subpaths: Vec<Vec<Point2D>>,
    bar_count: usize,
    coverage: Vec<f32>,
}

impl RasterCanvas {
    /// # Panics
    ///
    /// Panics if `scale` is zero.
    pub fn new(scale: u32) -> Self {
        assert!(scale > 0, "canvas scale must be at least 1");
        let side = CANVAS_SIZE as u32 * scale;
        Self {
            image: RgbaImage::from_pixel(side, side, Rgba([0, 0, 0, 255])),
            scale,
            stroke: Hsla::hsl(0.0, 0.0, 100.0),
            line_width: 1.0,
            subpaths: Vec::new(),
            bar_count: 0,
            coverage: vec![0.0; (side * side) as usize],
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn save_png(&self, path: &Path) -> ImageResult<()> {
        self.image.save_with_format(path, image::ImageFormat::Png)
    }

    fn blend(pixel: &mut Rgba<u8>, rgb: [u8; 3], alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let alpha = alpha.min(1.0);
        for (dst, &src) in pixel.0.iter_mut().zip(&rgb) {
            let mixed = *dst as f32 * (1.0 - alpha) + src as f32 * alpha;
            *dst = mixed.round() as u8;
        }
        pixel.0[3] = 255;
    }

    /// Max-combine one segment's coverage into the mask.
    fn cover_segment(&mut self, a: Point2D, b: Point2D, half_width: f32) {
        let scale = self.scale as f32;
        let (ax, ay) = (a.x * scale, a.y * scale);
        let (bx, by) = (b.x * scale, b.y * scale);
        let reach = half_width + 1.0;

        let (w, h) = self.image.dimensions();
        let x0 = (ax.min(bx) - reach).floor().max(0.0) as u32;
        let y0 = (ay.min(by) - reach).floor().max(0.0) as u32;
        let x1 = ((ax.max(bx) + reach).ceil().max(0.0) as u32).min(w);
        let y1 = ((ay.max(by) + reach).ceil().max(0.0) as u32).min(h);

        let (dx, dy) = (bx - ax, by - ay);
        let len_sq = dx * dx + dy * dy;

        for py in y0..y1 {
            for px in x0..x1 {
                let cx = px as f32 + 0.5;
                let cy = py as f32 + 0.5;
                let t = if len_sq > 0.0 {
                    (((cx - ax) * dx + (cy - ay) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let dist = (cx - (ax + t * dx)).hypot(cy - (ay + t * dy));
                let cover = (half_width + 0.5 - dist).clamp(0.0, 1.0);
                if cover > 0.0 {
                    let slot = &mut self.coverage[(py * w + px) as usize];
                    *slot = slot.max(cover);
                }
            }
        }
    }
}

impl Surface for RasterCanvas {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear_with_alpha(&mut self, rgb: [u8; 3], alpha: f32) {
        for pixel in self.image.pixels_mut() {
            Self::blend(pixel, rgb, alpha);
        }
    }

    fn set_stroke_color(&mut self, color: Hsla) {
        self.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width.max(0.0);
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, point: Point2D) {
        self.subpaths.push(vec![point]);
    }

    fn line_to(&mut self, point: Point2D) {
        match self.subpaths.last_mut() {
            Some(subpath) => subpath.push(point),
            None => self.subpaths.push(vec![point]),
        }
    }

    fn stroke_path(&mut self) {
        let half_width = self.line_width * self.scale as f32 / 2.0;
        let subpaths = std::mem::take(&mut self.subpaths);

        let scale = self.scale as f32;
        for subpath in &subpaths {
            for pair in subpath.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if !a.is_finite() || !b.is_finite() {
                    continue;
                }

                let length = (b.x - a.x).hypot(b.y - a.y) * scale;
                let pieces = ((length / SEGMENT_PIECE).ceil() as usize).clamp(1, MAX_PIECES);
                let mut from = a;
                for k in 1..=pieces {
                    let t = k as f32 / pieces as f32;
                    let to = Point2D::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
                    self.cover_segment(from, to, half_width);
                    from = to;
                }
            }
        }
        self.subpaths = subpaths;

        let rgb = self.stroke.to_rgb8();
        let alpha = self.stroke.alpha;
        let (w, _) = self.image.dimensions();
        for (i, cover) in self.coverage.iter_mut().enumerate() {
            if *cover > 0.0 {
                let i = i as u32;
                let pixel = self.image.get_pixel_mut(i % w, i / w);
                Self::blend(pixel, rgb, alpha * *cover);
                *cover = 0.0;
            }
        }
    }

    fn set_bar_count(&mut self, count: usize) {
        self.bar_count = count;
    }

    fn set_bar(&mut self, index: usize, height_percent: f32, color: Hsla) {
        let count = self.bar_count.max(index + 1);
        let (w, h) = self.image.dimensions();
        let scale = self.scale as f32;

        let bar_width = w as f32 / count as f32;
        let left = (index as f32 * bar_width).round() as u32;
        let right = ((index + 1) as f32 * bar_width - BAR_GAP * scale)
            .round()
            .max(left as f32 + 1.0) as u32;
        let right = right.min(w);
        let height = (h as f32 * height_percent.clamp(0.0, 100.0) / 100.0).round() as u32;

        let rgb = color.to_rgb8();
        for y in h.saturating_sub(height)..h {
            for x in left..right {
                Self::blend(self.image.get_pixel_mut(x, y), rgb, color.alpha);
            }
        }
    }
}

impl std::fmt::Debug for RasterCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterCanvas")
            .field("size", &self.image.dimensions())
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_pixels(canvas: &RasterCanvas) -> usize {
        canvas
            .image()
            .pixels()
            .filter(|p| p.0[..3].iter().any(|&c| c > 20))
            .count()
    }

    #[test]
    fn test_canvas_size_follows_scale() {
        assert_eq!(RasterCanvas::new(1).size(), (400, 400));
        assert_eq!(RasterCanvas::new(2).size(), (800, 800));
    }

    #[test]
    fn test_opaque_clear() {
        let mut canvas = RasterCanvas::new(1);
        canvas.clear_with_alpha([6, 6, 6], 1.0);
        assert!(canvas.image().pixels().all(|p| p.0 == [6, 6, 6, 255]));
    }

    #[test]
    fn test_translucent_clear_fades_toward_colour() {
        let mut canvas = RasterCanvas::new(1);
        canvas.clear_with_alpha([200, 200, 200], 1.0);
        canvas.clear_with_alpha([0, 0, 0], 0.5);
        assert_eq!(canvas.image().get_pixel(10, 10).0, [100, 100, 100, 255]);
    }

    #[test]
    fn test_stroke_draws_visible_pixels() {
        let mut canvas = RasterCanvas::new(1);
        canvas.clear_with_alpha([6, 6, 6], 1.0);
        canvas.set_stroke_color(Hsla::new(210.0, 70.0, 60.0, 1.0));
        canvas.set_line_width(2.0);
        canvas.begin_path();
        canvas.move_to(Point2D::new(50.0, 200.0));
        canvas.line_to(Point2D::new(350.0, 200.0));
        canvas.stroke_path();

        assert!(lit_pixels(&canvas) >= 300);
        let on_line = canvas.image().get_pixel(200, 199);
        assert!(on_line.0[2] > 100);
        let off_line = canvas.image().get_pixel(200, 100);
        assert_eq!(off_line.0, [6, 6, 6, 255]);
    }

    #[test]
    fn test_overlapping_segments_blend_once() {
        let mut single = RasterCanvas::new(1);
        let mut doubled = RasterCanvas::new(1);
        for canvas in [&mut single, &mut doubled] {
            canvas.clear_with_alpha([0, 0, 0], 1.0);
            canvas.set_stroke_color(Hsla::new(0.0, 0.0, 100.0, 0.5));
            canvas.begin_path();
            canvas.move_to(Point2D::new(100.0, 100.0));
            canvas.line_to(Point2D::new(300.0, 100.0));
        }
        doubled.line_to(Point2D::new(100.0, 100.0));
        single.stroke_path();
        doubled.stroke_path();

        assert_eq!(single.image().get_pixel(200, 100), doubled.image().get_pixel(200, 100));
    }

    #[test]
    fn test_non_finite_points_are_skipped() {
        let mut canvas = RasterCanvas::new(1);
        canvas.begin_path();
        canvas.move_to(Point2D::new(f32::NAN, 10.0));
        canvas.line_to(Point2D::new(100.0, f32::INFINITY));
        canvas.stroke_path();
        assert_eq!(lit_pixels(&canvas), 0);
    }

    #[test]
    fn test_bars_grow_from_bottom() {
        let mut canvas = RasterCanvas::new(1);
        canvas.clear_with_alpha([0, 0, 0], 1.0);
        canvas.set_bar_count(4);
        canvas.set_bar(0, 50.0, Hsla::hsl(210.0, 70.0, 60.0));
        canvas.set_bar(3, 0.0, Hsla::hsl(216.0, 70.0, 50.0));

        let image = canvas.image();
        assert_ne!(image.get_pixel(10, 399).0, [0, 0, 0, 255]);
        assert_ne!(image.get_pixel(10, 201).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(10, 150).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(350, 399).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut canvas = RasterCanvas::new(1);
        canvas.clear_with_alpha([6, 6, 6], 1.0);
        canvas.save_png(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (400, 400));
        assert_eq!(loaded.get_pixel(0, 0).0, [6, 6, 6, 255]);
    }
}
