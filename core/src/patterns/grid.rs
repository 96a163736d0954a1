//! Row-major walk over the pattern grid.

use super::Point2D;

/// First grid coordinate on both axes.
pub const GRID_START: f32 = 50.0;

/// Grid coordinates stay strictly below this value.
pub const GRID_END: f32 = 350.0;

/// Iterates `[50, 350) × [50, 350)` row by row at a fixed step.
///
/// Coordinates are `50 + i * step`, so long walks do not accumulate
/// rounding drift.
#[derive(Debug, Clone)]
pub struct GridWalk {
    step: f32,
    col: u32,
    row: u32,
}

impl GridWalk {
    /// # Panics
    ///
    /// Panics if `step` is not a positive finite number.
    pub fn new(step: f32) -> Self {
        assert!(step.is_finite() && step > 0.0, "grid step must be positive, got {step}");
        Self { step, col: 0, row: 0 }
    }

    /// Points per row (and rows per grid).
    pub fn side(&self) -> usize {
        ((GRID_END - GRID_START) / self.step).ceil() as usize
    }

    #[inline]
    fn coord(&self, index: u32) -> f32 {
        GRID_START + index as f32 * self.step
    }
}

impl Iterator for GridWalk {
    type Item = Point2D;

    fn next(&mut self) -> Option<Point2D> {
        let y = self.coord(self.row);
        if y >= GRID_END {
            return None;
        }

        let x = self.coord(self.col);
        if x >= GRID_END {
            self.col = 0;
            self.row += 1;
            return self.next();
        }

        self.col += 1;
        Some(Point2D::new(x, y))
    }
}
