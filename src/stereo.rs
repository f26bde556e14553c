//! Pixel correspondence maps between a stereo pair.
//!
//! A [`StereoBlank`] precomputes, for every pixel of each view, the column
//! where the same surface point appears in the other view. Pattern
//! generators consume these maps to decide which pixels must share a color.
//!
//! The two buffers are written crosswise: scanning the *left* view fills the
//! buffer answering "where does this land in the *right* image", which is
//! the one [`StereoBlank::get_right`] reads, and vice versa. Checked lookups
//! reject a correspondence whose own counterpart does not map back to the
//! starting column, which is what happens along occlusion boundaries where
//! the two eyes see different surfaces.

use crate::biview::BiView;
use crate::math::{Vec2, Vec3};
use crate::view::View;

// Height of an equilateral-triangle row relative to its base period,
// sqrt(3)/6.
const ROW_RATIO: f64 = 0.288_675_134_594_812_87;

/// Precomputed stereo correspondences for a view pair.
///
/// Buffer values are either a pixel column in `[0, width)` or
/// [`StereoBlank::NO_PAIR`].
#[derive(Debug, Clone)]
pub struct StereoBlank {
    width: u32,
    height: u32,
    left_pairs: Vec<i32>,
    right_pairs: Vec<i32>,
}

impl StereoBlank {
    /// Sentinel stored where a pixel has no usable counterpart.
    pub const NO_PAIR: i32 = -1;

    /// Round-trip drift, in pixels, beyond which a checked lookup rejects
    /// the correspondence.
    const TOLERANCE: i32 = 2;

    /// Creates an empty map with every pair set to [`StereoBlank::NO_PAIR`].
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width * height) as usize;
        Self {
            width,
            height,
            left_pairs: vec![Self::NO_PAIR; len],
            right_pairs: vec![Self::NO_PAIR; len],
        }
    }

    /// Builds both directions from two completed views of the same scene.
    pub fn from_views(left: &View, right: &View) -> Self {
        let mut blank = Self::new(left.width(), left.height());
        blank.set_left(left, right.eye());
        blank.set_right(right, left.eye());
        blank
    }

    /// Builds both directions from a completed [`BiView`].
    pub fn from_biview(views: &BiView) -> Self {
        Self::from_views(views.left(), views.right())
    }

    /// Builds only the right-to-left direction, readable through
    /// [`StereoBlank::get_left`] and [`StereoBlank::force_left`]. The other
    /// buffer stays empty; populating it is the caller's job.
    pub fn from_right_view(right: &View, left_eye: Vec3) -> Self {
        let mut blank = Self::new(right.width(), right.height());
        blank.set_right(right, left_eye);
        blank
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Scans every pixel of the left view, asking where its surface point
    /// appears from `right_eye`, and stores the resulting columns in the
    /// buffer read by [`StereoBlank::get_right`].
    pub fn set_left(&mut self, left: &View, right_eye: Vec3) {
        debug_assert_eq!(
            (left.width(), left.height()),
            (self.width, self.height),
            "View dimensions don't match the pair buffers"
        );
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let pair = left.stereo_pair(right_eye, Vec2::new(x as f64, y as f64));
                self.right_pairs[(y as u32 * self.width + x as u32) as usize] =
                    self.pair_column(pair.x);
            }
        }
    }

    /// Mirror of [`StereoBlank::set_left`]: scans the right view and fills
    /// the buffer read by [`StereoBlank::get_left`].
    pub fn set_right(&mut self, right: &View, left_eye: Vec3) {
        debug_assert_eq!(
            (right.width(), right.height()),
            (self.width, self.height),
            "View dimensions don't match the pair buffers"
        );
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let pair = right.stereo_pair(left_eye, Vec2::new(x as f64, y as f64));
                self.left_pairs[(y as u32 * self.width + x as u32) as usize] =
                    self.pair_column(pair.x);
            }
        }
    }

    // Stored values are either a valid column or NO_PAIR, never out of
    // range, so lookups can index the opposite buffer without re-checking.
    fn pair_column(&self, x: f64) -> i32 {
        let x = x as i32;
        if x >= 0 && x < self.width as i32 {
            x
        } else {
            Self::NO_PAIR
        }
    }

    /// Right-view column paired with left-view pixel `(x, y)`, or
    /// [`StereoBlank::NO_PAIR`] when there is none or the counterpart fails
    /// to map back to within 2 pixels of `x` (an occlusion boundary).
    pub fn get_right(&self, x: i32, y: i32) -> i32 {
        let pair = self.force_right(x, y);
        if pair == Self::NO_PAIR {
            return Self::NO_PAIR;
        }
        let back = self.left_pairs[(y as u32 * self.width + pair as u32) as usize];
        if (back - x).abs() > Self::TOLERANCE {
            return Self::NO_PAIR;
        }
        pair
    }

    /// Left-view column paired with right-view pixel `(x, y)`, with the same
    /// round-trip check as [`StereoBlank::get_right`].
    pub fn get_left(&self, x: i32, y: i32) -> i32 {
        let pair = self.force_left(x, y);
        if pair == Self::NO_PAIR {
            return Self::NO_PAIR;
        }
        let back = self.right_pairs[(y as u32 * self.width + pair as u32) as usize];
        if (back - x).abs() > Self::TOLERANCE {
            return Self::NO_PAIR;
        }
        pair
    }

    /// Stored right-view column without the round-trip check.
    pub fn force_right(&self, x: i32, y: i32) -> i32 {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.right_pairs[(y as u32 * self.width + x as u32) as usize]
        } else {
            Self::NO_PAIR
        }
    }

    /// Stored left-view column without the round-trip check.
    pub fn force_left(&self, x: i32, y: i32) -> i32 {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.left_pairs[(y as u32 * self.width + x as u32) as usize]
        } else {
            Self::NO_PAIR
        }
    }

    /// Derives a sampling lattice whose columns track the measured
    /// disparity.
    ///
    /// The horizontal period is the background disparity at the top-left
    /// pixel divided by `rep`, the row gap is that period scaled down to an
    /// equilateral-triangle lattice, and odd rows shift right by half a
    /// period (a brick pattern). Walking a row, each next sample follows the
    /// checked correspondence at the current sample when one exists and
    /// advances by the fixed period otherwise, so the lattice contracts over
    /// raised surfaces where the disparity shrinks.
    ///
    /// Degenerate periods and gaps clamp to one pixel.
    pub fn isometric_grid(&self, rep: i32) -> IsometricGrid {
        let rep = rep.max(1);
        let xgap = (self.force_right(0, 0) / rep).max(1);
        let vgap = ((xgap as f64 * ROW_RATIO).round() as i32).max(1);

        let rows = self.height as i32 / vgap + 1;
        let cols = self.width as i32 / xgap + 1;

        let mut xs = Vec::with_capacity((rows * cols) as usize);
        for row in 0..rows {
            let y = row * vgap;
            let mut x = if row % 2 == 1 { xgap / 2 } else { 0 };
            for _ in 0..cols {
                xs.push(x);
                let pair = self.get_right(x, y);
                x = if pair != Self::NO_PAIR { pair } else { x + xgap };
            }
        }

        IsometricGrid {
            rows: rows as u32,
            cols: cols as u32,
            vgap,
            xs,
        }
    }
}

/// A brick-pattern lattice of sample columns, one row of X positions per
/// `vgap` pixel rows. Produced by [`StereoBlank::isometric_grid`].
#[derive(Debug, Clone)]
pub struct IsometricGrid {
    rows: u32,
    cols: u32,
    vgap: i32,
    xs: Vec<i32>,
}

impl IsometricGrid {
    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Pixel rows between adjacent lattice rows.
    pub fn vgap(&self) -> i32 {
        self.vgap
    }

    /// Pixel row sampled by lattice row `row`.
    pub fn y(&self, row: u32) -> i32 {
        row as i32 * self.vgap
    }

    /// Sample column `col` of lattice row `row`.
    pub fn x(&self, row: u32, col: u32) -> i32 {
        self.xs[(row * self.cols + col) as usize]
    }

    /// All sample columns of lattice row `row`.
    pub fn row(&self, row: u32) -> &[i32] {
        let start = (row * self.cols) as usize;
        &self.xs[start..start + self.cols as usize]
    }
}
