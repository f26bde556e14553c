//! Matched stereo view pairs.
//!
//! A [`BiView`] owns a left and a right [`View`] of the same scene: one
//! shared screen derived from pixel dimensions and display density, and two
//! eyes offset symmetrically along X by half the interocular separation.
//! Drawing calls fan out to both views unchanged; afterwards the two depth
//! buffers describe the same geometry from each eye, ready for
//! correspondence mapping.

use crate::math::{Vec2, Vec3};
use crate::screen::Screen;
use crate::view::View;

/// A left/right pair of views over one physical screen.
///
/// The screen sits on the XY plane, sized `pixels / dpi` in physical units,
/// with its origin at the top-left corner and the vertical basis flipped so
/// image row 0 is the top. Both eyes sit `eye_back` in front of the screen
/// (negative Z), `eye_sep` apart. Depths passed to [`BiView::flatten`] and
/// distances like `eye_back` share the same physical unit.
#[derive(Debug, Clone)]
pub struct BiView {
    left: View,
    right: View,
    dpi: f64,
    eye_back: f64,
    eye_sep: f64,
}

impl BiView {
    /// Display density assumed when none is given, in pixels per unit.
    pub const DEFAULT_DPI: f64 = 72.0;

    /// Creates a pair at the default display density.
    pub fn new(width: u32, height: u32, eye_back: f64, eye_sep: f64) -> Self {
        Self::with_dpi(width, height, eye_back, eye_sep, Self::DEFAULT_DPI)
    }

    /// Creates a pair with an explicit display density.
    ///
    /// # Arguments
    /// * `width`, `height` - Buffer dimensions in pixels
    /// * `eye_back` - Distance from the eyes to the screen plane
    /// * `eye_sep` - Interocular separation
    /// * `dpi` - Pixels per physical unit (must be non-zero)
    pub fn with_dpi(width: u32, height: u32, eye_back: f64, eye_sep: f64, dpi: f64) -> Self {
        let screen_width = width as f64 / dpi;
        let screen_height = height as f64 / dpi;

        // Top-left origin, row numbers growing downward.
        let screen = Screen::new(
            Vec3::new(-screen_width / 2.0, screen_height / 2.0, 0.0),
            Vec3::RIGHT * (1.0 / dpi),
            Vec3::DOWN * (1.0 / dpi),
        );

        let half_sep = eye_sep / 2.0;
        let left = View::new(width, height, screen, Vec3::new(-half_sep, 0.0, -eye_back));
        let right = View::new(width, height, screen, Vec3::new(half_sep, 0.0, -eye_back));

        Self {
            left,
            right,
            dpi,
            eye_back,
            eye_sep,
        }
    }

    pub fn left(&self) -> &View {
        &self.left
    }

    pub fn right(&self) -> &View {
        &self.right
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.left.width()
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.left.height()
    }

    /// Pixels per physical unit.
    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Physical screen width.
    pub fn screen_width(&self) -> f64 {
        self.width() as f64 / self.dpi
    }

    /// Physical screen height.
    pub fn screen_height(&self) -> f64 {
        self.height() as f64 / self.dpi
    }

    /// Distance from the eyes to the screen plane.
    pub fn eye_back(&self) -> f64 {
        self.eye_back
    }

    /// Interocular separation.
    pub fn eye_sep(&self) -> f64 {
        self.eye_sep
    }

    /// Half-width, at `depth` beyond the screen, of the region visible to
    /// both eyes through the screen window. The binding edge is the eye on
    /// the same side, so the separation narrows the overlap.
    ///
    /// Useful for bounding safe drawing regions; the drawing paths do not
    /// consult it.
    pub fn half_width(&self, depth: f64) -> f64 {
        let half_sep = self.eye_sep / 2.0;
        let half_screen = self.screen_width() / 2.0;
        half_sep + (half_screen - half_sep) * (self.eye_back + depth) / self.eye_back
    }

    /// Half-height of the region visible through the screen window at
    /// `depth` beyond it. Vertically the eyes coincide, so only the screen
    /// aperture matters.
    pub fn half_height(&self, depth: f64) -> f64 {
        self.screen_height() / 2.0 * (self.eye_back + depth) / self.eye_back
    }

    /// Flattens both views against the same background plane.
    pub fn flatten(&mut self, offset: f64) {
        self.left.flatten(offset);
        self.right.flatten(offset);
    }

    /// Draws a point into both views.
    pub fn draw_point(&mut self, p: Vec3) {
        self.left.draw_point(p);
        self.right.draw_point(p);
    }

    /// Draws a segment into both views.
    pub fn draw_line(&mut self, p1: Vec3, p2: Vec3) {
        self.left.draw_line(p1, p2);
        self.right.draw_line(p1, p2);
    }

    /// Draws a filled triangle into both views.
    pub fn draw_triangle(&mut self, p1: Vec3, p2: Vec3, p3: Vec3) {
        self.left.draw_triangle(p1, p2, p3);
        self.right.draw_triangle(p1, p2, p3);
    }

    /// Draws a filled parallelogram into both views.
    pub fn draw_pgram(&mut self, p: Vec3, e1: Vec3, e2: Vec3) {
        self.left.draw_pgram(p, e1, e2);
        self.right.draw_pgram(p, e1, e2);
    }

    /// Where the surface point at left-view pixel `im` appears from the
    /// right eye.
    pub fn left_pair(&self, im: Vec2) -> Vec2 {
        self.left.stereo_pair(self.right.eye(), im)
    }

    /// Where the surface point at right-view pixel `im` appears from the
    /// left eye.
    pub fn right_pair(&self, im: Vec2) -> Vec2 {
        self.right.stereo_pair(self.left.eye(), im)
    }
}
