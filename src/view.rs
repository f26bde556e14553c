//! Depth-buffered views of 3D geometry.
//!
//! A [`View`] pairs a [`Screen`] with an eye position and a per-pixel depth
//! buffer. Drawing operations project world geometry through the screen and
//! keep, at every pixel, the distance of the nearest surface seen so far,
//! measured from the eye along that pixel's own projection ray. Two views of
//! the same scene therefore store directly comparable depths, which is what
//! the stereo correspondence layer builds on.
//!
//! Filled primitives recover true per-pixel depth by back-projection: each
//! covered pixel is cast back through the primitive's own supporting plane,
//! so depth varies correctly across a tilted surface instead of being
//! interpolated in image space.

use crate::math::{Vec2, Vec3};
use crate::screen::Screen;

/// A depth buffer with the projection geometry that fills it.
///
/// # Depth buffer
///
/// Every cell stores the eye distance of the nearest surface drawn so far at
/// that pixel; smaller is nearer. A fresh buffer is all zeros, and zero reads
/// as "a surface infinitely near the eye", so nearest-wins draws cannot land
/// until [`View::flatten`] or [`View::set`] establishes a background.
///
/// Out-of-range reads return 0.0 and out-of-range writes are silent no-ops;
/// the rasterization paths intentionally probe past exact bounds.
#[derive(Debug, Clone)]
pub struct View {
    width: u32,
    height: u32,
    screen: Screen,
    eye: Vec3,
    buffer: Vec<f64>,
    // Scanline scratch: per-column row span of the polygon being filled.
    min_y: Vec<i32>,
    max_y: Vec<i32>,
}

impl View {
    pub fn new(width: u32, height: u32, screen: Screen, eye: Vec3) -> Self {
        Self {
            width,
            height,
            screen,
            eye,
            buffer: vec![0.0; (width * height) as usize],
            min_y: vec![0; width as usize],
            max_y: vec![0; width as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Reads the depth at `(x, y)`, or 0.0 when out of range.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> f64 {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[(y as u32 * self.width + x as u32) as usize]
        } else {
            0.0
        }
    }

    /// Reads the depth at a truncated image coordinate.
    #[inline]
    pub fn get_at(&self, p: Vec2) -> f64 {
        self.get(p.x as i32, p.y as i32)
    }

    /// Writes `depth` at `(x, y)` only if it is nearer than the stored value.
    /// Silently ignores out-of-range coordinates.
    #[inline]
    pub fn draw(&mut self, x: i32, y: i32, depth: f64) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let idx = (y as u32 * self.width + x as u32) as usize;
            // Depth test: smaller distance means nearer to the eye.
            if depth < self.buffer[idx] {
                self.buffer[idx] = depth;
            }
        }
    }

    /// Nearest-wins write at a truncated image coordinate.
    #[inline]
    pub fn draw_at(&mut self, p: Vec2, depth: f64) {
        self.draw(p.x as i32, p.y as i32, depth);
    }

    /// Overwrites the depth at `(x, y)` unconditionally.
    /// Silently ignores out-of-range coordinates.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, depth: f64) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[(y as u32 * self.width + x as u32) as usize] = depth;
        }
    }

    /// Fills the whole buffer with a background plane parallel to the screen,
    /// `offset` beyond it along the screen normal.
    ///
    /// The stored value is not a constant: each cell gets the true distance
    /// from the eye to the plane along that pixel's own diverging ray, so the
    /// background composites consistently with later draws.
    pub fn flatten(&mut self, offset: f64) {
        let normal = self.screen.e1.cross(self.screen.e2).normalize();
        let closest = normal.dot(self.screen.origin - self.eye).abs();

        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let real = self.screen.to_real(Vec2::new(x as f64, y as f64));
                let depth = real.distance(self.eye) / closest * (closest + offset);
                self.buffer[(y as u32 * self.width + x as u32) as usize] = depth;
            }
        }
    }

    /// Projects `p` to a pixel and draws its eye distance.
    pub fn draw_point(&mut self, p: Vec3) {
        let im = self.screen.project(self.eye, p);
        self.draw_at(im, p.distance(self.eye));
    }

    /// Draws the segment from `p1` to `p2` with per-sample depth.
    ///
    /// The segment's supporting plane comes from [`Screen::line_normal`] with
    /// `p1 - eye` as the auxiliary normal. Samples interpolate the projected
    /// endpoints one per pixel of image-space length, and each sample is
    /// back-projected through that plane for its true depth. A segment whose
    /// projection is shorter than half a pixel gets a single sample.
    pub fn draw_line(&mut self, p1: Vec3, p2: Vec3) {
        let remote = Screen::line_normal(p1, p2, p1 - self.eye);

        let im1 = self.screen.project(self.eye, p1);
        let im2 = self.screen.project(self.eye, p2);

        // A degenerate projection has no finite pixel length to walk.
        let span = im1.distance(im2);
        if !span.is_finite() {
            return;
        }
        let len = span.round() as i32;

        for i in 0..=len {
            let t = if len == 0 { 0.0 } else { i as f64 / len as f64 };
            let scan = im1 * t + im2 * (1.0 - t);

            let back = self.screen.project_back(&remote, self.eye, scan);
            self.draw_at(scan, self.eye.distance(back));
        }
    }

    /// Draws a filled triangle with per-pixel depth.
    ///
    /// The fill keeps one running `[min_y, max_y]` span per buffer column:
    ///
    /// ```text
    ///        . p2
    ///       /|          for every column the projected edges touch,
    ///      / |          add_line records the lowest and highest row hit;
    ///  p1 .--' p3       end_fill then walks each column's span and
    ///     |  |          back-projects every pixel through the triangle's
    ///   min  max        own plane for its true eye distance.
    /// ```
    ///
    /// The column range is the projected vertices' horizontal bounding range
    /// clamped to the buffer, so off-screen geometry costs nothing.
    pub fn draw_triangle(&mut self, p1: Vec3, p2: Vec3, p3: Vec3) {
        let remote = Screen::three_points(p1, p2, p3);

        let im1 = self.screen.project(self.eye, p1);
        let im2 = self.screen.project(self.eye, p2);
        let im3 = self.screen.project(self.eye, p3);

        let min_x = (im1.x as i32).min(im2.x as i32).min(im3.x as i32).max(0);
        let max_x = (im1.x as i32)
            .max(im2.x as i32)
            .max(im3.x as i32)
            .min(self.width as i32 - 1);

        self.start_fill(min_x, max_x);
        self.add_line(im1, im2);
        self.add_line(im2, im3);
        self.add_line(im3, im1);
        self.end_fill(&remote, min_x, max_x);
    }

    /// Draws the parallelogram with corner `p` and edge vectors `e1`, `e2`
    /// as two triangles; the shared diagonal resolves through nearest-wins.
    pub fn draw_pgram(&mut self, p: Vec3, e1: Vec3, e2: Vec3) {
        self.draw_triangle(p, p + e1, p + e2);
        self.draw_triangle(p + e1 + e2, p + e1, p + e2);
    }

    /// Maps a pixel of this view to the image coordinate where the same
    /// surface point appears from `other_eye`.
    ///
    /// The stored depth walks the pixel's sight line back out to the 3D
    /// surface point, which is then projected through this view's screen
    /// using the other eye as the projection center.
    pub fn stereo_pair(&self, other_eye: Vec3, im: Vec2) -> Vec2 {
        let real = self.screen.to_real(im);
        let depth = self.get_at(im);

        let leg = real - self.eye;
        let far = self.eye + leg * (depth / leg.magnitude());

        self.screen.project(other_eye, far)
    }

    /// Resets the span table for every column in the fill range. A column
    /// whose sentinel span survives the edge pass is empty.
    fn start_fill(&mut self, min_x: i32, max_x: i32) {
        for x in min_x..=max_x {
            self.min_y[x as usize] = self.height as i32;
            self.max_y[x as usize] = 0;
        }
    }

    /// Folds one projected edge into the per-column spans. Edges with no
    /// horizontal extent contribute no columns and are skipped.
    fn add_line(&mut self, im1: Vec2, im2: Vec2) {
        if (im1.x - im2.x) as i32 == 0 {
            return;
        }
        let (left, right) = if im1.x < im2.x { (im1, im2) } else { (im2, im1) };
        let slope = (right.y - left.y) / (right.x - left.x);

        let first = (left.x as i32).max(0);
        let last = (right.x as i32).min(self.width as i32 - 1);
        for x in first..=last {
            let y = (left.y + (x as f64 - left.x) * slope) as i32;
            // The bottom clamp is one past the last row; draw() rejects that
            // row, so a column covered only below the buffer stays empty.
            let y = y.max(0).min(self.height as i32);

            let col = x as usize;
            if y < self.min_y[col] {
                self.min_y[col] = y;
            }
            if y > self.max_y[col] {
                self.max_y[col] = y;
            }
        }
    }

    /// Walks every accumulated span and draws each pixel with the depth of
    /// its back-projection through `remote`, the primitive's own plane.
    fn end_fill(&mut self, remote: &Screen, min_x: i32, max_x: i32) {
        for x in min_x..=max_x {
            for y in self.min_y[x as usize]..=self.max_y[x as usize] {
                let back = self
                    .screen
                    .project_back(remote, self.eye, Vec2::new(x as f64, y as f64));
                let depth = self.eye.distance(back);
                self.draw(x, y, depth);
            }
        }
    }
}
