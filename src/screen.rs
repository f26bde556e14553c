//! Oblique projection planes.
//!
//! A [`Screen`] is the affine plane `origin + u*e1 + v*e2`. The basis pair
//! does not need to be orthogonal or unit length, so the same type describes
//! a pixel grid (scaled, with a flipped vertical axis), a drawn triangle's
//! own plane, or a skewed section through a line. Projection solves a small
//! linear system per point instead of applying a fixed camera matrix, which
//! is what lets the plane be arbitrary.

use crate::math::{solve, Vec2, Vec3};

/// An affine plane spanned by two basis vectors.
///
/// Plane-local coordinates `(u, v)` name the world point
/// `origin + u*e1 + v*e2`. The basis must be linearly independent; a
/// degenerate basis makes [`Screen::project`] produce non-finite coordinates
/// rather than an error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Screen {
    pub origin: Vec3,
    pub e1: Vec3,
    pub e2: Vec3,
}

impl Screen {
    pub const fn new(origin: Vec3, e1: Vec3, e2: Vec3) -> Self {
        Self { origin, e1, e2 }
    }

    /// The plane through `p1`, `p2` and `p3`, with origin `p1` and basis
    /// `p2 - p1`, `p3 - p1`.
    pub fn three_points(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self::new(p1, p2 - p1, p3 - p1)
    }

    /// The plane containing the line `p1 -> p2`, oriented perpendicular to
    /// `normal`. This gives a zero-thickness segment a supporting plane that
    /// back-projection can intersect.
    pub fn line_normal(p1: Vec3, p2: Vec3, normal: Vec3) -> Self {
        let dir = p2 - p1;
        Self::new(p1, dir, dir.cross(normal))
    }

    /// Converts plane-local coordinates to the world point they name.
    pub fn to_real(&self, im: Vec2) -> Vec3 {
        self.origin + self.e1 * im.x + self.e2 * im.y
    }

    /// Projects `p` onto the plane as seen from `eye`.
    ///
    /// Finds `(u, v)` such that the ray from `eye` through `p` pierces the
    /// plane at `to_real((u, v))`, by solving the 3×3 system with columns
    /// `e1`, `e2`, `p - eye` and right-hand side `p - origin`. The third
    /// unknown, the ray parameter, is discarded.
    ///
    /// Degenerate input (`p == eye`, or a dependent basis) makes the system
    /// singular and the result non-finite.
    pub fn project(&self, eye: Vec3, p: Vec3) -> Vec2 {
        let ray = p - eye;
        let rhs = p - self.origin;

        let mut aug = [0.0; 12];
        for i in 0..3 {
            aug[i * 4] = self.e1[i];
            aug[i * 4 + 1] = self.e2[i];
            aug[i * 4 + 2] = ray[i];
            aug[i * 4 + 3] = rhs[i];
        }
        let mut sol = [0.0; 3];
        solve(&mut aug, &mut sol);

        Vec2::new(sol[0], sol[1])
    }

    /// Recovers the world point a pixel of this screen shows, given the
    /// plane that point lies on.
    ///
    /// `im` is converted to a world point on this screen, re-projected onto
    /// `remote` from `eye`, and the result returned as a 3D point on
    /// `remote`'s plane.
    pub fn project_back(&self, remote: &Screen, eye: Vec3, im: Vec2) -> Vec3 {
        let far_im = remote.project(eye, self.to_real(im));
        remote.to_real(far_im)
    }
}

/// The unit XY plane: origin at zero, `e1` along X, `e2` along Y.
impl Default for Screen {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::RIGHT, Vec3::UP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn skewed() -> Screen {
        Screen::new(
            Vec3::new(1.0, 0.0, 2.0),
            Vec3::new(1.0, 0.3, 0.0),
            Vec3::new(0.2, 1.0, 0.1),
        )
    }

    #[test]
    fn to_real_walks_the_basis() {
        let screen = skewed();
        assert_relative_eq!(screen.to_real(Vec2::ZERO), screen.origin);
        assert_relative_eq!(screen.to_real(Vec2::new(1.0, 0.0)), screen.origin + screen.e1);
        assert_relative_eq!(
            screen.to_real(Vec2::new(2.0, 3.0)),
            screen.origin + screen.e1 * 2.0 + screen.e2 * 3.0
        );
    }

    #[test]
    fn project_recovers_known_intersection() {
        // Ray from (0,0,-10) through (2,1,10) crosses the XY plane halfway,
        // at (1, 0.5, 0).
        let screen = Screen::default();
        let im = screen.project(Vec3::new(0.0, 0.0, -10.0), Vec3::new(2.0, 1.0, 10.0));
        assert_relative_eq!(im, Vec2::new(1.0, 0.5), epsilon = 1e-12);
    }

    #[test]
    fn projection_lands_on_the_sight_line() {
        let screen = skewed();
        let eye = Vec3::new(0.0, 0.0, -5.0);
        let p = Vec3::new(0.7, 0.4, 3.0);

        let on_plane = screen.to_real(screen.project(eye, p));
        let parallel = (on_plane - eye).cross(p - eye);
        assert_abs_diff_eq!(parallel, Vec3::ZERO, epsilon = 1e-9);
    }

    #[test]
    fn project_back_hits_the_remote_plane() {
        let screen = Screen::default();
        let eye = Vec3::new(0.0, 0.0, -10.0);
        let plane = Screen::three_points(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(4.0, 0.0, 5.0),
            Vec3::new(0.0, 4.0, 5.0),
        );

        // The ray through pixel (1, 0.5) reaches z = 5 at (1.5, 0.75, 5).
        let real = screen.project_back(&plane, eye, Vec2::new(1.0, 0.5));
        assert_relative_eq!(real, Vec3::new(1.5, 0.75, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn three_points_spans_the_triangle() {
        let (p1, p2, p3) = (
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(4.0, 1.0, 2.0),
            Vec3::new(1.0, 5.0, -1.0),
        );
        let plane = Screen::three_points(p1, p2, p3);
        assert_relative_eq!(plane.to_real(Vec2::ZERO), p1);
        assert_relative_eq!(plane.to_real(Vec2::new(1.0, 0.0)), p2);
        assert_relative_eq!(plane.to_real(Vec2::new(0.0, 1.0)), p3);
    }

    #[test]
    fn line_normal_basis_is_perpendicular_to_the_normal() {
        let p1 = Vec3::new(0.0, 0.0, 1.0);
        let p2 = Vec3::new(2.0, 1.0, 1.0);
        let normal = Vec3::new(0.3, -0.2, 1.0);

        let plane = Screen::line_normal(p1, p2, normal);
        assert_relative_eq!(plane.e1, p2 - p1);
        assert_abs_diff_eq!(plane.e2.dot(normal), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(plane.e2.dot(plane.e1), 0.0, epsilon = 1e-12);
    }
}
