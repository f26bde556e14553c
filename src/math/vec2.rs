use std::fmt;
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};

/// A 2D vector, used for image-plane coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Self) -> f64 {
        (*self - other).magnitude()
    }

    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

/// Component-wise addition of two vectors.
impl Add<Vec2> for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// Component-wise subtraction of two vectors.
impl Sub<Vec2> for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// Scalar multiplication of a vector.
impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// Scalar multiplication with the scalar on the left.
impl Mul<Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Self::Output {
        rhs * self
    }
}

/// Scalar division of a vector.
impl Div<f64> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}

/// Negation of a vector.
impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

/// Component access by index (0 = x, 1 = y).
impl Index<usize> for Vec2 {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vec2 index out of bounds: {}", i),
        }
    }
}

impl IndexMut<usize> for Vec2 {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Vec2 index out of bounds: {}", i),
        }
    }
}

/// Formats the vector as `(x, y)`.
impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl AbsDiffEq for Vec2 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self.x, &other.x, epsilon) && f64::abs_diff_eq(&self.y, &other.y, epsilon)
    }
}

impl RelativeEq for Vec2 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        f64::relative_eq(&self.x, &other.x, epsilon, max_relative)
            && f64::relative_eq(&self.y, &other.y, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_is_symmetric() {
        let a = Vec2::new(1.5, -2.0);
        let b = Vec2::new(-0.5, 4.0);
        assert_relative_eq!(a.distance(b), b.distance(a));
    }

    #[test]
    fn magnitude_of_difference_equals_distance() {
        let a = Vec2::new(3.0, 7.0);
        let b = Vec2::new(-1.0, 4.0);
        assert_relative_eq!((a - b).magnitude(), a.distance(b));
        assert_relative_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn dot_is_commutative() {
        let a = Vec2::new(2.0, -3.0);
        let b = Vec2::new(0.5, 8.0);
        assert_relative_eq!(a.dot(b), b.dot(a));
    }

    #[test]
    fn scalar_multiplication_commutes() {
        let v = Vec2::new(1.0, -4.0);
        assert_eq!(v * 2.5, 2.5 * v);
    }

    #[test]
    fn index_reads_and_writes_components() {
        let mut v = Vec2::new(1.0, 2.0);
        assert_eq!(v[0], 1.0);
        v[1] = 9.0;
        assert_eq!(v.y, 9.0);
    }

    #[test]
    fn displays_as_tuple() {
        assert_eq!(format!("{}", Vec2::new(1.0, 2.5)), "(1, 2.5)");
    }
}
