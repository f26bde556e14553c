//! Gaussian elimination for small dense linear systems.
//!
//! The projection code solves one 3×3 system per projected point, so the
//! routine works on caller-owned flat slices and never allocates.

/// Solves `A·x = b` by Gaussian elimination with partial pivoting.
///
/// `aug` is the augmented matrix `[A | b]` in row-major order, `n` rows by
/// `n + 1` columns, where `n` is the length of `sol`. The matrix is consumed
/// as scratch space: on return it holds the echelon form, and `sol` holds the
/// solution vector.
///
/// The caller guarantees a well-posed system. Singularity is not detected; a
/// zero pivot divides through and the non-finite values propagate into `sol`
/// per IEEE 754.
///
/// # Example
/// ```
/// use magiceye::math::solve;
///
/// // 2x + y = 5, x + 3y = 5
/// let mut aug = [2.0, 1.0, 5.0, 1.0, 3.0, 5.0];
/// let mut sol = [0.0; 2];
/// solve(&mut aug, &mut sol);
/// assert_eq!(sol, [2.0, 1.0]);
/// ```
pub fn solve(aug: &mut [f64], sol: &mut [f64]) {
    let n = sol.len();
    let cols = n + 1;
    debug_assert_eq!(
        aug.len(),
        n * cols,
        "Augmented matrix size doesn't match solution length"
    );

    // Forward elimination. Rows below the pivot keep stale entries in the
    // pivot column; back substitution never reads them.
    for i in 0..n.saturating_sub(1) {
        let mut best = i;
        for k in (i + 1)..n {
            if aug[k * cols + i].abs() > aug[best * cols + i].abs() {
                best = k;
            }
        }
        if best != i {
            for j in i..cols {
                aug.swap(i * cols + j, best * cols + j);
            }
        }
        for k in (i + 1)..n {
            let factor = -aug[k * cols + i] / aug[i * cols + i];
            for j in (i + 1)..cols {
                aug[k * cols + j] += factor * aug[i * cols + j];
            }
        }
    }

    // Back substitution, last row first.
    for i in (0..n).rev() {
        let mut sum = aug[i * cols + n];
        for k in (i + 1)..n {
            sum -= aug[i * cols + k] * sol[k];
        }
        sol[i] = sum / aug[i * cols + i];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn solves_identity_system() {
        let mut aug = [
            1.0, 0.0, 0.0, 4.0, //
            0.0, 1.0, 0.0, -2.0, //
            0.0, 0.0, 1.0, 7.5,
        ];
        let mut sol = [0.0; 3];
        solve(&mut aug, &mut sol);
        assert_relative_eq!(sol[0], 4.0);
        assert_relative_eq!(sol[1], -2.0);
        assert_relative_eq!(sol[2], 7.5);
    }

    #[test]
    fn solves_dense_three_by_three() {
        // 2x + y - z = 8, -3x - y + 2z = -11, -2x + y + 2z = -3
        let mut aug = [
            2.0, 1.0, -1.0, 8.0, //
            -3.0, -1.0, 2.0, -11.0, //
            -2.0, 1.0, 2.0, -3.0,
        ];
        let mut sol = [0.0; 3];
        solve(&mut aug, &mut sol);
        assert_relative_eq!(sol[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(sol[1], 3.0, epsilon = 1e-12);
        assert_relative_eq!(sol[2], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn pivots_around_zero_diagonal() {
        // The first diagonal entry is zero, so the rows must be reordered
        // before elimination can divide by the pivot.
        let mut aug = [
            0.0, 2.0, 1.0, 5.0, //
            4.0, 0.0, 1.0, 11.0, //
            1.0, 1.0, 0.0, 3.0,
        ];
        let mut sol = [0.0; 3];
        solve(&mut aug, &mut sol);
        assert_relative_eq!(sol[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(sol[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(sol[2], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn solves_two_by_two() {
        // 3x + 2y = 12, x - y = -1
        let mut aug = [
            3.0, 2.0, 12.0, //
            1.0, -1.0, -1.0,
        ];
        let mut sol = [0.0; 2];
        solve(&mut aug, &mut sol);
        assert_relative_eq!(sol[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(sol[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn singular_system_yields_non_finite_values() {
        // Two identical rows: no unique solution, and no error either. The
        // division by the vanished pivot must surface as inf or NaN.
        let mut aug = [
            1.0, 2.0, 3.0, 4.0, //
            1.0, 2.0, 3.0, 4.0, //
            0.0, 0.0, 1.0, 1.0,
        ];
        let mut sol = [0.0; 3];
        solve(&mut aug, &mut sol);
        assert!(sol.iter().any(|v| !v.is_finite()));
    }
}
