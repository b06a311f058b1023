//! Thomas algorithm for tridiagonal systems.
//!
//! The solve is split in two so that the O(N) decomposition of the matrix,
//! which does not depend on the right-hand side, is paid once and then
//! reused for every line of an axis pass.

use crate::types::TridiagonalError;

/// LU decomposition of a tridiagonal matrix.
///
/// For a system of size `N` with main diagonal `a`, sub-diagonal `b` and
/// super-diagonal `c`:
///
/// ```text
/// m[0]   = a[0]
/// l[i]   = b[i] / m[i]
/// m[i+1] = a[i+1] - l[i] * c[i]
/// r[i]   = c[i]
/// ```
///
/// The decomposition is immutable, so one instance can serve concurrent
/// solves for different right-hand sides.
///
/// # Examples
///
/// ```
/// use diffusion_core::math::tridiagonal::TridiagonalSystem;
///
/// // [ 2 -1  0 ]       [1]
/// // [-1  2 -1 ] y  =  [0]
/// // [ 0 -1  2 ]       [1]
/// let system = TridiagonalSystem::decompose(&[2.0, 2.0, 2.0], &[-1.0, -1.0], &[-1.0, -1.0]).unwrap();
/// let y = system.solve(&[1.0, 0.0, 1.0]);
///
/// for yi in y {
///     assert!((yi - 1.0).abs() < 1e-12);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSystem {
    /// Lower multipliers `l[0..N-1]`
    lower: Vec<f64>,
    /// Pivots `m[0..N]`
    pivots: Vec<f64>,
    /// Upper coefficients `r[0..N-1]`, equal to the super-diagonal
    upper: Vec<f64>,
}

impl TridiagonalSystem {
    /// Decomposes the matrix given by its three diagonals.
    ///
    /// # Arguments
    ///
    /// * `main` - Main diagonal, length `N >= 1`
    /// * `sub` - Sub-diagonal, length `N - 1` (`sub[i]` sits at row `i + 1`)
    /// * `sup` - Super-diagonal, length `N - 1` (`sup[i]` sits at row `i`)
    ///
    /// # Errors
    ///
    /// * `TridiagonalError::EmptySystem` - `main` is empty
    /// * `TridiagonalError::LengthMismatch` - an off-diagonal is not `N - 1` long
    /// * `TridiagonalError::ZeroPivot` - a pivot is exactly zero
    /// * `TridiagonalError::NonFinitePivot` - a pivot is NaN or infinite
    pub fn decompose(main: &[f64], sub: &[f64], sup: &[f64]) -> Result<Self, TridiagonalError> {
        let n = main.len();
        if n == 0 {
            return Err(TridiagonalError::EmptySystem);
        }
        for (diagonal, got) in [("sub", sub.len()), ("super", sup.len())] {
            if got != n - 1 {
                return Err(TridiagonalError::LengthMismatch {
                    diagonal,
                    expected: n - 1,
                    got,
                });
            }
        }

        let mut lower = Vec::with_capacity(n - 1);
        let mut pivots = Vec::with_capacity(n);

        pivots.push(check_pivot(0, main[0])?);
        for i in 0..n - 1 {
            let l = sub[i] / pivots[i];
            lower.push(l);
            pivots.push(check_pivot(i + 1, main[i + 1] - l * sup[i])?);
        }

        Ok(Self {
            lower,
            pivots,
            upper: sup.to_vec(),
        })
    }

    /// Returns the system size `N`.
    #[inline]
    pub fn len(&self) -> usize {
        self.pivots.len()
    }

    /// Always `false`: decomposition rejects empty systems.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pivots.is_empty()
    }

    /// Returns the lower multipliers `l`.
    #[inline]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Returns the pivots `m`.
    #[inline]
    pub fn pivots(&self) -> &[f64] {
        &self.pivots
    }

    /// Returns the upper coefficients `r`.
    #[inline]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Solves `A y = x` in place, overwriting `x` with `y`.
    ///
    /// Forward substitution stores the intermediate `yy` in `x`; back
    /// substitution then replaces it from the last row upward, so no
    /// scratch buffer is needed.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != self.len()`.
    pub fn solve_in_place(&self, x: &mut [f64]) {
        let n = self.len();
        assert_eq!(x.len(), n, "right-hand side length must equal system size");

        // forward
        for i in 1..n {
            x[i] -= self.lower[i - 1] * x[i - 1];
        }

        // backward
        x[n - 1] /= self.pivots[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = (x[i] - self.upper[i] * x[i + 1]) / self.pivots[i];
        }
    }

    /// Solves `A y = d`, writing the solution into `y`.
    ///
    /// # Panics
    ///
    /// Panics if `d` or `y` does not have length `self.len()`.
    #[inline]
    pub fn solve_into(&self, d: &[f64], y: &mut [f64]) {
        assert_eq!(d.len(), self.len(), "right-hand side length must equal system size");
        y.copy_from_slice(d);
        self.solve_in_place(y);
    }

    /// Solves `A y = d`, returning `y`.
    ///
    /// # Panics
    ///
    /// Panics if `d.len() != self.len()`.
    pub fn solve(&self, d: &[f64]) -> Vec<f64> {
        let mut y = d.to_vec();
        self.solve_in_place(&mut y);
        y
    }
}

#[inline]
fn check_pivot(index: usize, value: f64) -> Result<f64, TridiagonalError> {
    if value == 0.0 {
        Err(TridiagonalError::ZeroPivot { index })
    } else if !value.is_finite() {
        Err(TridiagonalError::NonFinitePivot { index, value })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Computes `A y` from the given diagonals.
    fn multiply(main: &[f64], sub: &[f64], sup: &[f64], y: &[f64]) -> Vec<f64> {
        let n = main.len();
        (0..n)
            .map(|i| {
                let mut acc = main[i] * y[i];
                if i > 0 {
                    acc += sub[i - 1] * y[i - 1];
                }
                if i + 1 < n {
                    acc += sup[i] * y[i + 1];
                }
                acc
            })
            .collect()
    }

    #[test]
    fn test_decompose_single_element() {
        let system = TridiagonalSystem::decompose(&[3.0], &[], &[]).unwrap();
        assert_eq!(system.len(), 1);
        assert!(system.lower().is_empty());
        assert_eq!(system.solve(&[6.0]), vec![2.0]);
    }

    #[test]
    fn test_decompose_values() {
        let main = [4.0, 5.0, 6.0];
        let sub = [1.0, 2.0];
        let sup = [3.0, 1.0];
        let system = TridiagonalSystem::decompose(&main, &sub, &sup).unwrap();

        assert_relative_eq!(system.pivots()[0], 4.0);
        assert_relative_eq!(system.lower()[0], 0.25);
        assert_relative_eq!(system.pivots()[1], 5.0 - 0.25 * 3.0);
        assert_relative_eq!(system.lower()[1], 2.0 / 4.25);
        assert_relative_eq!(system.pivots()[2], 6.0 - (2.0 / 4.25) * 1.0);
        assert_eq!(system.upper(), &sup);
    }

    #[test]
    fn test_solve_residual() {
        let main = [4.0, 4.0, 4.0, 4.0, 4.0];
        let sub = [1.0, -1.0, 0.5, 2.0];
        let sup = [-2.0, 1.0, 1.5, 0.25];
        let d = [1.0, -2.0, 3.0, 0.5, 7.0];

        let system = TridiagonalSystem::decompose(&main, &sub, &sup).unwrap();
        let y = system.solve(&d);
        let ad = multiply(&main, &sub, &sup, &y);

        for (lhs, rhs) in ad.iter().zip(d.iter()) {
            assert_relative_eq!(*lhs, *rhs, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_solve_variants_agree() {
        let system =
            TridiagonalSystem::decompose(&[5.0, 5.0, 5.0, 5.0], &[-1.0; 3], &[-2.0; 3]).unwrap();
        let d = [1.0, 2.0, 3.0, 4.0];

        let allocated = system.solve(&d);

        let mut into = [0.0; 4];
        system.solve_into(&d, &mut into);

        let mut in_place = d;
        system.solve_in_place(&mut in_place);

        assert_eq!(allocated.as_slice(), &into);
        assert_eq!(allocated.as_slice(), &in_place);
    }

    #[test]
    fn test_empty_system() {
        assert_eq!(
            TridiagonalSystem::decompose(&[], &[], &[]),
            Err(TridiagonalError::EmptySystem)
        );
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            TridiagonalSystem::decompose(&[1.0, 1.0, 1.0], &[0.0], &[0.0, 0.0]),
            Err(TridiagonalError::LengthMismatch {
                diagonal: "sub",
                expected: 2,
                got: 1
            })
        );
        assert_eq!(
            TridiagonalSystem::decompose(&[1.0, 1.0], &[0.0], &[]),
            Err(TridiagonalError::LengthMismatch {
                diagonal: "super",
                expected: 1,
                got: 0
            })
        );
    }

    #[test]
    fn test_zero_leading_pivot() {
        assert_eq!(
            TridiagonalSystem::decompose(&[0.0, 1.0], &[1.0], &[1.0]),
            Err(TridiagonalError::ZeroPivot { index: 0 })
        );
    }

    #[test]
    fn test_zero_interior_pivot() {
        // m[1] = 1 - (1/1) * 1 = 0
        assert_eq!(
            TridiagonalSystem::decompose(&[1.0, 1.0, 1.0], &[1.0, 1.0], &[1.0, 1.0]),
            Err(TridiagonalError::ZeroPivot { index: 1 })
        );
    }

    #[test]
    fn test_non_finite_pivot() {
        let err = TridiagonalSystem::decompose(&[1.0, f64::NAN], &[0.0], &[0.0]).unwrap_err();
        assert!(matches!(err, TridiagonalError::NonFinitePivot { index: 1, .. }));

        let err = TridiagonalSystem::decompose(&[f64::INFINITY], &[], &[]).unwrap_err();
        assert!(matches!(err, TridiagonalError::NonFinitePivot { index: 0, .. }));
    }

    #[test]
    #[should_panic(expected = "right-hand side length")]
    fn test_solve_wrong_length_panics() {
        let system = TridiagonalSystem::decompose(&[2.0, 2.0], &[1.0], &[1.0]).unwrap();
        let _ = system.solve(&[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_system_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TridiagonalSystem>();
    }

    // ========================================
    // Property-Based Tests
    // ========================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// Diagonally dominant systems never produce a zero pivot.
        fn dominant_system(max_n: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>)> {
            (1..=max_n).prop_flat_map(|n| {
                let off = n.saturating_sub(1);
                (
                    prop::collection::vec(-1.0..1.0_f64, off),
                    prop::collection::vec(-1.0..1.0_f64, off),
                    prop::collection::vec(0.1..5.0_f64, n),
                )
                    .prop_map(|(sub, sup, slack)| {
                        let main = (0..slack.len())
                            .map(|i| {
                                let left = if i > 0 { sub[i - 1].abs() } else { 0.0 };
                                let right = if i < sup.len() { sup[i].abs() } else { 0.0 };
                                left + right + slack[i]
                            })
                            .collect();
                        (main, sub, sup)
                    })
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn test_residual_is_small(
                (main, sub, sup) in dominant_system(1000),
                seed in prop::collection::vec(-100.0..100.0_f64, 1000)
            ) {
                let n = main.len();
                let d = &seed[..n];
                let system = TridiagonalSystem::decompose(&main, &sub, &sup).unwrap();
                let y = system.solve(d);
                let ad = multiply(&main, &sub, &sup, &y);

                let residual: f64 = ad.iter().zip(d).map(|(a, b)| (a - b).powi(2)).sum::<f64>().sqrt();
                let norm: f64 = d.iter().map(|v| v * v).sum::<f64>().sqrt();

                prop_assert!(residual <= 1e-9 * norm.max(1e-300), "residual {} vs norm {}", residual, norm);
            }

            #[test]
            fn test_reused_decomposition_matches_fresh(
                (main, sub, sup) in dominant_system(64),
                rhs in prop::collection::vec(prop::collection::vec(-10.0..10.0_f64, 64), 100)
            ) {
                let n = main.len();
                let shared = TridiagonalSystem::decompose(&main, &sub, &sup).unwrap();
                for d in rhs.iter().map(|r| &r[..n]) {
                    let fresh = TridiagonalSystem::decompose(&main, &sub, &sup).unwrap();
                    prop_assert_eq!(shared.solve(d), fresh.solve(d));
                }
            }
        }
    }
}
