//! Tridiagonal coefficients of the 1D AOS diffusion operator.
//!
//! For a line of length `len` and time increment `delta_t`, with
//! `s = 9 * delta_t`:
//!
//! ```text
//! off[i]  = -s                                  i in 0..len-1
//! main[i] = 3 - (off[i-1] + off[i])             interior rows
//! main[0] = 3 - off[0],  main[len-1] = 3 - off[len-2]
//! ```
//!
//! Every row sums to exactly 3, the number of split directions, including
//! the boundary rows where only one neighbour exists. That truncated
//! stencil gives the operator its Neumann boundary behaviour, and the
//! factor 3 makes the sum of the three per-axis solves equal to the AOS
//! average.

use diffusion_core::math::TridiagonalSystem;
use diffusion_core::types::TridiagonalError;
use diffusion_core::volume::Axis;
use tracing::trace;

use crate::error::AosError;

/// Number of directions the 3D operator is split into.
pub const AOS_SPLIT_FACTOR: f64 = 3.0;

/// Scale of `delta_t` on the off-diagonals (`SPLIT_FACTOR` squared).
pub const AOS_STEP_SCALE: f64 = 9.0;

/// Symmetric tridiagonal coefficients for one axis.
///
/// # Examples
///
/// ```rust
/// use diffusion_kernel::aos::AosCoefficients;
///
/// let coeffs = AosCoefficients::build(0.1, 4).unwrap();
/// assert_eq!(coeffs.off_diagonal().len(), 3);
///
/// // Rows sum to 3 whatever the number of neighbours
/// let main = coeffs.main_diagonal();
/// let off = coeffs.off_diagonal();
/// assert!((main[0] + off[0] - 3.0).abs() < 1e-12);
/// assert!((main[1] + off[0] + off[1] - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AosCoefficients {
    main: Vec<f64>,
    off: Vec<f64>,
}

impl AosCoefficients {
    /// Builds the coefficients for a line of length `len`.
    ///
    /// `len == 1` yields the degenerate system `3 y = d`.
    ///
    /// # Errors
    ///
    /// `AosError::EmptyAxis` if `len == 0`.
    pub fn build(delta_t: f64, len: usize) -> Result<Self, AosError> {
        if len == 0 {
            return Err(AosError::EmptyAxis);
        }

        let s = AOS_STEP_SCALE * delta_t;
        let off = vec![-s; len - 1];

        let main = (0..len)
            .map(|i| {
                let left = if i > 0 { off[i - 1] } else { 0.0 };
                let right = off.get(i).copied().unwrap_or(0.0);
                AOS_SPLIT_FACTOR - (left + right)
            })
            .collect();

        Ok(Self { main, off })
    }

    /// Returns the main diagonal.
    #[inline]
    pub fn main_diagonal(&self) -> &[f64] {
        &self.main
    }

    /// Returns the off-diagonal, shared by the sub- and super-diagonal.
    #[inline]
    pub fn off_diagonal(&self) -> &[f64] {
        &self.off
    }

    /// Returns the line length.
    #[inline]
    pub fn len(&self) -> usize {
        self.main.len()
    }

    /// Always `false`: empty axes are rejected by [`build`](Self::build).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
    }

    /// Feeds the coefficients to the Thomas decomposition.
    pub fn decompose(&self) -> Result<TridiagonalSystem, TridiagonalError> {
        TridiagonalSystem::decompose(&self.main, &self.off, &self.off)
    }
}

/// Builds and decomposes the system for one axis of length `len`.
///
/// # Errors
///
/// * `AosError::EmptyAxis` - `len == 0`
/// * `AosError::Solver` - the decomposition hit a zero or non-finite pivot
pub fn axis_system(delta_t: f64, axis: Axis, len: usize) -> Result<TridiagonalSystem, AosError> {
    let system = AosCoefficients::build(delta_t, len)?
        .decompose()
        .map_err(|source| AosError::Solver { axis, source })?;
    trace!(%axis, len, last_pivot = system.pivots()[len - 1], "axis system decomposed");
    Ok(system)
}
