//! Error types for structured error handling.
//!
//! This module provides:
//! - `ElementTypeError`: Errors from parsing runtime element type tags
//! - `VolumeError`: Errors from volume shape and view construction
//! - `TridiagonalError`: Errors from tridiagonal decomposition

use thiserror::Error;

/// Element type tag errors.
///
/// Raised when a runtime type tag does not name one of the supported
/// element types. The host must treat this as a configuration fault.
///
/// # Examples
/// ```
/// use diffusion_core::types::ElementTypeError;
///
/// let err = ElementTypeError::Unknown("complex128".to_string());
/// assert_eq!(format!("{}", err), "Unknown element type: complex128");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElementTypeError {
    /// Tag does not name a supported element type.
    #[error("Unknown element type: {0}")]
    Unknown(String),
}

/// Volume shape and view errors.
///
/// # Variants
/// - `ZeroDimension`: A dimension of length 0 (no valid 1D system exists)
/// - `TooLarge`: The element count overflows `usize`
/// - `LengthMismatch`: Buffer length differs from the shape's element count
///
/// # Examples
/// ```
/// use diffusion_core::types::VolumeError;
///
/// let err = VolumeError::ZeroDimension { axis: 2 };
/// assert!(format!("{}", err).contains("axis 2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VolumeError {
    /// A dimension has length zero.
    #[error("Dimension along axis {axis} has length 0")]
    ZeroDimension {
        /// Axis index (0 = row, 1 = column, 2 = plane)
        axis: usize,
    },

    /// Element count does not fit in `usize`.
    #[error("Volume dimensions {dims:?} overflow the addressable element count")]
    TooLarge {
        /// Requested dimensions
        dims: [usize; 3],
    },

    /// Buffer length does not match the shape.
    #[error("Buffer length mismatch: expected {expected} elements, got {got}")]
    LengthMismatch {
        /// Element count implied by the shape
        expected: usize,
        /// Length of the supplied buffer
        got: usize,
    },
}

/// Tridiagonal decomposition errors.
///
/// The Thomas algorithm has no pivoting, so a zero or non-finite pivot
/// leaves the system unsolvable. These are reported instead of letting
/// infinities and NaNs flow into every subsequent solve.
///
/// # Examples
/// ```
/// use diffusion_core::types::TridiagonalError;
///
/// let err = TridiagonalError::ZeroPivot { index: 3 };
/// assert!(format!("{}", err).contains("index 3"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TridiagonalError {
    /// System of size zero.
    #[error("Tridiagonal system is empty")]
    EmptySystem,

    /// Off-diagonal length does not match `N - 1`.
    #[error("{diagonal} diagonal length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        /// Which diagonal was malformed ("sub" or "super")
        diagonal: &'static str,
        /// Required length
        expected: usize,
        /// Supplied length
        got: usize,
    },

    /// A pivot became exactly zero.
    #[error("Zero pivot at index {index}: system is singular for the Thomas algorithm")]
    ZeroPivot {
        /// Row of the zero pivot
        index: usize,
    },

    /// A pivot or multiplier is NaN or infinite.
    #[error("Non-finite pivot at index {index}: {value}")]
    NonFinitePivot {
        /// Row of the offending pivot
        index: usize,
        /// The non-finite value
        value: f64,
    },
}
