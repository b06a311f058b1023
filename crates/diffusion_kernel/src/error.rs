//! Error types for the AOS diffusion kernel.
//!
//! This module defines structured error types for configuration
//! validation, per-axis decomposition failures and host dispatch.

use diffusion_core::types::{ElementType, ElementTypeError, TridiagonalError, VolumeError};
use diffusion_core::volume::Axis;
use thiserror::Error;

/// Errors raised by one AOS diffusion step.
///
/// A failure on any axis aborts the whole step; the output carries no
/// meaningful partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AosError {
    /// An axis of length 0 has no 1D diffusion system.
    #[error("Axis of length 0 has no diffusion system")]
    EmptyAxis,

    /// Input and output volumes disagree on dimensions.
    #[error("Shape mismatch: input {input:?}, output {output:?}")]
    ShapeMismatch {
        /// Input dimensions
        input: [usize; 3],
        /// Output dimensions
        output: [usize; 3],
    },

    /// Decomposition of one axis system failed.
    #[error("Decomposition failed along the {axis} axis: {source}")]
    Solver {
        /// Axis whose system failed
        axis: Axis,
        /// Underlying solver error
        #[source]
        source: TridiagonalError,
    },

    /// Invalid volume shape or buffer.
    #[error(transparent)]
    Volume(#[from] VolumeError),

    /// Invalid kernel configuration.
    #[error("Invalid configuration '{name}': {reason}")]
    InvalidConfig {
        /// Parameter name
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// Errors raised at the host boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// The runtime tag names no supported element type.
    #[error(transparent)]
    UnsupportedElementType(#[from] ElementTypeError),

    /// Raw input is not a whole number of elements.
    #[error("Byte length {len} is not a multiple of the {element_type} element size {size}")]
    ByteLength {
        /// Number of bytes supplied
        len: usize,
        /// Declared element type
        element_type: ElementType,
        /// Width of one element in bytes
        size: usize,
    },

    /// Input or output buffer does not match the dimensions.
    #[error(transparent)]
    Volume(#[from] VolumeError),

    /// The diffusion step itself failed.
    #[error(transparent)]
    Aos(#[from] AosError),
}
