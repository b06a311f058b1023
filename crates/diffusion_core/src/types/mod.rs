//! Core element and error types.
//!
//! This module provides:
//! - `element`: The [`Element`] trait and the runtime [`ElementType`] tag
//! - `error`: Structured error types for element tags, volumes and tridiagonal systems
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Element`], [`ElementType`] from `element`
//! - [`ElementTypeError`], [`VolumeError`], [`TridiagonalError`] from `error`

pub mod element;
pub mod error;

pub use element::{Element, ElementType};
pub use error::{ElementTypeError, TridiagonalError, VolumeError};
