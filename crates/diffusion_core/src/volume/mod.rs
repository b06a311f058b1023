//! 3D scalar volumes and axis-aligned line access.
//!
//! This module provides:
//! - [`VolumeShape`] and [`Axis`]: dimensions, strides and line addressing
//! - [`StridedVolume`] / [`StridedVolumeMut`]: non-owning views that read,
//!   assign and accumulate whole lines without copying the volume
//! - [`Volume`]: an owned buffer handing out views
//!
//! # Layout
//!
//! Buffers are column-major: the element at `(i0, i1, i2)` of a
//! `(D0, D1, D2)` volume is stored at `i0 + i1 * D0 + i2 * D0 * D1`.
//!
//! A line is addressed by its axis and the pair of coordinates held fixed:
//!
//! | Axis | Varies | Fixed pair |
//! |------|--------|------------|
//! | `Row` | `i0` | `(i1, i2)` |
//! | `Column` | `i1` | `(i0, i2)` |
//! | `Plane` | `i2` | `(i0, i1)` |

mod owned;
mod shape;
mod view;

pub use owned::Volume;
pub use shape::{Axis, VolumeShape};
pub use view::{StridedVolume, StridedVolumeMut};
