//! Volume dimensions, axes and line addressing.

use std::fmt;

use crate::types::VolumeError;

/// One of the three volume axes.
///
/// A *line* along an axis is every element whose coordinate on that axis
/// varies while the other two coordinates stay fixed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// Coordinate 0 (unit stride)
    Row,
    /// Coordinate 1 (stride `D0`)
    Column,
    /// Coordinate 2 (stride `D0 * D1`)
    Plane,
}

impl Axis {
    /// All axes in coordinate order.
    pub const ALL: [Axis; 3] = [Axis::Row, Axis::Column, Axis::Plane];

    /// Pass order of one AOS diffusion step.
    ///
    /// The plane pass establishes the output, the column and row passes
    /// accumulate onto it.
    pub const AOS_ORDER: [Axis; 3] = [Axis::Plane, Axis::Column, Axis::Row];

    /// Returns the coordinate index (0, 1 or 2).
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Axis::Row => 0,
            Axis::Column => 1,
            Axis::Plane => 2,
        }
    }

    /// Returns the two axes held fixed along a line of this axis, in the
    /// order the fixed index pair is given.
    #[inline]
    pub fn fixed_axes(&self) -> (Axis, Axis) {
        match self {
            Axis::Row => (Axis::Column, Axis::Plane),
            Axis::Column => (Axis::Row, Axis::Plane),
            Axis::Plane => (Axis::Row, Axis::Column),
        }
    }
}

impl TryFrom<usize> for Axis {
    type Error = usize;

    fn try_from(index: usize) -> Result<Self, usize> {
        match index {
            0 => Ok(Axis::Row),
            1 => Ok(Axis::Column),
            2 => Ok(Axis::Plane),
            other => Err(other),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::Row => "row",
            Axis::Column => "column",
            Axis::Plane => "plane",
        };
        write!(f, "{}", name)
    }
}

/// Dimensions `(D0, D1, D2)` of a column-major volume.
///
/// The element at `(i0, i1, i2)` lives at linear index
/// `i0 + i1 * D0 + i2 * D0 * D1`. Every dimension is at least 1.
///
/// # Examples
///
/// ```
/// use diffusion_core::volume::{Axis, VolumeShape};
///
/// let shape = VolumeShape::new([4, 3, 2]).unwrap();
/// assert_eq!(shape.num_elements(), 24);
/// assert_eq!(shape.stride(Axis::Plane), 12);
/// assert_eq!(shape.line_count(Axis::Column), 8);
/// assert_eq!(shape.linear_index(1, 2, 1), 1 + 2 * 4 + 12);
///
/// assert!(VolumeShape::new([4, 0, 2]).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VolumeShape {
    dims: [usize; 3],
    plane_size: usize,
    num_elements: usize,
}

impl VolumeShape {
    /// Creates a shape, rejecting zero-length and overflowing dimensions.
    ///
    /// # Errors
    ///
    /// * `VolumeError::ZeroDimension` - Some dimension is 0
    /// * `VolumeError::TooLarge` - `D0 * D1 * D2` overflows `usize`
    pub fn new(dims: [usize; 3]) -> Result<Self, VolumeError> {
        if let Some(axis) = dims.iter().position(|&d| d == 0) {
            return Err(VolumeError::ZeroDimension { axis });
        }

        let plane_size = dims[0]
            .checked_mul(dims[1])
            .ok_or(VolumeError::TooLarge { dims })?;
        let num_elements = plane_size
            .checked_mul(dims[2])
            .ok_or(VolumeError::TooLarge { dims })?;

        Ok(Self {
            dims,
            plane_size,
            num_elements,
        })
    }

    /// Returns `[D0, D1, D2]`.
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Returns the length of a line along `axis`.
    #[inline]
    pub fn len(&self, axis: Axis) -> usize {
        self.dims[axis.index()]
    }

    /// Returns the linear distance between consecutive elements along `axis`.
    #[inline]
    pub fn stride(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => 1,
            Axis::Column => self.dims[0],
            Axis::Plane => self.plane_size,
        }
    }

    /// Returns `D0 * D1 * D2`.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    /// Returns the longest of the three dimensions.
    #[inline]
    pub fn max_len(&self) -> usize {
        self.dims.iter().copied().max().unwrap_or(1)
    }

    /// Returns the linear index of `(i0, i1, i2)`.
    #[inline]
    pub fn linear_index(&self, i0: usize, i1: usize, i2: usize) -> usize {
        i0 + i1 * self.dims[0] + i2 * self.plane_size
    }

    /// Returns the extents of the two fixed coordinates of lines along `axis`.
    #[inline]
    pub fn fixed_extents(&self, axis: Axis) -> (usize, usize) {
        let (a, b) = axis.fixed_axes();
        (self.len(a), self.len(b))
    }

    /// Returns the number of distinct lines along `axis`.
    #[inline]
    pub fn line_count(&self, axis: Axis) -> usize {
        let (na, nb) = self.fixed_extents(axis);
        na * nb
    }

    /// Returns the linear index of the first element of a line.
    ///
    /// # Panics
    ///
    /// Panics if either fixed coordinate is out of bounds.
    #[inline]
    pub fn line_start(&self, axis: Axis, pair: (usize, usize)) -> usize {
        let (na, nb) = self.fixed_extents(axis);
        assert!(
            pair.0 < na && pair.1 < nb,
            "fixed index pair {:?} out of bounds ({}, {}) for {} lines",
            pair,
            na,
            nb,
            axis
        );
        match axis {
            Axis::Row => self.linear_index(0, pair.0, pair.1),
            Axis::Column => self.linear_index(pair.0, 0, pair.1),
            Axis::Plane => self.linear_index(pair.0, pair.1, 0),
        }
    }

    /// Maps a line ordinal in `0..line_count(axis)` to its fixed pair.
    ///
    /// Ordinals run with the first fixed coordinate outermost, matching
    /// [`lines`](Self::lines).
    #[inline]
    pub fn fixed_pair(&self, axis: Axis, line: usize) -> (usize, usize) {
        let (_, nb) = self.fixed_extents(axis);
        (line / nb, line % nb)
    }

    /// Iterates over the fixed pairs of every line along `axis`.
    pub fn lines(&self, axis: Axis) -> impl Iterator<Item = (usize, usize)> {
        let (na, nb) = self.fixed_extents(axis);
        (0..na).flat_map(move |a| (0..nb).map(move |b| (a, b)))
    }
}
