//! Non-owning strided views over a volume buffer.
//!
//! A view borrows a flat column-major buffer for its whole lifetime and
//! exposes it as a set of axis-aligned lines. Lines are staged through
//! `f64` slices: elements are widened on extraction and narrowed on
//! assignment or accumulation. Nothing outside the addressed line is
//! touched, and distinct fixed pairs along one axis address disjoint
//! element sets.

use super::shape::{Axis, VolumeShape};
use crate::types::{Element, VolumeError};

/// Read-only strided view over a volume buffer.
///
/// # Examples
///
/// ```
/// use diffusion_core::volume::{Axis, StridedVolume, VolumeShape};
///
/// let shape = VolumeShape::new([2, 2, 2]).unwrap();
/// let data: Vec<u8> = (0..8).collect();
/// let view = StridedVolume::new(&data, shape).unwrap();
///
/// assert_eq!(view.extract(Axis::Row, (1, 1)), vec![6.0, 7.0]);
/// assert_eq!(view.extract(Axis::Plane, (1, 0)), vec![1.0, 5.0]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StridedVolume<'a, T: Element> {
    pub(super) data: &'a [T],
    pub(super) shape: VolumeShape,
}

impl<'a, T: Element> StridedVolume<'a, T> {
    /// Wraps `data` with the given shape.
    ///
    /// # Errors
    ///
    /// `VolumeError::LengthMismatch` if `data.len()` differs from
    /// `shape.num_elements()`.
    pub fn new(data: &'a [T], shape: VolumeShape) -> Result<Self, VolumeError> {
        check_len(data.len(), &shape)?;
        Ok(Self { data, shape })
    }

    /// Returns the volume shape.
    #[inline]
    pub fn shape(&self) -> VolumeShape {
        self.shape
    }

    /// Returns the borrowed buffer.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Copies one line into `out`, widening to `f64`.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != shape.len(axis)` or `pair` is out of bounds.
    #[inline]
    pub fn extract_into(&self, axis: Axis, pair: (usize, usize), out: &mut [f64]) {
        read_line(self.data, &self.shape, axis, pair, out);
    }

    /// Returns one line as a freshly allocated `Vec<f64>`.
    ///
    /// # Panics
    ///
    /// Panics if `pair` is out of bounds.
    pub fn extract(&self, axis: Axis, pair: (usize, usize)) -> Vec<f64> {
        let mut out = vec![0.0; self.shape.len(axis)];
        self.extract_into(axis, pair, &mut out);
        out
    }
}

/// Mutable strided view over a volume buffer.
///
/// # Examples
///
/// ```
/// use diffusion_core::volume::{Axis, StridedVolumeMut, VolumeShape};
///
/// let shape = VolumeShape::new([2, 3, 1]).unwrap();
/// let mut data = vec![0.0_f64; 6];
/// let mut view = StridedVolumeMut::new(&mut data, shape).unwrap();
///
/// view.assign(Axis::Column, (1, 0), &[1.0, 2.0, 3.0]);
/// view.accumulate(Axis::Row, (2, 0), &[10.0, 10.0]);
///
/// assert_eq!(data, vec![0.0, 1.0, 0.0, 2.0, 10.0, 13.0]);
/// ```
#[derive(Debug)]
pub struct StridedVolumeMut<'a, T: Element> {
    pub(super) data: &'a mut [T],
    pub(super) shape: VolumeShape,
}

impl<'a, T: Element> StridedVolumeMut<'a, T> {
    /// Wraps `data` with the given shape.
    ///
    /// # Errors
    ///
    /// `VolumeError::LengthMismatch` if `data.len()` differs from
    /// `shape.num_elements()`.
    pub fn new(data: &'a mut [T], shape: VolumeShape) -> Result<Self, VolumeError> {
        check_len(data.len(), &shape)?;
        Ok(Self { data, shape })
    }

    /// Returns the volume shape.
    #[inline]
    pub fn shape(&self) -> VolumeShape {
        self.shape
    }

    /// Reborrows as a read-only view.
    #[inline]
    pub fn as_view(&self) -> StridedVolume<'_, T> {
        StridedVolume {
            data: &*self.data,
            shape: self.shape,
        }
    }

    /// Returns the borrowed buffer.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data
    }

    /// Copies one line into `out`, widening to `f64`.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != shape.len(axis)` or `pair` is out of bounds.
    #[inline]
    pub fn extract_into(&self, axis: Axis, pair: (usize, usize), out: &mut [f64]) {
        read_line(&*self.data, &self.shape, axis, pair, out);
    }

    /// Overwrites one line with `values`, narrowing to `T`.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != shape.len(axis)` or `pair` is out of bounds.
    pub fn assign(&mut self, axis: Axis, pair: (usize, usize), values: &[f64]) {
        let (start, stride) = line_bounds(&self.shape, axis, pair, values.len());
        self.data[start..]
            .iter_mut()
            .step_by(stride)
            .zip(values)
            .for_each(|(dst, &v)| *dst = T::from_f64(v));
    }

    /// Adds `values` element-wise onto one line, narrowing the sums to `T`.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != shape.len(axis)` or `pair` is out of bounds.
    pub fn accumulate(&mut self, axis: Axis, pair: (usize, usize), values: &[f64]) {
        let (start, stride) = line_bounds(&self.shape, axis, pair, values.len());
        self.data[start..]
            .iter_mut()
            .step_by(stride)
            .zip(values)
            .for_each(|(dst, &v)| *dst = T::from_f64(dst.to_f64() + v));
    }
}

fn check_len(len: usize, shape: &VolumeShape) -> Result<(), VolumeError> {
    if len != shape.num_elements() {
        return Err(VolumeError::LengthMismatch {
            expected: shape.num_elements(),
            got: len,
        });
    }
    Ok(())
}

/// Validates a line access and returns `(start, stride)`.
#[inline]
fn line_bounds(
    shape: &VolumeShape,
    axis: Axis,
    pair: (usize, usize),
    values_len: usize,
) -> (usize, usize) {
    assert_eq!(
        values_len,
        shape.len(axis),
        "line buffer length must equal the {} dimension",
        axis
    );
    (shape.line_start(axis, pair), shape.stride(axis))
}

#[inline]
fn read_line<T: Element>(
    data: &[T],
    shape: &VolumeShape,
    axis: Axis,
    pair: (usize, usize),
    out: &mut [f64],
) {
    let (start, stride) = line_bounds(shape, axis, pair, out.len());
    data[start..]
        .iter()
        .step_by(stride)
        .zip(out.iter_mut())
        .for_each(|(&src, dst)| *dst = src.to_f64());
}
