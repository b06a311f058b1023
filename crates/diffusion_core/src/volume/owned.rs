//! Owned volume buffer.

use super::shape::VolumeShape;
use super::view::{StridedVolume, StridedVolumeMut};
use crate::types::{Element, VolumeError};

/// A volume that owns its column-major buffer.
///
/// Views borrowed from it satisfy the length invariant by construction.
///
/// # Examples
///
/// ```
/// use diffusion_core::volume::{Volume, VolumeShape};
///
/// let shape = VolumeShape::new([2, 2, 1]).unwrap();
/// let volume = Volume::from_fn(shape, |i0, i1, _| (i0 + 10 * i1) as u16);
///
/// assert_eq!(volume.get(1, 1, 0), 11);
/// assert_eq!(volume.as_slice(), &[0, 1, 10, 11]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Volume<T: Element> {
    data: Vec<T>,
    shape: VolumeShape,
}

impl<T: Element> Volume<T> {
    /// Takes ownership of `data` laid out according to `shape`.
    ///
    /// # Errors
    ///
    /// `VolumeError::LengthMismatch` if the lengths disagree.
    pub fn from_vec(data: Vec<T>, shape: VolumeShape) -> Result<Self, VolumeError> {
        if data.len() != shape.num_elements() {
            return Err(VolumeError::LengthMismatch {
                expected: shape.num_elements(),
                got: data.len(),
            });
        }
        Ok(Self { data, shape })
    }

    /// Builds a volume by evaluating `f(i0, i1, i2)` at every element.
    pub fn from_fn<F>(shape: VolumeShape, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> T,
    {
        let [d0, d1, d2] = shape.dims();
        let mut data = Vec::with_capacity(shape.num_elements());
        for i2 in 0..d2 {
            for i1 in 0..d1 {
                for i0 in 0..d0 {
                    data.push(f(i0, i1, i2));
                }
            }
        }
        Self { data, shape }
    }

    /// Returns a volume with every element equal to `value`.
    pub fn filled(shape: VolumeShape, value: T) -> Self {
        Self {
            data: vec![value; shape.num_elements()],
            shape,
        }
    }

    /// Returns the shape.
    #[inline]
    pub fn shape(&self) -> VolumeShape {
        self.shape
    }

    /// Returns the element at `(i0, i1, i2)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, i0: usize, i1: usize, i2: usize) -> T {
        let [d0, d1, d2] = self.shape.dims();
        assert!(
            i0 < d0 && i1 < d1 && i2 < d2,
            "coordinates ({}, {}, {}) out of bounds {:?}",
            i0,
            i1,
            i2,
            self.shape.dims()
        );
        self.data[self.shape.linear_index(i0, i1, i2)]
    }

    /// Borrows a read-only strided view.
    #[inline]
    pub fn view(&self) -> StridedVolume<'_, T> {
        StridedVolume {
            data: &self.data,
            shape: self.shape,
        }
    }

    /// Borrows a mutable strided view.
    #[inline]
    pub fn view_mut(&mut self) -> StridedVolumeMut<'_, T> {
        StridedVolumeMut {
            data: &mut self.data,
            shape: self.shape,
        }
    }

    /// Returns the underlying buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consumes the volume, returning the buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl Volume<f64> {
    /// Returns a zero-initialised `f64` volume.
    pub fn zeros(shape: VolumeShape) -> Self {
        Self::filled(shape, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::Axis;

    #[test]
    fn test_from_vec_length_mismatch() {
        let shape = VolumeShape::new([2, 2, 2]).unwrap();
        assert!(Volume::from_vec(vec![0i8; 8], shape).is_ok());
        assert_eq!(
            Volume::from_vec(vec![0i8; 9], shape),
            Err(VolumeError::LengthMismatch {
                expected: 8,
                got: 9
            })
        );
    }

    #[test]
    fn test_from_fn_layout_matches_linear_index() {
        let shape = VolumeShape::new([3, 2, 4]).unwrap();
        let volume = Volume::from_fn(shape, |i0, i1, i2| shape.linear_index(i0, i1, i2) as u32);
        for (idx, &v) in volume.as_slice().iter().enumerate() {
            assert_eq!(v as usize, idx);
        }
    }

    #[test]
    fn test_views_share_storage() {
        let shape = VolumeShape::new([2, 2, 2]).unwrap();
        let mut volume = Volume::zeros(shape);
        volume.view_mut().assign(Axis::Plane, (1, 1), &[4.0, 8.0]);
        assert_eq!(volume.get(1, 1, 0), 4.0);
        assert_eq!(volume.get(1, 1, 1), 8.0);
        assert_eq!(volume.view().extract(Axis::Plane, (1, 1)), vec![4.0, 8.0]);
        assert_eq!(volume.into_vec().iter().sum::<f64>(), 12.0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds_panics() {
        let shape = VolumeShape::new([2, 2, 2]).unwrap();
        let volume = Volume::filled(shape, 1u8);
        let _ = volume.get(0, 2, 0);
    }
}
