//! Runtime element-type dispatch.
//!
//! Hosts hand volumes over as a buffer plus an element tag. This module
//! maps each supported tag onto the matching generic instantiation of
//! [`AosDiffusion::step_into`]; unknown tags are rejected before any
//! output is written.
//!
//! # Examples
//!
//! ```rust
//! use diffusion_kernel::aos::AosDiffusion;
//! use diffusion_kernel::dispatch::{diffuse_tagged, VolumeBuffer};
//!
//! let bytes: Vec<u8> = [1i16, 2, 3, 4]
//!     .iter()
//!     .flat_map(|v| v.to_le_bytes())
//!     .collect();
//! let mut output = vec![0.0; 4];
//!
//! diffuse_tagged(&AosDiffusion::default(), "int16", &bytes, [4, 1, 1], 0.0, &mut output).unwrap();
//! assert!((output[2] - 3.0).abs() < 1e-12);
//!
//! assert!(VolumeBuffer::from_le_bytes("int64", &bytes).is_err());
//! ```

use diffusion_core::types::ElementType;
use diffusion_core::volume::{StridedVolume, StridedVolumeMut, VolumeShape};
use tracing::debug;

use crate::aos::AosDiffusion;
use crate::error::DispatchError;

/// Borrowed volume buffer of any supported element type.
#[derive(Debug, Clone, Copy)]
pub enum VolumeData<'a> {
    /// `int8` elements
    Int8(&'a [i8]),
    /// `uint8` elements
    UInt8(&'a [u8]),
    /// `int16` elements
    Int16(&'a [i16]),
    /// `uint16` elements
    UInt16(&'a [u16]),
    /// `int32` elements
    Int32(&'a [i32]),
    /// `uint32` elements
    UInt32(&'a [u32]),
    /// `single` elements
    Single(&'a [f32]),
    /// `double` elements
    Double(&'a [f64]),
}

macro_rules! with_slice {
    ($data:expr, $slice:ident => $body:expr) => {
        match $data {
            VolumeData::Int8($slice) => $body,
            VolumeData::UInt8($slice) => $body,
            VolumeData::Int16($slice) => $body,
            VolumeData::UInt16($slice) => $body,
            VolumeData::Int32($slice) => $body,
            VolumeData::UInt32($slice) => $body,
            VolumeData::Single($slice) => $body,
            VolumeData::Double($slice) => $body,
        }
    };
}

impl VolumeData<'_> {
    /// Returns the runtime tag of the borrowed elements.
    pub fn element_type(&self) -> ElementType {
        match self {
            VolumeData::Int8(_) => ElementType::Int8,
            VolumeData::UInt8(_) => ElementType::UInt8,
            VolumeData::Int16(_) => ElementType::Int16,
            VolumeData::UInt16(_) => ElementType::UInt16,
            VolumeData::Int32(_) => ElementType::Int32,
            VolumeData::UInt32(_) => ElementType::UInt32,
            VolumeData::Single(_) => ElementType::Single,
            VolumeData::Double(_) => ElementType::Double,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        with_slice!(self, s => s.len())
    }

    /// Returns `true` if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

macro_rules! impl_from_slice {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a [$t]> for VolumeData<'a> {
                fn from(slice: &'a [$t]) -> Self {
                    VolumeData::$variant(slice)
                }
            }
        )*
    };
}

impl_from_slice!(
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    f32 => Single,
    f64 => Double,
);

/// Owned volume buffer decoded from raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum VolumeBuffer {
    /// `int8` elements
    Int8(Vec<i8>),
    /// `uint8` elements
    UInt8(Vec<u8>),
    /// `int16` elements
    Int16(Vec<i16>),
    /// `uint16` elements
    UInt16(Vec<u16>),
    /// `int32` elements
    Int32(Vec<i32>),
    /// `uint32` elements
    UInt32(Vec<u32>),
    /// `single` elements
    Single(Vec<f32>),
    /// `double` elements
    Double(Vec<f64>),
}

macro_rules! decode_le {
    ($bytes:expr, $t:ty) => {
        $bytes
            .chunks_exact(std::mem::size_of::<$t>())
            .map(|chunk| {
                let mut raw = [0u8; std::mem::size_of::<$t>()];
                raw.copy_from_slice(chunk);
                <$t>::from_le_bytes(raw)
            })
            .collect()
    };
}

impl VolumeBuffer {
    /// Decodes little-endian bytes tagged with an element type name.
    ///
    /// # Errors
    ///
    /// * `DispatchError::UnsupportedElementType` - unknown tag
    /// * `DispatchError::ByteLength` - `bytes` is not a whole number of elements
    pub fn from_le_bytes(tag: &str, bytes: &[u8]) -> Result<Self, DispatchError> {
        let element_type: ElementType = tag.parse()?;
        Self::decode(element_type, bytes)
    }

    /// Decodes little-endian bytes of a known element type.
    ///
    /// # Errors
    ///
    /// `DispatchError::ByteLength` if `bytes` is not a whole number of
    /// elements.
    pub fn decode(element_type: ElementType, bytes: &[u8]) -> Result<Self, DispatchError> {
        let size = element_type.size_in_bytes();
        if bytes.len() % size != 0 {
            return Err(DispatchError::ByteLength {
                len: bytes.len(),
                element_type,
                size,
            });
        }

        Ok(match element_type {
            ElementType::Int8 => VolumeBuffer::Int8(decode_le!(bytes, i8)),
            ElementType::UInt8 => VolumeBuffer::UInt8(bytes.to_vec()),
            ElementType::Int16 => VolumeBuffer::Int16(decode_le!(bytes, i16)),
            ElementType::UInt16 => VolumeBuffer::UInt16(decode_le!(bytes, u16)),
            ElementType::Int32 => VolumeBuffer::Int32(decode_le!(bytes, i32)),
            ElementType::UInt32 => VolumeBuffer::UInt32(decode_le!(bytes, u32)),
            ElementType::Single => VolumeBuffer::Single(decode_le!(bytes, f32)),
            ElementType::Double => VolumeBuffer::Double(decode_le!(bytes, f64)),
        })
    }

    /// Borrows the buffer as [`VolumeData`].
    pub fn as_data(&self) -> VolumeData<'_> {
        match self {
            VolumeBuffer::Int8(v) => VolumeData::Int8(v),
            VolumeBuffer::UInt8(v) => VolumeData::UInt8(v),
            VolumeBuffer::Int16(v) => VolumeData::Int16(v),
            VolumeBuffer::UInt16(v) => VolumeData::UInt16(v),
            VolumeBuffer::Int32(v) => VolumeData::Int32(v),
            VolumeBuffer::UInt32(v) => VolumeData::UInt32(v),
            VolumeBuffer::Single(v) => VolumeData::Single(v),
            VolumeBuffer::Double(v) => VolumeData::Double(v),
        }
    }

    /// Returns the element type.
    pub fn element_type(&self) -> ElementType {
        self.as_data().element_type()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.as_data().len()
    }

    /// Returns `true` if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runs one AOS step on a type-erased input, writing `f64` results.
///
/// # Errors
///
/// * `DispatchError::Volume` - bad dimensions or buffer lengths
/// * `DispatchError::Aos` - the step failed
pub fn diffuse(
    engine: &AosDiffusion,
    data: VolumeData<'_>,
    dims: [usize; 3],
    delta_t: f64,
    output: &mut [f64],
) -> Result<(), DispatchError> {
    let shape = VolumeShape::new(dims)?;
    let mut output = StridedVolumeMut::new(output, shape)?;

    debug!(element = %data.element_type(), ?dims, "dispatching AOS step");

    with_slice!(data, slice => {
        let input = StridedVolume::new(slice, shape)?;
        engine.step_into(&input, delta_t, &mut output)?;
    });

    Ok(())
}

/// Decodes a tagged little-endian buffer and runs one AOS step on it.
///
/// The tag is checked first; on any error `output` is left untouched.
///
/// # Errors
///
/// * `DispatchError::UnsupportedElementType` - unknown tag
/// * `DispatchError::ByteLength` - `bytes` is not a whole number of elements
/// * see [`diffuse`]
pub fn diffuse_tagged(
    engine: &AosDiffusion,
    tag: &str,
    bytes: &[u8],
    dims: [usize; 3],
    delta_t: f64,
    output: &mut [f64],
) -> Result<(), DispatchError> {
    let buffer = VolumeBuffer::from_le_bytes(tag, bytes)?;
    diffuse(engine, buffer.as_data(), dims, delta_t, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aos::AosConfig;
    use crate::error::AosError;
    use approx::assert_relative_eq;
    use diffusion_core::types::VolumeError;

    fn le_bytes_u16(values: &[u16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_volume_data_from_slices() {
        let ints = [1i32, 2, 3];
        let floats = [1.0f32; 5];
        assert_eq!(VolumeData::from(&ints[..]).element_type(), ElementType::Int32);
        assert_eq!(VolumeData::from(&floats[..]).len(), 5);
        let empty: &[u8] = &[];
        assert!(VolumeData::from(empty).is_empty());
    }

    #[test]
    fn test_decode_every_type() {
        for element_type in ElementType::ALL {
            let bytes = vec![0u8; element_type.size_in_bytes() * 6];
            let buffer = VolumeBuffer::decode(element_type, &bytes).unwrap();
            assert_eq!(buffer.element_type(), element_type);
            assert_eq!(buffer.len(), 6);
        }
    }

    #[test]
    fn test_decode_little_endian() {
        let buffer = VolumeBuffer::from_le_bytes("uint16", &[0x01, 0x02, 0xff, 0x00]).unwrap();
        assert_eq!(buffer, VolumeBuffer::UInt16(vec![0x0201, 0x00ff]));

        let buffer = VolumeBuffer::from_le_bytes("double", &1.5f64.to_le_bytes()).unwrap();
        assert_eq!(buffer, VolumeBuffer::Double(vec![1.5]));
    }

    #[test]
    fn test_decode_ragged_bytes() {
        let err = VolumeBuffer::from_le_bytes("int32", &[0u8; 6]).unwrap_err();
        assert_eq!(
            err,
            DispatchError::ByteLength {
                len: 6,
                element_type: ElementType::Int32,
                size: 4
            }
        );
    }

    #[test]
    fn test_unknown_tag_leaves_output_untouched() {
        let mut output = vec![-1.0; 8];
        let err = diffuse_tagged(
            &AosDiffusion::default(),
            "complex128",
            &[0u8; 8],
            [2, 2, 2],
            0.1,
            &mut output,
        )
        .unwrap_err();

        assert!(matches!(err, DispatchError::UnsupportedElementType(_)));
        assert!(output.iter().all(|&v| v == -1.0));
    }

    #[test]
    fn test_diffuse_matches_generic_step() {
        let values: Vec<u16> = (0..24).map(|v| (v * 37 % 11) as u16).collect();
        let dims = [4, 3, 2];
        let engine = AosDiffusion::new(AosConfig::serial());

        let mut dispatched = vec![0.0; 24];
        diffuse_tagged(&engine, "uint16", &le_bytes_u16(&values), dims, 0.4, &mut dispatched)
            .unwrap();

        let shape = VolumeShape::new(dims).unwrap();
        let view = StridedVolume::new(&values, shape).unwrap();
        let direct = engine.step(&view, 0.4).unwrap();

        for (a, b) in dispatched.iter().zip(direct.as_slice()) {
            assert_relative_eq!(*a, *b);
        }
    }

    #[test]
    fn test_diffuse_rejects_wrong_lengths() {
        let input = [0.0f64; 8];
        let mut short_output = vec![0.0; 7];
        let err = diffuse(
            &AosDiffusion::default(),
            VolumeData::from(&input[..]),
            [2, 2, 2],
            0.1,
            &mut short_output,
        )
        .unwrap_err();
        assert_eq!(
            err,
            DispatchError::Volume(VolumeError::LengthMismatch {
                expected: 8,
                got: 7
            })
        );

        let mut output = vec![0.0; 8];
        let err = diffuse(
            &AosDiffusion::default(),
            VolumeData::from(&input[..6]),
            [2, 2, 2],
            0.1,
            &mut output,
        )
        .unwrap_err();
        assert!(matches!(err, DispatchError::Volume(_)));
    }

    #[test]
    fn test_diffuse_zero_dimension() {
        let empty: &[i8] = &[];
        let mut output = vec![];
        let err = diffuse(
            &AosDiffusion::default(),
            VolumeData::from(empty),
            [0, 3, 3],
            0.1,
            &mut output,
        )
        .unwrap_err();
        assert_eq!(err, DispatchError::Volume(VolumeError::ZeroDimension { axis: 0 }));
    }

    #[test]
    fn test_solver_failure_surfaces() {
        let input = [1.0f32; 8];
        let mut output = vec![0.0; 8];
        let err = diffuse(
            &AosDiffusion::default(),
            VolumeData::from(&input[..]),
            [2, 2, 2],
            -1.0 / 3.0,
            &mut output,
        )
        .unwrap_err();
        assert!(matches!(err, DispatchError::Aos(AosError::Solver { .. })));
    }
}
