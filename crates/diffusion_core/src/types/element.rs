//! Element types storable in a diffusion volume.
//!
//! All arithmetic is carried out in `f64`. Volume elements are widened on
//! read and narrowed on write, so a single generic kernel serves every
//! supported storage width.
//!
//! # Examples
//!
//! ```
//! use diffusion_core::types::element::{Element, ElementType};
//!
//! assert_eq!(u8::ELEMENT_TYPE, ElementType::UInt8);
//! assert_eq!(200_u8.to_f64(), 200.0);
//! assert_eq!(u8::from_f64(12.9), 12);
//!
//! let tag: ElementType = "int16".parse().unwrap();
//! assert_eq!(tag.size_in_bytes(), 2);
//! ```

use std::fmt;
use std::str::FromStr;

use num_traits::AsPrimitive;

use super::error::ElementTypeError;

/// Runtime tag naming a supported element type.
///
/// The host environment hands buffers over with one of these tags; the
/// dispatch layer maps each tag to the matching [`Element`] instantiation.
///
/// # Variants
/// - `Int8`, `UInt8`: 8-bit signed/unsigned integers
/// - `Int16`, `UInt16`: 16-bit signed/unsigned integers
/// - `Int32`, `UInt32`: 32-bit signed/unsigned integers
/// - `Single`: 32-bit IEEE 754 float
/// - `Double`: 64-bit IEEE 754 float
///
/// # Examples
///
/// ```
/// use diffusion_core::types::ElementType;
///
/// let single: ElementType = "float32".parse().unwrap();
/// assert_eq!(single, ElementType::Single);
/// assert_eq!(single.name(), "single");
///
/// assert!("complex".parse::<ElementType>().is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ElementType {
    /// Signed 8-bit integer
    Int8,
    /// Unsigned 8-bit integer
    UInt8,
    /// Signed 16-bit integer
    Int16,
    /// Unsigned 16-bit integer
    UInt16,
    /// Signed 32-bit integer
    Int32,
    /// Unsigned 32-bit integer
    UInt32,
    /// 32-bit float
    Single,
    /// 64-bit float
    Double,
}

impl ElementType {
    /// Every supported element type, in tag order.
    pub const ALL: [ElementType; 8] = [
        ElementType::Int8,
        ElementType::UInt8,
        ElementType::Int16,
        ElementType::UInt16,
        ElementType::Int32,
        ElementType::UInt32,
        ElementType::Single,
        ElementType::Double,
    ];

    /// Returns the canonical lowercase tag name.
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Int8 => "int8",
            ElementType::UInt8 => "uint8",
            ElementType::Int16 => "int16",
            ElementType::UInt16 => "uint16",
            ElementType::Int32 => "int32",
            ElementType::UInt32 => "uint32",
            ElementType::Single => "single",
            ElementType::Double => "double",
        }
    }

    /// Returns the storage width of one element in bytes.
    pub fn size_in_bytes(&self) -> usize {
        match self {
            ElementType::Int8 | ElementType::UInt8 => 1,
            ElementType::Int16 | ElementType::UInt16 => 2,
            ElementType::Int32 | ElementType::UInt32 | ElementType::Single => 4,
            ElementType::Double => 8,
        }
    }

    /// Returns `true` for the floating-point tags.
    pub fn is_float(&self) -> bool {
        matches!(self, ElementType::Single | ElementType::Double)
    }
}

impl FromStr for ElementType {
    type Err = ElementTypeError;

    /// Parses a tag name (case-insensitive).
    ///
    /// `float32` and `float64` are accepted as aliases of `single` and
    /// `double`.
    fn from_str(s: &str) -> Result<Self, ElementTypeError> {
        match s.trim().to_lowercase().as_str() {
            "int8" => Ok(ElementType::Int8),
            "uint8" => Ok(ElementType::UInt8),
            "int16" => Ok(ElementType::Int16),
            "uint16" => Ok(ElementType::UInt16),
            "int32" => Ok(ElementType::Int32),
            "uint32" => Ok(ElementType::UInt32),
            "single" | "float32" => Ok(ElementType::Single),
            "double" | "float64" => Ok(ElementType::Double),
            _ => Err(ElementTypeError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A scalar type that can back a volume.
///
/// Widening to `f64` is exact for every implementor. Narrowing follows
/// Rust `as` semantics: floats are truncated toward zero and saturated at
/// the integer bounds, and NaN becomes 0.
pub trait Element: Copy + Send + Sync + 'static {
    /// Runtime tag for this type.
    const ELEMENT_TYPE: ElementType;

    /// Widens to `f64`.
    fn to_f64(self) -> f64;

    /// Narrows from `f64`.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_element {
    ($($t:ty => $tag:ident),* $(,)?) => {
        $(
            impl Element for $t {
                const ELEMENT_TYPE: ElementType = ElementType::$tag;

                #[inline]
                fn to_f64(self) -> f64 {
                    <$t as AsPrimitive<f64>>::as_(self)
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    <f64 as AsPrimitive<$t>>::as_(value)
                }
            }
        )*
    };
}

impl_element!(
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    f32 => Single,
    f64 => Double,
);
