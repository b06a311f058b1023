//! # diffusion_core: Foundation for AOS Volume Diffusion
//!
//! ## Layer 1 (Foundation) Role
//!
//! diffusion_core serves as the bottom layer of the workspace, providing:
//! - Element types and the runtime element tag (`types::element`)
//! - Volume shapes and strided line views (`volume`)
//! - The Thomas tridiagonal solver (`math::tridiagonal`)
//! - Error types: `ElementTypeError`, `VolumeError`, `TridiagonalError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates, with minimal external dependencies:
//! - num-traits: Primitive widening and narrowing casts
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use diffusion_core::math::TridiagonalSystem;
//! use diffusion_core::volume::{Axis, Volume, VolumeShape};
//!
//! let shape = VolumeShape::new([4, 1, 1]).unwrap();
//! let volume = Volume::from_vec(vec![3u8, 6, 9, 12], shape).unwrap();
//!
//! // Solve 3 y = d along the row axis
//! let system = TridiagonalSystem::decompose(&[3.0; 4], &[0.0; 3], &[0.0; 3]).unwrap();
//! let d = volume.view().extract(Axis::Row, (0, 0));
//! assert_eq!(system.solve(&d), vec![1.0, 2.0, 3.0, 4.0]);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `ElementType`, `Axis` and `TridiagonalError`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
pub mod volume;
