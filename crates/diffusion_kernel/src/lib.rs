//! # diffusion_kernel: AOS Linear Diffusion
//!
//! ## Layer 2 (Kernel) Role
//!
//! diffusion_kernel builds on [`diffusion_core`] and provides:
//! - The 1D AOS coefficient builder and per-axis systems (`aos::coefficients`)
//! - One AOS diffusion step over a 3D volume (`aos::AosDiffusion`)
//! - Runtime element-type dispatch for host buffers (`dispatch`)
//! - Error types: `AosError`, `DispatchError` (`error`)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         diffusion_kernel (L2)           │
//! ├─────────────────────────────────────────┤
//! │  aos/       - coefficients, step,       │
//! │               config, workspace         │
//! │  dispatch   - tagged host buffers       │
//! │  parallel/  - rayon line solves         │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │          diffusion_core (L1)            │
//! │  Volume views, Thomas solver, elements  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage Examples
//!
//! ```rust
//! use diffusion_core::volume::{Volume, VolumeShape};
//! use diffusion_kernel::aos::linear_diffusion_aos;
//!
//! let shape = VolumeShape::new([16, 16, 16]).unwrap();
//! let input = Volume::filled(shape, 100u8);
//!
//! // A constant field is a fixed point of the step
//! let output = linear_diffusion_aos(&input.view(), 2.5).unwrap();
//! assert!(output.as_slice().iter().all(|&v| (v - 100.0).abs() < 1e-9));
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Solve the lines of each axis pass on the rayon pool
//! - `serde`: Enable serialisation for `AosConfig`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod aos;
pub mod dispatch;
pub mod error;
#[cfg(feature = "parallel")]
pub mod parallel;

pub use aos::{linear_diffusion_aos, AosConfig, AosDiffusion};
pub use dispatch::{diffuse, diffuse_tagged, VolumeBuffer, VolumeData};
pub use error::{AosError, DispatchError};
