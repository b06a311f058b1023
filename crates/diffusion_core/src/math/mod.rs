//! Numerical building blocks.
//!
//! ## Available Solvers
//!
//! - [`TridiagonalSystem`]: Thomas algorithm with a reusable decomposition
//!   and an allocation-free in-place solve
//!
//! ## Examples
//!
//! ```
//! use diffusion_core::math::TridiagonalSystem;
//!
//! let system = TridiagonalSystem::decompose(&[4.0, 4.0], &[1.0], &[1.0]).unwrap();
//!
//! // One decomposition, many right-hand sides
//! for d in [[5.0, 5.0], [4.0, 1.0]] {
//!     let y = system.solve(&d);
//!     assert!((4.0 * y[0] + y[1] - d[0]).abs() < 1e-12);
//! }
//! ```

pub mod tridiagonal;

pub use tridiagonal::TridiagonalSystem;
