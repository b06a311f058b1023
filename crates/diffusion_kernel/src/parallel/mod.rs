//! Rayon-based parallel line solves.
//!
//! Lines of one axis pass are independent: each reads its own line of the
//! input and produces its own line of output. The helpers here solve all
//! lines of a pass concurrently into a line-major staging buffer, which
//! the caller then writes back in order. The output volume itself is only
//! ever written from one thread.
//!
//! # Memory
//!
//! The staging buffer holds one `f64` per volume element for the duration
//! of a pass.

use diffusion_core::math::TridiagonalSystem;
use diffusion_core::types::Element;
use diffusion_core::volume::{Axis, StridedVolume};
use rayon::prelude::*;

/// Solves every line along `axis` in parallel.
///
/// Returns a buffer of `shape.line_count(axis)` consecutive lines of
/// `shape.len(axis)` elements, in the order of
/// [`VolumeShape::lines`](diffusion_core::volume::VolumeShape::lines).
///
/// # Panics
///
/// Panics if `system.len()` differs from the length of the axis.
pub fn solve_lines<T: Element>(
    input: &StridedVolume<'_, T>,
    axis: Axis,
    system: &TridiagonalSystem,
) -> Vec<f64> {
    let shape = input.shape();
    let len = shape.len(axis);
    let mut staged = vec![0.0; shape.line_count(axis) * len];

    staged
        .par_chunks_mut(len)
        .enumerate()
        .for_each(|(ordinal, line)| {
            input.extract_into(axis, shape.fixed_pair(axis, ordinal), line);
            system.solve_in_place(line);
        });

    staged
}
