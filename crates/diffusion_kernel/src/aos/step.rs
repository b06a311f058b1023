//! One AOS linear diffusion step over a 3D volume.
//!
//! The step runs three passes in the fixed order plane, column, row. Each
//! pass decomposes the axis system once, then for every line along the
//! axis extracts the line from the *input*, solves it, and writes it into
//! the output. The plane pass assigns; the column and row passes
//! accumulate on top of it.
//!
//! # Normalisation
//!
//! The output is the plain sum of the three line solves. Each axis system
//! carries the factor 3 on its main diagonal, so every solve already
//! yields one third of `(I - 3 dt A_axis)^-1 u` and the sum equals the AOS
//! average. No further division is applied.

use diffusion_core::math::TridiagonalSystem;
use diffusion_core::types::Element;
use diffusion_core::volume::{Axis, StridedVolume, StridedVolumeMut, Volume};
use tracing::{debug, info_span, warn};

use super::coefficients::axis_system;
use super::config::AosConfig;
use super::workspace::LineWorkspace;
use crate::error::AosError;

/// How a pass writes its solved lines into the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineWrite {
    Assign,
    Accumulate,
}

impl LineWrite {
    #[inline]
    fn apply(
        self,
        output: &mut StridedVolumeMut<'_, f64>,
        axis: Axis,
        pair: (usize, usize),
        values: &[f64],
    ) {
        match self {
            LineWrite::Assign => output.assign(axis, pair, values),
            LineWrite::Accumulate => output.accumulate(axis, pair, values),
        }
    }
}

/// AOS diffusion engine.
///
/// Holds only configuration; every call builds its axis systems and
/// scratch buffers afresh and retains nothing afterwards.
///
/// # Examples
///
/// ```rust
/// use diffusion_core::volume::{Volume, VolumeShape};
/// use diffusion_kernel::aos::{AosConfig, AosDiffusion};
///
/// let shape = VolumeShape::new([8, 8, 4]).unwrap();
/// let input = Volume::from_fn(shape, |i0, _, _| if i0 < 4 { 0u8 } else { 90u8 });
///
/// let engine = AosDiffusion::new(AosConfig::serial());
/// let output = engine.step(&input.view(), 0.5).unwrap();
///
/// // The edge between the two halves is smoothed
/// assert!(output.get(3, 0, 0) > 0.0);
/// assert!(output.get(4, 0, 0) < 90.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AosDiffusion {
    config: AosConfig,
}

impl AosDiffusion {
    /// Creates an engine with the given configuration.
    pub fn new(config: AosConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &AosConfig {
        &self.config
    }

    /// Runs one step and returns a freshly allocated `f64` output volume.
    ///
    /// # Errors
    ///
    /// See [`step_into`](Self::step_into).
    pub fn step<T: Element>(
        &self,
        input: &StridedVolume<'_, T>,
        delta_t: f64,
    ) -> Result<Volume<f64>, AosError> {
        let mut output = Volume::zeros(input.shape());
        self.step_into(input, delta_t, &mut output.view_mut())?;
        Ok(output)
    }

    /// Runs one step, writing into `output`.
    ///
    /// Every output element is overwritten by the plane pass, so `output`
    /// need not be zeroed. The input is never mutated. Negative `delta_t`
    /// is accepted (anti-diffusion) and logged.
    ///
    /// All three axis systems are decomposed before the first write, so a
    /// failing decomposition leaves `output` untouched.
    ///
    /// # Errors
    ///
    /// * `AosError::InvalidConfig` - the configuration fails validation
    /// * `AosError::ShapeMismatch` - input and output dimensions differ
    /// * `AosError::Solver` - an axis system has a zero or non-finite pivot
    pub fn step_into<T: Element>(
        &self,
        input: &StridedVolume<'_, T>,
        delta_t: f64,
        output: &mut StridedVolumeMut<'_, f64>,
    ) -> Result<(), AosError> {
        self.config.validate()?;

        let shape = input.shape();
        if shape != output.shape() {
            return Err(AosError::ShapeMismatch {
                input: shape.dims(),
                output: output.shape().dims(),
            });
        }

        let _span = info_span!(
            "aos_step",
            dims = ?shape.dims(),
            delta_t,
            element = %T::ELEMENT_TYPE
        )
        .entered();

        if delta_t < 0.0 {
            warn!(delta_t, "negative time increment: step is anti-diffusive");
        }

        let systems = Axis::AOS_ORDER
            .iter()
            .map(|&axis| axis_system(delta_t, axis, shape.len(axis)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut workspace = LineWorkspace::new(shape.max_len());

        for (pass, (&axis, system)) in Axis::AOS_ORDER.iter().zip(&systems).enumerate() {
            let write = if pass == 0 {
                LineWrite::Assign
            } else {
                LineWrite::Accumulate
            };
            let lines = shape.line_count(axis);
            let parallel = self.runs_parallel(lines);

            debug!(%axis, len = shape.len(axis), lines, parallel, "axis pass");

            if parallel {
                parallel_pass(input, output, axis, system, write);
            } else {
                serial_pass(input, output, axis, system, write, &mut workspace);
            }
        }

        Ok(())
    }

    #[inline]
    fn runs_parallel(&self, lines: usize) -> bool {
        cfg!(feature = "parallel")
            && self.config.parallel()
            && lines >= self.config.parallel_threshold()
    }
}

/// Runs one step with the default configuration.
///
/// # Examples
///
/// ```rust
/// use diffusion_core::volume::{Volume, VolumeShape};
/// use diffusion_kernel::aos::linear_diffusion_aos;
///
/// let shape = VolumeShape::new([1, 1, 1]).unwrap();
/// let input = Volume::filled(shape, 42i32);
/// let output = linear_diffusion_aos(&input.view(), 10.0).unwrap();
///
/// assert!((output.get(0, 0, 0) - 42.0).abs() < 1e-12);
/// ```
pub fn linear_diffusion_aos<T: Element>(
    input: &StridedVolume<'_, T>,
    delta_t: f64,
) -> Result<Volume<f64>, AosError> {
    AosDiffusion::default().step(input, delta_t)
}

fn serial_pass<T: Element>(
    input: &StridedVolume<'_, T>,
    output: &mut StridedVolumeMut<'_, f64>,
    axis: Axis,
    system: &TridiagonalSystem,
    write: LineWrite,
    workspace: &mut LineWorkspace,
) {
    let shape = input.shape();
    let line = workspace.line_mut(shape.len(axis));
    for pair in shape.lines(axis) {
        input.extract_into(axis, pair, line);
        system.solve_in_place(line);
        write.apply(output, axis, pair, line);
    }
}

/// Solves every line of the pass on the rayon pool into a line-major
/// staging buffer, then writes the staged lines back in line order.
///
/// Each staged chunk is the private scratch of the worker solving it.
/// Write-back follows the serial line order, so results are bit-identical
/// to [`serial_pass`].
#[cfg(feature = "parallel")]
fn parallel_pass<T: Element>(
    input: &StridedVolume<'_, T>,
    output: &mut StridedVolumeMut<'_, f64>,
    axis: Axis,
    system: &TridiagonalSystem,
    write: LineWrite,
) {
    let shape = input.shape();
    let staged = crate::parallel::solve_lines(input, axis, system);
    write_back(&shape, output, axis, &staged, write);
}

#[cfg(not(feature = "parallel"))]
fn parallel_pass<T: Element>(
    input: &StridedVolume<'_, T>,
    output: &mut StridedVolumeMut<'_, f64>,
    axis: Axis,
    system: &TridiagonalSystem,
    write: LineWrite,
) {
    let mut workspace = LineWorkspace::new(input.shape().len(axis));
    serial_pass(input, output, axis, system, write, &mut workspace);
}

#[cfg(feature = "parallel")]
fn write_back(
    shape: &diffusion_core::volume::VolumeShape,
    output: &mut StridedVolumeMut<'_, f64>,
    axis: Axis,
    staged: &[f64],
    write: LineWrite,
) {
    for (ordinal, line) in staged.chunks_exact(shape.len(axis)).enumerate() {
        write.apply(output, axis, shape.fixed_pair(axis, ordinal), line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use diffusion_core::volume::VolumeShape;

    fn shape(dims: [usize; 3]) -> VolumeShape {
        VolumeShape::new(dims).unwrap()
    }

    #[test]
    fn test_single_voxel_unchanged() {
        let input = Volume::filled(shape([1, 1, 1]), 7.5_f64);
        let output = AosDiffusion::default().step(&input.view(), 3.0).unwrap();
        assert_relative_eq!(output.get(0, 0, 0), 7.5, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_delta_t_reproduces_input() {
        let input = Volume::from_fn(shape([4, 3, 2]), |i0, i1, i2| (i0 * 7 + i1 * 3 + i2) as i16 - 9);
        let output = AosDiffusion::default().step(&input.view(), 0.0).unwrap();
        for (out, &inp) in output.as_slice().iter().zip(input.as_slice()) {
            assert_relative_eq!(*out, inp as f64, epsilon = 1e-12, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_shape_mismatch() {
        let input = Volume::filled(shape([2, 2, 2]), 1u8);
        let mut output = Volume::zeros(shape([2, 2, 3]));
        let err = AosDiffusion::default()
            .step_into(&input.view(), 0.1, &mut output.view_mut())
            .unwrap_err();
        assert_eq!(
            err,
            AosError::ShapeMismatch {
                input: [2, 2, 2],
                output: [2, 2, 3]
            }
        );
    }

    #[test]
    fn test_singular_axis_leaves_output_untouched() {
        // delta_t = -1/3 zeroes the leading pivot of every axis longer than 1.
        let input = Volume::filled(shape([3, 3, 3]), 1.0_f64);
        let mut output = Volume::filled(shape([3, 3, 3]), -5.0_f64);
        let err = AosDiffusion::default()
            .step_into(&input.view(), -1.0 / 3.0, &mut output.view_mut())
            .unwrap_err();

        assert!(matches!(err, AosError::Solver { axis: Axis::Plane, .. }));
        assert!(output.as_slice().iter().all(|&v| v == -5.0));
    }

    #[test]
    fn test_output_need_not_be_zeroed() {
        let input = Volume::from_fn(shape([3, 2, 2]), |i0, i1, i2| (i0 + i1 + i2) as f32);
        let engine = AosDiffusion::new(AosConfig::serial());

        let fresh = engine.step(&input.view(), 0.2).unwrap();
        let mut dirty = Volume::filled(input.shape(), 1e9);
        engine
            .step_into(&input.view(), 0.2, &mut dirty.view_mut())
            .unwrap();

        assert_eq!(fresh, dirty);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let data: Vec<u16> = (0..24).collect();
        let volume = Volume::from_vec(data.clone(), shape([2, 3, 4])).unwrap();
        let _ = AosDiffusion::default().step(&volume.view(), 1.0).unwrap();
        assert_eq!(volume.as_slice(), data.as_slice());
    }

    #[test]
    fn test_serial_and_parallel_paths_identical() {
        let input = Volume::from_fn(shape([9, 7, 5]), |i0, i1, i2| {
            ((i0 * 31 + i1 * 17 + i2 * 7) % 23) as u8
        });
        let serial = AosDiffusion::new(AosConfig::serial())
            .step(&input.view(), 0.75)
            .unwrap();
        let parallel_config = AosConfig::builder()
            .parallel(true)
            .parallel_threshold(1)
            .build()
            .unwrap();
        let parallel = AosDiffusion::new(parallel_config)
            .step(&input.view(), 0.75)
            .unwrap();

        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_line_write_modes() {
        let mut data = vec![1.0_f64; 4];
        let mut view = StridedVolumeMut::new(&mut data, shape([4, 1, 1])).unwrap();
        LineWrite::Accumulate.apply(&mut view, Axis::Row, (0, 0), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(view.as_view().extract(Axis::Row, (0, 0)), vec![2.0, 3.0, 4.0, 5.0]);
        LineWrite::Assign.apply(&mut view, Axis::Row, (0, 0), &[0.0; 4]);
        assert_eq!(data, vec![0.0; 4]);
    }
}
