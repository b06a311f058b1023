//! Diffuse command implementation
//!
//! Reads a raw little-endian volume, runs exactly one AOS diffusion step
//! on it and writes the result as little-endian `f64`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use diffusion_core::volume::VolumeShape;
use diffusion_kernel::dispatch::{diffuse, VolumeBuffer};
use diffusion_kernel::{AosDiffusion, DispatchError};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Arguments of one `diffuse` invocation.
#[derive(Debug, Clone)]
pub struct DiffuseArgs {
    /// Raw input volume
    pub input: PathBuf,
    /// Destination of the `f64` result
    pub output: PathBuf,
    /// Volume dimensions `[D0, D1, D2]`
    pub dims: [usize; 3],
    /// Element type tag of the input
    pub element_type: String,
    /// Time increment
    pub delta_t: f64,
}

/// Summary statistics of a finished step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffuseSummary {
    /// Number of voxels
    pub elements: usize,
    /// Smallest output value
    pub min: f64,
    /// Largest output value
    pub max: f64,
    /// Mean output value
    pub mean: f64,
}

impl DiffuseSummary {
    fn of(values: &[f64]) -> Self {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Self {
            elements: values.len(),
            min,
            max,
            mean,
        }
    }
}

/// Parse `D0,D1,D2` (also accepts `x` as separator).
pub fn parse_dims(s: &str) -> Result<[usize; 3]> {
    let parts: Vec<&str> = s.split([',', 'x']).map(str::trim).collect();
    if parts.len() != 3 {
        return Err(CliError::InvalidArgument(format!(
            "Expected three dimensions D0,D1,D2, got: {}",
            s
        )));
    }

    let mut dims = [0usize; 3];
    for (dim, part) in dims.iter_mut().zip(&parts) {
        *dim = part
            .parse()
            .map_err(|_| CliError::InvalidArgument(format!("Invalid dimension: {}", part)))?;
    }
    Ok(dims)
}

/// Run the diffuse command
pub fn run(config: &CliConfig, args: &DiffuseArgs) -> Result<DiffuseSummary> {
    info!("Starting diffusion step...");
    info!("  Input: {}", args.input.display());
    info!("  Dimensions: {:?}", args.dims);
    info!("  Element type: {}", args.element_type);
    info!("  Time increment: {}", args.delta_t);

    if !args.input.exists() {
        return Err(CliError::FileNotFound(args.input.display().to_string()));
    }

    let shape = VolumeShape::new(args.dims).map_err(DispatchError::from)?;
    let bytes = std::fs::read(&args.input)?;
    let buffer = VolumeBuffer::from_le_bytes(&args.element_type, &bytes)?;

    let engine = AosDiffusion::new(config.kernel);
    let mut output = vec![0.0; shape.num_elements()];

    let started = Instant::now();
    diffuse(&engine, buffer.as_data(), args.dims, args.delta_t, &mut output)?;
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "Step complete");

    write_f64_le(&args.output, &output)?;
    info!("  Output: {}", args.output.display());

    Ok(DiffuseSummary::of(&output))
}

/// Write `values` as consecutive little-endian `f64`.
pub fn write_f64_le(path: &Path, values: &[f64]) -> Result<()> {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    std::fs::write(path, bytes)?;
    Ok(())
}
