//! Check command implementation
//!
//! Reports supported element types, the host's CPU count and the
//! effective configuration.

use diffusion_core::types::ElementType;
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Element type entry of the check report.
#[derive(Debug, Clone, Serialize)]
pub struct ElementTypeInfo {
    /// Tag name
    pub name: &'static str,
    /// Width in bytes
    pub size_in_bytes: usize,
}

/// Output of the `check` command.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Crate version
    pub version: &'static str,
    /// Logical CPUs available for parallel passes
    pub num_cpus: usize,
    /// Supported input element types
    pub element_types: Vec<ElementTypeInfo>,
    /// Effective configuration
    pub config: CliConfig,
}

/// Run the check command
pub fn run(config: &CliConfig) -> Result<CheckReport> {
    info!("Checking system configuration...");

    let report = CheckReport {
        version: crate::VERSION,
        num_cpus: num_cpus::get(),
        element_types: ElementType::ALL
            .iter()
            .map(|t| ElementTypeInfo {
                name: t.name(),
                size_in_bytes: t.size_in_bytes(),
            })
            .collect(),
        config: config.clone(),
    };

    info!(
        num_cpus = report.num_cpus,
        parallel = config.kernel.parallel(),
        "System check complete"
    );
    Ok(report)
}
