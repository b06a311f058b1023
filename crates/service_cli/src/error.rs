//! CLI error types.

use diffusion_kernel::DispatchError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `aosdiff` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A command-line argument could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The diffusion step was rejected or failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Reading or writing a volume file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialisation failed.
    #[error("Serialisation error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
