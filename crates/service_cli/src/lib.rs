//! Host library behind the `aosdiff` binary.
//!
//! Loads raw volumes, dispatches on their element tag and runs one AOS
//! diffusion step per invocation.

pub mod commands;
pub mod config;
pub mod error;

pub use error::{CliError, Result};

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
