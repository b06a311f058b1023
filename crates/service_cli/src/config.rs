//! `aosdiff` configuration management
//!
//! Handles loading configuration from TOML files, environment variables
//! and CLI arguments.
//!
//! # File format
//!
//! ```toml
//! log_level = "debug"
//!
//! [kernel]
//! parallel = true
//! parallel_threshold = 64
//! ```

use diffusion_kernel::error::AosError;
use diffusion_kernel::AosConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "AOSDIFF_LOG_LEVEL";
/// Environment variable enabling or disabling parallel line solves.
pub const ENV_PARALLEL: &str = "AOSDIFF_PARALLEL";
/// Environment variable overriding the parallel line threshold.
pub const ENV_PARALLEL_THRESHOLD: &str = "AOSDIFF_PARALLEL_THRESHOLD";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// A value could not be parsed.
    #[error("Invalid value for {name}: {value}")]
    InvalidValue {
        /// Setting name
        name: &'static str,
        /// Rejected raw value
        value: String,
    },

    /// Reading or parsing the config file failed.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// The kernel rejected the configuration.
    #[error(transparent)]
    Kernel(#[from] AosError),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Per-axis system details
    Trace,
    /// Per-pass progress
    Debug,
    /// Command progress
    #[default]
    Info,
    /// Warnings only
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Kernel scheduling options
    pub kernel: AosConfig,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl CliConfig {
    /// Create a new CliConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Apply `AOSDIFF_*` overrides read through `lookup`.
    ///
    /// Unset variables leave the current value in place.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }

        let mut kernel = self.kernel.to_builder();
        if let Some(parallel) = lookup(ENV_PARALLEL) {
            kernel = kernel.parallel(parse_bool(ENV_PARALLEL, &parallel)?);
        }
        if let Some(threshold) = lookup(ENV_PARALLEL_THRESHOLD) {
            let threshold = threshold
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    name: ENV_PARALLEL_THRESHOLD,
                    value: threshold.clone(),
                })?;
            kernel = kernel.parallel_threshold(threshold);
        }
        self.kernel = kernel.build()?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.kernel.validate()?;
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        } else if cli.verbose {
            self.log_level = LogLevel::Debug;
        }

        let mut kernel = self.kernel.to_builder();
        if let Some(parallel) = cli.parallel {
            kernel = kernel.parallel(parallel);
        }
        if let Some(threshold) = cli.parallel_threshold {
            kernel = kernel.parallel_threshold(threshold);
        }
        self.kernel = kernel.build()?;

        Ok(())
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        }),
    }
}

/// CLI arguments relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Raise the log level to debug unless one is given explicitly
    pub verbose: bool,
    /// Parallel line solves override
    pub parallel: Option<bool>,
    /// Parallel line threshold override
    pub parallel_threshold: Option<usize>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    let mut config = if let Some(config_path) = &cli.config_file {
        CliConfig::from_file(config_path)?
    } else {
        CliConfig::default()
    };

    config.apply_env(|name| std::env::var(name).ok())?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}
