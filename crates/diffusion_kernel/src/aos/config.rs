//! AOS kernel configuration.
//!
//! This module provides [`AosConfig`] and its builder. The configuration
//! only steers how line solves are scheduled; it never changes results.

use crate::error::AosError;

/// Default minimum number of lines in a pass before solving in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Configuration for [`AosDiffusion`](super::AosDiffusion).
///
/// # Examples
///
/// ```rust
/// use diffusion_kernel::aos::AosConfig;
///
/// let config = AosConfig::builder()
///     .parallel(false)
///     .parallel_threshold(128)
///     .build()
///     .expect("valid configuration");
///
/// assert!(!config.parallel());
/// assert_eq!(config.parallel_threshold(), 128);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AosConfig {
    /// Solve the lines of a pass on the rayon pool.
    parallel: bool,
    /// Minimum line count of a pass before going parallel.
    parallel_threshold: usize,
}

impl Default for AosConfig {
    fn default() -> Self {
        Self {
            parallel: cfg!(feature = "parallel"),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl AosConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> AosConfigBuilder {
        AosConfigBuilder::default()
    }

    /// Returns a builder seeded with this configuration's values.
    pub fn to_builder(&self) -> AosConfigBuilder {
        AosConfigBuilder {
            parallel: Some(self.parallel),
            parallel_threshold: Some(self.parallel_threshold),
        }
    }

    /// Returns a configuration that always solves serially.
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Returns whether parallel line solves are requested.
    ///
    /// Without the `parallel` feature this flag is ignored.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Returns the minimum line count for a parallel pass.
    #[inline]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// `AosError::InvalidConfig` if `parallel_threshold == 0`.
    pub fn validate(&self) -> Result<(), AosError> {
        if self.parallel_threshold == 0 {
            return Err(AosError::InvalidConfig {
                name: "parallel_threshold",
                reason: "must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`AosConfig`].
#[derive(Clone, Debug, Default)]
pub struct AosConfigBuilder {
    parallel: Option<bool>,
    parallel_threshold: Option<usize>,
}

impl AosConfigBuilder {
    /// Enables or disables parallel line solves.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Sets the minimum line count for a parallel pass.
    #[inline]
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = Some(threshold);
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<AosConfig, AosError> {
        let defaults = AosConfig::default();
        let config = AosConfig {
            parallel: self.parallel.unwrap_or(defaults.parallel),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(defaults.parallel_threshold),
        };
        config.validate()?;
        Ok(config)
    }
}
