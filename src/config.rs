//! Analysis parameters
//!
//! Every threshold used by the pipelines lives here so that a run can be
//! reproduced from a single TOML file. Missing keys fall back to the
//! compiled-in defaults.

use crate::error::{AnalysisError, Result};
use crate::estimate::{BinRule, BinStrategy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration shared by every subcommand
///
/// # Example
/// ```
/// use opcost::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.lower_quantile, 0.05);
/// assert_eq!(config.upper_quantile, 0.95);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Lower quantile kept by the per-operation outlier trim
    pub lower_quantile: f64,

    /// Upper quantile kept by the per-operation outlier trim
    pub upper_quantile: f64,

    /// Rule used to pick the histogram bin count for binned-mode estimates
    pub bin_strategy: BinStrategy,

    /// Bin count used by [`BinStrategy::Fixed`]
    pub fixed_bins: usize,

    /// Upper bound on any adaptive bin count
    ///
    /// Freedman–Diaconis can ask for millions of bins when a narrow IQR meets
    /// a far outlier.
    pub max_bins: usize,

    /// Bins drawn per facet in the distribution report
    pub display_bins: usize,

    /// Largest input size included in the cost-model fit
    pub fit_max_input_size: u64,

    /// Largest input size drawn in the scaling report
    pub plot_max_input_size: u64,

    /// Facet columns in the distribution report
    pub distribution_columns: usize,

    /// Facet columns in the scaling report
    pub scaling_columns: usize,

    /// z-score of the confidence band in the scaling report (1.96 = 95%)
    pub confidence_z: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            lower_quantile: 0.05,
            upper_quantile: 0.95,
            bin_strategy: BinStrategy::FreedmanDiaconis,
            fixed_bins: 25,
            max_bins: 100_000,
            display_bins: 25,
            fit_max_input_size: 4096,
            plot_max_input_size: 32768,
            distribution_columns: 5,
            scaling_columns: 4,
            confidence_z: 1.96,
        }
    }
}

impl AnalysisConfig {
    /// Tighter trim (10th–90th percentile) for very noisy logs
    pub fn tight() -> Self {
        Self {
            lower_quantile: 0.10,
            upper_quantile: 0.90,
            ..Self::default()
        }
    }

    /// Load a configuration from a TOML file and validate it
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from TOML text and validate it
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Binning parameters for binned-mode estimates
    pub fn bin_rule(&self) -> BinRule {
        BinRule {
            strategy: self.bin_strategy,
            fixed_bins: self.fixed_bins,
            max_bins: self.max_bins,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(AnalysisError::InvalidConfig(msg));

        if !(0.0..=1.0).contains(&self.lower_quantile)
            || !(0.0..=1.0).contains(&self.upper_quantile)
        {
            return invalid(format!(
                "quantiles must be in [0, 1], got {} and {}",
                self.lower_quantile, self.upper_quantile
            ));
        }

        if self.lower_quantile >= self.upper_quantile {
            return invalid(format!(
                "lower_quantile ({}) must be below upper_quantile ({})",
                self.lower_quantile, self.upper_quantile
            ));
        }

        if self.fixed_bins == 0 || self.max_bins == 0 || self.display_bins == 0 {
            return invalid("bin counts must be at least 1".to_string());
        }

        if self.distribution_columns == 0 || self.scaling_columns == 0 {
            return invalid("facet column counts must be at least 1".to_string());
        }

        if self.confidence_z.is_nan() || self.confidence_z <= 0.0 {
            return invalid(format!(
                "confidence_z must be positive, got {}",
                self.confidence_z
            ));
        }

        Ok(())
    }
}
