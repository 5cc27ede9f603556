// Adaptive histogram bin-count selection
//
// Freedman–Diaconis is the default: its width scales with the IQR, so a few
// extreme samples do not flatten the histogram the way a range-based rule
// would.

use crate::error::{AnalysisError, Result};
use crate::estimate::quantile::{percentile, sorted_finite};
use serde::{Deserialize, Serialize};

/// Rule for choosing a histogram bin count
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BinStrategy {
    /// Freedman–Diaconis: width = 2·IQR·n^(−1/3)
    #[default]
    #[serde(rename = "fd")]
    #[value(name = "fd")]
    FreedmanDiaconis,
    /// Sturges: ⌈log2 n⌉ + 1
    Sturges,
    /// Square root: ⌈√n⌉
    Sqrt,
    /// Constant bin count
    Fixed,
}

/// Bin-count strategy together with its limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinRule {
    pub strategy: BinStrategy,
    /// Count returned by [`BinStrategy::Fixed`]
    pub fixed_bins: usize,
    /// Upper bound applied to every strategy
    pub max_bins: usize,
}

impl Default for BinRule {
    fn default() -> Self {
        Self {
            strategy: BinStrategy::FreedmanDiaconis,
            fixed_bins: 25,
            max_bins: 100_000,
        }
    }
}

impl BinRule {
    /// Rule with the default limits and the given strategy
    pub fn with_strategy(strategy: BinStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}

fn sturges(n: usize) -> usize {
    (n as f64).log2().ceil() as usize + 1
}

fn square_root(n: usize) -> usize {
    ((n as f64).sqrt().ceil() as usize).max(1)
}

fn freedman_diaconis(sorted: &[f64]) -> Result<usize> {
    let n = sorted.len();
    let iqr = percentile(sorted, 0.75)? - percentile(sorted, 0.25)?;
    let width = 2.0 * iqr / (n as f64).cbrt();
    let range = sorted[n - 1] - sorted[0];

    if range <= 0.0 {
        return Ok(1);
    }
    if !(width.is_finite() && width > 0.0) {
        // More than half the samples share one value; the IQR carries no
        // information about spread.
        tracing::debug!(n, range, "zero IQR, falling back to Sturges");
        return Ok(sturges(n));
    }

    let bins = (range / width).ceil();
    if bins >= usize::MAX as f64 {
        Ok(usize::MAX)
    } else {
        Ok((bins as usize).max(1))
    }
}

/// Choose a histogram bin count for `values`
///
/// Non-finite values are ignored. The result is always in `1..=max_bins`.
///
/// # Example
/// ```
/// use opcost::estimate::{auto_bin_count, BinRule, BinStrategy};
///
/// let values: Vec<f64> = (1..=100).map(f64::from).collect();
/// // IQR = 49.5, width = 99 / 100^(1/3) ≈ 21.33, range = 99
/// assert_eq!(auto_bin_count(&values, &BinRule::default()).unwrap(), 5);
/// assert_eq!(auto_bin_count(&values, &BinRule::with_strategy(BinStrategy::Sturges)).unwrap(), 8);
/// ```
pub fn auto_bin_count(values: &[f64], rule: &BinRule) -> Result<usize> {
    let sorted = sorted_finite(values);
    if sorted.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }

    let bins = match rule.strategy {
        BinStrategy::FreedmanDiaconis => freedman_diaconis(&sorted)?,
        BinStrategy::Sturges => sturges(sorted.len()),
        BinStrategy::Sqrt => square_root(sorted.len()),
        BinStrategy::Fixed => rule.fixed_bins,
    };

    Ok(bins.clamp(1, rule.max_bins.max(1)))
}
