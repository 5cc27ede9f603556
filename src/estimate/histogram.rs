// Equal-width histograms and the binned-mode estimator
//
// Binning follows numpy.histogram: edges span [min, max], every bin is
// half-open except the last, which also takes the maximum. A constant series
// is binned over [v − 0.5, v + 0.5].

use crate::error::{AnalysisError, Result};
use crate::estimate::bins::{auto_bin_count, BinRule};
use crate::estimate::quantile::sorted_finite;

/// Equal-width histogram of a numeric series
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Sample count per bin
    pub counts: Vec<u64>,
    /// Bin edges (`counts.len() + 1` entries, ascending)
    pub edges: Vec<f64>,
}

impl Histogram {
    /// Histogram `values` into `bins` equal-width bins
    ///
    /// Non-finite values are ignored. A bin count of zero is treated as one.
    pub fn new(values: &[f64], bins: usize) -> Result<Self> {
        let sorted = sorted_finite(values);
        let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
            return Err(AnalysisError::EmptySeries);
        };

        let (lo, hi) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        Ok(Self::with_range(&sorted, bins, lo, hi))
    }

    /// Histogram over an explicit `[lo, hi]` range; values outside are dropped
    pub fn with_range(values: &[f64], bins: usize, lo: f64, hi: f64) -> Self {
        let bins = bins.max(1);
        let span = hi - lo;

        let step = span / bins as f64;

        let mut edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * step).collect();
        edges[bins] = hi;

        let mut counts = vec![0u64; bins];
        for &v in values {
            if !(lo..=hi).contains(&v) {
                continue;
            }
            counts[Self::bin_index(&edges, v)] += 1;
        }

        Self { counts, edges }
    }

    fn bin_index(edges: &[f64], v: f64) -> usize {
        let bins = edges.len() - 1;
        let lo = edges[0];
        let hi = edges[bins];

        let mut index = if hi > lo {
            (((v - lo) * bins as f64 / (hi - lo)) as usize).min(bins - 1)
        } else {
            0
        };

        // Rounding in the scaled index can land one bin off near an edge
        if index > 0 && v < edges[index] {
            index -= 1;
        } else if index + 1 < bins && v >= edges[index + 1] {
            index += 1;
        }
        index
    }

    /// Number of bins
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Width shared by all bins
    pub fn bin_width(&self) -> f64 {
        (self.edges[self.bins()] - self.edges[0]) / self.bins() as f64
    }

    /// Midpoint of bin `index`
    pub fn center(&self, index: usize) -> f64 {
        (self.edges[index] + self.edges[index + 1]) / 2.0
    }

    /// Largest bin count
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Index of the first bin holding [`Histogram::max_count`] samples
    pub fn mode_bin(&self) -> usize {
        let max = self.max_count();
        self.counts.iter().position(|&c| c == max).unwrap_or(0)
    }

    /// Total number of binned samples
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Center of the most populated bin of a `bins`-bin histogram
///
/// # Example
/// ```
/// use opcost::estimate::binned_mode;
///
/// let values = [1.0, 2.0, 2.1, 2.2, 2.3, 9.0];
/// let mode = binned_mode(&values, 4).unwrap();
/// assert_eq!(mode, 2.0);
/// ```
pub fn binned_mode(values: &[f64], bins: usize) -> Result<f64> {
    let histogram = Histogram::new(values, bins)?;
    Ok(histogram.center(histogram.mode_bin()))
}

/// Binned mode with an adaptively chosen bin count
///
/// This is the aggregate estimator behind the lookup table and the cost-model
/// fit.
pub fn agg_mode(values: &[f64], rule: &BinRule) -> Result<f64> {
    let bins = auto_bin_count(values, rule)?;
    binned_mode(values, bins)
}
