// Percentile computation and quantile-based outlier trimming
//
// Percentiles use linear interpolation between closest ranks (R-7), the same
// definition as numpy's default `linear` method and pandas' `quantile`.

use crate::error::{AnalysisError, Result};

/// Copy the finite values of `values` into ascending order
pub fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Calculate the `q`-quantile (0.0..=1.0) of already sorted data
///
/// # Example
/// ```
/// use opcost::estimate::percentile;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile(&sorted, 0.5).unwrap(), 2.5);
/// assert_eq!(percentile(&sorted, 0.0).unwrap(), 1.0);
/// ```
pub fn percentile(sorted: &[f64], q: f64) -> Result<f64> {
    if sorted.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }
    if sorted.len() == 1 {
        return Ok(sorted[0]);
    }

    let q = q.clamp(0.0, 1.0);
    let index = q * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        Ok(sorted[lower])
    } else {
        let weight = index - lower as f64;
        Ok(sorted[lower] + weight * (sorted[upper] - sorted[lower]))
    }
}

/// Lower and upper quantile values of an unsorted series
///
/// Interpolated bounds can fall strictly between two adjacent samples (two
/// distinct values with a 5–95 range, for instance). The range then collapses
/// onto the sample nearest its midpoint, the lower one on a tie, so that at
/// least one sample always lies inside.
pub fn quantile_bounds(values: &[f64], lower: f64, upper: f64) -> Result<(f64, f64)> {
    let sorted = sorted_finite(values);
    let lo = percentile(&sorted, lower)?;
    let hi = percentile(&sorted, upper)?;

    let first_inside = sorted.partition_point(|&v| v < lo);
    if sorted.get(first_inside).is_some_and(|&v| v <= hi) {
        return Ok((lo, hi));
    }

    let mid = (lo + hi) / 2.0;
    let nearest = sorted
        .iter()
        .copied()
        .min_by(|a, b| (a - mid).abs().total_cmp(&(b - mid).abs()))
        .unwrap_or(mid);
    Ok((nearest, nearest))
}

/// Keep the values lying inside the `[lower, upper]` quantile range
///
/// Both bounds are inclusive and the input order is preserved. A non-empty
/// series never trims to nothing (see [`quantile_bounds`]).
pub fn trim_to_quantiles(values: &[f64], lower: f64, upper: f64) -> Result<Vec<f64>> {
    let (lo, hi) = quantile_bounds(values, lower, upper)?;
    Ok(values
        .iter()
        .copied()
        .filter(|v| (lo..=hi).contains(v))
        .collect())
}
