// Descriptive summaries used by the reports
//
// Mean, spread and extrema go through trueno's SIMD vectors and the median
// through aprender's DescriptiveStats, as single-precision statistics. They
// only position plot markers; the binned mode that feeds the lookup table is
// computed in f64.

use crate::error::{AnalysisError, Result};
use crate::estimate::bins::BinRule;
use crate::estimate::histogram::agg_mode;
use crate::estimate::quantile::{percentile, sorted_finite};
use aprender::stats::DescriptiveStats;
use serde::Serialize;
use trueno::Vector;

/// Central tendency and spread of one operation's samples
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub binned_mode: f64,
}

impl Summary {
    /// Summarize the finite values of `values`
    pub fn of(values: &[f64], rule: &BinRule) -> Result<Self> {
        let sorted = sorted_finite(values);
        if sorted.is_empty() {
            return Err(AnalysisError::EmptySeries);
        }

        let single: Vec<f32> = sorted.iter().map(|&v| v as f32).collect();
        let v = Vector::from_slice(&single);

        let mean = f64::from(v.mean().unwrap_or(0.0));
        let stddev = f64::from(v.stddev().unwrap_or(0.0));
        let min = f64::from(v.min().unwrap_or(single[0]));
        let max = f64::from(v.max().unwrap_or(single[single.len() - 1]));

        let median = DescriptiveStats::new(&v)
            .quantile(0.5)
            .map(f64::from)
            .or_else(|_| percentile(&sorted, 0.5))?;

        Ok(Self {
            count: sorted.len(),
            mean,
            stddev,
            min,
            max,
            median,
            binned_mode: agg_mode(&sorted, rule)?,
        })
    }
}

/// Sample mean with a normal-approximation confidence interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeanInterval {
    pub count: usize,
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
}

impl MeanInterval {
    /// `mean ± z·s/√n` with the sample (n − 1) standard deviation
    ///
    /// A single sample yields a zero-width interval.
    pub fn of(values: &[f64], z: f64) -> Result<Self> {
        let finite = sorted_finite(values);
        let n = finite.len();
        if n == 0 {
            return Err(AnalysisError::EmptySeries);
        }

        let (mean, var) = mean_and_sample_variance(&finite);
        let half_width = if n < 2 {
            0.0
        } else {
            z * var.sqrt() / (n as f64).sqrt()
        };

        Ok(Self {
            count: n,
            mean,
            lower: mean - half_width,
            upper: mean + half_width,
        })
    }
}

/// Mean and (n − 1) variance of finite values; the variance is 0 below two
fn mean_and_sample_variance(finite: &[f64]) -> (f64, f64) {
    let n = finite.len();
    let mean = finite.iter().sum::<f64>() / n.max(1) as f64;
    if n < 2 {
        return (mean, 0.0);
    }
    let var = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    (mean, var)
}

/// Scott's rule kernel bandwidth `σ·n^(−1/5)`
///
/// Returns `None` when fewer than two finite samples are given or they have
/// no spread.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    bandwidth_of_finite(&sorted_finite(values))
}

fn bandwidth_of_finite(finite: &[f64]) -> Option<f64> {
    let n = finite.len();
    if n < 2 {
        return None;
    }
    let (_, var) = mean_and_sample_variance(finite);
    let bw = var.sqrt() * (n as f64).powf(-0.2);
    (bw > 0.0 && bw.is_finite()).then_some(bw)
}

/// Gaussian kernel density of `values` evaluated at each point of `grid`
///
/// Non-finite values are ignored. Empty when the bandwidth is undefined (see
/// [`scott_bandwidth`]).
pub fn gaussian_kde(values: &[f64], grid: &[f64]) -> Vec<f64> {
    let finite = sorted_finite(values);
    let Some(bw) = bandwidth_of_finite(&finite) else {
        return Vec::new();
    };
    let norm = 1.0 / (finite.len() as f64 * bw * (2.0 * std::f64::consts::PI).sqrt());

    grid.iter()
        .map(|&x| {
            finite
                .iter()
                .map(|&xi| {
                    let u = (x - xi) / bw;
                    (-0.5 * u * u).exp()
                })
                .sum::<f64>()
                * norm
        })
        .collect()
}
