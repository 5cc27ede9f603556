//! Cost of size-dependent operations as a function of input size
//!
//! Two views over the same trimmed samples:
//! - [`fit_cost_model`]: binned mode per input size, then a least-squares
//!   line `fixed + marginal·size`
//! - [`scaling_series`]: mean and confidence interval per input size, for the
//!   scaling report

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::error::{AnalysisError, Result};
use crate::estimate::{agg_mode, BinRule, LinearFit, MeanInterval};
use serde::Serialize;
use std::fmt;

/// Linear cost model of one operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostModel {
    pub operation: String,
    /// `(input_size, binned-mode cost)` pairs the line was fitted to
    pub points: Vec<(u64, f64)>,
    pub fit: LinearFit,
}

impl fmt::Display for CostModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fit.fmt(f)
    }
}

/// Binned-mode cost per input size, ascending by size
pub fn aggregate_by_input_size(dataset: &Dataset, rule: &BinRule) -> Result<Vec<(u64, f64)>> {
    dataset
        .group_by_input_size()
        .into_iter()
        .map(|(size, values)| Ok((size, agg_mode(&values, rule)?)))
        .collect()
}

/// Fit `cost = intercept + slope·input_size` for one operation
///
/// Samples are trimmed to the configured quantile range (per operation,
/// across all sizes) before sizes above `fit_max_input_size` are dropped.
pub fn fit_cost_model(
    dataset: &Dataset,
    operation: &str,
    config: &AnalysisConfig,
) -> Result<CostModel> {
    let samples = dataset.for_operation(operation);
    if samples.is_empty() {
        return Err(AnalysisError::UnknownOperation(operation.to_string()));
    }

    let samples = samples
        .trim_outliers(config.lower_quantile, config.upper_quantile)?
        .max_input_size(config.fit_max_input_size);

    let points = aggregate_by_input_size(&samples, &config.bin_rule())?;
    let xs: Vec<f64> = points.iter().map(|&(size, _)| size as f64).collect();
    let ys: Vec<f64> = points.iter().map(|&(_, cost)| cost).collect();
    let fit = LinearFit::ordinary_least_squares(&xs, &ys)?;

    tracing::info!(
        operation,
        points = points.len(),
        slope = fit.slope,
        intercept = fit.intercept,
        r_squared = fit.r_squared,
        "fitted cost model"
    );

    Ok(CostModel {
        operation: operation.to_string(),
        points,
        fit,
    })
}

/// Mean cost and its confidence interval at one input size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScalingPoint {
    pub input_size: u64,
    pub interval: MeanInterval,
}

/// Per-size cost curve of one operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingSeries {
    pub operation: String,
    pub points: Vec<ScalingPoint>,
}

/// Cost curves for every size-dependent operation in `dataset`
///
/// Operations without any sized sample under `plot_max_input_size` are
/// omitted.
pub fn scaling_series(dataset: &Dataset, config: &AnalysisConfig) -> Result<Vec<ScalingSeries>> {
    let trimmed = dataset
        .trim_outliers(config.lower_quantile, config.upper_quantile)?
        .max_input_size(config.plot_max_input_size);

    let mut series = Vec::new();
    for operation in trimmed.operations() {
        let points = trimmed
            .for_operation(&operation)
            .group_by_input_size()
            .into_iter()
            .map(|(input_size, values)| {
                Ok(ScalingPoint {
                    input_size,
                    interval: MeanInterval::of(&values, config.confidence_z)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if !points.is_empty() {
            series.push(ScalingSeries { operation, points });
        }
    }
    Ok(series)
}
