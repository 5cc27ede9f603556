//! In-memory sample set derived from a measurement log
//!
//! Groupings use `BTreeMap` so tables, JSON output and report facets come out
//! sorted by operation identifier (and by input size).

use crate::error::{AnalysisError, Result};
use crate::estimate::quantile_bounds;
use crate::filter::OperationFilter;
use crate::record::{self, MeasurementRecord};
use std::collections::BTreeMap;
use std::path::Path;

/// One derived measurement
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub operation: String,
    pub input_size: Option<u64>,
    /// `instruction_delta_per_op` of the source row
    pub delta_per_op: f64,
}

/// Ordered collection of samples
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Wrap already derived samples
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Derive samples from parsed rows, failing on the first invalid row
    pub fn from_records(records: &[MeasurementRecord]) -> Result<Self> {
        let samples = records
            .iter()
            .enumerate()
            .map(|(i, rec)| {
                let (operation, delta_per_op) = record::derive(rec, i + 1)?;
                Ok(Sample {
                    operation,
                    input_size: rec.input_size,
                    delta_per_op,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { samples })
    }

    /// Load and derive a measurement log
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let records = record::load_records(path.as_ref())?;
        let dataset = Self::from_records(&records)?;
        tracing::info!(
            path = %path.as_ref().display(),
            samples = dataset.len(),
            operations = dataset.operations().len(),
            "loaded measurement log"
        );
        Ok(dataset)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sorted distinct operation identifiers
    pub fn operations(&self) -> Vec<String> {
        self.group_by_operation().into_keys().collect()
    }

    /// Derived costs per operation, in input order
    pub fn group_by_operation(&self) -> BTreeMap<String, Vec<f64>> {
        let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for sample in &self.samples {
            groups
                .entry(sample.operation.clone())
                .or_default()
                .push(sample.delta_per_op);
        }
        groups
    }

    /// Derived costs per input size; samples without a size are skipped
    pub fn group_by_input_size(&self) -> BTreeMap<u64, Vec<f64>> {
        let mut groups: BTreeMap<u64, Vec<f64>> = BTreeMap::new();
        for sample in &self.samples {
            if let Some(size) = sample.input_size {
                groups.entry(size).or_default().push(sample.delta_per_op);
            }
        }
        groups
    }

    /// Drop samples outside their operation's `[lower, upper]` quantile range
    ///
    /// Quantiles are taken per operation across all input sizes.
    pub fn trim_outliers(&self, lower: f64, upper: f64) -> Result<Self> {
        let mut bounds = BTreeMap::new();
        for (operation, values) in self.group_by_operation() {
            match quantile_bounds(&values, lower, upper) {
                Ok(range) => {
                    bounds.insert(operation, range);
                }
                Err(AnalysisError::EmptySeries) => {
                    tracing::warn!(%operation, "no finite samples; dropping operation");
                }
                Err(e) => return Err(e),
            }
        }

        let samples: Vec<Sample> = self
            .samples
            .iter()
            .filter(|s| {
                bounds
                    .get(&s.operation)
                    .is_some_and(|&(lo, hi)| (lo..=hi).contains(&s.delta_per_op))
            })
            .cloned()
            .collect();

        tracing::debug!(
            before = self.len(),
            after = samples.len(),
            lower,
            upper,
            "trimmed outliers"
        );
        Ok(Self { samples })
    }

    /// Keep the samples whose operation passes `filter`
    pub fn select(&self, filter: &OperationFilter) -> Self {
        self.retain(|s| filter.matches(&s.operation))
    }

    /// Keep the samples of a single operation
    pub fn for_operation(&self, operation: &str) -> Self {
        self.retain(|s| s.operation == operation)
    }

    /// Keep the samples with `input_size ≤ limit`
    pub fn max_input_size(&self, limit: u64) -> Self {
        self.retain(|s| s.input_size.is_some_and(|size| size <= limit))
    }

    fn retain(&self, keep: impl Fn(&Sample) -> bool) -> Self {
        Self {
            samples: self.samples.iter().filter(|s| keep(s)).cloned().collect(),
        }
    }
}
