//! Instruction-cost lookup table
//!
//! Maps each operation identifier to its binned-mode cost estimate. The JSON
//! form is a flat object, sorted by key:
//!
//! ```json
//! {
//!   "ADD": 21.05,
//!   "MUL": 30.0
//! }
//! ```

use crate::cli::OutputFormat;
use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::estimate::agg_mode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Operation identifier → estimated instructions per repetition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostTable {
    entries: BTreeMap<String, f64>,
}

impl CostTable {
    /// Estimate every operation of `dataset`
    ///
    /// When `trim` is set, each operation is first restricted to the
    /// configured quantile range.
    pub fn build(dataset: &Dataset, config: &AnalysisConfig, trim: bool) -> Result<Self> {
        let dataset = if trim {
            dataset.trim_outliers(config.lower_quantile, config.upper_quantile)?
        } else {
            dataset.clone()
        };

        let rule = config.bin_rule();
        let mut entries = BTreeMap::new();
        for (operation, values) in dataset.group_by_operation() {
            let estimate = agg_mode(&values, &rule)?;
            tracing::debug!(%operation, samples = values.len(), estimate, "aggregated");
            entries.insert(operation, estimate);
        }

        Ok(Self { entries })
    }

    /// Read a table previously written by [`CostTable::write_json`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Persist the table as pretty-printed JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut json = self.to_json()?;
        json.push('\n');
        std::fs::write(path.as_ref(), json)?;
        tracing::info!(path = %path.as_ref().display(), entries = self.len(), "wrote lookup table");
        Ok(())
    }

    pub fn get(&self, operation: &str) -> Option<f64> {
        self.entries.get(operation).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Render in the requested output format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => self.to_json(),
            OutputFormat::Csv => self.to_csv(),
        }
    }

    /// Aligned two-column table
    pub fn to_text(&self) -> String {
        const HEADER: &str = "instruction_delta_per_op";
        let width = self
            .entries
            .keys()
            .map(String::len)
            .chain(std::iter::once("name".len()))
            .max()
            .unwrap_or(0);

        let mut output = format!("{:<width$}  {:>w2$}\n", "name", HEADER, w2 = HEADER.len());
        for (name, estimate) in &self.entries {
            output.push_str(&format!(
                "{:<width$}  {:>w2$.4}\n",
                name,
                estimate,
                w2 = HEADER.len()
            ));
        }
        output
    }

    /// Pretty-printed JSON object
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// `name,instruction_delta_per_op` CSV
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["name", "instruction_delta_per_op"])?;
        for (name, estimate) in &self.entries {
            let value = estimate.to_string();
            writer.write_record([name.as_str(), value.as_str()])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl FromIterator<(String, f64)> for CostTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
