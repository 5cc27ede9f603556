//! Measurement log rows
//!
//! One CSV row per benchmark sample, as written by the opcode runner:
//!
//! ```text
//! name,repetition,input_size,baseline_instruction_count,exec_instruction_count[,instruction_count_consumes_by_other_estimated]
//! ```
//!
//! Older logs label the operation column `opcode` instead of `name`, and
//! constant-cost benchmarks carry no `input_size`. Extra columns are ignored.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// A single benchmark sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub opcode: Option<String>,
    #[serde(default)]
    pub input_size: Option<u64>,
    pub exec_instruction_count: u64,
    pub baseline_instruction_count: u64,
    pub repetition: u64,
    /// Instructions attributed to other operations executed in the same run
    #[serde(default)]
    pub instruction_count_consumes_by_other_estimated: Option<f64>,
}

impl MeasurementRecord {
    /// Operation identifier: `name` when set, otherwise `opcode`
    pub fn operation(&self) -> Option<&str> {
        [self.name.as_deref(), self.opcode.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
    }

    /// Marginal instruction cost of one repetition, net of the baseline
    ///
    /// `(exec − baseline − other) / repetition`. Returns `None` for a zero
    /// repetition count.
    pub fn delta_per_op(&self) -> Option<f64> {
        if self.repetition == 0 {
            return None;
        }
        let mut delta = self.exec_instruction_count as f64 - self.baseline_instruction_count as f64;
        if let Some(other) = self.instruction_count_consumes_by_other_estimated {
            delta -= other;
        }
        Some(delta / self.repetition as f64)
    }
}

/// Parse every row of a measurement log
pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<MeasurementRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let records = csv_reader
        .deserialize()
        .collect::<std::result::Result<Vec<MeasurementRecord>, csv::Error>>()?;

    tracing::debug!(rows = records.len(), "parsed measurement log");
    Ok(records)
}

/// Parse a measurement log from disk
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<MeasurementRecord>> {
    let file = std::fs::File::open(path.as_ref())?;
    read_records(io::BufReader::new(file))
}

/// Validate a record and extract its identifier and derived cost
///
/// `row` is the 1-based data row, used in error messages.
pub(crate) fn derive(record: &MeasurementRecord, row: usize) -> Result<(String, f64)> {
    let operation = record
        .operation()
        .ok_or(AnalysisError::MissingOperation { row })?;
    let delta = record
        .delta_per_op()
        .ok_or(AnalysisError::ZeroRepetition { row })?;
    Ok((operation.to_string(), delta))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_LOG: &str = "\
name,repetition,baseline_instruction_count,exec_instruction_count
ADD,100,5000,7100
MUL,100,5000,8000
";

    #[test]
    fn test_read_constant_simple_rows() {
        let records = read_records(SIMPLE_LOG.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].operation(), Some("ADD"));
        assert_eq!(records[0].input_size, None);
        assert_eq!(records[0].delta_per_op(), Some(21.0));
        assert_eq!(records[1].delta_per_op(), Some(30.0));
    }

    #[test]
    fn test_read_mixed_rows_subtract_other() {
        let log = "\
name,repetition,input_size,baseline_instruction_count,exec_instruction_count,instruction_count_consumes_by_other_estimated
MSTORE,10,32,1000,1500,100.0
MSTORE,10,64,1000,1700,
";
        let records = read_records(log.as_bytes()).unwrap();
        assert_eq!(records[0].input_size, Some(32));
        assert_eq!(records[0].delta_per_op(), Some(40.0));
        // Empty cell means no estimate
        assert_eq!(records[1].instruction_count_consumes_by_other_estimated, None);
        assert_eq!(records[1].delta_per_op(), Some(70.0));
    }

    #[test]
    fn test_opcode_column_fallback() {
        let log = "\
opcode,repetition,baseline_instruction_count,exec_instruction_count
SLOAD,4,100,900
";
        let records = read_records(log.as_bytes()).unwrap();
        assert_eq!(records[0].operation(), Some("SLOAD"));
    }

    #[test]
    fn test_empty_name_falls_back_to_opcode() {
        let log = "\
name,opcode,repetition,baseline_instruction_count,exec_instruction_count
,SSTORE,2,100,300
BALANCE,0x31,2,100,300
";
        let records = read_records(log.as_bytes()).unwrap();
        assert_eq!(records[0].operation(), Some("SSTORE"));
        assert_eq!(records[1].operation(), Some("BALANCE"));
    }

    #[test]
    fn test_unknown_columns_are_ignored() {
        let log = "\
name,notes,repetition,baseline_instruction_count,exec_instruction_count,seed
ADD,warm cache,100,5000,7100,42
";
        let records = read_records(log.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].operation(), Some("ADD"));
        assert_eq!(records[0].delta_per_op(), Some(21.0));
    }

    #[test]
    fn test_exec_below_baseline_is_negative() {
        let record = MeasurementRecord {
            name: Some("POP".to_string()),
            opcode: None,
            input_size: None,
            exec_instruction_count: 90,
            baseline_instruction_count: 100,
            repetition: 5,
            instruction_count_consumes_by_other_estimated: None,
        };
        assert_eq!(record.delta_per_op(), Some(-2.0));
    }

    #[test]
    fn test_missing_required_column_fails() {
        let log = "name,repetition,exec_instruction_count\nADD,1,10\n";
        assert!(matches!(
            read_records(log.as_bytes()),
            Err(AnalysisError::Csv(_))
        ));
    }

    #[test]
    fn test_malformed_number_fails() {
        let log = "\
name,repetition,baseline_instruction_count,exec_instruction_count
ADD,ten,5000,7100
";
        assert!(read_records(log.as_bytes()).is_err());
    }

    #[test]
    fn test_derive_rejects_zero_repetition() {
        let log = "\
name,repetition,baseline_instruction_count,exec_instruction_count
ADD,0,5000,7100
";
        let records = read_records(log.as_bytes()).unwrap();
        assert!(matches!(
            derive(&records[0], 1),
            Err(AnalysisError::ZeroRepetition { row: 1 })
        ));
    }

    #[test]
    fn test_derive_rejects_missing_operation() {
        let log = "\
name,repetition,baseline_instruction_count,exec_instruction_count
,1,5000,7100
";
        let records = read_records(log.as_bytes()).unwrap();
        assert!(matches!(
            derive(&records[0], 3),
            Err(AnalysisError::MissingOperation { row: 3 })
        ));
    }
}
