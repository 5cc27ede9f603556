//! Error taxonomy for measurement analysis
//!
//! Library code returns [`AnalysisError`]; the binary wraps it in `anyhow`
//! with file-level context.

use thiserror::Error;

/// Errors that can occur while loading or analyzing measurement logs
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Cannot compute statistics over an empty series")]
    EmptySeries,

    #[error("Need at least {required} distinct points, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    #[error("Input sizes have zero variance; slope is undefined")]
    ZeroVariance,

    #[error("Row {row}: neither `name` nor `opcode` is set")]
    MissingOperation { row: usize },

    #[error("Row {row}: repetition must be non-zero")]
    ZeroRepetition { row: usize },

    #[error("No samples for operation '{0}'")]
    UnknownOperation(String),

    #[error("Invalid filter expression: {0}")]
    InvalidFilter(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Chart rendering failed: {0}")]
    Chart(String),
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_row() {
        let err = AnalysisError::ZeroRepetition { row: 7 };
        assert_eq!(err.to_string(), "Row 7: repetition must be non-zero");

        let err = AnalysisError::MissingOperation { row: 2 };
        assert!(err.to_string().contains("Row 2"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "results.csv");
        let err: AnalysisError = io.into();
        assert!(matches!(err, AnalysisError::Io(_)));
        assert!(err.to_string().contains("results.csv"));
    }
}
