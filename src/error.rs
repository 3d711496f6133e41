//! Error taxonomy for the signal pipeline.
//!
//! Every failure the pipeline can produce is a typed, recoverable condition:
//! the orchestrator catches it once at the run boundary and converts it into
//! an error-status [`Metrics`](crate::metrics::Metrics) envelope instead of
//! propagating a raw error to the caller.
//!
//! # Categories
//!
//! - [`ConfigError`] - configuration mapping failed validation
//! - [`DataError`] - dataset failed structural or numeric validation
//! - [`AggregationError`] - metric reduction failed
//! - [`PipelineError`] - top-level union, plus collaborator I/O and parse
//!   failures from the file loaders

use thiserror::Error;

/// Configuration validation failure.
///
/// Each variant names the offending key so the error envelope can report a
/// precise, human-readable cause.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A required key is absent from the configuration mapping.
    #[error("missing config key: {key}")]
    MissingKey { key: &'static str },

    /// A key is present but has the wrong type.
    #[error("config key '{key}' has invalid type, expected {expected}")]
    InvalidType {
        key: &'static str,
        expected: &'static str,
    },

    /// A key has the right type but an out-of-range value.
    #[error("config key '{key}' out of range: {detail}")]
    OutOfRange { key: &'static str, detail: String },
}

impl ConfigError {
    /// Machine-readable kind tag, used in the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigError::MissingKey { .. } => "missing_key",
            ConfigError::InvalidType { .. } => "invalid_type",
            ConfigError::OutOfRange { .. } => "out_of_range",
        }
    }
}

/// Dataset validation failure.
///
/// Validation rejects the whole dataset rather than dropping offending rows,
/// so `rows_processed` and downstream indices always refer to the input as
/// loaded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// The dataset has zero rows.
    #[error("dataset has no rows")]
    Empty,

    /// The required signal column is absent from the header.
    #[error("missing required column: {column}")]
    MissingColumn { column: String },

    /// The header lists a column name more than once.
    #[error("duplicate column in header: {column}")]
    DuplicateColumn { column: String },

    /// A cell in the signal column could not be coerced to a finite number.
    #[error("non-numeric value '{value}' in column '{column}' at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    /// The rolling window is larger than the dataset.
    #[error("window {window} exceeds dataset length {rows}")]
    InsufficientRows { window: usize, rows: usize },

    /// The dataset file could not be read.
    #[error("failed to read dataset: {0}")]
    Io(String),

    /// The dataset file was structurally invalid (ragged rows, bad CSV).
    #[error("malformed dataset: {0}")]
    Malformed(String),
}

impl DataError {
    /// Machine-readable kind tag, used in the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            DataError::Empty => "empty",
            DataError::MissingColumn { .. } => "missing_column",
            DataError::DuplicateColumn { .. } => "duplicate_column",
            DataError::NonNumeric { .. } => "non_numeric",
            DataError::InsufficientRows { .. } => "insufficient_rows",
            DataError::Io(_) => "io",
            DataError::Malformed(_) => "malformed",
        }
    }
}

/// Metric aggregation failure.
///
/// Unreachable behind a validated dataset (which is guaranteed non-empty);
/// the contract exists so the aggregator stands alone.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregationError {
    /// The signal series has zero length.
    #[error("cannot aggregate an empty signal series")]
    EmptySeries,
}

impl AggregationError {
    /// Machine-readable kind tag, used in the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            AggregationError::EmptySeries => "empty_series",
        }
    }
}

/// Top-level pipeline error.
///
/// Unifies the stage-level taxonomies with the collaborator failures the
/// file loaders can produce. The pipeline boundary converts any of these
/// into an error envelope.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    /// Collaborator failure: a file could not be read.
    #[error("i/o error: {0}")]
    Io(String),

    /// Collaborator failure: a file could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

impl PipelineError {
    /// Machine-readable kind tag, used in the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Config(e) => e.kind(),
            PipelineError::Data(e) => e.kind(),
            PipelineError::Aggregation(e) => e.kind(),
            PipelineError::Io(_) => "io",
            PipelineError::Parse(_) => "parse",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_kinds() {
        assert_eq!(ConfigError::MissingKey { key: "seed" }.kind(), "missing_key");
        assert_eq!(
            ConfigError::InvalidType {
                key: "window",
                expected: "integer"
            }
            .kind(),
            "invalid_type"
        );
        assert_eq!(
            ConfigError::OutOfRange {
                key: "window",
                detail: "must be >= 1".to_string()
            }
            .kind(),
            "out_of_range"
        );
    }

    #[test]
    fn test_data_error_messages_name_the_cause() {
        let err = DataError::NonNumeric {
            column: "close".to_string(),
            row: 3,
            value: "abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("close"));
        assert!(msg.contains("abc"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_pipeline_error_kind_delegates() {
        let err: PipelineError = DataError::Empty.into();
        assert_eq!(err.kind(), "empty");

        let err: PipelineError = ConfigError::MissingKey { key: "seed" }.into();
        assert_eq!(err.kind(), "missing_key");

        let err: PipelineError = AggregationError::EmptySeries.into();
        assert_eq!(err.kind(), "empty_series");
    }
}
