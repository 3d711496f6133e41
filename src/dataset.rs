//! Tabular dataset representation and validation.
//!
//! A [`RawDataset`] is the in-memory form of one loaded table: a header plus
//! ordered rows of string cells, exactly as a CSV parses. Validation checks
//! shape and coerces the configured signal column to numeric, producing a
//! [`ValidatedDataset`] the signal engine can consume without further
//! checking.
//!
//! # Validation rules
//!
//! 1. At least one row ([`DataError::Empty`])
//! 2. Signal column present exactly once ([`DataError::MissingColumn`],
//!    [`DataError::DuplicateColumn`])
//! 3. Every signal-column cell coercible to a finite f64
//!    ([`DataError::NonNumeric`]) - the whole dataset is rejected rather
//!    than dropping rows, so `rows_processed` stays exact
//! 4. Window fits the dataset ([`DataError::InsufficientRows`])

use crate::config::RunConfig;
use crate::error::DataError;

/// Raw tabular dataset: a header and ordered rows of unparsed cells.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawDataset {
    /// Create a dataset from a header and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Column names, in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Validate shape and coerce the configured signal column to numeric.
    ///
    /// Consumes nothing; the raw dataset stays usable for inspection after a
    /// failure.
    pub fn validate(&self, config: &RunConfig) -> Result<ValidatedDataset, DataError> {
        if self.rows.is_empty() {
            return Err(DataError::Empty);
        }

        // Structural corruption check before anything positional.
        for (i, name) in self.columns.iter().enumerate() {
            if self.columns[i + 1..].contains(name) {
                return Err(DataError::DuplicateColumn {
                    column: name.clone(),
                });
            }
        }

        let column_index = self
            .columns
            .iter()
            .position(|name| name == &config.column)
            .ok_or_else(|| DataError::MissingColumn {
                column: config.column.clone(),
            })?;

        let mut values = Vec::with_capacity(self.rows.len());
        for (row_index, row) in self.rows.iter().enumerate() {
            let cell = row.get(column_index).ok_or_else(|| {
                DataError::Malformed(format!(
                    "row {} has {} fields, expected {}",
                    row_index,
                    row.len(),
                    self.columns.len()
                ))
            })?;

            let parsed = cell.trim().parse::<f64>().ok().filter(|v| v.is_finite());
            match parsed {
                Some(value) => values.push(value),
                None => {
                    return Err(DataError::NonNumeric {
                        column: config.column.clone(),
                        row: row_index,
                        value: cell.clone(),
                    })
                }
            }
        }

        if config.window > values.len() {
            return Err(DataError::InsufficientRows {
                window: config.window,
                rows: values.len(),
            });
        }

        Ok(ValidatedDataset {
            column: config.column.clone(),
            values,
        })
    }
}

/// Dataset after validation: the signal column coerced to numeric, with the
/// row count recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDataset {
    column: String,
    values: Vec<f64>,
}

impl ValidatedDataset {
    /// Name of the signal column the values came from.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Coerced signal-column values, one per input row.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of rows, equal to the raw dataset's row count.
    pub fn row_count(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;

    fn test_config(window: usize) -> RunConfig {
        RunConfig {
            version: "test".to_string(),
            seed: 0,
            window,
            threshold: 0.0,
            column: "close".to_string(),
        }
    }

    fn dataset(cells: &[&str]) -> RawDataset {
        RawDataset::new(
            vec!["ts".to_string(), "close".to_string()],
            cells
                .iter()
                .enumerate()
                .map(|(i, c)| vec![i.to_string(), c.to_string()])
                .collect(),
        )
    }

    #[test]
    fn test_valid_dataset() {
        let data = dataset(&["1.0", "2.5", "3.0"]);
        let validated = data.validate(&test_config(2)).unwrap();

        assert_eq!(validated.row_count(), 3);
        assert_eq!(validated.values(), &[1.0, 2.5, 3.0]);
        assert_eq!(validated.column(), "close");
    }

    #[test]
    fn test_empty_dataset() {
        let data = RawDataset::new(vec!["close".to_string()], vec![]);
        let err = data.validate(&test_config(1)).unwrap_err();
        assert_eq!(err, DataError::Empty);
    }

    #[test]
    fn test_missing_column() {
        let data = RawDataset::new(
            vec!["ts".to_string(), "open".to_string()],
            vec![vec!["0".to_string(), "1.0".to_string()]],
        );
        let err = data.validate(&test_config(1)).unwrap_err();
        assert_eq!(
            err,
            DataError::MissingColumn {
                column: "close".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_column() {
        let data = RawDataset::new(
            vec!["close".to_string(), "close".to_string()],
            vec![vec!["1.0".to_string(), "2.0".to_string()]],
        );
        let err = data.validate(&test_config(1)).unwrap_err();
        assert_eq!(
            err,
            DataError::DuplicateColumn {
                column: "close".to_string()
            }
        );
    }

    #[test]
    fn test_non_numeric_rejects_whole_dataset() {
        let data = dataset(&["1.0", "not-a-number", "3.0"]);
        let err = data.validate(&test_config(1)).unwrap_err();

        match err {
            DataError::NonNumeric { row, value, .. } => {
                assert_eq!(row, 1);
                assert_eq!(value, "not-a-number");
            }
            other => panic!("expected NonNumeric, got {other:?}"),
        }
    }

    #[test]
    fn test_nan_cell_is_non_numeric() {
        // "NaN" parses as f64 but is not a usable value.
        let data = dataset(&["1.0", "NaN"]);
        let err = data.validate(&test_config(1)).unwrap_err();
        assert_eq!(err.kind(), "non_numeric");
    }

    #[test]
    fn test_window_exceeds_rows() {
        let data = dataset(&["1.0", "2.0", "3.0"]);
        let err = data.validate(&test_config(5)).unwrap_err();
        assert_eq!(err, DataError::InsufficientRows { window: 5, rows: 3 });
    }

    #[test]
    fn test_window_equal_to_rows_is_valid() {
        let data = dataset(&["1.0", "2.0", "3.0"]);
        assert!(data.validate(&test_config(3)).is_ok());
    }

    #[test]
    fn test_ragged_row() {
        let data = RawDataset::new(
            vec!["ts".to_string(), "close".to_string()],
            vec![
                vec!["0".to_string(), "1.0".to_string()],
                vec!["1".to_string()],
            ],
        );
        let err = data.validate(&test_config(1)).unwrap_err();
        assert_eq!(err.kind(), "malformed");
    }

    #[test]
    fn test_whitespace_cells_coerce() {
        let data = dataset(&[" 1.5 ", "2.0"]);
        let validated = data.validate(&test_config(1)).unwrap();
        assert_eq!(validated.values(), &[1.5, 2.0]);
    }
}
