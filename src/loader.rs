//! CSV dataset loading.
//!
//! Collaborator to the core pipeline: parses one CSV file (header row plus
//! data rows) into a [`RawDataset`]. Cells stay unparsed strings; numeric
//! coercion belongs to dataset validation.

use crate::dataset::RawDataset;
use crate::error::DataError;
use std::path::Path;

/// Load a CSV file with a header row into a raw dataset.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<RawDataset, DataError> {
    let mut reader =
        csv::Reader::from_path(path.as_ref()).map_err(|e| DataError::Io(e.to_string()))?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| DataError::Malformed(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| DataError::Malformed(e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    log::info!("loaded {} rows from csv", rows.len());
    Ok(RawDataset::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_csv() {
        let path = std::env::temp_dir().join("signal_pipeline_test_load.csv");
        fs::write(&path, "ts,close\n1,10.5\n2,11.0\n3,10.8\n").unwrap();

        let dataset = load_csv(&path).unwrap();
        assert_eq!(dataset.columns(), &["ts".to_string(), "close".to_string()]);
        assert_eq!(dataset.row_count(), 3);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_csv_missing_file() {
        let err = load_csv("/nonexistent/data.csv").unwrap_err();
        assert_eq!(err.kind(), "io");
    }

    #[test]
    fn test_load_csv_header_only_is_empty() {
        let path = std::env::temp_dir().join("signal_pipeline_test_header_only.csv");
        fs::write(&path, "ts,close\n").unwrap();

        let dataset = load_csv(&path).unwrap();
        assert_eq!(dataset.row_count(), 0);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_csv_ragged_row_is_malformed() {
        let path = std::env::temp_dir().join("signal_pipeline_test_ragged.csv");
        fs::write(&path, "ts,close\n1,10.5\n2\n").unwrap();

        let err = load_csv(&path).unwrap_err();
        assert_eq!(err.kind(), "malformed");

        fs::remove_file(&path).ok();
    }
}
