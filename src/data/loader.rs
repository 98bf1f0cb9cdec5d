//! CSV Data Loader Module
//! Handles trade CSV loading and record extraction using Polars.

use crate::data::records::{self, TradeRecord};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Trade data is missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("Failed to extract records: {0}")]
    RecordError(#[from] records::RecordError),
}

/// Handles trade CSV loading with Polars.
///
/// Loading happens once per session; the typed records are held in
/// memory and handed to the pipeline unchanged.
pub struct DataLoader {
    df: Option<DataFrame>,
    records: Vec<TradeRecord>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            records: Vec::new(),
            file_path: None,
        }
    }

    /// Read a trade CSV into a DataFrame.
    ///
    /// Used from the background load thread; the GUI thread installs the
    /// result with [`DataLoader::set_dataset`].
    pub fn read_trade_csv(file_path: &str) -> Result<DataFrame, LoaderError> {
        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        Self::require_trade_columns(&df)?;
        Ok(df)
    }

    /// Check that every required trade column is present.
    pub fn require_trade_columns(df: &DataFrame) -> Result<(), LoaderError> {
        for name in records::REQUIRED_COLUMNS {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn(name));
            }
        }
        Ok(())
    }

    /// Install a loaded dataset (used for async loading).
    pub fn set_dataset(&mut self, df: DataFrame, records: Vec<TradeRecord>, path: PathBuf) {
        self.df = Some(df);
        self.records = records;
        self.file_path = Some(path);
    }

    /// Typed records of the loaded dataset.
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    /// Get unique values from a column.
    pub fn get_unique_values(&self, column: &str) -> Vec<String> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        df.column(column)
            .ok()
            .and_then(|col| col.unique().ok())
            .map(|unique| {
                let series = unique.as_materialized_series();
                (0..series.len())
                    .filter_map(|i| {
                        let val = series.get(i).ok()?;
                        if val.is_null() {
                            None
                        } else {
                            Some(val.to_string().trim_matches('"').to_string())
                        }
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::{extract_records, TradeDirection};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_trade_csv_round_trip() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "fiber_type,import_export,category,sub_category,year,month,value"
        )
        .unwrap();
        writeln!(file, "raw_cotton,import,yarn,ring spun,2020,1,100").unwrap();
        writeln!(file, "wool,export,apparel,coats,2019,12,42.5").unwrap();
        file.flush().unwrap();

        let df = DataLoader::read_trade_csv(file.path().to_str().unwrap()).unwrap();
        assert_eq!(df.height(), 2);

        let records = extract_records(&df).unwrap();
        assert_eq!(records[0].fiber_type, "raw_cotton");
        assert_eq!(records[0].direction, Some(TradeDirection::Import));
        assert_eq!(records[0].value, 100.0);
        assert_eq!(records[1].month, 12.0);
        assert_eq!(records[1].value, 42.5);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "fiber_type,year,month,value").unwrap();
        writeln!(file, "raw_cotton,2020,1,100").unwrap();
        file.flush().unwrap();

        let err = DataLoader::read_trade_csv(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn("import_export")));
    }
}
