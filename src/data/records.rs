//! Trade Record Types
//! Typed rows of the US textile fiber trade CSV.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Columns the trade CSV must provide.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "fiber_type",
    "import_export",
    "category",
    "sub_category",
    "year",
    "month",
    "value",
];

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Trade direction, parsed from the `import_export` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    Import,
    Export,
}

impl TradeDirection {
    /// Parse the literal column values `"import"` / `"export"`.
    /// Anything else yields no direction and matches no direction filter.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "import" => Some(TradeDirection::Import),
            "export" => Some(TradeDirection::Export),
            _ => None,
        }
    }

    /// Column literal for this direction.
    pub fn label(&self) -> &'static str {
        match self {
            TradeDirection::Import => "import",
            TradeDirection::Export => "export",
        }
    }
}

/// One row of the trade CSV, created once per load and never mutated.
///
/// Numeric fields are coerced; a malformed cell becomes `NaN`, not an
/// error, and stays in the stream.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub fiber_type: String,
    pub direction: Option<TradeDirection>,
    pub category: String,
    pub sub_category: String,
    pub year: f64,
    pub month: f64,
    pub value: f64,
}

/// Extract typed records from a loaded DataFrame.
///
/// Fails only on missing columns; malformed cells degrade to `NaN`
/// (numeric) or the empty string.
pub fn extract_records(df: &DataFrame) -> Result<Vec<TradeRecord>, RecordError> {
    let fiber_type = df.column("fiber_type")?;
    let direction = df.column("import_export")?;
    let category = df.column("category")?;
    let sub_category = df.column("sub_category")?;
    let year = numeric_column(df, "year")?;
    let month = numeric_column(df, "month")?;
    let value = numeric_column(df, "value")?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        records.push(TradeRecord {
            fiber_type: string_cell(fiber_type, i),
            direction: TradeDirection::parse(&string_cell(direction, i)),
            category: string_cell(category, i),
            sub_category: string_cell(sub_category, i),
            year: year.get(i).unwrap_or(f64::NAN),
            month: month.get(i).unwrap_or(f64::NAN),
            value: value.get(i).unwrap_or(f64::NAN),
        });
    }

    Ok(records)
}

/// Coerce a column to f64; cells that fail the cast come back as null
/// and are read out as `NaN`.
fn numeric_column(df: &DataFrame, name: &str) -> Result<Float64Chunked, RecordError> {
    Ok(df.column(name)?.cast(&DataType::Float64)?.f64()?.clone())
}

fn string_cell(col: &Column, i: usize) -> String {
    match col.get(i) {
        Ok(v) if !v.is_null() => v.to_string().trim_matches('"').to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade_df() -> DataFrame {
        df!(
            "fiber_type" => ["raw_cotton", "silk"],
            "import_export" => ["import", "re-export"],
            "category" => ["yarn", "apparel"],
            "sub_category" => ["ring spun", "shirts"],
            "year" => ["2020", "twenty-twenty"],
            "month" => [1i64, 2],
            "value" => ["100.5", "oops"],
        )
        .unwrap()
    }

    #[test]
    fn test_direction_parse_literals() {
        assert_eq!(TradeDirection::parse("import"), Some(TradeDirection::Import));
        assert_eq!(TradeDirection::parse("export"), Some(TradeDirection::Export));
        assert_eq!(TradeDirection::parse("Import"), None);
        assert_eq!(TradeDirection::parse(""), None);
    }

    #[test]
    fn test_extract_records_coerces_numbers() {
        let records = extract_records(&trade_df()).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].fiber_type, "raw_cotton");
        assert_eq!(records[0].direction, Some(TradeDirection::Import));
        assert_eq!(records[0].year, 2020.0);
        assert_eq!(records[0].month, 1.0);
        assert_eq!(records[0].value, 100.5);
    }

    #[test]
    fn test_extract_records_malformed_cells_become_nan() {
        let records = extract_records(&trade_df()).unwrap();

        // Unknown direction literal parses to no direction, not an error.
        assert_eq!(records[1].direction, None);
        // Malformed numerics coerce to NaN, not an error.
        assert!(records[1].year.is_nan());
        assert!(records[1].value.is_nan());
        assert_eq!(records[1].month, 2.0);
    }

    #[test]
    fn test_extract_records_missing_column_is_error() {
        let df = df!("fiber_type" => ["raw_cotton"]).unwrap();
        assert!(extract_records(&df).is_err());
    }
}
