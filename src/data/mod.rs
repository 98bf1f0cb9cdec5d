//! Data module - CSV loading and record parsing

mod loader;
mod records;

pub use loader::{DataLoader, LoaderError};
pub use records::{extract_records, RecordError, TradeDirection, TradeRecord};
