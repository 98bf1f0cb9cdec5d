//! Filter Stage
//! Selects the trade records matching one fiber type / direction / year.

use crate::data::{TradeDirection, TradeRecord};
use serde::{Deserialize, Serialize};

/// Predicate for one chart: a single conjunction over direction, fiber
/// type, and year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub direction: TradeDirection,
    pub fiber_type: String,
    pub year: f64,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            direction: TradeDirection::Import,
            fiber_type: "raw_cotton".to_string(),
            year: 2020.0,
        }
    }
}

impl FilterSpec {
    /// Whether a single record satisfies the predicate.
    pub fn matches(&self, record: &TradeRecord) -> bool {
        record.direction == Some(self.direction)
            && record.fiber_type == self.fiber_type
            && record.year == self.year
    }

    /// The subsequence of `records` satisfying the predicate, original
    /// order preserved. Empty input or no matches yields empty output.
    pub fn apply(&self, records: &[TradeRecord]) -> Vec<TradeRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
