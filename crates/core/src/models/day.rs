use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::holding::AssetHolding;

/// One trading day of the backtest: total value plus the composition.
///
/// Built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// The day this snapshot belongs to (serialised as `YYYY-MM-DD`)
    pub day: NaiveDate,

    /// Short display label, e.g. "Jan 1"
    pub label: String,

    /// Total portfolio value in USD as supplied by the dataset
    pub value: f64,

    /// Holdings on this day, in dataset order
    pub holdings: Vec<AssetHolding>,
}

impl DayRecord {
    /// The canonical ISO key of this day, identical to the dataset key.
    #[must_use]
    pub fn day_key(&self) -> String {
        self.day.format("%Y-%m-%d").to_string()
    }

    /// Sum of `tokens * price` over all holdings.
    /// Usually close to `value`; the supplied `value` stays authoritative.
    #[must_use]
    pub fn holdings_value(&self) -> f64 {
        self.holdings.iter().map(AssetHolding::value).sum()
    }

    /// Sum of all holding weights (≈ 1 for well-formed data).
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.holdings.iter().map(|h| h.weight).sum()
    }
}
