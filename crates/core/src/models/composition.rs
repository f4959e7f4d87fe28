use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keys reserved for the row's own fields; never used as asset columns.
pub const RESERVED_KEYS: [&str; 2] = ["day", "label"];

/// One day flattened for stacked-area rendering.
///
/// Serialises as `{ "day": .., "label": .., "<asset>": value, ... }`.
/// Assets not held on this day are absent, not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionRow {
    pub day: NaiveDate,
    pub label: String,

    /// Asset name → USD value held on this day
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl CompositionRow {
    /// Value of one asset column, `None` when the asset is absent on this day.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    /// Value of one asset column with absent treated as zero (stacking semantics).
    #[must_use]
    pub fn value_or_zero(&self, column: &str) -> f64 {
        self.get(column).unwrap_or(0.0)
    }

    /// Sum over every asset present on this day.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }
}

/// The full stacked-composition series plus its column set.
///
/// `columns` is the union of every asset name across all rows, computed once
/// per dataset load and ordered by the latest day's value (largest first).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositionTable {
    pub rows: Vec<CompositionRow>,
    pub columns: Vec<String>,
}

impl CompositionTable {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The most recent row, used for legend ordering.
    #[must_use]
    pub fn latest(&self) -> Option<&CompositionRow> {
        self.rows.last()
    }
}
