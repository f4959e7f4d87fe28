use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::holding::AssetHolding;
use crate::models::rebalance::RebalanceHolding;

/// Composition dataset as stored on disk: day key → entry.
///
/// A map, so key order carries no meaning; the loader sorts by date.
pub type CompositionDataset = HashMap<String, RawDayEntry>;

/// Rebalance-history dataset as stored on disk: day key → stored rebalance.
pub type RebalanceDataset = HashMap<String, StoredRebalance>;

/// One day of the composition dataset, before validation.
///
/// Both fields are optional here so a missing one surfaces as a
/// `MalformedData` error naming the day, not as an opaque decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDayEntry {
    #[serde(default)]
    pub value: Option<serde_json::Value>,

    #[serde(default)]
    pub composition: Option<Vec<AssetHolding>>,
}

/// One monthly rebalance as written by the backtest export.
///
/// ```json
/// {
///   "composition": [{ "component": "Aave", "id": "aave", "weight_pre": 0.1,
///                     "weight_post": 0.12, "rebalance": 0.02, "value": 1200.0 }],
///   "value_total": 10000.0,
///   "weight_post_total": 1.0,
///   "rebalance_abs_avg": 0.015
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRebalance {
    pub composition: Vec<RebalanceHolding>,
    pub value_total: f64,
    pub weight_post_total: f64,
    #[serde(default)]
    pub rebalance_abs_avg: Option<f64>,
}
