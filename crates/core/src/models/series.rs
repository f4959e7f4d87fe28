use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily point of the secondary (comparison) series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalSeriesPoint {
    pub day: NaiveDate,
    pub value: f64,
}

/// One point of the dual-line view: the index and the comparison series on
/// the same day. Only produced for days present in both series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualSeriesPoint {
    pub day: NaiveDate,
    pub label: String,

    /// Index value in USD
    pub value: f64,

    /// Comparison series value in USD
    pub comparison_value: f64,
}
