use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Where the comparison series comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonSource {
    /// API root, without trailing slash
    pub base_url: String,

    /// Market-data id of the comparison index (e.g., "defipulse-index")
    pub coin_id: String,

    /// Quote currency of the series
    pub vs_currency: String,

    /// Short name used in legends and tooltips (e.g., "DPI")
    pub display_name: String,

    /// Request timeout in seconds (native targets only)
    pub timeout_secs: u64,
}

impl Default for ComparisonSource {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com/api/v3".to_string(),
            coin_id: "defipulse-index".to_string(),
            vs_currency: "usd".to_string(),
            display_name: "DPI".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Page-level configuration. Every field has a default, so a partial JSON
/// object (or none at all) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    /// Day the index launches; the record dated on it is the initial allocation.
    pub launch_date: NaiveDate,

    /// Comparison points before this instant (Unix millis) are dropped.
    pub comparison_epoch_ms: i64,

    /// Rebalance groups revealed per "Show more" click.
    pub page_size: usize,

    /// Viewports at or below this width render in mobile mode.
    pub mobile_breakpoint_px: u32,

    /// Base of the per-project link; the project id and tracking query are appended.
    pub project_link_base: String,

    /// Display name of the index itself (e.g., "TTI").
    pub index_name: String,

    pub comparison: ComparisonSource,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            launch_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or_default(),
            comparison_epoch_ms: 1_609_459_200_000,
            page_size: 3,
            mobile_breakpoint_px: 720,
            project_link_base: "https://www.tokenterminal.com/terminal/projects/".to_string(),
            index_name: "TTI".to_string(),
            comparison: ComparisonSource::default(),
        }
    }
}

impl PageSettings {
    /// The comparison epoch as a UTC instant.
    #[must_use]
    pub fn comparison_epoch(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.comparison_epoch_ms).unwrap_or_default()
    }

    /// External link for a project id.
    #[must_use]
    pub fn project_link(&self, id: &str) -> String {
        format!("{}{id}?utm_source=index", self.project_link_base)
    }
}
