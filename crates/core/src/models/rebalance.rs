use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One asset line of a rebalance snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceHolding {
    pub component: String,

    /// Project id for the external link. Absent ids render without a link.
    #[serde(default)]
    pub id: Option<String>,

    /// Weight before the rebalance (stored records only)
    #[serde(default)]
    pub weight_pre: Option<f64>,

    /// Weight after the rebalance
    pub weight_post: f64,

    /// Signed weight change `weight_post - weight_pre` (stored records only)
    #[serde(default)]
    pub rebalance: Option<f64>,

    /// USD allocated to this asset after the rebalance
    pub value: f64,
}

/// A named allocation snapshot: the initial allocation or a monthly rebalance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceRecord {
    /// Identity of the record and source of its title
    pub as_of: NaiveDate,
    pub holdings: Vec<RebalanceHolding>,
    pub total_value: f64,
    pub total_weight_post: f64,

    /// Mean absolute weight change; `None` for the initial allocation
    #[serde(default)]
    pub avg_abs_rebalance: Option<f64>,
}

impl RebalanceRecord {
    /// Whether the "Rebalance (%)" column is shown for this record.
    #[must_use]
    pub fn shows_rebalance(&self) -> bool {
        self.avg_abs_rebalance.is_some()
    }
}

// ── Table view models (what the renderer consumes) ─────────────────

/// One formatted holding row of a rebalance table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RebalanceRowView {
    pub component: String,
    pub link: Option<String>,
    pub allocation_value: String,
    pub allocation_weight: String,
    pub rebalance: Option<String>,
}

/// The bold "Total" row closing a rebalance table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RebalanceTotalView {
    pub label: String,
    pub value: String,
    pub weight: String,
    pub rebalance: Option<String>,
}

/// A fully formatted rebalance group, newest first in the history list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RebalanceGroupView {
    pub as_of: NaiveDate,
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<RebalanceRowView>,
    pub total: RebalanceTotalView,
}

/// The visible slice of the history plus the pager control's label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RebalanceHistoryView {
    pub groups: Vec<RebalanceGroupView>,
    pub total_groups: usize,
    pub pager_label: String,
}
