use serde::Serialize;

/// One "component: weight" line of the allocation list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipAllocation {
    pub component: String,
    pub weight: String,
}

/// Tooltip of the single-line chart: price plus that day's allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTooltip {
    pub title: String,
    pub price_label: String,
    pub price: String,
    /// Sorted by weight, largest first
    pub allocation: Vec<TooltipAllocation>,
}

/// Tooltip of the dual-line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTooltip {
    pub title: String,
    pub primary_label: String,
    pub primary_price: String,
    pub comparison_label: String,
    pub comparison_price: String,
}

/// One asset line of the composition tooltip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionTooltipEntry {
    pub component: String,
    /// Share of the day's total value, as a percentage label
    pub weight: String,
    pub fill: String,
}

/// Tooltip of the stacked-area chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionTooltip {
    pub title: String,
    pub price_label: String,
    /// Summed value of the day's assets
    pub total: String,
    pub allocation_label: String,
    /// Sorted by value, largest first
    pub entries: Vec<CompositionTooltipEntry>,
}
