use crate::format::{label_for_percentage, label_for_price, label_for_tooltip};
use crate::models::chart::palette_color;
use crate::models::composition::{CompositionRow, CompositionTable};
use crate::models::day::DayRecord;
use crate::models::series::DualSeriesPoint;
use crate::models::settings::PageSettings;
use crate::models::tooltip::{
    ComparisonTooltip, CompositionTooltip, CompositionTooltipEntry, PriceTooltip,
    TooltipAllocation,
};

/// Builds the hover tooltips for both chart modes.
pub struct TooltipService;

impl TooltipService {
    pub fn new() -> Self {
        Self
    }

    /// Single-line tooltip: the day's price and its allocation by weight.
    pub fn price_tooltip(&self, day: &DayRecord) -> PriceTooltip {
        let mut holdings: Vec<_> = day.holdings.iter().collect();
        holdings.sort_by(|a, b| b.weight.total_cmp(&a.weight));

        PriceTooltip {
            title: day.label.clone(),
            price_label: "Price *".to_string(),
            price: label_for_tooltip(day.value),
            allocation: holdings
                .into_iter()
                .map(|h| TooltipAllocation {
                    component: h.component.clone(),
                    weight: label_for_percentage(h.weight * 100.0, false),
                })
                .collect(),
        }
    }

    /// Dual-line tooltip: index price next to the comparison price.
    pub fn comparison_tooltip(&self, point: &DualSeriesPoint, settings: &PageSettings) -> ComparisonTooltip {
        ComparisonTooltip {
            title: point.label.clone(),
            primary_label: format!("{} Price *", settings.index_name),
            primary_price: label_for_tooltip(point.value),
            comparison_label: format!("{} Price", settings.comparison.display_name),
            comparison_price: label_for_tooltip(point.comparison_value),
        }
    }

    /// Stacked-area tooltip: total value, then each asset's share of it,
    /// largest first, coloured like its stack layer.
    pub fn composition_tooltip(&self, row: &CompositionRow, table: &CompositionTable) -> CompositionTooltip {
        let mut entries: Vec<(usize, &String, f64)> = row
            .values
            .iter()
            .map(|(component, value)| {
                let index = table
                    .columns
                    .iter()
                    .position(|c| c == component)
                    .unwrap_or_default();
                (index, component, *value)
            })
            .collect();
        entries.sort_by(|a, b| b.2.total_cmp(&a.2));
        // A zero total gives NaN shares, which format as the placeholder.
        let total = row.total();

        CompositionTooltip {
            title: row.label.clone(),
            price_label: "Price".to_string(),
            total: label_for_price(Some(total)),
            allocation_label: "Allocation".to_string(),
            entries: entries
                .into_iter()
                .map(|(index, component, value)| CompositionTooltipEntry {
                    component: component.clone(),
                    weight: label_for_percentage(value / total * 100.0, false),
                    fill: palette_color(index).fill.to_string(),
                })
                .collect(),
        }
    }
}

impl Default for TooltipService {
    fn default() -> Self {
        Self::new()
    }
}
