use crate::models::chart::{
    AreaChartData, ChartView, LegendEntry, LineChartData, LinePoint, SeriesKey,
    COMPARISON_LINE_COLOR, PRIMARY_LINE_COLOR,
};
use crate::models::composition::CompositionTable;
use crate::models::day::DayRecord;
use crate::models::series::DualSeriesPoint;
use crate::models::settings::PageSettings;
use crate::services::composition_service::CompositionService;

/// Generates chart-ready data sets from the derived series.
///
/// The core computes all the numbers; the frontend only renders.
/// - Line chart: daily index value, optionally with the comparison line
/// - Stacked-area chart: per-asset values with an ordered, coloured legend
pub struct ChartService {
    composition_service: CompositionService,
}

impl ChartService {
    pub fn new() -> Self {
        Self {
            composition_service: CompositionService::new(),
        }
    }

    /// Line chart over the index.
    ///
    /// With `comparison` set (and non-empty) the chart plots the merged dual
    /// series instead, so both lines share the same days.
    /// Returns `Loading` until there is at least one day to plot.
    pub fn line_chart(
        &self,
        days: &[DayRecord],
        comparison: Option<&[DualSeriesPoint]>,
        settings: &PageSettings,
    ) -> ChartView<LineChartData> {
        if days.is_empty() {
            return ChartView::Loading;
        }

        let mut legend = vec![LegendEntry {
            key: SeriesKey::Value.as_str().to_string(),
            label: format!("Daily price for {} *", settings.index_name),
            color: PRIMARY_LINE_COLOR.to_string(),
        }];

        let data = match comparison.filter(|merged| !merged.is_empty()) {
            Some(merged) => {
                legend.push(LegendEntry {
                    key: SeriesKey::ComparisonValue.as_str().to_string(),
                    label: format!("Daily price for {}", settings.comparison.display_name),
                    color: COMPARISON_LINE_COLOR.to_string(),
                });
                LineChartData {
                    keys: vec![SeriesKey::Value, SeriesKey::ComparisonValue],
                    points: merged
                        .iter()
                        .map(|p| LinePoint {
                            day: p.day,
                            label: p.label.clone(),
                            value: p.value,
                            comparison_value: Some(p.comparison_value),
                        })
                        .collect(),
                    legend,
                }
            }
            None => LineChartData {
                keys: vec![SeriesKey::Value],
                points: days
                    .iter()
                    .map(|d| LinePoint {
                        day: d.day,
                        label: d.label.clone(),
                        value: d.value,
                        comparison_value: None,
                    })
                    .collect(),
                legend,
            },
        };

        ChartView::Ready(data)
    }

    /// Stacked-area chart over the composition table.
    /// Returns `Loading` when there are no rows or no asset columns.
    pub fn area_chart(&self, table: &CompositionTable) -> ChartView<AreaChartData> {
        if table.rows.is_empty() || table.columns.is_empty() {
            return ChartView::Loading;
        }
        ChartView::Ready(AreaChartData {
            rows: table.rows.clone(),
            legend: self.composition_service.legend(table),
        })
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
