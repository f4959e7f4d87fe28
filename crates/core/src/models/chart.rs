use chrono::NaiveDate;
use serde::Serialize;

use super::composition::CompositionRow;

/// Fill/stroke pair for one chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartColor {
    pub fill: &'static str,
    pub stroke: &'static str,
}

/// Series palette for the stacked-area chart, in assignment order.
pub const PALETTE: [ChartColor; 14] = [
    ChartColor { fill: "#6FECCE", stroke: "#63d4b8" },
    ChartColor { fill: "#4d38ff", stroke: "#4432e6" },
    ChartColor { fill: "#FF7AB2", stroke: "#e66e9e" },
    ChartColor { fill: "#FEDF1D", stroke: "#e6ca19" },
    ChartColor { fill: "#8C81FE", stroke: "#7e75e6" },
    ChartColor { fill: "#C8A67B", stroke: "#ad926c" },
    ChartColor { fill: "#BBBDBE", stroke: "#a2a4a6" },
    ChartColor { fill: "#FA6523", stroke: "#e05a1f" },
    ChartColor { fill: "#D0DE7D", stroke: "#b9c46e" },
    ChartColor { fill: "#F37675", stroke: "#d96868" },
    ChartColor { fill: "#FF0099", stroke: "#FF0099" },
    ChartColor { fill: "#CACED0", stroke: "#CACED0" },
    ChartColor { fill: "#EA7650", stroke: "#EA7650" },
    ChartColor { fill: "#73E6FF", stroke: "#73E6FF" },
];

/// Line colour of the index series.
pub const PRIMARY_LINE_COLOR: &str = "#6FECCE";

/// Line colour of the comparison series.
pub const COMPARISON_LINE_COLOR: &str = "#8C81FE";

/// Colour for the n-th stacked series. The last palette entry is never used.
#[must_use]
pub fn palette_color(index: usize) -> ChartColor {
    PALETTE[index % (PALETTE.len() - 1)]
}

/// Data keys a line chart can plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKey {
    Value,
    ComparisonValue,
}

impl SeriesKey {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesKey::Value => "value",
            SeriesKey::ComparisonValue => "comparison_value",
        }
    }
}

/// A legend item under a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    /// Data key the entry refers to (series key or asset column)
    pub key: String,
    pub label: String,
    pub color: String,
}

/// One X position of the line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePoint {
    pub day: NaiveDate,
    pub label: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_value: Option<f64>,
}

/// Everything the line renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartData {
    pub keys: Vec<SeriesKey>,
    pub points: Vec<LinePoint>,
    pub legend: Vec<LegendEntry>,
}

/// Everything the stacked-area renderer needs.
/// Every `legend` key is a stack layer, bottom to top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaChartData {
    pub rows: Vec<CompositionRow>,
    pub legend: Vec<LegendEntry>,
}

/// A chart payload, or the loading placeholder while there is nothing to plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ChartView<T> {
    Loading,
    Ready(T),
}

impl<T> ChartView<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, ChartView::Loading)
    }

    /// The payload, if ready.
    pub fn ready(self) -> Option<T> {
        match self {
            ChartView::Ready(data) => Some(data),
            ChartView::Loading => None,
        }
    }
}

/// Which chart the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartMode {
    Line,
    Composition,
}

/// The two chart toggles above the backtest chart.
///
/// "Show as composition" and "Show DPI performance" exclude each other:
/// a toggle cannot be switched on while the other one is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChartToggles {
    pub composition: bool,
    pub comparison: bool,
}

impl ChartToggles {
    /// The composition toggle is disabled while the comparison line is shown.
    #[must_use]
    pub fn composition_enabled(&self) -> bool {
        !self.comparison
    }

    /// The comparison toggle needs a usable comparison series and the line chart.
    #[must_use]
    pub fn comparison_enabled(&self, comparison_available: bool) -> bool {
        comparison_available && !self.composition
    }

    /// Flip the composition toggle. Switching on is ignored (returns `false`)
    /// while disabled; switching off is always accepted.
    pub fn set_composition(&mut self, on: bool) -> bool {
        if on && !self.composition_enabled() {
            return false;
        }
        self.composition = on;
        true
    }

    /// Flip the comparison toggle. Switching on is ignored (returns `false`)
    /// while disabled; switching off is always accepted.
    pub fn set_comparison(&mut self, on: bool, comparison_available: bool) -> bool {
        if on && !self.comparison_enabled(comparison_available) {
            return false;
        }
        self.comparison = on;
        true
    }

    #[must_use]
    pub fn mode(&self) -> ChartMode {
        if self.composition {
            ChartMode::Composition
        } else {
            ChartMode::Line
        }
    }
}
