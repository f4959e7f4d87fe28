pub mod errors;
pub mod format;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use std::future::Future;
use std::sync::Arc;

use errors::CoreError;
use models::{
    chart::{AreaChartData, ChartMode, ChartToggles, ChartView, LineChartData},
    composition::CompositionTable,
    day::DayRecord,
    rebalance::{RebalanceHistoryView, RebalanceRecord},
    settings::PageSettings,
    viewport::ViewportObserver,
    tooltip::{ComparisonTooltip, CompositionTooltip, PriceTooltip},
};
use providers::traits::SeriesProvider;
use services::{
    chart_service::ChartService,
    comparison_service::{ComparisonFeed, ComparisonService, ComparisonState},
    composition_service::CompositionService,
    loader_service::LoaderService,
    rebalance_service::{RebalancePager, RebalanceService},
    tooltip_service::TooltipService,
};
use storage::format::{CompositionDataset, RebalanceDataset};
use storage::manager::DatasetManager;

/// Everything derived from the two static datasets.
///
/// Built once at startup and shared read-only; a new dataset means a new
/// `DerivedData`, never an in-place update.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedData {
    /// Ascending by day
    pub days: Vec<DayRecord>,
    /// Stacked-composition rows with the cached column set
    pub composition: CompositionTable,
    /// Newest first, holdings sorted by weight
    pub rebalances: Vec<RebalanceRecord>,
}

impl DerivedData {
    /// Run the loader, the composition transform and the rebalance assembler.
    pub fn build(
        composition: CompositionDataset,
        rebalances: RebalanceDataset,
    ) -> Result<Self, CoreError> {
        let days = LoaderService::new().normalize(composition)?;
        if days.is_empty() {
            return Err(CoreError::EmptyDataset);
        }
        let composition = CompositionService::new().build_table(&days);
        let rebalances = RebalanceService::new().assemble(&days, rebalances)?;
        Ok(Self {
            days,
            composition,
            rebalances,
        })
    }

    /// First day of the backtest.
    #[must_use]
    pub fn start_day(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.day)
    }

    /// Look up a day record by date.
    #[must_use]
    pub fn day(&self, day: NaiveDate) -> Option<&DayRecord> {
        self.days
            .binary_search_by_key(&day, |d| d.day)
            .ok()
            .map(|idx| &self.days[idx])
    }
}

/// Main entry point for the TTI page core.
///
/// Holds the immutable derived data plus the per-session UI state: chart
/// toggles, the rebalance pager and the comparison feed. Viewport handling
/// lives in a separate [`ViewportObserver`] (see [`Self::viewport_observer`]).
#[must_use]
pub struct IndexDashboard {
    data: Arc<DerivedData>,
    settings: PageSettings,
    chart_service: ChartService,
    rebalance_service: RebalanceService,
    tooltip_service: TooltipService,
    comparison: ComparisonFeed,
    toggles: ChartToggles,
    pager: RebalancePager,
}

impl std::fmt::Debug for IndexDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexDashboard")
            .field("days", &self.data.days.len())
            .field("asset_columns", &self.data.composition.columns.len())
            .field("rebalance_groups", &self.data.rebalances.len())
            .field("toggles", &self.toggles)
            .field("pager", &self.pager)
            .field("comparison_available", &self.comparison.is_available())
            .finish()
    }
}

impl IndexDashboard {
    /// Build from already-decoded datasets.
    pub fn from_datasets(
        composition: CompositionDataset,
        rebalances: RebalanceDataset,
        settings: PageSettings,
    ) -> Result<Self, CoreError> {
        let data = DerivedData::build(composition, rebalances)?;
        log::info!(
            "dashboard ready: {} days, {} rebalance groups",
            data.days.len(),
            data.rebalances.len()
        );
        Ok(Self::build(data, settings))
    }

    /// Build from the two JSON datasets as raw bytes.
    /// Use this for WASM where the host handles asset loading.
    pub fn from_bytes(
        composition: &[u8],
        rebalances: &[u8],
        settings: PageSettings,
    ) -> Result<Self, CoreError> {
        Self::from_datasets(
            DatasetManager::composition_from_bytes(composition)?,
            DatasetManager::rebalances_from_bytes(rebalances)?,
            settings,
        )
    }

    /// Build from the two JSON datasets on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_files(
        composition_path: &str,
        rebalances_path: &str,
        settings: PageSettings,
    ) -> Result<Self, CoreError> {
        Self::from_datasets(
            DatasetManager::composition_from_file(composition_path)?,
            DatasetManager::rebalances_from_file(rebalances_path)?,
            settings,
        )
    }

    // ── Derived data ────────────────────────────────────────────────

    #[must_use]
    pub fn data(&self) -> &DerivedData {
        &self.data
    }

    #[must_use]
    pub fn days(&self) -> &[DayRecord] {
        &self.data.days
    }

    #[must_use]
    pub fn composition(&self) -> &CompositionTable {
        &self.data.composition
    }

    #[must_use]
    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    /// A fresh viewport observer for this page's breakpoint. The host owns
    /// it; resizes never touch the derived data.
    pub fn viewport_observer(&self) -> ViewportObserver {
        ViewportObserver::from_settings(&self.settings)
    }

    // ── Comparison series ───────────────────────────────────────────

    /// Future that fetches the comparison series and records the outcome in
    /// this session's feed. One fetch per session: resolves to `false`
    /// without fetching once an outcome is recorded, and drops the result
    /// when the session was torn down meanwhile.
    ///
    /// The future owns everything it needs, so the host can spawn it and
    /// keep rendering the index line meanwhile.
    pub fn load_comparison(
        &self,
        provider: Arc<dyn SeriesProvider>,
    ) -> impl Future<Output = bool> + 'static {
        let feed = self.comparison.clone();
        let data = Arc::clone(&self.data);
        let settings = self.settings.clone();
        async move {
            if feed.is_settled() {
                log::debug!("comparison series already settled, fetch skipped");
                return false;
            }
            log::debug!("fetching comparison series from {}", provider.name());
            let result = ComparisonService::new()
                .fetch(provider.as_ref(), &settings)
                .await;
            feed.complete(result, &data.days)
        }
    }

    /// Handle to the comparison slot, for hosts that run the fetch themselves.
    #[must_use]
    pub fn comparison_feed(&self) -> ComparisonFeed {
        self.comparison.clone()
    }

    #[must_use]
    pub fn comparison_state(&self) -> Arc<ComparisonState> {
        self.comparison.state()
    }

    /// True once the comparison series has loaded and overlaps the index.
    #[must_use]
    pub fn comparison_available(&self) -> bool {
        self.comparison.is_available()
    }

    /// Tear the session down; a comparison fetch still in flight will be
    /// discarded when it completes.
    pub fn teardown(&self) {
        log::debug!("dashboard teardown");
        self.comparison.close();
    }

    // ── Chart toggles ───────────────────────────────────────────────

    #[must_use]
    pub fn toggles(&self) -> ChartToggles {
        self.toggles
    }

    #[must_use]
    pub fn chart_mode(&self) -> ChartMode {
        self.toggles.mode()
    }

    #[must_use]
    pub fn composition_toggle_enabled(&self) -> bool {
        self.toggles.composition_enabled()
    }

    #[must_use]
    pub fn comparison_toggle_enabled(&self) -> bool {
        self.toggles.comparison_enabled(self.comparison_available())
    }

    /// Switch the stacked-composition view on/off. Returns `false` if the
    /// toggle is disabled (comparison line showing).
    pub fn set_composition_mode(&mut self, on: bool) -> bool {
        self.toggles.set_composition(on)
    }

    /// Switch the comparison line on/off. Returns `false` if the toggle is
    /// disabled (composition view, or no comparison series).
    pub fn set_comparison_mode(&mut self, on: bool) -> bool {
        let available = self.comparison_available();
        self.toggles.set_comparison(on, available)
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Line chart data for the current toggle state.
    pub fn line_chart(&self) -> ChartView<LineChartData> {
        let merged = if self.toggles.comparison {
            self.comparison.merged()
        } else {
            Vec::new()
        };
        let comparison = (!merged.is_empty()).then_some(merged.as_slice());
        self.chart_service
            .line_chart(&self.data.days, comparison, &self.settings)
    }

    /// Stacked-area chart data.
    pub fn area_chart(&self) -> ChartView<AreaChartData> {
        self.chart_service.area_chart(&self.data.composition)
    }

    // ── Tooltips ────────────────────────────────────────────────────

    #[must_use]
    pub fn price_tooltip(&self, day: NaiveDate) -> Option<PriceTooltip> {
        self.data
            .day(day)
            .map(|d| self.tooltip_service.price_tooltip(d))
    }

    #[must_use]
    pub fn comparison_tooltip(&self, day: NaiveDate) -> Option<ComparisonTooltip> {
        self.comparison
            .merged()
            .iter()
            .find(|p| p.day == day)
            .map(|p| self.tooltip_service.comparison_tooltip(p, &self.settings))
    }

    #[must_use]
    pub fn composition_tooltip(&self, day: NaiveDate) -> Option<CompositionTooltip> {
        let table = &self.data.composition;
        table
            .rows
            .binary_search_by_key(&day, |r| r.day)
            .ok()
            .map(|idx| {
                self.tooltip_service
                    .composition_tooltip(&table.rows[idx], table)
            })
    }

    // ── Rebalance history ───────────────────────────────────────────

    /// All rebalance records, newest first.
    #[must_use]
    pub fn rebalance_records(&self) -> &[RebalanceRecord] {
        &self.data.rebalances
    }

    /// The formatted groups inside the current pager window.
    #[must_use]
    pub fn rebalance_history(&self) -> RebalanceHistoryView {
        self.rebalance_service
            .history_view(&self.data.rebalances, &self.pager, &self.settings)
    }

    /// Press "Show more" / "Show less". Returns the new window size.
    pub fn show_more_rebalances(&mut self) -> usize {
        self.pager.show_more(self.data.rebalances.len())
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(data: DerivedData, settings: PageSettings) -> Self {
        let pager = RebalancePager::new(settings.page_size);
        Self {
            data: Arc::new(data),
            settings,
            chart_service: ChartService::new(),
            rebalance_service: RebalanceService::new(),
            tooltip_service: TooltipService::new(),
            comparison: ComparisonFeed::new(),
            toggles: ChartToggles::default(),
            pager,
        }
    }
}
