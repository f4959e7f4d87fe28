use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::CoreError;
use crate::models::day::DayRecord;
use crate::models::series::{DualSeriesPoint, ExternalSeriesPoint};
use crate::models::settings::PageSettings;
use crate::providers::traits::SeriesProvider;

/// Fetches the comparison series and lines it up with the index.
///
/// The merge is a plain inner join on the day: both lines are plotted over
/// the same X domain, so a day missing from either side is left out.
pub struct ComparisonService;

impl ComparisonService {
    pub fn new() -> Self {
        Self
    }

    /// Single fetch attempt, filtered to the epoch and to the launch day.
    /// No retry: the comparison line is a best-effort overlay.
    pub async fn fetch(
        &self,
        provider: &dyn SeriesProvider,
        settings: &PageSettings,
    ) -> Result<Vec<ExternalSeriesPoint>, CoreError> {
        let series = provider
            .fetch_daily_series(settings.comparison_epoch())
            .await?;
        Ok(self.filter_since(series, settings.launch_date))
    }

    /// Keep points dated on or after `start`.
    pub fn filter_since(
        &self,
        series: Vec<ExternalSeriesPoint>,
        start: NaiveDate,
    ) -> Vec<ExternalSeriesPoint> {
        series.into_iter().filter(|p| p.day >= start).collect()
    }

    /// Inner join by day, in primary order. If the secondary series repeats
    /// a day, its first point is used.
    pub fn merge(&self, days: &[DayRecord], series: &[ExternalSeriesPoint]) -> Vec<DualSeriesPoint> {
        let mut by_day: HashMap<NaiveDate, f64> = HashMap::with_capacity(series.len());
        for point in series {
            by_day.entry(point.day).or_insert(point.value);
        }

        days.iter()
            .filter_map(|d| {
                let comparison_value = *by_day.get(&d.day)?;
                Some(DualSeriesPoint {
                    day: d.day,
                    label: d.label.clone(),
                    value: d.value,
                    comparison_value,
                })
            })
            .collect()
    }
}

impl Default for ComparisonService {
    fn default() -> Self {
        Self::new()
    }
}

// ── Session slot ────────────────────────────────────────────────────

/// Lifecycle of the comparison series within one page session.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonState {
    /// Fetch not finished yet; the index renders alone.
    Pending,
    /// Fetch succeeded. `merged` may be empty if no days overlap.
    Ready {
        series: Vec<ExternalSeriesPoint>,
        merged: Vec<DualSeriesPoint>,
    },
    /// Fetch failed; the comparison toggle stays disabled.
    Failed(String),
}

/// Shared slot the background fetch writes its outcome into.
///
/// Exactly one write (the first fetch completion) and any number of readers.
/// The write replaces the whole state at once, so readers see either
/// `Pending` or the outcome. Later completions, and any completion after
/// `close()`, are dropped.
#[derive(Debug, Clone)]
pub struct ComparisonFeed {
    state: Arc<Mutex<Arc<ComparisonState>>>,
    alive: Arc<AtomicBool>,
}

impl ComparisonFeed {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(Arc::new(ComparisonState::Pending))),
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> Arc<ComparisonState> {
        let guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Whether there is something to draw: a successful fetch whose merge
    /// with the index is non-empty.
    pub fn is_available(&self) -> bool {
        matches!(&*self.state(), ComparisonState::Ready { merged, .. } if !merged.is_empty())
    }

    /// Merged dual series, empty unless the fetch succeeded.
    pub fn merged(&self) -> Vec<DualSeriesPoint> {
        match &*self.state() {
            ComparisonState::Ready { merged, .. } => merged.clone(),
            _ => Vec::new(),
        }
    }

    /// Whether a fetch outcome has already been recorded.
    pub fn is_settled(&self) -> bool {
        !matches!(&*self.state(), ComparisonState::Pending)
    }

    /// Record the fetch outcome. Write-once: returns `false` (and writes
    /// nothing) when the session was torn down or an outcome is already set.
    pub fn complete(
        &self,
        result: Result<Vec<ExternalSeriesPoint>, CoreError>,
        days: &[DayRecord],
    ) -> bool {
        if !self.is_alive() {
            log::warn!("comparison fetch finished after teardown, result dropped");
            return false;
        }
        if self.is_settled() {
            log::warn!("comparison series already settled, second result dropped");
            return false;
        }

        let next = match result {
            Ok(series) => {
                let merged = ComparisonService::new().merge(days, &series);
                log::info!(
                    "comparison series ready: {} points, {} overlapping days",
                    series.len(),
                    merged.len()
                );
                ComparisonState::Ready { series, merged }
            }
            Err(e) => {
                log::warn!("comparison series unavailable: {e}");
                ComparisonState::Failed(e.to_string())
            }
        };

        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        // close() takes the same lock, so these checks cannot go stale.
        if !self.is_alive() || !matches!(**guard, ComparisonState::Pending) {
            return false;
        }
        *guard = Arc::new(next);
        true
    }

    /// Mark the owning session as torn down.
    pub fn close(&self) {
        let _guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        self.alive.store(false, Ordering::SeqCst);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}

impl Default for ComparisonFeed {
    fn default() -> Self {
        Self::new()
    }
}
