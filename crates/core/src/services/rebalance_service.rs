use crate::errors::CoreError;
use crate::format::{label_for_percentage, label_for_price, month_name, parse_day_key, PLACEHOLDER};
use crate::models::day::DayRecord;
use crate::models::rebalance::{
    RebalanceGroupView, RebalanceHistoryView, RebalanceHolding, RebalanceRecord,
    RebalanceRowView, RebalanceTotalView,
};
use crate::models::settings::PageSettings;
use crate::storage::format::RebalanceDataset;

const BASE_HEADERS: [&str; 3] = ["Asset", "Allocation ($)", "Allocation (%)"];
const REBALANCE_HEADER: &str = "Rebalance (%)";

/// Assembles the rebalance history shown under the chart.
///
/// The first group is not stored anywhere: it is the initial allocation,
/// rebuilt from the first day of the composition dataset. Every later group
/// is a precomputed monthly rebalance from the static history.
pub struct RebalanceService;

impl RebalanceService {
    pub fn new() -> Self {
        Self
    }

    /// Initial allocation record built from the first day's holdings.
    pub fn synthesize_initial(&self, first: &DayRecord) -> RebalanceRecord {
        RebalanceRecord {
            as_of: first.day,
            holdings: first
                .holdings
                .iter()
                .map(|h| RebalanceHolding {
                    component: h.component.clone(),
                    id: Some(h.id.clone()),
                    weight_pre: None,
                    weight_post: h.weight,
                    rebalance: None,
                    value: h.value(),
                })
                .collect(),
            total_value: first.value,
            total_weight_post: 1.0,
            avg_abs_rebalance: None,
        }
    }

    /// Convert the stored history into records, ascending by date.
    pub fn stored_records(&self, dataset: RebalanceDataset) -> Result<Vec<RebalanceRecord>, CoreError> {
        let mut records = dataset
            .into_iter()
            .map(|(key, stored)| {
                Ok(RebalanceRecord {
                    as_of: parse_day_key(&key)?,
                    holdings: stored.composition,
                    total_value: stored.value_total,
                    total_weight_post: stored.weight_post_total,
                    avg_abs_rebalance: stored.rebalance_abs_avg,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;
        records.sort_by_key(|r| r.as_of);
        Ok(records)
    }

    /// The full history, newest first, with every group's holdings sorted.
    ///
    /// Fails when there are no days to build the initial allocation from,
    /// or when a stored record claims the first day (it would shadow the
    /// initial allocation).
    pub fn assemble(
        &self,
        days: &[DayRecord],
        dataset: RebalanceDataset,
    ) -> Result<Vec<RebalanceRecord>, CoreError> {
        let first = days.first().ok_or(CoreError::EmptyDataset)?;
        let stored = self.stored_records(dataset)?;

        if let Some(conflict) = stored.iter().find(|r| r.as_of == first.day) {
            return Err(CoreError::malformed(
                conflict.as_of.format("%Y-%m-%d").to_string(),
                "stored rebalance conflicts with the initial allocation",
            ));
        }

        let mut records = Vec::with_capacity(stored.len() + 1);
        records.push(self.synthesize_initial(first));
        records.extend(stored);

        for record in &mut records {
            self.sort_holdings(&mut record.holdings);
        }
        records.sort_by(|a, b| b.as_of.cmp(&a.as_of));

        log::debug!("rebalance history: {} groups", records.len());
        Ok(records)
    }

    /// Largest `weight_post` first. The sort is stable, so equal weights keep
    /// their input order.
    pub fn sort_holdings(&self, holdings: &mut [RebalanceHolding]) {
        holdings.sort_by(|a, b| b.weight_post.total_cmp(&a.weight_post));
    }

    /// Group heading, e.g. "Beginning of month allocation - March".
    pub fn title(&self, record: &RebalanceRecord, settings: &PageSettings) -> String {
        let kind = if record.as_of == settings.launch_date {
            "Initial"
        } else {
            "Beginning of month"
        };
        format!("{kind} allocation - {}", month_name(record.as_of))
    }

    /// Format one record into the table the renderer draws.
    pub fn group_view(&self, record: &RebalanceRecord, settings: &PageSettings) -> RebalanceGroupView {
        let shows_rebalance = record.shows_rebalance();

        let mut headers: Vec<String> = BASE_HEADERS.iter().map(|h| h.to_string()).collect();
        if shows_rebalance {
            headers.push(REBALANCE_HEADER.to_string());
        }

        let rows = record
            .holdings
            .iter()
            .map(|h| RebalanceRowView {
                component: h.component.clone(),
                link: h.id.as_deref().map(|id| settings.project_link(id)),
                allocation_value: label_for_price(Some(h.value)),
                allocation_weight: label_for_percentage(h.weight_post * 100.0, false),
                rebalance: shows_rebalance.then(|| {
                    h.rebalance
                        .map(|r| label_for_percentage(r * 100.0, true))
                        .unwrap_or_else(|| PLACEHOLDER.to_string())
                }),
            })
            .collect();

        let total = RebalanceTotalView {
            label: "Total".to_string(),
            value: label_for_price(Some(record.total_value)),
            weight: label_for_percentage(record.total_weight_post * 100.0, false),
            rebalance: record
                .avg_abs_rebalance
                .map(|avg| format!("Avg. {}", label_for_percentage(avg * 100.0, false))),
        };

        RebalanceGroupView {
            as_of: record.as_of,
            title: self.title(record, settings),
            headers,
            rows,
            total,
        }
    }

    /// The groups inside the pager's window, plus the pager label.
    pub fn history_view(
        &self,
        records: &[RebalanceRecord],
        pager: &RebalancePager,
        settings: &PageSettings,
    ) -> RebalanceHistoryView {
        let total = records.len();
        RebalanceHistoryView {
            groups: records[..pager.window(total)]
                .iter()
                .map(|r| self.group_view(r, settings))
                .collect(),
            total_groups: total,
            pager_label: pager.label(total).to_string(),
        }
    }
}

impl Default for RebalanceService {
    fn default() -> Self {
        Self::new()
    }
}

// ── Pagination ──────────────────────────────────────────────────────

/// Window over the newest-first rebalance groups.
///
/// "Show more" grows the window by one page, capped at the group count.
/// Once every group is visible the same control collapses back to one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebalancePager {
    visible: usize,
    page_size: usize,
}

impl RebalancePager {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            visible: page_size,
            page_size,
        }
    }

    /// Requested window size (may exceed the number of groups).
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Number of groups actually shown out of `total`.
    pub fn window(&self, total: usize) -> usize {
        self.visible.min(total)
    }

    /// Whether "Show more" would reveal more groups.
    pub fn has_more(&self, total: usize) -> bool {
        self.visible < total
    }

    /// Advance the pager; returns the new window size.
    pub fn show_more(&mut self, total: usize) -> usize {
        self.visible = if self.has_more(total) {
            (self.visible + self.page_size).min(total)
        } else {
            self.page_size
        };
        self.visible
    }

    pub fn label(&self, total: usize) -> &'static str {
        if self.has_more(total) {
            "Show more"
        } else {
            "Show less"
        }
    }
}

impl Default for RebalancePager {
    fn default() -> Self {
        Self::new(3)
    }
}
