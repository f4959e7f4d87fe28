use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::chart::{palette_color, LegendEntry};
use crate::models::composition::{CompositionRow, CompositionTable, RESERVED_KEYS};
use crate::models::day::DayRecord;

/// Flattens day records into stacked-composition rows.
///
/// The column set is derived once per dataset and stored on the table,
/// so renders never recompute it.
pub struct CompositionService;

impl CompositionService {
    pub fn new() -> Self {
        Self
    }

    /// One row per day: asset name → `tokens * price`.
    ///
    /// If two holdings on the same day share a name, the later one wins.
    /// Asset names colliding with the reserved `day`/`label` keys are skipped.
    pub fn to_rows(&self, days: &[DayRecord]) -> Vec<CompositionRow> {
        days.iter()
            .map(|d| {
                let mut values = BTreeMap::new();
                for holding in &d.holdings {
                    if RESERVED_KEYS.contains(&holding.component.as_str()) {
                        log::warn!(
                            "{}: asset name {:?} collides with a reserved key, skipped",
                            d.day_key(),
                            holding.component
                        );
                        continue;
                    }
                    values.insert(holding.component.clone(), holding.value());
                }
                CompositionRow {
                    day: d.day,
                    label: d.label.clone(),
                    values,
                }
            })
            .collect()
    }

    /// Union of asset columns across all rows, ordered by the latest row's
    /// value (largest first, absent counts as zero), then by name.
    pub fn columns(&self, table: &CompositionTable) -> Vec<String> {
        let union: BTreeSet<&String> = table.rows.iter().flat_map(|r| r.values.keys()).collect();
        let mut columns: Vec<String> = union.into_iter().cloned().collect();

        if let Some(latest) = table.latest() {
            // BTreeSet already gave name order; a stable sort keeps it for ties.
            columns.sort_by(|a, b| {
                latest
                    .value_or_zero(b)
                    .partial_cmp(&latest.value_or_zero(a))
                    .unwrap_or(Ordering::Equal)
            });
        }
        columns
    }

    /// Build the full table (rows + cached column set).
    pub fn build_table(&self, days: &[DayRecord]) -> CompositionTable {
        let mut table = CompositionTable {
            rows: self.to_rows(days),
            columns: Vec::new(),
        };
        table.columns = self.columns(&table);
        log::debug!(
            "composition table: {} rows, {} asset columns",
            table.rows.len(),
            table.columns.len()
        );
        table
    }

    /// Legend entries in column order, each with its palette colour.
    pub fn legend(&self, table: &CompositionTable) -> Vec<LegendEntry> {
        table
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| LegendEntry {
                key: column.clone(),
                label: column.clone(),
                color: palette_color(i).stroke.to_string(),
            })
            .collect()
    }
}

impl Default for CompositionService {
    fn default() -> Self {
        Self::new()
    }
}
