use std::collections::HashSet;

use crate::errors::CoreError;
use crate::format::{format_day_label, parse_day_key};
use crate::models::day::DayRecord;
use crate::storage::format::{CompositionDataset, RawDayEntry};

/// Turns the decoded composition dataset into the ordered day sequence.
///
/// Pure business logic: no I/O. Any malformed entry fails the whole load,
/// since the dataset is a build-time asset rather than user input.
pub struct LoaderService;

impl LoaderService {
    pub fn new() -> Self {
        Self
    }

    /// Validate every entry and return the days sorted ascending by date.
    ///
    /// Fails on a non-canonical date key, a missing or non-numeric `value`,
    /// a missing `composition`, duplicate holding ids within a day, or a
    /// holding outside its numeric domain.
    pub fn normalize(&self, dataset: CompositionDataset) -> Result<Vec<DayRecord>, CoreError> {
        let mut days = dataset
            .into_iter()
            .map(|(key, entry)| self.normalize_day(&key, entry))
            .collect::<Result<Vec<_>, _>>()?;

        // Source map order is arbitrary; keys are canonical, so dates are unique.
        days.sort_by_key(|d| d.day);

        log::debug!(
            "normalized {} days ({} → {})",
            days.len(),
            days.first().map(DayRecord::day_key).unwrap_or_default(),
            days.last().map(DayRecord::day_key).unwrap_or_default(),
        );
        Ok(days)
    }

    fn normalize_day(&self, key: &str, entry: RawDayEntry) -> Result<DayRecord, CoreError> {
        let day = parse_day_key(key)?;

        let value = entry
            .value
            .ok_or_else(|| CoreError::malformed(key, "missing value"))?
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CoreError::malformed(key, "value is not a number"))?;

        let holdings = entry
            .composition
            .ok_or_else(|| CoreError::malformed(key, "missing composition"))?;

        let mut seen = HashSet::with_capacity(holdings.len());
        for holding in &holdings {
            holding.validate(key)?;
            if !seen.insert(holding.id.as_str()) {
                return Err(CoreError::malformed(
                    key,
                    format!("duplicate holding id {}", holding.id),
                ));
            }
        }

        Ok(DayRecord {
            day,
            label: format_day_label(day),
            value,
            holdings,
        })
    }
}

impl Default for LoaderService {
    fn default() -> Self {
        Self::new()
    }
}
