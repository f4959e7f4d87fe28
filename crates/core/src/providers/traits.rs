use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::CoreError;
use crate::models::series::ExternalSeriesPoint;

/// Source of the secondary daily series drawn next to the index.
///
/// The page only ever needs one read-only series, so the contract is a
/// single call. Swapping market-data vendors means one new implementation.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait SeriesProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the full daily series, keeping only points at or after `since`.
    /// Returns points sorted by day, at most one per day.
    async fn fetch_daily_series(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<ExternalSeriesPoint>, CoreError>;
}
