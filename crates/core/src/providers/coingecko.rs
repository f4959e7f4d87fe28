use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::SeriesProvider;
use crate::errors::CoreError;
use crate::models::series::ExternalSeriesPoint;
use crate::models::settings::ComparisonSource;

const PROVIDER: &str = "CoinGecko";

/// CoinGecko `market_chart` provider for the comparison index.
///
/// - **Free**: no API key required for the public endpoint.
/// - **Endpoint**: `/coins/{id}/market_chart?vs_currency=usd&days=max&interval=daily`
/// - **Shape**: `{ "prices": [[timestamp_millis, value], ...] }`
pub struct CoinGeckoProvider {
    client: Client,
    source: ComparisonSource,
}

impl CoinGeckoProvider {
    pub fn new(source: ComparisonSource) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(source.timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            source,
        }
    }

    /// Full request URL for the configured coin.
    pub fn market_chart_url(&self) -> String {
        format!(
            "{}/coins/{}/market_chart?vs_currency={}&days=max&interval=daily",
            self.source.base_url.trim_end_matches('/'),
            self.source.coin_id,
            self.source.vs_currency,
        )
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new(ComparisonSource::default())
    }
}

// ── CoinGecko API response types ────────────────────────────────────

#[derive(Deserialize)]
struct MarketChartResponse {
    prices: Vec<(f64, Option<f64>)>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Convert raw `[timestamp_millis, value]` pairs into daily points.
///
/// Drops points before `since`, null or non-finite values, and every point
/// after the first on the same UTC day (CoinGecko appends an intraday
/// "now" point to daily series).
pub fn series_from_prices(
    prices: &[(f64, Option<f64>)],
    since: DateTime<Utc>,
) -> Vec<ExternalSeriesPoint> {
    let since_ms = since.timestamp_millis();
    let mut points: Vec<ExternalSeriesPoint> = prices
        .iter()
        .filter_map(|&(ts, value)| {
            let ts = ts as i64;
            if ts < since_ms {
                return None;
            }
            let value = value.filter(|v| v.is_finite())?;
            let dt = DateTime::from_timestamp_millis(ts)?;
            Some(ExternalSeriesPoint {
                day: dt.date_naive(),
                value,
            })
        })
        .collect();

    points.sort_by_key(|p| p.day);
    points.dedup_by_key(|p| p.day);
    points
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl SeriesProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch_daily_series(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<ExternalSeriesPoint>, CoreError> {
        let url = self.market_chart_url();
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message.or(b.error))
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message,
            });
        }

        let chart: MarketChartResponse = resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse market chart for {}: {e}", self.source.coin_id),
        })?;

        let points = series_from_prices(&chart.prices, since);
        log::debug!(
            "{PROVIDER}: {} of {} points for {} kept since {since}",
            points.len(),
            chart.prices.len(),
            self.source.coin_id
        );
        Ok(points)
    }
}
