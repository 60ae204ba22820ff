use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::errors::CoreError;
use crate::models::asset::SearchResult;
use crate::models::chart::{ChartSeries, SeriesPoint};
use crate::models::settings::DashboardSettings;
use crate::models::time_range::TimeRange;
use crate::store::now_millis;
use super::traits::PriceApi;

/// Prices are always requested in US dollars.
const VS_CURRENCY: &str = "usd";

/// CoinGecko v3 client for coin search and market charts.
///
/// - **Free tier**: no API key, but aggressively rate limited (HTTP 429).
/// - **Endpoints**: `/search?query=`, `/coins/{id}/market_chart`
///
/// Every call is a single GET. Status codes are translated into typed
/// errors; nothing is retried here.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    search_result_limit: usize,
}

impl CoinGeckoClient {
    /// Build the client from settings. Fails when the HTTP transport cannot
    /// be initialized with the configured options.
    pub fn new(settings: &DashboardSettings) -> Result<Self, CoreError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            tracing::error!(error = %e, "failed to build HTTP client");
            CoreError::from(e)
        })?;
        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            search_result_limit: settings.search_result_limit,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self, query: &str) -> String {
        format!("{}/search?query={}", self.base_url, urlencoding::encode(query))
    }

    fn market_chart_url(&self, id: &str, range: TimeRange) -> String {
        format!(
            "{}/coins/{}/market_chart?vs_currency={VS_CURRENCY}&days={}&interval=daily",
            self.base_url,
            urlencoding::encode(id),
            range.as_days()
        )
    }
}

/// Map a non-success status to the endpoint's error. 429 is shared by all endpoints.
fn status_error(status: StatusCode, otherwise: CoreError) -> CoreError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        CoreError::RateLimited
    } else {
        otherwise
    }
}

// ── CoinGecko API response types ────────────────────────────────────

#[derive(Deserialize)]
struct SearchResponse {
    coins: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct MarketChartResponse {
    prices: Vec<SeriesPoint>,
    market_caps: Vec<SeriesPoint>,
    total_volumes: Vec<SeriesPoint>,
}

#[async_trait]
impl PriceApi for CoinGeckoClient {
    fn name(&self) -> &str {
        "CoinGecko"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, CoreError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let resp = self.client.get(self.search_url(query)).send().await?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(provider = self.name(), status = status.as_u16(), "search request rejected");
            return Err(status_error(status, CoreError::SearchFailed));
        }

        let body = resp.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        let mut coins = parsed.coins;
        coins.truncate(self.search_result_limit);

        tracing::debug!(provider = self.name(), results = coins.len(), "search completed");
        Ok(coins)
    }

    async fn fetch_chart(&self, id: &str, range: TimeRange) -> Result<ChartSeries, CoreError> {
        let resp = self
            .client
            .get(self.market_chart_url(id, range))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(
                provider = self.name(),
                asset_id = id,
                range = range.as_days(),
                status = status.as_u16(),
                "market chart request rejected"
            );
            return Err(status_error(status, CoreError::ChartFetchFailed));
        }

        let body = resp.text().await?;
        let chart: MarketChartResponse = serde_json::from_str(&body)?;

        tracing::debug!(
            provider = self.name(),
            asset_id = id,
            range = range.as_days(),
            points = chart.prices.len(),
            "market chart fetched"
        );
        Ok(ChartSeries {
            prices: chart.prices,
            market_caps: chart.market_caps,
            total_volumes: chart.total_volumes,
            last_fetched_at_millis: now_millis(),
        })
    }
}
