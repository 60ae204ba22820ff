use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public CoinGecko v3 endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Tunables of the dashboard core.
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Base URL of the price/search service (no trailing slash needed).
    pub api_base_url: String,

    /// Trailing debounce window for search-as-you-type, in milliseconds.
    pub debounce_ms: u64,

    /// How long a cached chart series counts as fresh, in seconds.
    pub cache_ttl_secs: u64,

    /// Maximum number of search results kept from one response.
    pub search_result_limit: usize,

    /// Maximum number of entries in the recent assets view.
    pub recent_limit: usize,

    /// HTTP timeout. `None` leaves the transport default in place.
    pub request_timeout_secs: Option<u64>,
}

impl DashboardSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn cache_ttl_millis(&self) -> i64 {
        i64::try_from(self.cache_ttl_secs.saturating_mul(1000)).unwrap_or(i64::MAX)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            debounce_ms: 300,
            cache_ttl_secs: 5 * 60,
            search_result_limit: 10,
            recent_limit: 10,
            request_timeout_secs: None,
        }
    }
}
