use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::asset::SearchResult;
use crate::models::chart::ChartSeries;
use crate::models::time_range::TimeRange;

/// Trait abstraction over the remote price/search service.
///
/// The coordinators only talk to this trait, so the HTTP implementation can
/// be swapped (or mocked in tests) without touching them.
/// Implementations perform no retries; retry policy belongs to the caller.
#[async_trait]
pub trait PriceApi: Send + Sync {
    /// Human-readable name of the service (for logs).
    fn name(&self) -> &str;

    /// Free-text coin search.
    ///
    /// An empty or whitespace-only query returns no results without any
    /// network call. At most `search_result_limit` results are returned, in
    /// the service's relevance order.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, CoreError>;

    /// Daily USD price, market cap and volume history of `id` over `range`.
    ///
    /// The returned series carries a fresh `last_fetched_at_millis` stamp.
    async fn fetch_chart(&self, id: &str, range: TimeRange) -> Result<ChartSeries, CoreError>;
}
