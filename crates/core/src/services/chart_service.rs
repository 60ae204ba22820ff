use std::sync::Arc;

use futures::future::join_all;

use crate::models::asset::AssetId;
use crate::models::chart::{color_for_index, format_local_date, ChartLine, ChartRow, ChartSeries};
use crate::models::time_range::TimeRange;
use crate::providers::traits::PriceApi;
use crate::store::{now_millis, AssetStore, SharedStore};
use super::notifier::{Notifier, Severity};

/// Shown instead of the chart when nothing is selected.
pub const EMPTY_SELECTION_PLACEHOLDER: &str = "Select assets to view chart";

/// Default freshness window: 5 minutes.
pub const CACHE_DURATION_MILLIS: i64 = 5 * 60 * 1000;

/// Decides whether a cached series can be shown without refetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    pub ttl_millis: i64,
}

impl FreshnessPolicy {
    pub fn new(ttl_millis: i64) -> Self {
        Self { ttl_millis }
    }

    /// Fresh iff the entry exists, is not stale-marked, and is at most
    /// `ttl_millis` old at `now`.
    pub fn is_fresh(&self, entry: Option<&ChartSeries>, now: i64) -> bool {
        match entry {
            Some(series) if !series.is_stale_marked() => {
                now - series.last_fetched_at_millis <= self.ttl_millis
            }
            _ => false,
        }
    }
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self::new(CACHE_DURATION_MILLIS)
    }
}

/// Result of one per-asset freshness evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Cached data was fresh; no request was made.
    Fresh,
    /// New data was fetched and stored.
    Fetched,
    /// The request failed; previously cached data (if any) is untouched.
    Failed,
}

/// Keeps the chart cache of every selected asset fresh and derives the
/// merged chart table from it.
///
/// Every selection or range change should be followed by `sync()`, which
/// re-evaluates all selected assets, not only new ones: a range change
/// affects the freshness of each of them.
pub struct ChartService {
    api: Arc<dyn PriceApi>,
    notifier: Arc<dyn Notifier>,
    store: SharedStore,
    policy: FreshnessPolicy,
}

impl ChartService {
    pub fn new(
        api: Arc<dyn PriceApi>,
        notifier: Arc<dyn Notifier>,
        store: SharedStore,
        policy: FreshnessPolicy,
    ) -> Self {
        Self {
            api,
            notifier,
            store,
            policy,
        }
    }

    pub fn policy(&self) -> FreshnessPolicy {
        self.policy
    }

    // ── Fetch decisions ─────────────────────────────────────────────

    /// Fetch (id, active range) unless the cached series is fresh.
    ///
    /// A failed fetch is reported through the notifier and never removes the
    /// series already on display.
    pub async fn ensure_asset(&self, id: &AssetId) -> FetchOutcome {
        let (range, fresh) = self.store.read(|s| {
            let range = s.time_range();
            (range, self.policy.is_fresh(s.series(id, range), now_millis()))
        });
        if fresh {
            return FetchOutcome::Fresh;
        }

        self.store.set_loading(true);
        let outcome = match self.api.fetch_chart(id.as_str(), range).await {
            Ok(series) => {
                tracing::debug!(asset_id = %id, range = range.as_days(), "chart data cached");
                self.store.set_asset_data(id, range, series);
                FetchOutcome::Fetched
            }
            Err(e) => {
                tracing::warn!(asset_id = %id, range = range.as_days(), error = %e, "chart fetch failed");
                self.notifier.notify(&e.user_message(), Severity::Error);
                FetchOutcome::Failed
            }
        };
        self.store.set_loading(false);
        outcome
    }

    /// Run the freshness decision for every selected asset, concurrently.
    /// One asset failing does not affect the others.
    pub async fn sync(&self) -> Vec<(AssetId, FetchOutcome)> {
        let selected = self.store.selected_assets();
        let outcomes = join_all(selected.iter().map(|id| self.ensure_asset(id))).await;
        selected.into_iter().zip(outcomes).collect()
    }

    /// Switch the active range and bring every selected asset up to date.
    pub async fn set_time_range(&self, range: TimeRange) -> Vec<(AssetId, FetchOutcome)> {
        self.store.set_time_range(range);
        self.sync().await
    }

    /// Replace the selection and bring every selected asset up to date.
    pub async fn set_selection(&self, ids: Vec<AssetId>) -> Vec<(AssetId, FetchOutcome)> {
        self.store.set_selected_assets(ids);
        self.sync().await
    }

    /// Manual refresh: stale-mark every selected asset for the active range,
    /// then refetch. Old series stay visible until the new ones arrive.
    pub async fn refresh_all(&self) -> Vec<(AssetId, FetchOutcome)> {
        self.store.transaction(|store| {
            let range = store.time_range();
            for id in store.selected_assets().to_vec() {
                store.refresh_data(&id, range);
            }
        });
        self.sync().await
    }

    // ── View model ──────────────────────────────────────────────────

    pub fn merged_rows(&self) -> Vec<ChartRow> {
        self.store.read(merge_rows)
    }

    pub fn lines(&self) -> Vec<ChartLine> {
        self.store.read(chart_lines)
    }

    pub fn title(&self) -> String {
        chart_title(self.store.time_range())
    }
}

/// Merge the selected assets' price series for the active range into rows.
///
/// The first selected asset is the anchor: its price points give the row
/// count and each row's date. Every other asset contributes its i-th price
/// to row i, or `None` when its series is shorter. Alignment is by position,
/// not by timestamp, so series with different timestamps line up row by row.
pub fn merge_rows(store: &AssetStore) -> Vec<ChartRow> {
    let selected = store.selected_assets();
    let Some(anchor) = selected.first() else {
        return Vec::new();
    };
    let range = store.time_range();
    let anchor_prices = match store.series(anchor, range) {
        Some(series) => &series.prices,
        None => return Vec::new(),
    };

    anchor_prices
        .iter()
        .enumerate()
        .map(|(i, point)| ChartRow {
            date: format_local_date(point.timestamp_millis),
            timestamp_millis: point.timestamp_millis,
            values: selected
                .iter()
                .map(|id| {
                    let value = store
                        .series(id, range)
                        .and_then(|s| s.prices.get(i))
                        .map(|p| p.value);
                    (id.clone(), value)
                })
                .collect(),
        })
        .collect()
}

/// One line per selected asset, colored by selection order.
pub fn chart_lines(store: &AssetStore) -> Vec<ChartLine> {
    store
        .selected_assets()
        .iter()
        .enumerate()
        .map(|(idx, id)| ChartLine {
            asset_id: id.clone(),
            label: store.label_for(id),
            color: color_for_index(idx),
        })
        .collect()
}

pub fn chart_title(range: TimeRange) -> String {
    format!("Price Chart ({} days)", range.as_days())
}
