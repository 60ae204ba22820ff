use std::collections::HashMap;

use crate::models::asset::{AssetId, AssetMetadata};
use crate::models::chart::ChartSeries;
use crate::models::time_range::TimeRange;

/// Asset id → time range → cached series.
pub type AssetCacheEntry = HashMap<TimeRange, ChartSeries>;

/// Asset selected when the dashboard starts.
pub const DEFAULT_ASSET: &str = "bitcoin";

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Single source of truth of the dashboard: selection, chart cache,
/// metadata, recency and UI flags.
///
/// Fields are private; every state transition goes through a named
/// operation. None of the operations can fail.
///
/// Invariants:
/// - `selected_assets` keeps insertion order and never holds duplicates.
/// - `remove_asset` leaves no cache, metadata or recency key behind.
/// - `last_fetched_at_millis` of a cached series is stamped here, not by callers.
#[derive(Debug, Clone)]
pub struct AssetStore {
    selected_assets: Vec<AssetId>,
    data: HashMap<AssetId, AssetCacheEntry>,
    asset_details: HashMap<AssetId, AssetMetadata>,
    time_range: TimeRange,
    loading: bool,
    last_accessed: HashMap<AssetId, i64>,
}

impl AssetStore {
    /// Initial state: `["bitcoin"]` selected, 7-day range, empty maps.
    pub fn new() -> Self {
        Self {
            selected_assets: vec![AssetId::from(DEFAULT_ASSET)],
            data: HashMap::new(),
            asset_details: HashMap::new(),
            time_range: TimeRange::default(),
            loading: false,
            last_accessed: HashMap::new(),
        }
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Replace the selection wholesale. Cache and metadata are untouched.
    /// Repeated ids keep their first position.
    pub fn set_selected_assets(&mut self, ids: Vec<AssetId>) {
        let mut deduped: Vec<AssetId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !deduped.contains(&id) {
                deduped.push(id);
            }
        }
        self.selected_assets = deduped;
    }

    /// Store a freshly fetched series for (id, range).
    ///
    /// The freshness stamp is overwritten with the current time whatever the
    /// caller put in it; recency for `id` is stamped too.
    pub fn set_asset_data(&mut self, id: &AssetId, range: TimeRange, mut series: ChartSeries) {
        let now = now_millis();
        series.last_fetched_at_millis = now;
        self.data.entry(id.clone()).or_default().insert(range, series);
        self.last_accessed.insert(id.clone(), now);
    }

    /// Upsert metadata for `id` (whole-value replacement).
    pub fn set_asset_details(&mut self, id: &AssetId, metadata: AssetMetadata) {
        self.asset_details.insert(id.clone(), metadata);
    }

    pub fn set_time_range(&mut self, range: TimeRange) {
        self.time_range = range;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Drop `id` from the selection together with its cache, metadata and
    /// recency entries. Missing keys are fine, so this is idempotent.
    pub fn remove_asset(&mut self, id: &AssetId) {
        self.selected_assets.retain(|selected| selected != id);
        self.data.remove(id);
        self.asset_details.remove(id);
        self.last_accessed.remove(id);
    }

    /// Mark the (id, range) entry stale so the next check refetches it.
    ///
    /// The cached series stays in place for display until the refetch lands.
    /// No entry is created when none exists.
    pub fn refresh_data(&mut self, id: &AssetId, range: TimeRange) {
        if let Some(series) = self.data.get_mut(id).and_then(|entry| entry.get_mut(&range)) {
            series.last_fetched_at_millis = 0;
        }
        self.last_accessed.insert(id.clone(), now_millis());
    }

    pub fn update_last_accessed(&mut self, id: &AssetId) {
        self.last_accessed.insert(id.clone(), now_millis());
    }

    /// Add `id` to the selection when absent, remove it when present.
    /// Only membership changes; cached data stays.
    pub fn toggle_selected(&mut self, id: &AssetId) {
        if self.is_selected(id) {
            self.selected_assets.retain(|selected| selected != id);
        } else {
            self.selected_assets.push(id.clone());
        }
    }

    // ── Reads ───────────────────────────────────────────────────────

    pub fn selected_assets(&self) -> &[AssetId] {
        &self.selected_assets
    }

    pub fn is_selected(&self, id: &AssetId) -> bool {
        self.selected_assets.contains(id)
    }

    pub fn series(&self, id: &AssetId, range: TimeRange) -> Option<&ChartSeries> {
        self.data.get(id)?.get(&range)
    }

    pub fn asset_entry(&self, id: &AssetId) -> Option<&AssetCacheEntry> {
        self.data.get(id)
    }

    /// Ids with at least one cached range, in no particular order.
    pub fn cached_asset_ids(&self) -> Vec<&AssetId> {
        self.data
            .iter()
            .filter(|(_, entry)| !entry.is_empty())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn asset_details(&self, id: &AssetId) -> Option<&AssetMetadata> {
        self.asset_details.get(id)
    }

    pub fn last_accessed(&self, id: &AssetId) -> Option<i64> {
        self.last_accessed.get(id).copied()
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Display name: metadata name when known, otherwise the capitalized id.
    pub fn label_for(&self, id: &AssetId) -> String {
        self.asset_details
            .get(id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| id.fallback_label())
    }
}

impl Default for AssetStore {
    fn default() -> Self {
        Self::new()
    }
}
