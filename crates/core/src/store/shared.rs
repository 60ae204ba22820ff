use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::asset::{AssetId, AssetMetadata};
use crate::models::chart::ChartSeries;
use crate::models::time_range::TimeRange;

use super::asset_store::AssetStore;

/// Cloneable handle to the one `AssetStore` of a dashboard.
///
/// Each named operation takes the lock exactly once, so observers never see
/// a half-applied transition. The lock is never held across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<AssetStore>>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_store(store: AssetStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AssetStore> {
        // A panic elsewhere must not take the dashboard down with it.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run `f` against a consistent view of the store.
    pub fn read<R>(&self, f: impl FnOnce(&AssetStore) -> R) -> R {
        f(&self.lock())
    }

    /// Apply several named operations as one atomic transition.
    pub fn transaction<R>(&self, f: impl FnOnce(&mut AssetStore) -> R) -> R {
        f(&mut self.lock())
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> AssetStore {
        self.lock().clone()
    }

    pub fn set_selected_assets(&self, ids: Vec<AssetId>) {
        self.lock().set_selected_assets(ids);
    }

    pub fn set_asset_data(&self, id: &AssetId, range: TimeRange, series: ChartSeries) {
        self.lock().set_asset_data(id, range, series);
    }

    pub fn set_asset_details(&self, id: &AssetId, metadata: AssetMetadata) {
        self.lock().set_asset_details(id, metadata);
    }

    pub fn set_time_range(&self, range: TimeRange) {
        self.lock().set_time_range(range);
    }

    pub fn set_loading(&self, loading: bool) {
        self.lock().set_loading(loading);
    }

    pub fn remove_asset(&self, id: &AssetId) {
        self.lock().remove_asset(id);
    }

    pub fn refresh_data(&self, id: &AssetId, range: TimeRange) {
        self.lock().refresh_data(id, range);
    }

    pub fn update_last_accessed(&self, id: &AssetId) {
        self.lock().update_last_accessed(id);
    }

    pub fn toggle_selected(&self, id: &AssetId) {
        self.lock().toggle_selected(id);
    }

    pub fn selected_assets(&self) -> Vec<AssetId> {
        self.lock().selected_assets().to_vec()
    }

    pub fn time_range(&self) -> TimeRange {
        self.lock().time_range()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading()
    }

    pub fn series(&self, id: &AssetId, range: TimeRange) -> Option<ChartSeries> {
        self.lock().series(id, range).cloned()
    }
}
