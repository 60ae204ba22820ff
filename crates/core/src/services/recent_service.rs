use serde::Serialize;

use crate::models::asset::AssetId;
use crate::store::{AssetStore, SharedStore};

/// One pill of the "Recent" view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentAsset {
    pub id: AssetId,
    pub label: String,
    pub selected: bool,
    /// Epoch millis of the last interaction, 0 when never stamped.
    pub last_accessed: i64,
}

/// Assets with cached chart data, most recently touched first.
///
/// Only assets with at least one cached range qualify. Assets never stamped
/// sort as if touched at epoch 0. At most `limit` entries are returned.
pub fn recent_assets(store: &AssetStore, limit: usize) -> Vec<RecentAsset> {
    let mut recent: Vec<RecentAsset> = store
        .cached_asset_ids()
        .into_iter()
        .map(|id| RecentAsset {
            id: id.clone(),
            label: id.fallback_label(),
            selected: store.is_selected(id),
            last_accessed: store.last_accessed(id).unwrap_or(0),
        })
        .collect();

    // Ties broken by id so the view is stable between renders.
    recent.sort_by(|a, b| {
        b.last_accessed
            .cmp(&a.last_accessed)
            .then_with(|| a.id.cmp(&b.id))
    });
    recent.truncate(limit);
    recent
}

/// Clicking a recent pill stamps recency and toggles selection.
pub fn click_recent(store: &SharedStore, id: &AssetId) {
    store.transaction(|s| {
        s.update_last_accessed(id);
        s.toggle_selected(id);
    });
}
