pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod store;

use std::sync::Arc;

use errors::CoreError;
use models::{
    asset::AssetId,
    chart::{ChartLine, ChartRow},
    settings::DashboardSettings,
    time_range::TimeRange,
};
use providers::{coingecko::CoinGeckoClient, traits::PriceApi};
use services::{
    chart_service::{ChartService, FetchOutcome, FreshnessPolicy},
    notifier::{Notifier, TracingNotifier},
    recent_service::{self, RecentAsset},
    search_service::SearchService,
    wallet_service::{self, WalletSource, WalletView},
};
use store::{AssetStore, SharedStore};

/// Main entry point for the dashboard core library.
/// Owns the asset store and the coordinators operating on it.
#[must_use]
pub struct Dashboard {
    settings: DashboardSettings,
    store: SharedStore,
    search: SearchService,
    chart: ChartService,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (selected, range, loading) = self.store.read(|s| {
            (s.selected_assets().len(), s.time_range(), s.is_loading())
        });
        f.debug_struct("Dashboard")
            .field("selected", &selected)
            .field("time_range", &range)
            .field("loading", &loading)
            .field("settings", &self.settings)
            .finish()
    }
}

impl Dashboard {
    /// Dashboard backed by CoinGecko, reporting notifications through `tracing`.
    pub fn new(settings: DashboardSettings) -> Result<Self, CoreError> {
        let api = Arc::new(CoinGeckoClient::new(&settings)?);
        Ok(Self::with_components(settings, api, Arc::new(TracingNotifier)))
    }

    /// Dashboard with injected collaborators (custom API client, notifier).
    pub fn with_components(
        settings: DashboardSettings,
        api: Arc<dyn PriceApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let store = SharedStore::new();
        let search = SearchService::new(
            api.clone(),
            notifier.clone(),
            store.clone(),
            settings.debounce(),
        );
        let chart = ChartService::new(
            api,
            notifier,
            store.clone(),
            FreshnessPolicy::new(settings.cache_ttl_millis()),
        );
        tracing::info!(base_url = %settings.api_base_url, "dashboard core initialized");
        Self {
            settings,
            store,
            search,
            chart,
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn search(&self) -> &SearchService {
        &self.search
    }

    pub fn chart(&self) -> &ChartService {
        &self.chart
    }

    /// Owned copy of the current store state.
    pub fn snapshot(&self) -> AssetStore {
        self.store.snapshot()
    }

    // ── Selection ───────────────────────────────────────────────────

    /// Toggle a search result, then bring the chart cache up to date.
    pub async fn toggle_search_result(&self, id: &AssetId) -> Vec<(AssetId, FetchOutcome)> {
        self.search.toggle_result(id);
        self.chart.sync().await
    }

    /// "Select all" in the search dropdown, then sync the chart cache.
    pub async fn toggle_select_all(&self) -> Vec<(AssetId, FetchOutcome)> {
        self.search.toggle_select_all();
        self.chart.sync().await
    }

    /// Remove an asset and everything cached for it.
    pub async fn remove_asset(&self, id: &AssetId) -> Vec<(AssetId, FetchOutcome)> {
        self.store.remove_asset(id);
        self.chart.sync().await
    }

    pub async fn set_time_range(&self, range: TimeRange) -> Vec<(AssetId, FetchOutcome)> {
        self.chart.set_time_range(range).await
    }

    pub async fn refresh(&self) -> Vec<(AssetId, FetchOutcome)> {
        self.chart.refresh_all().await
    }

    // ── Views ───────────────────────────────────────────────────────

    #[must_use]
    pub fn merged_rows(&self) -> Vec<ChartRow> {
        self.chart.merged_rows()
    }

    #[must_use]
    pub fn chart_lines(&self) -> Vec<ChartLine> {
        self.chart.lines()
    }

    #[must_use]
    pub fn recent_assets(&self) -> Vec<RecentAsset> {
        self.store
            .read(|s| recent_service::recent_assets(s, self.settings.recent_limit))
    }

    pub async fn click_recent(&self, id: &AssetId) -> Vec<(AssetId, FetchOutcome)> {
        recent_service::click_recent(&self.store, id);
        self.chart.sync().await
    }

    #[must_use]
    pub fn wallet_assets(&self, source: &dyn WalletSource) -> WalletView {
        self.store.read(|s| wallet_service::held_assets(source, s))
    }

    pub async fn click_held(&self, id: &AssetId) -> Vec<(AssetId, FetchOutcome)> {
        wallet_service::click_held(&self.store, id);
        self.chart.sync().await
    }
}
