use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::models::asset::{AssetId, AssetMetadata, SearchResult};
use crate::providers::traits::PriceApi;
use crate::store::SharedStore;
use super::notifier::{Notifier, Severity};

/// What the results dropdown should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// A search call is outstanding.
    Loading,
    /// There are results to list.
    Results,
    /// Text was typed but nothing matched (or the search failed).
    NoResults,
    /// Nothing typed yet.
    Prompt,
}

impl SearchStatus {
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            SearchStatus::Loading => Some("Loading..."),
            SearchStatus::Results => None,
            SearchStatus::NoResults => Some("No results found"),
            SearchStatus::Prompt => Some("Start typing to search..."),
        }
    }
}

#[derive(Debug, Default)]
struct SearchState {
    query: String,
    results: Vec<SearchResult>,
    is_loading: bool,
    is_open: bool,
    /// Bumped by every search run; only the latest run may publish.
    generation: u64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// The parts of the coordinator a spawned search run needs.
#[derive(Clone)]
struct SearchRunner {
    api: Arc<dyn PriceApi>,
    notifier: Arc<dyn Notifier>,
    state: Arc<Mutex<SearchState>>,
}

impl SearchRunner {
    async fn run(self, query: String) {
        let generation = {
            let mut state = lock(&self.state);
            state.generation += 1;
            if query.trim().is_empty() {
                state.results.clear();
                state.is_loading = false;
                return;
            }
            state.is_loading = true;
            state.generation
        };

        tracing::debug!(%query, generation, "running search");
        let outcome = self.api.search(&query).await;

        let failure = {
            let mut state = lock(&self.state);
            if state.generation != generation {
                tracing::debug!(%query, generation, "dropping superseded search response");
                return;
            }
            state.is_loading = false;
            match outcome {
                Ok(results) => {
                    state.results = results;
                    None
                }
                Err(e) => {
                    state.results.clear();
                    Some(e)
                }
            }
        };

        if let Some(e) = failure {
            tracing::warn!(%query, error = %e, "search failed");
            self.notifier.notify(&e.user_message(), Severity::Error);
        }
    }
}

/// Search-as-you-type coordinator.
///
/// Keystrokes update the query at once; the remote search runs after a
/// trailing debounce window, so a burst of keystrokes costs one call with
/// the final text. At most one debounce timer is pending at any time.
///
/// In-flight searches are never cancelled, but a response that belongs to
/// an older run than the latest one is discarded instead of overwriting
/// newer results.
pub struct SearchService {
    runner: SearchRunner,
    store: SharedStore,
    debounce: Duration,
    pending: Mutex<Option<JoinHandle<JoinHandle<()>>>>,
}

impl SearchService {
    pub fn new(
        api: Arc<dyn PriceApi>,
        notifier: Arc<dyn Notifier>,
        store: SharedStore,
        debounce: Duration,
    ) -> Self {
        Self {
            runner: SearchRunner {
                api,
                notifier,
                state: Arc::new(Mutex::new(SearchState::default())),
            },
            store,
            debounce,
            pending: Mutex::new(None),
        }
    }

    // ── Input & debounce ────────────────────────────────────────────

    /// Record a keystroke and (re)arm the debounce timer.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn on_input(&self, text: impl Into<String>) {
        let text = text.into();
        {
            let mut state = lock(&self.runner.state);
            state.query = text.clone();
            state.is_open = true;
        }

        let runner = self.runner.clone();
        let debounce = self.debounce;
        // Only the sleep is abortable: once the timer fires, the search runs
        // in its own task and survives later keystrokes.
        let timer = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            tokio::spawn(runner.run(text))
        });

        if let Some(previous) = lock(&self.pending).replace(timer) {
            previous.abort();
        }
    }

    /// Wait for the pending debounce timer and the search it starts.
    pub async fn flush(&self) {
        let pending = lock(&self.pending).take();
        if let Some(timer) = pending {
            if let Ok(search) = timer.await {
                let _ = search.await;
            }
        }
    }

    // ── Selection ───────────────────────────────────────────────────

    /// Toggle selection of a displayed result. Adding also registers its
    /// metadata (numeric fields zeroed).
    pub fn toggle_result(&self, id: &AssetId) {
        let result = self.result_by_id(id);
        self.store.transaction(|store| {
            if store.is_selected(id) {
                store.toggle_selected(id);
                return;
            }
            if let Some(result) = &result {
                store.set_asset_details(id, AssetMetadata::from_search_result(result));
            }
            store.toggle_selected(id);
        });
    }

    /// True when there are results and every one of them is selected.
    pub fn is_all_selected(&self) -> bool {
        let results = self.results();
        !results.is_empty() && self.store.read(|s| results.iter().all(|r| s.is_selected(&r.id)))
    }

    /// "Select all": clears the selection when every result is already
    /// selected, otherwise replaces it with the displayed results.
    pub fn toggle_select_all(&self) {
        let results = self.results();
        if results.is_empty() {
            return;
        }
        self.store.transaction(|store| {
            if results.iter().all(|r| store.is_selected(&r.id)) {
                store.set_selected_assets(Vec::new());
                return;
            }
            for result in &results {
                store.set_asset_details(&result.id, AssetMetadata::from_search_result(result));
            }
            store.set_selected_assets(results.iter().map(|r| r.id.clone()).collect());
        });
    }

    // ── Dropdown ────────────────────────────────────────────────────

    pub fn open(&self) {
        lock(&self.runner.state).is_open = true;
    }

    /// Close the results view (pointer interaction outside its bounds).
    pub fn close(&self) {
        lock(&self.runner.state).is_open = false;
    }

    pub fn is_open(&self) -> bool {
        lock(&self.runner.state).is_open
    }

    // ── Reads ───────────────────────────────────────────────────────

    pub fn query(&self) -> String {
        lock(&self.runner.state).query.clone()
    }

    pub fn results(&self) -> Vec<SearchResult> {
        lock(&self.runner.state).results.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.runner.state).is_loading
    }

    pub fn status(&self) -> SearchStatus {
        let state = lock(&self.runner.state);
        if state.is_loading {
            SearchStatus::Loading
        } else if !state.results.is_empty() {
            SearchStatus::Results
        } else if !state.query.is_empty() {
            SearchStatus::NoResults
        } else {
            SearchStatus::Prompt
        }
    }

    /// Label of a selected-asset chip.
    pub fn chip_label(&self, id: &AssetId) -> String {
        match self.result_by_id(id) {
            Some(result) => result.name,
            None => self.store.read(|s| s.label_for(id)),
        }
    }

    fn result_by_id(&self, id: &AssetId) -> Option<SearchResult> {
        lock(&self.runner.state)
            .results
            .iter()
            .find(|r| &r.id == id)
            .cloned()
    }
}

impl Drop for SearchService {
    fn drop(&mut self) {
        if let Some(timer) = lock(&self.pending).take() {
            timer.abort();
        }
    }
}
