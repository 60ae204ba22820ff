// ═══════════════════════════════════════════════════════════════════
// Shared test helpers — mock price API, recording notifier,
// canned HTTP server
// ═══════════════════════════════════════════════════════════════════

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use coin_dashboard_core::errors::CoreError;
use coin_dashboard_core::models::asset::{AssetId, SearchResult};
use coin_dashboard_core::models::chart::{ChartSeries, SeriesPoint};
use coin_dashboard_core::models::time_range::TimeRange;
use coin_dashboard_core::providers::traits::PriceApi;
use coin_dashboard_core::services::notifier::{Notifier, Severity};

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;
/// 2025-01-15T12:00:00Z — midday, so the local date is stable in most zones.
pub const T0: i64 = 1_736_942_400_000;

pub fn search_result(id: &str, symbol: &str, name: &str, rank: Option<u32>) -> SearchResult {
    SearchResult {
        id: AssetId::from(id),
        symbol: symbol.to_string(),
        name: name.to_string(),
        market_cap_rank: rank,
    }
}

/// `n` daily points starting at `T0`, values `base`, `base + 1`, ...
pub fn daily_points(n: usize, base: f64) -> Vec<SeriesPoint> {
    (0..n)
        .map(|i| SeriesPoint::new(T0 + i as i64 * DAY_MS, base + i as f64))
        .collect()
}

pub fn series(n: usize, base: f64) -> ChartSeries {
    ChartSeries {
        prices: daily_points(n, base),
        market_caps: daily_points(n, base * 1000.0),
        total_volumes: daily_points(n, base * 10.0),
        last_fetched_at_millis: 42,
    }
}

// ═══════════════════════════════════════════════════════════════════
// Mock PriceApi
// ═══════════════════════════════════════════════════════════════════

/// In-memory `PriceApi` that records every call.
#[derive(Default)]
pub struct MockApi {
    pub search_calls: Mutex<Vec<String>>,
    pub chart_calls: Mutex<Vec<(String, TimeRange)>>,
    search_responses: Mutex<HashMap<String, Vec<SearchResult>>>,
    slow_queries: Mutex<HashMap<String, Duration>>,
    failing_queries: Mutex<HashSet<String>>,
    chart_lengths: Mutex<HashMap<String, usize>>,
    failing_assets: Mutex<HashSet<String>>,
    rate_limited_assets: Mutex<HashSet<String>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_search(&self, query: &str, results: Vec<SearchResult>) {
        self.search_responses
            .lock()
            .unwrap()
            .insert(query.to_string(), results);
    }

    pub fn with_slow_query(&self, query: &str, delay: Duration) {
        self.slow_queries
            .lock()
            .unwrap()
            .insert(query.to_string(), delay);
    }

    pub fn fail_query(&self, query: &str) {
        self.failing_queries.lock().unwrap().insert(query.to_string());
    }

    pub fn with_chart_length(&self, id: &str, len: usize) {
        self.chart_lengths.lock().unwrap().insert(id.to_string(), len);
    }

    pub fn fail_asset(&self, id: &str) {
        self.failing_assets.lock().unwrap().insert(id.to_string());
    }

    pub fn rate_limit_asset(&self, id: &str) {
        self.rate_limited_assets.lock().unwrap().insert(id.to_string());
    }

    pub fn heal_asset(&self, id: &str) {
        self.failing_assets.lock().unwrap().remove(id);
        self.rate_limited_assets.lock().unwrap().remove(id);
    }

    pub fn search_call_log(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn chart_call_log(&self) -> Vec<(String, TimeRange)> {
        self.chart_calls.lock().unwrap().clone()
    }

    pub fn chart_calls_for(&self, id: &str) -> usize {
        self.chart_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(asset, _)| asset == id)
            .count()
    }
}

#[async_trait]
impl PriceApi for MockApi {
    fn name(&self) -> &str {
        "MockApi"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, CoreError> {
        self.search_calls.lock().unwrap().push(query.to_string());
        let delay = self.slow_queries.lock().unwrap().get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_queries.lock().unwrap().contains(query) {
            return Err(CoreError::RateLimited);
        }
        Ok(self
            .search_responses
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_chart(&self, id: &str, range: TimeRange) -> Result<ChartSeries, CoreError> {
        self.chart_calls.lock().unwrap().push((id.to_string(), range));
        if self.rate_limited_assets.lock().unwrap().contains(id) {
            return Err(CoreError::RateLimited);
        }
        if self.failing_assets.lock().unwrap().contains(id) {
            return Err(CoreError::ChartFetchFailed);
        }
        let len = self
            .chart_lengths
            .lock()
            .unwrap()
            .get(id)
            .copied()
            .unwrap_or(3);
        let base = match range {
            TimeRange::Week => 100.0,
            TimeRange::Month => 200.0,
            TimeRange::Year => 300.0,
        };
        Ok(series(len, base))
    }
}

// ═══════════════════════════════════════════════════════════════════
// Recording Notifier
// ═══════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<(String, Severity)> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Canned HTTP server
// ═══════════════════════════════════════════════════════════════════

/// Local HTTP server answering every request with the same status and body.
pub struct CannedServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    paths: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let paths = Arc::new(Mutex::new(Vec::new()));

        let server_hits = hits.clone();
        let server_paths = paths.clone();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                server_hits.fetch_add(1, Ordering::SeqCst);

                let mut buf = vec![0u8; 16 * 1024];
                let mut read = 0;
                loop {
                    let n = socket.read(&mut buf[read..]).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    read += n;
                    if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") || read == buf.len() {
                        break;
                    }
                }
                let head = String::from_utf8_lossy(&buf[..read]).to_string();
                let path = head.split_whitespace().nth(1).unwrap_or_default().to_string();
                server_paths.lock().unwrap().push(path);

                let reason = match status {
                    200 => "OK",
                    404 => "Not Found",
                    429 => "Too Many Requests",
                    500 => "Internal Server Error",
                    _ => "Unknown",
                };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            base_url: format!("http://{addr}/api/v3"),
            hits,
            paths,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

/// Local server that accepts connections but never answers.
pub struct SilentServer {
    pub base_url: String,
}

impl SilentServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        Self {
            base_url: format!("http://{addr}/api/v3"),
        }
    }
}
