use thiserror::Error;

/// Unified error type for the entire coin-dashboard-core library.
///
/// Only the remote price client produces these. The store is total and
/// never fails; the coordinators catch every error and turn it into a
/// user notification.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Remote service status ───────────────────────────────────────
    #[error("API rate limit reached. Please try again in a minute.")]
    RateLimited,

    #[error("Failed to search cryptocurrencies")]
    SearchFailed,

    #[error("Failed to fetch chart data")]
    ChartFetchFailed,

    // ── Transport / payload ─────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError {
    /// True when the remote service answered with HTTP 429.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, CoreError::RateLimited)
    }

    /// Text shown to the user in an error notification.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest puts the full URL in its messages; search terms stay out of logs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
