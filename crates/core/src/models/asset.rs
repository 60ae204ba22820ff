use serde::{Deserialize, Serialize};

/// Canonical asset identifier of the price service (e.g. "bitcoin").
///
/// Opaque and case-sensitive: `"Bitcoin"` and `"bitcoin"` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fallback display name for an id with no metadata: first letter upper-cased.
    pub fn fallback_label(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for AssetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for AssetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lightweight descriptor of a selected asset.
///
/// Only `id`, `symbol` and `name` are authoritative. The numeric fields are
/// placeholders: nothing in the core feeds live quotes into them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub id: AssetId,
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub price_change_percentage_24h: f64,
    pub market_cap: f64,
}

impl AssetMetadata {
    /// Metadata registered when a search result is selected (numerics zeroed).
    pub fn from_search_result(result: &SearchResult) -> Self {
        Self {
            id: result.id.clone(),
            symbol: result.symbol.clone(),
            name: result.name.clone(),
            current_price: 0.0,
            price_change_percentage_24h: 0.0,
            market_cap: 0.0,
        }
    }
}

/// One coin returned by the search endpoint.
///
/// Ephemeral: lives only as long as the current query's result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: AssetId,
    pub symbol: String,
    pub name: String,
    /// Unranked coins come back with `null`.
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
}

impl SearchResult {
    /// Dropdown row text, e.g. "Bitcoin (BTC)".
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.symbol.to_uppercase())
    }
}
