use serde::{Deserialize, Serialize};

/// History window requested from the price service, in days.
///
/// A closed set: the wire codes are exactly "7", "30" and "365".
/// Exactly one range is active at a time (see `AssetStore::time_range`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "7")]
    Week,
    #[serde(rename = "30")]
    Month,
    #[serde(rename = "365")]
    Year,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::Week, TimeRange::Month, TimeRange::Year];

    /// The `days` query parameter value.
    pub fn as_days(&self) -> &'static str {
        match self {
            TimeRange::Week => "7",
            TimeRange::Month => "30",
            TimeRange::Year => "365",
        }
    }

    /// Short button label.
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Week => "1W",
            TimeRange::Month => "1M",
            TimeRange::Year => "1Y",
        }
    }

    /// Parse a days code. Anything outside the closed set is rejected.
    pub fn from_days(code: &str) -> Option<Self> {
        match code {
            "7" => Some(TimeRange::Week),
            "30" => Some(TimeRange::Month),
            "365" => Some(TimeRange::Year),
            _ => None,
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_days())
    }
}
