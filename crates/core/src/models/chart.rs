use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use super::asset::AssetId;

/// Line colors, assigned by selection order and cycled: blue, green, orange, red, purple.
pub const COLORS: [&str; 5] = ["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6"];

/// One `[timestamp, value]` pair of a price-service series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(i64, f64)", into = "(i64, f64)")]
pub struct SeriesPoint {
    /// Unix timestamp in milliseconds.
    pub timestamp_millis: i64,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(timestamp_millis: i64, value: f64) -> Self {
        Self {
            timestamp_millis,
            value,
        }
    }
}

impl From<(i64, f64)> for SeriesPoint {
    fn from((timestamp_millis, value): (i64, f64)) -> Self {
        Self::new(timestamp_millis, value)
    }
}

impl From<SeriesPoint> for (i64, f64) {
    fn from(p: SeriesPoint) -> Self {
        (p.timestamp_millis, p.value)
    }
}

/// Price history of one asset for one time range, as returned by a single fetch.
///
/// The three series come from the same response and usually share timestamps,
/// but nothing relies on that across assets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub prices: Vec<SeriesPoint>,
    pub market_caps: Vec<SeriesPoint>,
    pub total_volumes: Vec<SeriesPoint>,

    /// Epoch millis of the fetch that produced this series.
    /// `0` marks the entry stale: the next freshness check must refetch.
    #[serde(default)]
    pub last_fetched_at_millis: i64,
}

impl ChartSeries {
    pub fn is_stale_marked(&self) -> bool {
        self.last_fetched_at_millis == 0
    }
}

/// One row of the merged chart table.
///
/// `values` holds one entry per selected asset, in selection order.
/// `None` is a gap in that asset's line, never a zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    /// Local calendar date of the anchor asset's timestamp.
    pub date: String,
    pub timestamp_millis: i64,
    pub values: Vec<(AssetId, Option<f64>)>,
}

impl ChartRow {
    pub fn value_for(&self, id: &AssetId) -> Option<f64> {
        self.values
            .iter()
            .find(|(asset, _)| asset == id)
            .and_then(|(_, value)| *value)
    }
}

/// Rendering descriptor for one selected asset's line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLine {
    pub asset_id: AssetId,
    pub label: String,
    pub color: &'static str,
}

/// Color for the line at `index` in selection order.
pub fn color_for_index(index: usize) -> &'static str {
    COLORS[index % COLORS.len()]
}

/// Format a unix-millis timestamp as a local calendar date, e.g. "1/15/2025".
pub fn format_local_date(timestamp_millis: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_millis).single() {
        Some(dt) => dt.format("%-m/%-d/%Y").to_string(),
        None => String::new(),
    }
}

/// Tooltip currency format: "$1,234.57".
pub fn format_usd(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}${}.{frac_part}", group_thousands(int_part))
}

/// Y-axis compact currency format: "$950", "$1.2K", "$3.4M", "$5.6B", "$7.8T".
pub fn format_usd_compact(value: f64) -> String {
    const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    for (scale, suffix) in UNITS {
        if abs >= scale {
            return format!("{sign}${}{suffix}", trim_one_decimal(abs / scale));
        }
    }
    format!("{sign}${}", trim_one_decimal(abs))
}

fn trim_one_decimal(value: f64) -> String {
    let s = format!("{value:.1}");
    s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
