//! File-backed price and news history
//!
//! Owns the observations collected by the acquisition scripts and the
//! sampling interval derived from them. Price data is mandatory at
//! construction; news context is optional and degrades silently.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Canonical timestamp format used across the data files
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Maximum number of news items kept for prompt context
pub const MAX_NEWS_ITEMS: usize = 10;

const DEFAULT_INTERVAL_HOURS: f64 = 24.0;

/// History loading errors
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Required price data file is missing
    #[error("Price data file not found: {0}")]
    DataUnavailable(String),
}

/// A single historical price observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Observation timestamp (local, no timezone)
    #[serde(with = "time_format")]
    pub time: NaiveDateTime,
    /// Closing price at that timestamp
    pub price: f64,
}

/// A news snippet retained for prompt context
#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    /// Normalized textual timestamp
    pub time: String,
    /// Headline and description joined with a period
    pub text: String,
}

/// Serde adapter for the canonical `YYYY-MM-DD HH:MM:SS` format
mod time_format {
    use super::TIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Raw news file shape written by the news acquisition script
#[derive(Debug, Deserialize)]
struct NewsFile {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    #[serde(default)]
    headline: String,
    #[serde(default)]
    description: String,
    /// Publication timestamp, ISO-ish with `T` separator and trailing `Z`
    #[serde(default)]
    data: String,
}

/// In-memory view over collected price and news observations
///
/// Populated once at construction and never mutated afterwards.
pub struct HistoryStore {
    prices: Vec<PriceObservation>,
    news: Vec<NewsItem>,
    interval_hours: f64,
}

impl HistoryStore {
    /// Load the store from the acquisition output files
    ///
    /// Fails only when the price file is missing entirely. Unparseable
    /// content (price or news) is logged and degrades to empty data.
    pub fn load(
        prices_path: impl AsRef<Path>,
        news_path: Option<&Path>,
    ) -> Result<Self, HistoryError> {
        let prices = load_prices(prices_path.as_ref())?;
        let news = news_path.map(load_news).unwrap_or_default();
        Ok(Self::from_parts(prices, news))
    }

    /// Build a store from already-loaded observations
    pub fn from_parts(prices: Vec<PriceObservation>, news: Vec<NewsItem>) -> Self {
        let interval_hours = sampling_interval(&prices);
        Self {
            prices,
            news,
            interval_hours,
        }
    }

    /// All price observations in chronological order
    pub fn prices(&self) -> &[PriceObservation] {
        &self.prices
    }

    /// Retained news items in original article order
    pub fn news(&self) -> &[NewsItem] {
        &self.news
    }

    /// Last known price, if any history was loaded
    pub fn last_price(&self) -> Option<f64> {
        self.prices.last().map(|p| p.price)
    }

    /// Timestamp of the most recent observation
    pub fn last_time(&self) -> Option<NaiveDateTime> {
        self.prices.last().map(|p| p.time)
    }

    /// Typical spacing between consecutive observations, in hours
    ///
    /// Always strictly positive; defaults to 24 when fewer than two
    /// observations exist.
    pub fn sampling_interval_hours(&self) -> f64 {
        self.interval_hours
    }
}

fn load_prices(path: &Path) -> Result<Vec<PriceObservation>, HistoryError> {
    if !path.exists() {
        return Err(HistoryError::DataUnavailable(path.display().to_string()));
    }

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Error reading price data, continuing with empty history");
            return Ok(Vec::new());
        }
    };

    match serde_json::from_str(&raw) {
        Ok(prices) => Ok(prices),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Error parsing price data, continuing with empty history");
            Ok(Vec::new())
        }
    }
}

fn load_news(path: &Path) -> Vec<NewsItem> {
    if !path.exists() {
        return Vec::new();
    }

    let file: NewsFile = match std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|raw| serde_json::from_str(&raw).map_err(|e| e.to_string()))
    {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Error loading news data, continuing without context");
            return Vec::new();
        }
    };

    let mut items = Vec::new();
    for article in file.articles {
        let text = format!("{}. {}", article.headline, article.description);
        let time = article
            .data
            .replace('T', " ")
            .trim_end_matches('Z')
            .to_string();

        if text.trim().is_empty() || time.is_empty() {
            continue;
        }
        items.push(NewsItem { time, text });
    }

    // Keep only recent news
    if items.len() > MAX_NEWS_ITEMS {
        items.drain(..items.len() - MAX_NEWS_ITEMS);
    }
    items
}

/// Median of pairwise deltas across the first ten observations
fn sampling_interval(prices: &[PriceObservation]) -> f64 {
    if prices.len() < 2 {
        return DEFAULT_INTERVAL_HOURS;
    }

    let head = &prices[..prices.len().min(10)];
    let mut deltas: Vec<f64> = head
        .windows(2)
        .map(|w| (w[1].time - w[0].time).num_seconds() as f64 / 3600.0)
        .collect();

    deltas.sort_by(|a, b| a.total_cmp(b));
    let mid = deltas.len() / 2;
    let median = if deltas.len() % 2 == 0 {
        (deltas[mid - 1] + deltas[mid]) / 2.0
    } else {
        deltas[mid]
    };

    // Prevent division by zero downstream
    if median == 0.0 {
        1.0
    } else {
        median
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn obs(time: &str, price: f64) -> PriceObservation {
        PriceObservation {
            time: NaiveDateTime::parse_from_str(time, TIME_FORMAT).unwrap(),
            price,
        }
    }

    fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_missing_price_file() {
        let result = HistoryStore::load("/nonexistent/btc_prices.json", None);
        assert!(matches!(result, Err(HistoryError::DataUnavailable(_))));
    }

    #[test]
    fn test_load_price_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "btc_prices.json",
            r#"[
                {"time": "2024-01-01 00:00:00", "price": 42000.5},
                {"time": "2024-01-01 01:00:00", "price": 42100.0}
            ]"#,
        );

        let store = HistoryStore::load(&path, None).unwrap();
        assert_eq!(store.prices().len(), 2);
        assert_eq!(store.last_price(), Some(42100.0));
        assert!(store.news().is_empty());
    }

    #[test]
    fn test_corrupt_price_file_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "btc_prices.json", "not json at all");

        let store = HistoryStore::load(&path, None).unwrap();
        assert!(store.prices().is_empty());
        assert_eq!(store.sampling_interval_hours(), 24.0);
    }

    #[test]
    fn test_load_news_normalizes_timestamps() {
        let dir = TempDir::new().unwrap();
        let prices = write_file(
            &dir,
            "btc_prices.json",
            r#"[{"time": "2024-01-01 00:00:00", "price": 100.0}]"#,
        );
        let news = write_file(
            &dir,
            "news.json",
            r#"{"articles": [
                {"headline": "BTC rallies", "description": "Up 5% overnight", "data": "2024-01-01T08:30:00Z"}
            ]}"#,
        );

        let store = HistoryStore::load(&prices, Some(&news)).unwrap();
        assert_eq!(store.news().len(), 1);
        assert_eq!(store.news()[0].time, "2024-01-01 08:30:00");
        assert_eq!(store.news()[0].text, "BTC rallies. Up 5% overnight");
    }

    #[test]
    fn test_load_news_keeps_last_ten() {
        let dir = TempDir::new().unwrap();
        let prices = write_file(
            &dir,
            "btc_prices.json",
            r#"[{"time": "2024-01-01 00:00:00", "price": 100.0}]"#,
        );

        let articles: Vec<String> = (0..15)
            .map(|i| {
                format!(
                    r#"{{"headline": "story {i}", "description": "d", "data": "2024-01-01T00:00:{i:02}Z"}}"#
                )
            })
            .collect();
        let news = write_file(
            &dir,
            "news.json",
            &format!(r#"{{"articles": [{}]}}"#, articles.join(",")),
        );

        let store = HistoryStore::load(&prices, Some(&news)).unwrap();
        assert_eq!(store.news().len(), MAX_NEWS_ITEMS);
        // Oldest articles evicted, original order preserved
        assert_eq!(store.news()[0].text, "story 5. d");
        assert_eq!(store.news()[9].text, "story 14. d");
    }

    #[test]
    fn test_missing_news_file_is_silent() {
        let dir = TempDir::new().unwrap();
        let prices = write_file(
            &dir,
            "btc_prices.json",
            r#"[{"time": "2024-01-01 00:00:00", "price": 100.0}]"#,
        );

        let missing = dir.path().join("news.json");
        let store = HistoryStore::load(&prices, Some(&missing)).unwrap();
        assert!(store.news().is_empty());
    }

    #[test]
    fn test_corrupt_news_file_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let prices = write_file(
            &dir,
            "btc_prices.json",
            r#"[{"time": "2024-01-01 00:00:00", "price": 100.0}]"#,
        );
        let news = write_file(&dir, "news.json", "{broken");

        let store = HistoryStore::load(&prices, Some(&news)).unwrap();
        assert!(store.news().is_empty());
    }

    #[test]
    fn test_news_without_timestamp_skipped() {
        let dir = TempDir::new().unwrap();
        let prices = write_file(
            &dir,
            "btc_prices.json",
            r#"[{"time": "2024-01-01 00:00:00", "price": 100.0}]"#,
        );
        let news = write_file(
            &dir,
            "news.json",
            r#"{"articles": [{"headline": "no date", "description": "x"}]}"#,
        );

        let store = HistoryStore::load(&prices, Some(&news)).unwrap();
        assert!(store.news().is_empty());
    }

    #[test]
    fn test_sampling_interval_regular_cadence() {
        let prices: Vec<PriceObservation> = (0..12)
            .map(|i| obs(&format!("2024-01-01 {i:02}:00:00"), 100.0 + i as f64))
            .collect();

        let store = HistoryStore::from_parts(prices, Vec::new());
        assert!((store.sampling_interval_hours() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sampling_interval_four_hour_cadence() {
        let prices = vec![
            obs("2024-01-01 00:00:00", 100.0),
            obs("2024-01-01 04:00:00", 101.0),
            obs("2024-01-01 08:00:00", 102.0),
        ];

        let store = HistoryStore::from_parts(prices, Vec::new());
        assert!((store.sampling_interval_hours() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_sampling_interval_defaults_with_short_history() {
        let store = HistoryStore::from_parts(vec![obs("2024-01-01 00:00:00", 100.0)], Vec::new());
        assert_eq!(store.sampling_interval_hours(), 24.0);

        let empty = HistoryStore::from_parts(Vec::new(), Vec::new());
        assert_eq!(empty.sampling_interval_hours(), 24.0);
    }

    #[test]
    fn test_sampling_interval_zero_coerced_to_one() {
        let prices = vec![
            obs("2024-01-01 00:00:00", 100.0),
            obs("2024-01-01 00:00:00", 100.5),
            obs("2024-01-01 00:00:00", 101.0),
        ];

        let store = HistoryStore::from_parts(prices, Vec::new());
        assert_eq!(store.sampling_interval_hours(), 1.0);
    }

    #[test]
    fn test_sampling_interval_uses_median_not_mean() {
        // One large gap should not skew the derived interval
        let prices = vec![
            obs("2024-01-01 00:00:00", 100.0),
            obs("2024-01-01 01:00:00", 101.0),
            obs("2024-01-01 02:00:00", 102.0),
            obs("2024-01-01 03:00:00", 103.0),
            obs("2024-01-03 03:00:00", 104.0),
        ];

        let store = HistoryStore::from_parts(prices, Vec::new());
        assert!((store.sampling_interval_hours() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_price_observation_roundtrip() {
        let json = r#"{"time": "2024-06-15 12:30:45", "price": 65000.25}"#;
        let parsed: PriceObservation = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.price, 65000.25);

        let back = serde_json::to_string(&parsed).unwrap();
        assert!(back.contains("2024-06-15 12:30:45"));
    }
}
