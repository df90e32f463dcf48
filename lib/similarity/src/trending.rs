//! Keyword and category trends over a bounded time window
//!
//! Counts are global across the window (a term seen twice in each of three
//! documents has frequency 6), which makes them additive over disjoint
//! sub-windows.

use ahash::AHashMap;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tenderx_core::{Document, Error, Result, Tokenizer};

/// Trending ignores tokens shorter than this
pub const DEFAULT_TRENDING_MIN_TOKEN_LEN: usize = 4;

pub const DEFAULT_MAX_WINDOW_DAYS: i64 = 90;

pub const DEFAULT_TOP_K: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingConfig {
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
    /// Longest window accepted by [`TrendingAggregator::validate_window`]
    #[serde(default = "default_max_window_days")]
    pub max_window_days: i64,
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,
}

fn default_min_token_len() -> usize {
    DEFAULT_TRENDING_MIN_TOKEN_LEN
}

fn default_max_window_days() -> i64 {
    DEFAULT_MAX_WINDOW_DAYS
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            min_token_len: DEFAULT_TRENDING_MIN_TOKEN_LEN,
            max_window_days: DEFAULT_MAX_WINDOW_DAYS,
            default_top_k: DEFAULT_TOP_K,
        }
    }
}

impl TrendingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_token_len == 0 {
            return Err(Error::InvalidConfig(
                "trending minimum token length must be at least 1".to_string(),
            ));
        }
        if self.max_window_days <= 0 {
            return Err(Error::InvalidConfig(
                "trending max window must be at least one day".to_string(),
            ));
        }
        self.max_window()?;
        Ok(())
    }

    /// `max_window_days` as a duration; fails when it overflows
    pub fn max_window(&self) -> Result<Duration> {
        Duration::try_days(self.max_window_days).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "trending max window of {} days is out of range",
                self.max_window_days
            ))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub term: String,
    pub frequency: u64,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

/// Top terms plus the secondary top-categories view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingReport {
    pub terms: Vec<TrendingEntry>,
    pub categories: Vec<TrendingEntry>,
    /// Documents that fell inside the window
    pub documents_in_window: usize,
}

#[derive(Debug, Clone)]
pub struct TrendingAggregator {
    config: TrendingConfig,
    tokenizer: Tokenizer,
}

impl Default for TrendingAggregator {
    fn default() -> Self {
        let config = TrendingConfig::default();
        Self {
            config,
            tokenizer: Tokenizer::new(config.min_token_len),
        }
    }
}

impl TrendingAggregator {
    pub fn new(config: TrendingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tokenizer: Tokenizer::new(config.min_token_len),
        })
    }

    pub fn config(&self) -> &TrendingConfig {
        &self.config
    }

    /// `[now - days, now]`
    pub fn last_days(now: DateTime<Utc>, days: i64) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        Duration::try_days(days)
            .and_then(|span| now.checked_sub_signed(span))
            .map(|start| (start, now))
            .ok_or_else(|| Error::InvalidWindow(format!("{} days before {} is out of range", days, now)))
    }

    /// Reject inverted windows and windows longer than `max_window_days`
    pub fn validate_window(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
        if end < start {
            return Err(Error::InvalidWindow(format!(
                "window end {} is before start {}",
                end, start
            )));
        }
        if end - start > self.config.max_window()? {
            return Err(Error::InvalidWindow(format!(
                "window spans more than {} days",
                self.config.max_window_days
            )));
        }
        Ok(())
    }

    fn in_window<'d>(
        documents: &'d [Document],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Iterator<Item = &'d Document> {
        documents
            .iter()
            .filter(move |d| d.updated_at >= start && d.updated_at <= end)
    }

    /// Raw term frequencies over every document inside `[start, end]`
    pub fn term_counts(
        &self,
        documents: &[Document],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AHashMap<String, u64> {
        let mut counts: AHashMap<String, u64> = AHashMap::new();
        for document in Self::in_window(documents, start, end) {
            for token in self.tokenizer.tokenize(document.text()) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Category frequencies over the same window; categories compare case-insensitively
    pub fn category_counts(
        &self,
        documents: &[Document],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AHashMap<String, u64> {
        let mut counts: AHashMap<String, u64> = AHashMap::new();
        for category in Self::in_window(documents, start, end).filter_map(|d| d.category.as_deref()) {
            let category = category.trim().to_lowercase();
            if !category.is_empty() {
                *counts.entry(category).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Top `top_k` terms by frequency; ties by term
    pub fn trending(
        &self,
        documents: &[Document],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        top_k: usize,
    ) -> Vec<TrendingEntry> {
        Self::top_entries(self.term_counts(documents, start, end), start, end, top_k)
    }

    pub fn top_categories(
        &self,
        documents: &[Document],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        top_k: usize,
    ) -> Vec<TrendingEntry> {
        Self::top_entries(self.category_counts(documents, start, end), start, end, top_k)
    }

    pub fn report(
        &self,
        documents: &[Document],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        top_k: usize,
    ) -> TrendingReport {
        let documents_in_window = Self::in_window(documents, start, end).count();
        let report = TrendingReport {
            terms: self.trending(documents, start, end, top_k),
            categories: self.top_categories(documents, start, end, top_k),
            documents_in_window,
        };
        tracing::debug!(
            documents = documents.len(),
            in_window = documents_in_window,
            terms = report.terms.len(),
            "aggregated trending topics"
        );
        report
    }

    fn top_entries(
        counts: AHashMap<String, u64>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        top_k: usize,
    ) -> Vec<TrendingEntry> {
        let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(top_k)
            .map(|(term, frequency)| TrendingEntry {
                term,
                frequency,
                window_start: start,
                window_end: end,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn corpus() -> Vec<Document> {
        vec![
            Document::tender("1", "Solar panel installation, solar inverter", day(1)).with_category("Energy"),
            Document::tender("2", "solar street lighting for the county", day(3)).with_category("energy"),
            Document::tender("3", "Road resurfacing and street drainage", day(5)).with_category("construction"),
            Document::proposal("4", "solar farm feasibility study", day(40)).with_category("energy"),
        ]
    }

    #[test]
    fn test_global_counts_and_ordering() {
        let trends = TrendingAggregator::default().trending(&corpus(), day(0), day(10), 3);
        let terms: Vec<(&str, u64)> = trends.iter().map(|e| (e.term.as_str(), e.frequency)).collect();
        assert_eq!(terms, vec![("solar", 3), ("street", 2), ("county", 1)]);
        assert!(trends.iter().all(|e| e.window_start == day(0) && e.window_end == day(10)));
    }

    #[test]
    fn test_short_tokens_excluded() {
        let counts = TrendingAggregator::default().term_counts(&corpus(), day(0), day(10));
        assert!(!counts.contains_key("and"));
        assert!(!counts.contains_key("the"));
        assert!(!counts.contains_key("for"));
        assert_eq!(counts.get("road"), Some(&1));
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let docs = corpus();
        let counts = TrendingAggregator::default().term_counts(&docs, day(1), day(1));
        assert_eq!(counts.get("solar"), Some(&2));
        assert!(TrendingAggregator::default().trending(&docs, day(6), day(30), 10).is_empty());
    }

    #[test]
    fn test_additive_over_disjoint_windows() {
        let docs = corpus();
        let agg = TrendingAggregator::default();
        let whole = agg.term_counts(&docs, day(0), day(50));
        let first = agg.term_counts(&docs, day(0), day(4));
        let second = agg.term_counts(&docs, day(4) + Duration::nanoseconds(1), day(50));

        let mut merged = first.clone();
        for (term, n) in second {
            *merged.entry(term).or_insert(0) += n;
        }
        assert_eq!(merged, whole);
    }

    #[test]
    fn test_top_categories_case_insensitive() {
        let cats = TrendingAggregator::default().top_categories(&corpus(), day(0), day(50), 5);
        assert_eq!(cats[0].term, "energy");
        assert_eq!(cats[0].frequency, 3);
        assert_eq!(cats[1].term, "construction");
    }

    #[test]
    fn test_inverted_window_empty_and_rejected() {
        let agg = TrendingAggregator::default();
        assert!(agg.trending(&corpus(), day(10), day(0), 5).is_empty());
        assert!(matches!(agg.validate_window(day(10), day(0)), Err(Error::InvalidWindow(_))));
        assert!(matches!(agg.validate_window(day(0), day(91)), Err(Error::InvalidWindow(_))));
        assert!(agg.validate_window(day(0), day(90)).is_ok());
    }

    #[test]
    fn test_out_of_range_window_config_rejected() {
        let huge = TrendingConfig {
            max_window_days: i64::MAX,
            ..TrendingConfig::default()
        };
        assert!(matches!(huge.validate(), Err(Error::InvalidConfig(_))));
        assert!(TrendingAggregator::new(huge).is_err());

        // a config that skipped validation still errors instead of panicking
        let agg = TrendingAggregator {
            config: huge,
            tokenizer: Tokenizer::new(huge.min_token_len),
        };
        assert!(agg.validate_window(day(0), day(0)).is_err());
    }

    #[test]
    fn test_last_days() {
        let (start, end) = TrendingAggregator::last_days(day(10), 3).unwrap();
        assert_eq!(start, day(7));
        assert_eq!(end, day(10));
        assert!(matches!(
            TrendingAggregator::last_days(day(0), i64::MAX),
            Err(Error::InvalidWindow(_))
        ));
    }

    #[test]
    fn test_report() {
        let report = TrendingAggregator::default().report(&corpus(), day(0), day(10), 2);
        assert_eq!(report.documents_in_window, 3);
        assert_eq!(report.terms.len(), 2);
        assert_eq!(report.categories[0].term, "energy");
    }
}
