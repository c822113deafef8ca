//! In-memory fetch cache with a fixed freshness window.
//!
//! The cache is an explicit value owned by the application state and passed
//! to the loaders, keyed by request parameters. Within the freshness window
//! a repeated request for identical parameters is served from memory and
//! must not re-trigger network I/O. Nothing is persisted; the cache is
//! rebuilt from scratch on each process start.

use crate::models::{IndexData, Paper, SeriesData};

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// How long a cached response stays fresh.
pub const FRESHNESS_MINUTES: i64 = 5;

/// Request parameters identifying one cacheable load.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Index,
    Series(String),
    Report(String),
    /// Sorted, comma-joined identifier set, so the key is independent of
    /// the order identifiers were collected in.
    PaperBatch(String),
}

impl CacheKey {
    pub fn paper_batch(ids: &[String]) -> Self {
        let mut sorted = ids.to_vec();
        sorted.sort();
        CacheKey::PaperBatch(sorted.join(","))
    }
}

#[derive(Debug, Clone)]
pub enum CachedValue {
    Index(IndexData),
    Series(SeriesData),
    Report(String),
    Papers(HashMap<String, Paper>),
}

#[derive(Debug, Clone)]
struct Entry {
    value: CachedValue,
    fetched_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct FetchCache {
    entries: HashMap<CacheKey, Entry>,
}

impl FetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value if it is still within the freshness window.
    pub fn get_fresh(&self, key: &CacheKey) -> Option<CachedValue> {
        self.get_fresh_at(key, Utc::now())
    }

    fn get_fresh_at(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<CachedValue> {
        let entry = self.entries.get(key)?;
        if now - entry.fetched_at < Duration::minutes(FRESHNESS_MINUTES) {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub fn insert(&mut self, key: CacheKey, value: CachedValue) {
        self.insert_at(key, value, Utc::now());
    }

    fn insert_at(&mut self, key: CacheKey, value: CachedValue, fetched_at: DateTime<Utc>) {
        self.entries.insert(key, Entry { value, fetched_at });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_entry_is_returned() {
        let mut cache = FetchCache::new();
        cache.insert(
            CacheKey::Report("qwen".to_string()),
            CachedValue::Report("# Report".to_string()),
        );
        match cache.get_fresh(&CacheKey::Report("qwen".to_string())) {
            Some(CachedValue::Report(text)) => assert_eq!(text, "# Report"),
            other => panic!("Expected fresh report, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_entry_is_not_returned() {
        let mut cache = FetchCache::new();
        let fetched = Utc::now() - Duration::minutes(FRESHNESS_MINUTES + 1);
        cache.insert_at(
            CacheKey::Index,
            CachedValue::Report("stale".to_string()),
            fetched,
        );
        assert!(cache.get_fresh(&CacheKey::Index).is_none());
    }

    #[test]
    fn test_entry_fresh_just_inside_window() {
        let mut cache = FetchCache::new();
        let fetched = Utc::now() - Duration::minutes(FRESHNESS_MINUTES) + Duration::seconds(5);
        cache.insert_at(
            CacheKey::Series("llama".to_string()),
            CachedValue::Report("ok".to_string()),
            fetched,
        );
        assert!(cache
            .get_fresh(&CacheKey::Series("llama".to_string()))
            .is_some());
    }

    #[test]
    fn test_paper_batch_key_order_independent() {
        let a = CacheKey::paper_batch(&[
            "ARXIV:2309.00071".to_string(),
            "ARXIV:1706.03762".to_string(),
        ]);
        let b = CacheKey::paper_batch(&[
            "ARXIV:1706.03762".to_string(),
            "ARXIV:2309.00071".to_string(),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_key() {
        let cache = FetchCache::new();
        assert!(cache.get_fresh(&CacheKey::Index).is_none());
    }
}
