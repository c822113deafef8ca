//! Content document loading: index, series summaries, and analysis reports.
//!
//! Documents are fetched over HTTP from a configurable base URL with one
//! automatic retry, and cached in the shared `FetchCache` for the freshness
//! window. A failed load (after the retry) is terminal for the requesting
//! view; nothing is partially rendered. Cache writes happen only on
//! successful completion, so a load dropped mid-flight leaves no trace.

use crate::cache::{CacheKey, CachedValue, FetchCache};
use crate::models::{IndexData, SeriesData};

use std::sync::Mutex;
use std::time::Duration;
use url::Url;

/// Fetches the three content documents from a base URL.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    base_url: Url,
    client: reqwest::Client,
}

/// Series ids are interpolated into content paths; restrict them to a safe
/// charset so an id can never traverse outside the content tree.
pub fn validate_series_id(id: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err("Series id is empty".to_string());
    }
    // Dots are allowed for version-style ids, but never two in a row
    if id.contains("..") {
        return Err(format!("Invalid series id: {}", id));
    }
    if id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        Ok(())
    } else {
        Err(format!("Invalid series id: {}", id))
    }
}

impl DocumentStore {
    /// Build a store for the given base URL. The URL must parse and use an
    /// http(s) scheme; a trailing slash is appended if missing so relative
    /// joins resolve under it.
    pub fn new(base_url: &str) -> Result<Self, String> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url =
            Url::parse(&normalized).map_err(|e| format!("Invalid content URL: {}", e))?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(format!(
                "Content URL must be http(s), got {}",
                base_url.scheme()
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| format!("Cannot build HTTP client: {}", e))?;

        Ok(Self { base_url, client })
    }

    /// The shared outbound HTTP client (also used for the paper batch).
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    async fn get_once(&self, path: &str) -> Result<String, String> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| format!("Cannot resolve {}: {}", path, e))?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| format!("Fetch of {} failed: {}", url, e))?;

        if !response.status().is_success() {
            return Err(format!("{} returned {}", url, response.status()));
        }

        response
            .text()
            .await
            .map_err(|e| format!("Cannot read body of {}: {}", url, e))
    }

    /// One automatic retry on any failure, then the error is terminal.
    async fn get_text(&self, path: &str) -> Result<String, String> {
        match self.get_once(path).await {
            Ok(text) => Ok(text),
            Err(_) => self.get_once(path).await,
        }
    }

    /// Load `index.json`.
    pub async fn fetch_index(&self, cache: &Mutex<FetchCache>) -> Result<IndexData, String> {
        if let Some(CachedValue::Index(data)) = cache.lock().unwrap().get_fresh(&CacheKey::Index)
        {
            return Ok(data);
        }

        let text = self.get_text("index.json").await?;
        let data: IndexData = serde_json::from_str(&text)
            .map_err(|e| format!("index.json is not valid: {}", e))?;

        cache
            .lock()
            .unwrap()
            .insert(CacheKey::Index, CachedValue::Index(data.clone()));
        Ok(data)
    }

    /// Load `series/<id>.json`.
    pub async fn fetch_series(
        &self,
        cache: &Mutex<FetchCache>,
        id: &str,
    ) -> Result<SeriesData, String> {
        validate_series_id(id)?;

        let key = CacheKey::Series(id.to_string());
        if let Some(CachedValue::Series(data)) = cache.lock().unwrap().get_fresh(&key) {
            return Ok(data);
        }

        let text = self.get_text(&format!("series/{}.json", id)).await?;
        let data: SeriesData = serde_json::from_str(&text)
            .map_err(|e| format!("series/{}.json is not valid: {}", id, e))?;

        cache
            .lock()
            .unwrap()
            .insert(key, CachedValue::Series(data.clone()));
        Ok(data)
    }

    /// Load `reports/series/<id>.md` as raw markdown.
    pub async fn fetch_report(
        &self,
        cache: &Mutex<FetchCache>,
        id: &str,
    ) -> Result<String, String> {
        validate_series_id(id)?;

        let key = CacheKey::Report(id.to_string());
        if let Some(CachedValue::Report(text)) = cache.lock().unwrap().get_fresh(&key) {
            return Ok(text);
        }

        let text = self.get_text(&format!("reports/series/{}.md", id)).await?;

        cache
            .lock()
            .unwrap()
            .insert(key, CachedValue::Report(text.clone()));
        Ok(text)
    }
}
