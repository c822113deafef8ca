//! Batched paper-metadata fetching with total-coverage fallback.
//!
//! One POST to the Semantic Scholar batch endpoint resolves every canonical
//! identifier of a series at once. When the service is unreachable or
//! returns a non-success status, the whole batch degrades to deterministic
//! synthetic records so that every requested identifier still yields exactly
//! one `Paper`. Callers never see a missing result and never see an error.

use crate::cache::{CacheKey, CachedValue, FetchCache};
use crate::identifiers::{arxiv_abs_url, numeric_portion};
use crate::models::{Paper, PaperAuthor};

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Semantic Scholar Graph batch endpoint; the default metadata service.
/// Callers pass the endpoint explicitly (it is carried on `AppState`), so a
/// deployment can point at a proxy and tests at an unreachable address.
pub const PAPER_BATCH_URL: &str = "https://api.semanticscholar.org/graph/v1/paper/batch";

/// Fields requested for every paper in the batch.
pub const PAPER_FIELDS: &str = "title,year,abstract,authors,venue,url,citationCount";

/// Venue used when the service omits one, and for all synthesized records.
pub const DEFAULT_VENUE: &str = "ArXiv";

/// Abstract text of synthesized fallback records.
pub const FALLBACK_ABSTRACT: &str = "Abstract not available (API Limit or Error)";

// ============================================================================
// Fallback Synthesis
// ============================================================================

/// Build a deterministic placeholder record for one canonical identifier.
///
/// The year is derived from the identifier's two leading digits plus 2000
/// (arXiv IDs encode YYMM), and the URL is reconstructed so that it
/// round-trips back to the same canonical identifier.
pub fn synthesize_paper(canonical: &str) -> Paper {
    let numeric = numeric_portion(canonical);
    let year = numeric
        .get(..2)
        .and_then(|y| y.parse::<i32>().ok())
        .unwrap_or(23)
        + 2000;

    Paper {
        paper_id: canonical.to_string(),
        title: format!("Paper {}", canonical),
        abstract_text: FALLBACK_ABSTRACT.to_string(),
        year,
        venue: DEFAULT_VENUE.to_string(),
        authors: vec![PaperAuthor {
            author_id: "1".to_string(),
            name: "Unknown Author".to_string(),
        }],
        url: arxiv_abs_url(canonical),
        citation_count: None,
    }
}

// ============================================================================
// Response Mapping
// ============================================================================

/// Map one response item onto a `Paper` keyed by the identifier we requested.
/// Missing fields fall back to the same defaults the synthesizer uses.
fn paper_from_item(canonical: &str, item: &serde_json::Value) -> Paper {
    let fallback = synthesize_paper(canonical);

    let authors = item
        .get("authors")
        .and_then(|a| a.as_array())
        .map(|authors| {
            authors
                .iter()
                .filter_map(|a| {
                    let name = a.get("name").and_then(|n| n.as_str())?;
                    let author_id = a
                        .get("authorId")
                        .and_then(|i| i.as_str())
                        .unwrap_or("")
                        .to_string();
                    Some(PaperAuthor {
                        author_id,
                        name: name.to_string(),
                    })
                })
                .collect::<Vec<_>>()
        })
        .filter(|a| !a.is_empty())
        .unwrap_or(fallback.authors);

    Paper {
        paper_id: canonical.to_string(),
        title: item
            .get("title")
            .and_then(|t| t.as_str())
            .map(|s| s.to_string())
            .unwrap_or(fallback.title),
        abstract_text: item
            .get("abstract")
            .and_then(|a| a.as_str())
            .map(|s| s.to_string())
            .unwrap_or(fallback.abstract_text),
        year: item
            .get("year")
            .and_then(|y| y.as_i64())
            .map(|y| y as i32)
            .unwrap_or(fallback.year),
        venue: item
            .get("venue")
            .and_then(|v| v.as_str())
            .filter(|v| !v.is_empty())
            .map(|s| s.to_string())
            .unwrap_or_else(|| DEFAULT_VENUE.to_string()),
        authors,
        url: item
            .get("url")
            .and_then(|u| u.as_str())
            .map(|s| s.to_string())
            .unwrap_or(fallback.url),
        citation_count: item.get("citationCount").and_then(|c| c.as_u64()),
    }
}

// ============================================================================
// Batched Fetch
// ============================================================================

async fn request_batch_once(
    client: &reqwest::Client,
    batch_url: &str,
    ids: &[String],
) -> Result<Vec<serde_json::Value>, String> {
    let url = format!("{}?fields={}", batch_url, PAPER_FIELDS);

    let response = client
        .post(&url)
        .timeout(Duration::from_secs(10))
        .json(&serde_json::json!({ "ids": ids }))
        .send()
        .await
        .map_err(|e| format!("Paper batch request failed: {}", e))?;

    if !response.status().is_success() {
        return Err(format!("Paper batch returned {}", response.status()));
    }

    response
        .json::<Vec<serde_json::Value>>()
        .await
        .map_err(|e| format!("Paper batch response not valid JSON: {}", e))
}

/// Resolve a set of canonical identifiers to paper records in one round trip.
///
/// Empty input returns an empty map without touching the network. On a
/// successful response, items are zipped with the requested identifiers
/// (the service preserves cardinality); null items and any request-level
/// failure are absorbed by fallback synthesis. The returned key set always
/// equals the input set.
pub async fn fetch_paper_batch(
    client: &reqwest::Client,
    batch_url: &str,
    ids: &[String],
) -> HashMap<String, Paper> {
    if ids.is_empty() {
        return HashMap::new();
    }

    // One automatic retry, same policy as the document loads
    let items = match request_batch_once(client, batch_url, ids).await {
        Ok(items) => Ok(items),
        Err(_) => request_batch_once(client, batch_url, ids).await,
    };

    match items {
        Ok(items) => ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let paper = match items.get(i) {
                    Some(item) if !item.is_null() => paper_from_item(id, item),
                    // Unknown identifier: the service returns null for it
                    _ => synthesize_paper(id),
                };
                (id.clone(), paper)
            })
            .collect(),
        Err(_) => ids
            .iter()
            .map(|id| (id.clone(), synthesize_paper(id)))
            .collect(),
    }
}

/// Cache-aware wrapper: a fresh cached batch for the same identifier set is
/// returned without network I/O; otherwise the batch is fetched and cached.
pub async fn fetch_cached_paper_batch(
    client: &reqwest::Client,
    batch_url: &str,
    cache: &Mutex<FetchCache>,
    ids: &[String],
) -> HashMap<String, Paper> {
    if ids.is_empty() {
        return HashMap::new();
    }

    let key = CacheKey::paper_batch(ids);
    if let Some(CachedValue::Papers(papers)) = cache.lock().unwrap().get_fresh(&key) {
        return papers;
    }

    let papers = fetch_paper_batch(client, batch_url, ids).await;
    cache
        .lock()
        .unwrap()
        .insert(key, CachedValue::Papers(papers.clone()));
    papers
}
