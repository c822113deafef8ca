//! Roadmap library - re-exports for testing and external use.
//!
//! The crate visualizes the evolution of AI model series by correlating a
//! narrative analysis report with a paper corpus and a model registry. The
//! core modules are the identifier canonicalizer, the citation transform,
//! the batched paper-metadata fetcher, the model-paper association index,
//! and the selection synchronization controller.

use std::collections::HashMap;
use std::sync::Mutex;

pub mod associations;
pub mod cache;
pub mod citations;
pub mod dashboard;
pub mod fetch;
pub mod handlers;
pub mod identifiers;
pub mod models;
pub mod papers;
pub mod selection;
pub mod timeline;

// ============================================================================
// Configuration
// ============================================================================

/// Local directory served at /content; the default content source.
pub const CONTENT_DIR: &str = "content";
/// Local directory serving the page shell.
pub const STATIC_DIR: &str = "static";
/// Env var overriding where content documents are fetched from.
pub const CONTENT_URL_ENV: &str = "ROADMAP_CONTENT_URL";
/// Default content base URL: the service's own static mount.
pub const DEFAULT_CONTENT_URL: &str = "http://127.0.0.1:3000/content/";
/// Env var overriding the paper-metadata batch endpoint.
pub const PAPER_API_URL_ENV: &str = "ROADMAP_PAPER_API_URL";

// ============================================================================
// Application State
// ============================================================================

/// Shared state: the document store, the fetch cache, and one selection
/// controller per series session. The cache and the controllers are the only
/// mutable state in the process, each behind its own mutex.
pub struct AppState {
    pub store: fetch::DocumentStore,
    pub paper_batch_url: String,
    pub cache: Mutex<cache::FetchCache>,
    pub sessions: Mutex<HashMap<String, selection::SelectionController>>,
}

impl AppState {
    pub fn new() -> Result<Self, String> {
        let base_url =
            std::env::var(CONTENT_URL_ENV).unwrap_or_else(|_| DEFAULT_CONTENT_URL.to_string());
        let store = fetch::DocumentStore::new(&base_url)?;
        let paper_batch_url = std::env::var(PAPER_API_URL_ENV)
            .unwrap_or_else(|_| papers::PAPER_BATCH_URL.to_string());

        Ok(Self {
            store,
            paper_batch_url,
            cache: Mutex::new(cache::FetchCache::new()),
            sessions: Mutex::new(HashMap::new()),
        })
    }
}

// Re-export commonly used types
pub use associations::build_association_index;
pub use cache::{CacheKey, CachedValue, FetchCache, FRESHNESS_MINUTES};
pub use citations::{render_report, transform_citations, CITATION_SCHEME};
pub use dashboard::{canonical_paper_ids, load_dashboard};
pub use fetch::{validate_series_id, DocumentStore};
pub use identifiers::{arxiv_abs_url, canonicalize, numeric_portion, ARXIV_PREFIX};
pub use models::{
    BenchmarkEntry, CitationToken, DashboardData, IndexData, ModelDetail, Paper, PaperAuthor,
    ReportView, SelectionEvent, SelectionResponse, SelectionState, SeriesData, SeriesEntry,
    TimelineGroup, TimelineNode, ViewEffect,
};
pub use papers::{
    fetch_cached_paper_batch, fetch_paper_batch, synthesize_paper, DEFAULT_VENUE,
    FALLBACK_ABSTRACT, PAPER_BATCH_URL, PAPER_FIELDS,
};
pub use selection::SelectionController;
pub use timeline::build_timeline;
