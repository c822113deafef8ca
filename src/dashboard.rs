//! The staged dashboard load pipeline.
//!
//! Stage one loads the series summary, which supplies the paper identifier
//! set. Stage two runs the report load and the paper-metadata batch
//! concurrently; the report is a terminal failure if it cannot load, while
//! the paper batch always succeeds through fallback synthesis. The final
//! assembly cross-links papers and models and derives the timeline.

use crate::associations::build_association_index;
use crate::citations::render_report;
use crate::identifiers::canonicalize;
use crate::models::{DashboardData, ReportView};
use crate::papers::fetch_cached_paper_batch;
use crate::timeline::build_timeline;
use crate::AppState;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

/// Canonical identifiers of a series' papers, in document order.
/// Unrecognized references are skipped silently; duplicates collapse to the
/// first occurrence.
pub fn canonical_paper_ids(unique_papers: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    unique_papers
        .iter()
        .filter_map(|raw| canonicalize(raw))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Run the full pipeline for one series.
pub async fn load_dashboard(state: &AppState, id: &str) -> Result<DashboardData, String> {
    // Stage 1: the summary gates everything else
    let series = state.store.fetch_series(&state.cache, id).await?;
    let paper_ids = canonical_paper_ids(&series.unique_papers);

    // Stage 2: report and paper metadata are independent of each other
    let (report_markdown, papers_by_id) = tokio::join!(
        state.store.fetch_report(&state.cache, id),
        fetch_cached_paper_batch(
            state.store.client(),
            &state.paper_batch_url,
            &state.cache,
            &paper_ids
        ),
    );
    let report_markdown = report_markdown?;

    let (html, citations) = render_report(&report_markdown);

    // Every requested id is guaranteed present in the batch result
    let papers: Vec<_> = paper_ids
        .iter()
        .filter_map(|id| papers_by_id.get(id).cloned())
        .collect();

    let associations = build_association_index(&series.details, &paper_ids);
    let timeline = build_timeline(&papers, &associations);

    Ok(DashboardData {
        series,
        report: ReportView { html, citations },
        papers,
        timeline,
        associations,
    })
}

/// GET /api/series/{id}/dashboard
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    if let Err(e) = crate::fetch::validate_series_id(&id) {
        return (StatusCode::BAD_REQUEST, e).into_response();
    }

    match load_dashboard(&state, &id).await {
        Ok(data) => axum::Json(data).into_response(),
        Err(e) => (StatusCode::BAD_GATEWAY, e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_paper_ids_skips_unrecognized() {
        let raw = vec![
            "https://arxiv.org/abs/2309.00071".to_string(),
            "https://example.com/whitepaper.pdf".to_string(),
            "https://arxiv.org/abs/1706.03762".to_string(),
        ];
        assert_eq!(
            canonical_paper_ids(&raw),
            vec![
                "ARXIV:2309.00071".to_string(),
                "ARXIV:1706.03762".to_string()
            ]
        );
    }

    #[test]
    fn test_canonical_paper_ids_deduplicates() {
        let raw = vec![
            "https://arxiv.org/abs/2309.00071".to_string(),
            "2309.00071".to_string(),
        ];
        assert_eq!(canonical_paper_ids(&raw), vec!["ARXIV:2309.00071".to_string()]);
    }

    #[tokio::test]
    async fn test_dashboard_rejects_invalid_id_with_400() {
        let state = Arc::new(AppState {
            store: crate::fetch::DocumentStore::new("http://127.0.0.1:3000/content/").unwrap(),
            paper_batch_url: crate::papers::PAPER_BATCH_URL.to_string(),
            cache: std::sync::Mutex::new(crate::cache::FetchCache::new()),
            sessions: std::sync::Mutex::new(std::collections::HashMap::new()),
        });

        let res = dashboard(State(state), Path("../secrets".to_string())).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
