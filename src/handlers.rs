//! HTTP route handlers for the document and selection APIs.

use crate::fetch::validate_series_id;
use crate::models::{ReportView, SelectionEvent, SelectionResponse};
use crate::papers::fetch_cached_paper_batch;
use crate::AppState;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

// ============================================================================
// Document Endpoints
// ============================================================================

/// GET /api/index
pub async fn get_index(State(state): State<Arc<AppState>>) -> Response {
    match state.store.fetch_index(&state.cache).await {
        Ok(data) => axum::Json(data).into_response(),
        Err(e) => (StatusCode::BAD_GATEWAY, e).into_response(),
    }
}

/// GET /api/series/{id}
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    if let Err(e) = validate_series_id(&id) {
        return (StatusCode::BAD_REQUEST, e).into_response();
    }

    match state.store.fetch_series(&state.cache, &id).await {
        Ok(data) => axum::Json(data).into_response(),
        Err(e) => (StatusCode::BAD_GATEWAY, e).into_response(),
    }
}

/// GET /api/series/{id}/report — transformed and rendered analysis report.
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    if let Err(e) = validate_series_id(&id) {
        return (StatusCode::BAD_REQUEST, e).into_response();
    }

    match state.store.fetch_report(&state.cache, &id).await {
        Ok(markdown) => {
            let (html, citations) = crate::citations::render_report(&markdown);
            axum::Json(ReportView { html, citations }).into_response()
        }
        Err(e) => (StatusCode::BAD_GATEWAY, e).into_response(),
    }
}

/// GET /api/series/{id}/papers — fetched or synthesized metadata for every
/// paper the series references.
pub async fn get_papers(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    if let Err(e) = validate_series_id(&id) {
        return (StatusCode::BAD_REQUEST, e).into_response();
    }

    let series = match state.store.fetch_series(&state.cache, &id).await {
        Ok(s) => s,
        Err(e) => return (StatusCode::BAD_GATEWAY, e).into_response(),
    };

    let paper_ids = crate::dashboard::canonical_paper_ids(&series.unique_papers);
    let papers = fetch_cached_paper_batch(
        state.store.client(),
        &state.paper_batch_url,
        &state.cache,
        &paper_ids,
    )
    .await;

    let ordered: Vec<_> = paper_ids
        .iter()
        .filter_map(|id| papers.get(id).cloned())
        .collect();
    axum::Json(ordered).into_response()
}

// ============================================================================
// Selection Endpoints
// ============================================================================

/// GET /api/series/{id}/selection — current selection state of the session.
pub async fn get_selection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    if let Err(e) = validate_series_id(&id) {
        return (StatusCode::BAD_REQUEST, e).into_response();
    }

    let sessions = state.sessions.lock().unwrap();
    let selection = sessions
        .get(&id)
        .map(|c| c.state().clone())
        .unwrap_or_default();
    axum::Json(selection).into_response()
}

/// POST /api/series/{id}/selection — apply one typed selection event.
///
/// The session mutex serializes overlapping activations; the last applied
/// event wins.
pub async fn post_selection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    axum::Json(event): axum::Json<SelectionEvent>,
) -> Response {
    if let Err(e) = validate_series_id(&id) {
        return (StatusCode::BAD_REQUEST, e).into_response();
    }

    let mut sessions = state.sessions.lock().unwrap();
    let controller = sessions.entry(id).or_default();
    let effects = controller.apply(event);

    axum::Json(SelectionResponse {
        state: controller.state().clone(),
        effects,
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FetchCache;
    use crate::fetch::DocumentStore;
    use crate::papers::PAPER_BATCH_URL;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState {
            store: DocumentStore::new("http://127.0.0.1:3000/content/").unwrap(),
            paper_batch_url: PAPER_BATCH_URL.to_string(),
            cache: Mutex::new(FetchCache::new()),
            sessions: Mutex::new(HashMap::new()),
        })
    }

    // A malformed series id must be rejected up front with 400 on every
    // endpoint, never surfaced as an upstream 502 from a fetch attempt.

    #[tokio::test]
    async fn test_get_series_rejects_invalid_id_with_400() {
        let res = get_series(State(test_state()), Path("../secrets".to_string())).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_report_rejects_invalid_id_with_400() {
        let res = get_report(State(test_state()), Path("a/b".to_string())).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_papers_rejects_invalid_id_with_400() {
        let res = get_papers(State(test_state()), Path("id with spaces".to_string())).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
