//! Roadmap - visualize the evolution of AI model series.
//!
//! Main entry point for the roadmap web server. The application is
//! organized into the following modules:
//!
//! - `models`: data structures for documents, papers, timeline, and selection
//! - `identifiers`: canonicalization of arXiv identifier spellings
//! - `citations`: citation transform and report rendering
//! - `papers`: batched metadata fetch with fallback synthesis
//! - `associations`: model-paper association index
//! - `timeline`: year grouping for the timeline view
//! - `selection`: the selection synchronization controller
//! - `fetch` / `cache`: document loads with retry and freshness caching
//! - `dashboard` / `handlers`: HTTP surface

use axum::{routing::get, Router};
use std::fs;
use std::sync::Arc;
use tower_http::services::ServeDir;

use roadmap::{dashboard, handlers, AppState, CONTENT_DIR, STATIC_DIR};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    fs::create_dir_all(CONTENT_DIR).ok();
    fs::create_dir_all(STATIC_DIR).ok();

    let state = Arc::new(AppState::new().expect("Failed to initialize application state"));

    let app = Router::new()
        // Document routes
        .route("/api/index", get(handlers::get_index))
        .route("/api/series/{id}", get(handlers::get_series))
        .route("/api/series/{id}/report", get(handlers::get_report))
        .route("/api/series/{id}/papers", get(handlers::get_papers))
        .route("/api/series/{id}/dashboard", get(dashboard::dashboard))
        // Selection routes
        .route(
            "/api/series/{id}/selection",
            get(handlers::get_selection).post(handlers::post_selection),
        )
        // Static content and page shell
        .nest_service("/content", ServeDir::new(CONTENT_DIR))
        .fallback_service(ServeDir::new(STATIC_DIR))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .expect("Failed to bind to port 3000");

    println!("Roadmap server running at http://127.0.0.1:3000");
    println!("Content directory: {}", CONTENT_DIR);

    axum::serve(listener, app).await.expect("Server error");
}
