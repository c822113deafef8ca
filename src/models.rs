//! Data models for the roadmap service.
//!
//! This module contains the core data structures used throughout the
//! application: index and series documents, paper records, citation tokens,
//! timeline groups, and the selection state shared across views.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Index Document
// ============================================================================

/// One entry on the landing page: a model series with an analysis report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

/// A benchmark entry. Benchmarks route to the same dashboard pipeline as
/// series; they only differ in how the landing page presents them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexData {
    pub series: Vec<SeriesEntry>,
    pub benchmarks: Vec<BenchmarkEntry>,
}

// ============================================================================
// Series Document
// ============================================================================

/// One model release from the registry. `papers` holds free-form reference
/// strings (often URLs) that may embed arXiv identifiers anywhere inside.
/// Read-only to the core: supplied wholesale by the registry document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDetail {
    pub model_id: String,
    pub papers: Vec<String>,
}

/// The series summary document (`series/<id>.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesData {
    pub repo_name: String,
    pub total_models_scanned: usize,
    /// Paper URLs, e.g. "https://arxiv.org/abs/2309.00071". Canonicalized
    /// before any cross-referencing.
    pub unique_papers: Vec<String>,
    pub details: Vec<ModelDetail>,
}

// ============================================================================
// Paper Records
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaperAuthor {
    pub author_id: String,
    pub name: String,
}

/// Paper metadata, either fetched from the metadata service or synthesized
/// as a fallback. Immutable once created; keyed by `paper_id` within a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Canonical identifier, e.g. "ARXIV:2309.00071".
    pub paper_id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub year: i32,
    pub venue: String,
    pub authors: Vec<PaperAuthor>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation_count: Option<u64>,
}

// ============================================================================
// Citations
// ============================================================================

/// A citation marker found in report text. Positions are byte offsets into
/// the *rewritten* document; recomputed on every transform, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CitationToken {
    /// The raw numeric identifier as written, e.g. "2309.00071".
    pub raw: String,
    /// Canonical form, e.g. "ARXIV:2309.00071".
    pub canonical: String,
    pub start: usize,
    pub end: usize,
}

/// A rendered report: sanitized HTML plus the citations found in it.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub html: String,
    pub citations: Vec<CitationToken>,
}

// ============================================================================
// Timeline
// ============================================================================

/// One paper on the timeline, annotated with its associated-model count
/// from the association index.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineNode {
    pub paper: Paper,
    pub associated_model_count: usize,
}

/// Papers of a single year, newest year first in the timeline.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineGroup {
    pub year: i32,
    pub nodes: Vec<TimelineNode>,
}

// ============================================================================
// Dashboard Payload
// ============================================================================

/// Everything the dashboard view needs for one series, assembled by the
/// staged load pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub series: SeriesData,
    pub report: ReportView,
    pub papers: Vec<Paper>,
    pub timeline: Vec<TimelineGroup>,
    /// Canonical paper identifier -> models that reference it.
    pub associations: HashMap<String, Vec<ModelDetail>>,
}

// ============================================================================
// Selection Synchronization
// ============================================================================

/// The single shared selection record. All three views (report pane,
/// timeline, detail panel) derive their highlight/scroll/open behavior from
/// this; it is never duplicated into per-view copies.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SelectionState {
    /// Canonical identifier of the highlighted paper, if any.
    pub highlighted: Option<String>,
    /// The paper whose detail panel is open, if any. When set, `highlighted`
    /// always equals its identifier.
    pub open_paper: Option<Paper>,
}

/// Typed events emitted by the views and consumed exclusively by the
/// selection controller, which is the sole writer of `SelectionState`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// A rewritten citation was activated in the report pane.
    CitationActivated { id: String },
    /// A timeline node was activated.
    PaperActivated { paper: Paper },
    /// The detail panel was closed.
    DetailClosed,
}

/// What each view must do after a selection transition.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewEffect {
    /// Bring the timeline node with this identifier into view and mark it
    /// selected. Supersedes any in-progress scroll animation.
    ScrollTimelineTo { id: String },
    OpenDetail { id: String },
    CloseDetail,
}

/// Response to an applied selection event.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionResponse {
    pub state: SelectionState,
    pub effects: Vec<ViewEffect>,
}
