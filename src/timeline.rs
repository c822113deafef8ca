//! Chronological timeline derivation.
//!
//! Papers are grouped by publication year with the newest year first.
//! Grouping is stable: papers sharing a year keep their relative input
//! order. Each node carries its associated-model count so the timeline can
//! badge nodes without consulting the index again.

use crate::models::{ModelDetail, Paper, TimelineGroup, TimelineNode};

use std::collections::HashMap;

/// Group papers by year, newest first, annotating each node with the number
/// of models associated with it.
pub fn build_timeline(
    papers: &[Paper],
    associations: &HashMap<String, Vec<ModelDetail>>,
) -> Vec<TimelineGroup> {
    let mut sorted: Vec<&Paper> = papers.iter().collect();
    // Stable sort keeps same-year papers in input order
    sorted.sort_by(|a, b| b.year.cmp(&a.year));

    let mut groups: Vec<TimelineGroup> = Vec::new();
    for paper in sorted {
        let count = associations
            .get(&paper.paper_id)
            .map(|models| models.len())
            .unwrap_or(0);
        let node = TimelineNode {
            paper: paper.clone(),
            associated_model_count: count,
        };

        match groups.last_mut() {
            Some(group) if group.year == paper.year => group.nodes.push(node),
            _ => groups.push(TimelineGroup {
                year: paper.year,
                nodes: vec![node],
            }),
        }
    }

    groups
}
