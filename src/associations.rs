//! Model–paper association index.
//!
//! Registry reference strings are free-form: the same paper may appear as a
//! bare ID, an arxiv.org URL, or embedded in a hub URL with query-string
//! noise. Association therefore uses substring containment of the
//! identifier's numeric portion rather than exact-token matching. That is
//! intentionally permissive; an identifier whose numeric portion is a strict
//! prefix of another's will also match (the registry data accepts this).

use crate::identifiers::numeric_portion;
use crate::models::ModelDetail;

use std::collections::HashMap;

/// Build the reverse index from canonical paper identifier to the models
/// whose reference strings contain that paper's numeric portion.
///
/// Deterministic for fixed inputs: each paper's model list follows registry
/// order. Papers referenced by no model map to an empty list, which the
/// detail panel renders as an explicit empty state.
pub fn build_association_index(
    models: &[ModelDetail],
    paper_ids: &[String],
) -> HashMap<String, Vec<ModelDetail>> {
    let mut index = HashMap::new();

    for paper_id in paper_ids {
        let numeric = numeric_portion(paper_id);
        let associated: Vec<ModelDetail> = models
            .iter()
            .filter(|m| m.papers.iter().any(|r| r.contains(numeric)))
            .cloned()
            .collect();
        index.insert(paper_id.clone(), associated);
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(id: &str, refs: &[&str]) -> ModelDetail {
        ModelDetail {
            model_id: id.to_string(),
            papers: refs.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_association_through_url_noise() {
        // Substring match must survive prefix/suffix noise around the ID
        let models = vec![model("qwen2-7b", &["https://hf.co/x?papers=2309.00071"])];
        let papers = vec!["ARXIV:2309.00071".to_string()];

        let index = build_association_index(&models, &papers);
        let associated = &index["ARXIV:2309.00071"];
        assert_eq!(associated.len(), 1);
        assert_eq!(associated[0].model_id, "qwen2-7b");
    }

    #[test]
    fn test_association_bare_and_url_references() {
        let models = vec![
            model("m1", &["2309.00071"]),
            model("m2", &["https://arxiv.org/abs/2309.00071"]),
            model("m3", &["https://arxiv.org/abs/1706.03762"]),
        ];
        let papers = vec!["ARXIV:2309.00071".to_string()];

        let index = build_association_index(&models, &papers);
        let ids: Vec<&str> = index["ARXIV:2309.00071"]
            .iter()
            .map(|m| m.model_id.as_str())
            .collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[test]
    fn test_no_associated_models_is_empty_not_missing() {
        let models = vec![model("m1", &["https://arxiv.org/abs/1706.03762"])];
        let papers = vec!["ARXIV:2309.00071".to_string()];

        let index = build_association_index(&models, &papers);
        assert!(index.contains_key("ARXIV:2309.00071"));
        assert!(index["ARXIV:2309.00071"].is_empty());
    }

    #[test]
    fn test_prefix_identifier_also_matches() {
        // Containment matching: 2309.0007 is a prefix of 2309.00071, so a
        // reference to the longer ID also associates with the shorter one.
        // This mirrors how the registry strings are matched in practice.
        let models = vec![model("m1", &["https://arxiv.org/abs/2309.00071"])];
        let papers = vec!["ARXIV:2309.0007".to_string(), "ARXIV:2309.00071".to_string()];

        let index = build_association_index(&models, &papers);
        assert_eq!(index["ARXIV:2309.0007"].len(), 1);
        assert_eq!(index["ARXIV:2309.00071"].len(), 1);
    }

    #[test]
    fn test_model_order_follows_registry_order() {
        let models = vec![
            model("b", &["2309.00071"]),
            model("a", &["2309.00071"]),
            model("c", &["2309.00071"]),
        ];
        let papers = vec!["ARXIV:2309.00071".to_string()];

        let index = build_association_index(&models, &papers);
        let ids: Vec<&str> = index["ARXIV:2309.00071"]
            .iter()
            .map(|m| m.model_id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
