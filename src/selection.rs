//! Selection synchronization across the report pane, timeline, and detail
//! panel.
//!
//! The controller is the single writer of `SelectionState`. Views emit typed
//! `SelectionEvent`s; the controller applies one event at a time and returns
//! the `ViewEffect`s each view must carry out. Three situations exist: no
//! selection, a highlighted identifier with no open panel, and an open
//! detail panel whose paper is always also the highlighted identifier.

use crate::models::{SelectionEvent, SelectionState, ViewEffect};

#[derive(Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Apply one event and return the effects for the views.
    ///
    /// Invariant: whenever a detail panel is open, the highlighted
    /// identifier equals the open paper's identifier. Events are applied in
    /// arrival order; the last applied selection wins, and every scroll
    /// effect supersedes any in-progress scroll animation in the view layer.
    pub fn apply(&mut self, event: SelectionEvent) -> Vec<ViewEffect> {
        match event {
            SelectionEvent::CitationActivated { id } => {
                let mut effects = Vec::new();
                if self.state.open_paper.take().is_some() {
                    effects.push(ViewEffect::CloseDetail);
                }
                self.state.highlighted = Some(id.clone());
                effects.push(ViewEffect::ScrollTimelineTo { id });
                effects
            }
            SelectionEvent::PaperActivated { paper } => {
                let id = paper.paper_id.clone();
                self.state.highlighted = Some(id.clone());
                self.state.open_paper = Some(paper);
                vec![
                    ViewEffect::ScrollTimelineTo { id: id.clone() },
                    ViewEffect::OpenDetail { id },
                ]
            }
            SelectionEvent::DetailClosed => {
                // Highlight is retained; closing never regresses to Idle
                if self.state.open_paper.take().is_some() {
                    vec![ViewEffect::CloseDetail]
                } else {
                    Vec::new()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::papers::synthesize_paper;

    fn assert_consistent(state: &SelectionState) {
        if let Some(paper) = &state.open_paper {
            assert_eq!(state.highlighted.as_deref(), Some(paper.paper_id.as_str()));
        }
    }

    #[test]
    fn test_initial_state_is_idle() {
        let controller = SelectionController::new();
        assert!(controller.state().highlighted.is_none());
        assert!(controller.state().open_paper.is_none());
    }

    #[test]
    fn test_citation_activation_highlights_and_scrolls() {
        let mut controller = SelectionController::new();
        let effects = controller.apply(SelectionEvent::CitationActivated {
            id: "ARXIV:2309.00071".to_string(),
        });

        assert_eq!(
            controller.state().highlighted.as_deref(),
            Some("ARXIV:2309.00071")
        );
        assert!(controller.state().open_paper.is_none());
        assert_eq!(
            effects,
            vec![ViewEffect::ScrollTimelineTo {
                id: "ARXIV:2309.00071".to_string()
            }]
        );
    }

    #[test]
    fn test_paper_activation_opens_detail_and_highlights() {
        let mut controller = SelectionController::new();
        let paper = synthesize_paper("ARXIV:2309.00071");
        let effects = controller.apply(SelectionEvent::PaperActivated { paper });

        assert_eq!(
            controller.state().highlighted.as_deref(),
            Some("ARXIV:2309.00071")
        );
        assert!(controller.state().open_paper.is_some());
        assert_consistent(controller.state());
        assert!(effects.contains(&ViewEffect::OpenDetail {
            id: "ARXIV:2309.00071".to_string()
        }));
        assert!(effects.contains(&ViewEffect::ScrollTimelineTo {
            id: "ARXIV:2309.00071".to_string()
        }));
    }

    #[test]
    fn test_citation_activation_closes_open_panel() {
        let mut controller = SelectionController::new();
        controller.apply(SelectionEvent::PaperActivated {
            paper: synthesize_paper("ARXIV:1706.03762"),
        });

        let effects = controller.apply(SelectionEvent::CitationActivated {
            id: "ARXIV:2309.00071".to_string(),
        });

        assert!(controller.state().open_paper.is_none());
        assert_eq!(
            controller.state().highlighted.as_deref(),
            Some("ARXIV:2309.00071")
        );
        assert_eq!(effects[0], ViewEffect::CloseDetail);
        assert_consistent(controller.state());
    }

    #[test]
    fn test_detail_close_retains_highlight() {
        let mut controller = SelectionController::new();
        controller.apply(SelectionEvent::PaperActivated {
            paper: synthesize_paper("ARXIV:2309.00071"),
        });

        let effects = controller.apply(SelectionEvent::DetailClosed);

        assert!(controller.state().open_paper.is_none());
        // Never regress to Idle on close
        assert_eq!(
            controller.state().highlighted.as_deref(),
            Some("ARXIV:2309.00071")
        );
        assert_eq!(effects, vec![ViewEffect::CloseDetail]);
    }

    #[test]
    fn test_detail_close_without_open_panel_is_noop() {
        let mut controller = SelectionController::new();
        controller.apply(SelectionEvent::CitationActivated {
            id: "ARXIV:2309.00071".to_string(),
        });

        let effects = controller.apply(SelectionEvent::DetailClosed);
        assert!(effects.is_empty());
        assert_eq!(
            controller.state().highlighted.as_deref(),
            Some("ARXIV:2309.00071")
        );
    }

    #[test]
    fn test_overlapping_activations_last_wins() {
        let mut controller = SelectionController::new();
        controller.apply(SelectionEvent::CitationActivated {
            id: "ARXIV:1706.03762".to_string(),
        });
        controller.apply(SelectionEvent::CitationActivated {
            id: "ARXIV:2309.00071".to_string(),
        });

        assert_eq!(
            controller.state().highlighted.as_deref(),
            Some("ARXIV:2309.00071")
        );
    }

    #[test]
    fn test_paper_activation_replaces_open_panel() {
        let mut controller = SelectionController::new();
        controller.apply(SelectionEvent::PaperActivated {
            paper: synthesize_paper("ARXIV:1706.03762"),
        });
        controller.apply(SelectionEvent::PaperActivated {
            paper: synthesize_paper("ARXIV:2309.00071"),
        });

        assert_consistent(controller.state());
        assert_eq!(
            controller
                .state()
                .open_paper
                .as_ref()
                .map(|p| p.paper_id.as_str()),
            Some("ARXIV:2309.00071")
        );
    }
}
