//! View-model derivation for the demo section
//!
//! `render` is a pure function of the workflow state; the page and the JSON
//! API both draw from its output.

use serde::Serialize;
use shared::Locator;

use super::workflow::WorkflowState;

/// Which of the demo's visual states applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewPhase {
    /// Upload control only
    Empty,
    /// Preview with an enabled Analyze button
    Ready,
    /// Preview with the processing indicator
    Processing,
    /// Preview with the result panel
    Succeeded,
    /// Preview with the error banner (and a stale result panel, if any)
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoView {
    pub phase: ViewPhase,
    pub preview: Option<Locator>,
    pub submit_enabled: bool,
    pub processing: bool,
    pub result: Option<Locator>,
    pub error: Option<String>,
}

impl DemoView {
    fn empty() -> Self {
        Self {
            phase: ViewPhase::Empty,
            preview: None,
            submit_enabled: false,
            processing: false,
            result: None,
            error: None,
        }
    }
}

pub fn render(state: &WorkflowState) -> DemoView {
    let Some(preview) = state.selected_image.clone() else {
        return DemoView::empty();
    };

    // Stale panels stay hidden while a submission is outstanding
    if state.pending {
        return DemoView {
            phase: ViewPhase::Processing,
            preview: Some(preview),
            submit_enabled: false,
            processing: true,
            result: None,
            error: None,
        };
    }

    let phase = match (&state.result, &state.error) {
        (_, Some(_)) => ViewPhase::Failed,
        (Some(_), None) => ViewPhase::Succeeded,
        (None, None) => ViewPhase::Ready,
    };

    DemoView {
        phase,
        preview: Some(preview),
        submit_enabled: true,
        processing: false,
        result: state.result.clone(),
        error: state.error.clone(),
    }
}
