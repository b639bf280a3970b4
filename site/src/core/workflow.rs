//! Image submission workflow
//!
//! Pure state machine with no I/O dependencies. The caller owns the analyzer
//! call: `begin_submit` hands out a ticket, the analyzer runs, and `settle`
//! consumes the ticket with the outcome.

use serde::{Deserialize, Serialize};
use shared::Locator;
use std::fmt;
use std::str::FromStr;

use crate::error::{ANALYSIS_FAILED_MESSAGE, AnalysisFailed};

/// What a new selection does to a result or error left over from an earlier image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// Selecting a different image drops the stale result and error
    #[default]
    ClearOnSelect,
    /// Stale result and error stay visible until the next submission settles
    PreserveUntilSettled,
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionPolicy::ClearOnSelect => write!(f, "clear-on-select"),
            SelectionPolicy::PreserveUntilSettled => write!(f, "preserve-until-settled"),
        }
    }
}

impl FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clear-on-select" | "clear" => Ok(SelectionPolicy::ClearOnSelect),
            "preserve-until-settled" | "preserve" => Ok(SelectionPolicy::PreserveUntilSettled),
            _ => Err(format!("Unknown selection policy: {s}")),
        }
    }
}

/// The four pieces of workflow state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowState {
    pub selected_image: Option<Locator>,
    pub result: Option<Locator>,
    pub pending: bool,
    pub error: Option<String>,
}

/// Proof that a submission was started. Not `Clone`: each one settles at most once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a started submission must be settled"]
pub struct SubmitTicket {
    seq: u64,
    selection: u64,
    image: Locator,
}

impl SubmitTicket {
    /// The image this submission analyzes
    pub fn image(&self) -> &Locator {
        &self.image
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// How a settlement was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Settlement {
    /// Result stored, error cleared
    Succeeded,
    /// Error message set, previous result kept
    Failed,
    /// Pending cleared, outcome dropped because a different image is now selected
    Superseded,
    /// Ticket did not match the outstanding submission; nothing changed
    Stale,
}

/// Owns the workflow state for one session
#[derive(Debug, Default)]
pub struct SubmissionWorkflow {
    state: WorkflowState,
    policy: SelectionPolicy,
    next_seq: u64,
    in_flight: Option<u64>,
    selection_count: u64,
}

impl SubmissionWorkflow {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Replace the selected image. Returns the superseded locator when it
    /// differs from the new one so the caller can release it.
    pub fn select_image(&mut self, locator: Locator) -> Option<Locator> {
        if self.state.selected_image.as_ref() == Some(&locator) {
            return None;
        }

        let previous = self.state.selected_image.replace(locator);
        self.selection_count += 1;

        if self.policy == SelectionPolicy::ClearOnSelect {
            self.state.result = None;
            self.state.error = None;
        }

        previous
    }

    /// Whether `begin_submit` would start a submission right now
    pub fn can_submit(&self) -> bool {
        self.state.selected_image.is_some() && !self.state.pending
    }

    /// Start a submission. `None` when no image is selected or one is already pending.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if !self.can_submit() {
            return None;
        }
        let image = self.state.selected_image.clone()?;

        self.next_seq += 1;
        self.in_flight = Some(self.next_seq);
        self.state.pending = true;

        Some(SubmitTicket {
            seq: self.next_seq,
            selection: self.selection_count,
            image,
        })
    }

    /// Apply the analyzer outcome for a started submission
    pub fn settle(&mut self, ticket: SubmitTicket, outcome: Result<Locator, AnalysisFailed>) -> Settlement {
        if self.in_flight != Some(ticket.seq) {
            return Settlement::Stale;
        }

        self.in_flight = None;
        self.state.pending = false;

        let superseded =
            self.policy == SelectionPolicy::ClearOnSelect && ticket.selection != self.selection_count;
        if superseded {
            return Settlement::Superseded;
        }

        match outcome {
            Ok(result) => {
                self.state.result = Some(result);
                self.state.error = None;
                Settlement::Succeeded
            }
            Err(AnalysisFailed) => {
                self.state.error = Some(ANALYSIS_FAILED_MESSAGE.to_string());
                Settlement::Failed
            }
        }
    }

    /// Reset to the empty state, returning the held image for release.
    /// Any submission still in flight settles as `Stale` afterwards.
    pub fn teardown(&mut self) -> Option<Locator> {
        self.in_flight = None;
        let held = self.state.selected_image.take();
        self.state = WorkflowState::default();
        held
    }
}
