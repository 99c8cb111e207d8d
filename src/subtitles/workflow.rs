/*!
 * Review workflow gated on subtitle completeness.
 *
 * The list itself never changes state; the workflow consults
 * `SubtitleList::is_complete` before allowing approval.
 */

use std::fmt;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::list::SubtitleList;
use crate::errors::WorkflowError;

/// Review state of a subtitle version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewState {
    #[default]
    Pending,
    Approved,
    SentBack,
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewState::Pending => write!(f, "pending"),
            ReviewState::Approved => write!(f, "approved"),
            ReviewState::SentBack => write!(f, "sent back"),
        }
    }
}

/// Named action forwarded with a save request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowAction {
    Approve,
    SendBack,
}

impl WorkflowAction {
    /// Action name as the save endpoint expects it
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowAction::Approve => "approve",
            WorkflowAction::SendBack => "send-back",
        }
    }
}

/// Approval state machine for one subtitle version
#[derive(Debug, Clone, Default)]
pub struct ApprovalWorkflow {
    state: ReviewState,
    notes: Vec<String>,
}

impl ApprovalWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    /// Notes recorded when sending back
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    fn require_pending(&self, action: &'static str) -> Result<(), WorkflowError> {
        if self.state != ReviewState::Pending {
            return Err(WorkflowError::InvalidTransition {
                from: self.state,
                action,
            });
        }
        Ok(())
    }

    /// Pending → Approved, only when every cue has text and timing
    ///
    /// On an incomplete list the state stays pending and the error carries
    /// the message to show the user.
    pub fn approve(&mut self, subtitles: &SubtitleList) -> Result<WorkflowAction, WorkflowError> {
        self.require_pending("approve")?;

        if !subtitles.is_complete() {
            let incomplete = subtitles.incomplete_count();
            warn!("Approval refused: {} incomplete subtitle(s)", incomplete);
            return Err(WorkflowError::IncompleteSubtitles { incomplete });
        }

        self.state = ReviewState::Approved;
        info!("Subtitles approved ({} lines)", subtitles.len());
        Ok(WorkflowAction::Approve)
    }

    /// Pending → SentBack with a note for the previous contributor
    pub fn send_back(&mut self, note: &str) -> Result<WorkflowAction, WorkflowError> {
        self.require_pending("send back")?;

        let note = note.trim();
        if note.is_empty() {
            return Err(WorkflowError::EmptyNote);
        }

        self.notes.push(note.to_string());
        self.state = ReviewState::SentBack;
        info!("Subtitles sent back for review");
        Ok(WorkflowAction::SendBack)
    }
}
