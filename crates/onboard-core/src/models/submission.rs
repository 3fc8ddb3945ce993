//! Submission and autosave status models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Position of the two-phase submission state machine.
///
/// `Idle -> Phase1Running -> Phase1Done -> Phase2Running -> Succeeded`, with
/// `Failed` reachable from either running phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Phase1Running,
    Phase1Done,
    Phase2Running,
    Succeeded,
    Failed {
        message: String,
    },
}

impl SubmissionPhase {
    /// Whether a network phase is currently in flight.
    pub fn is_running(&self) -> bool {
        matches!(
            self,
            SubmissionPhase::Phase1Running
                | SubmissionPhase::Phase1Done
                | SubmissionPhase::Phase2Running
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionPhase::Succeeded | SubmissionPhase::Failed { .. }
        )
    }
}

/// Submission progress as exposed to the presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submission {
    pub phase: SubmissionPhase,
    /// Percentage, 0 to 100.
    pub progress: u8,
    /// Human readable log lines, oldest first.
    pub log: Vec<String>,
}

impl Submission {
    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    /// Failure message if the last attempt failed.
    pub fn failure(&self) -> Option<&str> {
        match &self.phase {
            SubmissionPhase::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Draft autosave indicator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "at", rename_all = "snake_case")]
pub enum DraftStatus {
    #[default]
    Idle,
    Saving,
    SavedAt(Timestamp),
}

impl DraftStatus {
    pub fn last_saved(&self) -> Option<Timestamp> {
        match self {
            DraftStatus::SavedAt(at) => Some(*at),
            _ => None,
        }
    }
}
