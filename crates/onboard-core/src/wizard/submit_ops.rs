//! Two-phase submission driven from the session.

use std::time::Duration;

use log::{debug, info};

use super::Wizard;
use crate::{
    models::{DraftStatus, Submission, SubmissionPhase, WizardStep},
    submitter::SubmissionRequest,
};

/// Why [`Wizard::submit`] did not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotStartedReason {
    RoleUnresolved,
    AlreadyRunning,
    /// Admin has not passed "Next" with a valid stage 1.
    IncompleteStage1,
    IncompleteStage2,
}

/// Result of one [`Wizard::submit`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    NotStarted(NotStartedReason),
    /// Both phases completed. The caller should navigate away after
    /// `redirect_after`.
    Succeeded { redirect_after: Duration },
    /// The pipeline stopped; form data is intact and the call can be retried.
    Failed { message: String },
}

impl Wizard {
    /// Submits the session through the two-phase submitter.
    ///
    /// Admin must be on stage 2 with a valid stage 1, i.e. past
    /// [`Wizard::next`]. Every intermediate state is published to
    /// `session().submission`.
    /// On success the draft is cleared and the pending autosave is dropped
    /// so the submitted data is not saved again.
    pub async fn submit(&self) -> SubmitOutcome {
        let mut request = None;
        let mut reason = NotStartedReason::RoleUnresolved;
        self.shared.session.send_if_modified(|session| {
            let Some(role) = session.active_role() else {
                return false;
            };
            if session.submission.is_running() {
                reason = NotStartedReason::AlreadyRunning;
                return false;
            }
            if role.sees_stage1()
                && (session.current_step != WizardStep::Stage2 || !session.is_stage1_valid())
            {
                reason = NotStartedReason::IncompleteStage1;
                return false;
            }
            if !session.is_stage2_valid() {
                reason = NotStartedReason::IncompleteStage2;
                return false;
            }
            request = Some(SubmissionRequest {
                role,
                stage1: session.stage1.clone(),
                stage2: session.stage2.clone(),
            });
            // Marked running before the first await.
            session.submission = Submission {
                phase: SubmissionPhase::Phase1Running,
                progress: 0,
                log: Vec::new(),
            };
            true
        });

        let Some(request) = request else {
            debug!("Submission not started: {reason:?}");
            return SubmitOutcome::NotStarted(reason);
        };

        let shared = &self.shared;
        let result = shared
            .submitter
            .submit(&request, |submission| {
                shared
                    .session
                    .send_modify(|session| session.submission = submission.clone());
            })
            .await;

        let Some(submission) = result else {
            shared
                .session
                .send_modify(|session| session.submission = Submission::default());
            return SubmitOutcome::NotStarted(NotStartedReason::IncompleteStage2);
        };

        match submission.phase {
            SubmissionPhase::Succeeded => {
                shared.cancel_autosave();
                shared.next_epoch();
                shared
                    .session
                    .send_modify(|session| session.draft_status = DraftStatus::Idle);
                info!("Submission succeeded for {}", request.role);
                SubmitOutcome::Succeeded {
                    redirect_after: shared.config.redirect_delay,
                }
            }
            SubmissionPhase::Failed { message } => SubmitOutcome::Failed { message },
            phase => SubmitOutcome::Failed {
                message: format!("Submission stopped in state {phase:?}"),
            },
        }
    }
}
