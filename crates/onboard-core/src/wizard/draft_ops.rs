//! Draft autosave, flush and clear operations.

use std::sync::{Arc, PoisonError};

use jiff::Timestamp;
use log::{debug, info};

use super::{Shared, Wizard};
use crate::{
    error::{OnboardError, Result},
    models::{merge_draft, Draft, DraftStatus, Role, RoleState},
    params::ClearDraft,
};

impl Shared {
    /// Loads `role`'s draft and merges it into the session, unless the role
    /// epoch moved on while the load was pending.
    pub(crate) async fn load_draft(&self, role: Role, epoch: u64) {
        let Some(draft) = self.drafts.load(role).await else {
            debug!("No draft for {role}");
            return;
        };

        let applied = self.session.send_if_modified(|session| {
            if self.current_epoch() != epoch || session.active_role() != Some(role) {
                return false;
            }
            let (stage1, stage2) = merge_draft((&session.stage1, &session.stage2), &draft);
            let changed = stage1 != session.stage1 || stage2 != session.stage2;
            session.stage1 = stage1;
            session.stage2 = stage2;
            changed
        });

        if applied {
            info!("Restored draft for {role}");
        } else {
            debug!("Discarded draft for {role}: session moved on or nothing to merge");
        }
    }

    /// Re-arms the autosave timer, cancelling the pending one.
    pub(crate) fn arm_autosave(self: &Arc<Self>) {
        let epoch = self.current_epoch();
        let shared = Arc::clone(self);
        let delay = self.config.autosave_delay;

        let mut autosave = self.autosave.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = autosave.take() {
            previous.abort();
        }
        *autosave = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            shared.autosave_now(epoch).await;
        }));
    }

    /// Persists the current stage data for the active role.
    ///
    /// Returns whether a draft was written. Nothing is written for an
    /// unresolved role, for empty forms, or once `epoch` is stale.
    pub(crate) async fn autosave_now(&self, epoch: u64) -> bool {
        let session = self.snapshot();
        if self.current_epoch() != epoch {
            return false;
        }
        let Some(role) = session.active_role() else {
            return false;
        };
        let Some(draft) = Draft::for_role(role, &session.stage1, &session.stage2) else {
            return false;
        };

        let previous = session.draft_status;
        self.set_draft_status(epoch, DraftStatus::Saving);

        let status = if self.drafts.save(role, &draft).await {
            DraftStatus::SavedAt(Timestamp::now())
        } else {
            previous
        };
        self.set_draft_status(epoch, status);
        matches!(status, DraftStatus::SavedAt(_))
    }

    fn set_draft_status(&self, epoch: u64, status: DraftStatus) {
        self.session.send_if_modified(|session| {
            if self.current_epoch() != epoch || session.draft_status == status {
                return false;
            }
            session.draft_status = status;
            true
        });
    }
}

impl Wizard {
    /// Saves the pending draft immediately instead of waiting for the
    /// autosave timer. Returns whether a draft was written.
    ///
    /// Does nothing when no edit is pending.
    pub async fn flush_draft(&self) -> bool {
        if !self.shared.cancel_autosave() {
            return false;
        }
        let epoch = self.shared.current_epoch();
        self.shared.autosave_now(epoch).await
    }

    /// Deletes the current role's draft and resets both forms.
    ///
    /// # Errors
    ///
    /// - `OnboardError::InvalidInput` if `params.confirmed` is false
    /// - `OnboardError::InvalidRole` if the role is unresolved
    /// - `OnboardError::SubmissionInProgress` while a submission runs
    pub async fn clear_draft(&self, params: &ClearDraft) -> Result<()> {
        if !params.confirmed {
            return Err(OnboardError::invalid_input("confirmed")
                .with_reason("Clearing the draft requires confirmation"));
        }

        let session = self.shared.snapshot();
        let role = match &session.role {
            RoleState::Resolved(role) => *role,
            RoleState::Unresolved { value } => {
                return Err(OnboardError::InvalidRole {
                    value: value.clone(),
                });
            }
        };
        if session.submission.is_running() {
            return Err(OnboardError::SubmissionInProgress);
        }

        self.shared.cancel_autosave();
        self.shared.next_epoch();
        self.shared.drafts.clear(role).await;

        self.shared.session.send_modify(|session| session.reset_forms());
        self.department_suggest.on_query_change("");
        self.location_suggest.on_query_change("");

        info!("Cleared draft for {role}");
        Ok(())
    }
}
