//! Role change operations.

use log::info;

use super::Wizard;
use crate::{
    error::{OnboardError, Result},
    models::{DraftStatus, Role, RoleState},
};

impl Wizard {
    /// Switches the session to `role`.
    ///
    /// Pending edits of the previous role are flushed to its own draft
    /// first. Switching to a different role empties both forms; the new
    /// role's draft is then loaded and merged. The role is also written
    /// back to the role signal.
    ///
    /// Selecting the role that is already active only resets the step and
    /// clears the invalid-role flag.
    ///
    /// # Errors
    ///
    /// Returns `OnboardError::SubmissionInProgress` while a submission runs.
    pub async fn change_role(&self, role: Role) -> Result<()> {
        let session = self.shared.snapshot();
        if session.submission.is_running() {
            return Err(OnboardError::SubmissionInProgress);
        }

        if self.shared.cancel_autosave() {
            let epoch = self.shared.current_epoch();
            self.shared.autosave_now(epoch).await;
        }

        let epoch = self.shared.next_epoch();
        let switching = session.active_role() != Some(role);
        if switching {
            self.department_suggest.on_query_change("");
            self.location_suggest.on_query_change("");
        }

        self.shared.session.send_modify(|session| {
            session.role = RoleState::Resolved(role);
            session.show_invalid_role_error = false;
            if switching {
                session.reset_forms();
            }
            session.current_step = role.initial_step();
            session.draft_status = DraftStatus::Idle;
        });
        self.shared.signal.write(role);
        info!("Role changed to {role}");

        self.shared.load_draft(role, epoch).await;
        Ok(())
    }

    /// Parses `value` and switches to that role.
    ///
    /// # Errors
    ///
    /// Returns `OnboardError::InvalidRole` for an unknown role, leaving the
    /// session untouched.
    pub async fn change_role_str(&self, value: &str) -> Result<()> {
        let role = value.parse::<Role>()?;
        self.change_role(role).await
    }
}
