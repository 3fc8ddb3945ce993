//! The orchestrator's owned session state.

use serde::{Deserialize, Serialize};

use super::{DraftStatus, Role, RoleState, Stage1Data, Stage2Data, Submission};
use crate::validation;

/// Wizard step. Stage 1 is only reachable for [`Role::Admin`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Stage1,
    Stage2,
}

impl WizardStep {
    /// 1-based step number as shown by the step indicator.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Stage1 => 1,
            WizardStep::Stage2 => 2,
        }
    }
}

/// State of one wizard session.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardSession {
    pub role: RoleState,
    /// Set when the inbound role signal was invalid; cleared only by an
    /// explicit valid role selection.
    pub show_invalid_role_error: bool,
    pub current_step: WizardStep,
    pub stage1: Stage1Data,
    pub stage2: Stage2Data,
    pub submission: Submission,
    pub draft_status: DraftStatus,
}

impl WizardSession {
    /// Fresh session for a resolved role signal.
    pub fn new(role: RoleState) -> Self {
        let show_invalid_role_error = role.is_unresolved();
        let current_step = initial_step_for(&role);
        Self {
            role,
            show_invalid_role_error,
            current_step,
            stage1: Stage1Data::default(),
            stage2: Stage2Data::default(),
            submission: Submission::default(),
            draft_status: DraftStatus::Idle,
        }
    }

    pub fn active_role(&self) -> Option<Role> {
        self.role.role()
    }

    /// Forms are rendered only when the role resolved.
    pub fn should_render_forms(&self) -> bool {
        !self.role.is_unresolved()
    }

    pub fn is_stage1_valid(&self) -> bool {
        let stage1 = &self.stage1;
        validation::is_stage1_valid(
            stage1.full_name.as_deref().unwrap_or_default(),
            stage1.email.as_deref().unwrap_or_default(),
            stage1.department.as_deref().unwrap_or_default(),
            stage1.job_role.map(|r| r.as_str()).unwrap_or_default(),
        )
    }

    pub fn is_stage2_valid(&self) -> bool {
        let stage2 = &self.stage2;
        validation::is_stage2_valid(
            stage2.photo.as_deref(),
            stage2.employment_type.map(|t| t.as_str()),
            stage2.office_location.as_deref(),
            stage2.notes.as_deref(),
        )
    }

    /// Whether the "Back" control applies.
    pub fn can_go_back(&self) -> bool {
        self.current_step == WizardStep::Stage2 && self.active_role() == Some(Role::Admin)
    }

    /// Clears stage data and returns to the role's initial step.
    pub(crate) fn reset_forms(&mut self) {
        self.stage1 = Stage1Data::default();
        self.stage2 = Stage2Data::default();
        self.draft_status = DraftStatus::Idle;
        self.current_step = initial_step_for(&self.role);
    }
}

/// Initial step for a role state. Unresolved sessions show no forms and are
/// parked on stage 2 so stage 1 stays admin-only.
pub(crate) fn initial_step_for(role: &RoleState) -> WizardStep {
    match role {
        RoleState::Resolved(role) => role.initial_step(),
        RoleState::Unresolved { .. } => WizardStep::Stage2,
    }
}
