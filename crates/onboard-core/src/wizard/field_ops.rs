//! Form edits, suggestion wiring and step navigation.

use std::sync::atomic::Ordering;

use log::{debug, warn};

use super::{Shared, Wizard};
use crate::{
    api::count_department_records,
    employee_id::generate_employee_id,
    error::Result,
    models::{SuggestOption, WizardStep},
    params::{Stage1Patch, Stage2Patch},
};

impl Shared {
    /// Invalidates any employee ID derivation in flight.
    pub(crate) fn next_identity_generation(&self) -> u64 {
        self.identity_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current_identity(&self, generation: u64, epoch: u64) -> bool {
        self.identity_generation.load(Ordering::SeqCst) == generation
            && self.current_epoch() == epoch
    }
}

impl Wizard {
    /// Applies a partial update to the stage 1 form.
    ///
    /// Ignored while the role is unresolved and for ops, which has no
    /// stage 1. When the patch touches the department or job role and both
    /// are set afterwards, the employee ID is re-derived from the number of
    /// records already in the department; if one of them is unset the ID is
    /// cleared. A failing count lookup is logged and leaves the previous ID
    /// in place.
    ///
    /// # Errors
    ///
    /// Returns `OnboardError::InvalidInput` for an unknown job role; the
    /// form is left unchanged.
    pub async fn edit_stage1(&self, patch: &Stage1Patch) -> Result<()> {
        let Some(role) = self.shared.session.borrow().active_role() else {
            debug!("Ignoring stage 1 edit: no role");
            return Ok(());
        };
        if !role.sees_stage1() {
            debug!("Ignoring stage 1 edit for {role}");
            return Ok(());
        }

        let mut outcome = Ok(());
        let changed = self.shared.session.send_if_modified(|session| {
            let before = session.stage1.clone();
            if let Err(e) = patch.apply_to(&mut session.stage1) {
                outcome = Err(e);
                return false;
            }
            session.stage1 != before
        });
        outcome?;

        if !changed {
            return Ok(());
        }
        self.shared.arm_autosave();

        if patch.touches_identity() {
            self.derive_employee_id().await;
        }
        Ok(())
    }

    /// Applies a partial update to the stage 2 form.
    ///
    /// # Errors
    ///
    /// Returns `OnboardError::InvalidInput` for an unknown employment type;
    /// the form is left unchanged.
    pub fn edit_stage2(&self, patch: &Stage2Patch) -> Result<()> {
        if self.shared.session.borrow().active_role().is_none() {
            debug!("Ignoring stage 2 edit: no role");
            return Ok(());
        }

        let mut outcome = Ok(());
        let changed = self.shared.session.send_if_modified(|session| {
            let before = session.stage2.clone();
            if let Err(e) = patch.apply_to(&mut session.stage2) {
                outcome = Err(e);
                return false;
            }
            session.stage2 != before
        });
        outcome?;

        if changed {
            self.shared.arm_autosave();
        }
        Ok(())
    }

    /// Feeds typed text to the department autocomplete. The form value is
    /// only committed by [`Wizard::select_department`].
    pub fn search_departments(&self, text: &str) {
        self.department_suggest.on_query_change(text);
    }

    /// Feeds typed text to the office location autocomplete.
    pub fn search_locations(&self, text: &str) {
        self.location_suggest.on_query_change(text);
    }

    /// Accepts a department suggestion and commits it to the form.
    pub async fn select_department(&self, option: &SuggestOption) -> Result<()> {
        let accepted = self.department_suggest.select(option);
        self.edit_stage1(&Stage1Patch {
            department: Some(accepted.label),
            ..Default::default()
        })
        .await
    }

    /// Accepts an office location suggestion and commits it to the form.
    pub fn select_location(&self, option: &SuggestOption) -> Result<()> {
        let accepted = self.location_suggest.select(option);
        self.edit_stage2(&Stage2Patch {
            office_location: Some(accepted.label),
            ..Default::default()
        })
    }

    /// Advances from stage 1 to stage 2. Returns whether the step changed;
    /// an invalid stage 1 is a silent no-op.
    pub fn next(&self) -> bool {
        self.shared.session.send_if_modified(|session| {
            if session.current_step != WizardStep::Stage1
                || !session.should_render_forms()
                || !session.is_stage1_valid()
            {
                return false;
            }
            session.current_step = WizardStep::Stage2;
            true
        })
    }

    /// Returns from stage 2 to stage 1. Only admin has a stage 1 to go back
    /// to; for anyone else this is a no-op.
    pub fn back(&self) -> bool {
        self.shared.session.send_if_modified(|session| {
            if !session.can_go_back() {
                return false;
            }
            session.current_step = WizardStep::Stage1;
            true
        })
    }

    /// Drops an ID derived from inputs that are no longer complete.
    fn clear_employee_id(&self) {
        let cleared = self.shared.session.send_if_modified(|session| {
            session.stage1.employee_id.take().is_some()
        });
        if cleared {
            debug!("Cleared employee ID");
            self.shared.arm_autosave();
        }
    }

    async fn derive_employee_id(&self) {
        let shared = &self.shared;
        let generation = shared.next_identity_generation();
        let epoch = shared.current_epoch();

        let department = {
            let session = shared.session.borrow();
            if session.stage1.can_derive_employee_id() {
                session.stage1.department.clone()
            } else {
                None
            }
        };
        let Some(department) = department else {
            self.clear_employee_id();
            return;
        };

        let count = match count_department_records(
            shared.stage1_api.as_ref(),
            &department,
            shared.config.page_limit,
        )
        .await
        {
            Ok(count) => count,
            Err(e) => {
                warn!("Failed to count records in department {department:?}: {e}");
                return;
            }
        };

        let employee_id = generate_employee_id(&department, count);
        let applied = shared.session.send_if_modified(|session| {
            if !shared.is_current_identity(generation, epoch)
                || session.stage1.department.as_deref() != Some(department.as_str())
                || session.stage1.employee_id.as_deref() == Some(employee_id.as_str())
            {
                return false;
            }
            session.stage1.employee_id = Some(employee_id.clone());
            true
        });

        if applied {
            debug!("Derived employee ID {employee_id}");
            shared.arm_autosave();
        } else {
            debug!("Discarded employee ID {employee_id} for {department:?}");
        }
    }
}
