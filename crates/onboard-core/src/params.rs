//! Parameter structures for wizard operations
//!
//! Plain structures shared by every interface driving the wizard. They carry
//! no framework derives; the CLI converts its clap arguments into these with
//! `From` implementations.
//!
//! Patches follow a "set what is present" rule: `None` leaves a field
//! untouched, `Some("")` (or whitespace) clears it.

use crate::{
    error::Result,
    models::{stage::non_blank, EmploymentType, JobRole, Stage1Data, Stage2Data},
};

/// Partial update of the stage 1 form.
#[derive(Debug, Clone, Default)]
pub struct Stage1Patch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    /// Parsed case-insensitively into a [`JobRole`].
    pub job_role: Option<String>,
}

impl Stage1Patch {
    /// Whether the patch touches an input of the employee ID derivation.
    pub fn touches_identity(&self) -> bool {
        self.department.is_some() || self.job_role.is_some()
    }

    /// Applies the patch to `data`. Nothing is modified if the job role
    /// cannot be parsed.
    ///
    /// # Errors
    ///
    /// Returns `OnboardError::InvalidInput` for an unknown job role.
    pub fn apply_to(&self, data: &mut Stage1Data) -> Result<()> {
        let job_role = match self.job_role.as_deref().map(str::trim) {
            None => data.job_role,
            Some("") => None,
            Some(value) => Some(value.parse::<JobRole>()?),
        };

        if let Some(full_name) = &self.full_name {
            data.full_name = non_blank(full_name);
        }
        if let Some(email) = &self.email {
            data.email = non_blank(email);
        }
        if let Some(department) = &self.department {
            data.department = non_blank(department);
        }
        data.job_role = job_role;
        Ok(())
    }
}

/// Partial update of the stage 2 form.
#[derive(Debug, Clone, Default)]
pub struct Stage2Patch {
    /// Base64 encoded image.
    pub photo: Option<String>,
    /// Parsed case-insensitively into an [`EmploymentType`].
    pub employment_type: Option<String>,
    pub office_location: Option<String>,
    pub notes: Option<String>,
}

impl Stage2Patch {
    /// Applies the patch to `data`. Nothing is modified if the employment
    /// type cannot be parsed.
    ///
    /// # Errors
    ///
    /// Returns `OnboardError::InvalidInput` for an unknown employment type.
    pub fn apply_to(&self, data: &mut Stage2Data) -> Result<()> {
        let employment_type = match self.employment_type.as_deref().map(str::trim) {
            None => data.employment_type,
            Some("") => None,
            Some(value) => Some(value.parse::<EmploymentType>()?),
        };

        if let Some(photo) = &self.photo {
            data.photo = non_blank(photo);
        }
        if let Some(office_location) = &self.office_location {
            data.office_location = non_blank(office_location);
        }
        if let Some(notes) = &self.notes {
            data.notes = non_blank(notes);
        }
        data.employment_type = employment_type;
        Ok(())
    }
}

/// Parameters for clearing the current role's draft.
#[derive(Debug, Clone, Default)]
pub struct ClearDraft {
    /// Must be `true`; clearing discards unsaved form data.
    pub confirmed: bool,
}

/// Parameters for listing employees.
#[derive(Debug, Clone)]
pub struct ListEmployees {
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
}

impl Default for ListEmployees {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}
