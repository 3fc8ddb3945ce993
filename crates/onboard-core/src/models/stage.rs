//! Stage 1 and stage 2 form data.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::OnboardError;

/// Position the employee is hired into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum JobRole {
    Ops,
    Admin,
    Engineer,
    Finance,
}

impl JobRole {
    pub const ALL: [JobRole; 4] = [
        JobRole::Ops,
        JobRole::Admin,
        JobRole::Engineer,
        JobRole::Finance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobRole::Ops => "Ops",
            JobRole::Admin => "Admin",
            JobRole::Engineer => "Engineer",
            JobRole::Finance => "Finance",
        }
    }
}

impl FromStr for JobRole {
    type Err = OnboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobRole::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                OnboardError::invalid_input("jobRole")
                    .with_reason(format!("Unknown job role: {s}"))
            })
    }
}

impl fmt::Display for JobRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract type of the employee.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EmploymentType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Intern,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 4] = [
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Contract,
        EmploymentType::Intern,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Intern => "Intern",
        }
    }
}

impl FromStr for EmploymentType {
    type Err = OnboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['_', ' '], "-");
        EmploymentType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| {
                OnboardError::invalid_input("employmentType")
                    .with_reason(format!("Unknown employment type: {s}"))
            })
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Basic identity information collected in stage 1.
///
/// Every field is optional while the form is being filled in. Blank input
/// is stored as `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stage1Data {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_role: Option<JobRole>,
    /// Derived from department and job role, never typed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

impl Stage1Data {
    /// True when no field has been filled in.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.department.is_none()
            && self.job_role.is_none()
            && self.employee_id.is_none()
    }

    /// Both inputs of the employee ID derivation are present.
    pub fn can_derive_employee_id(&self) -> bool {
        self.department.is_some() && self.job_role.is_some()
    }

    /// Merges a loaded snapshot into `self`: loaded values only fill fields
    /// that are currently empty.
    pub fn merged_with(&self, loaded: &Stage1Data) -> Stage1Data {
        Stage1Data {
            full_name: self.full_name.clone().or_else(|| loaded.full_name.clone()),
            email: self.email.clone().or_else(|| loaded.email.clone()),
            department: self.department.clone().or_else(|| loaded.department.clone()),
            job_role: self.job_role.or(loaded.job_role),
            employee_id: self
                .employee_id
                .clone()
                .or_else(|| loaded.employee_id.clone()),
        }
    }
}

/// Employment details collected in stage 2.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stage2Data {
    /// Base64 encoded image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<EmploymentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Stage2Data {
    pub fn is_empty(&self) -> bool {
        self.photo.is_none()
            && self.employment_type.is_none()
            && self.office_location.is_none()
            && self.notes.is_none()
    }

    /// Same precedence as [`Stage1Data::merged_with`].
    pub fn merged_with(&self, loaded: &Stage2Data) -> Stage2Data {
        Stage2Data {
            photo: self.photo.clone().or_else(|| loaded.photo.clone()),
            employment_type: self.employment_type.or(loaded.employment_type),
            office_location: self
                .office_location
                .clone()
                .or_else(|| loaded.office_location.clone()),
            notes: self.notes.clone().or_else(|| loaded.notes.clone()),
        }
    }
}

/// Normalizes free-text input: blank strings become `None`.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
