//! Command-line argument wrappers.
//!
//! Each wrapper carries the clap attributes for one command and converts
//! into the plain parameter structures of `onboard_core::params`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Wizard
//! ```

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{Args, Subcommand, ValueEnum};
use onboard_core::{
    models::Role,
    params::{ClearDraft, ListEmployees, Stage1Patch, Stage2Patch},
};

/// Fill in the wizard forms
///
/// Loads the role's draft, applies the given fields and either saves the
/// result as the new draft or, with `--submit`, submits both stages.
/// Stage 1 fields are ignored for the ops role.
#[derive(Args)]
pub struct WizardArgs {
    /// Role to act as (admin or ops); defaults to admin
    #[arg(short, long)]
    pub role: Option<String>,
    #[arg(long, help = "Employee full name (stage 1)")]
    pub full_name: Option<String>,
    #[arg(long, help = "Employee email address (stage 1)")]
    pub email: Option<String>,
    #[arg(long, help = "Department, e.g. Engineering (stage 1)")]
    pub department: Option<String>,
    #[arg(long, help = "Job role: ops, admin, engineer or finance (stage 1)")]
    pub job_role: Option<String>,
    #[arg(long, help = "Path to the employee photo (stage 2)")]
    pub photo: Option<PathBuf>,
    #[arg(
        long,
        help = "Employment type: full-time, part-time, contract or intern (stage 2)"
    )]
    pub employment_type: Option<String>,
    #[arg(long, help = "Office location (stage 2)")]
    pub office_location: Option<String>,
    #[arg(long, help = "Free-form notes (stage 2)")]
    pub notes: Option<String>,
    /// Submit both stages after applying the fields
    #[arg(long)]
    pub submit: bool,
    #[arg(long, help = "Artificial delay before each submit call, in milliseconds")]
    pub submit_delay_ms: Option<u64>,
}

impl From<&WizardArgs> for Stage1Patch {
    fn from(val: &WizardArgs) -> Self {
        Stage1Patch {
            full_name: val.full_name.clone(),
            email: val.email.clone(),
            department: val.department.clone(),
            job_role: val.job_role.clone(),
        }
    }
}

impl WizardArgs {
    /// Stage 2 patch with the photo file read and base64 encoded.
    pub fn stage2_patch(&self) -> Result<Stage2Patch> {
        let photo = match &self.photo {
            Some(path) => {
                let bytes = fs::read(path)
                    .with_context(|| format!("Failed to read photo {}", path.display()))?;
                Some(STANDARD.encode(bytes))
            }
            None => None,
        };

        Ok(Stage2Patch {
            photo,
            employment_type: self.employment_type.clone(),
            office_location: self.office_location.clone(),
            notes: self.notes.clone(),
        })
    }
}

/// Command-line representation of the wizard roles.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    /// Admin: basic information and employment details
    Admin,
    /// Ops: employment details only
    Ops,
}

impl From<RoleArg> for Role {
    fn from(val: RoleArg) -> Self {
        match val {
            RoleArg::Admin => Role::Admin,
            RoleArg::Ops => Role::Ops,
        }
    }
}

/// Show the draft saved for a role
#[derive(Args)]
pub struct ShowDraftArgs {
    #[arg(short, long, value_enum, default_value = "admin")]
    pub role: RoleArg,
}

/// Discard the draft saved for a role
#[derive(Args)]
pub struct ClearDraftArgs {
    #[arg(short, long, value_enum, default_value = "admin")]
    pub role: RoleArg,
    /// Confirm discarding the draft (required)
    #[arg(long)]
    pub confirm: bool,
}

impl From<&ClearDraftArgs> for ClearDraft {
    fn from(val: &ClearDraftArgs) -> Self {
        ClearDraft {
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum DraftCommands {
    /// Show the draft saved for a role
    #[command(alias = "s")]
    Show(ShowDraftArgs),
    /// Discard the draft saved for a role
    #[command(aliases = ["c", "rm"])]
    Clear(ClearDraftArgs),
}

/// List submitted employees
///
/// Joins both backends: employees submitted by ops have no basic
/// information and are shown with placeholders.
#[derive(Args)]
pub struct EmployeesArgs {
    #[arg(short, long, default_value_t = 1, help = "1-based page number")]
    pub page: u32,
    #[arg(short, long, default_value_t = 10, help = "Employees per page")]
    pub limit: u32,
}

impl From<EmployeesArgs> for ListEmployees {
    fn from(val: EmployeesArgs) -> Self {
        ListEmployees {
            page: val.page.max(1),
            limit: val.limit.max(1),
        }
    }
}

#[derive(Args)]
pub struct SuggestArgs {
    #[arg(help = "Text to match, case-insensitive")]
    pub query: String,
}

#[derive(Subcommand)]
pub enum SuggestCommands {
    /// Departments known to the stage 1 backend
    #[command(alias = "d")]
    Departments(SuggestArgs),
    /// Office locations known to the stage 2 backend
    #[command(alias = "l")]
    Locations(SuggestArgs),
}
