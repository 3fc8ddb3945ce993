//! Markdown view of a wizard session.

use std::fmt;

use super::{datetime::LocalTime, SubmissionReport};
use crate::models::{
    DraftStatus, RoleState, Stage1Data, Stage2Data, SubmissionPhase, WizardSession, WizardStep,
};

const NOT_SET: &str = "_not set_";

/// Title of a wizard step.
pub fn step_title(step: WizardStep) -> &'static str {
    match step {
        WizardStep::Stage1 => "Basic information",
        WizardStep::Stage2 => "Employment details",
    }
}

/// Formats the whole session: header, forms and, once started, the
/// submission report.
///
/// # Examples
///
/// ```rust
/// use onboard_core::{
///     display::SessionView,
///     models::{RoleState, WizardSession},
/// };
///
/// let session = WizardSession::new(RoleState::resolve(Some("intern")));
/// let output = SessionView(&session).to_string();
/// assert!(output.contains("Invalid role"));
/// assert!(!output.contains("## Employment details"));
/// ```
pub struct SessionView<'a>(pub &'a WizardSession);

impl fmt::Display for SessionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;
        writeln!(f, "# Employee onboarding")?;
        writeln!(f)?;

        let role = match &session.role {
            RoleState::Resolved(role) => role,
            RoleState::Unresolved { value } => {
                writeln!(
                    f,
                    "> **Invalid role** `{value}`: choose `admin` or `ops` to continue."
                )?;
                return Ok(());
            }
        };

        writeln!(f, "- **Role**: {}", role.label())?;
        writeln!(
            f,
            "- **Step**: {}. {}",
            session.current_step.number(),
            step_title(session.current_step)
        )?;
        writeln!(f, "- **Draft**: {}", DraftStatusLabel(&session.draft_status))?;
        writeln!(f)?;

        if role.sees_stage1() {
            writeln!(f, "## {}", step_title(WizardStep::Stage1))?;
            writeln!(f)?;
            write_stage1(f, &session.stage1)?;
            writeln!(f)?;
        }

        writeln!(f, "## {}", step_title(WizardStep::Stage2))?;
        writeln!(f)?;
        write_stage2(f, &session.stage2)?;

        if session.submission.phase != SubmissionPhase::Idle {
            writeln!(f)?;
            write!(f, "{}", SubmissionReport(&session.submission))?;
        }
        Ok(())
    }
}

struct DraftStatusLabel<'a>(&'a DraftStatus);

impl fmt::Display for DraftStatusLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            DraftStatus::Idle => write!(f, "not saved"),
            DraftStatus::Saving => write!(f, "saving..."),
            DraftStatus::SavedAt(at) => write!(f, "saved at {}", LocalTime(at)),
        }
    }
}

fn field(f: &mut fmt::Formatter<'_>, label: &str, value: Option<&str>) -> fmt::Result {
    writeln!(f, "- **{label}**: {}", value.unwrap_or(NOT_SET))
}

pub(crate) fn write_stage1(f: &mut fmt::Formatter<'_>, data: &Stage1Data) -> fmt::Result {
    field(f, "Full name", data.full_name.as_deref())?;
    field(f, "Email", data.email.as_deref())?;
    field(f, "Department", data.department.as_deref())?;
    field(f, "Job role", data.job_role.map(|r| r.as_str()))?;
    field(f, "Employee ID", data.employee_id.as_deref())
}

pub(crate) fn write_stage2(f: &mut fmt::Formatter<'_>, data: &Stage2Data) -> fmt::Result {
    // Photos are base64 payloads; only their presence is shown.
    let photo = data
        .photo
        .as_ref()
        .map(|photo| format!("attached ({} bytes encoded)", photo.len()));
    field(f, "Photo", photo.as_deref())?;
    field(f, "Employment type", data.employment_type.map(|t| t.as_str()))?;
    field(f, "Office location", data.office_location.as_deref())?;
    field(f, "Notes", data.notes.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobRole, Submission};

    #[test]
    fn test_admin_session_shows_both_forms() {
        let mut session = WizardSession::new(RoleState::resolve(None));
        session.stage1.full_name = Some("Jane Doe".to_string());
        session.stage1.job_role = Some(JobRole::Engineer);

        let output = SessionView(&session).to_string();

        assert!(output.contains("- **Role**: Admin"));
        assert!(output.contains("- **Step**: 1. Basic information"));
        assert!(output.contains("- **Full name**: Jane Doe"));
        assert!(output.contains("- **Job role**: Engineer"));
        assert!(output.contains("- **Email**: _not set_"));
        assert!(output.contains("## Employment details"));
        assert!(output.contains("not saved"));
        assert!(!output.contains("## Submission"));
    }

    #[test]
    fn test_ops_session_hides_stage1() {
        let mut session = WizardSession::new(RoleState::resolve(Some("ops")));
        session.stage2.photo = Some("aGVsbG8=".to_string());
        session.submission = Submission {
            phase: SubmissionPhase::Phase2Running,
            progress: 75,
            log: vec!["Submitting stage 2...".to_string()],
        };

        let output = SessionView(&session).to_string();

        assert!(!output.contains("## Basic information"));
        assert!(output.contains("- **Step**: 2. Employment details"));
        assert!(output.contains("attached (8 bytes encoded)"));
        assert!(output.contains("## Submission"));
    }
}
