//! Data models for the onboarding wizard.
//!
//! Stage data, drafts, submission progress and the session that owns them,
//! plus the records exchanged with the stage 1 and stage 2 backends.
//!
//! ```rust
//! use onboard_core::models::{Role, RoleState, WizardSession, WizardStep};
//!
//! let session = WizardSession::new(RoleState::resolve(Some("ops")));
//! assert_eq!(session.active_role(), Some(Role::Ops));
//! assert_eq!(session.current_step, WizardStep::Stage2);
//!
//! let invalid = WizardSession::new(RoleState::resolve(Some("root")));
//! assert!(invalid.show_invalid_role_error);
//! assert!(!invalid.should_render_forms());
//! ```

pub mod draft;
pub mod employee;
pub mod page;
pub mod role;
pub mod session;
pub mod stage;
pub mod submission;

#[cfg(test)]
mod tests;

pub use draft::{merge_draft, Draft};
pub use employee::{Employee, RecordId, Stage1Record, Stage2Record, SuggestOption};
pub use page::Page;
pub use role::{Role, RoleState};
pub use session::{WizardSession, WizardStep};
pub use stage::{EmploymentType, JobRole, Stage1Data, Stage2Data};
pub use submission::{DraftStatus, Submission, SubmissionPhase};
