//! Core library for the employee onboarding wizard.
//!
//! The wizard collects employee data in two role-gated stages, keeps
//! in-progress drafts per role, and submits both stages in order to two
//! independent backends.
//!
//! # Architecture
//!
//! - [`wizard`]: the orchestrator owning the session state
//! - [`suggest`]: debounced autocomplete fields
//! - [`validation`]: pure predicates gating "Next" and "Submit"
//! - [`store`]: role-scoped draft persistence (memory or SQLite)
//! - [`submitter`]: the ordered stage 1 → stage 2 submission
//! - [`api`]: collaborator traits plus HTTP and in-memory backends
//! - [`listing`]: the merged employee list
//! - [`display`]: markdown formatting for terminal front ends
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use onboard_core::{
//!     api::MemoryBackend,
//!     params::{Stage1Patch, Stage2Patch},
//!     wizard::SubmitOutcome,
//!     WizardBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(MemoryBackend::new());
//! let wizard = WizardBuilder::new()
//!     .with_backend(backend.clone())
//!     .build()
//!     .await?;
//!
//! wizard
//!     .edit_stage1(&Stage1Patch {
//!         full_name: Some("Jane Doe".to_string()),
//!         email: Some("jane@example.com".to_string()),
//!         department: Some("Engineering".to_string()),
//!         job_role: Some("Engineer".to_string()),
//!     })
//!     .await?;
//! wizard.next();
//!
//! wizard.edit_stage2(&Stage2Patch {
//!     photo: Some("aGVsbG8=".to_string()),
//!     employment_type: Some("Full-time".to_string()),
//!     office_location: Some("Berlin".to_string()),
//!     notes: Some("Starts Monday".to_string()),
//! })?;
//!
//! if let SubmitOutcome::Succeeded { redirect_after } = wizard.submit().await {
//!     println!("Done, leaving in {redirect_after:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod display;
pub mod employee_id;
pub mod error;
pub mod listing;
pub mod models;
pub mod params;
pub mod store;
pub mod submitter;
pub mod suggest;
pub mod validation;
pub mod wizard;

#[cfg(test)]
mod fakes;

// Re-export commonly used types
pub use api::{ApiConfig, HttpBackend, MemoryBackend, Stage1Api, Stage2Api};
pub use display::{DraftView, EmployeeTable, SessionView, SubmissionReport, Suggestions};
pub use error::{OnboardError, Result};
pub use listing::{list_employees, merge_employees};
pub use models::{
    Draft, DraftStatus, Employee, Page, Role, RoleState, Stage1Data, Stage2Data, Submission,
    SubmissionPhase, WizardSession, WizardStep,
};
pub use params::{ClearDraft, ListEmployees, Stage1Patch, Stage2Patch};
pub use store::{DraftStore, KeyValueStore, MemoryStore, SqliteStore};
pub use suggest::{DebouncedSuggest, SuggestState};
pub use wizard::{Wizard, WizardBuilder, WizardConfig};
