//! Display wrapper types for the CLI and other text front ends.
//!
//! Domain models stay free of presentation concerns; these wrappers format
//! them as markdown for rich terminal rendering.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Session, Page  │───▶│ Display Wrapper │───▶│    Markdown     │
//! │   Submission    │    │     Types       │    │    (terminal)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`SessionView`]: role, step, draft status and both forms
//! - [`SubmissionReport`]: progress bar and submission log
//! - [`EmployeeTable`]: one page of the employee listing
//! - [`DraftView`]: a stored draft
//! - [`Suggestions`]: autocomplete options
//!
//! # Examples
//!
//! ```rust
//! use onboard_core::{
//!     display::SubmissionReport,
//!     models::{Submission, SubmissionPhase},
//! };
//!
//! let submission = Submission {
//!     phase: SubmissionPhase::Phase2Running,
//!     progress: 75,
//!     log: vec!["Submitting stage 2...".to_string()],
//! };
//! let output = SubmissionReport(&submission).to_string();
//! assert!(output.contains("75%"));
//! ```

pub mod datetime;
pub mod drafts;
pub mod employees;
pub mod session;
pub mod submission;

pub use datetime::LocalTime;
pub use drafts::DraftView;
pub use employees::{EmployeeTable, Suggestions};
pub use session::SessionView;
pub use submission::SubmissionReport;
