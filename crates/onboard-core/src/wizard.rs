//! The onboarding wizard orchestrator.
//!
//! [`Wizard`] owns one [`WizardSession`] and is the only place it is
//! mutated. Every change the presentation layer can cause is an explicit
//! operation; the side effects a change implies (autosave, employee ID
//! derivation, draft loading) are triggered by those operations rather
//! than by observing state.
//!
//! ```text
//! ┌──────────────┐   edits    ┌──────────────┐  debounce  ┌──────────────┐
//! │ Presentation │──────────▶│    Wizard    │──────────▶│  DraftStore  │
//! │ (CLI, UI...) │◀──────────│  (session)   │            └──────────────┘
//! └──────────────┘  watch rx  └──────┬───────┘
//!                                    │ submit        ┌──────────────┐
//!                                    └─────────────▶│  Submitter   │──▶ stage 1, stage 2
//!                                                    └──────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: creates a [`Wizard`], resolving the role and loading its draft
//! - [`role_ops`]: role changes
//! - [`field_ops`]: form edits, suggestions and step navigation
//! - [`draft_ops`]: autosave, flush and clear
//! - [`submit_ops`]: two-phase submission
//! - [`signal`]: the inbound role signal
//!
//! # Concurrency
//!
//! Session state lives in a `tokio::sync::watch` channel. Timers (autosave)
//! and lookups (employee ID count) run as tokio tasks; results from tasks
//! that were superseded are discarded by comparing generation counters:
//!
//! - the *role epoch* changes on every role change and draft clear; draft
//!   loads and autosaves started under an older epoch are dropped
//! - the *identity generation* changes on every department/job role edit;
//!   only the newest employee ID derivation is applied
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use onboard_core::{
//!     api::MemoryBackend,
//!     models::{Role, WizardStep},
//!     params::Stage1Patch,
//!     wizard::{QueryRoleSignal, WizardBuilder},
//! };
//!
//! # async fn example() -> onboard_core::Result<()> {
//! let wizard = WizardBuilder::new()
//!     .with_backend(Arc::new(MemoryBackend::new()))
//!     .with_role_signal(Arc::new(QueryRoleSignal::new("role=admin")))
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
//!
//! assert!(wizard.next());
//! assert_eq!(wizard.session().current_step, WizardStep::Stage2);
//! assert_eq!(wizard.session().active_role(), Some(Role::Admin));
//! # Ok(())
//! # }
//! ```

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, PoisonError,
    },
    time::Duration,
};

use tokio::{sync::watch, task::JoinHandle};

use crate::{
    api::Stage1Api,
    models::WizardSession,
    store::DraftStore,
    submitter::TwoPhaseSubmitter,
    suggest::{DebouncedSuggest, DEFAULT_DEBOUNCE},
};

pub mod builder;
pub mod draft_ops;
pub mod field_ops;
pub mod role_ops;
pub mod signal;
pub mod submit_ops;


pub use builder::WizardBuilder;
pub use signal::{QueryRoleSignal, RoleSignal};
pub use submit_ops::{NotStartedReason, SubmitOutcome};

/// Timing and paging knobs of the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    /// Debounce window of the suggest fields.
    pub suggest_debounce: Duration,
    /// Inactivity delay before a draft is saved.
    pub autosave_delay: Duration,
    /// How long the caller should wait before leaving after a successful
    /// submission.
    pub redirect_delay: Duration,
    /// Page size used when counting existing records.
    pub page_limit: u32,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            suggest_debounce: DEFAULT_DEBOUNCE,
            autosave_delay: Duration::from_secs(2),
            redirect_delay: Duration::from_millis(1500),
            page_limit: 10,
        }
    }
}

/// State shared between the wizard handle and its background tasks.
pub(crate) struct Shared {
    pub(crate) session: watch::Sender<WizardSession>,
    pub(crate) config: WizardConfig,
    pub(crate) stage1_api: Arc<dyn Stage1Api>,
    pub(crate) drafts: DraftStore,
    pub(crate) submitter: TwoPhaseSubmitter,
    pub(crate) signal: Arc<dyn RoleSignal>,
    pub(crate) autosave: Mutex<Option<JoinHandle<()>>>,
    pub(crate) role_epoch: AtomicU64,
    pub(crate) identity_generation: AtomicU64,
}

impl Shared {
    pub(crate) fn snapshot(&self) -> WizardSession {
        self.session.borrow().clone()
    }

    pub(crate) fn current_epoch(&self) -> u64 {
        self.role_epoch.load(Ordering::SeqCst)
    }

    /// Starts a new role epoch, invalidating pending loads and saves.
    pub(crate) fn next_epoch(&self) -> u64 {
        self.role_epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Takes the pending autosave timer, if any, aborting it.
    pub(crate) fn cancel_autosave(&self) -> bool {
        let mut autosave = self.autosave.lock().unwrap_or_else(PoisonError::into_inner);
        match autosave.take() {
            Some(handle) => {
                let pending = !handle.is_finished();
                handle.abort();
                pending
            }
            None => false,
        }
    }
}

/// One wizard session with its two suggest fields.
pub struct Wizard {
    pub(crate) shared: Arc<Shared>,
    pub(crate) department_suggest: DebouncedSuggest,
    pub(crate) location_suggest: DebouncedSuggest,
}

impl Wizard {
    /// Snapshot of the session.
    pub fn session(&self) -> WizardSession {
        self.shared.snapshot()
    }

    /// Receiver notified on every session change.
    pub fn subscribe(&self) -> watch::Receiver<WizardSession> {
        self.shared.session.subscribe()
    }

    /// Autocomplete state of the department field.
    pub fn department_suggest(&self) -> &DebouncedSuggest {
        &self.department_suggest
    }

    /// Autocomplete state of the office location field.
    pub fn location_suggest(&self) -> &DebouncedSuggest {
        &self.location_suggest
    }

    pub fn is_stage1_valid(&self) -> bool {
        self.shared.session.borrow().is_stage1_valid()
    }

    pub fn is_stage2_valid(&self) -> bool {
        self.shared.session.borrow().is_stage2_valid()
    }
}

impl Drop for Wizard {
    fn drop(&mut self) {
        self.shared.cancel_autosave();
    }
}
