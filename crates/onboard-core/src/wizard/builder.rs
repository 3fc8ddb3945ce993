//! Builder for creating and configuring Wizard instances.

use std::sync::{atomic::AtomicU64, Arc, Mutex};

use log::{info, warn};
use tokio::sync::watch;

use super::{QueryRoleSignal, RoleSignal, Shared, Wizard, WizardConfig};
use crate::{
    api::{Stage1Api, Stage2Api},
    error::{OnboardError, Result},
    models::{RoleState, WizardSession},
    store::{DraftStore, KeyValueStore, MemoryStore},
    submitter::TwoPhaseSubmitter,
    suggest::{DebouncedSuggest, DepartmentSource, LocationSource},
};

/// Builder for creating and configuring Wizard instances.
#[derive(Default)]
pub struct WizardBuilder {
    stage1_api: Option<Arc<dyn Stage1Api>>,
    stage2_api: Option<Arc<dyn Stage2Api>>,
    store: Option<Arc<dyn KeyValueStore>>,
    signal: Option<Arc<dyn RoleSignal>>,
    config: WizardConfig,
}

impl WizardBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses one backend for both stages.
    pub fn with_backend<B>(self, backend: Arc<B>) -> Self
    where
        B: Stage1Api + Stage2Api + 'static,
    {
        self.with_stage1_api(backend.clone())
            .with_stage2_api(backend)
    }

    pub fn with_stage1_api(mut self, api: Arc<dyn Stage1Api>) -> Self {
        self.stage1_api = Some(api);
        self
    }

    pub fn with_stage2_api(mut self, api: Arc<dyn Stage2Api>) -> Self {
        self.stage2_api = Some(api);
        self
    }

    /// Sets the draft storage. Defaults to an in-memory store.
    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the inbound role signal. Defaults to an empty query string,
    /// which resolves to admin.
    pub fn with_role_signal(mut self, signal: Arc<dyn RoleSignal>) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn with_config(mut self, config: WizardConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the wizard: resolves the role signal, then loads and merges
    /// the role's draft if the role is valid.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `OnboardError::Configuration` if either stage API is missing.
    pub async fn build(self) -> Result<Wizard> {
        let stage1_api = self.stage1_api.ok_or_else(|| OnboardError::Configuration {
            message: "No stage 1 backend configured".to_string(),
        })?;
        let stage2_api = self.stage2_api.ok_or_else(|| OnboardError::Configuration {
            message: "No stage 2 backend configured".to_string(),
        })?;
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let signal = self
            .signal
            .unwrap_or_else(|| Arc::new(QueryRoleSignal::default()));

        let role = RoleState::resolve(signal.read().as_deref());
        match &role {
            RoleState::Resolved(role) => info!("Wizard started for role {role}"),
            RoleState::Unresolved { value } => warn!("Ignoring invalid role {value:?}"),
        }

        let drafts = DraftStore::new(store);
        let submitter = TwoPhaseSubmitter::new(stage1_api.clone(), stage2_api.clone(), drafts.clone());
        let (session, _) = watch::channel(WizardSession::new(role.clone()));

        let debounce = self.config.suggest_debounce;
        let wizard = Wizard {
            shared: Arc::new(Shared {
                session,
                config: self.config,
                stage1_api: stage1_api.clone(),
                drafts,
                submitter,
                signal,
                autosave: Mutex::new(None),
                role_epoch: AtomicU64::new(0),
                identity_generation: AtomicU64::new(0),
            }),
            department_suggest: DebouncedSuggest::with_delay(
                Arc::new(DepartmentSource(stage1_api)),
                debounce,
            ),
            location_suggest: DebouncedSuggest::with_delay(
                Arc::new(LocationSource(stage2_api)),
                debounce,
            ),
        };

        if let Some(role) = role.role() {
            let epoch = wizard.shared.current_epoch();
            wizard.shared.load_draft(role, epoch).await;
        }

        Ok(wizard)
    }
}
