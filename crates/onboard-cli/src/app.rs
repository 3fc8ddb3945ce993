//! Command handlers.
//!
//! [`App`] owns the collaborators chosen by the global flags and runs one
//! command against them, printing through the [`TerminalRenderer`].

use std::{sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use log::{debug, info};
use onboard_core::{
    api::{ApiConfig, HttpBackend, MemoryBackend, Stage1Api, Stage2Api},
    display::{DraftView, EmployeeTable, SessionView, SubmissionReport, Suggestions},
    list_employees,
    models::{Role, RoleState},
    params::{ClearDraft, ListEmployees, Stage1Patch},
    store::{DraftStore, KeyValueStore, MemoryStore, SqliteStore},
    suggest::{filter_options, DepartmentSource, LocationSource, SuggestSource},
    wizard::{NotStartedReason, QueryRoleSignal, SubmitOutcome, Wizard, WizardBuilder},
};

use crate::{
    args::Args,
    cli::{
        ClearDraftArgs, DraftCommands, EmployeesArgs, ShowDraftArgs, SuggestCommands, WizardArgs,
    },
    renderer::TerminalRenderer,
};

/// Collaborators shared by every command.
pub struct App {
    stage1: Arc<dyn Stage1Api>,
    stage2: Arc<dyn Stage2Api>,
    store: Arc<dyn KeyValueStore>,
    renderer: TerminalRenderer,
}

impl App {
    /// Chooses the draft store and backends from the global flags.
    ///
    /// `--offline` swaps both HTTP backends for one in-memory backend;
    /// otherwise base URLs come from the environment, overridden by the
    /// `--stage1-api`/`--stage2-api` flags. `submit_delay` only applies to
    /// the HTTP backends.
    pub async fn from_args(args: &Args, submit_delay: Option<Duration>) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = if args.ephemeral {
            debug!("Keeping drafts in memory");
            Arc::new(MemoryStore::new())
        } else {
            let path = match &args.drafts_file {
                Some(path) => path.clone(),
                None => SqliteStore::default_path().context("Failed to locate drafts database")?,
            };
            let store = SqliteStore::open(&path)
                .await
                .with_context(|| format!("Failed to open drafts database {}", path.display()))?;
            debug!("Drafts database at {}", store.path().display());
            Arc::new(store)
        };

        let (stage1, stage2): (Arc<dyn Stage1Api>, Arc<dyn Stage2Api>) = if args.offline {
            let backend = Arc::new(MemoryBackend::new());
            (backend.clone(), backend)
        } else {
            let config = ApiConfig::from_env()
                .with_stage1_base_url(args.stage1_api.clone())
                .with_stage2_base_url(args.stage2_api.clone())
                .with_submit_delay(submit_delay);
            let backend = Arc::new(HttpBackend::new(config));
            (backend.clone(), backend)
        };

        Ok(Self {
            stage1,
            stage2,
            store,
            renderer: TerminalRenderer::new(!args.no_color),
        })
    }

    async fn wizard(&self, role: Option<&str>) -> Result<Wizard> {
        WizardBuilder::new()
            .with_stage1_api(self.stage1.clone())
            .with_stage2_api(self.stage2.clone())
            .with_store(self.store.clone())
            .with_role_signal(Arc::new(QueryRoleSignal::from_role_param(role)))
            .build()
            .await
            .context("Failed to initialize wizard")
    }

    /// Applies the given fields to the role's draft, then either saves the
    /// draft or submits it.
    pub async fn handle_wizard(&self, args: &WizardArgs) -> Result<()> {
        let wizard = self.wizard(args.role.as_deref()).await?;

        let session = wizard.session();
        if let RoleState::Unresolved { value } = &session.role {
            self.renderer.show(&SessionView(&session));
            bail!("Invalid role {value:?}");
        }

        wizard
            .edit_stage1(&Stage1Patch::from(args))
            .await
            .context("Failed to update basic information")?;
        wizard.next();
        wizard
            .edit_stage2(&args.stage2_patch()?)
            .context("Failed to update employment details")?;

        if !args.submit {
            wizard.flush_draft().await;
            self.renderer.show(&SessionView(&wizard.session()));
            return Ok(());
        }

        let outcome = wizard.submit().await;
        match outcome {
            SubmitOutcome::Succeeded { redirect_after } => {
                self.renderer.show(&SubmissionReport(&wizard.session().submission));
                info!("Showing employee list in {redirect_after:?}");
                tokio::time::sleep(redirect_after).await;
                self.list_employees(&ListEmployees::default()).await
            }
            SubmitOutcome::Failed { message } => {
                self.renderer.show(&SubmissionReport(&wizard.session().submission));
                bail!("Submission failed: {message}")
            }
            SubmitOutcome::NotStarted(reason) => {
                self.renderer.show(&SessionView(&wizard.session()));
                match reason {
                    NotStartedReason::IncompleteStage1 => {
                        bail!("Basic information is incomplete; nothing was submitted")
                    }
                    NotStartedReason::IncompleteStage2 => {
                        bail!("Employment details are incomplete; nothing was submitted")
                    }
                    NotStartedReason::AlreadyRunning => bail!("A submission is already running"),
                    NotStartedReason::RoleUnresolved => bail!("No valid role selected"),
                }
            }
        }
    }

    pub async fn handle_draft_command(&self, command: DraftCommands) -> Result<()> {
        match command {
            DraftCommands::Show(args) => {
                self.show_draft(&args).await;
                Ok(())
            }
            DraftCommands::Clear(args) => self.clear_draft(&args).await,
        }
    }

    async fn show_draft(&self, args: &ShowDraftArgs) {
        let role = Role::from(args.role);
        let draft = DraftStore::new(self.store.clone()).load(role).await;
        self.renderer.show(&DraftView::new(role, draft.as_ref()));
    }

    async fn clear_draft(&self, args: &ClearDraftArgs) -> Result<()> {
        let role = Role::from(args.role);
        let wizard = self.wizard(Some(role.as_str())).await?;
        wizard
            .clear_draft(&ClearDraft::from(args))
            .await
            .context("Draft was not cleared; pass --confirm to discard it")?;

        self.renderer
            .render(&format!("Draft discarded for **{}**.\n", role.label()));
        Ok(())
    }

    pub async fn list_employees(&self, params: &ListEmployees) -> Result<()> {
        let page = list_employees(self.stage1.as_ref(), self.stage2.as_ref(), params)
            .await
            .context("Failed to load employees")?;
        self.renderer.show(&EmployeeTable(&page));
        Ok(())
    }

    pub async fn handle_employees(&self, args: EmployeesArgs) -> Result<()> {
        self.list_employees(&args.into()).await
    }

    pub async fn handle_suggest_command(&self, command: SuggestCommands) -> Result<()> {
        let (source, query): (Box<dyn SuggestSource>, String) = match command {
            SuggestCommands::Departments(args) => {
                (Box::new(DepartmentSource(self.stage1.clone())), args.query)
            }
            SuggestCommands::Locations(args) => {
                (Box::new(LocationSource(self.stage2.clone())), args.query)
            }
        };

        let options = source
            .lookup(&query)
            .await
            .context("Failed to load suggestions")?;
        self.renderer.show(&Suggestions(&filter_options(&options, &query)));
        Ok(())
    }

    /// Shows the admin session as it would be restored from its draft.
    pub async fn show_session(&self) -> Result<()> {
        let wizard = self.wizard(None).await?;
        self.renderer.show(&SessionView(&wizard.session()));
        Ok(())
    }
}
