use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{DraftCommands, EmployeesArgs, SuggestCommands, WizardArgs};

/// Employee onboarding wizard
///
/// Drives the two-stage onboarding wizard from the command line: fill in
/// the forms for a role, keep drafts between runs, submit both stages to
/// their backends and browse the resulting employee list.
#[derive(Parser)]
#[command(version, about, name = "onboard")]
pub struct Args {
    /// Path to the SQLite draft database. Defaults to
    /// $XDG_DATA_HOME/onboard/drafts.db
    #[arg(long, global = true)]
    pub drafts_file: Option<PathBuf>,

    /// Keep drafts in memory only; nothing is persisted
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Base URL of the stage 1 backend. Overrides $ONBOARD_STAGE1_API
    #[arg(long, global = true)]
    pub stage1_api: Option<String>,

    /// Base URL of the stage 2 backend. Overrides $ONBOARD_STAGE2_API
    #[arg(long, global = true)]
    pub stage2_api: Option<String>,

    /// Use a built-in in-memory backend instead of the HTTP backends
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
///
/// - `wizard`: edit the forms of a role and optionally submit them
/// - `draft`: inspect or discard a role's saved draft
/// - `employees`: list submitted employees
/// - `suggest`: look up departments or office locations
#[derive(Subcommand)]
pub enum Commands {
    /// Fill in the wizard forms and optionally submit them
    #[command(alias = "w")]
    Wizard(WizardArgs),
    /// Manage saved drafts
    #[command(alias = "d")]
    Draft {
        #[command(subcommand)]
        command: DraftCommands,
    },
    /// List submitted employees
    #[command(aliases = ["e", "ls"])]
    Employees(EmployeesArgs),
    /// Look up autocomplete suggestions
    #[command(alias = "s")]
    Suggest {
        #[command(subcommand)]
        command: SuggestCommands,
    },
}
