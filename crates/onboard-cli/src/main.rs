//! Onboard CLI Application
//!
//! Headless driver for the employee onboarding wizard: edit and submit the
//! forms of a role, manage drafts and list submitted employees.

mod app;
mod args;
mod cli;
mod renderer;

use std::time::Duration;

use anyhow::Result;
use app::App;
use args::{Args, Commands};
use clap::Parser;
use log::info;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let submit_delay = match &args.command {
        Some(Wizard(wizard)) => wizard.submit_delay_ms.map(Duration::from_millis),
        _ => None,
    };
    let app = App::from_args(&args, submit_delay).await?;

    info!("Onboard started");

    match args.command {
        Some(Wizard(wizard)) => app.handle_wizard(&wizard).await,
        Some(Draft { command }) => app.handle_draft_command(command).await,
        Some(Employees(employees)) => app.handle_employees(employees).await,
        Some(Suggest { command }) => app.handle_suggest_command(command).await,
        None => app.show_session().await,
    }
}
