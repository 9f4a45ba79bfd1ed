use crate::common::build_app;
use vplan_core::{RefreshOutcome, StartupOutcome};

pub async fn run_start() -> Result<(), Box<dyn std::error::Error>> {
    let (app, _presenter) = build_app()?;
    match app.startup().await {
        StartupOutcome::Ready => Ok(()),
        StartupOutcome::PromptUser => {
            // The presenter already pointed at `vplan login`.
            Ok(())
        }
    }
}

pub async fn run_refresh() -> Result<(), Box<dyn std::error::Error>> {
    let (app, _presenter) = build_app()?;
    println!("Plan for {}", chrono::Local::now().format("%A, %d.%m.%Y"));
    println!();
    match app.refresh().await {
        RefreshOutcome::Refreshed { shown: 0, total } => {
            println!("No entries match the current filter ({total} fetched).");
        }
        RefreshOutcome::Refreshed { shown, total } => {
            println!("{shown} of {total} entries shown.");
        }
        RefreshOutcome::NotLoggedIn | RefreshOutcome::Failed => {
            // Notice already emitted through the presenter.
        }
    }
    Ok(())
}
