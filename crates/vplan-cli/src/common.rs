//! Shared wiring for all CLI commands.

use std::sync::Arc;

use crate::presenter::TerminalPresenter;
use vplan_core::{HttpScheduleService, KeyringStore, PlanApp};

/// Build the app against the OS keyring and the live HTTP client.
pub fn build_app() -> Result<(PlanApp, Arc<TerminalPresenter>), Box<dyn std::error::Error>> {
    let presenter = Arc::new(TerminalPresenter::new());
    let service = Arc::new(HttpScheduleService::new()?);
    let store = Arc::new(KeyringStore::new());
    let app = PlanApp::new(service, store, presenter.clone());
    Ok((app, presenter))
}
