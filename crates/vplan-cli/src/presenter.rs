//! Terminal implementation of the core's presentation hooks.

use std::sync::Mutex;

use vplan_core::{LoginStatus, PlanEntry, Presenter};

/// Renders plan entries as text cards, notices to stderr, and remembers the
/// last login status for the `status` command.
#[derive(Default)]
pub struct TerminalPresenter {
    last_status: Mutex<Option<LoginStatus>>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_status(&self) -> Option<LoginStatus> {
        *self.last_status.lock().unwrap()
    }
}

impl Presenter for TerminalPresenter {
    fn set_login_status(&self, status: LoginStatus) {
        *self.last_status.lock().unwrap() = Some(status);
    }

    fn notify(&self, message: &str) {
        eprintln!("! {message}");
    }

    fn render_entry(&self, entry: &PlanEntry) {
        println!(
            "Stunde {}  {}  {}",
            entry.period_text(),
            entry.class,
            entry.change_type
        );
        for (label, value) in entry.detail_rows() {
            println!("  {label}: {value}");
        }
        println!("{}  {}", entry.day, entry.subject);
        println!();
    }

    fn clear_rendered_entries(&self) {
        // Each invocation writes a fresh plan; nothing on screen to clear.
    }

    fn show_auth_prompt(&self) {
        eprintln!("Run `vplan login --help` to sign in.");
    }

    fn close_auth_prompt(&self) {}
}
