//! Hooks into the presentation layer.
//!
//! The core never talks to a widget toolkit. Every user-visible side effect
//! goes through this trait; the CLI implements it for the terminal, a GUI
//! shell would implement it for its windows. Implementations must not fail:
//! presentation is fire-and-forget from the core's point of view.

use std::fmt;

use crate::plan::PlanEntry;

/// Login-status indicator states shown next to the account settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    /// A stored session was accepted by the server.
    Connected,
    /// No session, or the server rejected the stored one.
    NotConnected,
    /// The server could not be reached at all.
    NoConnection,
}

impl fmt::Display for LoginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            LoginStatus::Connected => "connected",
            LoginStatus::NotConnected => "not connected",
            LoginStatus::NoConnection => "no connection",
        };
        f.write_str(text)
    }
}

/// Transient notices the core emits through [`Presenter::notify`].
pub mod notices {
    pub const SERVER_ERROR: &str = "Error calling the server!";
    pub const LOGIN_SUCCESS: &str = "Login successful!";
    pub const LOGIN_FAILED: &str = "Login failed!";
    pub const INVALID_LOGIN_DATA: &str = "Invalid login data!";
    pub const NOT_LOGGED_IN: &str = "You are not logged in!";
    pub const NETWORK_ERROR: &str = "Network error!";
    pub const MUST_LOG_IN: &str = "You must log in with your school portal account to use this app!";
}

/// Presentation-layer collaborator the core calls into.
pub trait Presenter: Send + Sync {
    /// Update the login-status indicator.
    fn set_login_status(&self, status: LoginStatus);

    /// Show a transient user-visible notice (toast).
    fn notify(&self, message: &str);

    /// Append one entry to the visible plan.
    fn render_entry(&self, entry: &PlanEntry);

    /// Remove all currently rendered entries.
    fn clear_rendered_entries(&self);

    /// Open the login/settings surface.
    fn show_auth_prompt(&self);

    /// Close the login/settings surface.
    fn close_auth_prompt(&self);
}
