//! # vplan Core Library
//!
//! Core business logic for the vplan substitution-plan client. All
//! operations are available to any front end; the bundled CLI is a thin
//! layer over this crate, and a GUI shell would sit on the same surface.
//!
//! ## Architecture
//!
//! - **Session Manager**: owns session-validity probes and the login
//!   exchange against a configured plan-service instance
//! - **Autologin Orchestrator**: the cold-start decision between reusing a
//!   session, silent re-authentication and prompting the user
//! - **Filter Engine**: fetches the plan and renders the entries that pass
//!   the persisted class/teacher filter
//! - **Credential Store**: opaque encrypted key-value persistence (OS
//!   keyring by default)
//! - **Presenter**: the hooks a front end implements to render entries and
//!   show notices
//!
//! ## Key Components
//!
//! - [`PlanApp`]: facade wiring the components together for a front end
//! - [`SessionManager`]: session check and login
//! - [`FilterEngine`]: fetch + filter + render pipeline
//! - [`CredentialStore`]: persistence trait with keyring and in-memory impls

pub mod app;
pub mod autologin;
pub mod client;
pub mod error;
pub mod filter;
pub mod plan;
pub mod presenter;
pub mod schools;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use app::PlanApp;
pub use autologin::{decide, AutologinDecision, StartupOutcome};
pub use client::{HttpScheduleService, ScheduleService, REQUEST_TIMEOUT};
pub use error::{AuthError, ConfigError, CoreError, NetworkError, StorageError};
pub use filter::{visible, FilterConfig, FilterEngine, RefreshOutcome};
pub use plan::PlanEntry;
pub use presenter::{LoginStatus, Presenter};
pub use schools::{School, SchoolDirectory};
pub use session::{LoginForm, SessionManager, SessionState};
pub use store::{CredentialRecord, CredentialStore, KeyringStore, MemoryStore};

/// Public instance used when the user has not configured a server URL.
pub const DEFAULT_SERVER_URL: &str = "https://production.sphvertretungsplan.alessioc42.workers.dev";
