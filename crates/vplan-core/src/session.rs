//! Session lifecycle: validity checks and the login exchange.
//!
//! The manager separates deciding from presenting: probes resolve to a
//! [`ProbeOutcome`] value first, and thin adapter functions map that outcome
//! to the login-status indicator and the derived [`SessionState`]. Session
//! validity is never cached in memory; every check re-reads the persisted
//! session id and asks the server.

use std::sync::Arc;

use crate::client::ScheduleService;
use crate::error::{ConfigError, CoreError};
use crate::presenter::{notices, LoginStatus, Presenter};
use crate::store::{self, keys, CredentialStore};

/// Result of one session-validity probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Server accepted the stored session id.
    Valid,
    /// Server rejected the stored session id.
    Invalid,
    /// Server could not be reached (timeout, refused, DNS).
    Unreachable,
    /// No server URL or session id persisted; no probe was issued.
    Missing,
}

/// Logical session state, re-derived on every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticating,
    Authenticated,
    Expired,
}

/// Session state derived from a probe outcome.
pub fn session_state(outcome: ProbeOutcome) -> SessionState {
    match outcome {
        ProbeOutcome::Valid => SessionState::Authenticated,
        ProbeOutcome::Invalid => SessionState::Expired,
        ProbeOutcome::Unreachable | ProbeOutcome::Missing => SessionState::Unauthenticated,
    }
}

/// Indicator text for a probe outcome.
pub fn login_status(outcome: ProbeOutcome) -> LoginStatus {
    match outcome {
        ProbeOutcome::Valid => LoginStatus::Connected,
        ProbeOutcome::Invalid | ProbeOutcome::Missing => LoginStatus::NotConnected,
        ProbeOutcome::Unreachable => LoginStatus::NoConnection,
    }
}

/// What the user typed into the login form, before validation.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub server_url: String,
    pub username: String,
    pub password: String,
    /// School id as entered, possibly with trailing descriptive text
    /// ("5182 - Testschule - Kassel").
    pub schoolid_raw: String,
    pub autologin: bool,
}

/// A validated, normalized login submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub server_url: String,
    pub username: String,
    pub password: String,
    pub schoolid_raw: String,
    pub schoolid: String,
    pub autologin: bool,
}

impl LoginForm {
    /// Validate and normalize. Fails before any network access.
    pub fn validate(&self) -> Result<LoginInput, ConfigError> {
        if self.username.is_empty() {
            return Err(ConfigError::MissingUsername);
        }
        if self.password.is_empty() {
            return Err(ConfigError::MissingPassword);
        }
        let schoolid = normalize_schoolid(&self.schoolid_raw)
            .ok_or_else(|| ConfigError::InvalidSchoolId(self.schoolid_raw.clone()))?;
        let server_url = normalize_server_url(&self.server_url)?;

        Ok(LoginInput {
            server_url,
            username: self.username.clone(),
            password: self.password.clone(),
            schoolid_raw: self.schoolid_raw.clone(),
            schoolid,
            autologin: self.autologin,
        })
    }
}

/// Leading digit sequence of the raw school id, `None` if there is none.
pub fn normalize_schoolid(raw: &str) -> Option<String> {
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

/// Reduce a user-entered server URL to its HTTPS origin.
pub fn normalize_server_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidServerUrl(raw.to_string());
    let url = url::Url::parse(raw).map_err(|_| invalid())?;
    if url.scheme() != "https" || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(url.origin().ascii_serialization())
}

/// Owns session validity determination and the login exchange.
pub struct SessionManager {
    service: Arc<dyn ScheduleService>,
    store: Arc<dyn CredentialStore>,
    presenter: Arc<dyn Presenter>,
}

impl SessionManager {
    pub fn new(
        service: Arc<dyn ScheduleService>,
        store: Arc<dyn CredentialStore>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            service,
            store,
            presenter,
        }
    }

    /// Probe the stored session against the server. Pure decision: no
    /// presenter side effects.
    pub async fn probe(&self) -> ProbeOutcome {
        let server_url = store::read_nonempty(self.store.as_ref(), keys::SERVER_URL).await;
        let session_id = store::read_nonempty(self.store.as_ref(), keys::SESSION_ID).await;

        let (Some(server_url), Some(session_id)) = (server_url, session_id) else {
            return ProbeOutcome::Missing;
        };

        match self.service.probe_session(&server_url, &session_id).await {
            Ok(true) => ProbeOutcome::Valid,
            Ok(false) => ProbeOutcome::Invalid,
            Err(err) => {
                tracing::warn!(%err, "session probe failed");
                ProbeOutcome::Unreachable
            }
        }
    }

    /// Probe the session and update the login-status indicator.
    ///
    /// Network failures resolve to "not authenticated" plus a transient
    /// notice; they never reach the caller.
    pub async fn check_session(&self) -> bool {
        let outcome = self.probe().await;
        self.presenter.set_login_status(login_status(outcome));
        if outcome == ProbeOutcome::Unreachable {
            self.presenter.notify(notices::SERVER_ERROR);
        }
        outcome == ProbeOutcome::Valid
    }

    /// Perform the login exchange and persist the returned session id.
    ///
    /// Exactly one login call per invocation. Failures update the indicator
    /// and emit a notice, then surface to the caller for display.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        schoolid: &str,
    ) -> Result<(), CoreError> {
        let server_url = store::read_nonempty(self.store.as_ref(), keys::SERVER_URL)
            .await
            .ok_or(ConfigError::MissingServerUrl)?;

        match self
            .service
            .login(&server_url, username, password, schoolid)
            .await
        {
            Ok(session_id) => {
                store::write(self.store.as_ref(), keys::SESSION_ID, &session_id).await;
                self.presenter.set_login_status(LoginStatus::Connected);
                self.presenter.notify(notices::LOGIN_SUCCESS);
                self.presenter.close_auth_prompt();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "login exchange failed");
                self.presenter.set_login_status(LoginStatus::NotConnected);
                self.presenter.notify(notices::LOGIN_FAILED);
                Err(err)
            }
        }
    }

    /// Handle a login-form submission: validate, persist, authenticate.
    ///
    /// Validation failures abort before any persisted write or network call.
    /// With autologin disabled the password is persisted as empty, never
    /// left stale.
    pub async fn submit_login(&self, form: &LoginForm) -> Result<(), CoreError> {
        let input = match form.validate() {
            Ok(input) => input,
            Err(err) => {
                self.presenter.notify(notices::INVALID_LOGIN_DATA);
                return Err(err.into());
            }
        };

        let store = self.store.as_ref();
        if input.autologin {
            store::write(store, keys::PASSWORD, &input.password).await;
        } else {
            store::write(store, keys::PASSWORD, "").await;
        }
        store::write_flag(store, keys::AUTOLOGIN, input.autologin).await;
        store::write(store, keys::SERVER_URL, &input.server_url).await;
        store::write(store, keys::SCHOOL_ID_RAW, &input.schoolid_raw).await;
        store::write(store, keys::SCHOOL_ID, &input.schoolid).await;
        store::write(store, keys::USERNAME, &input.username).await;

        self.authenticate(&input.username, &input.password, &input.schoolid)
            .await
    }
}
