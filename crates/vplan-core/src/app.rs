//! Application facade wiring the core components together.
//!
//! Front ends (CLI, GUI shell) construct a [`PlanApp`] with their store,
//! service client and presenter, then drive it through a handful of
//! operations. All flows are sequenced on the calling task: a login always
//! completes before the refresh it triggers reads the session id.

use std::sync::Arc;

use crate::autologin::{decide, AutologinDecision, StartupOutcome};
use crate::client::ScheduleService;
use crate::error::{CoreError, StorageError};
use crate::filter::{FilterConfig, FilterEngine, RefreshOutcome};
use crate::presenter::{notices, Presenter};
use crate::session::{LoginForm, SessionManager};
use crate::store::{CredentialRecord, CredentialStore};

pub struct PlanApp {
    store: Arc<dyn CredentialStore>,
    presenter: Arc<dyn Presenter>,
    session: SessionManager,
    filter: FilterEngine,
}

impl PlanApp {
    pub fn new(
        service: Arc<dyn ScheduleService>,
        store: Arc<dyn CredentialStore>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        let session = SessionManager::new(service.clone(), store.clone(), presenter.clone());
        let filter = FilterEngine::new(service, store.clone(), presenter.clone());
        Self {
            store,
            presenter,
            session,
            filter,
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Cold-start flow: reuse a valid session, silently re-authenticate
    /// from complete autologin credentials, or open the login prompt.
    pub async fn startup(&self) -> StartupOutcome {
        if self.session.check_session().await {
            self.refresh().await;
            return StartupOutcome::Ready;
        }

        let record = CredentialRecord::load(self.store.as_ref()).await;
        match decide(&record) {
            AutologinDecision::Attempt {
                username,
                password,
                schoolid,
            } => match self
                .session
                .authenticate(&username, &password, &schoolid)
                .await
            {
                Ok(()) => {
                    self.refresh().await;
                    StartupOutcome::Ready
                }
                Err(err) => {
                    tracing::info!(%err, "autologin failed, prompting user");
                    self.presenter.show_auth_prompt();
                    StartupOutcome::PromptUser
                }
            },
            AutologinDecision::Prompt => {
                self.presenter.show_auth_prompt();
                self.presenter.notify(notices::MUST_LOG_IN);
                StartupOutcome::PromptUser
            }
        }
    }

    /// Login-form submission: validate, persist, authenticate once, then
    /// refresh the plan. The refresh only starts after the session id write
    /// completed.
    pub async fn submit_login(&self, form: &LoginForm) -> Result<(), CoreError> {
        self.session.submit_login(form).await?;
        self.refresh().await;
        Ok(())
    }

    /// Persist new filter settings and re-filter immediately.
    pub async fn save_filter(&self, config: &FilterConfig) -> RefreshOutcome {
        config.save(self.store.as_ref()).await;
        self.refresh().await
    }

    /// Fetch the plan and re-render the filtered view.
    pub async fn refresh(&self) -> RefreshOutcome {
        self.filter.refresh_and_filter().await
    }

    /// Wipe every persisted field.
    pub async fn reset(&self) -> Result<(), StorageError> {
        self.store.clear().await
    }
}
