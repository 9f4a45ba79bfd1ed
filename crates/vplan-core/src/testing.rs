//! Test doubles shared by the unit tests: a scripted schedule service and
//! a recording presenter.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::ScheduleService;
use crate::error::{AuthError, CoreError, NetworkError};
use crate::plan::PlanEntry;
use crate::presenter::{LoginStatus, Presenter};

/// Build a minimal entry with just a class label and a teacher name.
pub fn entry(class: &str, teacher: &str) -> PlanEntry {
    PlanEntry {
        class: class.to_string(),
        teacher: teacher.to_string(),
        ..PlanEntry::default()
    }
}

/// Scripted [`ScheduleService`]: unset fields fail the way the real network
/// would (rejected login, unreachable probe, failed fetch).
#[derive(Default)]
pub struct ScriptedService {
    /// Probe answer; `None` simulates an unreachable server.
    pub probe_ok: Option<bool>,
    /// Session id returned by login; `None` simulates a rejected login.
    pub login_sid: Option<String>,
    /// Fetch answer; `None` simulates a network failure.
    pub plan: Option<Vec<PlanEntry>>,
    pub login_calls: Arc<AtomicUsize>,
    pub fetch_calls: Arc<AtomicUsize>,
}

impl ScriptedService {
    pub fn with_probe(ok: bool) -> Self {
        Self {
            probe_ok: Some(ok),
            ..Self::default()
        }
    }

    pub fn with_login(sid: &str) -> Self {
        Self {
            login_sid: Some(sid.to_string()),
            ..Self::default()
        }
    }

    pub fn with_plan(plan: Vec<PlanEntry>) -> Self {
        Self {
            plan: Some(plan),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ScheduleService for ScriptedService {
    async fn login(
        &self,
        _server_url: &str,
        _username: &str,
        _password: &str,
        _schoolid: &str,
    ) -> Result<String, CoreError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        match &self.login_sid {
            Some(sid) => Ok(sid.clone()),
            None => Err(AuthError::Rejected { status: 401 }.into()),
        }
    }

    async fn probe_session(
        &self,
        _server_url: &str,
        _session_id: &str,
    ) -> Result<bool, NetworkError> {
        match self.probe_ok {
            Some(ok) => Ok(ok),
            None => Err(NetworkError::Connect("scripted: unreachable".into())),
        }
    }

    async fn fetch_plan(
        &self,
        _server_url: &str,
        _session_id: &str,
        _schoolid: &str,
    ) -> Result<Vec<PlanEntry>, CoreError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        match &self.plan {
            Some(plan) => Ok(plan.clone()),
            None => Err(NetworkError::Connect("scripted: fetch failed".into()).into()),
        }
    }
}

/// Recording [`Presenter`]: keeps the visible list and every notification
/// so tests can assert on ordering and counts.
#[derive(Default)]
pub struct RecordingPresenter {
    statuses: Mutex<Vec<LoginStatus>>,
    notices: Mutex<Vec<String>>,
    visible: Mutex<Vec<PlanEntry>>,
    clears: AtomicUsize,
    prompt_shows: AtomicUsize,
    prompt_closes: AtomicUsize,
}

impl RecordingPresenter {
    pub fn last_status(&self) -> Option<LoginStatus> {
        self.statuses.lock().unwrap().last().copied()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    /// Class labels of the currently visible entries, in render order.
    pub fn rendered_classes(&self) -> Vec<String> {
        self.visible
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.class.clone())
            .collect()
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    pub fn prompt_shows(&self) -> usize {
        self.prompt_shows.load(Ordering::SeqCst)
    }

    pub fn prompt_closes(&self) -> usize {
        self.prompt_closes.load(Ordering::SeqCst)
    }
}

impl Presenter for RecordingPresenter {
    fn set_login_status(&self, status: LoginStatus) {
        self.statuses.lock().unwrap().push(status);
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }

    fn render_entry(&self, entry: &PlanEntry) {
        self.visible.lock().unwrap().push(entry.clone());
    }

    fn clear_rendered_entries(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.visible.lock().unwrap().clear();
    }

    fn show_auth_prompt(&self) {
        self.prompt_shows.fetch_add(1, Ordering::SeqCst);
    }

    fn close_auth_prompt(&self) {
        self.prompt_closes.fetch_add(1, Ordering::SeqCst);
    }
}
