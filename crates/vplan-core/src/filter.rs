//! Per-entry visibility filtering and the plan refresh pipeline.
//!
//! The filter configuration is read from the store once per refresh and the
//! predicate is then evaluated synchronously over the full entry sequence,
//! so every entry of one refresh sees the same configuration snapshot.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::ScheduleService;
use crate::plan::PlanEntry;
use crate::presenter::{notices, Presenter};
use crate::store::{self, keys, CredentialStore};

/// Persisted filter settings. Empty strings match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterConfig {
    /// Substring matched against the class label ("10" in "10a").
    pub grade_level: String,
    /// Substring matched against the class label ("a" in "10a").
    pub class_letter: String,
    /// Exact-match token against any of the four teacher fields.
    pub teacher: String,
}

impl FilterConfig {
    /// Load the persisted configuration; absent fields default to empty
    /// (match-all).
    pub async fn load(store: &dyn CredentialStore) -> Self {
        Self {
            grade_level: store::read(store, keys::GRADE_LEVEL).await.unwrap_or_default(),
            class_letter: store::read(store, keys::CLASS_LETTER)
                .await
                .unwrap_or_default(),
            teacher: store::read(store, keys::TEACHER_FILTER)
                .await
                .unwrap_or_default(),
        }
    }

    pub async fn save(&self, store: &dyn CredentialStore) {
        store::write(store, keys::GRADE_LEVEL, &self.grade_level).await;
        store::write(store, keys::CLASS_LETTER, &self.class_letter).await;
        store::write(store, keys::TEACHER_FILTER, &self.teacher).await;
    }
}

/// Class-label match: grade level and class letter must both occur as
/// substrings. Empty filters are vacuously true.
pub fn class_matches(entry: &PlanEntry, config: &FilterConfig) -> bool {
    entry.class.contains(&config.grade_level) && entry.class.contains(&config.class_letter)
}

/// Teacher match: no filter, or an exact hit on any of the four
/// teacher-identifying fields.
pub fn teacher_matches(entry: &PlanEntry, config: &FilterConfig) -> bool {
    config.teacher.is_empty()
        || entry.teacher == config.teacher
        || entry.substitute == config.teacher
        || entry.teacher_code == config.teacher
        || entry.substitute_code == config.teacher
}

/// The visibility predicate applied to every fetched entry.
pub fn visible(entry: &PlanEntry, config: &FilterConfig) -> bool {
    class_matches(entry, config) && teacher_matches(entry, config)
}

/// How a refresh ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Plan fetched and re-rendered: `shown` of `total` entries passed the
    /// filter.
    Refreshed { shown: usize, total: usize },
    /// Required persisted state was missing; no network access happened.
    NotLoggedIn,
    /// The fetch failed; the previously rendered view was left untouched.
    Failed,
}

/// Evaluates the persisted filter against freshly fetched plans.
pub struct FilterEngine {
    service: Arc<dyn ScheduleService>,
    store: Arc<dyn CredentialStore>,
    presenter: Arc<dyn Presenter>,
}

impl FilterEngine {
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

    /// Fetch the plan and re-render the entries that pass the filter, in
    /// service order, without deduplication.
    ///
    /// On any fetch failure the current view is kept and exactly one
    /// network-error notice is emitted. The visible list is only cleared
    /// after a successful fetch, before the first entry renders.
    pub async fn refresh_and_filter(&self) -> RefreshOutcome {
        let store = self.store.as_ref();
        let server_url = store::read_nonempty(store, keys::SERVER_URL).await;
        let session_id = store::read_nonempty(store, keys::SESSION_ID).await;
        let schoolid = store::read_nonempty(store, keys::SCHOOL_ID).await;

        let (Some(server_url), Some(session_id), Some(schoolid)) =
            (server_url, session_id, schoolid)
        else {
            self.presenter.notify(notices::NOT_LOGGED_IN);
            return RefreshOutcome::NotLoggedIn;
        };

        // One configuration snapshot per refresh.
        let config = FilterConfig::load(store).await;

        let entries = match self
            .service
            .fetch_plan(&server_url, &session_id, &schoolid)
            .await
        {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(%err, "plan fetch failed, keeping current view");
                self.presenter.notify(notices::NETWORK_ERROR);
                return RefreshOutcome::Failed;
            }
        };

        self.presenter.clear_rendered_entries();
        let total = entries.len();
        let mut shown = 0;
        for entry in &entries {
            if visible(entry, &config) {
                self.presenter.render_entry(entry);
                shown += 1;
            }
        }
        tracing::debug!(shown, total, "plan rendered");
        RefreshOutcome::Refreshed { shown, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{entry, RecordingPresenter, ScriptedService};

    fn config(grade: &str, letter: &str, teacher: &str) -> FilterConfig {
        FilterConfig {
            grade_level: grade.into(),
            class_letter: letter.into(),
            teacher: teacher.into(),
        }
    }

    #[test]
    fn empty_config_matches_everything() {
        let cfg = FilterConfig::default();
        assert!(visible(&entry("10a", "Müller"), &cfg));
        assert!(visible(&entry("", ""), &cfg));
    }

    #[test]
    fn class_filter_requires_both_substrings() {
        let cfg = config("10", "a", "");
        assert!(visible(&entry("10a", "Müller"), &cfg));
        assert!(!visible(&entry("10b", "Müller"), &cfg));
        assert!(!visible(&entry("11a", "Müller"), &cfg));
    }

    #[test]
    fn teacher_filter_is_exact_on_any_of_four_fields() {
        let cfg = config("", "", "Müller");
        assert!(visible(&entry("10a", "Müller"), &cfg));

        let mut by_substitute = entry("10a", "Schmidt");
        by_substitute.substitute = "Müller".into();
        assert!(visible(&by_substitute, &cfg));

        let mut by_code = entry("10a", "Schmidt");
        by_code.teacher_code = "Müller".into();
        assert!(visible(&by_code, &cfg));

        let mut by_substitute_code = entry("10a", "Schmidt");
        by_substitute_code.substitute_code = "Müller".into();
        assert!(visible(&by_substitute_code, &cfg));

        // Substring hits do not count for the teacher filter.
        assert!(!visible(&entry("10a", "Müller-Lüdenscheidt"), &cfg));
    }

    #[tokio::test]
    async fn refresh_without_stored_state_stays_offline() {
        let service = ScriptedService::with_plan(vec![entry("10a", "Müller")]);
        let fetches = service.fetch_calls.clone();
        let store = std::sync::Arc::new(crate::store::MemoryStore::new());
        let presenter = std::sync::Arc::new(RecordingPresenter::default());
        let engine = FilterEngine::new(std::sync::Arc::new(service), store, presenter.clone());

        assert_eq!(engine.refresh_and_filter().await, RefreshOutcome::NotLoggedIn);
        assert_eq!(fetches.load(std::sync::atomic::Ordering::SeqCst), 0);
        assert_eq!(presenter.notices(), vec![notices::NOT_LOGGED_IN]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn entry_strategy() -> impl Strategy<Value = PlanEntry> {
            (
                "[0-9a-zA-Z]{0,4}",
                "[A-Za-zÄÖÜäöü]{0,8}",
                "[A-Za-z]{0,4}",
            )
                .prop_map(|(class, teacher, code)| {
                    let mut e = entry(&class, &teacher);
                    e.teacher_code = code;
                    e
                })
        }

        fn config_strategy() -> impl Strategy<Value = FilterConfig> {
            ("[0-9]{0,2}", "[a-z]{0,1}", "[A-Za-z]{0,6}").prop_map(|(grade, letter, teacher)| {
                FilterConfig {
                    grade_level: grade,
                    class_letter: letter,
                    teacher,
                }
            })
        }

        proptest! {
            #[test]
            fn visible_is_conjunction_of_both_matches(
                e in entry_strategy(),
                c in config_strategy(),
            ) {
                prop_assert_eq!(
                    visible(&e, &c),
                    class_matches(&e, &c) && teacher_matches(&e, &c)
                );
            }

            #[test]
            fn empty_config_never_filters(e in entry_strategy()) {
                prop_assert!(visible(&e, &FilterConfig::default()));
            }
        }
    }
}
