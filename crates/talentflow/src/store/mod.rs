//! Client-side application state.
//!
//! [`AppStore`] holds the UI preferences, the mirrored entity collections
//! and their selection and loading flags. Every mutation goes through a
//! typed action, broadcasts a [`StoreEvent`] and, where the action touches
//! a preference, rewrites the preferences key of the backing storage.
//!
//! Collections live behind `Arc` and are replaced copy-on-write, so a
//! snapshot taken with [`AppStore::jobs`] and friends never changes.

pub mod events;
pub mod persist;

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::config::StorageConfig;
use crate::model::{merge_shallow, Assessment, Candidate, Job, PatchError, Stage};
use crate::query::{CandidateFilters, CandidateFiltersPatch, Pagination, PaginationPatch};
use crate::storage::{get_json, set_json, KeyValueStore, MemoryStore};

pub use events::{StoreEvent, StoreEvents};
pub use persist::{Preferences, Snapshot, Theme, Versioned, PREFERENCES_VERSION};

const ID_PROTECTED: &[&str] = &["id"];

#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub sidebar_collapsed: bool,
    pub theme: Theme,

    pub jobs: Arc<Vec<Job>>,
    pub selected_job: Option<Job>,
    pub jobs_loading: bool,

    pub candidates: Arc<Vec<Candidate>>,
    pub selected_candidate: Option<Candidate>,
    pub candidates_loading: bool,
    pub candidate_filters: CandidateFilters,
    pub candidates_pagination: Pagination,

    pub assessments: Arc<Vec<Assessment>>,
    pub selected_assessment: Option<Assessment>,
    pub assessments_loading: bool,
}

impl StoreState {
    pub fn preferences(&self) -> Preferences {
        Preferences {
            theme: self.theme,
            sidebar_collapsed: self.sidebar_collapsed,
            candidate_filters: self.candidate_filters.clone(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            theme: Some(self.theme),
            sidebar_collapsed: Some(self.sidebar_collapsed),
            jobs: Some(self.jobs.as_ref().clone()),
            candidates: Some(self.candidates.as_ref().clone()),
            candidate_filters: Some(self.candidate_filters.clone()),
            assessments: Some(self.assessments.as_ref().clone()),
            candidates_pagination: Some(self.candidates_pagination),
        }
    }
}

pub struct AppStore {
    state: StoreState,
    storage: Arc<dyn KeyValueStore>,
    config: StorageConfig,
    events: StoreEvents,
}

impl AppStore {
    /// Opens a store over `storage` and restores the persisted preferences.
    pub fn open(storage: Arc<dyn KeyValueStore>, config: &StorageConfig) -> Self {
        let mut store = Self {
            state: StoreState::default(),
            storage,
            config: config.clone(),
            events: StoreEvents::default(),
        };
        store.restore_preferences();
        store
    }

    /// A store over process-lifetime storage with default keys.
    pub fn in_memory() -> Self {
        Self::open(Arc::new(MemoryStore::new()), &StorageConfig::default())
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn jobs(&self) -> Arc<Vec<Job>> {
        Arc::clone(&self.state.jobs)
    }

    pub fn candidates(&self) -> Arc<Vec<Candidate>> {
        Arc::clone(&self.state.candidates)
    }

    pub fn assessments(&self) -> Arc<Vec<Assessment>> {
        Arc::clone(&self.state.assessments)
    }

    // ─── Preferences ────────────────────────────────────────────────────────

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
        self.events.send(StoreEvent::Theme);
        self.persist_preferences();
    }

    pub fn toggle_sidebar(&mut self) {
        let collapsed = !self.state.sidebar_collapsed;
        self.set_sidebar_collapsed(collapsed);
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.state.sidebar_collapsed = collapsed;
        self.events.send(StoreEvent::Sidebar);
        self.persist_preferences();
    }

    /// Overwrites only the filters present in `patch`.
    pub fn set_candidate_filters(&mut self, patch: CandidateFiltersPatch) {
        self.state.candidate_filters.apply(patch);
        self.events.send(StoreEvent::CandidateFilters);
        self.persist_preferences();
    }

    pub fn set_candidates_pagination(&mut self, patch: PaginationPatch) {
        self.state.candidates_pagination.apply(patch);
        self.events.send(StoreEvent::CandidatesPagination);
    }

    // ─── Jobs ───────────────────────────────────────────────────────────────

    pub fn set_jobs(&mut self, jobs: Vec<Job>) {
        self.state.jobs = Arc::new(jobs);
        self.entities_changed(StoreEvent::Jobs);
    }

    pub fn add_job(&mut self, job: Job) {
        Arc::make_mut(&mut self.state.jobs).push(job);
        self.entities_changed(StoreEvent::Jobs);
    }

    /// Shallow-merges `patch` into the job with `id`. Returns whether a job
    /// matched.
    pub fn update_job(&mut self, id: &str, patch: &Value) -> Result<bool, PatchError> {
        let updated = merge_in_place(&mut self.state.jobs, |j| j.id == id, patch)?;
        if updated {
            self.entities_changed(StoreEvent::Jobs);
        }
        Ok(updated)
    }

    pub fn remove_job(&mut self, id: &str) -> bool {
        let removed = remove_where(&mut self.state.jobs, |j| j.id == id);
        if removed {
            self.entities_changed(StoreEvent::Jobs);
        }
        removed
    }

    pub fn set_selected_job(&mut self, job: Option<Job>) {
        self.state.selected_job = job;
        self.events.send(StoreEvent::Selection);
    }

    pub fn set_jobs_loading(&mut self, loading: bool) {
        self.state.jobs_loading = loading;
        self.events.send(StoreEvent::Loading);
    }

    // ─── Candidates ─────────────────────────────────────────────────────────

    pub fn set_candidates(&mut self, candidates: Vec<Candidate>) {
        self.state.candidates = Arc::new(candidates);
        self.entities_changed(StoreEvent::Candidates);
    }

    pub fn add_candidate(&mut self, candidate: Candidate) {
        Arc::make_mut(&mut self.state.candidates).push(candidate);
        self.entities_changed(StoreEvent::Candidates);
    }

    pub fn update_candidate(&mut self, id: &str, patch: &Value) -> Result<bool, PatchError> {
        let updated = merge_in_place(&mut self.state.candidates, |c| c.id == id, patch)?;
        if updated {
            self.entities_changed(StoreEvent::Candidates);
        }
        Ok(updated)
    }

    pub fn remove_candidate(&mut self, id: &str) -> bool {
        let removed = remove_where(&mut self.state.candidates, |c| c.id == id);
        if removed {
            self.entities_changed(StoreEvent::Candidates);
        }
        removed
    }

    /// Sets the stage and stamps last activity on the one matching
    /// candidate. Returns whether it was found.
    pub fn move_candidate_to_stage(&mut self, id: &str, stage: Stage) -> bool {
        let Some(index) = self.state.candidates.iter().position(|c| c.id == id) else {
            log::debug!("move_candidate_to_stage: no candidate {}", id);
            return false;
        };

        let candidate = &mut Arc::make_mut(&mut self.state.candidates)[index];
        candidate.stage = stage;
        candidate.last_activity = Utc::now();

        self.entities_changed(StoreEvent::Candidates);
        true
    }

    pub fn set_selected_candidate(&mut self, candidate: Option<Candidate>) {
        self.state.selected_candidate = candidate;
        self.events.send(StoreEvent::Selection);
    }

    pub fn set_candidates_loading(&mut self, loading: bool) {
        self.state.candidates_loading = loading;
        self.events.send(StoreEvent::Loading);
    }

    // ─── Assessments ────────────────────────────────────────────────────────

    pub fn set_assessments(&mut self, assessments: Vec<Assessment>) {
        self.state.assessments = Arc::new(assessments);
        self.entities_changed(StoreEvent::Assessments);
    }

    pub fn add_assessment(&mut self, assessment: Assessment) {
        Arc::make_mut(&mut self.state.assessments).push(assessment);
        self.entities_changed(StoreEvent::Assessments);
    }

    /// Inserts `assessment` ahead of every existing one.
    pub fn prepend_assessment(&mut self, assessment: Assessment) {
        Arc::make_mut(&mut self.state.assessments).insert(0, assessment);
        self.entities_changed(StoreEvent::Assessments);
    }

    pub fn update_assessment(&mut self, id: &str, patch: &Value) -> Result<bool, PatchError> {
        let updated = merge_in_place(&mut self.state.assessments, |a| a.id == id, patch)?;
        if updated {
            self.entities_changed(StoreEvent::Assessments);
        }
        Ok(updated)
    }

    pub fn remove_assessment(&mut self, id: &str) -> bool {
        let removed = remove_where(&mut self.state.assessments, |a| a.id == id);
        if removed {
            self.entities_changed(StoreEvent::Assessments);
        }
        removed
    }

    /// Copies the assessment with `id` under a fresh id and a " (Copy)"
    /// title, placing the copy first.
    pub fn duplicate_assessment(&mut self, id: &str) -> Option<Assessment> {
        let Some(original) = self.state.assessments.iter().find(|a| a.id == id) else {
            log::debug!("duplicate_assessment: no assessment {}", id);
            return None;
        };

        let mut copy = original.clone();
        copy.id = uuid::Uuid::new_v4().to_string();
        copy.title = format!("{} (Copy)", original.title);

        self.prepend_assessment(copy.clone());
        Some(copy)
    }

    pub fn set_selected_assessment(&mut self, assessment: Option<Assessment>) {
        self.state.selected_assessment = assessment;
        self.events.send(StoreEvent::Selection);
    }

    pub fn set_assessments_loading(&mut self, loading: bool) {
        self.state.assessments_loading = loading;
        self.events.send(StoreEvent::Loading);
    }

    // ─── Persistence ────────────────────────────────────────────────────────

    /// Writes a full snapshot under the snapshot key.
    pub fn save_to_storage(&self) {
        let snapshot = self.state.snapshot();
        match set_json(self.storage.as_ref(), &self.config.snapshot_key, &snapshot) {
            Ok(()) => log::debug!("Saved store snapshot to '{}'", self.config.snapshot_key),
            Err(e) => log::error!("Failed to save store snapshot: {}", e),
        }
    }

    /// Merges whichever fields the stored snapshot carries into the state.
    /// Returns whether a snapshot was found.
    pub fn load_from_storage(&mut self) -> bool {
        let snapshot: Snapshot =
            match get_json(self.storage.as_ref(), &self.config.snapshot_key) {
                Ok(Some(snapshot)) => snapshot,
                Ok(None) => return false,
                Err(e) => {
                    log::error!("Failed to load store snapshot: {}", e);
                    return false;
                }
            };

        let touches_preferences = snapshot.touches_preferences();
        let state = &mut self.state;
        if let Some(theme) = snapshot.theme {
            state.theme = theme;
        }
        if let Some(collapsed) = snapshot.sidebar_collapsed {
            state.sidebar_collapsed = collapsed;
        }
        if let Some(jobs) = snapshot.jobs {
            state.jobs = Arc::new(jobs);
        }
        if let Some(candidates) = snapshot.candidates {
            state.candidates = Arc::new(candidates);
        }
        if let Some(filters) = snapshot.candidate_filters {
            state.candidate_filters = filters;
        }
        if let Some(assessments) = snapshot.assessments {
            state.assessments = Arc::new(assessments);
        }
        if let Some(pagination) = snapshot.candidates_pagination {
            state.candidates_pagination = pagination;
        }

        log::info!("Restored store snapshot from '{}'", self.config.snapshot_key);
        self.events.send(StoreEvent::Restored);
        if touches_preferences {
            self.persist_preferences();
        }
        true
    }

    fn persist_preferences(&self) {
        let envelope = Versioned::current(self.state.preferences());
        if let Err(e) = set_json(self.storage.as_ref(), &self.config.preferences_key, &envelope) {
            log::error!("Failed to persist preferences: {}", e);
        }
    }

    fn restore_preferences(&mut self) {
        let stored: Versioned<Preferences> =
            match get_json(self.storage.as_ref(), &self.config.preferences_key) {
                Ok(Some(stored)) => stored,
                Ok(None) => return,
                Err(e) => {
                    log::warn!("Ignoring unreadable preferences: {}", e);
                    return;
                }
            };

        if stored.version != PREFERENCES_VERSION {
            log::warn!(
                "Preferences version {} differs from {}, restoring anyway",
                stored.version,
                PREFERENCES_VERSION
            );
        }

        let prefs = stored.state;
        self.state.theme = prefs.theme;
        self.state.sidebar_collapsed = prefs.sidebar_collapsed;
        self.state.candidate_filters = prefs.candidate_filters;
    }

    fn entities_changed(&self, event: StoreEvent) {
        self.events.send(event);
        if self.config.snapshot_on_mutation {
            self.save_to_storage();
        }
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Merges `patch` into the first matching record. The collection is only
/// cloned when a record matches and the merge succeeds.
fn merge_in_place<T, F>(items: &mut Arc<Vec<T>>, matches: F, patch: &Value) -> Result<bool, PatchError>
where
    T: Clone + serde::Serialize + serde::de::DeserializeOwned,
    F: Fn(&T) -> bool,
{
    let Some(index) = items.iter().position(matches) else {
        return Ok(false);
    };
    let merged = merge_shallow(&items[index], patch, ID_PROTECTED)?;
    Arc::make_mut(items)[index] = merged;
    Ok(true)
}

fn remove_where<T: Clone, F: Fn(&T) -> bool>(items: &mut Arc<Vec<T>>, matches: F) -> bool {
    let Some(index) = items.iter().position(matches) else {
        return false;
    };
    Arc::make_mut(items).remove(index);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FixtureGenerator;
    use crate::storage::SqliteStore;
    use chrono::TimeZone;
    use serde_json::json;

    fn generator() -> FixtureGenerator {
        FixtureGenerator::seeded(8, Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap())
    }

    fn store_with_candidates(n: usize) -> AppStore {
        let mut generator = generator();
        let mut store = AppStore::in_memory();
        store.set_candidates((1..=n).map(|i| generator.candidate(&i.to_string(), "1")).collect());
        store
    }

    #[test]
    fn test_defaults() {
        let store = AppStore::in_memory();
        let state = store.state();

        assert_eq!(state.theme, Theme::Light);
        assert!(!state.sidebar_collapsed);
        assert!(state.candidate_filters.is_empty());
        assert_eq!(state.candidates_pagination, Pagination::default());
        assert!(state.jobs.is_empty());
    }

    #[test]
    fn test_move_candidate_touches_only_target() {
        let mut store = store_with_candidates(4);
        let before = store.candidates();

        assert!(store.move_candidate_to_stage("2", Stage::Offer));

        let after = store.candidates();
        for (old, new) in before.iter().zip(after.iter()) {
            if old.id == "2" {
                assert_eq!(new.stage, Stage::Offer);
                assert!(new.last_activity > old.last_activity);
            } else {
                assert_eq!(old, new);
            }
        }
        assert!(!store.move_candidate_to_stage("99", Stage::Hired));
    }

    #[test]
    fn test_snapshots_are_not_mutated() {
        let mut store = store_with_candidates(2);
        let snapshot = store.candidates();
        let stage = snapshot[0].stage;

        store.move_candidate_to_stage("1", Stage::Rejected);
        store.remove_candidate("2");

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].stage, stage);
        assert_eq!(store.candidates().len(), 1);
    }

    #[test]
    fn test_duplicate_assessment() {
        let mut generator = generator();
        let mut store = AppStore::in_memory();
        store.set_assessments(vec![generator.assessment("1"), generator.assessment("2")]);

        let copy = store.duplicate_assessment("2").unwrap();
        let original = store.assessments()[2].clone();

        assert_eq!(store.assessments().len(), 3);
        assert_eq!(store.assessments()[0], copy);
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.title, format!("{} (Copy)", original.title));
        assert_eq!(copy.description, original.description);
        assert_eq!(copy.questions, original.questions);
        assert_eq!(copy.created_at, original.created_at);
        assert!(store.duplicate_assessment("nope").is_none());
    }

    #[test]
    fn test_update_job_shallow_merge() {
        let mut generator = generator();
        let mut store = AppStore::in_memory();
        store.set_jobs(vec![generator.job("1")]);

        assert!(store
            .update_job("1", &json!({"id": "7", "title": "Staff Engineer"}))
            .unwrap());
        let jobs = store.jobs();
        assert_eq!(jobs[0].id, "1");
        assert_eq!(jobs[0].title, "Staff Engineer");

        assert!(!store.update_job("2", &json!({})).unwrap());
        assert!(store.update_job("1", &json!({"status": 3})).is_err());
    }

    #[test]
    fn test_filters_and_pagination_merge() {
        let mut store = AppStore::in_memory();
        store.set_candidate_filters(CandidateFiltersPatch {
            stage: Some("interview".to_string()),
            ..Default::default()
        });
        store.set_candidate_filters(CandidateFiltersPatch {
            search: Some("lee".to_string()),
            ..Default::default()
        });
        store.set_candidates_pagination(PaginationPatch {
            page: Some(3),
            ..Default::default()
        });

        let state = store.state();
        assert_eq!(state.candidate_filters.stage, "interview");
        assert_eq!(state.candidate_filters.search, "lee");
        assert_eq!(state.candidates_pagination.page, 3);
        assert_eq!(state.candidates_pagination.limit, 50);
    }

    #[test]
    fn test_actions_broadcast_events() {
        let mut store = AppStore::in_memory();
        let mut rx = store.subscribe();

        store.toggle_sidebar();
        store.set_jobs(Vec::new());
        store.set_jobs_loading(true);

        assert_eq!(rx.try_recv().unwrap(), StoreEvent::Sidebar);
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::Jobs);
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::Loading);
    }

    #[test]
    fn test_preferences_survive_reopen() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        let config = StorageConfig::default();

        {
            let mut store = AppStore::open(Arc::clone(&storage), &config);
            store.set_theme(Theme::Dark);
            store.set_candidate_filters(CandidateFiltersPatch {
                job_id: Some("4".to_string()),
                ..Default::default()
            });
            store.set_jobs(vec![generator().job("1")]);
        }

        let reopened = AppStore::open(storage, &config);
        assert_eq!(reopened.state().theme, Theme::Dark);
        assert_eq!(reopened.state().candidate_filters.job_id, "4");
        assert!(reopened.jobs().is_empty());
    }

    #[test]
    fn test_snapshot_roundtrip_through_storage() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let config = StorageConfig::default();

        let mut store = AppStore::open(Arc::clone(&storage), &config);
        store.set_jobs(vec![generator().job("1")]);
        store.set_candidates_pagination(PaginationPatch {
            total: Some(120),
            ..Default::default()
        });
        store.save_to_storage();

        let mut reopened = AppStore::open(storage, &config);
        assert!(reopened.jobs().is_empty());
        assert!(reopened.load_from_storage());
        assert_eq!(reopened.jobs().len(), 1);
        assert_eq!(reopened.state().candidates_pagination.total, 120);
    }

    #[test]
    fn test_load_merges_partial_snapshot() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set_item("talentflow-state", r#"{"sidebarCollapsed": true}"#)
            .unwrap();

        let mut store = AppStore::open(storage, &StorageConfig::default());
        store.set_jobs(vec![generator().job("1")]);

        assert!(store.load_from_storage());
        assert!(store.state().sidebar_collapsed);
        assert_eq!(store.jobs().len(), 1);
    }

    #[test]
    fn test_corrupt_storage_is_ignored() {
        let storage = Arc::new(MemoryStore::new());
        storage.set_item("talentflow-storage", "{not json").unwrap();
        storage.set_item("talentflow-state", "42").unwrap();

        let mut store = AppStore::open(storage, &StorageConfig::default());
        assert_eq!(store.state().theme, Theme::Light);
        assert!(!store.load_from_storage());
    }

    #[test]
    fn test_snapshot_on_mutation() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let config = StorageConfig {
            snapshot_on_mutation: true,
            ..Default::default()
        };

        let mut store = AppStore::open(Arc::clone(&storage), &config);
        store.set_jobs(vec![generator().job("1")]);

        let saved: Option<Snapshot> = get_json(storage.as_ref(), "talentflow-state").unwrap();
        assert_eq!(saved.and_then(|s| s.jobs).map(|j| j.len()), Some(1));
    }
}
