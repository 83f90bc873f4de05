use std::sync::Arc;

use serde_json::json;

use super::virtual_list::{VirtualItem, VirtualList};
use crate::backend::{ApiError, CandidatePage, MockBackend, MockRequest};
use crate::model::{Candidate, Stage};
use crate::query::{sort_by_experience, CandidateFiltersPatch, CandidateListParams, PaginationPatch};
use crate::store::AppStore;

pub const LOAD_ERROR: &str = "Failed to fetch candidates";

pub struct CandidatesPage {
    backend: Arc<MockBackend>,
    list: VirtualList,
    error: Option<&'static str>,
}

impl CandidatesPage {
    pub fn new(backend: Arc<MockBackend>) -> Self {
        Self {
            backend,
            list: VirtualList::new(0),
            error: None,
        }
    }

    /// Fetches the page selected by the store's filters and pagination and
    /// mirrors candidates and pagination back into the store.
    pub async fn load(&mut self, store: &mut AppStore) {
        store.set_candidates_loading(true);

        let state = store.state();
        let params = CandidateListParams::from_filters(
            &state.candidate_filters,
            state.candidates_pagination.page,
            state.candidates_pagination.limit,
        );

        match self.fetch_page(&params).await {
            Ok(page) => {
                store.set_candidates(page.candidates);
                store.set_candidates_pagination(PaginationPatch::from(page.pagination));
                self.error = None;
            }
            Err(e) => {
                log::warn!("Loading candidates failed: {}", e);
                self.error = Some(LOAD_ERROR);
            }
        }

        store.set_candidates_loading(false);
        self.sync_list(store);
    }

    async fn fetch_page(&self, params: &CandidateListParams) -> Result<CandidatePage, ApiError> {
        let query = serde_urlencoded::to_string(params)
            .map_err(|e| ApiError::BadRequest(format!("Invalid query: {}", e)))?;
        let uri = format!("{}?{}", self.backend.url("candidates"), query);
        self.backend.fetch(MockRequest::get(uri)).await.json()
    }

    pub fn set_search(&mut self, store: &mut AppStore, search: impl Into<String>) {
        self.change_filters(
            store,
            CandidateFiltersPatch {
                search: Some(search.into()),
                ..Default::default()
            },
        );
    }

    /// `None` shows every stage.
    pub fn set_stage_filter(&mut self, store: &mut AppStore, stage: Option<Stage>) {
        let stage = stage.map(|s| s.as_str().to_string()).unwrap_or_default();
        self.change_filters(
            store,
            CandidateFiltersPatch {
                stage: Some(stage),
                ..Default::default()
            },
        );
    }

    pub fn set_job_filter(&mut self, store: &mut AppStore, job_id: impl Into<String>) {
        self.change_filters(
            store,
            CandidateFiltersPatch {
                job_id: Some(job_id.into()),
                ..Default::default()
            },
        );
    }

    pub fn go_to_page(&mut self, store: &mut AppStore, page: u32) {
        store.set_candidates_pagination(PaginationPatch {
            page: Some(page.max(1)),
            ..Default::default()
        });
    }

    /// Store candidates that pass the current filters, most experienced
    /// first.
    pub fn visible_candidates(&self, store: &AppStore) -> Vec<Candidate> {
        let filters = &store.state().candidate_filters;
        let mut visible: Vec<Candidate> = store
            .candidates()
            .iter()
            .filter(|c| filters.matches(c))
            .cloned()
            .collect();
        sort_by_experience(&mut visible);
        visible
    }

    /// Count of loaded candidates per stage, in pipeline order.
    pub fn stage_counts(&self, store: &AppStore) -> Vec<(Stage, usize)> {
        let candidates = store.candidates();
        Stage::ALL
            .iter()
            .map(|stage| (*stage, candidates.iter().filter(|c| c.stage == *stage).count()))
            .collect()
    }

    /// Moves the candidate locally, then persists the new stage.
    ///
    /// The local move is kept even when the backend refuses.
    pub async fn move_candidate(
        &mut self,
        store: &mut AppStore,
        id: &str,
        stage: Stage,
    ) -> Result<(), ApiError> {
        if !store.move_candidate_to_stage(id, stage) {
            return Err(ApiError::not_found("Candidate", id));
        }
        self.sync_list(store);

        self.backend
            .fetch(MockRequest::patch(
                self.backend.url(&format!("candidates/{}", id)),
                json!({ "stage": stage }),
            ))
            .await
            .error_for_status()
            .map(|_| ())
            .inspect_err(|e| log::error!("Persisting stage of candidate {} failed: {}", id, e))
    }

    pub fn list(&self) -> &VirtualList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut VirtualList {
        &mut self.list
    }

    /// Visible candidates inside the current window, with their placement.
    pub fn rendered_rows(&self, store: &AppStore) -> Vec<(VirtualItem, Candidate)> {
        let visible = self.visible_candidates(store);
        self.list
            .virtual_items()
            .into_iter()
            .filter_map(|item| visible.get(item.index).cloned().map(|c| (item, c)))
            .collect()
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    fn change_filters(&mut self, store: &mut AppStore, patch: CandidateFiltersPatch) {
        store.set_candidate_filters(patch);
        self.go_to_page(store, 1);
        self.sync_list(store);
    }

    fn sync_list(&mut self, store: &AppStore) {
        let count = self.visible_candidates(store).len();
        self.list.set_count(count);
    }
}
