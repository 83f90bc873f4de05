use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use super::DeleteOutcome;
use crate::backend::routes::AssessmentsEnvelope;
use crate::backend::{MockBackend, MockRequest};
use crate::model::{Assessment, AssessmentStatus, AssessmentType, PatchError, Question};
use crate::query::assessment_matches;
use crate::store::AppStore;

pub const LOAD_ERROR: &str = "Failed to fetch assessments";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this assessment?";

/// Create/edit form. An empty `id` creates a new assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentForm {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: AssessmentType,
    pub duration: u32,
    pub status: AssessmentStatus,
    pub questions: Vec<Question>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Default for AssessmentForm {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            description: String::new(),
            kind: AssessmentType::Quiz,
            duration: 30,
            status: AssessmentStatus::Draft,
            questions: Vec::new(),
            created_at: None,
        }
    }
}

impl From<&Assessment> for AssessmentForm {
    fn from(a: &Assessment) -> Self {
        Self {
            id: a.id.clone(),
            title: a.title.clone(),
            description: a.description.clone(),
            kind: a.kind,
            duration: a.duration,
            status: a.status,
            questions: a.questions.clone(),
            created_at: Some(a.created_at),
        }
    }
}

impl AssessmentForm {
    /// Fills a missing id with a fresh UUID and a missing creation time
    /// with `now`.
    pub fn into_assessment(self, now: DateTime<Utc>) -> Assessment {
        let id = if self.id.is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            self.id
        };
        Assessment {
            id,
            title: self.title,
            description: self.description,
            kind: self.kind,
            duration: self.duration,
            questions: self.questions,
            status: self.status,
            created_at: self.created_at.unwrap_or(now),
        }
    }
}

pub struct AssessmentsPage {
    backend: Arc<MockBackend>,
    search: String,
    error: Option<&'static str>,
}

impl AssessmentsPage {
    pub fn new(backend: Arc<MockBackend>) -> Self {
        Self {
            backend,
            search: String::new(),
            error: None,
        }
    }

    pub async fn load(&mut self, store: &mut AppStore) {
        store.set_assessments_loading(true);

        let result = self
            .backend
            .fetch(MockRequest::get(self.backend.url("assessments")))
            .await
            .json::<AssessmentsEnvelope>();

        match result {
            Ok(envelope) => {
                store.set_assessments(envelope.assessments);
                self.error = None;
            }
            Err(e) => {
                log::warn!("Loading assessments failed: {}", e);
                self.error = Some(LOAD_ERROR);
            }
        }

        store.set_assessments_loading(false);
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn visible_assessments(&self, store: &AppStore) -> Vec<Assessment> {
        store
            .assessments()
            .iter()
            .filter(|a| assessment_matches(&self.search, a))
            .cloned()
            .collect()
    }

    /// Replaces the assessment with the form's id, or puts a new one first.
    /// Local only.
    pub fn submit(&mut self, store: &mut AppStore, form: AssessmentForm) -> Result<Assessment, PatchError> {
        let assessment = form.into_assessment(Utc::now());

        let exists = store.assessments().iter().any(|a| a.id == assessment.id);
        if exists {
            store.update_assessment(&assessment.id, &json!(assessment))?;
        } else {
            store.prepend_assessment(assessment.clone());
        }
        Ok(assessment)
    }

    /// Local only; the backend keeps its copy.
    pub fn delete<F>(&mut self, store: &mut AppStore, id: &str, confirm: F) -> DeleteOutcome
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(DELETE_PROMPT) {
            return DeleteOutcome::Cancelled;
        }
        if store.remove_assessment(id) {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::Missing
        }
    }

    pub fn duplicate(&mut self, store: &mut AppStore, id: &str) -> Option<Assessment> {
        store.duplicate_assessment(id)
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }
}
