use std::sync::Arc;

use serde_json::{json, Value};

use super::DeleteOutcome;
use crate::backend::routes::{JobEnvelope, JobsEnvelope};
use crate::backend::{ApiError, MockBackend, MockRequest};
use crate::model::{Job, JobPriority, JobStatus};
use crate::query::JobFilters;
use crate::store::AppStore;

pub const LOAD_ERROR: &str = "Failed to fetch jobs";
pub const DELETE_PROMPT: &str = "Are you sure you want to archive this job?";
pub const DELETE_ALERT: &str = "Error deleting job. Please try again.";

/// Fields of the create-job form. New jobs always start active.
#[derive(Debug, Clone)]
pub struct JobForm {
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub priority: JobPriority,
    pub salary_min: u32,
    pub salary_max: u32,
}

impl Default for JobForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            department: String::new(),
            location: String::new(),
            employment_type: "Full-time".to_string(),
            priority: JobPriority::Medium,
            salary_min: 0,
            salary_max: 0,
        }
    }
}

impl JobForm {
    pub fn to_attrs(&self) -> Value {
        json!({
            "title": self.title,
            "department": self.department,
            "location": self.location,
            "type": self.employment_type,
            "status": JobStatus::Active,
            "priority": self.priority,
            "salary": {
                "min": self.salary_min,
                "max": self.salary_max,
                "currency": "USD",
            },
        })
    }
}

pub struct JobsPage {
    backend: Arc<MockBackend>,
    filters: JobFilters,
    error: Option<&'static str>,
    alert: Option<&'static str>,
}

impl JobsPage {
    pub fn new(backend: Arc<MockBackend>) -> Self {
        Self {
            backend,
            filters: JobFilters::default(),
            error: None,
            alert: None,
        }
    }

    /// Fetches every job and mirrors the list into the store.
    pub async fn load(&mut self, store: &mut AppStore) {
        store.set_jobs_loading(true);

        let result = self
            .backend
            .fetch(MockRequest::get(self.backend.url("jobs")))
            .await
            .json::<JobsEnvelope>();

        match result {
            Ok(envelope) => {
                store.set_jobs(envelope.jobs);
                self.error = None;
            }
            Err(e) => {
                log::warn!("Loading jobs failed: {}", e);
                self.error = Some(LOAD_ERROR);
            }
        }

        store.set_jobs_loading(false);
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
    }

    /// `None` shows every status.
    pub fn set_status_filter(&mut self, status: Option<JobStatus>) {
        self.filters.status = status;
    }

    pub fn filters(&self) -> &JobFilters {
        &self.filters
    }

    pub fn visible_jobs(&self, store: &AppStore) -> Vec<Job> {
        store
            .jobs()
            .iter()
            .filter(|job| self.filters.matches(job))
            .cloned()
            .collect()
    }

    pub async fn create_job(&mut self, store: &mut AppStore, form: &JobForm) -> Result<Job, ApiError> {
        let job = self
            .backend
            .fetch(MockRequest::post(self.backend.url("jobs"), form.to_attrs()))
            .await
            .json::<JobEnvelope>()?
            .job;

        store.add_job(job.clone());
        Ok(job)
    }

    /// Sends `patch` and mirrors the job the backend returns.
    pub async fn edit_job(
        &mut self,
        store: &mut AppStore,
        id: &str,
        patch: &Value,
    ) -> Result<Job, ApiError> {
        let job = self
            .backend
            .fetch(MockRequest::patch(
                self.backend.url(&format!("jobs/{}", id)),
                patch.clone(),
            ))
            .await
            .json::<JobEnvelope>()?
            .job;

        store.update_job(id, &json!(job))?;
        Ok(job)
    }

    /// Removes the job from the store first, then asks the backend.
    ///
    /// A backend failure records [`DELETE_ALERT`] and leaves the local
    /// removal in place.
    pub async fn delete_job<F>(&mut self, store: &mut AppStore, id: &str, confirm: F) -> DeleteOutcome
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(DELETE_PROMPT) {
            return DeleteOutcome::Cancelled;
        }

        store.remove_job(id);

        let response = self
            .backend
            .fetch(MockRequest::delete(self.backend.url(&format!("jobs/{}", id))))
            .await;

        match response.error_for_status() {
            Ok(_) => DeleteOutcome::Deleted,
            Err(e) => {
                log::error!("Deleting job {} failed: {}", id, e);
                self.alert = Some(DELETE_ALERT);
                DeleteOutcome::Failed
            }
        }
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn alert(&self) -> Option<&'static str> {
        self.alert
    }

    pub fn dismiss_alert(&mut self) -> Option<&'static str> {
        self.alert.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_attrs_start_active() {
        let form = JobForm {
            title: "Data Scientist".to_string(),
            priority: JobPriority::Urgent,
            salary_min: 90_000,
            salary_max: 140_000,
            ..Default::default()
        };
        let attrs = form.to_attrs();

        assert_eq!(attrs["status"], "active");
        assert_eq!(attrs["priority"], "urgent");
        assert_eq!(attrs["type"], "Full-time");
        assert_eq!(attrs["salary"]["max"], 140_000);
    }
}
