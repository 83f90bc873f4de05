//! In-process stand-in for the recruiting REST backend.
//!
//! [`MockBackend`] owns a seeded record set and answers the same operations
//! a real server would, after an artificial delay. The typed methods are the
//! endpoints; [`MockBackend::fetch`] routes HTTP-shaped requests onto them.

pub mod error;
pub mod routes;
pub mod tables;

use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{validate_config, BackendConfig, Config};
use crate::error::ConfigError;
use crate::fixtures::{FixtureGenerator, SeedData};
use crate::model::{
    merge_shallow, Assessment, AssessmentResponseAck, AssessmentSubmission, Candidate, Job,
    JobStatus, Stage,
};
use crate::query::{paginate, CandidateListParams, Pagination};

pub use error::ApiError;
pub use routes::{MockRequest, MockResponse};
pub use tables::Tables;

/// Fields a create request cannot set.
const JOB_CREATE_PROTECTED: &[&str] = &["id", "createdAt", "updatedAt"];
const ID_PROTECTED: &[&str] = &["id"];

// ─── Response payloads ──────────────────────────────────────────────────────

/// A job together with every candidate that applied to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    pub job: Job,
    pub candidates: Vec<Candidate>,
}

/// One page of the filtered candidate list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePage {
    pub candidates: Vec<Candidate>,
    pub pagination: Pagination,
}

/// Headline counts for the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverview {
    pub jobs: usize,
    pub active_jobs: usize,
    pub candidates: usize,
    pub hired: usize,
}

// ─── MockBackend ────────────────────────────────────────────────────────────

pub struct MockBackend {
    config: BackendConfig,
    tables: RwLock<Tables>,
    rng: Mutex<StdRng>,
}

impl MockBackend {
    /// Seeds a fresh record set from `config`.
    ///
    /// With `backend.seed` set, the records and every later random draw
    /// (failures, scores, ids) are reproducible. Fails when `config` does
    /// not pass [`validate_config`].
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        validate_config(config)?;

        let now = Utc::now();
        let mut generator = match config.backend.seed {
            Some(seed) => FixtureGenerator::seeded(seed, now),
            None => FixtureGenerator::from_entropy(now),
        };
        let data = generator.seed(&config.fixtures);

        log::info!(
            "Mock backend seeded with {} jobs, {} candidates, {} assessments",
            data.jobs.len(),
            data.candidates.len(),
            data.assessments.len()
        );

        Ok(Self::with_data(
            config.backend.clone(),
            data,
            generator.into_rng(),
        ))
    }

    /// Serves an explicit record set.
    pub fn with_data(config: BackendConfig, data: SeedData, rng: StdRng) -> Self {
        Self {
            config,
            tables: RwLock::new(Tables::from_seed(data)),
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Absolute request path for `path` under the route namespace.
    pub fn url(&self, path: &str) -> String {
        format!(
            "/{}/{}",
            self.config.namespace.trim_matches('/'),
            path.trim_start_matches('/')
        )
    }

    // ─── Jobs ───────────────────────────────────────────────────────────────

    /// Every job. Fails with a 500 at the configured rate.
    pub async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.simulate_latency().await;

        let rate = self.config.job_list_failure_rate;
        if rate > 0.0 && self.rng().random::<f64>() < rate {
            log::warn!("Simulated server error on job listing");
            return Err(ApiError::ServerError);
        }

        Ok(self.read_tables().jobs.clone())
    }

    pub async fn get_job(&self, id: &str) -> Result<JobDetail, ApiError> {
        self.simulate_latency().await;

        let tables = self.read_tables();
        let job = tables
            .job(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Job", id))?;
        let candidates = tables.candidates_for_job(id);
        Ok(JobDetail { job, candidates })
    }

    /// Stores a job built from whichever fields `attrs` carries.
    pub async fn create_job(&self, attrs: &Value) -> Result<Job, ApiError> {
        self.simulate_latency().await;

        let base = Job::blank(String::new(), Utc::now());
        let mut job = merge_shallow(&base, attrs, JOB_CREATE_PROTECTED)?;

        let mut tables = self.write_tables();
        job.id = tables.next_job_id();
        tables.jobs.push(job.clone());

        log::info!("Created job {} '{}'", job.id, job.title);
        Ok(job)
    }

    pub async fn update_job(&self, id: &str, attrs: &Value) -> Result<Job, ApiError> {
        self.simulate_latency().await;

        let mut tables = self.write_tables();
        let job = tables
            .job_mut(id)
            .ok_or_else(|| ApiError::not_found("Job", id))?;
        let mut updated = merge_shallow(&*job, attrs, ID_PROTECTED)?;
        updated.updated_at = Utc::now();
        *job = updated.clone();

        log::debug!("Updated job {}", id);
        Ok(updated)
    }

    /// Removes the job only. Its candidates keep their `jobId`.
    pub async fn delete_job(&self, id: &str) -> Result<(), ApiError> {
        self.simulate_latency().await;

        let mut tables = self.write_tables();
        let index = tables
            .jobs
            .iter()
            .position(|j| j.id == id)
            .ok_or_else(|| ApiError::not_found("Job", id))?;
        tables.jobs.remove(index);

        log::info!("Deleted job {}", id);
        Ok(())
    }

    // ─── Candidates ─────────────────────────────────────────────────────────

    pub async fn list_candidates(
        &self,
        params: &CandidateListParams,
    ) -> Result<CandidatePage, ApiError> {
        self.simulate_latency().await;

        let filters = params.filters();
        let tables = self.read_tables();
        let matched: Vec<&Candidate> = tables
            .candidates
            .iter()
            .filter(|c| filters.matches(c))
            .collect();
        let (page, pagination) = paginate(&matched, params.page(), params.limit());

        Ok(CandidatePage {
            candidates: page.into_iter().cloned().collect(),
            pagination,
        })
    }

    pub async fn get_candidate(&self, id: &str) -> Result<Candidate, ApiError> {
        self.simulate_latency().await;

        self.read_tables()
            .candidate(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Candidate", id))
    }

    pub async fn update_candidate(&self, id: &str, attrs: &Value) -> Result<Candidate, ApiError> {
        self.simulate_latency().await;

        let mut tables = self.write_tables();
        let candidate = tables
            .candidate_mut(id)
            .ok_or_else(|| ApiError::not_found("Candidate", id))?;
        let updated = merge_shallow(&*candidate, attrs, ID_PROTECTED)?;
        *candidate = updated.clone();

        log::debug!("Updated candidate {}", id);
        Ok(updated)
    }

    // ─── Assessments ────────────────────────────────────────────────────────

    pub async fn list_assessments(&self) -> Result<Vec<Assessment>, ApiError> {
        self.simulate_latency().await;
        Ok(self.read_tables().assessments.clone())
    }

    pub async fn get_assessment(&self, id: &str) -> Result<Assessment, ApiError> {
        self.simulate_latency().await;

        self.read_tables()
            .assessment(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Assessment", id))
    }

    pub async fn create_assessment(&self, attrs: &Value) -> Result<Assessment, ApiError> {
        self.simulate_latency().await;

        let base = Assessment::blank(String::new(), Utc::now());
        let mut assessment = merge_shallow(&base, attrs, ID_PROTECTED)?;

        let mut tables = self.write_tables();
        assessment.id = tables.next_assessment_id();
        tables.assessments.push(assessment.clone());

        log::info!("Created assessment {} '{}'", assessment.id, assessment.title);
        Ok(assessment)
    }

    pub async fn update_assessment(&self, id: &str, attrs: &Value) -> Result<Assessment, ApiError> {
        self.simulate_latency().await;

        let mut tables = self.write_tables();
        let assessment = tables
            .assessment_mut(id)
            .ok_or_else(|| ApiError::not_found("Assessment", id))?;
        let updated = merge_shallow(&*assessment, attrs, ID_PROTECTED)?;
        *assessment = updated.clone();

        Ok(updated)
    }

    pub async fn delete_assessment(&self, id: &str) -> Result<(), ApiError> {
        self.simulate_latency().await;

        let mut tables = self.write_tables();
        let index = tables
            .assessments
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| ApiError::not_found("Assessment", id))?;
        tables.assessments.remove(index);

        log::info!("Deleted assessment {}", id);
        Ok(())
    }

    /// Acknowledges a submission with a random score. Nothing is stored and
    /// the assessment id is not checked.
    pub async fn submit_assessment_response(
        &self,
        assessment_id: &str,
        body: &Value,
    ) -> Result<AssessmentResponseAck, ApiError> {
        self.simulate_latency().await;

        if !body.is_object() {
            return Err(ApiError::BadRequest(
                "Response body must be a JSON object".to_string(),
            ));
        }
        let submission: AssessmentSubmission = serde_json::from_value(body.clone())
            .map_err(|e| ApiError::BadRequest(format!("Invalid response body: {}", e)))?;

        let (id, score) = {
            let mut rng = self.rng();
            let id = uuid::Builder::from_random_bytes(rng.random())
                .into_uuid()
                .to_string();
            (id, rng.random_range(60..=100))
        };

        log::debug!(
            "Scored response {} to assessment {}: {}",
            id,
            assessment_id,
            score
        );

        Ok(AssessmentResponseAck {
            id,
            assessment_id: assessment_id.to_string(),
            candidate_id: submission.candidate_id,
            responses: submission.responses,
            submitted_at: Utc::now(),
            score,
        })
    }

    // ─── Stats ──────────────────────────────────────────────────────────────

    pub async fn stats_overview(&self) -> Result<StatsOverview, ApiError> {
        self.simulate_latency().await;

        let tables = self.read_tables();
        Ok(StatsOverview {
            jobs: tables.jobs.len(),
            active_jobs: tables
                .jobs
                .iter()
                .filter(|j| j.status == JobStatus::Active)
                .count(),
            candidates: tables.candidates.len(),
            hired: tables
                .candidates
                .iter()
                .filter(|c| c.stage == Stage::Hired)
                .count(),
        })
    }

    // ─── Helpers ────────────────────────────────────────────────────────────

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }
    }

    fn read_tables(&self) -> RwLockReadGuard<'_, Tables> {
        match self.tables.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Mock backend table lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write_tables(&self) -> RwLockWriteGuard<'_, Tables> {
        match self.tables.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Mock backend table lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Mock backend rng lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FixtureConfig;
    use rand::SeedableRng;
    use serde_json::json;

    fn backend() -> MockBackend {
        let config = Config {
            backend: BackendConfig {
                latency_ms: 0,
                job_list_failure_rate: 0.0,
                seed: Some(3),
                ..Default::default()
            },
            fixtures: FixtureConfig {
                jobs: 3,
                candidates_min: 2,
                candidates_max: 4,
                assessments: 2,
            },
            ..Default::default()
        };
        MockBackend::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_create_job_assigns_next_id_and_stamps() {
        let backend = backend();
        let job = backend
            .create_job(&json!({"id": "999", "title": "Platform Engineer"}))
            .await
            .unwrap();

        assert_eq!(job.id, "4");
        assert_eq!(job.title, "Platform Engineer");
        assert_eq!(job.status, JobStatus::Active);
        assert_eq!(job.created_at, job.updated_at);
        assert_eq!(backend.list_jobs().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_update_job_merges_and_stamps() {
        let backend = backend();
        let before = backend.get_job("1").await.unwrap().job;
        let after = backend
            .update_job("1", &json!({"status": "closed"}))
            .await
            .unwrap();

        assert_eq!(after.id, "1");
        assert_eq!(after.status, JobStatus::Closed);
        assert_eq!(after.title, before.title);
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn test_bad_patch_leaves_record_untouched() {
        let backend = backend();
        let before = backend.get_candidate("1").await.unwrap();
        let err = backend
            .update_candidate("1", &json!({"stage": "promoted"}))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::BadRequest(_)));
        assert_eq!(backend.get_candidate("1").await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let backend = backend();
        assert_eq!(
            backend.get_job("404").await.unwrap_err(),
            ApiError::not_found("Job", "404")
        );
        assert!(backend.delete_assessment("404").await.is_err());
        assert!(backend.update_candidate("404", &json!({})).await.is_err());
    }

    #[tokio::test]
    async fn test_failure_rate_one_always_fails() {
        let mut config = Config::default();
        config.backend.latency_ms = 0;
        config.backend.job_list_failure_rate = 1.0;
        config.backend.seed = Some(1);
        let backend = MockBackend::new(&config).unwrap();

        for _ in 0..5 {
            assert_eq!(backend.list_jobs().await.unwrap_err(), ApiError::ServerError);
        }
    }

    #[tokio::test]
    async fn test_submission_score_range() {
        let backend = backend();
        for _ in 0..20 {
            let ack = backend
                .submit_assessment_response("1", &json!({"candidateId": "7", "responses": {"1": "a"}}))
                .await
                .unwrap();
            assert!((60..=100).contains(&ack.score));
            assert_eq!(ack.candidate_id.as_deref(), Some("7"));
            assert_eq!(ack.assessment_id, "1");
        }
    }

    #[tokio::test]
    async fn test_stats_overview_counts() {
        let backend = backend();
        let stats = backend.stats_overview().await.unwrap();
        let jobs = backend.list_jobs().await.unwrap();

        assert_eq!(stats.jobs, jobs.len());
        assert_eq!(
            stats.active_jobs,
            jobs.iter().filter(|j| j.status == JobStatus::Active).count()
        );
        assert!(stats.hired <= stats.candidates);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let mut config = Config::default();
        config.backend.latency_ms = 400;
        config.backend.job_list_failure_rate = 0.0;
        config.backend.seed = Some(2);
        let backend = MockBackend::new(&config).unwrap();

        let start = tokio::time::Instant::now();
        backend.list_assessments().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(400));
    }

    #[test]
    fn test_url_joins_namespace() {
        let backend = MockBackend::with_data(
            BackendConfig {
                namespace: "/api/".to_string(),
                ..Default::default()
            },
            SeedData::default(),
            StdRng::seed_from_u64(0),
        );
        assert_eq!(backend.url("jobs/3"), "/api/jobs/3");
        assert_eq!(backend.url("/candidates"), "/api/candidates");
    }

    #[test]
    fn test_new_rejects_inverted_candidate_range() {
        let mut config = Config::default();
        config.fixtures.candidates_min = 10;
        config.fixtures.candidates_max = 5;

        let err = MockBackend::new(&config).err().unwrap();
        assert!(matches!(err, ConfigError::Validation { .. }));
        assert!(err.to_string().contains("candidates_min"));
    }
}
