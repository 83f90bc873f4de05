//! Filter predicates and pagination shared by the backend and the pages.
//!
//! The backend's candidate listing and the candidates page both filter with
//! [`CandidateFilters::matches`], so server-side and client-side results
//! cannot drift apart.

use serde::{Deserialize, Serialize};

use crate::model::{Assessment, Candidate, Job, JobStatus};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 50;

/// Candidate filter selections. Empty strings mean "no filter".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateFilters {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub job_id: String,
}

impl CandidateFilters {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.stage.is_empty() && self.job_id.is_empty()
    }

    /// Exact job id, exact stage, and case-insensitive substring search over
    /// first name, last name and email.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        if !self.job_id.is_empty() && candidate.job_id != self.job_id {
            return false;
        }
        if !self.stage.is_empty() && candidate.stage.as_str() != self.stage {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        candidate.first_name.to_lowercase().contains(&needle)
            || candidate.last_name.to_lowercase().contains(&needle)
            || candidate.email.to_lowercase().contains(&needle)
    }

    /// Applies the `Some` fields of `patch`.
    pub fn apply(&mut self, patch: CandidateFiltersPatch) {
        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(stage) = patch.stage {
            self.stage = stage;
        }
        if let Some(job_id) = patch.job_id {
            self.job_id = job_id;
        }
    }
}

/// Partial update of [`CandidateFilters`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateFiltersPatch {
    pub search: Option<String>,
    pub stage: Option<String>,
    pub job_id: Option<String>,
}

/// Query string of `GET /candidates`.
///
/// Values stay strings so that malformed numbers fall back to defaults
/// instead of failing the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl CandidateListParams {
    pub fn from_filters(filters: &CandidateFilters, page: u32, limit: u32) -> Self {
        Self {
            search: Some(filters.search.clone()),
            stage: Some(filters.stage.clone()),
            job_id: Some(filters.job_id.clone()),
            page: Some(page.to_string()),
            limit: Some(limit.to_string()),
        }
    }

    pub fn filters(&self) -> CandidateFilters {
        CandidateFilters {
            search: self.search.clone().unwrap_or_default(),
            stage: self.stage.clone().unwrap_or_default(),
            job_id: self.job_id.clone().unwrap_or_default(),
        }
    }

    pub fn page(&self) -> u32 {
        parse_positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> u32 {
        parse_positive(self.limit.as_deref()).unwrap_or(DEFAULT_LIMIT)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
}

/// Page cursor as reported by the backend and mirrored by the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            total: 0,
            total_pages: 0,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u32) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit.max(1)),
        }
    }

    pub fn apply(&mut self, patch: PaginationPatch) {
        if let Some(page) = patch.page {
            self.page = page;
        }
        if let Some(limit) = patch.limit {
            self.limit = limit;
        }
        if let Some(total) = patch.total {
            self.total = total;
        }
        if let Some(total_pages) = patch.total_pages {
            self.total_pages = total_pages;
        }
    }
}

/// Partial update of [`Pagination`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationPatch {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub total: Option<u32>,
    pub total_pages: Option<u32>,
}

impl From<Pagination> for PaginationPatch {
    fn from(p: Pagination) -> Self {
        Self {
            page: Some(p.page),
            limit: Some(p.limit),
            total: Some(p.total),
            total_pages: Some(p.total_pages),
        }
    }
}

/// Slices out one page of `items`. Pages start at 1.
pub fn paginate<T: Clone>(items: &[T], page: u32, limit: u32) -> (Vec<T>, Pagination) {
    let page = page.max(1);
    let limit = limit.max(1);
    let offset = (page as usize - 1).saturating_mul(limit as usize);
    let slice = items
        .iter()
        .skip(offset)
        .take(limit as usize)
        .cloned()
        .collect();
    (slice, Pagination::new(page, limit, items.len() as u32))
}

/// Job list filters of the jobs page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilters {
    pub search: String,
    /// `None` shows every status.
    pub status: Option<JobStatus>,
}

impl JobFilters {
    pub fn matches(&self, job: &Job) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = job.title.to_lowercase().contains(&needle)
            || job.department.to_lowercase().contains(&needle);
        let matches_status = self.status.map_or(true, |status| job.status == status);
        matches_search && matches_status
    }
}

/// Case-insensitive search over assessment title and description.
pub fn assessment_matches(search: &str, assessment: &Assessment) -> bool {
    let needle = search.to_lowercase();
    assessment.title.to_lowercase().contains(&needle)
        || assessment.description.to_lowercase().contains(&needle)
}

/// Most experienced first; ties keep their incoming order.
pub fn sort_by_experience(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| b.experience.cmp(&a.experience));
}
