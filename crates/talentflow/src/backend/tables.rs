//! In-memory record tables behind the mock backend.

use crate::fixtures::SeedData;
use crate::model::{Assessment, Candidate, Job};

/// Sequential string ids for a collection that accepts creates.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Continues after the largest numeric id in `existing`.
    pub fn after<'a>(existing: impl Iterator<Item = &'a str>) -> Self {
        let max = existing
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self { next: max + 1 }
    }

    pub fn next_id(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        id.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct Tables {
    pub jobs: Vec<Job>,
    pub candidates: Vec<Candidate>,
    pub assessments: Vec<Assessment>,
    job_ids: IdSequence,
    assessment_ids: IdSequence,
}

impl Tables {
    pub fn from_seed(data: SeedData) -> Self {
        let job_ids = IdSequence::after(data.jobs.iter().map(|j| j.id.as_str()));
        let assessment_ids = IdSequence::after(data.assessments.iter().map(|a| a.id.as_str()));

        Self {
            jobs: data.jobs,
            candidates: data.candidates,
            assessments: data.assessments,
            job_ids,
            assessment_ids,
        }
    }

    pub fn next_job_id(&mut self) -> String {
        self.job_ids.next_id()
    }

    pub fn next_assessment_id(&mut self) -> String {
        self.assessment_ids.next_id()
    }

    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn job_mut(&mut self, id: &str) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|j| j.id == id)
    }

    pub fn candidate(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    pub fn candidate_mut(&mut self, id: &str) -> Option<&mut Candidate> {
        self.candidates.iter_mut().find(|c| c.id == id)
    }

    pub fn assessment(&self, id: &str) -> Option<&Assessment> {
        self.assessments.iter().find(|a| a.id == id)
    }

    pub fn assessment_mut(&mut self, id: &str) -> Option<&mut Assessment> {
        self.assessments.iter_mut().find(|a| a.id == id)
    }

    pub fn candidates_for_job(&self, job_id: &str) -> Vec<Candidate> {
        self.candidates
            .iter()
            .filter(|c| c.job_id == job_id)
            .cloned()
            .collect()
    }
}
