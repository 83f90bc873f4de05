//! Candidates and the hiring pipeline.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Position of a candidate in the hiring pipeline.
///
/// The variants are ordered; `Rejected` is terminal and sits outside the
/// forward pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Applied,
    Screening,
    Interview,
    Assessment,
    Final,
    Offer,
    Hired,
    Rejected,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::Applied,
        Stage::Screening,
        Stage::Interview,
        Stage::Assessment,
        Stage::Final,
        Stage::Offer,
        Stage::Hired,
        Stage::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Applied => "applied",
            Stage::Screening => "screening",
            Stage::Interview => "interview",
            Stage::Assessment => "assessment",
            Stage::Final => "final",
            Stage::Offer => "offer",
            Stage::Hired => "hired",
            Stage::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Applied => "Applied",
            Stage::Screening => "Phone Screening",
            Stage::Interview => "Interview",
            Stage::Assessment => "Assessment",
            Stage::Final => "Final Interview",
            Stage::Offer => "Offer",
            Stage::Hired => "Hired",
            Stage::Rejected => "Rejected",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Stage::Applied => "#3B82F6",
            Stage::Screening => "#8B5CF6",
            Stage::Interview => "#F59E0B",
            Stage::Assessment => "#EF4444",
            Stage::Final => "#10B981",
            Stage::Offer => "#059669",
            Stage::Hired => "#065F46",
            Stage::Rejected => "#6B7280",
        }
    }

    /// Hired and rejected candidates leave the pipeline.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Hired | Stage::Rejected)
    }

    /// The following pipeline stage, or `None` at a terminal stage.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Applied => Some(Stage::Screening),
            Stage::Screening => Some(Stage::Interview),
            Stage::Interview => Some(Stage::Assessment),
            Stage::Assessment => Some(Stage::Final),
            Stage::Final => Some(Stage::Offer),
            Stage::Offer => Some(Stage::Hired),
            Stage::Hired | Stage::Rejected => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| format!("unknown stage '{}'", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub avatar: String,
    pub location: String,
    /// Years of experience.
    pub experience: u32,
    pub current_role: String,
    pub current_company: String,
    pub stage: Stage,
    /// Owning job. Not checked against the jobs table.
    pub job_id: String,
    pub applied_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    /// 1 to 5.
    pub rating: u8,
    pub notes: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub resume_url: String,
    pub linkedin_url: String,
    pub source: String,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
