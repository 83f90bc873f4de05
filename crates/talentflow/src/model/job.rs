//! Job postings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication status of a job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Active,
    Paused,
    Closed,
    Draft,
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Active,
        JobStatus::Paused,
        JobStatus::Closed,
        JobStatus::Draft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Paused => "paused",
            JobStatus::Closed => "closed",
            JobStatus::Draft => "draft",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Active => "Active",
            JobStatus::Paused => "Paused",
            JobStatus::Closed => "Closed",
            JobStatus::Draft => "Draft",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            JobStatus::Active => "#10B981",
            JobStatus::Paused => "#F59E0B",
            JobStatus::Closed => "#6B7280",
            JobStatus::Draft => "#8B5CF6",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum JobPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl JobPriority {
    pub const ALL: [JobPriority; 4] = [
        JobPriority::Low,
        JobPriority::Medium,
        JobPriority::High,
        JobPriority::Urgent,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Salary {
    pub min: u32,
    pub max: u32,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Salary {
    /// `min <= max`. Not enforced on create or update.
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Summary of the hiring manager embedded in each job.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HiringManager {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub department: String,
    pub location: String,
    /// Employment type: Full-time, Part-time, Contract, Intern.
    #[serde(rename = "type")]
    pub employment_type: String,
    pub status: JobStatus,
    pub priority: JobPriority,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub salary: Salary,
    #[serde(default)]
    pub hiring_manager: HiringManager,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// An empty active job used as the base for partial creates.
    pub fn blank(id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            department: String::new(),
            location: String::new(),
            employment_type: String::new(),
            status: JobStatus::Active,
            priority: JobPriority::Medium,
            description: String::new(),
            requirements: Vec::new(),
            salary: Salary {
                min: 0,
                max: 0,
                currency: default_currency(),
            },
            hiring_manager: HiringManager::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_wire_format_is_camel_case() {
        let job = Job::blank("7", Utc::now());
        let value = serde_json::to_value(&job).unwrap();

        assert_eq!(value["id"], "7");
        assert_eq!(value["status"], "active");
        assert!(value.get("type").is_some());
        assert!(value.get("hiringManager").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["salary"]["currency"], "USD");
    }

    #[test]
    fn test_salary_currency_defaults_to_usd() {
        let salary: Salary = serde_json::from_value(json!({"min": 1, "max": 2})).unwrap();
        assert_eq!(salary.currency, "USD");
        assert!(salary.is_ordered());
    }

    #[test]
    fn test_status_display_uses_label() {
        assert_eq!(JobStatus::Paused.to_string(), "Paused");
        assert_eq!(JobStatus::Draft.as_str(), "draft");
    }
}
