//! Assessments and submitted responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentType {
    Quiz,
    Coding,
    Essay,
    Interview,
}

impl AssessmentType {
    pub const ALL: [AssessmentType; 4] = [
        AssessmentType::Quiz,
        AssessmentType::Coding,
        AssessmentType::Essay,
        AssessmentType::Interview,
    ];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentStatus {
    Draft,
    Active,
    Paused,
    Archived,
}

impl AssessmentStatus {
    pub const ALL: [AssessmentStatus; 4] = [
        AssessmentStatus::Draft,
        AssessmentStatus::Active,
        AssessmentStatus::Paused,
        AssessmentStatus::Archived,
    ];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    Text,
    Code,
    Rating,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::MultipleChoice,
        QuestionType::Text,
        QuestionType::Code,
        QuestionType::Rating,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    /// Position within the assessment, starting at 1.
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub question: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: AssessmentType,
    /// Minutes.
    pub duration: u32,
    #[serde(default)]
    pub questions: Vec<Question>,
    pub status: AssessmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Assessment {
    /// An empty draft quiz used as the base for partial creates.
    pub fn blank(id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            kind: AssessmentType::Quiz,
            duration: 30,
            questions: Vec::new(),
            status: AssessmentStatus::Draft,
            created_at: now,
        }
    }

    pub fn required_questions(&self) -> usize {
        self.questions.iter().filter(|q| q.required).count()
    }
}

/// Body of a response submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSubmission {
    #[serde(default)]
    pub candidate_id: Option<String>,
    #[serde(default)]
    pub responses: Value,
}

/// Acknowledgment returned for a submission. Never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponseAck {
    pub id: String,
    pub assessment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_id: Option<String>,
    pub responses: Value,
    pub submitted_at: DateTime<Utc>,
    /// 60 to 100.
    pub score: u8,
}
