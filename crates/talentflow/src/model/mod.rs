//! Entity records shared by the mock backend and the client store.

pub mod assessment;
pub mod candidate;
pub mod job;
pub mod patch;

pub use assessment::{
    Assessment, AssessmentResponseAck, AssessmentStatus, AssessmentSubmission, AssessmentType,
    Question, QuestionType,
};
pub use candidate::{Candidate, Stage};
pub use job::{HiringManager, Job, JobPriority, JobStatus, Salary};
pub use patch::{merge_shallow, PatchError};
