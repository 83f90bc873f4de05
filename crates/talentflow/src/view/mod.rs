//! Page controllers.
//!
//! Each page talks to the backend through [`MockBackend::fetch`], mirrors
//! what it loads into the [`AppStore`](crate::store::AppStore), and derives
//! the rows it shows from store state. Failures collapse into one static
//! message per page.
//!
//! [`MockBackend::fetch`]: crate::backend::MockBackend::fetch

pub mod assessments;
pub mod candidates;
pub mod dashboard;
pub mod jobs;
pub mod virtual_list;

pub use assessments::{AssessmentForm, AssessmentsPage};
pub use candidates::CandidatesPage;
pub use dashboard::{Dashboard, DashboardStats};
pub use jobs::{JobForm, JobsPage};
pub use virtual_list::{VirtualItem, VirtualList, ESTIMATED_ROW_SIZE, OVERSCAN};

/// Result of a confirmation-gated delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The confirmation callback declined.
    Cancelled,
    Deleted,
    /// No record with that id.
    Missing,
    /// Removed locally, but the backend refused.
    Failed,
}
