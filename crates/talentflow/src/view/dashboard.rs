use std::sync::Arc;

use serde::Serialize;

use crate::backend::{MockBackend, MockRequest, StatsOverview};

pub const LOAD_ERROR: &str = "Failed to fetch stats";

/// Figures shown on the dashboard cards.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_jobs: usize,
    pub active_jobs: usize,
    pub total_candidates: usize,
    /// Not tracked; always 0.
    pub recent_applications: usize,
    /// Days. Not tracked; always 30.
    pub average_time_to_hire: u32,
    /// Hired over all candidates, 0 when there are none.
    pub offer_acceptance_rate: f64,
}

impl From<StatsOverview> for DashboardStats {
    fn from(stats: StatsOverview) -> Self {
        let offer_acceptance_rate = if stats.candidates == 0 {
            0.0
        } else {
            stats.hired as f64 / stats.candidates as f64
        };
        Self {
            total_jobs: stats.jobs,
            active_jobs: stats.active_jobs,
            total_candidates: stats.candidates,
            recent_applications: 0,
            average_time_to_hire: 30,
            offer_acceptance_rate,
        }
    }
}

pub struct Dashboard {
    backend: Arc<MockBackend>,
    stats: Option<DashboardStats>,
    loading: bool,
    error: Option<&'static str>,
}

impl Dashboard {
    pub fn new(backend: Arc<MockBackend>) -> Self {
        Self {
            backend,
            stats: None,
            loading: false,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;

        let result = self
            .backend
            .fetch(MockRequest::get(self.backend.url("stats/overview")))
            .await
            .json::<StatsOverview>();

        match result {
            Ok(overview) => {
                self.stats = Some(overview.into());
                self.error = None;
            }
            Err(e) => {
                log::warn!("Loading dashboard stats failed: {}", e);
                self.error = Some(LOAD_ERROR);
            }
        }

        self.loading = false;
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }
}
