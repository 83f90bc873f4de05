//! Builder patterns for creating test configurations.

#![allow(dead_code)]

use talentflow::config::Config;

/// Builder for `Config` instances.
///
/// Defaults suit tests: no latency, no random job-list failures, a fixed
/// seed and a small record set.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.backend.latency_ms = 0;
        config.backend.job_list_failure_rate = 0.0;
        config.backend.seed = Some(42);
        config.fixtures.jobs = 5;
        config.fixtures.candidates_min = 3;
        config.fixtures.candidates_max = 6;
        config.fixtures.assessments = 4;
        Self { config }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.backend.seed = Some(seed);
        self
    }

    pub fn latency_ms(mut self, latency_ms: u64) -> Self {
        self.config.backend.latency_ms = latency_ms;
        self
    }

    pub fn failure_rate(mut self, rate: f64) -> Self {
        self.config.backend.job_list_failure_rate = rate;
        self
    }

    pub fn jobs(mut self, jobs: usize) -> Self {
        self.config.fixtures.jobs = jobs;
        self
    }

    pub fn candidates_per_job(mut self, min: usize, max: usize) -> Self {
        self.config.fixtures.candidates_min = min;
        self.config.fixtures.candidates_max = max;
        self
    }

    pub fn assessments(mut self, assessments: usize) -> Self {
        self.config.fixtures.assessments = assessments;
        self
    }

    pub fn snapshot_on_mutation(mut self, enabled: bool) -> Self {
        self.config.storage.snapshot_on_mutation = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
