use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::storage::{PREFERENCES_KEY, SNAPSHOT_KEY};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub fixtures: FixtureConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            backend: BackendConfig::default(),
            fixtures: FixtureConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Mock backend behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Path prefix of every route, without slashes.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Artificial delay before each response.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Probability that `GET /jobs` answers 500.
    #[serde(default = "default_failure_rate")]
    pub job_list_failure_rate: f64,
    /// Fixed PRNG seed; `None` seeds from the operating system.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_namespace() -> String {
    "api".to_string()
}

fn default_latency_ms() -> u64 {
    400
}

fn default_failure_rate() -> f64 {
    0.05
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            latency_ms: default_latency_ms(),
            job_list_failure_rate: default_failure_rate(),
            seed: None,
        }
    }
}

/// Sizes of the seeded record set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureConfig {
    #[serde(default = "default_jobs")]
    pub jobs: usize,
    #[serde(default = "default_candidates_min")]
    pub candidates_min: usize,
    #[serde(default = "default_candidates_max")]
    pub candidates_max: usize,
    #[serde(default = "default_assessments")]
    pub assessments: usize,
}

fn default_jobs() -> usize {
    25
}

fn default_candidates_min() -> usize {
    5
}

fn default_candidates_max() -> usize {
    40
}

fn default_assessments() -> usize {
    12
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            jobs: default_jobs(),
            candidates_min: default_candidates_min(),
            candidates_max: default_candidates_max(),
            assessments: default_assessments(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database file; `None` uses `~/.talentflow/data/talentflow.db`.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_preferences_key")]
    pub preferences_key: String,
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,
    /// Save a full snapshot after every entity mutation.
    #[serde(default)]
    pub snapshot_on_mutation: bool,
}

fn default_preferences_key() -> String {
    PREFERENCES_KEY.to_string()
}

fn default_snapshot_key() -> String {
    SNAPSHOT_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            preferences_key: default_preferences_key(),
            snapshot_key: default_snapshot_key(),
            snapshot_on_mutation: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
