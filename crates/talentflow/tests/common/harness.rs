//! Test harness for isolated execution.
//!
//! `TestHarness` owns a temporary directory holding the on-device database,
//! a shared mock backend, and hands out stores and pages wired to both.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use talentflow::backend::MockBackend;
use talentflow::config::Config;
use talentflow::storage::SqliteStore;
use talentflow::store::AppStore;
use talentflow::view::{AssessmentsPage, CandidatesPage, Dashboard, JobsPage};

use super::ConfigBuilder;

pub struct TestHarness {
    temp_dir: TempDir,
    /// Database file inside `temp_dir`.
    pub db_path: PathBuf,
    pub config: Config,
    pub backend: Arc<MockBackend>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(ConfigBuilder::new().build())
    }

    pub fn with_config(mut config: Config) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("data").join("talentflow.db");
        config.storage.path = Some(db_path.clone());

        let backend = Arc::new(MockBackend::new(&config).expect("Failed to seed mock backend"));

        Self {
            temp_dir,
            db_path,
            config,
            backend,
        }
    }

    /// Opens a store over the harness database. Each call reads whatever
    /// earlier stores persisted.
    pub fn open_store(&self) -> AppStore {
        let storage = SqliteStore::open(&self.db_path).expect("Failed to open test database");
        AppStore::open(Arc::new(storage), &self.config.storage)
    }

    pub fn jobs_page(&self) -> JobsPage {
        JobsPage::new(Arc::clone(&self.backend))
    }

    pub fn candidates_page(&self) -> CandidatesPage {
        CandidatesPage::new(Arc::clone(&self.backend))
    }

    pub fn assessments_page(&self) -> AssessmentsPage {
        AssessmentsPage::new(Arc::clone(&self.backend))
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(Arc::clone(&self.backend))
    }
}
