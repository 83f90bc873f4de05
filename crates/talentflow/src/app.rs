//! Wiring of configuration, backend, storage and store.

use std::path::Path;
use std::sync::Arc;

use crate::backend::MockBackend;
use crate::config::{load_config, validate_config, Config};
use crate::db::default_database_path;
use crate::error::Result;
use crate::storage::{KeyValueStore, MemoryStore, SqliteStore};
use crate::store::AppStore;
use crate::view::{AssessmentsPage, CandidatesPage, Dashboard, JobsPage};

/// Everything a running client needs.
pub struct AppState {
    pub config: Config,
    pub backend: Arc<MockBackend>,
    pub store: AppStore,
}

impl AppState {
    /// Opens on-device storage at `storage.path`, or at the default
    /// database path when unset.
    ///
    /// Falls back to process-lifetime storage when no home directory can
    /// be found. The config is validated before anything is opened.
    pub fn open(config: Config) -> Result<Self> {
        validate_config(&config)?;
        let path = config.storage.path.clone().or_else(default_database_path);
        let storage: Arc<dyn KeyValueStore> = match path {
            Some(path) => {
                log::info!("Opening storage at {}", path.display());
                Arc::new(SqliteStore::open(&path)?)
            }
            None => {
                log::warn!("No home directory found, keeping state in memory");
                Arc::new(MemoryStore::new())
            }
        };
        Self::with_storage(config, storage)
    }

    /// Loads the JSON config at `path`, then [`open`](Self::open)s.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = load_config(path)?;
        Self::open(config)
    }

    /// Keeps all state in memory.
    pub fn in_memory(config: Config) -> Result<Self> {
        Self::with_storage(config, Arc::new(MemoryStore::new()))
    }

    pub fn with_storage(config: Config, storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let backend = Arc::new(MockBackend::new(&config)?);
        let store = AppStore::open(storage, &config.storage);
        Ok(Self {
            config,
            backend,
            store,
        })
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
