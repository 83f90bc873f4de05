pub mod app;
pub mod backend;
pub mod config;
pub mod db;
pub mod error;
pub mod fixtures;
pub mod logging;
pub mod model;
pub mod query;
pub mod storage;
pub mod store;
pub mod view;

pub use app::AppState;
pub use backend::{ApiError, MockBackend, MockRequest, MockResponse};
pub use config::{load_config, Config};
pub use error::{ConfigError, Result, StorageError, TalentflowError};
pub use fixtures::{FixtureGenerator, SeedData};
pub use logging::init_logging;
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
pub use store::{AppStore, StoreEvent, Theme};
pub use view::{AssessmentsPage, CandidatesPage, Dashboard, JobsPage};
