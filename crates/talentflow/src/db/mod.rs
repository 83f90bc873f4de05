//! SQLite file behind [`crate::storage::SqliteStore`].

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

pub mod error;
pub mod kv_repo;
pub mod migrations;

pub use error::DatabaseError;

/// Shared handle to one migrated connection. Clones share the connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Creates missing parent directories, switches the file to WAL and
    /// migrates it.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let db = Self::migrated(conn)?;

        log::info!("Storage database ready at {}", path.display());
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Self::migrated(Connection::open_in_memory()?)
    }

    fn migrated(conn: Connection) -> Result<Self, DatabaseError> {
        migrations::run_all(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` while holding the connection.
    ///
    /// A panic inside an earlier `f` poisons the lock; the connection itself
    /// is still usable, so the poison is logged and cleared.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Connection) -> Result<T, DatabaseError>,
    {
        let conn = self.conn.lock().unwrap_or_else(|poisoned| {
            log::warn!("Storage connection lock was poisoned, recovering");
            poisoned.into_inner()
        });
        f(&conn)
    }
}

/// Returns the canonical database path: `~/.talentflow/data/talentflow.db`.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".talentflow").join("data").join("talentflow.db"))
}
