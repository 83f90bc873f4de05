//! Versioned schema for the on-device database.
//!
//! `_migrations` records every applied version. A pending version runs in
//! its own transaction together with its bookkeeping row.

use rusqlite::{params, Connection};

use super::error::DatabaseError;

/// `(version, description, sql)`, ascending by version.
const MIGRATIONS: &[(u32, &str, &str)] = &[(
    1,
    "create_kv_store_table",
    include_str!("sql/001_create_kv_store.sql"),
)];

/// Highest version known to this build.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |(version, _, _)| *version)
}

/// Highest version applied to `conn`, 0 for a fresh database.
pub fn applied_version(conn: &Connection) -> Result<u32, DatabaseError> {
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM _migrations",
        [],
        |r| r.get(0),
    )?;
    Ok(version)
}

/// Brings `conn` up to [`latest_version`].
pub fn run_all(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;

    let current = applied_version(conn)?;
    if current > latest_version() {
        log::warn!(
            "Database schema v{} is newer than this build (v{})",
            current,
            latest_version()
        );
    }

    for &(version, description, sql) in MIGRATIONS.iter().filter(|(v, _, _)| *v > current) {
        log::info!("Running migration v{}: {}", version, description);

        let migration_error = |e: rusqlite::Error| DatabaseError::Migration {
            version,
            reason: e.to_string(),
        };
        let tx = conn.unchecked_transaction().map_err(migration_error)?;
        tx.execute_batch(sql).map_err(migration_error)?;
        tx.execute(
            "INSERT INTO _migrations (version, description) VALUES (?1, ?2)",
            params![version, description],
        )
        .map_err(migration_error)?;
        tx.commit().map_err(migration_error)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_database_reaches_latest_version() {
        let conn = Connection::open_in_memory().unwrap();
        run_all(&conn).unwrap();

        assert_eq!(applied_version(&conn).unwrap(), latest_version());
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES ('k', 'v', 'now')",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_rerun_applies_nothing() {
        let conn = Connection::open_in_memory().unwrap();
        run_all(&conn).unwrap();
        run_all(&conn).unwrap();

        let rows: u32 = conn
            .query_row("SELECT COUNT(*) FROM _migrations", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, MIGRATIONS.len() as u32);
    }

    #[test]
    fn test_newer_schema_opens_untouched() {
        let conn = Connection::open_in_memory().unwrap();
        run_all(&conn).unwrap();
        conn.execute(
            "INSERT INTO _migrations (version, description) VALUES (99, 'future')",
            [],
        )
        .unwrap();

        run_all(&conn).unwrap();
        assert_eq!(applied_version(&conn).unwrap(), 99);
    }
}
