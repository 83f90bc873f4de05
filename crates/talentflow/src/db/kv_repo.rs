//! Key-value repository over the `kv_store` table.

use chrono::Utc;
use rusqlite::params;

use super::{Database, DatabaseError};

/// Returns the stored value for `key`, if any.
pub fn get(db: &Database, key: &str) -> Result<Option<String>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT value FROM kv_store WHERE key = ?1")?;
        let mut rows = stmt.query_map(params![key], |row| row.get::<_, String>(0))?;
        match rows.next() {
            Some(Ok(value)) => Ok(Some(value)),
            Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
            None => Ok(None),
        }
    })
}

/// Inserts or replaces the value for `key`.
pub fn put(db: &Database, key: &str, value: &str) -> Result<(), DatabaseError> {
    let now = Utc::now().to_rfc3339();
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    })
}

/// Deletes `key`. Returns whether a row was removed.
pub fn delete(db: &Database, key: &str) -> Result<bool, DatabaseError> {
    db.with_conn(|conn| {
        let affected = conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    })
}

/// Lists all stored keys in lexical order.
pub fn keys(db: &Database) -> Result<Vec<String>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get() {
        let db = Database::open_in_memory().unwrap();
        put(&db, "talentflow-storage", r#"{"version":0}"#).unwrap();

        let value = get(&db, "talentflow-storage").unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"version":0}"#));
        assert!(get(&db, "missing").unwrap().is_none());
    }

    #[test]
    fn test_put_overwrites() {
        let db = Database::open_in_memory().unwrap();
        put(&db, "k", "one").unwrap();
        put(&db, "k", "two").unwrap();

        assert_eq!(get(&db, "k").unwrap().as_deref(), Some("two"));
        assert_eq!(keys(&db).unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn test_delete() {
        let db = Database::open_in_memory().unwrap();
        put(&db, "k", "v").unwrap();

        assert!(delete(&db, "k").unwrap());
        assert!(!delete(&db, "k").unwrap());
        assert!(get(&db, "k").unwrap().is_none());
    }
}
