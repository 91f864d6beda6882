//! Database schema migrations for SQLite.
//!
//! We use a simple versioned migration system. Each migration is a SQL
//! batch that transforms the schema from version N to N+1.

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Initialize or migrate the database schema.
///
/// This function is idempotent - it can be called multiple times safely.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
        [],
    )?;

    let current: u32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    if current < CURRENT_VERSION {
        let tx = conn.transaction()?;

        for version in (current + 1)..=CURRENT_VERSION {
            apply_migration(&tx, version)?;

            tx.execute(
                "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
                rusqlite::params![version, now_millis()],
            )?;
        }

        tx.commit()?;
    }

    Ok(())
}

/// Apply a specific migration version.
fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
    match version {
        1 => apply_v1(conn),
        _ => Err(StoreError::Migration(format!(
            "unknown migration version: {}",
            version
        ))),
    }
}

/// Migration v1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Canonical record of each registered dataset. Rows are never deleted.
        CREATE TABLE data_records (
            data_id INTEGER PRIMARY KEY,      -- store-allocated, sequential from 0
            owner TEXT NOT NULL,              -- registering principal, immutable
            data_type TEXT NOT NULL,          -- free-form classification
            description TEXT NOT NULL,
            price INTEGER NOT NULL,           -- non-negative, owner-mutable
            quality_score INTEGER NOT NULL DEFAULT 0,  -- authority-mutable
            created_at INTEGER NOT NULL       -- Unix ms at registration
        );

        -- One live grant per (record, grantee) pair. Upserted on re-grant,
        -- never pruned on expiry.
        CREATE TABLE access_grants (
            data_id INTEGER NOT NULL,
            grantee TEXT NOT NULL,
            granted INTEGER NOT NULL DEFAULT 1,
            issued_at INTEGER NOT NULL,       -- Unix ms at issuance
            expires_at INTEGER NOT NULL,      -- issued_at + duration
            PRIMARY KEY (data_id, grantee)
        );

        -- Single-row id counter so allocations survive restarts.
        CREATE TABLE id_counter (
            counter_id INTEGER PRIMARY KEY CHECK (counter_id = 0),
            next_data_id INTEGER NOT NULL
        );
        INSERT INTO id_counter (counter_id, next_data_id) VALUES (0, 0);

        -- Indexes for common queries
        CREATE INDEX idx_records_owner ON data_records(owner);
        CREATE INDEX idx_grants_data_id ON access_grants(data_id);
        CREATE INDEX idx_grants_expires ON access_grants(expires_at);
        "#,
    )?;

    Ok(())
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_creates_tables() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"data_records".to_string()));
        assert!(tables.contains(&"access_grants".to_string()));
        assert!(tables.contains(&"id_counter".to_string()));
        assert!(tables.contains(&"schema_migrations".to_string()));
    }

    #[test]
    fn test_migration_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();
        migrate(&mut conn).unwrap();
        migrate(&mut conn).unwrap();

        let version: u32 = conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn test_counter_seeded_at_zero() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();

        let next: i64 = conn
            .query_row("SELECT next_data_id FROM id_counter WHERE counter_id = 0", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(next, 0);
    }
}
