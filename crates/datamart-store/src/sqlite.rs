//! SQLite implementation of the Store trait.
//!
//! This is the primary storage backend for the datamart registry. It uses
//! rusqlite with bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use datamart_core::{AccessGrant, DataId, DataRecord, NewRecord, Principal, RecordUpdate};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::Store;

/// SQLite-based store implementation.
///
/// Thread-safe via an internal Mutex around the single connection; every
/// operation runs in `spawn_blocking` to avoid blocking the async runtime.
/// Multi-statement operations (id allocation, read-modify-write updates)
/// run inside SQLite transactions, so each trait method is atomic.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path.as_ref())?;
        migration::migrate(&mut conn)?;
        debug!(path = %path.as_ref().display(), "opened sqlite store");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure against the connection on the blocking thread pool.
    async fn on_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|e| StoreError::Poisoned(e.to_string()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| StoreError::Runtime(e.to_string()))?
    }
}

// Helper to convert a row to a DataRecord. Column order must match the
// SELECT lists below.
fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<DataRecord> {
    Ok(DataRecord {
        id: DataId::from_u64(row.get::<_, i64>("data_id")? as u64),
        owner: Principal::from(row.get::<_, String>("owner")?),
        data_type: row.get("data_type")?,
        description: row.get("description")?,
        price: row.get::<_, i64>("price")? as u64,
        quality_score: row.get::<_, i64>("quality_score")? as u64,
        created_at: row.get("created_at")?,
    })
}

// Helper to convert a row to an AccessGrant.
fn row_to_grant(row: &rusqlite::Row<'_>) -> rusqlite::Result<AccessGrant> {
    Ok(AccessGrant {
        data_id: DataId::from_u64(row.get::<_, i64>("data_id")? as u64),
        grantee: Principal::from(row.get::<_, String>("grantee")?),
        granted: row.get::<_, i64>("granted")? != 0,
        issued_at: row.get("issued_at")?,
        expires_at: row.get("expires_at")?,
    })
}

const RECORD_COLUMNS: &str =
    "data_id, owner, data_type, description, price, quality_score, created_at";

const GRANT_COLUMNS: &str = "data_id, grantee, granted, issued_at, expires_at";

#[async_trait]
impl Store for SqliteStore {
    async fn insert_record(&self, new: NewRecord) -> Result<DataRecord> {
        self.on_conn(move |conn| {
            let tx = conn.transaction()?;

            // Allocate the next id and bump the counter in the same
            // transaction as the insert, so a failure leaves both untouched.
            let next: i64 = tx.query_row(
                "SELECT next_data_id FROM id_counter WHERE counter_id = 0",
                [],
                |row| row.get(0),
            )?;

            if next == i64::MAX {
                return Err(StoreError::IdExhausted);
            }

            let record = new.into_record(DataId::from_u64(next as u64));

            tx.execute(
                "INSERT INTO data_records (
                    data_id, owner, data_type, description, price, quality_score, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    next,
                    record.owner.as_str(),
                    &record.data_type,
                    &record.description,
                    record.price as i64,
                    record.quality_score as i64,
                    record.created_at,
                ],
            )?;

            tx.execute(
                "UPDATE id_counter SET next_data_id = ?1 WHERE counter_id = 0",
                params![next + 1],
            )?;

            tx.commit()?;
            Ok(record)
        })
        .await
    }

    async fn get_record(&self, id: DataId) -> Result<Option<DataRecord>> {
        self.on_conn(move |conn| {
            conn.query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM data_records WHERE data_id = ?1"),
                params![id.as_u64() as i64],
                row_to_record,
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
    }

    async fn apply_record_update(
        &self,
        id: DataId,
        update: RecordUpdate,
    ) -> Result<Option<DataRecord>> {
        self.on_conn(move |conn| {
            let tx = conn.transaction()?;

            let changed = match update {
                RecordUpdate::Price(price) => tx.execute(
                    "UPDATE data_records SET price = ?2 WHERE data_id = ?1",
                    params![id.as_u64() as i64, price as i64],
                )?,
                RecordUpdate::QualityScore(score) => tx.execute(
                    "UPDATE data_records SET quality_score = ?2 WHERE data_id = ?1",
                    params![id.as_u64() as i64, score as i64],
                )?,
            };

            if changed == 0 {
                return Ok(None);
            }

            let record = tx.query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM data_records WHERE data_id = ?1"),
                params![id.as_u64() as i64],
                row_to_record,
            )?;

            tx.commit()?;
            Ok(Some(record))
        })
        .await
    }

    async fn record_count(&self) -> Result<u64> {
        self.on_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM data_records", [], |row| row.get(0))?;
            Ok(count as u64)
        })
        .await
    }

    async fn list_records_by_owner(&self, owner: &Principal) -> Result<Vec<DataRecord>> {
        let owner = owner.clone();
        self.on_conn(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {RECORD_COLUMNS} FROM data_records WHERE owner = ?1 ORDER BY data_id"
            ))?;

            let records = stmt
                .query_map(params![owner.as_str()], row_to_record)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(records)
        })
        .await
    }

    async fn put_grant(&self, grant: &AccessGrant) -> Result<()> {
        let grant = grant.clone();
        self.on_conn(move |conn| {
            conn.execute(
                "INSERT INTO access_grants (data_id, grantee, granted, issued_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(data_id, grantee) DO UPDATE SET
                    granted = excluded.granted,
                    issued_at = excluded.issued_at,
                    expires_at = excluded.expires_at",
                params![
                    grant.data_id.as_u64() as i64,
                    grant.grantee.as_str(),
                    grant.granted as i64,
                    grant.issued_at,
                    grant.expires_at,
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn get_grant(&self, id: DataId, grantee: &Principal) -> Result<Option<AccessGrant>> {
        let grantee = grantee.clone();
        self.on_conn(move |conn| {
            conn.query_row(
                &format!(
                    "SELECT {GRANT_COLUMNS} FROM access_grants
                     WHERE data_id = ?1 AND grantee = ?2"
                ),
                params![id.as_u64() as i64, grantee.as_str()],
                row_to_grant,
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
    }

    async fn list_grants_for(&self, id: DataId) -> Result<Vec<AccessGrant>> {
        self.on_conn(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {GRANT_COLUMNS} FROM access_grants WHERE data_id = ?1 ORDER BY grantee"
            ))?;

            let grants = stmt
                .query_map(params![id.as_u64() as i64], row_to_grant)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(grants)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_new_record(owner: &str, price: u64) -> NewRecord {
        NewRecord {
            owner: Principal::from(owner),
            data_type: "genomic".to_string(),
            description: "test record".to_string(),
            price,
            created_at: 1_000,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_record() {
        let store = SqliteStore::open_memory().unwrap();

        let record = store.insert_record(sample_new_record("user1", 100)).await.unwrap();
        assert_eq!(record.id, DataId::from_u64(0));
        assert_eq!(record.quality_score, 0);

        let fetched = store.get_record(record.id).await.unwrap().unwrap();
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn test_sequential_ids() {
        let store = SqliteStore::open_memory().unwrap();

        for expected in 0..5u64 {
            let record = store.insert_record(sample_new_record("user1", 10)).await.unwrap();
            assert_eq!(record.id, DataId::from_u64(expected));
        }
        assert_eq!(store.record_count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_apply_update_and_missing_id() {
        let store = SqliteStore::open_memory().unwrap();
        let record = store.insert_record(sample_new_record("user1", 100)).await.unwrap();

        let updated = store
            .apply_record_update(record.id, RecordUpdate::QualityScore(85))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.quality_score, 85);
        assert_eq!(updated.price, 100);

        let missing = store
            .apply_record_update(DataId::from_u64(42), RecordUpdate::Price(1))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_grant_upsert_overwrites() {
        let store = SqliteStore::open_memory().unwrap();
        let id = DataId::from_u64(0);
        let grantee = Principal::from("user2");

        store
            .put_grant(&AccessGrant::issue(id, grantee.clone(), 1_000, 60))
            .await
            .unwrap();
        store
            .put_grant(&AccessGrant::issue(id, grantee.clone(), 2_000, 120))
            .await
            .unwrap();

        let stored = store.get_grant(id, &grantee).await.unwrap().unwrap();
        assert_eq!(stored.issued_at, 2_000);
        assert_eq!(stored.expires_at, 2_000 + 120 * 1000);

        assert_eq!(store.list_grants_for(id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_id_counter_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.insert_record(sample_new_record("user1", 100)).await.unwrap();
            store.insert_record(sample_new_record("user1", 200)).await.unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let record = store.insert_record(sample_new_record("user1", 300)).await.unwrap();
        assert_eq!(record.id, DataId::from_u64(2));
    }

    #[tokio::test]
    async fn test_list_records_by_owner() {
        let store = SqliteStore::open_memory().unwrap();
        store.insert_record(sample_new_record("user1", 100)).await.unwrap();
        store.insert_record(sample_new_record("user2", 200)).await.unwrap();
        store.insert_record(sample_new_record("user1", 300)).await.unwrap();

        let mine = store
            .list_records_by_owner(&Principal::from("user1"))
            .await
            .unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, DataId::from_u64(0));
        assert_eq!(mine[1].id, DataId::from_u64(2));
    }
}
