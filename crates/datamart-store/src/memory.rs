//! In-memory implementation of the Store trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use datamart_core::{AccessGrant, DataId, DataRecord, NewRecord, Principal, RecordUpdate};

use crate::error::{Result, StoreError};
use crate::traits::Store;

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock;
/// each trait method takes the lock once, so every operation is atomic.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Records indexed by id. BTreeMap keeps owner listings ordered.
    records: BTreeMap<DataId, DataRecord>,

    /// Grants indexed by (data_id, grantee).
    grants: HashMap<(DataId, Principal), AccessGrant>,

    /// Next id to allocate. Only ever incremented.
    next_id: u64,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                records: BTreeMap::new(),
                grants: HashMap::new(),
                next_id: 0,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Poisoned(e.to_string())
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_record(&self, new: NewRecord) -> Result<DataRecord> {
        let mut inner = self.inner.write().map_err(poisoned)?;

        let id = DataId::from_u64(inner.next_id);
        inner.next_id = inner
            .next_id
            .checked_add(1)
            .ok_or(StoreError::IdExhausted)?;

        let record = new.into_record(id);
        inner.records.insert(id, record.clone());

        Ok(record)
    }

    async fn get_record(&self, id: DataId) -> Result<Option<DataRecord>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.records.get(&id).cloned())
    }

    async fn apply_record_update(
        &self,
        id: DataId,
        update: RecordUpdate,
    ) -> Result<Option<DataRecord>> {
        let mut inner = self.inner.write().map_err(poisoned)?;

        match inner.records.get_mut(&id) {
            Some(record) => {
                update.apply(record);
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    async fn record_count(&self) -> Result<u64> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.records.len() as u64)
    }

    async fn list_records_by_owner(&self, owner: &Principal) -> Result<Vec<DataRecord>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner
            .records
            .values()
            .filter(|r| &r.owner == owner)
            .cloned()
            .collect())
    }

    async fn put_grant(&self, grant: &AccessGrant) -> Result<()> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner
            .grants
            .insert((grant.data_id, grant.grantee.clone()), grant.clone());
        Ok(())
    }

    async fn get_grant(&self, id: DataId, grantee: &Principal) -> Result<Option<AccessGrant>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.grants.get(&(id, grantee.clone())).cloned())
    }

    async fn list_grants_for(&self, id: DataId) -> Result<Vec<AccessGrant>> {
        let inner = self.inner.read().map_err(poisoned)?;
        let mut grants: Vec<AccessGrant> = inner
            .grants
            .values()
            .filter(|g| g.data_id == id)
            .cloned()
            .collect();
        grants.sort_by(|a, b| a.grantee.cmp(&b.grantee));
        Ok(grants)
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
    async fn test_sequential_id_allocation() {
        let store = MemoryStore::new();

        let r0 = store.insert_record(sample_new_record("user1", 100)).await.unwrap();
        let r1 = store.insert_record(sample_new_record("user1", 200)).await.unwrap();
        let r2 = store.insert_record(sample_new_record("user2", 300)).await.unwrap();

        assert_eq!(r0.id, DataId::from_u64(0));
        assert_eq!(r1.id, DataId::from_u64(1));
        assert_eq!(r2.id, DataId::from_u64(2));
        assert_eq!(store.record_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_get_missing_record() {
        let store = MemoryStore::new();
        assert!(store.get_record(DataId::from_u64(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_apply_update() {
        let store = MemoryStore::new();
        let record = store.insert_record(sample_new_record("user1", 100)).await.unwrap();

        let updated = store
            .apply_record_update(record.id, RecordUpdate::Price(250))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.price, 250);

        let fetched = store.get_record(record.id).await.unwrap().unwrap();
        assert_eq!(fetched.price, 250);
        assert_eq!(fetched.quality_score, 0);
    }

    #[tokio::test]
    async fn test_apply_update_unknown_id() {
        let store = MemoryStore::new();
        let result = store
            .apply_record_update(DataId::from_u64(7), RecordUpdate::Price(1))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_grant_overwrite() {
        let store = MemoryStore::new();
        let id = DataId::from_u64(0);
        let grantee = Principal::from("user2");

        let first = AccessGrant::issue(id, grantee.clone(), 1_000, 60);
        store.put_grant(&first).await.unwrap();

        let second = AccessGrant::issue(id, grantee.clone(), 2_000, 120);
        store.put_grant(&second).await.unwrap();

        let stored = store.get_grant(id, &grantee).await.unwrap().unwrap();
        assert_eq!(stored, second);

        let all = store.list_grants_for(id).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_list_records_by_owner() {
        let store = MemoryStore::new();
        store.insert_record(sample_new_record("user1", 100)).await.unwrap();
        store.insert_record(sample_new_record("user2", 200)).await.unwrap();
        store.insert_record(sample_new_record("user1", 300)).await.unwrap();

        let mine = store
            .list_records_by_owner(&Principal::from("user1"))
            .await
            .unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine[0].id < mine[1].id);
    }
}
