//! Store trait: the abstract interface for registry persistence.
//!
//! This trait allows the registry and ledger to be storage-agnostic.
//! Implementations include SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use datamart_core::{AccessGrant, DataId, DataRecord, NewRecord, Principal, RecordUpdate};

use crate::error::Result;

/// The Store trait: async interface over two independent keyspaces.
///
/// - record keyspace: `DataId -> DataRecord`, with a monotonic next-id
///   counter owned by the store.
/// - grant keyspace: `(DataId, Principal) -> AccessGrant`.
///
/// # Design Notes
///
/// - **Atomicity**: every method is a single atomic step. In particular,
///   `insert_record` allocates the id and writes the row in one step, and
///   `apply_record_update` performs its read-modify-write under the store's
///   own lock or transaction. Callers never observe half-applied state.
/// - **Ids are never reused**: the counter only moves forward, and records
///   are never deleted. A durable backend must persist the counter so ids
///   survive restarts.
/// - **Grants overwrite**: `put_grant` upserts on the (data_id, grantee)
///   key; there is no grant history.
#[async_trait]
pub trait Store: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Record Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Allocate the next sequential id and insert the record under it.
    ///
    /// Returns the stored record, quality score zeroed and id assigned.
    async fn insert_record(&self, new: NewRecord) -> Result<DataRecord>;

    /// Get a record by id.
    async fn get_record(&self, id: DataId) -> Result<Option<DataRecord>>;

    /// Atomically apply a single-field update to a record.
    ///
    /// Returns the updated record, or `None` if the id is unknown. The
    /// mutation runs inside the store so concurrent writers to the same
    /// record serialize rather than interleave.
    async fn apply_record_update(
        &self,
        id: DataId,
        update: RecordUpdate,
    ) -> Result<Option<DataRecord>>;

    /// Number of records ever registered.
    async fn record_count(&self) -> Result<u64>;

    /// All records registered by the given owner, ordered by id.
    async fn list_records_by_owner(&self, owner: &Principal) -> Result<Vec<DataRecord>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Grant Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert or overwrite the grant for `(grant.data_id, grant.grantee)`.
    async fn put_grant(&self, grant: &AccessGrant) -> Result<()>;

    /// Get the grant for a (record, grantee) pair, expired or not.
    async fn get_grant(&self, id: DataId, grantee: &Principal) -> Result<Option<AccessGrant>>;

    /// All stored grants for a record, ordered by grantee. Expired grants
    /// are included; the store never prunes them.
    async fn list_grants_for(&self, id: DataId) -> Result<Vec<AccessGrant>>;
}
