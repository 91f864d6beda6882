//! The Marketplace: unified API over the registry and the ledger.
//!
//! Both components operate over the same storage substrate and the same
//! clock; the Marketplace wires them together and exposes the six core
//! operations behind a single error type.

use std::path::Path;
use std::sync::Arc;

use datamart_core::{
    AccessGrant, Clock, DataId, DataRecord, Principal, PurchaseIntent, SystemClock,
};
use datamart_ledger::AccessLedger;
use datamart_registry::{DataRegistry, RegistryConfig};
use datamart_store::{MemoryStore, SqliteStore, Store};

use crate::error::Result;

/// The main Marketplace struct.
///
/// Provides a unified API for:
/// - Registering data records and reading them back
/// - Owner-gated price updates and authority-gated quality scores
/// - Issuing and checking time-bounded access grants
/// - Validating purchase attempts against listed prices
pub struct Marketplace<S: Store, C: Clock> {
    registry: Arc<DataRegistry<S, C>>,
    ledger: AccessLedger<S, C>,
}

impl Marketplace<SqliteStore, SystemClock> {
    /// Open a marketplace over a SQLite database at the given path, using
    /// wall-clock time.
    pub fn open(path: impl AsRef<Path>, config: RegistryConfig) -> Result<Self> {
        let store = SqliteStore::open(path)?;
        Ok(Self::new(store, SystemClock::new(), config))
    }
}

impl Marketplace<MemoryStore, SystemClock> {
    /// An ephemeral in-memory marketplace with wall-clock time.
    pub fn in_memory(config: RegistryConfig) -> Self {
        Self::new(MemoryStore::new(), SystemClock::new(), config)
    }
}

impl<S: Store, C: Clock> Marketplace<S, C> {
    /// Assemble a marketplace from a store, a clock, and registry config.
    pub fn new(store: S, clock: C, config: RegistryConfig) -> Self {
        Self::with_shared(Arc::new(store), Arc::new(clock), config)
    }

    /// Assemble from already-shared store and clock handles. Useful when a
    /// test harness needs to keep driving the clock.
    pub fn with_shared(store: Arc<S>, clock: Arc<C>, config: RegistryConfig) -> Self {
        let registry = Arc::new(DataRegistry::new(
            Arc::clone(&store),
            Arc::clone(&clock),
            config,
        ));
        let ledger = AccessLedger::new(Arc::clone(&registry), store, clock);
        Self { registry, ledger }
    }

    /// The underlying Data Registry component.
    pub fn registry(&self) -> &DataRegistry<S, C> {
        &self.registry
    }

    /// The underlying Access & Purchase Ledger component.
    pub fn ledger(&self) -> &AccessLedger<S, C> {
        &self.ledger
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registry Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a new data record; returns its id.
    pub async fn register(
        &self,
        owner: impl Into<Principal>,
        data_type: impl Into<String>,
        description: impl Into<String>,
        price: u64,
    ) -> Result<DataId> {
        Ok(self
            .registry
            .register(owner, data_type, description, price)
            .await?)
    }

    /// Get a record by id.
    pub async fn get(&self, id: DataId) -> Result<DataRecord> {
        Ok(self.registry.get(id).await?)
    }

    /// Update a record's price. Owner-gated.
    pub async fn update_price(&self, caller: &Principal, id: DataId, new_price: u64) -> Result<()> {
        Ok(self.registry.update_price(caller, id, new_price).await?)
    }

    /// Update a record's quality score. Scoring-authority-gated.
    pub async fn update_quality_score(
        &self,
        caller: &Principal,
        id: DataId,
        new_score: u64,
    ) -> Result<()> {
        Ok(self
            .registry
            .update_quality_score(caller, id, new_score)
            .await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ledger Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Grant time-bounded access to a record. Owner-gated.
    pub async fn grant_access(
        &self,
        owner: &Principal,
        data_id: DataId,
        recipient: impl Into<Principal>,
        duration_secs: u64,
    ) -> Result<()> {
        Ok(self
            .ledger
            .grant_access(owner, data_id, recipient, duration_secs)
            .await?)
    }

    /// Check whether a user currently holds valid access to a record.
    pub async fn check_access(&self, data_id: DataId, user: &Principal) -> Result<()> {
        Ok(self.ledger.check_access(data_id, user).await?)
    }

    /// Validate a purchase attempt; on success returns the transfer intent.
    pub async fn purchase(
        &self,
        buyer: impl Into<Principal>,
        data_id: DataId,
        payment: u64,
    ) -> Result<PurchaseIntent> {
        Ok(self.ledger.purchase(buyer, data_id, payment).await?)
    }

    /// All stored grants for a record, expired ones included.
    pub async fn grants_for(&self, data_id: DataId) -> Result<Vec<AccessGrant>> {
        Ok(self.ledger.grants_for(data_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datamart_core::ManualClock;

    #[tokio::test]
    async fn test_marketplace_wiring() {
        let market = Marketplace::with_shared(
            Arc::new(MemoryStore::new()),
            Arc::new(ManualClock::starting_at(1_000)),
            RegistryConfig::new("oracle"),
        );

        let id = market.register("user1", "genomic", "d", 100).await.unwrap();
        assert_eq!(market.get(id).await.unwrap().price, 100);
        assert_eq!(market.registry().record_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_in_memory_constructor() {
        let market = Marketplace::in_memory(RegistryConfig::new("oracle"));
        let id = market.register("user1", "genomic", "d", 10).await.unwrap();
        assert_eq!(id.as_u64(), 0);
    }
}
