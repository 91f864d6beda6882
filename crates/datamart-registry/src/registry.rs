//! The Data Registry: canonical record of dataset ownership and pricing.
//!
//! Every operation is a synchronous request/response over the store; the
//! registry holds no state of its own beyond its configuration. Failure
//! semantics are atomic - an operation either fully applies or reports an
//! error with the record untouched.

use std::sync::Arc;

use tracing::{debug, warn};

use datamart_core::{Clock, DataId, DataRecord, NewRecord, Principal, RecordUpdate};
use datamart_store::Store;

use crate::error::{RegistryError, Result};

/// Configuration for the Data Registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// The principal permitted to set quality scores. Score updates are a
    /// distinct capability: the scoring authority is an independent trusted
    /// actor, not the record owner.
    pub scoring_authority: Principal,
}

impl RegistryConfig {
    pub fn new(scoring_authority: impl Into<Principal>) -> Self {
        Self {
            scoring_authority: scoring_authority.into(),
        }
    }
}

/// The Data Registry component.
///
/// Owns the record keyspace: registration, ownership-checked price updates,
/// authority-checked quality scores, and reads. Grant and purchase logic
/// lives in the ledger, which consults this registry read-only.
pub struct DataRegistry<S: Store, C: Clock> {
    store: Arc<S>,
    clock: Arc<C>,
    config: RegistryConfig,
}

impl<S: Store, C: Clock> DataRegistry<S, C> {
    /// Create a registry over the given store and clock.
    pub fn new(store: Arc<S>, clock: Arc<C>, config: RegistryConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The configured scoring authority.
    pub fn scoring_authority(&self) -> &Principal {
        &self.config.scoring_authority
    }

    /// Register a new data record.
    ///
    /// Allocates the next sequential id (starting at 0, never reused),
    /// stamps the creation date from the clock, and zeroes the quality
    /// score. There is no duplicate detection: registering identical
    /// metadata twice yields two records.
    pub async fn register(
        &self,
        owner: impl Into<Principal>,
        data_type: impl Into<String>,
        description: impl Into<String>,
        price: u64,
    ) -> Result<DataId> {
        let owner = owner.into();
        if owner.is_empty() {
            return Err(RegistryError::EmptyOwner);
        }

        let record = self
            .store
            .insert_record(NewRecord {
                owner,
                data_type: data_type.into(),
                description: description.into(),
                price,
                created_at: self.clock.now(),
            })
            .await?;

        debug!(id = %record.id, owner = %record.owner, price, "registered data record");
        Ok(record.id)
    }

    /// Get a record by id.
    pub async fn get(&self, id: DataId) -> Result<DataRecord> {
        self.store
            .get_record(id)
            .await?
            .ok_or(RegistryError::NotFound(id))
    }

    /// Update a record's price. Owner-gated.
    ///
    /// The record's owner is immutable, so the ownership check cannot be
    /// invalidated between the read and the write; concurrent price writers
    /// serialize inside the store.
    pub async fn update_price(
        &self,
        caller: &Principal,
        id: DataId,
        new_price: u64,
    ) -> Result<()> {
        let record = self.get(id).await?;
        if &record.owner != caller {
            warn!(id = %id, caller = %caller, "rejected price update from non-owner");
            return Err(RegistryError::Unauthorized {
                caller: caller.clone(),
                data_id: id,
            });
        }

        self.store
            .apply_record_update(id, RecordUpdate::Price(new_price))
            .await?
            .ok_or(RegistryError::NotFound(id))?;

        debug!(id = %id, new_price, "updated price");
        Ok(())
    }

    /// Update a record's quality score. Gated on the scoring authority.
    ///
    /// The record owner has no special right here: scoring is performed by
    /// an independent trusted actor named in [`RegistryConfig`].
    pub async fn update_quality_score(
        &self,
        caller: &Principal,
        id: DataId,
        new_score: u64,
    ) -> Result<()> {
        // Existence first: an unknown id reports NotFound even to an
        // unauthorized caller, matching update_price.
        self.get(id).await?;

        if caller != &self.config.scoring_authority {
            warn!(id = %id, caller = %caller, "rejected score update from non-authority");
            return Err(RegistryError::Unauthorized {
                caller: caller.clone(),
                data_id: id,
            });
        }

        self.store
            .apply_record_update(id, RecordUpdate::QualityScore(new_score))
            .await?
            .ok_or(RegistryError::NotFound(id))?;

        debug!(id = %id, new_score, "updated quality score");
        Ok(())
    }

    /// Number of records ever registered.
    pub async fn record_count(&self) -> Result<u64> {
        Ok(self.store.record_count().await?)
    }

    /// All records registered by the given owner, ordered by id.
    pub async fn records_owned_by(&self, owner: &Principal) -> Result<Vec<DataRecord>> {
        Ok(self.store.list_records_by_owner(owner).await?)
    }
}
