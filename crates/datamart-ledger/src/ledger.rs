//! The Access & Purchase Ledger.
//!
//! Owns the grant keyspace and validates purchases. Record existence,
//! ownership, and pricing are read through the Data Registry - the ledger
//! never mutates registry records.

use std::sync::Arc;

use tracing::{debug, warn};

use datamart_core::{AccessGrant, Clock, DataId, Principal, PurchaseIntent};
use datamart_registry::DataRegistry;
use datamart_store::Store;

use crate::error::{LedgerError, Result};

/// The Access & Purchase Ledger component.
///
/// Grant issuance is owner-gated via the registry. Access checks evaluate
/// existence before expiration: a missing or ungranted row is
/// `Unauthorized`, never `Expired`. Purchase validation is stateless - it
/// emits a [`PurchaseIntent`] and performs no settlement and no grant.
pub struct AccessLedger<S: Store, C: Clock> {
    registry: Arc<DataRegistry<S, C>>,
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S: Store, C: Clock> AccessLedger<S, C> {
    /// Create a ledger sharing the registry's store and clock.
    pub fn new(registry: Arc<DataRegistry<S, C>>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            registry,
            store,
            clock,
        }
    }

    /// Grant `recipient` access to `data_id` for `duration_secs` seconds.
    ///
    /// Only the record's registered owner may grant. The expiration is
    /// fixed from the clock reading at issuance, not at check time; a zero
    /// duration yields an immediately-expired grant. A new grant for the
    /// same (record, recipient) pair overwrites the previous one.
    pub async fn grant_access(
        &self,
        owner: &Principal,
        data_id: DataId,
        recipient: impl Into<Principal>,
        duration_secs: u64,
    ) -> Result<()> {
        let record = self.registry.get(data_id).await?;
        if &record.owner != owner {
            warn!(id = %data_id, caller = %owner, "rejected grant from non-owner");
            return Err(LedgerError::Unauthorized {
                principal: owner.clone(),
                data_id,
            });
        }

        let recipient = recipient.into();
        let grant = AccessGrant::issue(data_id, recipient, self.clock.now(), duration_secs);
        debug!(
            id = %data_id,
            grantee = %grant.grantee,
            expires_at = grant.expires_at,
            "issued access grant"
        );
        self.store.put_grant(&grant).await?;
        Ok(())
    }

    /// Check whether `user` currently holds valid access to `data_id`.
    ///
    /// Read-only: expired grants are reported but never pruned.
    pub async fn check_access(&self, data_id: DataId, user: &Principal) -> Result<()> {
        let grant = self.store.get_grant(data_id, user).await?;

        let grant = match grant {
            Some(g) if g.granted => g,
            // Missing row and ungranted row are the same condition to the
            // caller: no standing at all, which is Unauthorized, not Expired.
            _ => {
                return Err(LedgerError::Unauthorized {
                    principal: user.clone(),
                    data_id,
                })
            }
        };

        let now = self.clock.now();
        if grant.is_expired(now) {
            return Err(LedgerError::Expired {
                data_id,
                expired_at: grant.expires_at,
                now,
            });
        }

        Ok(())
    }

    /// Validate a purchase attempt against the record's current price.
    ///
    /// The price is whatever the registry holds at the moment of the call;
    /// there is no price lock, so an earlier quote may no longer be enough.
    /// On success, returns the transfer intent for a composing system to
    /// settle - no funds move and no access is granted here.
    pub async fn purchase(
        &self,
        buyer: impl Into<Principal>,
        data_id: DataId,
        payment: u64,
    ) -> Result<PurchaseIntent> {
        let record = self.registry.get(data_id).await?;

        if payment < record.price {
            return Err(LedgerError::InsufficientFunds {
                offered: payment,
                price: record.price,
            });
        }

        let buyer = buyer.into();
        debug!(id = %data_id, buyer = %buyer, amount = record.price, "validated purchase");
        Ok(PurchaseIntent {
            buyer,
            data_id,
            seller: record.owner,
            amount: record.price,
            validated_at: self.clock.now(),
        })
    }

    /// All stored grants for a record, expired ones included.
    pub async fn grants_for(&self, data_id: DataId) -> Result<Vec<AccessGrant>> {
        Ok(self.store.list_grants_for(data_id).await?)
    }
}
