//! Error types for the Access & Purchase Ledger.

use datamart_core::{DataId, Principal, Timestamp};
use datamart_registry::RegistryError;
use datamart_store::StoreError;
use thiserror::Error;

/// Errors that can occur during ledger operations.
///
/// Like the registry's errors, every domain variant is terminal for the
/// invocation; the caller decides its own remediation (re-grant, re-quote,
/// resubmit with more funds).
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The referenced record id does not exist in the Data Registry.
    #[error("record not found: {0}")]
    NotFound(DataId),

    /// The caller lacks the required relationship: a non-owner issuing a
    /// grant, or an absent/ungranted access check.
    #[error("unauthorized: {principal} has no valid standing on record {data_id}")]
    Unauthorized {
        principal: Principal,
        data_id: DataId,
    },

    /// A grant existed and was valid but its expiration has passed.
    #[error("access to record {data_id} expired at {expired_at} (now {now})")]
    Expired {
        data_id: DataId,
        expired_at: Timestamp,
        now: Timestamp,
    },

    /// The offered payment is below the record's current price.
    #[error("insufficient funds: offered {offered}, price {price}")]
    InsufficientFunds { offered: u64, price: u64 },

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Registry failures observed while the ledger consulted it map onto the
/// ledger's own taxonomy; the two components share the same error kinds.
impl From<RegistryError> for LedgerError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::NotFound(id) => LedgerError::NotFound(id),
            RegistryError::Unauthorized { caller, data_id } => LedgerError::Unauthorized {
                principal: caller,
                data_id,
            },
            // The ledger never registers records, so an empty-owner error
            // can only arise from a misbehaving store; treat it as data
            // corruption rather than a caller fault.
            RegistryError::EmptyOwner => {
                LedgerError::Store(StoreError::InvalidData("record with empty owner".into()))
            }
            RegistryError::Store(e) => LedgerError::Store(e),
        }
    }
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
