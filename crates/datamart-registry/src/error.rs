//! Error types for the Data Registry.

use datamart_core::{DataId, Principal};
use datamart_store::StoreError;
use thiserror::Error;

/// Errors that can occur during registry operations.
///
/// Domain errors here are terminal for the invocation: they reflect a
/// precondition that failed at call time, never a transient fault, and the
/// registry never retries internally.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The referenced record id does not exist.
    #[error("record not found: {0}")]
    NotFound(DataId),

    /// The caller lacks the required relationship to the record.
    #[error("unauthorized: {caller} may not modify record {data_id}")]
    Unauthorized { caller: Principal, data_id: DataId },

    /// Registration with an empty owner string. Records never carry an
    /// empty owner.
    #[error("owner principal must not be empty")]
    EmptyOwner,

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
