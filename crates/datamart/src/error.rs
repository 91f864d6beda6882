//! Error types for the Marketplace facade.

use datamart_ledger::LedgerError;
use datamart_registry::RegistryError;
use datamart_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the Marketplace.
///
/// The facade does not flatten the component taxonomies: callers that need
/// to distinguish, say, `Expired` from `Unauthorized` match through the
/// wrapped component error.
#[derive(Debug, Error)]
pub enum MarketError {
    /// Data Registry error.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Access & Purchase Ledger error.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Storage error raised outside either component.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for Marketplace operations.
pub type Result<T> = std::result::Result<T, MarketError>;
