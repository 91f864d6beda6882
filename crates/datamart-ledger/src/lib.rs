//! # Datamart Ledger
//!
//! The Access & Purchase Ledger component: per-(record, grantee) access
//! grants with expiration, and validation of purchase attempts against a
//! record's listed price.
//!
//! The ledger depends on the Data Registry for record existence, ownership,
//! and pricing, but never mutates registry records. There is no revocation
//! operation: the only way to shrink an existing grant is to overwrite it
//! with a shorter one.

pub mod error;
pub mod ledger;

pub use error::{LedgerError, Result};
pub use ledger::AccessLedger;
