//! # Datamart Core
//!
//! Core primitives for the datamart registry: the entities both components
//! operate on, the strong identifier types, and the injected clock.
//!
//! ## Key Types
//!
//! - [`DataId`] / [`Principal`] - strong identifier types
//! - [`DataRecord`] - canonical metadata entry for a registered dataset
//! - [`AccessGrant`] - a time-bounded authorization keyed by (record, grantee)
//! - [`PurchaseIntent`] - the transfer intent emitted by purchase validation
//! - [`Clock`] - the time capability ([`SystemClock`], [`ManualClock`])
//!
//! This crate holds no behavior beyond the entities themselves; the state
//! transitions live in `datamart-registry` and `datamart-ledger`.

pub mod clock;
pub mod grant;
pub mod record;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use grant::{AccessGrant, PurchaseIntent};
pub use record::{DataRecord, NewRecord, RecordUpdate};
pub use types::{DataId, Principal, Timestamp};
