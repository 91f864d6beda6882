//! # Datamart
//!
//! The unified API for the datamart system - a permissioned data registry
//! and marketplace. It is the authoritative state machine for who owns
//! what, who may read what, and under what payment terms.
//!
//! ## Key Concepts
//!
//! - **Record**: a registered dataset's metadata entry. Created once,
//!   mutated in place (price, quality score), never deleted.
//! - **Grant**: a time-bounded authorization for one principal to access
//!   one record. Overwritten on re-grant, inert once expired.
//! - **Purchase validation**: the stateless check that an offered payment
//!   meets the current price. Emits a transfer intent; moves no funds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use datamart::{Marketplace, RegistryConfig};
//! use datamart::core::Principal;
//!
//! async fn example() {
//!     let market = Marketplace::open(
//!         "registry.db",
//!         RegistryConfig::new("scoring-oracle"),
//!     )
//!     .unwrap();
//!
//!     let id = market
//!         .register("alice", "genomic", "WGS run 42", 1000)
//!         .await
//!         .unwrap();
//!
//!     let alice = Principal::from("alice");
//!     market.grant_access(&alice, id, "bob", 3600).await.unwrap();
//!     market.check_access(id, &Principal::from("bob")).await.unwrap();
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `datamart::core` - entities, identifiers, and the clock capability
//! - `datamart::store` - storage abstraction, SQLite and memory backends
//! - `datamart::registry` - the Data Registry component
//! - `datamart::ledger` - the Access & Purchase Ledger component

pub mod error;
pub mod marketplace;

// Re-export component crates
pub use datamart_core as core;
pub use datamart_ledger as ledger;
pub use datamart_registry as registry;
pub use datamart_store as store;

// Re-export main types for convenience
pub use error::{MarketError, Result};
pub use marketplace::Marketplace;

// Re-export commonly used component types
pub use datamart_core::{
    AccessGrant, Clock, DataId, DataRecord, ManualClock, Principal, PurchaseIntent, SystemClock,
    Timestamp,
};
pub use datamart_ledger::LedgerError;
pub use datamart_registry::{RegistryConfig, RegistryError};
pub use datamart_store::{MemoryStore, SqliteStore, Store};
