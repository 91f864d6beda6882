//! # Datamart Store
//!
//! Storage abstraction for the datamart registry. Provides a trait-based
//! interface over the two keyspaces the core needs - records by id, grants
//! by (record, grantee) - plus monotonic id allocation.
//!
//! ## Key Types
//!
//! - [`Store`] - the async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - in-memory storage for tests
//!
//! ## Design Notes
//!
//! - **Atomic per-key operations**: every trait method is a single atomic
//!   read-modify-write; callers never observe half-applied state
//! - **Ids never reused**: the next-id counter only moves forward and is
//!   persisted by the SQLite backend
//! - **Grants overwrite**: one live grant per (record, grantee) pair

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::Store;
