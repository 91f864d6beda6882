//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a marketplace over the memory
//! store with a hand-driven clock.

use std::sync::Arc;

use datamart::{Marketplace, RegistryConfig};
use datamart_core::{DataId, ManualClock, Principal};
use datamart_store::MemoryStore;

/// The scoring authority used by all fixtures.
pub const ORACLE: &str = "oracle";

/// Default fixture epoch, an arbitrary instant in late 2023.
pub const EPOCH: i64 = 1_700_000_000_000;

/// A test fixture with a marketplace, its memory store, and a manual clock.
pub struct TestFixture {
    pub market: Marketplace<MemoryStore, ManualClock>,
    pub clock: Arc<ManualClock>,
}

impl TestFixture {
    /// Create a fixture starting at [`EPOCH`].
    pub fn new() -> Self {
        Self::starting_at(EPOCH)
    }

    /// Create a fixture with the clock frozen at the given instant.
    pub fn starting_at(now: i64) -> Self {
        let clock = Arc::new(ManualClock::starting_at(now));
        let market = Marketplace::with_shared(
            Arc::new(MemoryStore::new()),
            Arc::clone(&clock),
            RegistryConfig::new(ORACLE),
        );
        Self { market, clock }
    }

    /// The scoring authority principal.
    pub fn oracle(&self) -> Principal {
        Principal::from(ORACLE)
    }

    /// Register a sample genomic record and return its id.
    pub async fn register_sample(&self, owner: &str, price: u64) -> DataId {
        self.market
            .register(owner, "genomic", "sample record", price)
            .await
            .expect("fixture registration failed")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Distinct principals for multi-party tests.
pub fn parties(count: usize) -> Vec<Principal> {
    (0..count)
        .map(|i| Principal::from(format!("user{}", i + 1)))
        .collect()
}
