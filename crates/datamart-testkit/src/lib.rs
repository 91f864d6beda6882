//! # Datamart Testkit
//!
//! Testing utilities for the datamart registry.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a ready-made marketplace over the memory store with a
//!   hand-driven clock, so expiration tests never sleep
//! - **Generators**: proptest strategies for principals, registration
//!   parameters, and grant durations
//!
//! ## Test Fixtures
//!
//! ```rust
//! use datamart_testkit::fixtures::TestFixture;
//!
//! # async fn example() {
//! let fixture = TestFixture::new();
//! let id = fixture.register_sample("user1", 100).await;
//! fixture.clock.advance_secs(60);
//! # }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use datamart_testkit::generators::{principal, record_params};
//!
//! proptest! {
//!     #[test]
//!     fn my_property(owner in principal(), params in record_params()) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{parties, TestFixture, EPOCH, ORACLE};
pub use generators::{data_type, duration_secs, principal, record_params, RecordParams};
