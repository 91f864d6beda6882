//! # Datamart Registry
//!
//! The Data Registry component: the canonical record of each dataset's
//! identity, owner, type, description, price, quality score, and creation
//! time.
//!
//! Mutations are gated by relationship to the record: price updates require
//! the owner, quality-score updates require the configured scoring
//! authority. Records are never deleted and ids are never reused.

pub mod error;
pub mod registry;

pub use error::{RegistryError, Result};
pub use registry::{DataRegistry, RegistryConfig};
