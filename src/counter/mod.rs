//! Counters - Durable per-(model, field) allocation state.
//!
//! A [`Counter`] remembers the last raw count handed out for one
//! (model, field) pair. The [`CounterStore`] trait is the capability this
//! crate requires from the persistence engine: find-one-by-key, atomic
//! increment, and create-or-overwrite upsert. Counters are created lazily
//! on first allocation and never deleted.

mod in_memory;
mod store;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Durable last-allocated state for one (model, field) pair. At most one
/// counter exists per pair; the backing store enforces the composite key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub model: String,
    pub field: String,
    pub count: i64,
}

/// Error type for counter store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend-level failure (connectivity, poisoned lock, timeout).
    Backend(String),
    /// Composite-key uniqueness violation.
    Conflict { model: String, field: String },
    /// No counter exists for the pair.
    NotFound { model: String, field: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Backend(msg) => write!(f, "counter store error: {}", msg),
            StoreError::Conflict { model, field } => {
                write!(f, "counter already exists for {}:{}", model, field)
            }
            StoreError::NotFound { model, field } => {
                write!(f, "counter not found for {}:{}", model, field)
            }
        }
    }
}

impl std::error::Error for StoreError {}

pub use in_memory::InMemoryCounterStore;
pub use store::CounterStore;
