//! CounterStore - Abstract atomic storage for counters.

use super::{Counter, StoreError};

/// Abstract storage for counters. Every operation is atomic with respect
/// to the (model, field) key; the atomic read-modify-write in
/// [`increment_and_get`] is the sole serialization point for concurrent
/// allocations.
///
/// [`increment_and_get`]: CounterStore::increment_and_get
pub trait CounterStore: Send + Sync {
    /// Get the counter for a pair. Returns None if it does not exist.
    fn find(&self, model: &str, field: &str) -> Result<Option<Counter>, StoreError>;

    /// Get the counter, creating it with `count = start - increment` when
    /// absent so the first increment yields exactly `start`. Concurrent
    /// first allocations for the same pair must not create two counters.
    fn get_or_init(
        &self,
        model: &str,
        field: &str,
        start: i64,
        increment: i64,
    ) -> Result<Counter, StoreError>;

    /// Atomically add `delta` to the count and return the new value. The
    /// allocation primitive: concurrent callers each observe a distinct
    /// result. Fails with `NotFound` when the counter does not exist.
    fn increment_and_get(&self, model: &str, field: &str, delta: i64) -> Result<i64, StoreError>;

    /// Upsert `count = start - increment`, restarting the sequence.
    /// Already-formatted records are not touched.
    fn reset(
        &self,
        model: &str,
        field: &str,
        start: i64,
        increment: i64,
    ) -> Result<Counter, StoreError>;
}
