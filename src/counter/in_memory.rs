//! InMemoryCounterStore - HashMap-backed counter store for testing and
//! development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{Counter, CounterStore, StoreError};

/// In-memory counter store backed by a HashMap.
///
/// Keyed by the (model, field) pair. Clone-friendly via Arc: clones share
/// storage, so one store can back many sequences.
#[derive(Clone)]
pub struct InMemoryCounterStore {
    storage: Arc<RwLock<HashMap<(String, String), i64>>>,
}

impl Default for InMemoryCounterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCounterStore {
    /// Create a new empty counter store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn make_key(model: &str, field: &str) -> (String, String) {
        (model.to_string(), field.to_string())
    }
}

impl CounterStore for InMemoryCounterStore {
    fn find(&self, model: &str, field: &str) -> Result<Option<Counter>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        Ok(storage
            .get(&Self::make_key(model, field))
            .map(|count| Counter {
                model: model.to_string(),
                field: field.to_string(),
                count: *count,
            }))
    }

    fn get_or_init(
        &self,
        model: &str,
        field: &str,
        start: i64,
        increment: i64,
    ) -> Result<Counter, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        let count = *storage
            .entry(Self::make_key(model, field))
            .or_insert(start - increment);

        Ok(Counter {
            model: model.to_string(),
            field: field.to_string(),
            count,
        })
    }

    fn increment_and_get(&self, model: &str, field: &str, delta: i64) -> Result<i64, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        let count = storage
            .get_mut(&Self::make_key(model, field))
            .ok_or_else(|| StoreError::NotFound {
                model: model.to_string(),
                field: field.to_string(),
            })?;

        *count += delta;
        Ok(*count)
    }

    fn reset(
        &self,
        model: &str,
        field: &str,
        start: i64,
        increment: i64,
    ) -> Result<Counter, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        let count = start - increment;
        storage.insert(Self::make_key(model, field), count);

        Ok(Counter {
            model: model.to_string(),
            field: field.to_string(),
            count,
        })
    }
}
