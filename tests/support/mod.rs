#![allow(dead_code)]

use std::sync::Arc;

use sequenced::{Counter, CounterStore, InMemoryCounterStore, RawOptions, Sequence, StoreError};

/// Register a sequence against a shared in-memory store.
pub fn register(store: &InMemoryCounterStore, raw: RawOptions) -> Sequence {
    Sequence::register(Arc::new(store.clone()), raw).expect("valid options")
}

/// A store whose every operation fails, for error-propagation tests.
pub struct FailingStore;

impl FailingStore {
    fn fail<T>(&self) -> Result<T, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }
}

impl CounterStore for FailingStore {
    fn find(&self, _model: &str, _field: &str) -> Result<Option<Counter>, StoreError> {
        self.fail()
    }

    fn get_or_init(
        &self,
        _model: &str,
        _field: &str,
        _start: i64,
        _increment: i64,
    ) -> Result<Counter, StoreError> {
        self.fail()
    }

    fn increment_and_get(&self, _model: &str, _field: &str, _delta: i64) -> Result<i64, StoreError> {
        self.fail()
    }

    fn reset(
        &self,
        _model: &str,
        _field: &str,
        _start: i64,
        _increment: i64,
    ) -> Result<Counter, StoreError> {
        self.fail()
    }
}
