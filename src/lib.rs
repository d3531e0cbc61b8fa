mod counter;
mod options;
mod record;
mod sequence;

pub use counter::{Counter, CounterStore, InMemoryCounterStore, StoreError};
pub use options::{Affix, ConfigError, RawOptions, SequenceOptions, ValueKind};
pub use record::{Document, FieldValue, Record};
pub use sequence::{
    Allocation, FieldSpec, ParsedSequence, Sequence, SequenceError, SkipReason,
};
