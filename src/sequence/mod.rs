//! Sequences - Registration and the allocation hook.
//!
//! A [`Sequence`] binds one resolved options record to a counter store and
//! exposes the operations the host attaches to its schema: the pre-save
//! allocation hook, explicit allocation, parsing, version bumping, and a
//! schema-level reset.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sequenced::{InMemoryCounterStore, RawOptions, Sequence};
//!
//! let store = Arc::new(InMemoryCounterStore::new());
//! let sequence = Sequence::register(store, RawOptions::new("Invoice", "number"))?;
//!
//! let mut invoice = Document::new();
//! sequence.before_save(&mut invoice)?;
//! assert_eq!(invoice.get("number"), Some(FieldValue::Number(1)));
//! ```

mod format;
mod parse;

use std::fmt;
use std::sync::Arc;

use crate::counter::{Counter, CounterStore, StoreError};
use crate::options::{ConfigError, RawOptions, SequenceOptions, ValueKind};
use crate::record::{FieldValue, Record};

use format::{compose_value, format_value};
use parse::parse_value;

pub use parse::ParsedSequence;

/// Error type for sequence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// The counter store failed; the triggering record save must fail too.
    Store(StoreError),
    /// The target field holds no value to parse.
    FieldUnset { field: String },
    /// The stored value does not decompose under the current options.
    Malformed { field: String, value: String },
    /// A version operation on a sequence registered without versions.
    NotVersioned,
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::Store(err) => write!(f, "{}", err),
            SequenceError::FieldUnset { field } => {
                write!(f, "sequence field `{}` is unset", field)
            }
            SequenceError::Malformed { field, value } => {
                write!(f, "sequence field `{}` holds malformed value \"{}\"", field, value)
            }
            SequenceError::NotVersioned => {
                write!(f, "sequence was registered without versions")
            }
        }
    }
}

impl std::error::Error for SequenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SequenceError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for SequenceError {
    fn from(err: StoreError) -> Self {
        SequenceError::Store(err)
    }
}

/// Outcome of one pre-save hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allocation {
    /// A counter was allocated and the field assigned.
    Assigned { raw: i64, value: FieldValue },
    /// Nothing was touched; the record proceeds unchanged.
    Skipped(SkipReason),
}

impl Allocation {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Allocation::Skipped(_))
    }
}

/// Why an allocation was skipped. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The record has already been persisted once.
    NotNew,
    /// The caller supplied a value before the first save.
    AlreadySet,
}

/// The field definition a registration adds to the host schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: ValueKind,
    pub required: bool,
    pub unique: bool,
}

/// A registered sequence: one options record bound to one counter store.
///
/// Cheap to clone and safe to share across threads; the options are never
/// mutated after registration and the store serializes all allocations.
#[derive(Clone)]
pub struct Sequence {
    options: SequenceOptions,
    store: Arc<dyn CounterStore>,
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Sequence {
    /// Validate options and bind the sequence to a counter store.
    ///
    /// Fails synchronously with [`ConfigError`] before any store
    /// interaction. The store is explicit rather than a process-wide
    /// singleton so independent stores (and tests) stay isolated.
    pub fn register(store: Arc<dyn CounterStore>, raw: RawOptions) -> Result<Self, ConfigError> {
        let options = SequenceOptions::resolve(raw)?;
        Ok(Sequence { options, store })
    }

    pub fn options(&self) -> &SequenceOptions {
        &self.options
    }

    /// The field definition the host schema should add for this sequence.
    pub fn field_spec(&self) -> FieldSpec {
        FieldSpec {
            name: self.options.field_name.clone(),
            kind: self.options.value_kind,
            required: true,
            unique: self.options.unique,
        }
    }

    /// The pre-save hook: allocate and assign the next formatted value.
    ///
    /// Skips (without touching the counter) when the record is not new or
    /// the field already holds a value. The atomic counter increment is
    /// also the counter persist: once it succeeds the value is allocated,
    /// and a subsequent host-save failure burns it rather than rolling it
    /// back. A store failure here must fail the record save; the field is
    /// only assigned after the store calls succeed.
    pub fn before_save(&self, record: &mut dyn Record) -> Result<Allocation, SequenceError> {
        if !record.is_new() {
            return Ok(Allocation::Skipped(SkipReason::NotNew));
        }
        if record.get(&self.options.field_name).is_some() {
            return Ok(Allocation::Skipped(SkipReason::AlreadySet));
        }

        let opts = &self.options;
        self.store
            .get_or_init(&opts.model_name, &opts.field_name, opts.start, opts.increment)?;
        let mut raw =
            self.store
                .increment_and_get(&opts.model_name, &opts.field_name, opts.increment)?;

        // Wraparound: past the threshold the stored counter restarts at
        // `start` and the allocation is retaken, so formatted values cycle
        // start..=reset_after. Collisions with earlier cycles are possible;
        // hosts enabling this must drop the uniqueness constraint or accept
        // them.
        if opts.reset_after > 0 && raw > opts.reset_after {
            self.store
                .reset(&opts.model_name, &opts.field_name, opts.start, opts.increment)?;
            raw = self
                .store
                .increment_and_get(&opts.model_name, &opts.field_name, opts.increment)?;
        }

        let value = format_value(opts, raw, record);
        record.set(&opts.field_name, value.clone());

        Ok(Allocation::Assigned { raw, value })
    }

    /// Explicitly run the allocation outside the pre-save hook. Resolves
    /// once the field has been set (or the allocation was skipped).
    pub fn next_sequence(&self, record: &mut dyn Record) -> Result<Allocation, SequenceError> {
        self.before_save(record)
    }

    /// Split the record's formatted value back into its parts.
    pub fn parse_sequence(&self, record: &dyn Record) -> Result<ParsedSequence, SequenceError> {
        parse_value(&self.options, record)
    }

    /// Bump the embedded version by one, keeping the counter portion.
    ///
    /// Re-parses the current field value, reformats with the existing
    /// counter and the incremented version, and reassigns the field. The
    /// counter store is not touched.
    pub fn next_version(&self, record: &mut dyn Record) -> Result<FieldValue, SequenceError> {
        if !self.options.has_version {
            return Err(SequenceError::NotVersioned);
        }

        let parsed = parse_value(&self.options, record)?;
        let version = parsed.version.ok_or_else(|| SequenceError::Malformed {
            field: self.options.field_name.clone(),
            value: parsed.counter.to_string(),
        })?;

        let counter = parsed.counter.to_string();
        let value = compose_value(&self.options, &counter, version + 1, record);
        record.set(&self.options.field_name, value.clone());

        Ok(value)
    }

    /// Restart the sequence at `start`. Already-formatted records keep
    /// their values.
    pub fn reset_sequence(&self) -> Result<Counter, StoreError> {
        let opts = &self.options;
        self.store
            .reset(&opts.model_name, &opts.field_name, opts.start, opts.increment)
    }
}
