//! Options - Per-field sequence configuration.
//!
//! Registration input arrives as a loose [`RawOptions`] bag (built in code
//! or from a JSON mapping) and is resolved into an immutable
//! [`SequenceOptions`] record before any store interaction happens. The
//! resolved record is shared read-only by every allocation for the field.
//!
//! ## Example
//!
//! ```ignore
//! use sequenced::{Affix, RawOptions, SequenceOptions, ValueKind};
//!
//! let options = SequenceOptions::resolve(RawOptions {
//!     model_name: Some("Invoice".into()),
//!     field_name: Some("number".into()),
//!     start: Some(500),
//!     prefix: Some(Affix::literal("P")),
//!     suffix: Some(Affix::literal("S")),
//!     value_kind: Some(ValueKind::Textual),
//!     ..RawOptions::default()
//! })?;
//! ```

mod raw;

use std::fmt;
use std::sync::Arc;

use crate::record::Record;

pub use raw::RawOptions;

/// Representation of the formatted field value.
///
/// Explicit so the storage type never has to be inferred from the value at
/// runtime. A `Numeric` field still becomes textual whenever a prefix,
/// suffix, or version segment is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Numeric,
    Textual,
}

/// A prefix or suffix: absent, a fixed literal, or computed from the
/// owning record at format time.
#[derive(Clone, Default)]
pub enum Affix {
    #[default]
    None,
    Literal(String),
    Computed(Arc<dyn Fn(&dyn Record) -> String + Send + Sync>),
}

impl Affix {
    /// A fixed affix. Non-string literals are stringified, matching the
    /// loose registration input.
    pub fn literal(value: impl fmt::Display) -> Self {
        Affix::Literal(value.to_string())
    }

    /// An affix computed from the record. The fields it reads must be
    /// immutable after creation, or later parsing will recompute a
    /// different affix than the one the stored value was formatted with.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&dyn Record) -> String + Send + Sync + 'static,
    {
        Affix::Computed(Arc::new(f))
    }

    pub(crate) fn resolve(&self, record: &dyn Record) -> String {
        match self {
            Affix::None => String::new(),
            Affix::Literal(s) => s.clone(),
            Affix::Computed(f) => f(record),
        }
    }
}

impl fmt::Debug for Affix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Affix::None => write!(f, "None"),
            Affix::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Affix::Computed(_) => write!(f, "Computed(<fn>)"),
        }
    }
}

/// Error type for invalid registration options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The JSON options value is not an object.
    NotAnObject,
    /// A required option is missing.
    MissingOption { name: &'static str },
    /// An option that must be a non-empty string is empty.
    EmptyOption { name: &'static str },
    /// An option has the wrong JSON type.
    NotAString { name: &'static str },
    NotAnInteger { name: &'static str },
    NotABoolean { name: &'static str },
    /// A prefix/suffix option is neither a string nor a number.
    InvalidAffix { name: &'static str },
    /// `valueType` is not one of "numeric" / "textual".
    UnknownValueKind { value: String },
    /// `increment` is zero; the sequence would never advance.
    ZeroIncrement,
    /// `resetAfter` is negative.
    NegativeResetAfter { value: i64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotAnObject => {
                write!(f, "sequence options must be a key-value mapping")
            }
            ConfigError::MissingOption { name } => {
                write!(f, "sequence options: `{}` is required", name)
            }
            ConfigError::EmptyOption { name } => {
                write!(f, "sequence options: `{}` must not be empty", name)
            }
            ConfigError::NotAString { name } => {
                write!(f, "sequence options: `{}` must be a string", name)
            }
            ConfigError::NotAnInteger { name } => {
                write!(f, "sequence options: `{}` must be an integer", name)
            }
            ConfigError::NotABoolean { name } => {
                write!(f, "sequence options: `{}` must be a boolean", name)
            }
            ConfigError::InvalidAffix { name } => {
                write!(f, "sequence options: `{}` must be a string or a number", name)
            }
            ConfigError::UnknownValueKind { value } => {
                write!(
                    f,
                    "sequence options: unknown `valueType` \"{}\" (expected \"numeric\" or \"textual\")",
                    value
                )
            }
            ConfigError::ZeroIncrement => {
                write!(f, "sequence options: `increment` must not be zero")
            }
            ConfigError::NegativeResetAfter { value } => {
                write!(f, "sequence options: `resetAfter` must not be negative (got {})", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Fully-resolved per-field configuration. Immutable after resolution.
#[derive(Debug, Clone)]
pub struct SequenceOptions {
    /// Logical owner of the counter.
    pub model_name: String,
    /// The field the sequence drives.
    pub field_name: String,
    /// First allocated count.
    pub start: i64,
    /// Step between consecutive allocations.
    pub increment: i64,
    pub prefix: Affix,
    pub suffix: Affix,
    pub value_kind: ValueKind,
    /// Whether the target field carries a uniqueness constraint.
    pub unique: bool,
    /// Wraparound threshold; 0 disables wraparound.
    pub reset_after: i64,
    pub has_version: bool,
    /// Version embedded at allocation time.
    pub start_version: i64,
    /// Delimiter wrapping the embedded version segment.
    pub delimiter_version: String,
}

impl SequenceOptions {
    /// Validate raw options and apply defaults.
    pub fn resolve(raw: RawOptions) -> Result<Self, ConfigError> {
        let model_name = raw
            .model_name
            .ok_or(ConfigError::MissingOption { name: "modelName" })?;
        if model_name.is_empty() {
            return Err(ConfigError::EmptyOption { name: "modelName" });
        }

        let field_name = raw
            .field_name
            .ok_or(ConfigError::MissingOption { name: "fieldName" })?;
        if field_name.is_empty() {
            return Err(ConfigError::EmptyOption { name: "fieldName" });
        }

        let increment = raw.increment.unwrap_or(1);
        if increment == 0 {
            return Err(ConfigError::ZeroIncrement);
        }

        let reset_after = raw.reset_after.unwrap_or(0);
        if reset_after < 0 {
            return Err(ConfigError::NegativeResetAfter { value: reset_after });
        }

        let has_version = raw.has_version.unwrap_or(false);
        let delimiter_version = raw.delimiter_version.unwrap_or_else(|| "-".to_string());
        if has_version && delimiter_version.is_empty() {
            return Err(ConfigError::EmptyOption {
                name: "delimiterVersion",
            });
        }

        Ok(SequenceOptions {
            model_name,
            field_name,
            start: raw.start.unwrap_or(1),
            increment,
            prefix: raw.prefix.unwrap_or_default(),
            suffix: raw.suffix.unwrap_or_default(),
            value_kind: raw.value_kind.unwrap_or(ValueKind::Numeric),
            unique: raw.unique.unwrap_or(true),
            reset_after,
            has_version,
            start_version: raw.start_version.unwrap_or(1),
            delimiter_version,
        })
    }

    /// Resolve directly from a JSON options mapping.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ConfigError> {
        Self::resolve(RawOptions::from_json(value)?)
    }
}
