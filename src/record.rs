//! Records - The host document surface a sequence binds to.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A value a record field can hold.
///
/// Sequence fields only ever hold `Number` or `Text`; `Bool` exists so
/// computed prefix/suffix callbacks can read flag fields off the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Number(i64),
    Text(String),
    Bool(bool),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Contract a host document must satisfy for a sequence to drive one of
/// its fields.
pub trait Record {
    /// Whether the record has not yet been persisted. Allocation only
    /// happens for new records.
    fn is_new(&self) -> bool;

    /// Read a field. Returns None when the field is unset.
    fn get(&self, field: &str) -> Option<FieldValue>;

    /// Write a field.
    fn set(&mut self, field: &str, value: FieldValue);
}

/// HashMap-backed record for tests and simple hosts.
#[derive(Debug, Clone)]
pub struct Document {
    fields: HashMap<String, FieldValue>,
    persisted: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new, not-yet-persisted document.
    pub fn new() -> Self {
        Document {
            fields: HashMap::new(),
            persisted: false,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Mark the document as persisted; `is_new` reports false afterwards.
    pub fn mark_persisted(&mut self) {
        self.persisted = true;
    }
}

impl Record for Document {
    fn is_new(&self) -> bool {
        !self.persisted
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        self.fields.get(field).cloned()
    }

    fn set(&mut self, field: &str, value: FieldValue) {
        self.fields.insert(field.to_string(), value);
    }
}
