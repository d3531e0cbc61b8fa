//! Parsing - Recover prefix, counter, and version from a formatted value.

use serde::Serialize;

use crate::options::SequenceOptions;
use crate::record::{FieldValue, Record};

use super::SequenceError;

/// A formatted field value split back into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedSequence {
    pub prefix: String,
    /// The counter portion. Numeric when the field is stored numerically,
    /// textual otherwise.
    pub counter: FieldValue,
    pub suffix: String,
    /// The embedded version, present only for versioned sequences.
    pub version: Option<i64>,
}

/// Split the record's field value into prefix, counter, suffix, and
/// optional version.
///
/// The exact inverse of formatting for values this crate produced: the
/// prefix and suffix are re-resolved against the current record state and
/// stripped by length. If an affix callback reads record fields that
/// changed since the value was formatted, the recovered counter will be
/// wrong; such fields must stay immutable after creation.
pub(crate) fn parse_value(
    options: &SequenceOptions,
    record: &dyn Record,
) -> Result<ParsedSequence, SequenceError> {
    let prefix = options.prefix.resolve(record);
    let suffix = options.suffix.resolve(record);

    let stored = record
        .get(&options.field_name)
        .ok_or_else(|| SequenceError::FieldUnset {
            field: options.field_name.clone(),
        })?;
    let stored_numeric = matches!(stored, FieldValue::Number(_));
    let text = stored.to_string();

    let malformed = || SequenceError::Malformed {
        field: options.field_name.clone(),
        value: text.clone(),
    };

    let end = text
        .len()
        .checked_sub(suffix.len())
        .filter(|end| *end >= prefix.len())
        .ok_or_else(malformed)?;
    if !text.is_char_boundary(prefix.len()) || !text.is_char_boundary(end) {
        return Err(malformed());
    }
    let inner = &text[prefix.len()..end];

    let (counter_str, version) = if options.has_version {
        let mut parts = inner.splitn(3, options.delimiter_version.as_str());
        let counter = parts.next().ok_or_else(malformed)?;
        let version = parts
            .next()
            .ok_or_else(malformed)?
            .parse::<i64>()
            .map_err(|_| malformed())?;
        (counter.to_string(), Some(version))
    } else {
        (inner.to_string(), None)
    };

    let counter = if stored_numeric {
        FieldValue::Number(counter_str.parse().map_err(|_| malformed())?)
    } else {
        FieldValue::Text(counter_str)
    };

    Ok(ParsedSequence {
        prefix,
        counter,
        suffix,
        version,
    })
}
