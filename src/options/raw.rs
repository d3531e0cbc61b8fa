//! RawOptions - Unvalidated registration input.

use serde_json::Value;

use super::{Affix, ConfigError, ValueKind};

/// The loose options bag handed to registration. Every field is optional;
/// validation and defaulting happen in [`SequenceOptions::resolve`].
///
/// [`SequenceOptions::resolve`]: super::SequenceOptions::resolve
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    pub model_name: Option<String>,
    pub field_name: Option<String>,
    pub start: Option<i64>,
    pub increment: Option<i64>,
    pub prefix: Option<Affix>,
    pub suffix: Option<Affix>,
    pub value_kind: Option<ValueKind>,
    pub unique: Option<bool>,
    pub reset_after: Option<i64>,
    pub has_version: Option<bool>,
    pub start_version: Option<i64>,
    pub delimiter_version: Option<String>,
}

impl RawOptions {
    /// Options with just the required names set.
    pub fn new(model_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        RawOptions {
            model_name: Some(model_name.into()),
            field_name: Some(field_name.into()),
            ..RawOptions::default()
        }
    }

    /// Build raw options from a JSON mapping.
    ///
    /// Type errors are caught here: numbers must be integers (floats and
    /// numeric strings are rejected), names must be strings, flags must be
    /// booleans. Prefix and suffix accept a string or a number literal;
    /// computed affixes can only be attached programmatically. Unknown keys
    /// are ignored.
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let map = value.as_object().ok_or(ConfigError::NotAnObject)?;

        Ok(RawOptions {
            model_name: string_opt(map, "modelName")?,
            field_name: string_opt(map, "fieldName")?,
            start: int_opt(map, "start")?,
            increment: int_opt(map, "increment")?,
            prefix: affix_opt(map, "prefix")?,
            suffix: affix_opt(map, "suffix")?,
            value_kind: kind_opt(map, "valueType")?,
            unique: bool_opt(map, "unique")?,
            reset_after: int_opt(map, "resetAfter")?,
            has_version: bool_opt(map, "hasVersion")?,
            start_version: int_opt(map, "startVersion")?,
            delimiter_version: string_opt(map, "delimiterVersion")?,
        })
    }
}

type JsonMap = serde_json::Map<String, Value>;

fn string_opt(map: &JsonMap, name: &'static str) -> Result<Option<String>, ConfigError> {
    match map.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ConfigError::NotAString { name }),
    }
}

fn int_opt(map: &JsonMap, name: &'static str) -> Result<Option<i64>, ConfigError> {
    match map.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or(ConfigError::NotAnInteger { name }),
    }
}

fn bool_opt(map: &JsonMap, name: &'static str) -> Result<Option<bool>, ConfigError> {
    match map.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ConfigError::NotABoolean { name }),
    }
}

fn affix_opt(map: &JsonMap, name: &'static str) -> Result<Option<Affix>, ConfigError> {
    match map.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(Affix::Literal(s.clone()))),
        Some(Value::Number(n)) => Ok(Some(Affix::Literal(n.to_string()))),
        Some(_) => Err(ConfigError::InvalidAffix { name }),
    }
}

fn kind_opt(map: &JsonMap, name: &'static str) -> Result<Option<ValueKind>, ConfigError> {
    match map.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => match s.as_str() {
            "numeric" => Ok(Some(ValueKind::Numeric)),
            "textual" => Ok(Some(ValueKind::Textual)),
            other => Err(ConfigError::UnknownValueKind {
                value: other.to_string(),
            }),
        },
        Some(other) => Err(ConfigError::UnknownValueKind {
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_reads_all_options() {
        let raw = RawOptions::from_json(&json!({
            "modelName": "Invoice",
            "fieldName": "number",
            "start": 500,
            "increment": 3,
            "prefix": "P",
            "suffix": 9,
            "valueType": "textual",
            "unique": false,
            "resetAfter": 1000,
            "hasVersion": true,
            "startVersion": 2,
            "delimiterVersion": "#",
        }))
        .unwrap();

        assert_eq!(raw.model_name.as_deref(), Some("Invoice"));
        assert_eq!(raw.field_name.as_deref(), Some("number"));
        assert_eq!(raw.start, Some(500));
        assert_eq!(raw.increment, Some(3));
        assert!(matches!(raw.prefix, Some(Affix::Literal(ref s)) if s == "P"));
        assert!(matches!(raw.suffix, Some(Affix::Literal(ref s)) if s == "9"));
        assert_eq!(raw.value_kind, Some(ValueKind::Textual));
        assert_eq!(raw.unique, Some(false));
        assert_eq!(raw.reset_after, Some(1000));
        assert_eq!(raw.has_version, Some(true));
        assert_eq!(raw.start_version, Some(2));
        assert_eq!(raw.delimiter_version.as_deref(), Some("#"));
    }

    #[test]
    fn from_json_rejects_non_object() {
        let err = RawOptions::from_json(&json!("nope")).unwrap_err();
        assert_eq!(err, ConfigError::NotAnObject);
    }

    #[test]
    fn from_json_rejects_float_start() {
        let err = RawOptions::from_json(&json!({
            "modelName": "Test",
            "fieldName": "seq",
            "start": 12.12,
        }))
        .unwrap_err();
        assert_eq!(err, ConfigError::NotAnInteger { name: "start" });
    }

    #[test]
    fn from_json_rejects_string_increment() {
        let err = RawOptions::from_json(&json!({
            "modelName": "Test",
            "fieldName": "seq",
            "increment": "12",
        }))
        .unwrap_err();
        assert_eq!(err, ConfigError::NotAnInteger { name: "increment" });
    }

    #[test]
    fn from_json_rejects_non_string_model_name() {
        let err = RawOptions::from_json(&json!({
            "modelName": 7,
            "fieldName": "seq",
        }))
        .unwrap_err();
        assert_eq!(err, ConfigError::NotAString { name: "modelName" });
    }

    #[test]
    fn from_json_rejects_unknown_value_kind() {
        let err = RawOptions::from_json(&json!({
            "modelName": "Test",
            "fieldName": "seq",
            "valueType": "decimal",
        }))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownValueKind {
                value: "decimal".into()
            }
        );
    }

    #[test]
    fn from_json_ignores_unknown_keys() {
        let raw = RawOptions::from_json(&json!({
            "modelName": "Test",
            "fieldName": "seq",
            "somethingElse": true,
        }))
        .unwrap();
        assert_eq!(raw.model_name.as_deref(), Some("Test"));
    }
}
