//! Formatting - Compose the externally visible field value from a raw
//! count.

use crate::options::{SequenceOptions, ValueKind};
use crate::record::{FieldValue, Record};

/// Format a freshly allocated raw count. Pure: the result depends only on
/// the options, the count, and whatever the affix callbacks derive from
/// the record.
pub(crate) fn format_value(
    options: &SequenceOptions,
    raw: i64,
    record: &dyn Record,
) -> FieldValue {
    compose_value(options, &raw.to_string(), options.start_version, record)
}

/// Format an existing counter portion with an explicit version. Used by
/// `next_version`, which keeps the counter and bumps only the version
/// segment.
pub(crate) fn compose_value(
    options: &SequenceOptions,
    counter: &str,
    version: i64,
    record: &dyn Record,
) -> FieldValue {
    let prefix = options.prefix.resolve(record);
    let suffix = options.suffix.resolve(record);

    // A bare numeric counter stays numeric; any decoration forces text.
    if options.value_kind == ValueKind::Numeric
        && prefix.is_empty()
        && suffix.is_empty()
        && !options.has_version
    {
        if let Ok(n) = counter.parse::<i64>() {
            return FieldValue::Number(n);
        }
    }

    let mut value = String::with_capacity(prefix.len() + counter.len() + suffix.len());
    value.push_str(&prefix);
    value.push_str(counter);
    if options.has_version {
        value.push_str(&options.delimiter_version);
        value.push_str(&version.to_string());
        value.push_str(&options.delimiter_version);
    }
    value.push_str(&suffix);

    FieldValue::Text(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Affix, RawOptions};
    use crate::record::Document;

    fn options(raw: RawOptions) -> SequenceOptions {
        SequenceOptions::resolve(RawOptions {
            model_name: Some("Test".into()),
            field_name: Some("seq".into()),
            ..raw
        })
        .unwrap()
    }

    #[test]
    fn bare_numeric_count_stays_numeric() {
        let options = options(RawOptions::default());
        let doc = Document::new();
        assert_eq!(format_value(&options, 7, &doc), FieldValue::Number(7));
    }

    #[test]
    fn textual_kind_formats_as_text() {
        let options = options(RawOptions {
            value_kind: Some(ValueKind::Textual),
            ..RawOptions::default()
        });
        let doc = Document::new();
        assert_eq!(
            format_value(&options, 7, &doc),
            FieldValue::Text("7".into())
        );
    }

    #[test]
    fn literal_affixes_force_text() {
        let options = options(RawOptions {
            start: Some(500),
            prefix: Some(Affix::literal("P")),
            suffix: Some(Affix::literal("S")),
            ..RawOptions::default()
        });
        let doc = Document::new();
        assert_eq!(
            format_value(&options, 500, &doc),
            FieldValue::Text("P500S".into())
        );
    }

    #[test]
    fn computed_affixes_read_the_record() {
        let options = options(RawOptions {
            prefix: Some(Affix::computed(|rec| {
                if rec.get("flag").and_then(|v| v.as_bool()).unwrap_or(false) {
                    "P-TRUE-".into()
                } else {
                    "P-FALSE-".into()
                }
            })),
            suffix: Some(Affix::computed(|rec| {
                if rec.get("flag").and_then(|v| v.as_bool()).unwrap_or(false) {
                    "-S-TRUE".into()
                } else {
                    "-S-FALSE".into()
                }
            })),
            ..RawOptions::default()
        });

        let doc = Document::new().with_field("flag", true);
        assert_eq!(
            format_value(&options, 300, &doc),
            FieldValue::Text("P-TRUE-300-S-TRUE".into())
        );

        let doc = Document::new().with_field("flag", false);
        assert_eq!(
            format_value(&options, 300, &doc),
            FieldValue::Text("P-FALSE-300-S-FALSE".into())
        );
    }

    #[test]
    fn version_segment_sits_between_counter_and_suffix() {
        let options = options(RawOptions {
            prefix: Some(Affix::literal("P")),
            suffix: Some(Affix::literal("S")),
            has_version: Some(true),
            ..RawOptions::default()
        });
        let doc = Document::new();
        assert_eq!(
            format_value(&options, 500, &doc),
            FieldValue::Text("P500-1-S".into())
        );
    }

    #[test]
    fn version_forces_text_even_without_affixes() {
        let options = options(RawOptions {
            has_version: Some(true),
            start_version: Some(4),
            delimiter_version: Some("#".into()),
            ..RawOptions::default()
        });
        let doc = Document::new();
        assert_eq!(
            format_value(&options, 9, &doc),
            FieldValue::Text("9#4#".into())
        );
    }

    #[test]
    fn compose_keeps_existing_counter_portion() {
        let options = options(RawOptions {
            has_version: Some(true),
            ..RawOptions::default()
        });
        let doc = Document::new();
        assert_eq!(
            compose_value(&options, "500", 3, &doc),
            FieldValue::Text("500-3-".into())
        );
    }
}
