//! Shared parsing utilities for all platforms.
//!
//! Parsers work on loosely typed [`serde_json::Value`] records rather than
//! derived structs: a record with one unexpected field type must only cost
//! that record, and the rules for what counts as "missing" (absent, `null`,
//! empty string) differ from serde's defaults.

pub mod discord;
pub mod encoding;
pub mod facebook;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Map, Value};
use tracing::error;

use crate::Message;
use crate::config::ParserConfig;
use crate::error::{ChatechoError, RecordError, Result};

pub use discord::parse_discord_entry;
pub use encoding::fix_encoding;
pub use facebook::parse_facebook_entry;

/// ISO-8601 layouts with an explicit offset, tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// ISO-8601 layouts without an offset; read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Extracts the `messages` array from an export document.
///
/// A missing or `null` `messages` key yields an empty list.
///
/// # Errors
///
/// - [`ChatechoError::Parse`] if `content` is not JSON
/// - [`ChatechoError::InvalidFormat`] if the top level is not an object or
///   `messages` is not an array
pub fn export_entries(content: &str, format: &'static str) -> Result<Vec<Value>> {
    let document: Value =
        serde_json::from_str(content).map_err(|e| ChatechoError::parse(format, e, None))?;

    let Value::Object(mut root) = document else {
        return Err(ChatechoError::invalid_format(
            format,
            "top level is not a JSON object",
        ));
    };

    match root.remove("messages") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(entries)) => Ok(entries),
        Some(_) => Err(ChatechoError::invalid_format(
            format,
            "`messages` is not an array",
        )),
    }
}

/// Runs `parse_entry` over every record, isolating failures.
///
/// `Ok(None)` records are dropped silently. Errors are logged with the
/// record's 1-based ordinal and the loop moves on.
pub fn collect_records<F>(entries: &[Value], mut parse_entry: F) -> Vec<Message>
where
    F: FnMut(&Value) -> std::result::Result<Option<Message>, RecordError>,
{
    let mut messages = Vec::new();

    for (idx, entry) in entries.iter().enumerate() {
        match parse_entry(entry) {
            Ok(Some(message)) => messages.push(message),
            Ok(None) => {}
            Err(err) => log_record_error(idx + 1, &err),
        }
    }

    messages
}

fn log_record_error(ordinal: usize, err: &RecordError) {
    match err {
        RecordError::InvalidTimestamp { raw, .. } => {
            error!("Invalid timestamp format in message #{ordinal}: {raw}");
        }
        other => error!("Error parsing message #{ordinal}: {other}"),
    }
}

/// Reads a name-like string field.
///
/// Absent and blank values (see [`is_blank`]) mean "no value"; any other
/// non-string is a malformed record.
pub(crate) fn optional_text<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> std::result::Result<Option<&'a str>, RecordError> {
    match fields.get(field) {
        None => Ok(None),
        Some(value) if is_blank(value) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(RecordError::field_type(field, "a string")),
    }
}

/// `null`, `false`, zero, `""`, `[]` and `{}`.
///
/// Exports put these where a name is unset, so they count as absent.
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Reads message content that passes the length rule, if any.
///
/// Non-string content is not an error: such records are dropped the same
/// way short ones are.
pub(crate) fn accepted_content<'a>(
    fields: &'a Map<String, Value>,
    config: &ParserConfig,
) -> Option<&'a str> {
    fields
        .get("content")
        .and_then(Value::as_str)
        .filter(|content| config.accepts_content(content))
}

/// Applies encoding repair if the config asks for it.
pub(crate) fn repair(text: &str, config: &ParserConfig) -> String {
    if config.fix_encoding {
        fix_encoding(text)
    } else {
        text.to_owned()
    }
}

/// Parses an ISO-8601 timestamp, keeping the offset it was written with.
///
/// The wall-clock time is never shifted: values without an offset get
/// `+00:00`, and a bare date means midnight.
///
/// # Errors
///
/// Returns the RFC 3339 parse error when no accepted layout matches.
///
/// # Example
///
/// ```rust
/// use chatecho::parsing::parse_iso8601;
///
/// let evening = parse_iso8601("2020-05-01T20:30:00-05:00").unwrap();
/// assert_eq!(evening.to_string(), "2020-05-01 20:30:00 -05:00");
///
/// let naive = parse_iso8601("2020-05-01T10:00:00").unwrap();
/// assert_eq!(naive.to_string(), "2020-05-01 10:00:00 +00:00");
/// assert!(parse_iso8601("yesterday").is_err());
/// ```
pub fn parse_iso8601(raw: &str) -> std::result::Result<DateTime<FixedOffset>, chrono::ParseError> {
    let rfc3339_err = match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => return Ok(dt),
        Err(e) => e,
    };

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Ok(dt);
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt.and_utc().fixed_offset());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset());
    }

    Err(rfc3339_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_export_entries_basic() {
        let entries = export_entries(r#"{"messages": [{"a": 1}, {"b": 2}]}"#, "Test").unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_export_entries_missing_or_null_messages() {
        assert!(export_entries(r#"{"participants": []}"#, "Test").unwrap().is_empty());
        assert!(export_entries(r#"{"messages": null}"#, "Test").unwrap().is_empty());
    }

    #[test]
    fn test_export_entries_invalid_json() {
        let err = export_entries("{not json", "Test JSON").unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("Test JSON"));
    }

    #[test]
    fn test_export_entries_rejects_non_object_top_level() {
        let err = export_entries("[1, 2, 3]", "Test").unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_export_entries_rejects_non_array_messages() {
        let err = export_entries(r#"{"messages": {"0": {}}}"#, "Test").unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_collect_records_isolates_errors() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let entries = vec![json!(1), json!(2), json!(3), json!(4)];
        let messages = collect_records(&entries, |entry| match entry.as_i64() {
            Some(1 | 4) => Ok(Some(Message::new(
                "A",
                entry.to_string(),
                ts,
                crate::parser::Platform::Discord,
            ))),
            Some(2) => Ok(None),
            _ => Err(RecordError::NotAnObject),
        });
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "1");
        assert_eq!(messages[1].content, "4");
    }

    #[test]
    fn test_optional_text() {
        let fields = json!({"a": "x", "b": "", "c": null, "d": 5});
        let fields = fields.as_object().unwrap();
        assert_eq!(optional_text(fields, "a").unwrap(), Some("x"));
        assert_eq!(optional_text(fields, "b").unwrap(), None);
        assert_eq!(optional_text(fields, "c").unwrap(), None);
        assert_eq!(optional_text(fields, "missing").unwrap(), None);
        assert!(optional_text(fields, "d").is_err());
    }

    #[test]
    fn test_optional_text_blank_values_are_absent() {
        let fields = json!({"f": false, "z": 0, "zf": 0.0, "a": [], "o": {}, "t": true, "l": [1]});
        let fields = fields.as_object().unwrap();
        for field in ["f", "z", "zf", "a", "o"] {
            assert_eq!(optional_text(fields, field).unwrap(), None, "{field}");
        }
        assert!(optional_text(fields, "t").is_err());
        assert!(optional_text(fields, "l").is_err());
    }

    #[test]
    fn test_accepted_content() {
        let config = ParserConfig::default();
        let long = json!({"content": "long enough text"});
        let short = json!({"content": "short"});
        let number = json!({"content": 12345678901234_i64});
        assert_eq!(
            accepted_content(long.as_object().unwrap(), &config),
            Some("long enough text")
        );
        assert_eq!(accepted_content(short.as_object().unwrap(), &config), None);
        assert_eq!(accepted_content(number.as_object().unwrap(), &config), None);
    }

    #[test]
    fn test_repair_respects_config() {
        let mojibake = "Ã©tÃ©";
        assert_eq!(repair(mojibake, &ParserConfig::default()), "été");
        let off = ParserConfig::new().with_fix_encoding(false);
        assert_eq!(repair(mojibake, &off), mojibake);
    }

    #[test]
    fn test_parse_iso8601_rfc3339() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(parse_iso8601("2024-01-15T10:30:00+00:00").unwrap(), expected);
        assert_eq!(parse_iso8601("2024-01-15T10:30:00Z").unwrap(), expected);
        assert_eq!(parse_iso8601("2024-01-15T12:30:00+02:00").unwrap(), expected);
    }

    #[test]
    fn test_parse_iso8601_keeps_offset() {
        let parsed = parse_iso8601("2020-05-01T20:30:00-05:00").unwrap();
        assert_eq!(parsed.offset(), &FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(parsed.date_naive(), NaiveDate::from_ymd_opt(2020, 5, 1).unwrap());
        assert_eq!(parsed, Utc.with_ymd_and_hms(2020, 5, 2, 1, 30, 0).unwrap());

        let compact = parse_iso8601("2024-01-15T11:30:00+0100").unwrap();
        assert_eq!(compact.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn test_parse_iso8601_naive_forms_keep_wall_clock() {
        let parsed = parse_iso8601("2020-05-01T23:45:00").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
        assert_eq!(parsed.date_naive(), NaiveDate::from_ymd_opt(2020, 5, 1).unwrap());
    }

    #[test]
    fn test_parse_iso8601_fractional_seconds() {
        let parsed = parse_iso8601("2024-01-15T10:30:00.123+00:00").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn test_parse_iso8601_compact_offset() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(parse_iso8601("2024-01-15T11:30:00+0100").unwrap(), expected);
    }

    #[test]
    fn test_parse_iso8601_naive_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(parse_iso8601("2024-01-15T10:30:00").unwrap(), expected);
        assert_eq!(parse_iso8601("2024-01-15 10:30:00").unwrap(), expected);
        assert_eq!(parse_iso8601("2024-01-15T10:30").unwrap(), expected);
        assert_eq!(
            parse_iso8601("2024-01-15").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_iso8601_invalid() {
        assert!(parse_iso8601("").is_err());
        assert!(parse_iso8601("not-a-date").is_err());
        assert!(parse_iso8601("2024-13-45T00:00:00").is_err());
        assert!(parse_iso8601("15/01/2024 10:30").is_err());
    }
}
