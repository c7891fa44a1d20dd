//! Facebook Messenger record parsing.
//!
//! Records look like
//! `{"sender_name": "...", "content": "...", "timestamp_ms": 1546300800000}`.
//! Everything else in a record (photos, reactions, shares) is ignored.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Number, Value};

use super::{accepted_content, optional_text, repair};
use crate::Message;
use crate::config::ParserConfig;
use crate::error::RecordError;
use crate::parser::Platform;

/// Format label used in errors.
pub const FORMAT: &str = "Facebook JSON";

/// Parses one entry of a Facebook export's `messages` array.
///
/// Returns `Ok(None)` for records that are well formed but not worth keeping
/// (no sender, no text content, content too short).
///
/// # Errors
///
/// Returns a [`RecordError`] for malformed records: not an object, a
/// non-string sender, or a missing or unusable `timestamp_ms`.
pub fn parse_facebook_entry(
    entry: &Value,
    config: &ParserConfig,
) -> Result<Option<Message>, RecordError> {
    let fields = entry.as_object().ok_or(RecordError::NotAnObject)?;

    let Some(sender) = optional_text(fields, "sender_name")? else {
        return Ok(None);
    };
    let Some(content) = accepted_content(fields, config) else {
        return Ok(None);
    };

    let timestamp = match fields.get("timestamp_ms") {
        None | Some(Value::Null) => return Err(RecordError::MissingField("timestamp_ms")),
        Some(Value::Number(ms)) => parse_epoch_millis(ms)?,
        Some(_) => return Err(RecordError::field_type("timestamp_ms", "a number")),
    };

    Ok(Some(Message::new(
        repair(sender, config),
        repair(content, config),
        timestamp,
        Platform::Facebook,
    )))
}

/// Converts epoch milliseconds (integer or fractional) to a UTC instant.
pub fn parse_epoch_millis(ms: &Number) -> Result<DateTime<Utc>, RecordError> {
    let parsed = if let Some(whole) = ms.as_i64() {
        Utc.timestamp_millis_opt(whole).single()
    } else {
        ms.as_f64()
            .filter(|f| f.is_finite() && f.abs() < 9.0e15)
            .and_then(|f| {
                let micros = (f * 1000.0).round() as i64;
                let secs = micros.div_euclid(1_000_000);
                let nanos = (micros.rem_euclid(1_000_000) * 1000) as u32;
                Utc.timestamp_opt(secs, nanos).single()
            })
    };

    parsed.ok_or_else(|| RecordError::TimestampOutOfRange(ms.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(entry: &Value) -> Result<Option<Message>, RecordError> {
        parse_facebook_entry(entry, &ParserConfig::default())
    }

    #[test]
    fn test_parse_facebook_entry_basic() {
        let entry = json!({
            "sender_name": "Alice",
            "content": "See you at the lake tomorrow",
            "timestamp_ms": 1546300800000_i64
        });
        let msg = parse(&entry).unwrap().unwrap();
        assert_eq!(msg.sender, "Alice");
        assert_eq!(msg.content, "See you at the lake tomorrow");
        assert_eq!(msg.timestamp, Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(msg.source, Platform::Facebook);
    }

    #[test]
    fn test_parse_facebook_entry_short_content_skipped() {
        let entry = json!({"sender_name": "Alice", "content": "ok", "timestamp_ms": 1});
        assert!(parse(&entry).unwrap().is_none());

        let exactly_ten = json!({"sender_name": "Alice", "content": "0123456789", "timestamp_ms": 1});
        assert!(parse(&exactly_ten).unwrap().is_none());
    }

    #[test]
    fn test_parse_facebook_entry_missing_pieces_skipped() {
        let no_sender = json!({"content": "a long enough message", "timestamp_ms": 1});
        let empty_sender = json!({"sender_name": "", "content": "a long enough message", "timestamp_ms": 1});
        let no_content = json!({"sender_name": "Alice", "photos": [], "timestamp_ms": 1});
        let number_content = json!({"sender_name": "Alice", "content": 123456789012_i64, "timestamp_ms": 1});
        let false_sender = json!({"sender_name": false, "content": "a long enough message", "timestamp_ms": 1});
        let zero_sender = json!({"sender_name": 0, "content": "a long enough message", "timestamp_ms": 1});
        for entry in [no_sender, empty_sender, no_content, number_content, false_sender, zero_sender] {
            assert!(parse(&entry).unwrap().is_none(), "{entry}");
        }
    }

    #[test]
    fn test_parse_facebook_entry_validation_runs_before_timestamp() {
        // Short content is dropped silently even with a broken timestamp.
        let entry = json!({"sender_name": "Alice", "content": "short", "timestamp_ms": "soon"});
        assert!(parse(&entry).unwrap().is_none());
    }

    #[test]
    fn test_parse_facebook_entry_structural_errors() {
        assert!(matches!(parse(&json!("text")), Err(RecordError::NotAnObject)));
        assert!(matches!(
            parse(&json!({"sender_name": "Alice", "content": "a long enough message"})),
            Err(RecordError::MissingField("timestamp_ms"))
        ));
        assert!(matches!(
            parse(&json!({"sender_name": "Alice", "content": "a long enough message", "timestamp_ms": "1546300800000"})),
            Err(RecordError::FieldType { field: "timestamp_ms", .. })
        ));
        assert!(matches!(
            parse(&json!({"sender_name": 42, "content": "a long enough message", "timestamp_ms": 1})),
            Err(RecordError::FieldType { field: "sender_name", .. })
        ));
    }

    #[test]
    fn test_parse_facebook_entry_repairs_stored_text() {
        let entry = json!({
            "sender_name": "Ren\u{00c3}\u{00a9}e",
            "content": "On se voit \u{00c3}\u{00a0} la plage",
            "timestamp_ms": 1546300800000_i64
        });
        let msg = parse(&entry).unwrap().unwrap();
        assert_eq!(msg.sender, "Renée");
        assert_eq!(msg.content, "On se voit à la plage");
    }

    #[test]
    fn test_parse_facebook_entry_without_repair() {
        let entry = json!({
            "sender_name": "Ren\u{00c3}\u{00a9}e",
            "content": "a long enough message",
            "timestamp_ms": 1546300800000_i64
        });
        let config = ParserConfig::new().with_fix_encoding(false);
        let msg = parse_facebook_entry(&entry, &config).unwrap().unwrap();
        assert_eq!(msg.sender, "Ren\u{00c3}\u{00a9}e");
    }

    #[test]
    fn test_parse_epoch_millis_fractional() {
        let ms = Number::from_f64(1546300800500.0).unwrap();
        let ts = parse_epoch_millis(&ms).unwrap();
        assert_eq!(ts.timestamp(), 1546300800);
        assert_eq!(ts.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_parse_epoch_millis_out_of_range() {
        let huge = Number::from(u64::MAX);
        assert!(matches!(
            parse_epoch_millis(&huge),
            Err(RecordError::TimestampOutOfRange(_))
        ));
    }
}
