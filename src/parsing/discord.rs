//! Discord record parsing.
//!
//! Records come from DiscordChatExporter JSON:
//!
//! ```json
//! {
//!   "type": "Default",
//!   "timestamp": "2020-05-01T12:34:56.789+00:00",
//!   "content": "...",
//!   "author": {"name": "alice123", "nickname": "Alice"}
//! }
//! ```

use serde_json::Value;

use super::{accepted_content, optional_text, parse_iso8601, repair};
use crate::Message;
use crate::config::ParserConfig;
use crate::error::RecordError;
use crate::parser::Platform;

/// Format label used in errors.
pub const FORMAT: &str = "Discord JSON";

/// `type` of ordinary user messages. Joins, pins, calls, thread events and
/// the like use other types and are skipped.
pub const DEFAULT_MESSAGE_TYPE: &str = "Default";

/// Parses one entry of a Discord export's `messages` array.
///
/// Returns `Ok(None)` for non-default message types and for records that
/// fail validation (no author name, content missing or too short).
///
/// # Errors
///
/// Returns a [`RecordError`] for malformed records, including
/// [`RecordError::InvalidTimestamp`] when `timestamp` is not ISO-8601.
pub fn parse_discord_entry(
    entry: &Value,
    config: &ParserConfig,
) -> Result<Option<Message>, RecordError> {
    let fields = entry.as_object().ok_or(RecordError::NotAnObject)?;

    if fields.get("type").and_then(Value::as_str) != Some(DEFAULT_MESSAGE_TYPE) {
        return Ok(None);
    }

    let Some(sender) = author_name(fields.get("author"))? else {
        return Ok(None);
    };
    let Some(content) = accepted_content(fields, config) else {
        return Ok(None);
    };

    let raw_timestamp = match fields.get("timestamp") {
        None | Some(Value::Null) => return Err(RecordError::MissingField("timestamp")),
        Some(Value::String(raw)) => raw,
        Some(_) => return Err(RecordError::field_type("timestamp", "a string")),
    };
    let timestamp = parse_iso8601(raw_timestamp).map_err(|source| RecordError::InvalidTimestamp {
        raw: raw_timestamp.clone(),
        source,
    })?;

    Ok(Some(Message::new(
        repair(sender, config),
        repair(content, config),
        timestamp,
        Platform::Discord,
    )))
}

/// Nickname if set, otherwise account name.
///
/// A missing `author` behaves like an empty one.
fn author_name(author: Option<&Value>) -> Result<Option<&str>, RecordError> {
    let fields = match author {
        None => return Ok(None),
        Some(Value::Object(fields)) => fields,
        Some(_) => return Err(RecordError::field_type("author", "an object")),
    };

    match optional_text(fields, "nickname")? {
        Some(nickname) => Ok(Some(nickname)),
        None => optional_text(fields, "name"),
    }
}
