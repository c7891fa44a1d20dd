//! Canonical message type shared by all platforms.
//!
//! This module provides [`Message`], the normalized representation of one
//! historical chat message. Both platform parsers convert their native
//! records into this structure, and everything downstream (corpus, echo
//! queries, scheduled replays) only ever sees this type.
//!
//! # Overview
//!
//! A message always carries all four fields:
//! - `sender`: display name, encoding-repaired
//! - `content`: message body, encoding-repaired
//! - `timestamp`: when it was sent, with the offset the export recorded
//! - `source`: the [`Platform`] the export came from
//!
//! Parsers only build a `Message` once every field has passed validation,
//! so there are no placeholder values.
//!
//! # Example
//!
//! ```
//! use chatecho::Message;
//! use chatecho::parser::Platform;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2019, 7, 4, 18, 30, 0).unwrap();
//! let msg = Message::new("Alice", "Fireworks were amazing tonight", ts, Platform::Facebook);
//!
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.source(), Platform::Facebook);
//! ```

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::parser::Platform;

/// A normalized historical chat message.
///
/// # Serialization
///
/// Timestamps use RFC 3339 and the source is a lowercase platform name:
///
/// ```
/// use chatecho::Message;
/// use chatecho::parser::Platform;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
/// let msg = Message::new("Bob", "Happy new year everyone", ts, Platform::Discord);
/// let json = serde_json::to_string(&msg)?;
///
/// assert!(json.contains("\"source\":\"discord\""));
/// assert!(json.contains("2021-01-01T00:00:00+00:00"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the message author.
    pub sender: String,

    /// Text content of the message.
    pub content: String,

    /// When the message was originally sent, in the offset the export used.
    /// Epoch-millisecond exports carry `+00:00`.
    pub timestamp: DateTime<FixedOffset>,

    /// Platform the export file came from.
    pub source: Platform,
}

impl Message {
    /// Creates a new message.
    pub fn new(
        sender: impl Into<String>,
        content: impl Into<String>,
        timestamp: impl Into<DateTime<FixedOffset>>,
        source: Platform,
    ) -> Self {
        Self {
            sender: sender.into(),
            content: content.into(),
            timestamp: timestamp.into(),
            source,
        }
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Returns the source platform.
    pub fn source(&self) -> Platform {
        self.source
    }

    /// Returns `true` if this message came from `platform`.
    pub fn is_from(&self, platform: Platform) -> bool {
        self.source == platform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_message_new() {
        let msg = Message::new("Alice", "Hello there, friend", ts(), Platform::Facebook);
        assert_eq!(msg.sender(), "Alice");
        assert_eq!(msg.content(), "Hello there, friend");
        assert_eq!(msg.timestamp(), ts());
        assert_eq!(msg.source(), Platform::Facebook);
    }

    #[test]
    fn test_message_is_from() {
        let msg = Message::new("Bob", "Anyone up for games?", ts(), Platform::Discord);
        assert!(msg.is_from(Platform::Discord));
        assert!(!msg.is_from(Platform::Facebook));
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::new("Alice", "Hello there, friend", ts(), Platform::Facebook);
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("Alice"));
        assert!(json.contains("\"source\":\"facebook\""));
        assert!(json.contains("2024-06-15T12:00:00+00:00"));
    }

    #[test]
    fn test_message_keeps_source_offset() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let evening = offset.with_ymd_and_hms(2020, 5, 1, 20, 30, 0).unwrap();
        let msg = Message::new("carol", "Movie night on Friday", evening, Platform::Discord);

        assert_eq!(msg.timestamp().offset(), &offset);
        assert_eq!(msg.timestamp().date_naive().to_string(), "2020-05-01");

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("2020-05-01T20:30:00-05:00"));
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back.timestamp().offset(), &offset);
    }

    #[test]
    fn test_message_deserialization() {
        let json = r#"{"sender":"Bob","content":"Anyone up for games?","timestamp":"2024-06-15T12:00:00Z","source":"discord"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.sender(), "Bob");
        assert_eq!(msg.timestamp(), ts());
        assert_eq!(msg.source(), Platform::Discord);
    }

    #[test]
    fn test_message_requires_timestamp() {
        let json = r#"{"sender":"Bob","content":"Anyone up for games?","source":"discord"}"#;
        assert!(serde_json::from_str::<Message>(json).is_err());
    }
}
