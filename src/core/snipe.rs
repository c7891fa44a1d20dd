//! Single-slot cache of the most recently deleted message.
//!
//! Only the latest deletion is remembered, whatever channel it happened in.
//! A snipe succeeds only in the channel the message was deleted from, and
//! consumes the slot.

use chrono::{DateTime, Utc};

/// Identifier of a chat channel.
pub type ChannelId = u64;

/// A deleted message as reported by the chat front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedMessage {
    /// Display name of the author
    pub author: String,
    /// Whether the author is a bot account
    pub author_is_bot: bool,
    /// Message text
    pub content: String,
    /// Channel the message was posted in
    pub channel: ChannelId,
    /// When the message was originally created
    pub created_at: DateTime<Utc>,
}

impl DeletedMessage {
    /// Creates a deleted message from a human author.
    pub fn new(
        author: impl Into<String>,
        content: impl Into<String>,
        channel: ChannelId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            author: author.into(),
            author_is_bot: false,
            content: content.into(),
            channel,
            created_at,
        }
    }

    /// Marks the author as a bot.
    #[must_use]
    pub fn from_bot(mut self) -> Self {
        self.author_is_bot = true;
        self
    }
}

/// Holds at most one deleted message.
#[derive(Debug, Clone, Default)]
pub struct SnipeCache {
    last: Option<DeletedMessage>,
}

impl SnipeCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers a deletion, replacing any earlier one.
    ///
    /// Bot messages and messages with only whitespace are ignored. Returns
    /// whether the message was stored.
    pub fn record(&mut self, deleted: DeletedMessage) -> bool {
        if deleted.author_is_bot || deleted.content.trim().is_empty() {
            return false;
        }
        self.last = Some(deleted);
        true
    }

    /// Takes the stored deletion if it belongs to `channel`.
    ///
    /// A miss leaves the cache untouched.
    pub fn take(&mut self, channel: ChannelId) -> Option<DeletedMessage> {
        if self.last.as_ref()?.channel != channel {
            return None;
        }
        self.last.take()
    }
}
