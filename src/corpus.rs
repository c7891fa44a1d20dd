//! The in-memory corpus of historical messages.
//!
//! A [`Corpus`] is built once by the [ingestion coordinator](crate::ingest)
//! and never changes afterwards. It is backed by an `Arc<[Message]>`, so
//! clones are cheap and any number of threads can read it without locking.

use std::sync::Arc;

use crate::Message;
use crate::core::stats::LoadStats;
use crate::parser::Platform;

/// Immutable, ordered collection of every ingested message.
///
/// # Example
///
/// ```
/// use chatecho::corpus::Corpus;
/// use chatecho::parser::Platform;
/// use chatecho::Message;
/// use chrono::Utc;
///
/// let corpus = Corpus::from_messages(vec![
///     Message::new("Alice", "Remember the camping trip?", Utc::now(), Platform::Facebook),
///     Message::new("Bob", "Who is on for movie night?", Utc::now(), Platform::Discord),
/// ]);
///
/// assert_eq!(corpus.len(), 2);
/// assert_eq!(corpus.count_from(Platform::Discord), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    messages: Arc<[Message]>,
    stats: LoadStats,
}

impl Corpus {
    /// Wraps loaded messages together with the statistics of their load.
    pub fn new(messages: Vec<Message>, stats: LoadStats) -> Self {
        Self {
            messages: messages.into(),
            stats,
        }
    }

    /// Builds a corpus from messages that did not come from a directory load.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        let mut stats = LoadStats::new();
        for &platform in Platform::all() {
            let count = messages.iter().filter(|m| m.is_from(platform)).count();
            stats.add_messages(platform, count);
        }
        Self::new(messages, stats)
    }

    /// An empty corpus, used when the export directory is unusable.
    pub fn empty() -> Self {
        Self::new(Vec::new(), LoadStats::default())
    }

    /// All messages in load order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the corpus holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates over messages in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Iterates over the messages from one platform.
    pub fn by_source(&self, platform: Platform) -> impl Iterator<Item = &Message> {
        self.iter().filter(move |m| m.is_from(platform))
    }

    /// Number of messages from one platform.
    pub fn count_from(&self, platform: Platform) -> usize {
        self.by_source(platform).count()
    }

    /// Statistics of the load that produced this corpus.
    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
