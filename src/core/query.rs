//! Random selection of past messages from a [`Corpus`].
//!
//! [`EchoQuery`] narrows the corpus to one platform and steers away from the
//! sender who was replayed last, then picks uniformly at random.
//!
//! # Rules
//!
//! | Step | Effect |
//! |------|--------|
//! | Source filter | [`with_source`](EchoQuery::with_source) keeps one platform |
//! | Sender exclusion | [`excluding_sender`](EchoQuery::excluding_sender) drops one sender |
//! | Fallback | if exclusion leaves nothing, the filtered set is used as is |
//!
//! # Example
//!
//! ```
//! use chatecho::core::query::EchoQuery;
//! use chatecho::corpus::Corpus;
//! use chatecho::parser::Platform;
//! use chatecho::Message;
//! use chrono::Utc;
//!
//! let corpus = Corpus::from_messages(vec![
//!     Message::new("Alice", "Anyone up for pizza tonight?", Utc::now(), Platform::Facebook),
//!     Message::new("Bob", "Only if it has pineapple on it", Utc::now(), Platform::Facebook),
//! ]);
//!
//! let query = EchoQuery::new().excluding_sender("Alice");
//! let picked = query.pick(&corpus, &mut rand::thread_rng()).unwrap();
//! assert_eq!(picked.sender, "Bob");
//! ```

use rand::Rng;
use rand::seq::SliceRandom;

use crate::Message;
use crate::corpus::Corpus;
use crate::parser::Platform;

/// Criteria for picking one random message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EchoQuery {
    /// Only consider messages from this platform.
    pub source: Option<Platform>,

    /// Avoid this sender unless nobody else is left.
    pub exclude_sender: Option<String>,
}

impl EchoQuery {
    /// Creates a query over the whole corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the query to one platform.
    #[must_use]
    pub fn with_source(mut self, source: Platform) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the sender to avoid.
    #[must_use]
    pub fn excluding_sender(mut self, sender: impl Into<String>) -> Self {
        self.exclude_sender = Some(sender.into());
        self
    }

    /// Messages matching the source filter, ignoring the sender exclusion.
    pub fn filtered<'a>(&self, corpus: &'a Corpus) -> Vec<&'a Message> {
        match self.source {
            Some(source) => corpus.by_source(source).collect(),
            None => corpus.iter().collect(),
        }
    }

    /// Messages eligible for selection.
    ///
    /// Falls back to the full filtered set when the exclusion would leave
    /// nothing.
    pub fn candidates<'a>(&self, corpus: &'a Corpus) -> Vec<&'a Message> {
        let filtered = self.filtered(corpus);

        let Some(excluded) = self.exclude_sender.as_deref() else {
            return filtered;
        };

        let available: Vec<_> = filtered
            .iter()
            .copied()
            .filter(|m| m.sender != excluded)
            .collect();

        if available.is_empty() {
            filtered
        } else {
            available
        }
    }

    /// Picks one candidate uniformly at random.
    ///
    /// Returns `None` only when the source-filtered set is empty.
    pub fn pick<'a, R>(&self, corpus: &'a Corpus, rng: &mut R) -> Option<&'a Message>
    where
        R: Rng + ?Sized,
    {
        self.candidates(corpus).choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn msg(sender: &str, source: Platform) -> Message {
        let ts = Utc.with_ymd_and_hms(2020, 3, 1, 9, 0, 0).unwrap();
        Message::new(sender, format!("a message from {sender}"), ts, source)
    }

    fn corpus() -> Corpus {
        Corpus::from_messages(vec![
            msg("Alice", Platform::Facebook),
            msg("Bob", Platform::Facebook),
            msg("Alice", Platform::Discord),
        ])
    }

    #[test]
    fn test_filtered_by_source() {
        let corpus = corpus();
        let query = EchoQuery::new().with_source(Platform::Discord);
        let filtered = query.filtered(&corpus);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].source, Platform::Discord);
    }

    #[test]
    fn test_candidates_exclude_sender() {
        let corpus = corpus();
        let query = EchoQuery::new().excluding_sender("Alice");
        let candidates = query.candidates(&corpus);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].sender, "Bob");
    }

    #[test]
    fn test_candidates_fall_back_when_only_excluded_sender() {
        let corpus = corpus();
        let query = EchoQuery::new()
            .with_source(Platform::Discord)
            .excluding_sender("Alice");
        let candidates = query.candidates(&corpus);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].sender, "Alice");
    }

    #[test]
    fn test_pick_never_returns_excluded_sender_when_others_exist() {
        let corpus = corpus();
        let query = EchoQuery::new().excluding_sender("Alice");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(query.pick(&corpus, &mut rng).unwrap().sender, "Bob");
        }
    }

    #[test]
    fn test_pick_empty() {
        let corpus = Corpus::empty();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(EchoQuery::new().pick(&corpus, &mut rng).is_none());

        let corpus = Corpus::from_messages(vec![msg("Alice", Platform::Facebook)]);
        let query = EchoQuery::new().with_source(Platform::Discord);
        assert!(query.pick(&corpus, &mut rng).is_none());
    }

    #[test]
    fn test_pick_is_reproducible_with_seed() {
        let corpus = corpus();
        let query = EchoQuery::new();
        let a = query.pick(&corpus, &mut StdRng::seed_from_u64(42));
        let b = query.pick(&corpus, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
