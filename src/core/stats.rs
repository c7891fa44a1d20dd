//! Statistics reported by a corpus load.

use std::fmt;

use serde::Serialize;

use crate::parser::Platform;

/// What happened while loading an export directory.
///
/// Only `*.json` files are counted. Every counted file ends up in exactly
/// one of `files_parsed`, `files_skipped` or `files_failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// JSON files found in the directory
    pub files_seen: usize,
    /// Files handed to a parser that returned successfully
    pub files_parsed: usize,
    /// Files whose name matched no platform
    pub files_skipped: usize,
    /// Files that could not be read or were not valid exports
    pub files_failed: usize,
    /// Messages in the resulting corpus
    pub messages: usize,
    /// Messages loaded from Facebook exports
    pub facebook_messages: usize,
    /// Messages loaded from Discord exports
    pub discord_messages: usize,
}

impl LoadStats {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages loaded from one platform.
    pub fn messages_from(&self, platform: Platform) -> usize {
        match platform {
            Platform::Facebook => self.facebook_messages,
            Platform::Discord => self.discord_messages,
        }
    }

    /// Records `count` messages parsed from a `platform` export.
    pub fn add_messages(&mut self, platform: Platform, count: usize) {
        self.messages += count;
        match platform {
            Platform::Facebook => self.facebook_messages += count,
            Platform::Discord => self.discord_messages += count,
        }
    }

    /// Percentage of seen files that produced a parse, 0.0 when none were seen.
    pub fn parsed_ratio(&self) -> f64 {
        if self.files_seen == 0 {
            return 0.0;
        }
        self.files_parsed as f64 / self.files_seen as f64 * 100.0
    }

    /// Returns `true` if no file was skipped or failed.
    pub fn is_clean(&self) -> bool {
        self.files_skipped == 0 && self.files_failed == 0
    }
}

impl fmt::Display for LoadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} messages from {} file(s) ({} parsed, {} skipped, {} failed)",
            self.messages, self.files_seen, self.files_parsed, self.files_skipped, self.files_failed
        )
    }
}
