//! Facebook Messenger JSON export parser.
//!
//! Handles Meta's "Download Your Information" exports, including the
//! Mojibake encoding fix.
//!
//! The main quirk is that Meta exports UTF-8 text encoded as ISO-8859-1,
//! causing accented, Cyrillic and emoji text to appear as garbage. Sender and
//! content are repaired before they are stored.

use crate::Message;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::parser::{Parser, Platform};
use crate::parsing::facebook::{FORMAT, parse_facebook_entry};
use crate::parsing::{collect_records, export_entries};

/// Parser for Facebook Messenger JSON exports.
///
/// # Example
///
/// ```rust,no_run
/// use chatecho::parsers::FacebookParser;
/// use chatecho::parser::Parser;
///
/// let parser = FacebookParser::new();
/// let messages = parser.parse("chat_exports/facebook_message_1.json".as_ref());
/// ```
pub struct FacebookParser {
    config: ParserConfig,
}

impl FacebookParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }
}

impl Default for FacebookParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for FacebookParser {
    fn name(&self) -> &'static str {
        "Facebook"
    }

    fn platform(&self) -> Platform {
        Platform::Facebook
    }

    fn parse_str(&self, content: &str) -> Result<Vec<Message>> {
        let entries = export_entries(content, FORMAT)?;
        Ok(collect_records(&entries, |entry| {
            parse_facebook_entry(entry, &self.config)
        }))
    }
}
