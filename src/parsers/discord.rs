//! Discord export parser.
//!
//! Handles JSON exports from the DiscordChatExporter tool. Only ordinary
//! user messages (`"type": "Default"`) are kept; joins, pins, calls and
//! other system events are skipped.

use crate::Message;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::parser::{Parser, Platform};
use crate::parsing::discord::{FORMAT, parse_discord_entry};
use crate::parsing::{collect_records, export_entries};

/// Parser for Discord JSON exports (from DiscordChatExporter).
pub struct DiscordParser {
    config: ParserConfig,
}

impl DiscordParser {
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

impl Default for DiscordParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for DiscordParser {
    fn name(&self) -> &'static str {
        "Discord"
    }

    fn platform(&self) -> Platform {
        Platform::Discord
    }

    fn parse_str(&self, content: &str) -> Result<Vec<Message>> {
        let entries = export_entries(content, FORMAT)?;
        Ok(collect_records(&entries, |entry| {
            parse_discord_entry(entry, &self.config)
        }))
    }
}
