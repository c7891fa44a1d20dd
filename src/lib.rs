//! # Chatecho
//!
//! A Rust library for replaying old group-chat history: it loads chat exports
//! from several platforms into one corpus and serves random "echoes" from the
//! past, on request or on a daily schedule.
//!
//! ## Overview
//!
//! Chatecho reads exports from:
//! - **Facebook Messenger**: JSON from Meta's "Download Your Information"
//! - **Discord**: JSON from DiscordChatExporter
//!
//! Exports are messy. Meta mis-encodes every non-ASCII character, Discord
//! mixes system events into the message list, and individual records are
//! sometimes truncated or missing fields. The ingestion pipeline repairs
//! encoding, drops and logs unusable records, and never lets one bad record
//! or file abort a load.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatecho::prelude::*;
//! use chrono::Local;
//!
//! let corpus = load_corpus("chat_exports");
//! println!("{}", corpus.stats());
//!
//! let today = Local::now().date_naive();
//! let mut session = ReplaySession::new(corpus, ScheduleConfig::default(), today);
//! if let Ok(message) = session.echo(Some(Platform::Facebook), &mut rand::thread_rng()) {
//!     println!("{}", echo_embed(&message));
//! }
//! ```
//!
//! ## Parsing a Single File
//!
//! ```rust,no_run
//! use chatecho::parser::{Parser, Platform, create_parser};
//!
//! let parser = create_parser(Platform::Discord);
//! let messages = parser.try_parse("discord_general.json".as_ref())?;
//! # Ok::<(), chatecho::ChatechoError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`Parser`](parser::Parser) trait, [`Platform`](parser::Platform), platform detection
//! - [`parsers`] - [`FacebookParser`](parsers::FacebookParser), [`DiscordParser`](parsers::DiscordParser)
//! - [`parsing`] - Record-level decoding shared by the parsers, encoding repair
//! - [`ingest`] - Directory loading ([`load_corpus`](ingest::load_corpus))
//! - [`corpus`] - The immutable [`Corpus`](corpus::Corpus)
//! - [`core`] - Echo queries, scheduling, snipes, word of the day, rendering
//! - [`config`] - Parser, schedule and bot configuration
//! - [`error`] - Error types ([`ChatechoError`], [`Result`])
//! - [`prelude`] - Convenient re-exports
//!
//! ## Logging
//!
//! The library logs through [`tracing`]. Nothing is printed unless the
//! application installs a subscriber.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod corpus;
pub mod error;
pub mod ingest;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ChatechoError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatecho::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;

    // Error types
    pub use crate::error::{ChatechoError, EchoError, Result};

    // Parser API
    pub use crate::parser::{Parser, Platform, create_parser, detect_platform};
    pub use crate::parsers::{DiscordParser, FacebookParser};

    // Configuration
    pub use crate::config::{BotConfig, ParserConfig, ScheduleConfig};

    // Loading
    pub use crate::corpus::Corpus;
    pub use crate::ingest::{Ingestor, load_corpus};

    // Replay
    pub use crate::core::{
        DeletedMessage, EchoQuery, Embed, LoadStats, ReplaySession, SnipeCache, WordOfTheDay,
        WotdStore, echo_embed, snipe_embed, wotd_embed,
    };

    // Encoding repair
    pub use crate::parsing::fix_encoding;
}
