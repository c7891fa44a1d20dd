//! Chat export parsers for the supported platforms.
//!
//! Each parser implements the unified [`Parser`](crate::parser::Parser)
//! trait.
//!
//! # Available Parsers
//!
//! - [`FacebookParser`] - Parses Facebook Messenger JSON exports
//! - [`DiscordParser`] - Parses DiscordChatExporter JSON exports
//!
//! # Example
//!
//! ```rust
//! use chatecho::parser::Parser;
//! use chatecho::parsers::FacebookParser;
//!
//! let json = r#"{"messages": [
//!     {"sender_name": "Alice", "content": "Remember the camping trip?", "timestamp_ms": 1561939200000}
//! ]}"#;
//! let messages = FacebookParser::new().parse_str(json)?;
//! assert_eq!(messages.len(), 1);
//! # Ok::<(), chatecho::ChatechoError>(())
//! ```

mod discord;
mod facebook;

pub use discord::DiscordParser;
pub use facebook::FacebookParser;
