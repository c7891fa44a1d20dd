//! Unified parser trait for chat exports.
//!
//! Every supported platform has one parser implementing [`Parser`]. The trait
//! has two layers:
//!
//! - [`Parser::try_parse`] / [`Parser::parse_str`] report file-level failures
//!   (unreadable file, invalid JSON) as [`ChatechoError`].
//! - [`Parser::parse`] never fails: it logs the file-level error and returns
//!   an empty list, so one broken export cannot take a corpus load down.
//!
//! Record-level problems never surface as errors at all; parsers log them and
//! continue with the next record.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatecho::parser::{Parser, Platform, create_parser};
//! use std::path::Path;
//!
//! let parser = create_parser(Platform::Discord);
//! let messages = parser.parse(Path::new("chat_exports/discord_general.json"));
//! println!("{} messages", messages.len());
//! ```
//!
//! # Platform Selection
//!
//! Export files carry no reliable platform marker in their content, so the
//! platform is taken from the file name:
//!
//! ```rust
//! use chatecho::parser::{Platform, detect_platform};
//!
//! assert_eq!(detect_platform("Facebook_2019.json"), Some(Platform::Facebook));
//! assert_eq!(detect_platform("discord-general.json"), Some(Platform::Discord));
//! assert_eq!(detect_platform("randomfile.json"), None);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::Message;
use crate::config::ParserConfig;
use crate::error::{ChatechoError, Result};

/// Source platform of an export file.
///
/// Recorded on every [`Message`] so that queries can be restricted to one
/// platform.
///
/// # Example
///
/// ```rust
/// use chatecho::parser::Platform;
/// use std::str::FromStr;
///
/// let platform = Platform::from_str("discord").unwrap();
/// assert_eq!(platform, Platform::Discord);
///
/// // Aliases are supported
/// let platform = Platform::from_str("FB").unwrap();
/// assert_eq!(platform, Platform::Facebook);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Facebook Messenger JSON exports ("Download Your Information")
    #[serde(alias = "fb")]
    Facebook,

    /// Discord JSON exports from DiscordChatExporter
    #[serde(alias = "dc")]
    Discord,
}

impl Platform {
    /// Lowercase marker looked for in export file names.
    pub fn file_marker(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Discord => "discord",
        }
    }

    /// Returns all platform names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &["facebook", "fb", "discord", "dc"]
    }

    /// Returns all available platforms, in detection order.
    pub fn all() -> &'static [Platform] {
        &[Platform::Facebook, Platform::Discord]
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Facebook => write!(f, "Facebook"),
            Platform::Discord => write!(f, "Discord"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = ChatechoError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "facebook" | "fb" => Ok(Platform::Facebook),
            "discord" | "dc" => Ok(Platform::Discord),
            _ => Err(ChatechoError::UnknownPlatform {
                input: s.to_string(),
                expected: Platform::all_names().join(", "),
            }),
        }
    }
}

/// Picks the platform for an export file from its name.
///
/// Matching is a case-insensitive substring test against each platform's
/// [`file_marker`](Platform::file_marker), in the order of
/// [`Platform::all`]. A name containing both markers is therefore treated as
/// Facebook. Returns `None` when no marker matches.
pub fn detect_platform(file_name: &str) -> Option<Platform> {
    let lower = file_name.to_lowercase();
    Platform::all()
        .iter()
        .copied()
        .find(|platform| lower.contains(platform.file_marker()))
}

/// Unified trait for parsing chat exports.
///
/// Implementors provide [`parse_str`](Parser::parse_str); file access and
/// error isolation come from the provided methods.
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Returns the platform this parser handles.
    fn platform(&self) -> Platform;

    /// Parses one export document held in memory.
    ///
    /// # Errors
    ///
    /// Returns an error only when the document as a whole is unusable:
    /// invalid JSON ([`ChatechoError::Parse`]) or a top level that is not
    /// an export object ([`ChatechoError::InvalidFormat`]). Bad records are
    /// logged and skipped.
    fn parse_str(&self, content: &str) -> Result<Vec<Message>>;

    /// Reads and parses one export file.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD instead of
    /// failing the file, and a leading byte order mark is dropped.
    /// Record-level log lines are emitted inside an `export` span carrying
    /// the file path. The span is at error level so the path survives an
    /// error-only filter.
    fn try_parse(&self, path: &Path) -> Result<Vec<Message>> {
        let _span = tracing::error_span!("export", file = %path.display()).entered();
        let bytes = fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        self.parse_str(content).map_err(|e| e.with_path(path))
    }

    /// Parses one export file, logging instead of failing.
    ///
    /// Any file-level error is logged and yields an empty list.
    fn parse(&self, path: &Path) -> Vec<Message> {
        match self.try_parse(path) {
            Ok(messages) => messages,
            Err(err) => {
                log_file_error(path, &err);
                Vec::new()
            }
        }
    }
}

/// Logs a file-level failure in the wording used across the crate.
pub(crate) fn log_file_error(path: &Path, err: &ChatechoError) {
    match err {
        ChatechoError::Parse { .. } | ChatechoError::InvalidFormat { .. } => {
            error!("JSON decoding error in {}: {}", path.display(), err);
        }
        _ => error!("Error reading {}: {}", path.display(), err),
    }
}

/// Creates a parser for the specified platform with default settings.
///
/// # Example
///
/// ```rust
/// use chatecho::parser::{Platform, create_parser};
///
/// let parser = create_parser(Platform::Facebook);
/// assert_eq!(parser.name(), "Facebook");
/// ```
pub fn create_parser(platform: Platform) -> Box<dyn Parser> {
    create_parser_with_config(platform, ParserConfig::default())
}

/// Creates a parser for the specified platform with custom settings.
pub fn create_parser_with_config(platform: Platform, config: ParserConfig) -> Box<dyn Parser> {
    match platform {
        Platform::Facebook => Box::new(crate::parsers::FacebookParser::with_config(config)),
        Platform::Discord => Box::new(crate::parsers::DiscordParser::with_config(config)),
    }
}
