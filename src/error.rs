//! Unified error types for chatecho.
//!
//! Two layers of errors exist:
//!
//! - [`ChatechoError`] covers file-level and configuration failures. These are
//!   the only errors that ever cross a public API boundary.
//! - [`RecordError`] describes why a single export record could not be turned
//!   into a [`Message`](crate::Message). Parsers log these and move on; they
//!   never abort the surrounding file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatecho operations.
///
/// # Example
///
/// ```rust
/// use chatecho::error::Result;
/// use chatecho::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatechoError>;

/// The error type for all chatecho operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatechoError {
    /// An I/O error occurred.
    ///
    /// Typically an unreadable export file, a missing config file or a
    /// failure while writing the word of the day.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing/serialization error outside of export parsing.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse an export document.
    #[error("Failed to parse {format} export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The format being parsed (e.g., "Facebook JSON")
        format: &'static str,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The document is valid JSON but not shaped like an export.
    ///
    /// This occurs when the top level is not an object or when `messages`
    /// is present but is not an array.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date given on the command line or in a stored record.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A platform name that is neither Facebook nor Discord.
    #[error("Unknown platform '{input}'. Expected one of: {expected}")]
    UnknownPlatform {
        /// The name that was provided
        input: String,
        /// Accepted names, comma separated
        expected: String,
    },

    /// Configuration file could not be loaded or is inconsistent.
    #[error("Config error in {}: {message}", path.display())]
    Config {
        /// Path of the offending config file
        path: PathBuf,
        /// What went wrong
        message: String,
    },
}

impl ChatechoError {
    /// Creates a parse error for an export document.
    pub fn parse(format: &'static str, source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ChatechoError::Parse {
            format,
            source,
            path,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatechoError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatechoError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ChatechoError::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Attaches a file path to a parse error that was produced without one.
    #[must_use]
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            ChatechoError::Parse {
                format,
                source,
                path: None,
            } => ChatechoError::Parse {
                format,
                source,
                path: Some(file.into()),
            },
            other => other,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatechoError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatechoError::Parse { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatechoError::InvalidFormat { .. })
    }
}

/// Why a single export record was rejected.
///
/// Validation misses (empty sender, short content, non-standard Discord
/// message types) are not errors at all: parsers drop those silently. This
/// enum covers the records whose *shape* is wrong and which are worth a log
/// line.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecordError {
    /// The entry in the `messages` array is not a JSON object.
    #[error("entry is not a JSON object")]
    NotAnObject,

    /// A field the record cannot do without is absent or null.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A field holds the wrong JSON type.
    #[error("field `{field}` should be {expected}")]
    FieldType {
        /// Field name as it appears in the export
        field: &'static str,
        /// Human readable expected type
        expected: &'static str,
    },

    /// Epoch timestamp outside of the representable range.
    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(String),

    /// A timestamp string that is not ISO-8601.
    #[error("invalid timestamp '{raw}': {source}")]
    InvalidTimestamp {
        /// The raw value found in the export
        raw: String,
        /// The underlying chrono error
        #[source]
        source: chrono::ParseError,
    },
}

impl RecordError {
    /// Creates a field type error.
    pub fn field_type(field: &'static str, expected: &'static str) -> Self {
        RecordError::FieldType { field, expected }
    }
}

/// Why an echo request produced nothing.
///
/// The display strings double as the reply shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EchoError {
    /// The corpus is empty.
    #[error("No messages found.")]
    NoMessages,

    /// The corpus holds nothing from the requested platform.
    #[error("No messages found from {0}.")]
    NoMessagesFrom(crate::parser::Platform),
}
