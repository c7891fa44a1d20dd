//! Configuration types for parsers, the replay schedule and the bot.
//!
//! All structs are plain serde types with builder methods, usable from the
//! library without any CLI dependency.
//!
//! - [`ParserConfig`] - record validation and encoding repair
//! - [`ScheduleConfig`] - when and how often scheduled replays fire
//! - [`BotConfig`] - everything above plus file locations, loadable from JSON
//!
//! # Example
//!
//! ```rust
//! use chatecho::config::ParserConfig;
//! use chatecho::parsers::DiscordParser;
//!
//! let config = ParserConfig::new()
//!     .with_min_content_chars(20)
//!     .with_fix_encoding(false);
//!
//! let parser = DiscordParser::with_config(config);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{ChatechoError, Result};

/// Settings shared by every export parser.
///
/// # Example
///
/// ```rust
/// use chatecho::config::ParserConfig;
///
/// let config = ParserConfig::default();
/// assert_eq!(config.min_content_chars, 10);
/// assert!(config.accepts_content("long enough text"));
/// assert!(!config.accepts_content("too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Content must be strictly longer than this many characters (default: 10)
    pub min_content_chars: usize,

    /// Repair mojibake in sender and content (default: true)
    pub fix_encoding: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            min_content_chars: 10,
            fix_encoding: true,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the exclusive minimum content length, in characters.
    #[must_use]
    pub fn with_min_content_chars(mut self, chars: usize) -> Self {
        self.min_content_chars = chars;
        self
    }

    /// Enables or disables encoding repair.
    #[must_use]
    pub fn with_fix_encoding(mut self, fix: bool) -> Self {
        self.fix_encoding = fix;
        self
    }

    /// Returns `true` if raw `content` is long enough to keep.
    ///
    /// Length is counted in Unicode scalar values, not bytes.
    pub fn accepts_content(&self, content: &str) -> bool {
        content.chars().count() > self.min_content_chars
    }
}

/// When scheduled replays may fire.
///
/// The scheduler ticks once a minute. Inside the daily window each tick
/// posts with probability `tick_probability` until `daily_cap` posts have
/// gone out that day.
///
/// # Example
///
/// ```rust
/// use chatecho::config::ScheduleConfig;
/// use chrono::NaiveTime;
///
/// let config = ScheduleConfig::default();
/// assert_eq!(config.window_start, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
/// assert_eq!(config.daily_cap, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Start of the posting window, inclusive (default: 12:00)
    pub window_start: NaiveTime,

    /// End of the posting window, inclusive (default: 22:00)
    pub window_end: NaiveTime,

    /// Maximum scheduled posts per calendar day (default: 5)
    pub daily_cap: u32,

    /// Chance that a single in-window tick posts (default: 5/600)
    pub tick_probability: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            window_start: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN),
            window_end: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or(NaiveTime::MIN),
            daily_cap: 5,
            // 5 posts spread over the 600 minutes of the window
            tick_probability: 5.0 / 600.0,
        }
    }
}

impl ScheduleConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the posting window.
    #[must_use]
    pub fn with_window(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.window_start = start;
        self.window_end = end;
        self
    }

    /// Sets the daily cap.
    #[must_use]
    pub fn with_daily_cap(mut self, cap: u32) -> Self {
        self.daily_cap = cap;
        self
    }

    /// Sets the per-tick probability.
    #[must_use]
    pub fn with_tick_probability(mut self, probability: f64) -> Self {
        self.tick_probability = probability;
        self
    }

    /// Returns `true` if `time` falls inside the posting window.
    pub fn in_window(&self, time: NaiveTime) -> bool {
        self.window_start <= time && time <= self.window_end
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.window_start > self.window_end {
            return Err(format!(
                "schedule window starts at {} but ends at {}",
                self.window_start, self.window_end
            ));
        }
        if !(0.0..=1.0).contains(&self.tick_probability) {
            return Err(format!(
                "tick_probability must be within 0..=1, got {}",
                self.tick_probability
            ));
        }
        Ok(())
    }
}

/// Top-level bot configuration.
///
/// Every field has a default, so an empty JSON object is a valid config.
///
/// ```json
/// {
///   "export_dir": "chat_exports",
///   "wotd_path": "word_of_the_day.json",
///   "log_file": "bot.log",
///   "parser": { "min_content_chars": 10 },
///   "schedule": { "daily_cap": 3 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Directory holding `*.json` chat exports (default: `chat_exports`)
    pub export_dir: PathBuf,

    /// Flat file storing the word of the day (default: `word_of_the_day.json`)
    pub wotd_path: PathBuf,

    /// Optional log file, appended to in addition to stderr
    pub log_file: Option<PathBuf>,

    /// Parser settings
    pub parser: ParserConfig,

    /// Scheduled replay settings
    pub schedule: ScheduleConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("chat_exports"),
            wotd_path: PathBuf::from("word_of_the_day.json"),
            log_file: None,
            parser: ParserConfig::default(),
            schedule: ScheduleConfig::default(),
        }
    }
}

impl BotConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatechoError::Config`] if the file cannot be read, is not
    /// valid JSON, or describes an impossible schedule.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| ChatechoError::config(path, format!("cannot read file: {e}")))?;
        let config: BotConfig = serde_json::from_str(&raw)
            .map_err(|e| ChatechoError::config(path, format!("invalid JSON: {e}")))?;
        config
            .schedule
            .validate()
            .map_err(|message| ChatechoError::config(path, message))?;
        Ok(config)
    }

    /// Sets the export directory.
    #[must_use]
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }
}
