//! Word of the day, persisted as a single JSON record.
//!
//! The file holds `{"date": "YYYY-MM-DD", "word": ..., "definition": ...}`.
//! A record only counts for the date it was saved on; yesterday's word is
//! treated as "not set".
//!
//! Fetching a random word and its definition happens over HTTP in the bot
//! front end. The helpers [`word_from_response`] and
//! [`definition_from_response`] pick the interesting parts out of those
//! responses.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::error::Result;

/// Stored when a dictionary lookup yields nothing usable.
pub const DEFINITION_NOT_FOUND: &str = "Definition not found.";

/// One day's word and its definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordOfTheDay {
    /// Day the word was chosen
    pub date: NaiveDate,
    /// The word
    pub word: String,
    /// Its definition
    pub definition: String,
}

impl WordOfTheDay {
    /// Creates a record.
    pub fn new(date: NaiveDate, word: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            date,
            word: word.into(),
            definition: definition.into(),
        }
    }

    /// Returns `true` if the record was saved on `today` and is complete.
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.date == today && !self.word.is_empty() && !self.definition.is_empty()
    }
}

/// Flat-file store for the word of the day.
#[derive(Debug, Clone)]
pub struct WotdStore {
    path: PathBuf,
}

impl WotdStore {
    /// Creates a store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored record regardless of its date.
    ///
    /// A missing file is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn try_load(&self) -> Result<Option<WordOfTheDay>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Today's word, if one has been saved today.
    ///
    /// Unreadable or malformed files are logged and treated as "not set".
    pub fn load_for(&self, today: NaiveDate) -> Option<WordOfTheDay> {
        match self.try_load() {
            Ok(record) => record.filter(|wotd| wotd.is_current(today)),
            Err(err) => {
                error!("Error loading Word of the Day: {err}");
                None
            }
        }
    }

    /// Overwrites the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, wotd: &WordOfTheDay) -> Result<()> {
        let json = serde_json::to_string(wotd)?;
        fs::write(&self.path, json)?;
        info!("Saved Word of the Day: {} - {}", wotd.word, wotd.definition);
        Ok(())
    }
}

/// First word of a random-word API response (`["word"]`).
pub fn word_from_response(body: &Value) -> Option<String> {
    body.as_array()?
        .first()?
        .as_str()
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
}

/// First definition of the first meaning in a dictionary API response.
///
/// Falls back to [`DEFINITION_NOT_FOUND`] when the response has another
/// shape.
pub fn definition_from_response(body: &Value) -> String {
    body.get(0)
        .and_then(|entry| entry.get("meanings"))
        .and_then(|meanings| meanings.get(0))
        .and_then(|meaning| meaning.get("definitions"))
        .and_then(|definitions| definitions.get(0))
        .and_then(|definition| definition.get("definition"))
        .and_then(Value::as_str)
        .filter(|definition| !definition.is_empty())
        .unwrap_or(DEFINITION_NOT_FOUND)
        .to_owned()
}
