//! Ingestion coordinator: export directory -> [`Corpus`].
//!
//! Every `*.json` file in the directory is routed to a parser by its name
//! (see [`detect_platform`]); the results are concatenated into one corpus.
//! Nothing that goes wrong here is fatal:
//!
//! | Problem | Outcome |
//! |---------|---------|
//! | Directory missing or unreadable | error logged, empty corpus |
//! | File name matches no platform | warning logged, file skipped |
//! | File unreadable or not a valid export | error logged, file contributes nothing |
//! | Single malformed record | error logged by the parser, record skipped |
//!
//! Files are processed in ascending file-name order, so loading the same
//! directory twice yields identical corpora.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatecho::ingest::load_corpus;
//!
//! let corpus = load_corpus("chat_exports");
//! println!("{}", corpus.stats());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::config::ParserConfig;
use crate::core::stats::LoadStats;
use crate::corpus::Corpus;
use crate::parser::{create_parser_with_config, log_file_error};

pub use crate::parser::detect_platform;

/// Extension of files considered for ingestion.
pub const EXPORT_EXTENSION: &str = ".json";

/// Loads every recognised export in `dir` with default parser settings.
pub fn load_corpus(dir: impl AsRef<Path>) -> Corpus {
    Ingestor::new().load(dir)
}

/// Loads export directories with a fixed parser configuration.
#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    config: ParserConfig,
}

impl Ingestor {
    /// Creates an ingestor with default parser settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an ingestor with custom parser settings.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Loads every recognised export in `dir`.
    ///
    /// Never fails; see the [module docs](self) for how each problem is
    /// handled.
    pub fn load(&self, dir: impl AsRef<Path>) -> Corpus {
        let dir = dir.as_ref();

        if !dir.exists() {
            error!("Chat exports directory '{}' not found.", dir.display());
            return Corpus::empty();
        }

        let files = match export_files(dir) {
            Ok(files) => files,
            Err(err) => {
                error!("Cannot list chat exports directory '{}': {err}", dir.display());
                return Corpus::empty();
            }
        };

        let mut messages = Vec::new();
        let mut stats = LoadStats::new();

        for (name, path) in files {
            stats.files_seen += 1;

            let Some(platform) = detect_platform(&name) else {
                warn!("Unknown chat service for file {name}. Skipping.");
                stats.files_skipped += 1;
                continue;
            };

            let parser = create_parser_with_config(platform, self.config.clone());
            match parser.try_parse(&path) {
                Ok(parsed) => {
                    debug!("Loaded {} {} messages from {name}", parsed.len(), parser.name());
                    stats.files_parsed += 1;
                    stats.add_messages(platform, parsed.len());
                    messages.extend(parsed);
                }
                Err(err) => {
                    log_file_error(&path, &err);
                    stats.files_failed += 1;
                }
            }
        }

        info!("Total messages loaded: {}", stats.messages);

        Corpus::new(messages, stats)
    }
}

/// `(file name, path)` of every regular `*.json` file, sorted by name.
fn export_files(dir: &Path) -> io::Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(dir)?.map(|entry| {
        entry.map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
    });
    Ok(keep_exports(dir, entries))
}

/// Filters listed entries down to export files. An entry that cannot be read
/// is logged and does not affect its siblings.
fn keep_exports(
    dir: &Path,
    entries: impl IntoIterator<Item = io::Result<(String, PathBuf)>>,
) -> Vec<(String, PathBuf)> {
    let mut files = Vec::new();

    for entry in entries {
        let (name, path) = match entry {
            Ok(entry) => entry,
            Err(err) => {
                error!(
                    "Cannot read an entry of chat exports directory '{}': {err}",
                    dir.display()
                );
                continue;
            }
        };
        if name.ends_with(EXPORT_EXTENSION) && path.is_file() {
            files.push((name, path));
        }
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    files
}
