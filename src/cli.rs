//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - Global options and the chosen subcommand
//! - [`Command`] - `stats`, `echo`, `simulate` and `wotd`
//! - [`WotdAction`] - Word of the day subcommands
//!
//! Platforms are parsed through [`Platform`]'s `FromStr`, so every alias the
//! library accepts (`fb`, `dc`, any casing) works on the command line too.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};

use crate::error::ChatechoError;
use crate::parser::Platform;

/// Replay random messages from old Facebook and Discord chat exports.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatecho")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatecho stats chat_exports
    chatecho echo --source facebook --count 3
    chatecho echo -s dc --seed 42
    chatecho simulate --date 2024-06-01 --seed 7
    chatecho wotd set petrichor \"the smell of rain on dry earth\"
    chatecho --config bot.json wotd show")]
pub struct Args {
    /// JSON config file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// What to do.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load every export and print load statistics
    Stats {
        /// Export directory (defaults to `export_dir` from the config)
        dir: Option<PathBuf>,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print random messages from the past
    Echo {
        /// Export directory (defaults to `export_dir` from the config)
        dir: Option<PathBuf>,

        /// Only echo messages from this platform (facebook, fb, discord, dc)
        #[arg(short, long, value_name = "PLATFORM")]
        source: Option<Platform>,

        /// Number of echoes
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Seed for reproducible picks
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run the scheduled replay over one day and print what would be posted
    Simulate {
        /// Export directory (defaults to `export_dir` from the config)
        dir: Option<PathBuf>,

        /// Day to simulate (defaults to today)
        #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show or set the word of the day
    Wotd {
        #[command(subcommand)]
        action: WotdAction,
    },
}

impl Command {
    /// Export directory given on the command line, if the command takes one.
    pub fn dir(&self) -> Option<&Path> {
        match self {
            Command::Stats { dir, .. }
            | Command::Echo { dir, .. }
            | Command::Simulate { dir, .. } => dir.as_deref(),
            Command::Wotd { .. } => None,
        }
    }
}

/// Word of the day subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum WotdAction {
    /// Print today's word, if set
    Show,

    /// Store a word and its definition for today
    Set {
        /// The word
        word: String,

        /// Its definition
        definition: String,
    },
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`ChatechoError::InvalidDate`] for anything else.
pub fn parse_date(input: &str) -> Result<NaiveDate, ChatechoError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| ChatechoError::invalid_date(input))
}
