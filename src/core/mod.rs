//! Replay logic built on top of a loaded corpus.
//!
//! This module contains:
//! - [`query`] - Random message selection with sender exclusion
//! - [`schedule`] - Posting window, daily cap and per-tick probability
//! - [`session`] - Echo and scheduled-post state
//! - [`snipe`] - Last deleted message
//! - [`wotd`] - Word of the day store
//! - [`render`] - Cards shown to chat users
//! - [`stats`] - Load statistics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chatecho::core::{ReplaySession, echo_embed};
//! use chatecho::config::ScheduleConfig;
//! use chatecho::ingest::load_corpus;
//! use chrono::Local;
//!
//! let corpus = load_corpus("chat_exports");
//! let today = Local::now().date_naive();
//! let mut session = ReplaySession::new(corpus, ScheduleConfig::default(), today);
//!
//! match session.echo(None, &mut rand::thread_rng()) {
//!     Ok(message) => println!("{}", echo_embed(&message)),
//!     Err(reply) => println!("{reply}"),
//! }
//! ```

pub mod query;
pub mod render;
pub mod schedule;
pub mod session;
pub mod snipe;
pub mod stats;
pub mod wotd;

pub use query::EchoQuery;
pub use render::{Embed, echo_embed, echo_header, snipe_embed, wotd_embed};
pub use schedule::{PostSchedule, TickDecision};
pub use session::ReplaySession;
pub use snipe::{ChannelId, DeletedMessage, SnipeCache};
pub use stats::LoadStats;
pub use wotd::{WordOfTheDay, WotdStore};

// Re-export Message from the crate root
pub use crate::Message;
