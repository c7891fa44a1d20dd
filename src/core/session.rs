//! Replay session state.
//!
//! A [`ReplaySession`] owns the corpus plus the little state the bot keeps
//! between replays: who was echoed last, how many scheduled posts went out
//! today, and which day that counter belongs to. Time and randomness are
//! passed in by the caller so the whole flow is deterministic under test.
//!
//! # Example
//!
//! ```
//! use chatecho::config::ScheduleConfig;
//! use chatecho::core::session::ReplaySession;
//! use chatecho::corpus::Corpus;
//! use chatecho::parser::Platform;
//! use chatecho::Message;
//! use chrono::{NaiveDate, Utc};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let corpus = Corpus::from_messages(vec![
//!     Message::new("Alice", "Anyone up for pizza tonight?", Utc::now(), Platform::Facebook),
//!     Message::new("Bob", "Only if it has pineapple on it", Utc::now(), Platform::Facebook),
//! ]);
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let mut session = ReplaySession::new(corpus, ScheduleConfig::default(), today);
//! let mut rng = StdRng::seed_from_u64(1);
//!
//! let first = session.echo(None, &mut rng).unwrap();
//! let second = session.echo(None, &mut rng).unwrap();
//! assert_ne!(first.sender, second.sender);
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use crate::Message;
use crate::config::ScheduleConfig;
use crate::core::query::EchoQuery;
use crate::core::render::echo_header;
use crate::core::schedule::{PostSchedule, TickDecision};
use crate::corpus::Corpus;
use crate::error::EchoError;
use crate::parser::Platform;

/// Corpus plus replay state.
#[derive(Debug, Clone)]
pub struct ReplaySession {
    corpus: Corpus,
    schedule: PostSchedule,
    last_sender: Option<String>,
    posted_today: u32,
    last_reset: NaiveDate,
}

impl ReplaySession {
    /// Starts a session on `today` with nothing posted yet.
    pub fn new(corpus: Corpus, schedule: ScheduleConfig, today: NaiveDate) -> Self {
        Self {
            corpus,
            schedule: PostSchedule::new(schedule),
            last_sender: None,
            posted_today: 0,
            last_reset: today,
        }
    }

    /// The replayed corpus.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The posting policy.
    pub fn schedule(&self) -> &PostSchedule {
        &self.schedule
    }

    /// Sender of the most recent echo or scheduled post.
    pub fn last_sender(&self) -> Option<&str> {
        self.last_sender.as_deref()
    }

    /// Scheduled posts made since the last reset.
    pub fn posted_today(&self) -> u32 {
        self.posted_today
    }

    /// Day the post counter belongs to.
    pub fn last_reset_date(&self) -> NaiveDate {
        self.last_reset
    }

    /// Replays a random message on request.
    ///
    /// Avoids repeating the previous sender when possible. Echoes do not
    /// count towards the daily cap.
    ///
    /// # Errors
    ///
    /// Returns [`EchoError`] when there is nothing to pick from.
    pub fn echo<R>(&mut self, source: Option<Platform>, rng: &mut R) -> Result<Message, EchoError>
    where
        R: Rng + ?Sized,
    {
        let mut query = EchoQuery::new();
        query.source = source;
        query.exclude_sender.clone_from(&self.last_sender);

        let Some(picked) = query.pick(&self.corpus, rng) else {
            return Err(source.map_or(EchoError::NoMessages, EchoError::NoMessagesFrom));
        };

        let picked = picked.clone();
        self.last_sender = Some(picked.sender.clone());
        Ok(picked)
    }

    /// Runs one scheduler tick at local time `now`.
    ///
    /// Resets the daily counter when the date has changed, then posts a
    /// message drawn uniformly from the whole corpus if the schedule allows.
    /// Scheduled posts do not avoid the previous sender.
    pub fn tick<R>(&mut self, now: NaiveDateTime, rng: &mut R) -> Option<Message>
    where
        R: Rng + ?Sized,
    {
        let today = now.date();
        if today != self.last_reset {
            self.posted_today = 0;
            self.last_reset = today;
            info!("Reset daily post counter for {today}.");
        }

        let decision = self.schedule.decide(now.time(), self.posted_today, rng);
        if decision != TickDecision::Post {
            return None;
        }

        let Some(picked) = self.corpus.messages().choose(rng) else {
            warn!("No messages loaded; nothing to post.");
            return None;
        };

        let picked = picked.clone();
        self.last_sender = Some(picked.sender.clone());
        self.posted_today += 1;
        info!(
            "Posted a message from {}. Total today: {}",
            echo_header(&picked),
            self.posted_today
        );
        Some(picked)
    }

    /// Runs a tick for every minute of `date` and returns what was posted.
    pub fn simulate_day<R>(&mut self, date: NaiveDate, rng: &mut R) -> Vec<(NaiveDateTime, Message)>
    where
        R: Rng + ?Sized,
    {
        let mut posts = Vec::new();
        let Some(start) = date.and_hms_opt(0, 0, 0) else {
            return posts;
        };

        for minute in 0..24 * 60 {
            let now = start + chrono::Duration::minutes(minute);
            if let Some(message) = self.tick(now, rng) {
                posts.push((now, message));
            }
        }

        debug!("Simulated {date}: {} scheduled post(s)", posts.len());
        posts
    }
}
