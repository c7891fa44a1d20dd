//! Decision logic for the per-minute scheduled replay.
//!
//! The bot ticks once a minute. A tick may post only inside the configured
//! window, only while the daily cap has not been reached, and then only with
//! a small probability so that posts are spread over the day.

use chrono::NaiveTime;
use rand::Rng;

use crate::config::ScheduleConfig;

/// Outcome of one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDecision {
    /// The tick time is outside the posting window.
    OutsideWindow,
    /// The daily cap has already been reached.
    CapReached,
    /// Eligible, but the probability roll said no.
    Skipped,
    /// A message should be posted now.
    Post,
}

impl TickDecision {
    /// Returns `true` for [`TickDecision::Post`].
    pub fn is_post(self) -> bool {
        self == TickDecision::Post
    }
}

/// Stateless posting policy built from a [`ScheduleConfig`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostSchedule {
    config: ScheduleConfig,
}

impl PostSchedule {
    /// Creates a schedule from its configuration.
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Decides whether a tick at `time` posts, given how many scheduled posts
    /// already went out today.
    ///
    /// The probability roll only happens for eligible ticks.
    pub fn decide<R>(&self, time: NaiveTime, posted_today: u32, rng: &mut R) -> TickDecision
    where
        R: Rng + ?Sized,
    {
        if !self.config.in_window(time) {
            return TickDecision::OutsideWindow;
        }
        if posted_today >= self.config.daily_cap {
            return TickDecision::CapReached;
        }
        if rng.gen_range(0.0..1.0) < self.config.tick_probability {
            TickDecision::Post
        } else {
            TickDecision::Skipped
        }
    }
}
