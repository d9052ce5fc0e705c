//! STC Poll Scheduling
//!
//! Tune and seek complete asynchronously inside the chip; the driver
//! learns about it by re-reading STATUSRSSI until STC reaches the level
//! it is waiting for. Every such wait is bounded by a [`PollPolicy`] so a
//! chip that never reports completion yields a timeout instead of a hang.

use core::fmt;

/// Growth of the delay between consecutive polls
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Backoff {
    /// Same delay between every poll
    #[default]
    Fixed,
    /// Delay doubles after every poll, capped at `max_interval_ms`
    Exponential {
        /// Upper bound for the delay
        max_interval_ms: u32,
    },
}

/// Bounded poll cadence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay before the second poll (and every later one for `Fixed`)
    pub interval_ms: u32,
    /// Maximum number of status reads; 0 is treated as 1
    pub max_polls: u32,
    /// Delay growth
    pub backoff: Backoff,
}

impl PollPolicy {
    /// Create a policy
    #[must_use]
    pub const fn new(interval_ms: u32, max_polls: u32, backoff: Backoff) -> Self {
        Self {
            interval_ms,
            max_polls,
            backoff,
        }
    }

    /// Fixed-interval policy
    #[must_use]
    pub const fn fixed(interval_ms: u32, max_polls: u32) -> Self {
        Self::new(interval_ms, max_polls, Backoff::Fixed)
    }

    /// Start a fresh schedule
    #[must_use]
    pub const fn schedule(self) -> PollSchedule {
        PollSchedule {
            policy: self,
            attempt: 0,
            interval_ms: self.interval_ms,
        }
    }

    /// Worst-case time spent sleeping before the policy gives up
    #[must_use]
    pub fn budget_ms(self) -> u64 {
        let mut schedule = self.schedule();
        let mut total = 0u64;
        schedule.begin();
        while let Some(delay) = schedule.next_delay() {
            total += u64::from(delay);
            schedule.begin();
        }
        total
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PollPolicy {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Poll({}ms x{})", self.interval_ms, self.max_polls);
    }
}

/// Running state of one bounded wait
#[derive(Clone, Copy, Debug)]
pub struct PollSchedule {
    policy: PollPolicy,
    attempt: u32,
    interval_ms: u32,
}

impl PollSchedule {
    /// Account for a poll about to be made, returns its 1-based number
    pub fn begin(&mut self) -> u32 {
        self.attempt += 1;
        self.attempt
    }

    /// Number of polls made so far
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempt
    }

    /// Delay before the next poll, or None once the budget is spent
    pub fn next_delay(&mut self) -> Option<u32> {
        if self.attempt >= self.policy.max_polls.max(1) {
            return None;
        }

        let delay = self.interval_ms;
        if let Backoff::Exponential { max_interval_ms } = self.policy.backoff {
            let grown = if delay == 0 { 1 } else { delay.saturating_mul(2) };
            self.interval_ms = grown.min(max_interval_ms);
        }
        Some(delay)
    }
}

/// Which wait a poll belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollPhase {
    /// Waiting for STC after setting TUNE
    TuneComplete,
    /// Waiting after clearing TUNE
    TuneAcknowledged,
    /// Waiting for STC after setting SEEK
    SeekComplete,
    /// Waiting after clearing SEEK
    SeekAcknowledged,
}

impl PollPhase {
    /// Short name for logs
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TuneComplete => "tune complete",
            Self::TuneAcknowledged => "tune acknowledged",
            Self::SeekComplete => "seek complete",
            Self::SeekAcknowledged => "seek acknowledged",
        }
    }

    /// Check if this phase belongs to a seek
    #[must_use]
    pub const fn is_seek(self) -> bool {
        matches!(self, Self::SeekComplete | Self::SeekAcknowledged)
    }
}

impl fmt::Display for PollPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PollPhase {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.name());
    }
}
