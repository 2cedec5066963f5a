// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::Utc;
use lifeline_model::{Seconds, datetime_to_seconds};

/// Source of the real-world "now" instant.
///
/// This is calendar time, used for the "now" line and for how far ongoing
/// branches extend. Animation timing uses the host's monotonic milliseconds
/// instead, passed to each call.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Seconds;
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Seconds {
        datetime_to_seconds(&Utc::now())
    }
}

/// A clock that only moves when told to.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FixedClock {
    now: Seconds,
}

impl FixedClock {
    /// A clock stopped at `now`.
    #[must_use]
    pub fn new(now: Seconds) -> Self {
        Self { now }
    }

    /// Moves the clock to `now`.
    pub fn set(&mut self, now: Seconds) {
        self.now = now;
    }

    /// Moves the clock forward by `by` seconds.
    pub fn advance(&mut self, by: Seconds) {
        self.now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Seconds {
        self.now
    }
}
