/*
countdown.rs

Copyright 2025 The Connection contributors

This file is part of Connection.

Connection is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Connection is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Connection. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Round countdown.
//!
//! Time is in milliseconds and is only advanced by the caller, through [`Countdown::tick`].

use log::debug;

/// Countdown of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    /// Total duration.
    duration: u64,

    /// Elapsed time, between 0 and [`Countdown::duration`].
    progress: u64,

    /// Whether the countdown reached its end.
    completed: bool,
}

impl Countdown {
    /// Create a [`Countdown`] object.
    pub fn new(duration: u64) -> Self {
        Self {
            duration,
            progress: 0,
            completed: false,
        }
    }

    /// Advance the countdown.
    ///
    /// Return `true` only for the call that completes the countdown.
    pub fn tick(&mut self, delta: u64) -> bool {
        if self.completed {
            return false;
        }
        self.progress = self.progress.saturating_add(delta).min(self.duration);
        if self.progress == self.duration {
            debug!("Countdown completed");
            self.completed = true;
            return true;
        }
        false
    }

    /// Remove time from the countdown, as a penalty.
    ///
    /// Return `true` if the penalty completes the countdown.
    pub fn reduce_by(&mut self, time: u64) -> bool {
        self.tick(time)
    }

    /// Give time back to the player. The remaining time cannot exceed the duration.
    pub fn increment_by(&mut self, time: u64) {
        if !self.completed {
            self.progress = self.progress.saturating_sub(time);
        }
    }

    /// Return the remaining time.
    pub fn remaining(&self) -> u64 {
        self.duration - self.progress
    }

    /// Return the total duration.
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Whether the countdown reached its end.
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_completes_once() {
        let mut countdown: Countdown = Countdown::new(1000);
        assert!(!countdown.tick(400));
        assert_eq!(countdown.remaining(), 600);
        assert!(countdown.tick(700));
        assert_eq!(countdown.remaining(), 0);
        assert!(countdown.is_completed());
        assert!(!countdown.tick(10));
    }

    #[test]
    fn test_reduce_and_increment() {
        let mut countdown: Countdown = Countdown::new(60000);
        countdown.tick(10000);
        assert!(!countdown.reduce_by(2000));
        assert_eq!(countdown.remaining(), 48000);

        countdown.increment_by(2000);
        assert_eq!(countdown.remaining(), 50000);

        // Cannot go above the initial duration
        countdown.increment_by(20000);
        assert_eq!(countdown.remaining(), 60000);

        assert!(countdown.reduce_by(70000));
        assert!(countdown.is_completed());
        countdown.increment_by(2000);
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn test_zero_duration() {
        let mut countdown: Countdown = Countdown::new(0);
        assert!(countdown.tick(0));
    }
}
