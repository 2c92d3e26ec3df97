/*
progress.rs

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

//! Player progress that survives between sessions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::highscores::HighScores;

/// Player progress.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Progress {
    /// Best score of each level.
    pub highscores: HighScores,

    /// Names of the unlocked trophies.
    trophies: BTreeSet<String>,

    /// Names of the levels that the player has already seen unlocked.
    unlocked_levels: BTreeSet<String>,

    /// Number of times the game was started.
    logins: u32,
}

impl Progress {
    /// Create a [`Progress`] object.
    pub fn new() -> Self {
        Self {
            highscores: HighScores::new(),
            trophies: BTreeSet::new(),
            unlocked_levels: BTreeSet::new(),
            logins: 0,
        }
    }

    /// Count a new game start.
    pub fn record_login(&mut self) {
        self.logins += 1;
    }

    /// Return the number of game starts.
    pub fn logins(&self) -> u32 {
        self.logins
    }

    /// Whether the trophy is unlocked.
    pub fn has_trophy(&self, name: &str) -> bool {
        self.trophies.contains(name)
    }

    /// Unlock a trophy. Return `false` if it was already unlocked.
    pub fn unlock_trophy(&mut self, name: &str) -> bool {
        self.trophies.insert(name.to_string())
    }

    /// Remember that the player has seen the level unlocked.
    ///
    /// Return `true` the first time, so that the level can be announced as new.
    pub fn mark_level_unlocked(&mut self, name: &str) -> bool {
        self.unlocked_levels.insert(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_progress_is_empty() {
        let progress: Progress = Progress::new();
        assert_eq!(progress, Progress::default());
        assert_eq!(progress.logins(), 0);
        assert_eq!(progress.highscores.get_best("3 IN A ROW"), 0);
    }

    #[test]
    fn test_flags() {
        let mut progress: Progress = Progress::new();
        progress.record_login();
        progress.record_login();
        assert_eq!(progress.logins(), 2);

        assert!(!progress.has_trophy("WELCOME BACK"));
        assert!(progress.unlock_trophy("WELCOME BACK"));
        assert!(!progress.unlock_trophy("WELCOME BACK"));
        assert!(progress.has_trophy("WELCOME BACK"));

        assert!(progress.mark_level_unlocked("GET SQUARE"));
        assert!(!progress.mark_level_unlocked("GET SQUARE"));
    }
}
