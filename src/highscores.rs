/*
highscores.rs

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

//! Manage the best score of each level.
//!
//! The main object, [`HighScores`], maintains the best score for each level name.
//! It is part of the player progress, which is saved at the end of each round and restored
//! when Connection starts (see [`crate::saver::progress`]).

use log::debug;
use std::collections::HashMap;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Best score of a level.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Record {
    /// Number of combinations found during the round.
    pub score: u32,

    /// Completion timestamp, which is used to display when the record was set.
    pub when: SystemTime,
}

/// List of the best scores, indexed by level name.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HighScores {
    /// Map of the [`Record`] objects indexed by the level name.
    board: HashMap<String, Record>,
}

impl HighScores {
    /// Create a [`HighScores`] object.
    pub fn new() -> Self {
        Self {
            board: HashMap::new(),
        }
    }

    /// Record the score of a round. The score replaces the record only if it is strictly
    /// higher.
    ///
    /// Return whether the score is a new record.
    pub fn add_score(&mut self, level_name: &str, score: u32) -> bool {
        let previous_best: u32 = self.get_best(level_name);

        if score <= previous_best {
            return false;
        }
        debug!("New record for {level_name}: {score} (previous {previous_best})");
        self.board.insert(
            level_name.to_string(),
            Record {
                score,
                when: SystemTime::now(),
            },
        );
        true
    }

    /// Return the best score for the given level, or 0 if the level has never been played.
    pub fn get_best(&self, level_name: &str) -> u32 {
        self.board.get(level_name).map_or(0, |r| r.score)
    }

    /// Return the [`Record`] of the given level.
    pub fn get_record(&self, level_name: &str) -> Option<&Record> {
        self.board.get(level_name)
    }
}
