/*
levels.rs

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

//! Level catalogue.
//!
//! For developers: add your new level to the list returned by [`level_list`].
//! The board is given in the textual representation described in [`super::board`].

use std::fmt;

use crate::config::{ARCADE_BONUS_MS, MAX_COMBO_LENGTH};
use crate::highscores::HighScores;

/// Name of the arcade level.
pub const ARCADE: &str = "ARCADE";

/// How the turns of a level evolve.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Fixed combination length, the countdown never gets extra time.
    #[default]
    Standard,

    /// The combination grows with the score, and each successful turn adds time to the
    /// countdown.
    Arcade,
}

impl Mode {
    /// Return the combination length for the next turn.
    ///
    /// The `score` parameter is the score before the point of the turn that just ended is
    /// added.
    pub fn combo_length(&self, base_length: usize, score: u32) -> usize {
        match self {
            Mode::Standard => base_length,
            Mode::Arcade => {
                (base_length + (score as usize + 1) / 10).min(MAX_COMBO_LENGTH.max(base_length))
            }
        }
    }

    /// Return the time given back to the player after a successful turn.
    pub fn turn_bonus_ms(&self) -> u64 {
        match self {
            Mode::Standard => 0,
            Mode::Arcade => ARCADE_BONUS_MS,
        }
    }
}

/// Condition to unlock a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockRule {
    /// Level in which the player must score.
    pub level: &'static str,

    /// The best score in [`UnlockRule::level`] must be strictly above this value.
    pub above: u32,
}

impl fmt::Display for UnlockRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "SCORE MORE THAN {} POINTS IN '{}' TO UNLOCK",
            self.above, self.level
        )
    }
}

/// Level parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    /// Level name, which is also the key of its high score.
    pub name: &'static str,

    /// Number of symbols in the combinations (initial value for arcade mode).
    pub combo_length: usize,

    /// Initial board.
    pub board: &'static str,

    /// Countdown duration.
    pub time_ms: u64,

    /// Turn policy.
    pub mode: Mode,

    /// Condition to unlock the level. None for levels that are always available.
    pub unlock: Option<UnlockRule>,
}

impl Level {
    /// Whether the player still has to unlock the level.
    pub fn is_locked(&self, highscores: &HighScores) -> bool {
        match self.unlock {
            Some(rule) => highscores.get_best(rule.level) <= rule.above,
            None => false,
        }
    }
}

/// Return the list of the levels, in menu order.
pub fn level_list() -> Vec<Level> {
    vec![
        Level {
            name: "3 IN A ROW",
            combo_length: 3,
            board: "c6 c6 c6",
            time_ms: 60000,
            mode: Mode::Standard,
            unlock: None,
        },
        Level {
            name: "GET SQUARE",
            combo_length: 4,
            board: "55 55 55",
            time_ms: 60000,
            mode: Mode::Standard,
            unlock: Some(UnlockRule {
                level: "3 IN A ROW",
                above: 20,
            }),
        },
        Level {
            name: "HIGH FIVE",
            combo_length: 5,
            board: "f1 78 1a",
            time_ms: 60000,
            mode: Mode::Standard,
            unlock: Some(UnlockRule {
                level: "GET SQUARE",
                above: 15,
            }),
        },
        Level {
            name: "SIX PACK",
            combo_length: 6,
            board: "eb 69 28",
            time_ms: 60000,
            mode: Mode::Standard,
            unlock: Some(UnlockRule {
                level: ARCADE,
                above: 30,
            }),
        },
        Level {
            name: ARCADE,
            combo_length: 3,
            board: "e4 1b b4",
            time_ms: 60000,
            mode: Mode::Arcade,
            unlock: Some(UnlockRule {
                level: "HIGH FIVE",
                above: 10,
            }),
        },
    ]
}

/// Return the level with the given name. The name is not case sensitive.
pub fn find_level(name: &str) -> Option<Level> {
    level_list()
        .into_iter()
        .find(|l| l.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::board::Board;

    #[test]
    fn test_boards_are_valid() {
        for level in level_list() {
            let board: Board = Board::from_data(level.board).unwrap();
            assert_eq!((board.width(), board.height()), (4, 3), "{}", level.name);
            assert!(level.combo_length <= board.num_cells());
        }
    }

    #[test]
    fn test_find_level() {
        assert_eq!(find_level("get square").unwrap().combo_length, 4);
        assert_eq!(find_level(" Arcade ").unwrap().mode, Mode::Arcade);
        assert!(find_level("unknown").is_none());
    }

    #[test]
    fn test_arcade_combo_length() {
        let mode: Mode = Mode::Arcade;
        assert_eq!(mode.combo_length(3, 0), 3);
        assert_eq!(mode.combo_length(3, 8), 3);
        assert_eq!(mode.combo_length(3, 9), 4);
        assert_eq!(mode.combo_length(3, 29), 6);
        assert_eq!(mode.combo_length(3, 100), 6);
        assert_eq!(Mode::Standard.combo_length(5, 100), 5);
    }

    #[test]
    fn test_locks() {
        let mut highscores: HighScores = HighScores::new();
        let get_square: Level = find_level("GET SQUARE").unwrap();
        assert!(!find_level("3 IN A ROW").unwrap().is_locked(&highscores));
        assert!(get_square.is_locked(&highscores));

        highscores.add_score("3 IN A ROW", 20);
        assert!(get_square.is_locked(&highscores));
        highscores.add_score("3 IN A ROW", 21);
        assert!(!get_square.is_locked(&highscores));
        assert_eq!(
            get_square.unlock.unwrap().to_string(),
            "SCORE MORE THAN 20 POINTS IN '3 IN A ROW' TO UNLOCK"
        );
    }
}
