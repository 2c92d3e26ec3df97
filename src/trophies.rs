/*
trophies.rs

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

//! Trophies that the player unlocks by playing.
//!
//! The trophy status is stored in the [`Progress`] object. Call [`update_trophy_status`] after
//! the progress changes (new login, new record) to unlock the trophies whose condition is now
//! met.

use log::info;

use crate::progress::Progress;

/// Condition to unlock a trophy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// The game has been started more than the given number of times.
    Logins(u32),

    /// The best score of the level is strictly above the given value.
    BestAbove { level: &'static str, above: u32 },

    /// All the other trophies are unlocked.
    AllOthers,
}

/// Trophy definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trophy {
    /// Trophy name, which is the key in the player progress.
    pub name: &'static str,

    /// How to get the trophy.
    pub message: &'static str,

    /// Unlock condition.
    pub condition: Condition,
}

/// List of the trophies. [`Condition::AllOthers`] must stay at the end of the list.
pub static TROPHIES: &[Trophy] = &[
    Trophy {
        name: "WELCOME BACK",
        message: "OPEN THE GAME TWICE",
        condition: Condition::Logins(1),
    },
    Trophy {
        name: "RETURNING CUSTOMER",
        message: "OPEN THE GAME TEN TIMES",
        condition: Condition::Logins(10),
    },
    Trophy {
        name: "TIME TO SETTLE IT DOWN",
        message: "UNLOCK 'GET SQUARE'",
        condition: Condition::BestAbove {
            level: "3 IN A ROW",
            above: 20,
        },
    },
    Trophy {
        name: "YOU'RE AWESOME",
        message: "UNLOCK 'HIGH FIVE'",
        condition: Condition::BestAbove {
            level: "GET SQUARE",
            above: 15,
        },
    },
    Trophy {
        name: "THEORETICALLY ENDLESS FUN",
        message: "UNLOCK 'ARCADE'",
        condition: Condition::BestAbove {
            level: "HIGH FIVE",
            above: 10,
        },
    },
    Trophy {
        name: "CULTURIST",
        message: "UNLOCK 'SIX PACK'",
        condition: Condition::BestAbove {
            level: "ARCADE",
            above: 30,
        },
    },
    Trophy {
        name: "BEAT THE CREATOR I",
        message: "SCORE MORE THAN 31 POINTS IN '3 IN A ROW'",
        condition: Condition::BestAbove {
            level: "3 IN A ROW",
            above: 31,
        },
    },
    Trophy {
        name: "BEAT THE CREATOR II",
        message: "SCORE MORE THAN 25 POINTS IN 'GET SQUARE'",
        condition: Condition::BestAbove {
            level: "GET SQUARE",
            above: 25,
        },
    },
    Trophy {
        name: "BEAT THE CREATOR III",
        message: "SCORE MORE THAN 16 POINTS IN 'HIGH FIVE'",
        condition: Condition::BestAbove {
            level: "HIGH FIVE",
            above: 16,
        },
    },
    Trophy {
        name: "BEAT THE CREATOR IV",
        message: "SCORE MORE THAN 43 POINTS IN 'ARCADE'",
        condition: Condition::BestAbove {
            level: "ARCADE",
            above: 43,
        },
    },
    Trophy {
        name: "BEAT THE CREATOR V",
        message: "SCORE MORE THAN 12 POINTS IN 'SIX PACK'",
        condition: Condition::BestAbove {
            level: "SIX PACK",
            above: 12,
        },
    },
    Trophy {
        name: "ALL STARS",
        message: "UNLOCK ALL TROPHIES",
        condition: Condition::AllOthers,
    },
];

impl Trophy {
    /// Whether the unlock condition is met.
    pub fn is_met(&self, progress: &Progress) -> bool {
        match self.condition {
            Condition::Logins(count) => progress.logins() > count,
            Condition::BestAbove { level, above } => progress.highscores.get_best(level) > above,
            Condition::AllOthers => TROPHIES
                .iter()
                .filter(|t| t.name != self.name)
                .all(|t| progress.has_trophy(t.name)),
        }
    }
}

/// Unlock the trophies whose condition is met, and return the newly unlocked trophies.
///
/// The trophies are processed in the [`TROPHIES`] order, so a trophy sees the trophies unlocked
/// before it during the same call.
pub fn update_trophy_status(progress: &mut Progress) -> Vec<&'static Trophy> {
    let mut unlocked: Vec<&'static Trophy> = Vec::new();

    for trophy in TROPHIES {
        if !progress.has_trophy(trophy.name) && trophy.is_met(progress) {
            info!("Trophy unlocked: {}", trophy.name);
            progress.unlock_trophy(trophy.name);
            unlocked.push(trophy);
        }
    }
    unlocked
}
