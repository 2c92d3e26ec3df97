/*
signals.rs

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

//! Messages from the turn engine to the presentation layer.
//!
//! The engine queues the signals while it processes an input, and the presentation layer
//! drains the queue afterward to animate the board, play sounds, or update the score.

use crate::puzzle::board::Coordinate;
use crate::puzzle::symbols::Symbol;

/// Signal emitted by [`crate::turn_engine::TurnEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// New combination to display. `success` is `false` when the round ends and the
    /// combination is cleared.
    CombinationChanged {
        combination: Vec<Symbol>,
        success: bool,
    },

    /// The player scored a point. Holds the new score.
    ScoreIncremented(u32),

    /// The matched tiles were removed and their columns refilled with the given symbols.
    TilesReplaced {
        coords: Vec<Coordinate>,
        symbols: Vec<Symbol>,
    },

    /// The traced tiles do not spell the combination.
    MatchFailed(Vec<Coordinate>),

    /// The combination exists on the board, so the "not found" claim is refused and the
    /// countdown penalized.
    NotFoundRejected,

    /// Extra time was given to the player.
    TimeAdded(u64),

    /// The round ended. Holds the final score.
    RoundExpired(u32),
}
