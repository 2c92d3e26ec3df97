/*
turn_engine.rs

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

//! Manage the status of a round in progress.
//!
//! A [`TurnEngine`] object is created for a level, in the [`RoundStatus::Idle`] status.
//! [`TurnEngine::start_level`] starts the round: the engine generates the first combination
//! and the countdown starts.
//! Each time the player traces the combination, the matched tiles are replaced, the score
//! increases, and a new combination is generated.
//! The round ends when the countdown completes ([`RoundStatus::Expired`]).
//!
//! The presentation layer feeds the player input ([`TurnEngine::tile_engaged`],
//! [`TurnEngine::submit`], [`TurnEngine::check_not_found`]) and the time
//! ([`TurnEngine::tick`]), and reads back the [`Signal`] queue with
//! [`TurnEngine::drain_signals`].

use log::{debug, info};
use rand::Rng;
use rand::rngs::StdRng;
use std::fmt;
use thiserror::Error;

use crate::config::{NOT_FOUND_COOLDOWN_MS, NOT_FOUND_PENALTY_MS, RANDOM_COMBINATION_PROBABILITY};
use crate::countdown::Countdown;
use crate::puzzle::board::{Board, BoardError, Coordinate};
use crate::puzzle::levels::{Level, Mode};
use crate::puzzle::path::PlayedPath;
use crate::puzzle::symbols::{Symbol, SymbolGenerator};
use crate::signals::Signal;

/// Status of the round.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RoundStatus {
    /// The round has not started yet.
    Idle,

    /// The player is looking for combinations.
    InProgress,

    /// The countdown completed.
    Expired,
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RoundStatus::Idle => write!(f, "idle"),
            RoundStatus::InProgress => write!(f, "in progress"),
            RoundStatus::Expired => write!(f, "expired"),
        }
    }
}

/// Errors raised by [`TurnEngine`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The operation requires a round in progress.
    #[error("no round in progress (the round is {0})")]
    NotInProgress(RoundStatus),

    /// The combination cannot fit on the board.
    #[error("a combination of {length} symbols does not fit on a board of {cells} tiles")]
    InvalidComboLength { length: usize, cells: usize },

    /// Board error.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Result of [`TurnEngine::submit`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No tile was traced, nothing happens.
    Empty,

    /// The traced tiles spell the combination. The next turn started.
    Matched,

    /// The traced tiles do not spell the combination.
    Mismatched,
}

/// Result of [`TurnEngine::check_not_found`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The combination exists on the board. The countdown was penalized.
    Rejected,

    /// The combination does not exist on the board. The next turn started.
    Accepted,
}

/// Parameters of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundConfig {
    /// Level name.
    pub name: String,

    /// Number of symbols in the combinations (initial value for arcade mode).
    pub combo_length: usize,

    /// Initial board.
    pub board: Board,

    /// Countdown duration.
    pub duration_ms: u64,

    /// Turn policy.
    pub mode: Mode,
}

impl RoundConfig {
    /// Build the round parameters from a level definition.
    ///
    /// # Errors
    ///
    /// The method returns an error if the level board cannot be decoded.
    pub fn from_level(level: &Level) -> Result<Self, BoardError> {
        Ok(Self {
            name: level.name.to_string(),
            combo_length: level.combo_length,
            board: Board::from_data(level.board)?,
            duration_ms: level.time_ms,
            mode: level.mode,
        })
    }
}

/// Round state machine.
#[derive(Debug)]
pub struct TurnEngine {
    /// Round parameters. Used to restart the round.
    config: RoundConfig,

    /// Current board.
    board: Board,

    /// Generator of the replacement symbols.
    generator: SymbolGenerator,

    /// Random number generator for combinations, paths, and symbols.
    rng: StdRng,

    /// Round status.
    status: RoundStatus,

    /// Turn index. Starts at -1 before the first combination is generated.
    turn: i64,

    /// Number of combinations the player found.
    score: u32,

    /// Length of the combination of the current turn.
    combo_length: usize,

    /// Combination of the current turn.
    combination: Vec<Symbol>,

    /// Tiles that the player is tracing.
    played: PlayedPath,

    /// Round countdown.
    countdown: Countdown,

    /// Sum of all the ticks since the round started.
    clock_ms: u64,

    /// Round clock value until which "not found" claims should be ignored.
    claim_cooldown_until: Option<u64>,

    /// Signals not yet consumed by the presentation layer.
    signals: Vec<Signal>,
}

impl TurnEngine {
    /// Create a [`TurnEngine`] object for the given round parameters.
    ///
    /// # Errors
    ///
    /// The method returns an error if the combination length is zero or larger than the
    /// number of tiles.
    pub fn new(config: RoundConfig, rng: StdRng) -> Result<Self, EngineError> {
        let cells: usize = config.board.num_cells();
        if config.combo_length == 0 || config.combo_length > cells {
            return Err(EngineError::InvalidComboLength {
                length: config.combo_length,
                cells,
            });
        }

        Ok(Self {
            board: config.board.clone(),
            generator: SymbolGenerator::new(),
            rng,
            status: RoundStatus::Idle,
            turn: -1,
            score: 0,
            combo_length: config.combo_length,
            combination: Vec::new(),
            played: PlayedPath::new(),
            countdown: Countdown::new(config.duration_ms),
            clock_ms: 0,
            claim_cooldown_until: None,
            signals: Vec::new(),
            config,
        })
    }

    /// Start the round, or restart it from the initial board when the player retries.
    pub fn start_level(&mut self) -> Result<(), EngineError> {
        self.board = self.config.board.clone();
        self.generator = SymbolGenerator::new();
        self.turn = -1;
        self.score = 0;
        self.combo_length = self.config.combo_length;
        self.combination.clear();
        self.played.clear();
        self.countdown = Countdown::new(self.config.duration_ms);
        info!(
            "Starting {} on board {} (combination length {}, {}ms)",
            self.config.name,
            self.board.to_data(),
            self.combo_length,
            self.countdown.duration()
        );
        self.clock_ms = 0;
        self.claim_cooldown_until = None;
        self.status = RoundStatus::InProgress;
        self.advance(true)
    }

    /// Score the turn that just ended and start a new turn.
    ///
    /// # Errors
    ///
    /// The method returns an error if the round is not in progress.
    pub fn next_turn(&mut self) -> Result<(), EngineError> {
        self.ensure_in_progress()?;
        self.advance(true)
    }

    /// Start a new turn. The turn that just ended is scored only when `rewarded` is `true`.
    fn advance(&mut self, rewarded: bool) -> Result<(), EngineError> {
        let scored: bool = rewarded && self.turn >= 0;

        if scored {
            let bonus: u64 = self.config.mode.turn_bonus_ms();
            if bonus > 0 {
                self.countdown.increment_by(bonus);
                self.signals.push(Signal::TimeAdded(bonus));
            }
        }

        // The length depends on the score before the point of the ending turn is added
        self.combo_length = self
            .config
            .mode
            .combo_length(self.config.combo_length, self.score)
            .min(self.board.num_cells());

        if scored {
            self.score += 1;
            self.signals.push(Signal::ScoreIncremented(self.score));
        }
        self.turn += 1;
        self.combination = self.generate_combination()?;
        debug!(
            "Turn {}: combination {:?} (score {})",
            self.turn, self.combination, self.score
        );
        self.signals.push(Signal::CombinationChanged {
            combination: self.combination.clone(),
            success: true,
        });
        Ok(())
    }

    /// Generate the combination for the new turn.
    ///
    /// Most of the time the combination is read from a random path on the board, so it exists.
    /// Otherwise, the symbols are random and the combination might not exist.
    fn generate_combination(&mut self) -> Result<Vec<Symbol>, EngineError> {
        if !self.rng.random_bool(RANDOM_COMBINATION_PROBABILITY)
            && let Some(path) = self.board.find_random(self.combo_length, &mut self.rng)
        {
            return Ok(self.board.symbols_at(&path)?);
        }
        debug!("Random combination");
        Ok((0..self.combo_length)
            .map(|_| Symbol::random(&mut self.rng))
            .collect())
    }

    /// Add a tile to the path that the player is tracing.
    ///
    /// Return whether the tile was added. Tiles are ignored when the path is full, when they
    /// are already in the path, or when they are not adjacent to the last tile.
    ///
    /// # Errors
    ///
    /// The method returns an error if the round is not in progress or if the coordinate is
    /// outside the board.
    pub fn tile_engaged(&mut self, coord: Coordinate) -> Result<bool, EngineError> {
        self.ensure_in_progress()?;
        let symbol: Symbol = self.board.value_at(coord)?;
        Ok(self.played.push(coord, symbol, self.combination.len()))
    }

    /// Engage all the given tiles, in order. Return the number of tiles added to the path.
    ///
    /// # Errors
    ///
    /// See [`TurnEngine::tile_engaged`].
    pub fn trace(&mut self, coords: &[Coordinate]) -> Result<usize, EngineError> {
        let mut added: usize = 0;
        for coord in coords {
            if self.tile_engaged(*coord)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Evaluate the traced path against the combination.
    ///
    /// The combination can be traced in both directions. On a match, the tiles are replaced
    /// and the next turn starts. The traced path is always cleared.
    ///
    /// # Errors
    ///
    /// The method returns an error if the round is not in progress.
    pub fn submit(&mut self) -> Result<SubmitOutcome, EngineError> {
        self.ensure_in_progress()?;
        if self.played.is_empty() {
            return Ok(SubmitOutcome::Empty);
        }

        let coords: Vec<Coordinate> = self.played.coords();
        let matched: bool = self.played.matches(&self.combination);
        self.played.clear();

        if !matched {
            debug!("Path {coords:?} does not match {:?}", self.combination);
            self.signals.push(Signal::MatchFailed(coords));
            return Ok(SubmitOutcome::Mismatched);
        }

        let new_symbols: Vec<Symbol> = (0..coords.len())
            .map(|_| self.generator.next(&mut self.rng))
            .collect();
        self.board.replace(&coords, &new_symbols)?;
        debug!("Path {coords:?} matched, new symbols {new_symbols:?}");
        self.signals.push(Signal::TilesReplaced {
            coords,
            symbols: new_symbols,
        });
        self.next_turn()?;
        Ok(SubmitOutcome::Matched)
    }

    /// Process the player claim that the combination does not exist on the board.
    ///
    /// When the combination exists, the countdown is reduced and further claims should be
    /// ignored until [`TurnEngine::claim_ready`] returns `true`. Otherwise, the next turn
    /// starts without scoring a point.
    ///
    /// # Errors
    ///
    /// The method returns an error if the round is not in progress.
    pub fn check_not_found(&mut self) -> Result<ClaimOutcome, EngineError> {
        self.ensure_in_progress()?;

        if let Some(path) = self.board.find_exact(&self.combination) {
            debug!("Wrong claim: {:?} exists at {path:?}", self.combination);
            let completed: bool = self.countdown.reduce_by(NOT_FOUND_PENALTY_MS);
            self.claim_cooldown_until = Some(self.clock_ms + NOT_FOUND_COOLDOWN_MS);
            self.signals.push(Signal::NotFoundRejected);
            if completed {
                self.on_time_expired();
            }
            return Ok(ClaimOutcome::Rejected);
        }

        debug!("Right claim: {:?} does not exist", self.combination);
        self.advance(false)?;
        Ok(ClaimOutcome::Accepted)
    }

    /// Return the round clock value until which claims should be ignored, if a claim was
    /// rejected.
    pub fn claim_cooldown_until(&self) -> Option<u64> {
        self.claim_cooldown_until
    }

    /// Return the round clock, the sum of all the ticks since the round started.
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Whether the cooldown that follows a rejected claim is over.
    pub fn claim_ready(&self) -> bool {
        match self.claim_cooldown_until {
            Some(t) => self.clock_ms >= t,
            None => true,
        }
    }

    /// Advance the round time. The round expires when the countdown completes.
    ///
    /// Ticks are ignored when the round is not in progress.
    pub fn tick(&mut self, delta_ms: u64) {
        if self.status != RoundStatus::InProgress {
            return;
        }
        self.clock_ms += delta_ms;
        self.countdown.tick(delta_ms);
        if self.countdown.is_completed() {
            self.on_time_expired();
        }
    }

    /// End the round.
    pub fn on_time_expired(&mut self) {
        if self.status != RoundStatus::InProgress {
            return;
        }
        info!("{}: time is up, score {}", self.config.name, self.score);
        self.status = RoundStatus::Expired;
        self.combination.clear();
        self.played.clear();
        self.signals.push(Signal::CombinationChanged {
            combination: Vec::new(),
            success: false,
        });
        self.signals.push(Signal::RoundExpired(self.score));
    }

    /// Return and clear the queued signals.
    pub fn drain_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    /// Return an error if the round is not in progress.
    fn ensure_in_progress(&self) -> Result<(), EngineError> {
        if self.status == RoundStatus::InProgress {
            Ok(())
        } else {
            Err(EngineError::NotInProgress(self.status))
        }
    }

    /// Return the level name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Return the round status.
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Return the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Return the combination of the current turn.
    pub fn combination(&self) -> &[Symbol] {
        &self.combination
    }

    /// Return the path that the player is tracing.
    pub fn played(&self) -> &PlayedPath {
        &self.played
    }

    /// Return the score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Return the turn index.
    pub fn turn(&self) -> i64 {
        self.turn
    }

    /// Return the remaining time.
    pub fn remaining_ms(&self) -> u64 {
        self.countdown.remaining()
    }

    /// Replace the combination of the current turn.
    #[cfg(test)]
    fn force_combination(&mut self, combination: Vec<Symbol>) {
        self.combination = combination;
    }
}
