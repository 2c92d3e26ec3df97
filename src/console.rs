/*
console.rs

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

//! Play in a terminal.
//!
//! The board is printed as text with the column numbers on top and the row numbers on the
//! left. The player traces a path by entering the coordinates of the tiles, as `x,y` pairs
//! separated by spaces, and then presses Enter to submit the path:
//!
//! ```text
//! Turn 1    Combination: ✖ ▲ ■    Score: 0    Time: 60.0s
//!
//!     0 1 2 3
//!  0  ✖ ▲ ■ ●
//!  1  ✖ ▲ ■ ●
//!  2  ✖ ▲ ■ ●
//!
//! > 0,0 1,0 2,0
//! ```
//!
//! Enter `404` when the combination does not exist on the board, and `q` to stop the round.
//! The time spent between two inputs is removed from the countdown.

use chrono::{DateTime, Local};
use log::debug;
use std::error::Error;
use std::io::{BufRead, Write};
use std::time::Instant;
use thiserror::Error;

use crate::progress::Progress;
use crate::puzzle::board::{Board, Coordinate};
use crate::puzzle::levels::{Level, level_list};
use crate::puzzle::symbols::Symbol;
use crate::signals::Signal;
use crate::trophies::{TROPHIES, Trophy, update_trophy_status};
use crate::turn_engine::{RoundStatus, TurnEngine};

/// Player input that cannot be understood.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("'{0}' is not a coordinate. Use x,y (for example 0,2)")]
    InvalidCoordinate(String),
}

/// Player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Trace the tiles and submit the path.
    Trace(Vec<Coordinate>),

    /// Claim that the combination does not exist.
    NotFound,

    /// Stop the round.
    Quit,

    /// Display the board again.
    Show,
}

/// Parse a line of player input.
///
/// # Errors
///
/// The function returns an error when a token is not an `x,y` coordinate.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line: &str = line.trim();

    match line {
        "" => return Ok(Command::Show),
        "404" => return Ok(Command::NotFound),
        "q" | "Q" | "quit" => return Ok(Command::Quit),
        _ => (),
    }

    // Spaces around the commas are allowed
    let line: String = line
        .split(',')
        .map(str::trim)
        .collect::<Vec<&str>>()
        .join(",");

    let mut coords: Vec<Coordinate> = Vec::new();
    for token in line.split_whitespace() {
        let coord: Option<Coordinate> = token.split_once(',').and_then(|(x, y)| {
            Some(Coordinate::new(
                x.parse::<usize>().ok()?,
                y.parse::<usize>().ok()?,
            ))
        });
        match coord {
            Some(c) => coords.push(c),
            None => return Err(CommandError::InvalidCoordinate(token.to_string())),
        }
    }
    Ok(Command::Trace(coords))
}

/// Source of the time spent by the player between two inputs.
pub trait Clock {
    /// Return the time elapsed since the previous call.
    fn elapsed_ms(&mut self) -> u64;
}

/// [`Clock`] that reads the system monotonic clock.
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    /// Create a [`WallClock`] object.
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn elapsed_ms(&mut self) -> u64 {
        let now: Instant = Instant::now();
        let elapsed: u128 = now.duration_since(self.last).as_millis();
        self.last = now;
        u64::try_from(elapsed).unwrap_or(u64::MAX)
    }
}

/// Return the combination as text.
pub fn render_combination(combination: &[Symbol]) -> String {
    combination
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}

/// Return the board as text, with the coordinates in the margins.
pub fn render_board(board: &Board) -> String {
    let mut text: String = String::from("   ");
    for x in 0..board.width() {
        text.push_str(&format!(" {x}"));
    }
    for (y, row) in board.rows().enumerate() {
        text.push_str(&format!("\n{y:>2} "));
        for symbol in row {
            text.push_str(&format!(" {symbol}"));
        }
    }
    text
}

/// Return the message to display for a signal, if any.
fn describe(signal: &Signal) -> Option<String> {
    match signal {
        Signal::CombinationChanged {
            combination,
            success: true,
        } => Some(format!(
            "New combination: {}",
            render_combination(combination)
        )),
        Signal::CombinationChanged { success: false, .. } => None,
        Signal::ScoreIncremented(score) => Some(format!("Well done! Score: {score}")),
        Signal::TilesReplaced { coords, symbols } => {
            debug!(
                "Replaced {} tiles, new symbols {}",
                coords.len(),
                render_combination(symbols)
            );
            None
        }
        Signal::MatchFailed(coords) => Some(format!(
            "These {} tiles do not spell the combination",
            coords.len()
        )),
        Signal::NotFoundRejected => {
            Some("The combination is on the board! Time penalty".to_string())
        }
        Signal::TimeAdded(ms) => Some(format!("+{}s", ms / 1000)),
        Signal::RoundExpired(score) => Some(format!("Time is up! Final score: {score}")),
    }
}

/// Format a remaining time in seconds, with one decimal.
fn format_time(ms: u64) -> String {
    format!("{}.{}s", ms / 1000, (ms % 1000) / 100)
}

/// Run a round in the terminal and return the score.
///
/// The engine is started (or restarted) by the function.
/// The round ends when the countdown completes, when the player quits, or when the input
/// reaches its end.
///
/// # Errors
///
/// The function returns an error if the input cannot be read or the output cannot be written.
pub fn run_round<R: BufRead, W: Write>(
    engine: &mut TurnEngine,
    input: &mut R,
    output: &mut W,
    clock: &mut dyn Clock,
) -> Result<u32, Box<dyn Error>> {
    engine.start_level()?;
    writeln!(output, "{}", engine.name())?;
    engine.drain_signals();
    clock.elapsed_ms();

    loop {
        for signal in engine.drain_signals() {
            debug!("Signal: {signal:?}");
            if let Some(message) = describe(&signal) {
                writeln!(output, "{message}")?;
            }
        }
        if engine.status() != RoundStatus::InProgress {
            break;
        }

        writeln!(
            output,
            "\nTurn {}    Combination: {}    Score: {}    Time: {}\n\n{}\n",
            engine.turn() + 1,
            render_combination(engine.combination()),
            engine.score(),
            format_time(engine.remaining_ms()),
            render_board(engine.board())
        )?;
        write!(output, "> ")?;
        output.flush()?;

        let mut bytes: Vec<u8> = Vec::new();
        if input.read_until(b'\n', &mut bytes)? == 0 {
            engine.on_time_expired();
            continue;
        }
        let line: String = String::from_utf8_lossy(&bytes).into_owned();

        engine.tick(clock.elapsed_ms());
        if engine.status() != RoundStatus::InProgress {
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Show) => (),
            Ok(Command::Quit) => engine.on_time_expired(),
            Ok(Command::NotFound) => {
                if engine.claim_ready() {
                    engine.check_not_found()?;
                } else {
                    let wait: u64 = engine
                        .claim_cooldown_until()
                        .map_or(0, |t| t.saturating_sub(engine.clock_ms()));
                    writeln!(output, "Not so fast! Wait {wait}ms")?;
                }
            }
            Ok(Command::Trace(coords)) => {
                if let Err(e) = coords.iter().try_for_each(|c| engine.board().check(*c)) {
                    writeln!(output, "{e}")?;
                    continue;
                }
                engine.trace(&coords)?;
                let traced: usize = engine.played().len();
                if traced < coords.len() {
                    writeln!(
                        output,
                        "{} tile(s) ignored: the tiles must be adjacent and used once",
                        coords.len() - traced
                    )?;
                }
                writeln!(
                    output,
                    "Traced: {}",
                    render_combination(&engine.played().symbols())
                )?;
                engine.submit()?;
            }
            Err(e) => writeln!(output, "{e}")?,
        }
    }
    Ok(engine.score())
}

/// Return the levels that are unlocked but that have not been announced yet.
///
/// The levels are marked as announced in the player progress.
pub fn newly_unlocked_levels(progress: &mut Progress) -> Vec<Level> {
    let mut levels: Vec<Level> = Vec::new();

    for level in level_list() {
        if level.unlock.is_some()
            && !level.is_locked(&progress.highscores)
            && progress.mark_level_unlocked(level.name)
        {
            levels.push(level);
        }
    }
    levels
}

/// Record the score of a round in the player progress and print the results.
///
/// # Errors
///
/// The function returns an error if the output cannot be written.
pub fn report_results<W: Write>(
    progress: &mut Progress,
    level_name: &str,
    score: u32,
    output: &mut W,
) -> Result<(), Box<dyn Error>> {
    let previous_best: u32 = progress.highscores.get_best(level_name);

    if progress.highscores.add_score(level_name, score) {
        writeln!(
            output,
            "NEW RECORD! {score} (previous best {previous_best})"
        )?;
    } else {
        writeln!(output, "Score {score}, best {previous_best}")?;
    }

    let trophies: Vec<&Trophy> = update_trophy_status(progress);
    for trophy in trophies {
        writeln!(output, "TROPHY UNLOCKED: {}", trophy.name)?;
    }
    for level in newly_unlocked_levels(progress) {
        writeln!(output, "NEW LEVEL UNLOCKED: {}", level.name)?;
    }
    Ok(())
}

/// Return the level list with the best scores and the lock messages, one line per level.
pub fn level_lines(progress: &Progress) -> Vec<String> {
    level_list()
        .iter()
        .map(|level| {
            if let Some(rule) = level.unlock
                && level.is_locked(&progress.highscores)
            {
                return format!("{:<12} LOCKED: {rule}", level.name);
            }
            match progress.highscores.get_record(level.name) {
                Some(record) => {
                    let when: DateTime<Local> = DateTime::from(record.when);
                    format!(
                        "{:<12} best {} ({})",
                        level.name,
                        record.score,
                        when.format("%Y-%m-%d %H:%M")
                    )
                }
                None => format!("{:<12} not played yet", level.name),
            }
        })
        .collect()
}

/// Return the trophy list with their status, one line per trophy.
pub fn trophy_lines(progress: &Progress) -> Vec<String> {
    TROPHIES
        .iter()
        .map(|trophy| {
            let mark: &str = if progress.has_trophy(trophy.name) {
                "[x]"
            } else {
                "[ ]"
            };
            format!("{mark} {}: {}", trophy.name, trophy.message)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::levels::find_level;
    use crate::turn_engine::RoundConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;

    /// Clock that reports the same elapsed time for every input.
    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn elapsed_ms(&mut self) -> u64 {
            self.0
        }
    }

    fn engine(level_name: &str) -> TurnEngine {
        let level: Level = find_level(level_name).unwrap();
        TurnEngine::new(
            RoundConfig::from_level(&level).unwrap(),
            StdRng::seed_from_u64(42),
        )
        .unwrap()
    }

    fn play(engine: &mut TurnEngine, script: &str, elapsed: u64) -> (u32, String) {
        let mut input: Cursor<&[u8]> = Cursor::new(script.as_bytes());
        let mut output: Vec<u8> = Vec::new();
        let score: u32 =
            run_round(engine, &mut input, &mut output, &mut FixedClock(elapsed)).unwrap();
        (score, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("  \n"), Ok(Command::Show));
        assert_eq!(parse_command("404\n"), Ok(Command::NotFound));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(
            parse_command("0,0 1,0  2, 0\n"),
            Ok(Command::Trace(vec![
                Coordinate::new(0, 0),
                Coordinate::new(1, 0),
                Coordinate::new(2, 0)
            ]))
        );
        assert_eq!(
            parse_command("0,0 1;0"),
            Err(CommandError::InvalidCoordinate("1;0".to_string()))
        );
        assert!(parse_command("-1,0").is_err());
    }

    #[test]
    fn test_parse_command_spaces_around_commas() {
        assert_eq!(
            parse_command("2, 0 3 ,0  3 , 1"),
            Ok(Command::Trace(vec![
                Coordinate::new(2, 0),
                Coordinate::new(3, 0),
                Coordinate::new(3, 1)
            ]))
        );
        assert_eq!(
            parse_command("2,"),
            Err(CommandError::InvalidCoordinate("2,".to_string()))
        );
    }

    #[test]
    fn test_render_board() {
        let board: Board = Board::from_data("c6 c6 c6").unwrap();
        assert_eq!(
            render_board(&board),
            "    0 1 2 3\n 0  ✖ ▲ ■ ●\n 1  ✖ ▲ ■ ●\n 2  ✖ ▲ ■ ●"
        );
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(60000), "60.0s");
        assert_eq!(format_time(1850), "1.8s");
    }

    #[test]
    fn test_quit() {
        let mut engine: TurnEngine = engine("3 IN A ROW");
        let (score, output) = play(&mut engine, "q\n", 10);
        assert_eq!(score, 0);
        assert_eq!(engine.status(), RoundStatus::Expired);
        assert!(output.contains("Time is up! Final score: 0"));
    }

    #[test]
    fn test_end_of_input() {
        let mut engine: TurnEngine = engine("3 IN A ROW");
        let (score, _) = play(&mut engine, "", 10);
        assert_eq!(score, 0);
        assert_eq!(engine.status(), RoundStatus::Expired);
    }

    #[test]
    fn test_time_runs_out() {
        let mut engine: TurnEngine = engine("GET SQUARE");
        let (_, output) = play(&mut engine, "\n\n\n", 30000);
        assert!(output.contains("Time: 30.0s"));
        assert!(output.contains("Time is up!"));
    }

    #[test]
    fn test_invalid_input() {
        let mut engine: TurnEngine = engine("3 IN A ROW");
        let (_, output) = play(&mut engine, "9,9\nhello\nq\n", 10);
        assert!(output.contains("coordinate (9, 9) is outside the 4x3 board"));
        assert!(output.contains("'hello' is not a coordinate"));
    }

    #[test]
    fn test_invalid_utf8_input_keeps_the_round() {
        let mut engine: TurnEngine = engine("3 IN A ROW");
        let mut input: Cursor<&[u8]> = Cursor::new(&b"\xff\xfe\n0,0\nq\n"[..]);
        let mut output: Vec<u8> = Vec::new();

        let score: u32 =
            run_round(&mut engine, &mut input, &mut output, &mut FixedClock(10)).unwrap();
        let text: String = String::from_utf8(output).unwrap();
        assert_eq!(score, 0);
        assert_eq!(engine.status(), RoundStatus::Expired);
        assert!(text.contains("is not a coordinate"));
        assert!(text.contains("Traced: "));
    }

    #[test]
    fn test_claims_are_throttled() {
        let mut engine: TurnEngine = engine("3 IN A ROW");
        let script: String = "404\n".repeat(40);
        let (_, output) = play(&mut engine, &script, 10);
        assert!(output.contains("The combination is on the board! Time penalty"));
        assert!(output.contains("Not so fast! Wait 590ms"));
    }

    #[test]
    fn test_prompt_shows_the_turn() {
        let mut engine: TurnEngine = engine("3 IN A ROW");
        let (_, output) = play(&mut engine, "q\n", 10);
        assert!(output.contains("Turn 1    Combination: "));
    }

    #[test]
    fn test_report_results() {
        let mut progress: Progress = Progress::new();
        let mut output: Vec<u8> = Vec::new();
        report_results(&mut progress, "3 IN A ROW", 32, &mut output).unwrap();
        let text: String = String::from_utf8(output).unwrap();

        assert!(text.contains("NEW RECORD! 32 (previous best 0)"));
        assert!(text.contains("TROPHY UNLOCKED: BEAT THE CREATOR I"));
        assert!(text.contains("NEW LEVEL UNLOCKED: GET SQUARE"));
        assert_eq!(progress.highscores.get_best("3 IN A ROW"), 32);

        // The level is announced only once
        assert!(newly_unlocked_levels(&mut progress).is_empty());

        let mut output: Vec<u8> = Vec::new();
        report_results(&mut progress, "3 IN A ROW", 10, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "Score 10, best 32\n");
    }

    #[test]
    fn test_level_lines() {
        let progress: Progress = Progress::new();
        let lines: Vec<String> = level_lines(&progress);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "3 IN A ROW   not played yet");
        assert_eq!(
            lines[1],
            "GET SQUARE   LOCKED: SCORE MORE THAN 20 POINTS IN '3 IN A ROW' TO UNLOCK"
        );
    }

    #[test]
    fn test_trophy_lines() {
        let mut progress: Progress = Progress::new();
        progress.unlock_trophy("WELCOME BACK");
        let lines: Vec<String> = trophy_lines(&progress);
        assert_eq!(lines[0], "[x] WELCOME BACK: OPEN THE GAME TWICE");
        assert_eq!(lines[1], "[ ] RETURNING CUSTOMER: OPEN THE GAME TEN TIMES");
    }
}
