/*
cli_options.rs

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

//! Process command-line options.
//!
//! Without options, Connection starts the first level in the terminal.
//!
//! # Examples
//!
//! List the levels, with the best scores and the unlock rules:
//!
//! ```
//! $ connection --ls
//! 3 IN A ROW   best 24 (2025-11-02 18:41)
//! GET SQUARE   not played yet
//! HIGH FIVE    LOCKED: SCORE MORE THAN 15 POINTS IN 'GET SQUARE' TO UNLOCK
//! SIX PACK     LOCKED: SCORE MORE THAN 30 POINTS IN 'ARCADE' TO UNLOCK
//! ARCADE       LOCKED: SCORE MORE THAN 10 POINTS IN 'HIGH FIVE' TO UNLOCK
//! ```
//!
//! Play a level, or the arcade mode:
//!
//! ```
//! $ connection --level "get square"
//! $ connection --arcade
//! ```
//!
//! For developers designing boards, print three combinations that can be found on the initial
//! board of a level, with their hexadecimal representation and their path:
//!
//! ```
//! $ connection --level "high five" --generate 3
//! 129 ■ ▲ ● ● ■ (3, 0) (3, 1) (2, 1) (2, 2) (1, 2)
//! 1f1 ■ ✖ ✖ ▲ ■ (0, 1) (0, 0) (1, 0) (2, 0) (3, 0)
//! 2fd ● ✖ ✖ ✖ ■ (2, 1) (1, 1) (1, 0) (0, 0) (0, 1)
//! ```

use clap::Parser;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;
use std::error::Error;
use std::io;
use std::path::PathBuf;

use crate::config::{COPYRIGHT_NOTICE, data_dir};
use crate::console::{self, WallClock};
use crate::progress::Progress;
use crate::puzzle::board::{Board, BoardError, Coordinate};
use crate::puzzle::codec;
use crate::puzzle::levels::{self, ARCADE, Level};
use crate::puzzle::symbols::Symbol;
use crate::saver::progress::SaverProgress;
use crate::trophies::{Trophy, update_trophy_status};
use crate::turn_engine::{RoundConfig, TurnEngine};

/// Trace adjacent tiles to reproduce the combination before the time runs out.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the levels
    #[arg(long, default_value_t = false)]
    ls: bool,

    /// List the trophies
    #[arg(short, long, default_value_t = false)]
    trophies: bool,

    /// Name of the level to play
    #[arg(short, long, conflicts_with = "arcade")]
    level: Option<String>,

    /// Play the arcade mode
    #[arg(short, long, default_value_t = false)]
    arcade: bool,

    /// Number of combinations to generate for the level, instead of playing it
    #[arg(short, long, requires = "level")]
    generate: Option<usize>,

    /// Seed for the random number generator
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory where the progress is saved
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Forget the best scores, the trophies, and the unlocked levels
    #[arg(long, default_value_t = false)]
    reset: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

/// Process the options.
fn run(args: Args) -> Result<u8, Box<dyn Error>> {
    let mut rng: StdRng = match args.seed {
        Some(seed) => {
            debug!("Seed: {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    //
    // Developer mode: no progress is loaded or saved
    //
    if let Some(count) = args.generate {
        let name: String = args.level.unwrap_or_default();
        let Some(level) = levels::find_level(&name) else {
            eprintln!("Unknown level {name}. Use --ls to list the levels.");
            return Ok(1);
        };
        for (combination, path) in generate_combinations(&level, count, &mut rng)? {
            let coords: Vec<String> = path.iter().map(|c| c.to_string()).collect();
            println!(
                "{} {} {}",
                codec::encode(&combination),
                console::render_combination(&combination),
                coords.join(" ")
            );
        }
        return Ok(0);
    }

    let saver: SaverProgress = SaverProgress::new(data_dir(args.data_dir));
    if args.reset {
        saver.delete_save();
        println!("Progress deleted");
        return Ok(0);
    }
    let mut progress: Progress = match saver.get_progress() {
        Ok(Some(p)) => p,
        Ok(None) => {
            info!("No saved progress, starting fresh");
            Progress::new()
        }
        Err(e) => {
            warn!("Cannot read the saved progress: {e}");
            Progress::new()
        }
    };

    progress.record_login();
    let trophies: Vec<&Trophy> = update_trophy_status(&mut progress);
    for trophy in trophies {
        println!("TROPHY UNLOCKED: {}", trophy.name);
    }
    saver.save_progress(&progress)?;

    //
    // List the levels
    //
    if args.ls {
        for line in console::level_lines(&progress) {
            println!("{line}");
        }
        for level in console::newly_unlocked_levels(&mut progress) {
            println!("NEW LEVEL UNLOCKED: {}", level.name);
        }
        saver.save_progress(&progress)?;
        return Ok(0);
    }

    //
    // List the trophies
    //
    if args.trophies {
        for line in console::trophy_lines(&progress) {
            println!("{line}");
        }
        return Ok(0);
    }

    //
    // Play a level
    //
    let name: String = if args.arcade {
        ARCADE.to_string()
    } else {
        args.level.unwrap_or_else(|| "3 IN A ROW".to_string())
    };
    let Some(level) = levels::find_level(&name) else {
        eprintln!("Unknown level {name}. Use --ls to list the levels.");
        return Ok(1);
    };
    if let Some(rule) = level.unlock
        && level.is_locked(&progress.highscores)
    {
        eprintln!("{} is locked. {rule}.", level.name);
        return Ok(1);
    }

    let mut engine: TurnEngine = TurnEngine::new(RoundConfig::from_level(&level)?, rng)?;
    let mut stdout: io::Stdout = io::stdout();
    let score: u32 = console::run_round(
        &mut engine,
        &mut io::stdin().lock(),
        &mut stdout,
        &mut WallClock::new(),
    )?;

    console::report_results(&mut progress, level.name, score, &mut stdout)?;
    saver.save_progress(&progress)?;
    Ok(0)
}

/// Return combinations that exist on the initial board of the level, with their paths.
fn generate_combinations(
    level: &Level,
    count: usize,
    rng: &mut StdRng,
) -> Result<Vec<(Vec<Symbol>, Vec<Coordinate>)>, BoardError> {
    let board: Board = Board::from_data(level.board)?;
    let mut samples: Vec<(Vec<Symbol>, Vec<Coordinate>)> = Vec::with_capacity(count);

    for i in 0..count {
        debug!("Iteration {i}");
        if let Some(path) = board.find_random(level.combo_length, rng) {
            samples.push((board.symbols_at(&path)?, path));
        }
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_combinations() {
        let level: Level = levels::find_level("HIGH FIVE").unwrap();
        let board: Board = Board::from_data(level.board).unwrap();
        let mut rng: StdRng = StdRng::seed_from_u64(3);

        let samples: Vec<(Vec<Symbol>, Vec<Coordinate>)> =
            generate_combinations(&level, 4, &mut rng).unwrap();
        assert_eq!(samples.len(), 4);
        for (combination, path) in samples {
            assert_eq!(combination.len(), 5);
            assert_eq!(board.symbols_at(&path).unwrap(), combination);
            assert!(board.find_exact(&combination).is_some());
        }
    }

    #[test]
    fn test_arguments() {
        let args: Args =
            Args::try_parse_from(["connection", "--level", "HIGH FIVE", "-g", "2"]).unwrap();
        assert_eq!(args.generate, Some(2));
        assert!(Args::try_parse_from(["connection", "--generate", "2"]).is_err());
        assert!(Args::try_parse_from(["connection", "--arcade", "--level", "SIX PACK"]).is_err());
    }
}
