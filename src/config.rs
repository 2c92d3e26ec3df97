/*
config.rs

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

//! Application constants and data directory.

use log::debug;
use std::env;
use std::path::PathBuf;

/// Application name, also used for the data directory.
pub const APP_NAME: &str = "connection";

/// Text displayed by `--version`.
pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 The Connection contributors\n",
    "License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.\n",
    "This is free software: you are free to change and redistribute it.\n",
    "There is NO WARRANTY, to the extent permitted by law."
);

/// Time removed from the countdown when the player claims that the combination does not
/// exist, but it does.
pub const NOT_FOUND_PENALTY_MS: u64 = 2000;

/// Time given back to the player after each successful turn in arcade mode.
pub const ARCADE_BONUS_MS: u64 = 2000;

/// Delay before the player can claim again that a combination does not exist, after a wrong
/// claim.
pub const NOT_FOUND_COOLDOWN_MS: u64 = 600;

/// Probability of generating a fully random combination, which might not exist on the board.
pub const RANDOM_COMBINATION_PROBABILITY: f64 = 1.0 / 3.0;

/// A symbol that has not been generated for more than this number of generations is forced.
pub const STARVATION_LIMIT: u32 = 4;

/// Longest combination (arcade mode stops growing the combination at that length).
pub const MAX_COMBO_LENGTH: usize = 6;

/// Return the directory where the player progress is saved.
///
/// The `data_dir` parameter, when provided, takes precedence. Otherwise use
/// `$XDG_DATA_HOME/connection`, then `$HOME/.local/share/connection`, and then the current
/// directory.
pub fn data_dir(data_dir: Option<PathBuf>) -> PathBuf {
    let dir: PathBuf = match data_dir {
        Some(d) => d,
        None => match env::var_os("XDG_DATA_HOME") {
            Some(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_NAME),
            _ => match env::var_os("HOME") {
                Some(home) => PathBuf::from(home)
                    .join(".local")
                    .join("share")
                    .join(APP_NAME),
                None => PathBuf::from("."),
            },
        },
    };
    debug!("Data directory: {dir:?}");
    dir
}
