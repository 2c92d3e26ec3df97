/*
puzzle.rs

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

//! Board, symbols, and combinations.
//!
//! A board is a grid of [`symbols::Symbol`] values, 4 columns by 3 rows for the provided
//! levels. Its textual representation is a list of hexadecimal tokens separated by spaces,
//! one token per row. Each hexadecimal digit holds two symbols (see [`codec::decode`]).
//!
//! The player traces a [`path::PlayedPath`] on the [`board::Board`] to reproduce the
//! combination of the turn. [`board::Board::find_random`] picks the paths from which the
//! combinations are read, and [`board::Board::find_exact`] verifies whether a combination
//! exists. After a match, [`board::Board::replace`] removes the tiles and refills the
//! columns from the top with symbols drawn from a [`symbols::SymbolGenerator`].
//!
//! The levels, with their initial boards and unlock rules, are listed in [`levels`].

pub mod board;
pub mod codec;
pub mod levels;
pub mod path;
pub mod symbols;
