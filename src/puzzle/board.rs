/*
board.rs

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

//! Grid of tiles.
//!
//! The [`Board`] object owns the symbols of the grid, answers adjacency queries, searches for
//! paths of adjacent tiles, and replaces the tiles that the player matched.
//!
//! The board is built from its textual representation, a space-separated list of hexadecimal
//! tokens, one per row (see [`super::codec`]):
//!
//! ```text
//! "c6 c6 c6" ->  ✖ ▲ ■ ●
//!                ✖ ▲ ■ ●
//!                ✖ ▲ ■ ●
//! ```

use log::{Level, debug, log_enabled};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use super::codec::{self, FormatError};
use super::symbols::Symbol;

/// Errors raised by [`Board`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A row token is not valid.
    #[error("cannot decode the board: {0}")]
    Format(#[from] FormatError),

    /// The board data does not contain any row.
    #[error("the board does not have any row")]
    EmptyBoard,

    /// The rows do not have the same number of columns.
    #[error("row {row} has {found} columns instead of {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The coordinate is outside the grid.
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// The number of replacement symbols does not match the number of removed tiles.
    #[error("{coords} tiles to replace but {symbols} replacement symbols")]
    ReplacementMismatch { coords: usize, symbols: usize },

    /// The same tile is provided twice for replacement.
    #[error("tile ({x}, {y}) is listed more than once")]
    DuplicateCoordinate { x: usize, y: usize },
}

/// Position of a tile in the grid. `y` is the row, starting at the top.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    /// Create a [`Coordinate`] object.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Whether the two coordinates are horizontal or vertical neighbors.
    pub fn is_adjacent(&self, other: &Coordinate) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Grid of symbols. Every cell always holds a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Number of columns.
    width: usize,

    /// Number of rows.
    height: usize,

    /// Symbols, row by row.
    cells: Vec<Symbol>,
}

impl Board {
    /// Create a [`Board`] object from its textual representation.
    ///
    /// # Errors
    ///
    /// The method returns an error when a token is not valid hexadecimal, when there is no
    /// token, or when the rows do not have the same length.
    pub fn from_data(data: &str) -> Result<Self, BoardError> {
        let rows: Vec<Vec<Symbol>> = data
            .split_whitespace()
            .map(codec::decode)
            .collect::<Result<_, _>>()?;
        let board: Board = Self::from_rows(rows)?;

        if log_enabled!(Level::Debug) {
            debug!(
                "Board {data:?} ({}x{}):\n{board}",
                board.width(),
                board.height()
            );
        }
        Ok(board)
    }

    /// Create a [`Board`] object from a list of rows.
    ///
    /// # Errors
    ///
    /// The method returns an error when the list is empty or when the rows do not have the same
    /// length.
    pub fn from_rows(rows: Vec<Vec<Symbol>>) -> Result<Self, BoardError> {
        let width: usize = match rows.first() {
            Some(r) if !r.is_empty() => r.len(),
            _ => return Err(BoardError::EmptyBoard),
        };
        let height: usize = rows.len();

        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(BoardError::RaggedRows {
                row,
                expected: width,
                found: r.len(),
            });
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Return the textual representation of the board.
    ///
    /// Only boards with an even number of columns can be read back with [`Board::from_data`].
    pub fn to_data(&self) -> String {
        self.rows()
            .map(codec::encode)
            .collect::<Vec<String>>()
            .join(" ")
    }

    /// Return the number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Return the number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Return the number of tiles.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Return an iterator over the rows, from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Symbol]> {
        self.cells.chunks(self.width)
    }

    /// Whether the coordinate is inside the grid.
    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Verify that the coordinate is inside the grid.
    ///
    /// # Errors
    ///
    /// Return [`BoardError::OutOfBounds`] for coordinates outside the grid.
    pub fn check(&self, coord: Coordinate) -> Result<(), BoardError> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                x: coord.x,
                y: coord.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Return the symbol at the given coordinate.
    ///
    /// # Errors
    ///
    /// Return [`BoardError::OutOfBounds`] for coordinates outside the grid.
    pub fn value_at(&self, coord: Coordinate) -> Result<Symbol, BoardError> {
        self.check(coord)?;
        Ok(self.value(coord))
    }

    /// Return the symbol at a coordinate already known to be inside the grid.
    fn value(&self, coord: Coordinate) -> Symbol {
        self.cells[coord.y * self.width + coord.x]
    }

    /// Return the symbols of the given tiles.
    ///
    /// # Errors
    ///
    /// Return [`BoardError::OutOfBounds`] if one of the coordinates is outside the grid.
    pub fn symbols_at(&self, coords: &[Coordinate]) -> Result<Vec<Symbol>, BoardError> {
        coords.iter().map(|c| self.value_at(*c)).collect()
    }

    /// Return all the coordinates of the grid, row by row.
    pub fn coords(&self) -> Vec<Coordinate> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Coordinate::new(x, y)))
            .collect()
    }

    /// Return the neighbors of a tile that are not in `excluding`.
    ///
    /// The neighbors are returned in the order down, up, right, left.
    pub fn neighbors(&self, coord: Coordinate, excluding: &[Coordinate]) -> Vec<Coordinate> {
        let mut positions: Vec<Coordinate> = Vec::with_capacity(4);

        if coord.y + 1 < self.height {
            positions.push(Coordinate::new(coord.x, coord.y + 1));
        }
        if coord.y > 0 {
            positions.push(Coordinate::new(coord.x, coord.y - 1));
        }
        if coord.x + 1 < self.width {
            positions.push(Coordinate::new(coord.x + 1, coord.y));
        }
        if coord.x > 0 {
            positions.push(Coordinate::new(coord.x - 1, coord.y));
        }
        positions.retain(|p| !excluding.contains(p));
        positions
    }

    /// Look for a path of adjacent tiles that spells the target combination.
    ///
    /// Tiles are tried row by row for the first symbol, and then in the neighbor order of
    /// [`Board::neighbors`]. The first path found is returned, or None if the combination
    /// cannot be traced on the board.
    pub fn find_exact(&self, target: &[Symbol]) -> Option<Vec<Coordinate>> {
        let mut explored: Vec<Coordinate> = Vec::with_capacity(target.len());

        if self.search_exact(target, &mut explored, self.coords()) {
            debug!("Combination {target:?} found at {explored:?}");
            Some(explored)
        } else {
            debug!("Combination {target:?} not found");
            None
        }
    }

    /// Recursively extend the `explored` path with one of the `candidates` tiles.
    fn search_exact(
        &self,
        target: &[Symbol],
        explored: &mut Vec<Coordinate>,
        candidates: Vec<Coordinate>,
    ) -> bool {
        let depth: usize = explored.len();
        if depth >= target.len() {
            return true;
        }

        for pos in candidates {
            if self.value(pos) != target[depth] {
                continue;
            }
            let next: Vec<Coordinate> = self.neighbors(pos, explored);
            explored.push(pos);
            if self.search_exact(target, explored, next) {
                return true;
            }
            explored.pop();
        }
        false
    }

    /// Pick a random path of adjacent tiles of the given length.
    ///
    /// At each step, the candidate tiles are shuffled. Return None if no path of that length
    /// exists (the length is larger than the number of tiles).
    pub fn find_random<R: Rng + ?Sized>(
        &self,
        length: usize,
        rng: &mut R,
    ) -> Option<Vec<Coordinate>> {
        let mut explored: Vec<Coordinate> = Vec::with_capacity(length);

        if self.search_random(length, &mut explored, self.coords(), rng) {
            debug!("Random path of length {length}: {explored:?}");
            Some(explored)
        } else {
            debug!("No random path of length {length}");
            None
        }
    }

    /// Recursively extend the `explored` path with one of the `candidates` tiles, in random
    /// order.
    fn search_random<R: Rng + ?Sized>(
        &self,
        length: usize,
        explored: &mut Vec<Coordinate>,
        mut candidates: Vec<Coordinate>,
        rng: &mut R,
    ) -> bool {
        if explored.len() >= length {
            return true;
        }

        candidates.shuffle(rng);
        for pos in candidates {
            let next: Vec<Coordinate> = self.neighbors(pos, explored);
            explored.push(pos);
            if self.search_random(length, explored, next, rng) {
                return true;
            }
            explored.pop();
        }
        false
    }

    /// Remove the given tiles and refill their columns.
    ///
    /// In each column, the remaining tiles slide down and the new symbols are inserted at
    /// the top. Columns are processed from left to right and, inside a column, in the order of
    /// `coords`. The `new_symbols` list is consumed in that same order: the first symbol used
    /// for a column ends up in its top row.
    ///
    /// # Errors
    ///
    /// The method returns an error, and leaves the board untouched, when a coordinate is outside
    /// the grid or duplicated, or when the number of symbols does not match the number of tiles.
    pub fn replace(
        &mut self,
        coords: &[Coordinate],
        new_symbols: &[Symbol],
    ) -> Result<(), BoardError> {
        if coords.len() != new_symbols.len() {
            return Err(BoardError::ReplacementMismatch {
                coords: coords.len(),
                symbols: new_symbols.len(),
            });
        }
        let mut seen: HashSet<Coordinate> = HashSet::with_capacity(coords.len());
        for coord in coords {
            self.check(*coord)?;
            if !seen.insert(*coord) {
                return Err(BoardError::DuplicateCoordinate {
                    x: coord.x,
                    y: coord.y,
                });
            }
        }

        // Group the deletions by column
        let mut deletions_by_column: Vec<Vec<usize>> = vec![Vec::new(); self.width];
        for coord in coords {
            deletions_by_column[coord.x].push(coord.y);
        }

        let mut value_index: usize = 0;
        for (x, deletions) in deletions_by_column.iter().enumerate() {
            if deletions.is_empty() {
                continue;
            }
            let additions: &[Symbol] = &new_symbols[value_index..value_index + deletions.len()];
            value_index += deletions.len();

            let remaining: Vec<Symbol> = (0..self.height)
                .filter(|y| !deletions.contains(y))
                .map(|y| self.value(Coordinate::new(x, y)))
                .collect();

            for (y, symbol) in additions.iter().copied().chain(remaining).enumerate() {
                self.cells[y * self.width + x] = symbol;
            }
            debug!("Column {x}: {} tiles replaced", deletions.len());
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|s| s.to_string()).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::symbols::Symbol::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Verify that the path is made of unique adjacent tiles.
    fn assert_valid_path(board: &Board, path: &[Coordinate]) {
        let unique: HashSet<&Coordinate> = path.iter().collect();
        assert_eq!(unique.len(), path.len());
        for c in path {
            assert!(board.contains(*c));
        }
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent(&pair[1]), "{pair:?} not adjacent");
        }
    }

    #[test]
    fn test_from_data() {
        let board: Board = Board::from_data("c6 c6 c6").unwrap();
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 3);
        for row in board.rows() {
            assert_eq!(row, &[Cross, Triangle, Square, Circle]);
        }
        assert_eq!(board.to_data(), "c6 c6 c6");
    }

    #[test]
    fn test_from_data_errors() {
        assert_eq!(Board::from_data(""), Err(BoardError::EmptyBoard));
        assert!(matches!(
            Board::from_data("c6 zz"),
            Err(BoardError::Format(FormatError::InvalidDigit { .. }))
        ));
        assert_eq!(
            Board::from_data("c6 c6c6"),
            Err(BoardError::RaggedRows {
                row: 1,
                expected: 4,
                found: 8
            })
        );
    }

    #[test]
    fn test_value_at() {
        let board: Board = Board::from_data("e4 1b b4").unwrap();
        assert_eq!(board.value_at(Coordinate::new(0, 0)), Ok(Cross));
        assert_eq!(board.value_at(Coordinate::new(3, 1)), Ok(Cross));
        assert_eq!(
            board.value_at(Coordinate::new(4, 0)),
            Err(BoardError::OutOfBounds {
                x: 4,
                y: 0,
                width: 4,
                height: 3
            })
        );
        assert!(board.value_at(Coordinate::new(0, 3)).is_err());
    }

    #[test]
    fn test_neighbors_order() {
        let board: Board = Board::from_data("c6 c6 c6").unwrap();
        assert_eq!(
            board.neighbors(Coordinate::new(1, 1), &[]),
            vec![
                Coordinate::new(1, 2),
                Coordinate::new(1, 0),
                Coordinate::new(2, 1),
                Coordinate::new(0, 1)
            ]
        );
        assert_eq!(
            board.neighbors(Coordinate::new(0, 0), &[Coordinate::new(0, 1)]),
            vec![Coordinate::new(1, 0)]
        );
        assert_eq!(
            board.neighbors(Coordinate::new(3, 2), &[]),
            vec![Coordinate::new(3, 1), Coordinate::new(2, 2)]
        );
    }

    #[test]
    fn test_find_exact() {
        let board: Board = Board::from_data("c6 c6 c6").unwrap();

        // Row-major scan and neighbor order make the first path deterministic
        assert_eq!(
            board.find_exact(&[Cross, Cross, Cross]),
            Some(vec![
                Coordinate::new(0, 0),
                Coordinate::new(0, 1),
                Coordinate::new(0, 2)
            ])
        );

        let path: Vec<Coordinate> = board
            .find_exact(&[Triangle, Square, Square, Circle])
            .unwrap();
        assert_valid_path(&board, &path);
        assert_eq!(
            board.symbols_at(&path).unwrap(),
            vec![Triangle, Square, Square, Circle]
        );
    }

    #[test]
    fn test_find_exact_not_found() {
        let board: Board = Board::from_data("c6 c6 c6").unwrap();

        // Cross and Square are never adjacent
        assert_eq!(board.find_exact(&[Cross, Square]), None);
        // Only three crosses on the board
        assert_eq!(board.find_exact(&[Cross, Cross, Cross, Cross]), None);
        // A tile cannot be used twice
        assert_eq!(board.find_exact(&[Cross, Triangle, Cross]), None);
    }

    #[test]
    fn test_find_exact_backtracks() {
        // The first triangle (0, 0) leads to a dead end, the path starts at (1, 1)
        let board: Board = Board::from_rows(vec![
            vec![Triangle, Cross, Cross],
            vec![Cross, Triangle, Square],
        ])
        .unwrap();
        assert_eq!(
            board.find_exact(&[Triangle, Square]),
            Some(vec![Coordinate::new(1, 1), Coordinate::new(2, 1)])
        );
    }

    #[test]
    fn test_find_exact_empty_target() {
        let board: Board = Board::from_data("55 55 55").unwrap();
        assert_eq!(board.find_exact(&[]), Some(Vec::new()));
    }

    #[test]
    fn test_find_random() {
        let mut rng: StdRng = StdRng::seed_from_u64(3);
        for data in ["c6 c6 c6", "55 55 55", "f1 78 1a", "eb 69 28", "e4 1b b4"] {
            let board: Board = Board::from_data(data).unwrap();
            for length in 1..=board.num_cells() {
                let path: Vec<Coordinate> = board.find_random(length, &mut rng).unwrap();
                assert_eq!(path.len(), length);
                assert_valid_path(&board, &path);
                // The combination spelled by a random path can always be found back
                let combo: Vec<Symbol> = board.symbols_at(&path).unwrap();
                assert!(board.find_exact(&combo).is_some());
            }
        }
    }

    #[test]
    fn test_find_random_too_long() {
        let mut rng: StdRng = StdRng::seed_from_u64(3);
        let board: Board = Board::from_rows(vec![vec![Cross, Square]]).unwrap();
        assert_eq!(board.find_random(3, &mut rng), None);
    }

    #[test]
    fn test_replace_column_top() {
        // Column 0 is [X, Y, Z] = [Cross, Square, Circle] from top to bottom
        let mut board: Board = Board::from_rows(vec![
            vec![Cross, Triangle],
            vec![Square, Triangle],
            vec![Circle, Triangle],
        ])
        .unwrap();
        board
            .replace(
                &[Coordinate::new(0, 0), Coordinate::new(0, 1)],
                &[Triangle, Cross],
            )
            .unwrap();
        assert_eq!(
            board.symbols_at(&[
                Coordinate::new(0, 0),
                Coordinate::new(0, 1),
                Coordinate::new(0, 2)
            ]),
            Ok(vec![Triangle, Cross, Circle])
        );
        // The other column is untouched
        assert_eq!(board.value_at(Coordinate::new(1, 2)), Ok(Triangle));
    }

    #[test]
    fn test_replace_slides_down() {
        let mut board: Board = Board::from_data("c6 c6 c6").unwrap();
        // Remove the bottom and middle tiles of column 1 and the bottom tile of column 3
        board
            .replace(
                &[
                    Coordinate::new(3, 2),
                    Coordinate::new(1, 2),
                    Coordinate::new(1, 1),
                ],
                &[Square, Cross, Circle],
            )
            .unwrap();
        let rows: Vec<&[Symbol]> = board.rows().collect();
        // Column 1 is processed first and gets the first two symbols
        assert_eq!(rows[0], &[Cross, Square, Square, Circle]);
        assert_eq!(rows[1], &[Cross, Cross, Square, Circle]);
        assert_eq!(rows[2], &[Cross, Triangle, Square, Circle]);
        // Column 3 gets the last symbol at the top
        let column3: Vec<Symbol> = board
            .symbols_at(&[
                Coordinate::new(3, 0),
                Coordinate::new(3, 1),
                Coordinate::new(3, 2),
            ])
            .unwrap();
        assert_eq!(column3, vec![Circle, Circle, Circle]);
    }

    #[test]
    fn test_replace_errors() {
        let mut board: Board = Board::from_data("c6 c6 c6").unwrap();
        let before: Board = board.clone();

        assert_eq!(
            board.replace(&[Coordinate::new(0, 0)], &[Cross, Cross]),
            Err(BoardError::ReplacementMismatch {
                coords: 1,
                symbols: 2
            })
        );
        assert_eq!(
            board.replace(
                &[Coordinate::new(0, 0), Coordinate::new(0, 0)],
                &[Cross, Cross]
            ),
            Err(BoardError::DuplicateCoordinate { x: 0, y: 0 })
        );
        assert!(matches!(
            board.replace(&[Coordinate::new(9, 0)], &[Cross]),
            Err(BoardError::OutOfBounds { .. })
        ));
        assert_eq!(board, before);
    }
}
