/*
path.rs

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

//! Path that the player traces over the tiles.

use std::collections::HashSet;

use super::board::Coordinate;
use super::symbols::Symbol;

/// Tiles that the player traced during the current turn.
#[derive(Debug, Default, Clone)]
pub struct PlayedPath {
    /// Traced tiles and their symbols, in the order the player traced them.
    tiles: Vec<(Coordinate, Symbol)>,

    /// Stores the visited status of the tiles.
    /// Instead of looking for the tile in the [`PlayedPath::tiles`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    visited: HashSet<Coordinate>,
}

impl PartialEq for PlayedPath {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
    }
}

impl PlayedPath {
    /// Create a [`PlayedPath`] object.
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            visited: HashSet::new(),
        }
    }

    /// Remove all the tiles from the path.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.visited.clear();
    }

    /// Add a tile to the path if it extends it.
    ///
    /// The tile is ignored, and the method returns `false`, when the path already has
    /// `max_len` tiles, when the tile is already in the path, or when it is not adjacent to the
    /// last tile of the path.
    pub fn push(&mut self, coord: Coordinate, symbol: Symbol, max_len: usize) -> bool {
        if self.tiles.len() >= max_len || self.contains(coord) {
            return false;
        }
        if let Some(last) = self.get_last()
            && !last.is_adjacent(&coord)
        {
            return false;
        }
        self.tiles.push((coord, symbol));
        self.visited.insert(coord);
        true
    }

    /// Get the number of tiles in the path.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the path is empty.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether the tile is in the path or not.
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.visited.contains(&coord)
    }

    /// Return the last tile of the path.
    pub fn get_last(&self) -> Option<Coordinate> {
        self.tiles.last().map(|(c, _)| *c)
    }

    /// Return the coordinates of the traced tiles.
    pub fn coords(&self) -> Vec<Coordinate> {
        self.tiles.iter().map(|(c, _)| *c).collect()
    }

    /// Return the symbols of the traced tiles.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.tiles.iter().map(|(_, s)| *s).collect()
    }

    /// Whether the traced symbols spell the combination, forward or backward.
    pub fn matches(&self, combination: &[Symbol]) -> bool {
        if self.tiles.len() != combination.len() || combination.is_empty() {
            return false;
        }
        let forward: bool = self.tiles.iter().zip(combination).all(|((_, s), c)| s == c);
        let backward: bool = self
            .tiles
            .iter()
            .zip(combination.iter().rev())
            .all(|((_, s), c)| s == c);
        forward || backward
    }
}
