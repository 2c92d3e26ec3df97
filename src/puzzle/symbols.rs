/*
symbols.rs

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

//! Tile symbols and the generator of refill symbols.

use log::debug;
use rand::Rng;
use std::fmt;
use strum_macros::FromRepr;

use crate::config::STARVATION_LIMIT;

/// Number of distinct symbols.
pub const NUM_SYMBOLS: usize = 4;

/// Glyph displayed in a tile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr)]
#[repr(u8)]
pub enum Symbol {
    Triangle = 0,
    Square = 1,
    Circle = 2,
    Cross = 3,
}

impl Symbol {
    /// Build a symbol from a base-4 digit. Only the two low bits are used.
    pub fn from_digit(digit: u32) -> Self {
        // The two low bits always map to a variant
        Symbol::from_repr((digit & 3) as u8).unwrap_or(Symbol::Triangle)
    }

    /// Return the base-4 digit of the symbol.
    pub fn digit(self) -> u32 {
        self as u32
    }

    /// Pick a symbol uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Symbol::from_digit(rng.random_range(0..NUM_SYMBOLS as u32))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::Triangle => write!(f, "▲"),
            Symbol::Square => write!(f, "■"),
            Symbol::Circle => write!(f, "●"),
            Symbol::Cross => write!(f, "✖"),
        }
    }
}

/// Generate the symbols of the tiles that replace matched tiles.
///
/// A symbol that has not been generated for more than [`STARVATION_LIMIT`] calls is selected
/// first. Otherwise the symbol is chosen at random.
#[derive(Debug, Clone, Default)]
pub struct SymbolGenerator {
    /// Number of generations since each symbol was last generated, indexed by
    /// [`Symbol::digit`].
    generations_since: [u32; NUM_SYMBOLS],
}

impl SymbolGenerator {
    /// Create a [`SymbolGenerator`] object.
    pub fn new() -> Self {
        Self {
            generations_since: [0; NUM_SYMBOLS],
        }
    }

    /// Create a [`SymbolGenerator`] object with an existing generation history.
    #[cfg(test)]
    pub fn with_history(generations_since: [u32; NUM_SYMBOLS]) -> Self {
        Self { generations_since }
    }

    /// Return the generation history.
    #[cfg(test)]
    pub fn history(&self) -> &[u32; NUM_SYMBOLS] {
        &self.generations_since
    }

    /// Generate the next symbol.
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Symbol {
        let symbol: Symbol = match self
            .generations_since
            .iter()
            .position(|count| *count > STARVATION_LIMIT)
        {
            Some(index) => {
                debug!("Symbol {index} not generated for a while, forcing it");
                Symbol::from_digit(index as u32)
            }
            None => Symbol::random(rng),
        };

        for (index, count) in self.generations_since.iter_mut().enumerate() {
            if index == symbol.digit() as usize {
                *count = 0;
            } else {
                *count += 1;
            }
        }
        symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_from_digit() {
        assert_eq!(Symbol::from_digit(0), Symbol::Triangle);
        assert_eq!(Symbol::from_digit(3), Symbol::Cross);
        assert_eq!(Symbol::from_digit(6), Symbol::Circle);
        assert_eq!(Symbol::Circle.digit(), 2);
    }

    #[test]
    fn test_stale_symbol_is_forced() {
        for seed in 0..20 {
            let mut rng: StdRng = StdRng::seed_from_u64(seed);
            let mut generator: SymbolGenerator = SymbolGenerator::with_history([5, 1, 2, 3]);
            assert_eq!(generator.next(&mut rng), Symbol::Triangle);
            assert_eq!(generator.history(), &[0, 2, 3, 4]);
        }
    }

    #[test]
    fn test_first_stale_symbol_wins() {
        let mut rng: StdRng = StdRng::seed_from_u64(7);
        let mut generator: SymbolGenerator = SymbolGenerator::with_history([0, 6, 0, 9]);
        assert_eq!(generator.next(&mut rng), Symbol::Square);
        assert_eq!(generator.history(), &[1, 0, 1, 10]);
        assert_eq!(generator.next(&mut rng), Symbol::Cross);
    }

    #[test]
    fn test_two_stale_symbols_are_forced_in_turn() {
        for seed in 0..20 {
            let mut rng: StdRng = StdRng::seed_from_u64(seed);
            let mut generator: SymbolGenerator = SymbolGenerator::with_history([5, 5, 0, 0]);

            // Only the first stale symbol is forced, the second one waits one more call
            assert_eq!(generator.next(&mut rng), Symbol::Triangle);
            assert_eq!(generator.history(), &[0, 6, 1, 1]);
            assert_eq!(generator.next(&mut rng), Symbol::Square);
            assert_eq!(generator.history(), &[1, 0, 2, 2]);
        }
    }
}
