/*
codec.rs

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

//! Convert between the textual board representation and lists of symbols.
//!
//! A board row is stored as an hexadecimal string.
//! Each hexadecimal digit expands to exactly two base-4 digits (`4^2 = 16`), and each base-4
//! digit is a [`Symbol`].
//!
//! ```text
//! "c6" -> 0xc6 -> base 4: 3 0 1 2
//! ```

use thiserror::Error;

use super::symbols::Symbol;

/// Errors raised when decoding a token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The token has no digit.
    #[error("empty board token")]
    Empty,

    /// The token contains a character that is not an hexadecimal digit.
    #[error("invalid hexadecimal digit {character:?} in board token {token:?}")]
    InvalidDigit { token: String, character: char },
}

/// Decode an hexadecimal token into a list of symbols.
///
/// The result always has `2 * token.len()` symbols: leading zeros in the token are kept as
/// leading [`Symbol::Triangle`] values.
///
/// # Errors
///
/// The function returns an error when the token is empty or is not a valid hexadecimal string.
pub fn decode(token: &str) -> Result<Vec<Symbol>, FormatError> {
    if token.is_empty() {
        return Err(FormatError::Empty);
    }

    let mut symbols: Vec<Symbol> = Vec::with_capacity(token.len() * 2);
    for character in token.chars() {
        let digit: u32 = character
            .to_digit(16)
            .ok_or_else(|| FormatError::InvalidDigit {
                token: token.to_string(),
                character,
            })?;
        symbols.push(Symbol::from_digit(digit >> 2));
        symbols.push(Symbol::from_digit(digit & 3));
    }
    Ok(symbols)
}

/// Encode a list of symbols into an hexadecimal token.
///
/// The token has `ceil(symbols.len() / 2)` digits.
/// For odd-length lists, the symbols are read as one base-4 number, so a leading
/// [`Symbol::Triangle`] is implied: decoding the token back returns one extra leading symbol.
pub fn encode(symbols: &[Symbol]) -> String {
    let mut digits: Vec<u32> = Vec::with_capacity(symbols.len() + 1);
    if symbols.len() % 2 == 1 {
        digits.push(0);
    }
    digits.extend(symbols.iter().map(|s| s.digit()));

    digits
        .chunks(2)
        .filter_map(|pair| char::from_digit(pair[0] * 4 + pair[1], 16))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::symbols::Symbol::*;

    #[test]
    fn test_decode_row() {
        assert_eq!(decode("c6").unwrap(), vec![Cross, Triangle, Square, Circle]);
    }

    #[test]
    fn test_decode_keeps_leading_zeros() {
        assert_eq!(
            decode("01").unwrap(),
            vec![Triangle, Triangle, Triangle, Square]
        );
        assert_eq!(
            decode("c1").unwrap(),
            vec![Cross, Triangle, Triangle, Square]
        );
    }

    #[test]
    fn test_decode_uppercase() {
        assert_eq!(decode("E4").unwrap(), decode("e4").unwrap());
    }

    #[test]
    fn test_decode_invalid() {
        assert_eq!(decode(""), Err(FormatError::Empty));
        assert_eq!(
            decode("c7g"),
            Err(FormatError::InvalidDigit {
                token: "c7g".to_string(),
                character: 'g'
            })
        );
        assert!(decode("0x").is_err());
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(&[Cross, Triangle, Square, Circle]), "c6");
        assert_eq!(encode(&[Square, Square, Square, Square]), "55");
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn test_round_trip_even_lengths() {
        let all: [Symbol; 4] = [Triangle, Square, Circle, Cross];
        for a in all {
            for b in all {
                for c in all {
                    for d in all {
                        let symbols: Vec<Symbol> = vec![a, b, c, d, b, a];
                        assert_eq!(decode(&encode(&symbols)).unwrap(), symbols);
                    }
                }
            }
        }
    }

    #[test]
    fn test_encode_odd_length_pads() {
        let symbols: Vec<Symbol> = vec![Square, Circle, Cross];
        let token: String = encode(&symbols);
        assert_eq!(token, "1b");
        assert_eq!(
            decode(&token).unwrap(),
            vec![Triangle, Square, Circle, Cross]
        );
    }
}
