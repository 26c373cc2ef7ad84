//! Cell state for the forest-fire automaton
//!
//! Each cell is in exactly one of three states. There are no hidden sub-states:
//! a fire burns for one generation and leaves empty ground behind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single grid cell
///
/// The numeric codes (`0`, `1`, `2`) match the values used in the demonstration
/// data the model was first written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// Bare ground or ash. Absorbing: never changes again.
    #[default]
    Empty = 0,
    /// Unburned tree
    Tree = 1,
    /// Tree on fire this generation
    Burning = 2,
}

impl CellState {
    /// Look up a state by numeric code
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CellState::Empty),
            1 => Some(CellState::Tree),
            2 => Some(CellState::Burning),
            _ => None,
        }
    }

    /// Single-character glyph used by the text grid format
    pub const fn glyph(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Tree => 'T',
            CellState::Burning => '*',
        }
    }

    /// Parse a text glyph. Digit codes are accepted as well.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(CellState::Empty),
            'T' | 't' => Some(CellState::Tree),
            '*' => Some(CellState::Burning),
            _ => glyph
                .to_digit(10)
                .and_then(|digit| u8::try_from(digit).ok())
                .and_then(Self::from_code),
        }
    }

    #[inline]
    pub const fn is_burning(self) -> bool {
        matches!(self, CellState::Burning)
    }

    #[inline]
    pub const fn is_tree(self) -> bool {
        matches!(self, CellState::Tree)
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellState::Empty => "empty",
            CellState::Tree => "tree",
            CellState::Burning => "burning",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATES: [CellState; 3] = [CellState::Empty, CellState::Tree, CellState::Burning];

    #[test]
    fn test_codes_round_trip() {
        for state in STATES {
            assert_eq!(CellState::from_code(state as u8), Some(state));
        }
        assert_eq!(CellState::from_code(3), None);
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(CellState::from_glyph('.'), Some(CellState::Empty));
        assert_eq!(CellState::from_glyph('1'), Some(CellState::Tree));
        assert_eq!(CellState::from_glyph('*'), Some(CellState::Burning));
        assert_eq!(CellState::from_glyph('x'), None);
        assert_eq!(CellState::from_glyph('0'), Some(CellState::Empty));
        assert_eq!(CellState::from_glyph('2'), Some(CellState::Burning));
        assert_eq!(CellState::from_glyph('7'), None);
        for state in STATES {
            assert_eq!(CellState::from_glyph(state.glyph()), Some(state));
        }
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(CellState::default(), CellState::Empty);
        assert_eq!(CellState::Burning.to_string(), "burning");
    }
}
