//! Keypad symbol alphabet and the fixed 4×4 layout table.
//!
//! The physical keypad is a 16-key matrix. Rows and columns map to
//! characters through [`LAYOUT`]; two of them are control keys:
//!
//! ```text
//!   1 2 3 A
//!   4 5 6 B
//!   7 8 9 C      C = clear/cancel
//!   * 0 # D      # = submit
//! ```
//!
//! The layout is part of the device's firmware contract and is not
//! runtime-configurable.

/// Number of keypad rows.
pub const ROWS: usize = 4;
/// Number of keypad columns.
pub const COLS: usize = 4;

/// Fixed row/column → character table.
pub const LAYOUT: [[char; COLS]; ROWS] = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

/// The clear/cancel key.
pub const CLEAR_KEY: char = 'C';
/// The submit key.
pub const SUBMIT_KEY: char = '#';

/// One validated keypad character.
///
/// A `Symbol` can only be constructed from a position in [`LAYOUT`] or
/// from a character that appears in it, so holding one is proof the
/// character belongs to the keypad alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol(char);

/// Role of a symbol in the entry protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Appended to the candidate buffer.
    Data,
    /// Empties the candidate buffer.
    Clear,
    /// Triggers comparison against the secret code.
    Submit,
}

impl Symbol {
    /// Decode a pressed key from its matrix position.
    /// Returns `None` for out-of-range coordinates.
    pub fn from_position(row: usize, col: usize) -> Option<Self> {
        LAYOUT.get(row)?.get(col).map(|&c| Self(c))
    }

    /// Validate a character against the layout table.
    pub fn from_char(c: char) -> Option<Self> {
        LAYOUT
            .iter()
            .any(|row| row.contains(&c))
            .then_some(Self(c))
    }

    /// The underlying keypad character.
    pub fn as_char(self) -> char {
        self.0
    }

    /// Classify this symbol for the passcode state machine.
    pub fn kind(self) -> SymbolKind {
        match self.0 {
            CLEAR_KEY => SymbolKind::Clear,
            SUBMIT_KEY => SymbolKind::Submit,
            _ => SymbolKind::Data,
        }
    }
}
