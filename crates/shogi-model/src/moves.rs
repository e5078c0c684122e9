use serde::{Deserialize, Serialize};

use crate::piece::PieceCode;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

/// Board square. Files and ranks both run 1..=9, file 1 on White's left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Self {
        debug_assert!((1..=9).contains(&file) && (1..=9).contains(&rank));
        Square { file, rank }
    }
}

/// Promotion decision attached to a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Promotion {
    /// The move cannot promote or the question never arose.
    None = 0,
    /// The piece promotes.
    Promote = 1,
    /// The player declined an available promotion.
    Decline = 2,
}

/// Disambiguation suffix bitfield.
///
/// Two disjoint sub-fields, with masks fixed by the external game engine:
/// a position qualifier (right/left/nearest) and an action qualifier
/// (up/down/sideways/drop). A well-formed suffix has at most one bit set in
/// each sub-field; consumers treat the bits as priority-ordered within a
/// sub-field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Suffix(pub u16);

impl Suffix {
    pub const NONE: Suffix = Suffix(0);

    pub const RIGHT: u16 = 0x0001;
    pub const LEFT: u16 = 0x0002;
    pub const NEAREST: u16 = 0x0004;
    pub const POSITION_MASK: u16 = 0x0007;

    pub const UP: u16 = 0x0010;
    pub const DOWN: u16 = 0x0020;
    pub const SIDEWAYS: u16 = 0x0040;
    pub const DROP: u16 = 0x0080;
    pub const ACTION_MASK: u16 = 0x00F0;

    pub fn contains(self, bit: u16) -> bool {
        self.0 & bit != 0
    }

    /// The position sub-field bits only.
    pub fn position_bits(self) -> u16 {
        self.0 & Self::POSITION_MASK
    }

    /// The action sub-field bits only.
    pub fn action_bits(self) -> u16 {
        self.0 & Self::ACTION_MASK
    }
}

/// One move as reported by the game engine. Immutable value; the announcer
/// never mutates or validates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub color: Color,
    /// Origin square; `None` for a piece dropped from hand.
    pub from: Option<Square>,
    pub to: Square,
    /// Piece code after the move (promoted bit reflects the board state
    /// before promotion is applied; see `promote`).
    pub piece: PieceCode,
    pub promote: Promotion,
    pub suffix: Suffix,
}
