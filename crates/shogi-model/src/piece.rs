use serde::{Deserialize, Serialize};

/// Piece kind, the low nibble of a [`PieceCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 1,
    Lance = 2,
    Knight = 3,
    Silver = 4,
    Gold = 5,
    Bishop = 6,
    Rook = 7,
    King = 8,
}

impl PieceKind {
    /// Whether this kind has a promoted form (Gold and King do not).
    pub fn promotable(self) -> bool {
        !matches!(self, PieceKind::Gold | PieceKind::King)
    }
}

/// Packed piece code as produced by the game engine.
///
/// Bit layout: bits 0..=3 hold the [`PieceKind`] discriminant, bit 4
/// (`PieceCode::PROMOTED`) marks a promoted piece, bit 5 (`PieceCode::WHITE`)
/// marks a white piece. The layout is fixed by the external engine and must
/// not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceCode(pub u8);

impl PieceCode {
    pub const KIND_MASK: u8 = 0x0F;
    pub const PROMOTED: u8 = 0x10;
    pub const WHITE: u8 = 0x20;

    /// Build a code for an unpromoted black piece of the given kind.
    pub fn new(kind: PieceKind) -> Self {
        PieceCode(kind as u8)
    }

    pub fn kind(self) -> Option<PieceKind> {
        match self.0 & Self::KIND_MASK {
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Lance),
            3 => Some(PieceKind::Knight),
            4 => Some(PieceKind::Silver),
            5 => Some(PieceKind::Gold),
            6 => Some(PieceKind::Bishop),
            7 => Some(PieceKind::Rook),
            8 => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn is_promoted(self) -> bool {
        self.0 & Self::PROMOTED != 0
    }

    pub fn is_white(self) -> bool {
        self.0 & Self::WHITE != 0
    }

    /// The same piece with the promoted bit set.
    pub fn promoted(self) -> Self {
        PieceCode(self.0 | Self::PROMOTED)
    }

    /// The same piece with the promoted bit cleared.
    pub fn demoted(self) -> Self {
        PieceCode(self.0 & !Self::PROMOTED)
    }

    /// The same piece with the color bit set for White.
    pub fn white(self) -> Self {
        PieceCode(self.0 | Self::WHITE)
    }

    /// The code with the color bit stripped (kind + promoted bit only).
    pub fn without_color(self) -> Self {
        PieceCode(self.0 & !Self::WHITE)
    }
}
