//! Value types exchanged with the external game/vision engine.
//!
//! This crate carries no audio knowledge. It defines the immutable [`Move`]
//! record and its component enumerations exactly as the game engine emits
//! them: side to move, optional origin square, destination square, packed
//! piece code, promotion decision, and the disambiguation suffix bitfield.

mod moves;
mod piece;

pub use moves::{Color, Move, Promotion, Square, Suffix};
pub use piece::{PieceCode, PieceKind};
