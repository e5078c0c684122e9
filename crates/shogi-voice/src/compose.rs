//! Phrase composition: turns one move record into the ordered clip sequence
//! that speaks it.

use shogi_model::{Color, Move, Promotion, Square, Suffix};

use crate::catalog::{Category, MiscClip, QualifierClip};

/// An unresolved clip request, `(category, key)` prior to catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRequest {
    pub category: Category,
    pub key: u32,
}

impl ClipRequest {
    pub fn new(category: Category, key: u32) -> Self {
        ClipRequest { category, key }
    }

    pub fn misc(clip: MiscClip) -> Self {
        ClipRequest::new(Category::Misc, clip as u32)
    }

    pub fn qualifier(clip: QualifierClip) -> Self {
        ClipRequest::new(Category::Qualifier, clip as u32)
    }

    pub fn square(to: Square) -> Self {
        ClipRequest::new(Category::Square, to.file as u32 * 10 + to.rank as u32)
    }
}

/// Pick the color announcement for `color` as heard by a listener seated as
/// `perspective`. From White's seat the color labels are swapped.
pub fn color_clip(color: Color, perspective: Color) -> MiscClip {
    let announced = match perspective {
        Color::Black => color,
        Color::White => color.opponent(),
    };
    match announced {
        Color::Black => MiscClip::Black,
        Color::White => MiscClip::White,
    }
}

/// Compose the clip sequence announcing `mv`.
///
/// Pure function of its inputs. Output order is fixed:
/// `[color, (square, piece) | capture, promotion?, position?, action?]`.
/// When `previous` moved to the same destination, the move recaptures and the
/// square + piece pair collapses into the terse capture phrasing.
pub fn compose(mv: &Move, previous: Option<&Move>, perspective: Color) -> Vec<ClipRequest> {
    let mut out = Vec::with_capacity(5);
    out.push(ClipRequest::misc(color_clip(mv.color, perspective)));

    // The spoken piece name: color stripped always, and demoted to the base
    // piece when this very move is the promotion.
    let spoken = if mv.promote == Promotion::Promote {
        mv.piece.without_color().demoted()
    } else {
        mv.piece.without_color()
    };

    let recapture = previous.is_some_and(|p| p.to == mv.to);
    if recapture {
        out.push(ClipRequest::new(Category::Capture, spoken.0 as u32));
    } else {
        out.push(ClipRequest::square(mv.to));
        out.push(ClipRequest::new(Category::Piece, spoken.0 as u32));
    }

    match mv.promote {
        Promotion::None => {}
        Promotion::Promote => out.push(ClipRequest::qualifier(QualifierClip::Promote)),
        Promotion::Decline => out.push(ClipRequest::qualifier(QualifierClip::NoPromote)),
    }

    // Each sub-field yields at most one qualifier; a malformed bitfield with
    // several bits set resolves to the first match in the fixed check order.
    if mv.suffix.contains(Suffix::RIGHT) {
        out.push(ClipRequest::qualifier(QualifierClip::Right));
    } else if mv.suffix.contains(Suffix::LEFT) {
        out.push(ClipRequest::qualifier(QualifierClip::Left));
    } else if mv.suffix.contains(Suffix::NEAREST) {
        out.push(ClipRequest::qualifier(QualifierClip::Nearest));
    }

    if mv.suffix.contains(Suffix::UP) {
        out.push(ClipRequest::qualifier(QualifierClip::Up));
    } else if mv.suffix.contains(Suffix::DOWN) {
        out.push(ClipRequest::qualifier(QualifierClip::Down));
    } else if mv.suffix.contains(Suffix::SIDEWAYS) {
        out.push(ClipRequest::qualifier(QualifierClip::Sideways));
    } else if mv.suffix.contains(Suffix::DROP) {
        out.push(ClipRequest::qualifier(QualifierClip::Drop));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shogi_model::{PieceCode, PieceKind, Square};

    fn basic_move() -> Move {
        Move {
            color: Color::Black,
            from: Some(Square::new(3, 4)),
            to: Square::new(4, 3),
            piece: PieceCode::new(PieceKind::Silver),
            promote: Promotion::None,
            suffix: Suffix::NONE,
        }
    }

    #[test]
    fn plain_move_is_color_square_piece() {
        let seq = compose(&basic_move(), None, Color::Black);
        assert_eq!(
            seq,
            vec![
                ClipRequest::misc(MiscClip::Black),
                ClipRequest::new(Category::Square, 43),
                ClipRequest::new(Category::Piece, PieceKind::Silver as u32),
            ]
        );
    }

    #[test]
    fn white_perspective_swaps_colors() {
        let seq = compose(&basic_move(), None, Color::White);
        assert_eq!(seq[0], ClipRequest::misc(MiscClip::White));

        let mut mv = basic_move();
        mv.color = Color::White;
        let seq = compose(&mv, None, Color::White);
        assert_eq!(seq[0], ClipRequest::misc(MiscClip::Black));
    }

    #[test]
    fn recapture_collapses_to_capture_clip() {
        let prev = basic_move();
        let mut mv = basic_move();
        mv.color = Color::White;
        mv.piece = PieceCode::new(PieceKind::Rook).promoted().white();
        mv.promote = Promotion::Promote;
        mv.to = prev.to;

        let seq = compose(&mv, Some(&prev), Color::Black);
        assert_eq!(
            seq,
            vec![
                ClipRequest::misc(MiscClip::White),
                ClipRequest::new(Category::Capture, PieceKind::Rook as u32),
                ClipRequest::qualifier(QualifierClip::Promote),
            ]
        );
        assert!(seq.iter().all(|r| r.category != Category::Square));
    }

    #[test]
    fn recapture_keeps_promoted_bit_without_promotion() {
        let prev = basic_move();
        let mut mv = basic_move();
        mv.piece = PieceCode::new(PieceKind::Rook).promoted();
        let seq = compose(&mv, Some(&prev), Color::Black);
        let expected_key = PieceCode::new(PieceKind::Rook).promoted().0 as u32;
        assert_eq!(seq[1], ClipRequest::new(Category::Capture, expected_key));
    }

    #[test]
    fn different_destination_is_not_a_capture_phrase() {
        let mut prev = basic_move();
        prev.to = Square::new(5, 5);
        let seq = compose(&basic_move(), Some(&prev), Color::Black);
        assert_eq!(seq[1].category, Category::Square);
    }

    #[test]
    fn declined_promotion_announced() {
        let mut mv = basic_move();
        mv.promote = Promotion::Decline;
        let seq = compose(&mv, None, Color::Black);
        assert_eq!(*seq.last().unwrap(), ClipRequest::qualifier(QualifierClip::NoPromote));
    }

    #[test]
    fn qualifier_order_promotion_position_action() {
        let mut mv = basic_move();
        mv.promote = Promotion::Promote;
        mv.piece = PieceCode::new(PieceKind::Silver);
        mv.suffix = Suffix(Suffix::LEFT | Suffix::UP);
        let seq = compose(&mv, None, Color::Black);
        let tail: Vec<_> = seq[3..].to_vec();
        assert_eq!(
            tail,
            vec![
                ClipRequest::qualifier(QualifierClip::Promote),
                ClipRequest::qualifier(QualifierClip::Left),
                ClipRequest::qualifier(QualifierClip::Up),
            ]
        );
    }

    #[test]
    fn malformed_position_bits_pick_highest_priority() {
        let mut mv = basic_move();
        mv.suffix = Suffix(Suffix::RIGHT | Suffix::LEFT | Suffix::NEAREST);
        let seq = compose(&mv, None, Color::Black);
        let quals: Vec<_> = seq
            .iter()
            .filter(|r| r.category == Category::Qualifier)
            .collect();
        assert_eq!(quals, vec![&ClipRequest::qualifier(QualifierClip::Right)]);
    }

    #[test]
    fn drop_qualifier_is_lowest_action_priority() {
        let mut mv = basic_move();
        mv.from = None;
        mv.suffix = Suffix(Suffix::DROP);
        let seq = compose(&mv, None, Color::Black);
        assert_eq!(*seq.last().unwrap(), ClipRequest::qualifier(QualifierClip::Drop));

        mv.suffix = Suffix(Suffix::UP | Suffix::DROP);
        let seq = compose(&mv, None, Color::Black);
        assert_eq!(*seq.last().unwrap(), ClipRequest::qualifier(QualifierClip::Up));
    }

    proptest! {
        #[test]
        fn compose_is_pure(suffix in 0u16..0x100, promote in 0u8..3, file in 1u8..=9, rank in 1u8..=9) {
            let mut mv = basic_move();
            mv.to = Square::new(file, rank);
            mv.suffix = Suffix(suffix);
            mv.promote = match promote {
                0 => Promotion::None,
                1 => Promotion::Promote,
                _ => Promotion::Decline,
            };
            let prev = basic_move();

            let a = compose(&mv, Some(&prev), Color::Black);
            let b = compose(&mv, Some(&prev), Color::Black);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn position_precedes_action(suffix in 0u16..0x100) {
            let mut mv = basic_move();
            mv.suffix = Suffix(suffix);
            let seq = compose(&mv, None, Color::Black);

            let pos = seq.iter().position(|r| {
                r.category == Category::Qualifier
                    && (r.key == QualifierClip::Right as u32
                        || r.key == QualifierClip::Left as u32
                        || r.key == QualifierClip::Nearest as u32)
            });
            let act = seq.iter().position(|r| {
                r.category == Category::Qualifier
                    && (r.key == QualifierClip::Up as u32
                        || r.key == QualifierClip::Down as u32
                        || r.key == QualifierClip::Sideways as u32
                        || r.key == QualifierClip::Drop as u32)
            });
            if let (Some(p), Some(a)) = (pos, act) {
                prop_assert!(p < a);
            }
        }
    }
}
