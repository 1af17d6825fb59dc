//! Piece-square tables, two per piece type for the two game phases, and the
//! tapered interpolation between them.
//!
//! Tables are indexed from White's point of view with a1 = 0; Black reads
//! the vertically mirrored square (sq ^ 56). The phase counter weighs the
//! remaining minor and major pieces: 24 is a full middlegame, 0 a bare
//! endgame.

use chess::{Colour, PieceType, Position};

/// Phase ceiling: 4 per queen, 2 per rook, 1 per minor, all pieces on board.
pub(super) const MAX_PHASE: i32 = 24;

pub(super) fn game_phase(pos: &Position) -> i32 {
    let phase = pos.piecetype_bb(PieceType::Queen).count_bits() as i32 * 4
        + pos.piecetype_bb(PieceType::Rook).count_bits() as i32 * 2
        + pos.piecetype_bb(PieceType::Bishop).count_bits() as i32
        + pos.piecetype_bb(PieceType::Knight).count_bits() as i32;

    phase.min(MAX_PHASE)
}

/// White-minus-black tapered piece-square contribution, already divided by
/// the phase scale.
pub(super) fn psqt_score(pos: &Position, phase: i32) -> i32 {
    let eg_phase = MAX_PHASE - phase;

    let mut weighted = 0i32;

    for (pt, mg, eg) in TABLES {
        for col in Colour::iter() {
            let sign = match col {
                Colour::White => 1,
                Colour::Black => -1,
            };

            let mut bb = pos.piece_of(col, pt);
            while let Some(sq) = bb.pop_lsb() {
                let idx = match col {
                    Colour::White => sq.index(),
                    Colour::Black => sq.index() ^ 56,
                };

                weighted += sign * (mg[idx] * phase + eg[idx] * eg_phase);
            }
        }
    }

    weighted / MAX_PHASE
}

type Table = [i32; 64];

const TABLES: [(PieceType, &Table, &Table); 6] = [
    (PieceType::Pawn, &PAWN_MG, &PAWN_EG),
    (PieceType::Knight, &KNIGHT_MG, &KNIGHT_EG),
    (PieceType::Bishop, &BISHOP_MG, &BISHOP_EG),
    (PieceType::Rook, &ROOK_MG, &ROOK_EG),
    (PieceType::Queen, &QUEEN_MG, &QUEEN_EG),
    (PieceType::King, &KING_MG, &KING_EG),
];

// Central pawns press forward in the middlegame; in the endgame every pawn
// grows with its rank.
#[rustfmt::skip]
const PAWN_MG: Table = [
   0,   0,   0,   0,   0,   0,   0,   0,
   5,  10,  10, -20, -20,  10,  10,   5,
   5,  -5, -10,   0,   0, -10,  -5,   5,
   0,   0,   0,  20,  21,   0,   0,   0,
   5,   5,  10,  25,  25,  10,   5,   5,
  10,  10,  20,  30,  30,  20,  10,  10,
  50,  50,  50,  50,  50,  50,  50,  50,
   0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const PAWN_EG: Table = [
   0,   0,   0,   0,   0,   0,   0,   0,
  10,  10,  10,  10,  10,  10,  10,  10,
  20,  20,  20,  20,  20,  20,  20,  20,
  30,  30,  30,  30,  30,  30,  30,  30,
  50,  50,  50,  50,  50,  50,  50,  50,
  70,  70,  70,  70,  70,  70,  70,  70,
  90,  90,  90,  90,  90,  90,  90,  90,
   0,   0,   0,   0,   0,   0,   0,   0,
];

// Knights rot in the corners, bloom in the centre.
#[rustfmt::skip]
const KNIGHT_MG: Table = [
 -50, -40, -30, -30, -30, -30, -40, -50,
 -40, -20,   0,   5,   5,   0, -20, -40,
 -30,   5,  10,  15,  15,  10,   5, -30,
 -30,   0,  15,  20,  20,  15,   0, -30,
 -30,   5,  15,  20,  20,  15,   5, -30,
 -30,   0,  10,  15,  15,  10,   0, -30,
 -40, -20,   0,   0,   0,   0, -20, -40,
 -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const KNIGHT_EG: Table = [
 -20, -10,   0,   0,   0,   0, -10, -20,
 -10,   5,  10,  15,  15,  10,   5, -10,
   0,  10,  15,  20,  20,  15,  10,   0,
   0,  15,  20,  25,  25,  20,  15,   0,
   0,  15,  20,  25,  25,  20,  15,   0,
   0,  10,  15,  20,  20,  15,  10,   0,
 -10,   5,  10,  15,  15,  10,   5, -10,
 -20, -10,   0,   0,   0,   0, -10, -20,
];

// Long diagonals and the fianchetto squares.
#[rustfmt::skip]
const BISHOP_MG: Table = [
 -30, -10, -10, -10, -10, -10, -10, -30,
 -10,  15,   0,   0,   0,   0,  20, -10,
 -10,  10,  10,  10,  10,  10,  10, -10,
 -10,   0,  10,  15,  15,  10,   0, -10,
 -10,   5,  15,  20,  20,  15,   5, -10,
 -10,  10,  10,  15,  15,  10,  10, -10,
 -10,   0,   0,   0,   0,   0,   0, -10,
 -30, -10, -10, -10, -10, -10, -10, -30,
];

#[rustfmt::skip]
const BISHOP_EG: Table = [
 -10,  -5,  -5,  -5,  -5,  -5,  -5, -10,
  -5,   5,   5,   5,   5,   5,   5,  -5,
  -5,   5,  10,  10,  10,  10,   5,  -5,
  -5,   5,  10,  15,  15,  10,   5,  -5,
  -5,   5,  10,  15,  15,  10,   5,  -5,
  -5,   5,  10,  10,  10,  10,   5,  -5,
  -5,   5,   5,   5,   5,   5,   5,  -5,
 -10,  -5,  -5,  -5,  -5,  -5,  -5, -10,
];

// The seventh rank is worth a pawn's weight of pressure.
#[rustfmt::skip]
const ROOK_MG: Table = [
   0,   0,   5,  10,  10,   5,   0,   0,
  -5,   0,   0,   0,   0,   0,   0,  -5,
  -5,   0,   0,   0,   0,   0,   0,  -5,
  -5,   0,   0,   0,   0,   0,   0,  -5,
  -5,   0,   0,   0,   0,   0,   0,  -5,
  -5,   0,   0,   0,   0,   0,   0,  -5,
  15,  20,  20,  20,  20,  20,  20,  15,
   0,   0,   5,  10,  10,   5,   0,   0,
];

#[rustfmt::skip]
const ROOK_EG: Table = [
   0,   0,   5,  10,  10,   5,   0,   0,
   0,   0,   5,  10,  10,   5,   0,   0,
  10,  15,  15,  20,  20,  15,  15,  10,
  10,  15,  20,  25,  25,  20,  15,  10,
  10,  15,  20,  25,  25,  20,  15,  10,
  10,  15,  15,  20,  20,  15,  15,  10,
   0,   0,   5,  10,  10,   5,   0,   0,
   0,   0,   5,  10,  10,   5,   0,   0,
];

// Discourage early queen sorties; centralise late.
#[rustfmt::skip]
const QUEEN_MG: Table = [
 -20, -10, -10,  -5,  -5, -10, -10, -20,
 -10,   0,   0,   0,   0,   0,   0, -10,
 -10,   0,   5,   5,   5,   5,   0, -10,
  -5,   0,   5,  10,  10,   5,   0,  -5,
   0,   0,   5,  10,  10,   5,   0,  -5,
 -10,   5,   5,   5,   5,   5,   0, -10,
 -10,   0,   5,   0,   0,   0,   0, -10,
 -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const QUEEN_EG: Table = [
 -10,  -5,  -5,  -5,  -5,  -5,  -5, -10,
  -5,   5,   5,   5,   5,   5,   5,  -5,
  -5,   5,  10,  10,  10,  10,   5,  -5,
  -5,   5,  10,  15,  15,  10,   5,  -5,
  -5,   5,  10,  15,  15,  10,   5,  -5,
  -5,   5,  10,  10,  10,  10,   5,  -5,
  -5,   5,   5,   5,   5,   5,   5,  -5,
 -10,  -5,  -5,  -5,  -5,  -5,  -5, -10,
];

// Hide behind the pawn shield until the queens come off, then walk in.
#[rustfmt::skip]
const KING_MG: Table = [
  30,  40,  20,   0,   0,  20,  40,  30,
  20,  20,   0,   0,   0,   0,  20,  20,
 -10, -20, -30, -40, -40, -30, -20, -10,
 -20, -30, -40, -50, -50, -40, -30, -20,
 -30, -40, -50, -60, -60, -50, -40, -30,
 -40, -50, -60, -70, -70, -60, -50, -40,
 -50, -60, -70, -80, -80, -70, -60, -50,
 -50, -60, -70, -80, -80, -70, -60, -50,
];

#[rustfmt::skip]
const KING_EG: Table = [
 -50, -40, -30, -20, -20, -30, -40, -50,
 -30, -30,   0,   0,   0,   0, -30, -30,
 -30, -10,  20,  30,  30,  20, -10, -30,
 -30, -10,  30,  40,  40,  30, -10, -30,
 -30, -10,  30,  40,  40,  30, -10, -30,
 -30, -10,  20,  30,  30,  20, -10, -30,
 -30, -20, -10,   0,   0, -10, -20, -30,
 -50, -40, -30, -20, -20, -30, -40, -50,
];

#[cfg(test)]
mod tests {
    use super::*;
    use chess::board::START_FEN;

    #[test]
    fn test_phase_counter() {
        let start = Position::from_fen(START_FEN).unwrap();
        assert_eq!(game_phase(&start), MAX_PHASE);

        let bare = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(game_phase(&bare), 0);

        let queens = Position::from_fen("3qk3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert_eq!(game_phase(&queens), 8);
    }

    #[test]
    fn test_psqt_is_zero_when_symmetric() {
        let start = Position::from_fen(START_FEN).unwrap();
        assert_eq!(psqt_score(&start, game_phase(&start)), 0);
    }

    #[test]
    fn test_central_knight_beats_corner_knight() {
        let central = Position::from_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").unwrap();
        let corner = Position::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();

        let central_score = psqt_score(&central, game_phase(&central));
        let corner_score = psqt_score(&corner, game_phase(&corner));

        assert!(central_score > corner_score);
    }
}
