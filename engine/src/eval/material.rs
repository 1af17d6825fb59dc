use chess::{Colour, PieceType, Position};

use super::Eval;
use super::psqt::{game_phase, psqt_score};

/// Static evaluation in centipawns, positive for the side to move (negamax
/// convention): material count plus the tapered piece-square contribution.
pub fn evaluate(pos: &Position) -> Eval {
    let phase = game_phase(pos);

    let mut material = 0i32;
    for pt in [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
    ] {
        let white = pos.piece_of(Colour::White, pt).count_bits() as i32;
        let black = pos.piece_of(Colour::Black, pt).count_bits() as i32;

        material += (white - black) * pt.value();
    }

    let score = material + psqt_score(pos, phase);

    match pos.stm() {
        Colour::White => Eval(score as i16),
        Colour::Black => Eval(-score as i16),
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
