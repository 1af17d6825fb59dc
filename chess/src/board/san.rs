//! Standard Algebraic Notation output.
//!
//! Disambiguation leans on the piece-restricted generator: when two or more
//! pieces of the same type reach the destination, the source file is
//! preferred, then the source rank, then both.

use super::Position;
use super::movegen::{generate_evasions, generate_for_piece};
use crate::core::*;

/// Renders a legal move in SAN from the position it is played in.
pub fn san(pos: &Position, move_: &Move) -> String {
    if move_.is_king_castle() {
        return "O-O".to_string();
    }
    if move_.is_queen_castle() {
        return "O-O-O".to_string();
    }

    let mut out = String::with_capacity(8);

    debug_assert!(pos.on(move_.from()).is_some(), "san: 'from' square empty");
    let piece = unsafe { pos.on(move_.from()).unwrap_unchecked() };
    let pt = piece.pt();
    let is_pawn = pt == PieceType::Pawn;

    if !is_pawn {
        out.push(piece_letter(pt));
    }

    // Disambiguation, except for pawns and the king
    if !is_pawn && pt != PieceType::King {
        let mut ambiguity_file = false;
        let mut ambiguity_rank = false;
        let mut needs_disambiguation = false;

        for other in generate_for_piece(pos, pt) {
            if other.from() != move_.from() && other.to() == move_.to() {
                needs_disambiguation = true;

                if other.from().file() == move_.from().file() {
                    ambiguity_file = true;
                } else {
                    ambiguity_rank = true;
                }
            }
        }

        if needs_disambiguation {
            if !ambiguity_file {
                out.push(file_char(move_.from()));
            } else if !ambiguity_rank {
                out.push(rank_char(move_.from()));
            } else {
                out.push(file_char(move_.from()));
                out.push(rank_char(move_.from()));
            }
        }
    }

    // Capture marker, with the source file for pawns
    let is_capture = pos.on(move_.to()).is_some() || move_.is_ep_capture();
    if is_capture {
        if is_pawn {
            out.push(file_char(move_.from()));
        }
        out.push('x');
    }

    out.push(file_char(move_.to()));
    out.push(rank_char(move_.to()));

    if let Some(promo) = move_.promotion() {
        out.push('=');
        out.push(piece_letter(promo));
    }

    // Check and mate suffixes come from the successor position
    let next = pos.make(*move_);
    if next.in_check() {
        let suffix = if generate_evasions(&next).is_empty() {
            '#'
        } else {
            '+'
        };
        out.push(suffix);
    }

    out
}

fn piece_letter(pt: PieceType) -> char {
    match pt {
        PieceType::Pawn => 'P',
        PieceType::Knight => 'N',
        PieceType::Bishop => 'B',
        PieceType::Rook => 'R',
        PieceType::Queen => 'Q',
        PieceType::King => 'K',
    }
}

fn file_char(sq: Square) -> char {
    (b'a' + sq.file() as u8) as char
}

fn rank_char(sq: Square) -> char {
    (b'1' + sq.rank() as u8) as char
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
