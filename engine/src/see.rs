//! Static exchange evaluation.
//!
//! Simulates the capture sequence on a move's destination square, each side
//! recapturing with its least valuable attacker and X-ray attackers
//! re-entering as the occupancy thins, then minimaxes the gain sequence
//! backwards (either side may stand pat rather than lose material).

use chess::board::{Position, bishop_attacks, rook_attacks};
use chess::{Bitboard, Colour, Move, PieceType, Square};

/// Longest possible capture sequence on one square: 32 pieces.
const MAX_EXCHANGES: usize = 32;

/// Returns the least valuable piece of `col` among `attackers`.
fn least_valuable(pos: &Position, attackers: Bitboard, col: Colour) -> (Square, PieceType) {
    for pt in PieceType::iter() {
        let bb = attackers & pos.piece_of(col, pt);
        if bb.is_occupied() {
            return (bb.lsb_unchecked(), pt);
        }
    }

    unreachable!("least_valuable called with no attackers")
}

/// True when the side playing `move_` comes out of the full exchange on the
/// destination square with a non-negative material balance.
pub fn see(pos: &Position, move_: Move) -> bool {
    use PieceType::*;

    // Castling never lands on a contested square
    if move_.is_castle() {
        return true;
    }

    let from = move_.from();
    let to = move_.to();

    debug_assert!(pos.on(from).is_some(), "see: 'from' square empty");
    let mover = unsafe { pos.on(from).unwrap_unchecked() }.pt();

    let mut gain = [0i32; MAX_EXCHANGES];
    let mut d = 0;

    // Material swung by the first capture; en-passant victims are pawns and
    // a quiet promotion simply puts the promoted piece up for grabs.
    gain[0] = if move_.is_ep_capture() {
        Pawn.value()
    } else {
        match pos.on(to) {
            Some(victim) => victim.pt().value(),
            None => 0,
        }
    };

    // The piece now awaiting recapture on the destination square
    let mut on_square = mover.value();
    if let Some(promo) = move_.promotion() {
        gain[0] += promo.value() - Pawn.value();
        on_square = promo.value();
    }

    let diag_sliders = pos.piecetype_bb(Bishop) | pos.piecetype_bb(Queen);
    let hv_sliders = pos.piecetype_bb(Rook) | pos.piecetype_bb(Queen);

    // Simulate the move on the occupancy alone
    let mut occ = pos.all_occupied_bb() ^ from.bb();
    if move_.is_ep_capture() {
        if let Some(target) = pos.ep_target() {
            occ.clear(target);
        }
    }

    let mut attackers = pos.attackers_to(to, occ) & occ;

    // Vacating the source square may uncover a slider behind the mover
    if matches!(mover, Pawn | Bishop | Queen) {
        attackers |= bishop_attacks(to, occ) & diag_sliders;
    }
    if matches!(mover, Rook | Queen) {
        attackers |= rook_attacks(to, occ) & hv_sliders;
    }
    attackers &= occ;

    let mut stm = !pos.stm();

    loop {
        let recapturers = attackers & pos.occupied_bb(stm);
        if recapturers.is_empty() {
            break;
        }

        let (lva_sq, lva_pt) = least_valuable(pos, recapturers, stm);

        d += 1;
        if d == MAX_EXCHANGES {
            d -= 1;
            break;
        }

        // Speculative balance if this recapture happens
        gain[d] = on_square - gain[d - 1];

        // Neither capturing nor standing pat can rescue this branch
        if gain[d].max(-gain[d - 1]) < 0 {
            break;
        }

        occ.clear(lva_sq);
        if matches!(lva_pt, Pawn | Bishop | Queen) {
            attackers |= bishop_attacks(to, occ) & diag_sliders;
        }
        if matches!(lva_pt, Rook | Queen) {
            attackers |= rook_attacks(to, occ) & hv_sliders;
        }
        attackers &= occ;

        on_square = lva_pt.value();
        stm = !stm;
    }

    // Backward minimax over the gain sequence
    while d > 0 {
        gain[d - 1] = -((-gain[d - 1]).max(gain[d]));
        d -= 1;
    }

    gain[0] >= 0
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
