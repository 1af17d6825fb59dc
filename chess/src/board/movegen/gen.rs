use super::lookup::*;
use crate::board::Position;
use crate::core::*;

/******************************************\
|==========================================|
|                Constants                 |
|==========================================|
\******************************************/

/// Reserve hint for full legal generation.
pub const FULL_RESERVE: usize = 256;

/// Reserve hint for captures-and-promotions generation.
pub const FORCING_RESERVE: usize = 64;

/// Reserve hint for check-response generation.
pub const EVASION_RESERVE: usize = 32;

/// Base ordering score for captures; MVV-LVA adjusts around it.
const CAPTURE_BASE: i32 = 10000;

/// Extra ordering score for promotions, on top of the promoted piece value.
const PROMOTION_BONUS: i32 = 1000;

/******************************************\
|==========================================|
|             Ordering Score               |
|==========================================|
\******************************************/

/// MVV-LVA ordering score assigned at generation time. Captures sort above
/// everything else, best victim first, cheapest attacker first; promotions
/// stack the promoted piece value on top. Quiet moves start at zero and the
/// search overwrites them with killer and history scores.
fn score_move(pos: &Position, move_: &Move) -> i32 {
    let mut score = 0;

    if move_.is_capture() {
        let victim = if move_.is_ep_capture() {
            PieceType::Pawn
        } else {
            debug_assert!(pos.on(move_.to()).is_some());
            unsafe { pos.on(move_.to()).unwrap_unchecked() }.pt()
        };
        let attacker = unsafe { pos.on(move_.from()).unwrap_unchecked() }.pt();

        score = CAPTURE_BASE + victim.value() - attacker.value();
    }

    if let Some(promo) = move_.promotion() {
        score += promo.value() + PROMOTION_BONUS;
    }

    score
}

/******************************************\
|==========================================|
|         Pseudo-Legal Enumeration         |
|==========================================|
\******************************************/

const PROMO_PIECES: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

/// Enumerates every pseudo-legal move for the side to move, optionally
/// restricted to a single piece type, feeding each candidate to `add`.
/// Legality (own king left in check) is the caller's concern.
///
/// Requires fresh attack maps: king destinations and castling paths are
/// pre-filtered against the opponent's aggregate attack map.
fn enumerate(pos: &Position, restrict: Option<PieceType>, add: &mut impl FnMut(Move)) {
    let us = pos.stm();
    let them = !us;
    let own = pos.occupied_bb(us);
    let enemies = pos.occupied_bb(them);
    let occ = pos.all_occupied_bb();
    let empty = !occ;

    let want = |pt: PieceType| restrict.is_none() || restrict == Some(pt);

    // --- Pawns ---
    if want(PieceType::Pawn) {
        let fwd = us.forward();
        let promo_from = Bitboard::promo_rank(us);
        let start_rank = Bitboard::push_rank(us);

        let mut pawns = pos.piece_of(us, PieceType::Pawn);
        while let Some(from) = pawns.pop_lsb() {
            // Pushes. Pawns never stand on the last rank, so one step
            // forward always stays on the board.
            let to = unsafe { from.add_unchecked(fwd) };
            if empty.contains(to) {
                if promo_from.contains(from) {
                    for promo in PROMO_PIECES {
                        add(Move::new_promotion(from, to, promo, false));
                    }
                } else {
                    add(Move::new(from, to, MoveFlags::QUIET));

                    if start_rank.contains(from) {
                        let to2 = unsafe { from.add_unchecked(us.double_forward()) };
                        if empty.contains(to2) {
                            add(Move::new(from, to2, MoveFlags::DOUBLE_PAWN_PUSH));
                        }
                    }
                }
            }

            // Diagonal captures
            let attacks = pawn_attack(us, from);
            let mut captures = attacks & enemies;
            while let Some(to) = captures.pop_lsb() {
                if promo_from.contains(from) {
                    for promo in PROMO_PIECES {
                        add(Move::new_promotion(from, to, promo, true));
                    }
                } else {
                    add(Move::new(from, to, MoveFlags::CAPTURE));
                }
            }

            // En passant
            if let Some(ep_sq) = pos.ep() {
                if attacks.contains(ep_sq) {
                    add(Move::new(
                        from,
                        ep_sq,
                        MoveFlags::EN_PASSANT | MoveFlags::CAPTURE,
                    ));
                }
            }
        }
    }

    // --- Knights ---
    if want(PieceType::Knight) {
        let mut knights = pos.piece_of(us, PieceType::Knight);
        while let Some(from) = knights.pop_lsb() {
            let mut dests = knight_attack(from) & !own;
            while let Some(to) = dests.pop_lsb() {
                let flags = if enemies.contains(to) {
                    MoveFlags::CAPTURE
                } else {
                    MoveFlags::QUIET
                };
                add(Move::new(from, to, flags));
            }
        }
    }

    // --- Sliders ---
    for pt in [PieceType::Bishop, PieceType::Rook, PieceType::Queen] {
        if !want(pt) {
            continue;
        }

        let mut sliders = pos.piece_of(us, pt);
        while let Some(from) = sliders.pop_lsb() {
            let mut dests = attacks(us, pt, from, occ) & !own;
            while let Some(to) = dests.pop_lsb() {
                let flags = if enemies.contains(to) {
                    MoveFlags::CAPTURE
                } else {
                    MoveFlags::QUIET
                };
                add(Move::new(from, to, flags));
            }
        }
    }

    // --- King ---
    if want(PieceType::King) {
        let ksq = pos.king_sq(us);
        let danger = pos.attacks_by(them);

        // Squares covered by the pre-move attack map are excluded up front.
        // The map cannot see the king unblocking a slider aimed at its own
        // square, so make-and-test stays authoritative.
        let mut dests = king_attack(ksq) & !own & !danger;
        while let Some(to) = dests.pop_lsb() {
            let flags = if enemies.contains(to) {
                MoveFlags::CAPTURE
            } else {
                MoveFlags::QUIET
            };
            add(Move::new(ksq, to, flags));
        }

        // Castling: never out of check, never through occupied or attacked
        // squares. Queenside additionally needs the b-file square empty,
        // though it may be attacked.
        if ksq == Square::E1.relative(us) && !danger.contains(ksq) {
            if pos.castling().has(Castling::king_side(us)) {
                let f = Square::F1.relative(us);
                let g = Square::G1.relative(us);

                if (occ & (f.bb() | g.bb())).is_empty()
                    && (danger & (f.bb() | g.bb())).is_empty()
                {
                    add(Move::new(ksq, g, MoveFlags::KING_CASTLE));
                }
            }

            if pos.castling().has(Castling::queen_side(us)) {
                let b = Square::B1.relative(us);
                let c = Square::C1.relative(us);
                let d = Square::D1.relative(us);

                if (occ & (b.bb() | c.bb() | d.bb())).is_empty()
                    && (danger & (c.bb() | d.bb())).is_empty()
                {
                    add(Move::new(ksq, c, MoveFlags::QUEEN_CASTLE));
                }
            }
        }
    }
}

/// Make-and-test legality: apply the move, rebuild the successor's attack
/// maps, and reject it if the mover's king ends up attacked.
fn is_legal(pos: &Position, move_: Move) -> bool {
    let us = pos.stm();
    let next = pos.make(move_);

    (next.piece_of(us, PieceType::King) & next.attacks_by(!us)).is_empty()
}

/******************************************\
|==========================================|
|              Entry Points                |
|==========================================|
\******************************************/

/// Every legal move for the side to move, MVV-LVA scored.
pub fn generate_legal(pos: &Position) -> Vec<Move> {
    let mut moves = Vec::with_capacity(FULL_RESERVE);

    enumerate(pos, None, &mut |mut move_| {
        if is_legal(pos, move_) {
            move_.score = score_move(pos, &move_);
            moves.push(move_);
        }
    });

    moves
}

/// Captures and promotions only, for quiescence. The exchange-evaluation
/// admission gate is the search's concern; this returns every legal forcing
/// move, MVV-LVA scored.
pub fn generate_forcing(pos: &Position) -> Vec<Move> {
    let mut moves = Vec::with_capacity(FORCING_RESERVE);

    enumerate(pos, None, &mut |mut move_| {
        if (move_.is_capture() || move_.is_promotion()) && is_legal(pos, move_) {
            move_.score = score_move(pos, &move_);
            moves.push(move_);
        }
    });

    moves
}

/// Responses to check: under double check only king moves; under single
/// check king moves, captures of the checker (en passant included) and, for
/// sliding checkers, interpositions on the king-checker ray. Falls back to
/// full generation when the side to move is not in check.
pub fn generate_evasions(pos: &Position) -> Vec<Move> {
    let us = pos.stm();
    let ksq = pos.king_sq(us);
    let checkers = pos.attackers_to(ksq, pos.all_occupied_bb()) & pos.occupied_bb(!us);

    if checkers.is_empty() {
        return generate_legal(pos);
    }

    let double_check = checkers.more_than_one();
    let checker_sq = checkers.lsb_unchecked();
    let block_mask = match pos.on(checker_sq).map(|p| p.pt()) {
        Some(PieceType::Bishop) | Some(PieceType::Rook) | Some(PieceType::Queen) => {
            between_bb(ksq, checker_sq)
        }
        _ => Bitboard::EMPTY,
    };
    let ep_target = pos.ep_target();

    let mut moves = Vec::with_capacity(EVASION_RESERVE);

    enumerate(pos, None, &mut |mut move_| {
        let relevant = if move_.from() == ksq {
            true
        } else if double_check {
            false
        } else {
            move_.to() == checker_sq
                || (move_.is_ep_capture() && ep_target == Some(checker_sq))
                || block_mask.contains(move_.to())
        };

        if relevant && is_legal(pos, move_) {
            move_.score = score_move(pos, &move_);
            moves.push(move_);
        }
    });

    moves
}

/// Legal moves of a single piece type, for SAN disambiguation.
pub fn generate_for_piece(pos: &Position, pt: PieceType) -> Vec<Move> {
    let mut moves = Vec::with_capacity(EVASION_RESERVE);

    enumerate(pos, Some(pt), &mut |mut move_| {
        if is_legal(pos, move_) {
            move_.score = score_move(pos, &move_);
            moves.push(move_);
        }
    });

    moves
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
