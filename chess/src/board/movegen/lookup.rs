use crate::core::{Bitboard, Colour, Direction, PieceType, Square};

use super::magic::{BISHOP_MAGICS, BISHOP_TABLE, ROOK_MAGICS, ROOK_TABLE};

/******************************************\
|==========================================|
|              Type Definitions            |
|==========================================|
\******************************************/

type AttackTable = [Bitboard; Square::NUM];

type PawnAttackTable = [[Bitboard; Square::NUM]; Colour::NUM];

type SquarePairTable = [[Bitboard; Square::NUM]; Square::NUM];

/******************************************\
|==========================================|
|              Attack Tables               |
|==========================================|
\******************************************/

use Direction::*;

const PAWN_ATTACKS: PawnAttackTable = [
    init_pseudo_attacks(&[NE, NW]),
    init_pseudo_attacks(&[SE, SW]),
];

const KNIGHT_ATTACKS: AttackTable = init_pseudo_attacks(&[NNE, NNW, NEE, NWW, SEE, SWW, SSE, SSW]);

const KING_ATTACKS: AttackTable = init_pseudo_attacks(&[N, NE, NW, E, W, SE, SW, S]);

#[allow(long_running_const_eval)]
const BETWEEN_BB: SquarePairTable = init_between_bb_table();

/******************************************\
|==========================================|
|              Initialisation              |
|==========================================|
\******************************************/

const fn init_pseudo_attacks(dirs: &[Direction]) -> AttackTable {
    let mut table = [Bitboard::EMPTY; Square::NUM];

    let mut i = 0;
    while i < Square::NUM {
        let sq_bb = Square::from_unchecked(i as u8).bb();

        let mut j = 0;
        while j < dirs.len() {
            table[i] = Bitboard(table[i].0 | sq_bb.shift(dirs[j]).0);
            j += 1;
        }

        i += 1;
    }

    table
}

#[allow(long_running_const_eval)]
const fn init_between_bb_table() -> SquarePairTable {
    let mut table = [[Bitboard::EMPTY; Square::NUM]; Square::NUM];

    let mut i = 0;
    while i < Square::NUM {
        let from = Square::from_unchecked(i as u8);

        let mut j = 0;
        while j < Square::NUM {
            let to = Square::from_unchecked(j as u8);

            // Squares strictly between two aligned squares: the intersection
            // of each square's ray attacks through the other.
            let mut pt_idx = 0;
            while pt_idx < 2 {
                let pt = if pt_idx == 0 {
                    PieceType::Bishop
                } else {
                    PieceType::Rook
                };

                if Bitboard::attack_on_the_fly(pt, from.bb(), Bitboard::EMPTY).contains(to) {
                    table[i][j] = Bitboard(
                        Bitboard::attack_on_the_fly(pt, from.bb(), to.bb()).0
                            & Bitboard::attack_on_the_fly(pt, to.bb(), from.bb()).0,
                    );
                }

                pt_idx += 1;
            }

            j += 1;
        }

        i += 1;
    }

    table
}

/******************************************\
|==========================================|
|               Get Attacks                |
|==========================================|
\******************************************/

#[inline]
pub fn pawn_attack(col: Colour, sq: Square) -> Bitboard {
    PAWN_ATTACKS[col.index()][sq.index()]
}

#[inline]
pub fn knight_attack(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

#[inline]
pub fn king_attack(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

#[inline]
pub fn bishop_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    BISHOP_TABLE[BISHOP_MAGICS[sq.index()].index(occ)]
}

#[inline]
pub fn rook_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    ROOK_TABLE[ROOK_MAGICS[sq.index()].index(occ)]
}

#[inline]
pub fn queen_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    bishop_attacks(sq, occ) | rook_attacks(sq, occ)
}

#[inline]
pub fn attacks(col: Colour, pt: PieceType, sq: Square, occ: Bitboard) -> Bitboard {
    match pt {
        PieceType::Pawn => pawn_attack(col, sq),
        PieceType::Knight => knight_attack(sq),
        PieceType::King => king_attack(sq),
        PieceType::Bishop => bishop_attacks(sq, occ),
        PieceType::Rook => rook_attacks(sq, occ),
        PieceType::Queen => queen_attacks(sq, occ),
    }
}

/// Squares strictly between two aligned squares; empty when the squares do
/// not share a rank, file or diagonal.
#[inline]
pub fn between_bb(from: Square, to: Square) -> Bitboard {
    BETWEEN_BB[from.index()][to.index()]
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::utils::PRNG;

    #[test]
    fn test_pawn_attacks() {
        for sq in Square::iter() {
            let sq_bb = sq.bb();

            let attack = pawn_attack(Colour::White, sq);
            let naive = sq_bb.shift(Direction::NE) | sq_bb.shift(Direction::NW);
            assert_eq!(attack, naive, "white pawn attack mismatch for {:?}", sq);

            let attack = pawn_attack(Colour::Black, sq);
            let naive = sq_bb.shift(Direction::SE) | sq_bb.shift(Direction::SW);
            assert_eq!(attack, naive, "black pawn attack mismatch for {:?}", sq);
        }
    }

    #[test]
    fn test_knight_attacks() {
        for sq in Square::iter() {
            let sq_bb = sq.bb();
            let naive = sq_bb.shift(Direction::NNE)
                | sq_bb.shift(Direction::NNW)
                | sq_bb.shift(Direction::NEE)
                | sq_bb.shift(Direction::NWW)
                | sq_bb.shift(Direction::SEE)
                | sq_bb.shift(Direction::SWW)
                | sq_bb.shift(Direction::SSE)
                | sq_bb.shift(Direction::SSW);
            assert_eq!(knight_attack(sq), naive, "knight attack mismatch for {:?}", sq);
        }
    }

    #[test]
    fn test_king_attacks() {
        for sq in Square::iter() {
            let sq_bb = sq.bb();
            let naive = sq_bb.shift(Direction::N)
                | sq_bb.shift(Direction::NE)
                | sq_bb.shift(Direction::NW)
                | sq_bb.shift(Direction::E)
                | sq_bb.shift(Direction::W)
                | sq_bb.shift(Direction::SE)
                | sq_bb.shift(Direction::SW)
                | sq_bb.shift(Direction::S);
            assert_eq!(king_attack(sq), naive, "king attack mismatch for {:?}", sq);
        }
    }

    // Magic table completeness: for random blocker sets the tabulated result
    // must equal the ray-walked attack set on every square.
    #[test]
    fn test_bishop_attacks() {
        let mut rng = PRNG::default();

        for _ in 0..1000 {
            let mut occ = Bitboard(rng.random_u64());

            for sq in Square::iter() {
                occ.clear(sq);
                let attack = bishop_attacks(sq, occ);
                let naive = Bitboard::attack_on_the_fly(PieceType::Bishop, sq.bb(), occ);
                assert_eq!(
                    attack, naive,
                    "bishop attack mismatch for {:?} with occ {:#x}",
                    sq, occ.0
                );
            }
        }
    }

    #[test]
    fn test_rook_attacks() {
        let mut rng = PRNG::default();

        for _ in 0..1000 {
            let mut occ = Bitboard(rng.random_u64());

            for sq in Square::iter() {
                occ.clear(sq);
                let attack = rook_attacks(sq, occ);
                let naive = Bitboard::attack_on_the_fly(PieceType::Rook, sq.bb(), occ);
                assert_eq!(
                    attack, naive,
                    "rook attack mismatch for {:?} with occ {:#x}",
                    sq, occ.0
                );
            }
        }
    }

    #[test]
    fn test_queen_attacks() {
        let mut rng = PRNG::default();

        for _ in 0..200 {
            let mut occ = Bitboard(rng.random_u64());

            for sq in Square::iter() {
                occ.clear(sq);
                let attack = queen_attacks(sq, occ);
                let naive = Bitboard::attack_on_the_fly(PieceType::Bishop, sq.bb(), occ)
                    | Bitboard::attack_on_the_fly(PieceType::Rook, sq.bb(), occ);
                assert_eq!(attack, naive);
            }
        }
    }

    #[test]
    fn test_between_bb_table() {
        for from in Square::iter() {
            for to in Square::iter() {
                let bb = between_bb(from, to);

                assert_eq!(
                    bb,
                    between_bb(to, from),
                    "between symmetry failed for {:?}-{:?}",
                    from,
                    to
                );
                assert!(!bb.contains(from));
                assert!(!bb.contains(to));
            }
        }

        assert_eq!(
            between_bb(Square::A1, Square::A4),
            Bitboard::from([Square::A2, Square::A3])
        );
        assert_eq!(between_bb(Square::H1, Square::F3), Square::G2.bb());
        assert_eq!(between_bb(Square::A1, Square::A2), Bitboard::EMPTY);
        assert_eq!(between_bb(Square::A1, Square::B3), Bitboard::EMPTY);
        assert_eq!(between_bb(Square::E4, Square::E4), Bitboard::EMPTY);
        assert_eq!(
            between_bb(Square::A1, Square::H8),
            Bitboard::from([
                Square::B2,
                Square::C3,
                Square::D4,
                Square::E5,
                Square::F6,
                Square::G7,
            ])
        );
    }
}
