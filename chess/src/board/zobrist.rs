use super::Position;
use crate::core::*;
use crate::utils::PRNG;

/******************************************\
|==========================================|
|              Key Definition              |
|==========================================|
\******************************************/

/// Type alias for a Zobrist key.
pub type Key = u64;

/******************************************\
|==========================================|
|              Zobrist Table               |
|==========================================|
\******************************************/

/// Process-wide table of random keys, one per hashable component of a
/// position: piece-on-square, castling-rights combination, en-passant file
/// (plus one slot for "no en-passant square") and side to move.
///
/// The table is built at compile time from a fixed-seed generator, so
/// identical positions hash identically across runs and processes.
#[derive(Debug)]
pub struct ZobristTable {
    /// Keys for each piece on each square: `pieces[piece_index][square_index]`.
    pub pieces: [[Key; Square::NUM]; Piece::NUM],
    /// Key XORed into the hash when Black is to move.
    pub side_to_move: Key,
    /// Keys for each possible castling rights mask: `castling[castling_mask]`.
    pub castling: [Key; Castling::NUM],
    /// Keys for the eight en-passant files plus the "none" slot.
    pub enpassant: [Key; File::NUM + 1],
}

/// Index of the "no en-passant square" slot.
const EP_NONE: usize = File::NUM;

pub static ZOBRIST: ZobristTable = init_zobrist_table();

/******************************************\
|==========================================|
|              Initialisation              |
|==========================================|
\******************************************/

const fn init_zobrist_table() -> ZobristTable {
    let mut rng = PRNG::new(0xDEADBEEFCAFEBABE);

    let mut pieces = [[0; Square::NUM]; Piece::NUM];
    let mut castling = [0; Castling::NUM];
    let mut enpassant = [0; File::NUM + 1];

    let mut i = 0;
    while i < Piece::NUM {
        let mut j = 0;
        while j < Square::NUM {
            pieces[i][j] = rng.random_u64();
            j += 1;
        }
        i += 1;
    }

    let side_to_move = rng.random_u64();

    i = 0;
    while i < Castling::NUM {
        castling[i] = rng.random_u64();
        i += 1;
    }

    i = 0;
    while i < File::NUM + 1 {
        enpassant[i] = rng.random_u64();
        i += 1;
    }

    ZobristTable {
        pieces,
        side_to_move,
        castling,
        enpassant,
    }
}

/******************************************\
|==========================================|
|              Access Functions            |
|==========================================|
\******************************************/

/// The key for a specific piece on a specific square.
#[inline]
pub fn piece_key(piece: Piece, sq: Square) -> Key {
    ZOBRIST.pieces[piece.index()][sq.index()]
}

/// The side-to-move key, XORed into the hash when Black is to move.
#[inline]
pub fn side_key() -> Key {
    ZOBRIST.side_to_move
}

/// The key for a full set of castling rights.
#[inline]
pub fn castle_key(rights: Castling) -> Key {
    ZOBRIST.castling[rights.0 as usize]
}

/// The key for the current en-passant file, or the "none" slot when no
/// en-passant capture is available.
#[inline]
pub fn ep_key(file: Option<File>) -> Key {
    match file {
        Some(file) => ZOBRIST.enpassant[file.index()],
        None => ZOBRIST.enpassant[EP_NONE],
    }
}

/******************************************\
|==========================================|
|          Position Implementation         |
|==========================================|
\******************************************/

impl Position {
    /// Computes the Zobrist key from scratch. The incrementally maintained
    /// key must always equal this value; `apply_move` relies on it.
    pub fn calc_key(&self) -> Key {
        let mut key = 0;

        for sq in Square::iter() {
            if let Some(piece) = self.on(sq) {
                key ^= piece_key(piece, sq);
            }
        }

        if self.stm() == Colour::Black {
            key ^= side_key();
        }

        key ^= castle_key(self.castling());

        key ^= ep_key(self.ep().map(|sq| sq.file()));

        key
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::super::fen::{KIWIPETE_FEN, START_FEN};
    use super::*;

    #[test]
    fn zobrist_table_init() {
        assert_ne!(piece_key(Piece::WhitePawn, Square::E4), 0);
        assert_ne!(piece_key(Piece::BlackKing, Square::G8), 0);
        assert_ne!(side_key(), 0);
        assert_ne!(castle_key(Castling::WK), 0);
        assert_ne!(ep_key(Some(File::FileD)), 0);
        assert_ne!(ep_key(None), 0);

        assert_ne!(
            piece_key(Piece::WhitePawn, Square::E4),
            piece_key(Piece::WhitePawn, Square::E5)
        );
        assert_ne!(
            piece_key(Piece::WhitePawn, Square::E4),
            piece_key(Piece::BlackPawn, Square::E4)
        );
        assert_ne!(castle_key(Castling::WK), castle_key(Castling::WQ));
        assert_ne!(castle_key(Castling::ALL), castle_key(Castling::NONE));
        assert_ne!(ep_key(Some(File::FileA)), ep_key(Some(File::FileH)));
        assert_ne!(ep_key(Some(File::FileA)), ep_key(None));
    }

    fn key_from_fen(fen: &str) -> Key {
        let pos = Position::from_fen(fen).expect("test FEN failed to parse");
        let calculated = pos.calc_key();

        assert_eq!(
            calculated,
            pos.key(),
            "stored key differs from calculated key"
        );

        calculated
    }

    #[test]
    fn test_startpos_key() {
        let key_start = key_from_fen(START_FEN);
        assert_ne!(key_start, 0, "startpos key should not be zero");

        let key_start_again = key_from_fen(START_FEN);
        assert_eq!(key_start, key_start_again, "startpos key is not consistent");
    }

    #[test]
    fn test_piece_difference() {
        let key_start = key_from_fen(START_FEN);

        let key_nc3 =
            key_from_fen("rnbqkbnr/pppppppp/8/8/8/2N5/PPPPPPPP/R1BQKBNR w KQkq - 0 1");
        assert_ne!(key_start, key_nc3);

        let expected_key = key_start
            ^ piece_key(Piece::WhiteKnight, Square::B1)
            ^ piece_key(Piece::WhiteKnight, Square::C3);
        assert_eq!(key_nc3, expected_key, "manual piece XOR did not match");
    }

    #[test]
    fn test_castling_difference() {
        let key_kqkq = key_from_fen(START_FEN);
        let key_kqk = key_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQk - 0 1");
        let key_none = key_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1");

        assert_ne!(key_kqkq, key_kqk);
        assert_ne!(key_kqk, key_none);

        let expected_key_kqk = key_kqkq ^ castle_key(Castling::ALL) ^ castle_key(Castling(7));
        assert_eq!(key_kqk, expected_key_kqk, "manual castling XOR did not match");

        let expected_key_none = key_kqkq ^ castle_key(Castling::ALL) ^ castle_key(Castling::NONE);
        assert_eq!(key_none, expected_key_none);
    }

    #[test]
    fn test_enpassant_difference() {
        let base = key_from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
        let with_ep = key_from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");

        assert_ne!(base, with_ep, "keys should differ only by EP square");

        assert_eq!(
            with_ep,
            base ^ ep_key(None) ^ ep_key(Some(File::FileE)),
            "manual EP XOR did not match"
        );
    }

    #[test]
    fn test_kiwipete_key() {
        let key_kiwi = key_from_fen(KIWIPETE_FEN);
        assert_ne!(key_kiwi, 0);
        assert_ne!(key_kiwi, key_from_fen(START_FEN));
    }
}
