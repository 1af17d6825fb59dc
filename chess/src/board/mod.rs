//! # Module: `board`
//!
//! The `Position` value type and everything that operates on it: FEN
//! parsing, Zobrist hashing, move application and legal move generation.
//!
//! A `Position` is immutable from the outside: applying a move produces a
//! fresh successor and leaves the predecessor intact, so the search stack is
//! simply a chain of positions along the current variation.
pub mod fen;
pub mod movegen;
pub mod movement;
pub mod san;
pub mod zobrist;

pub use fen::{FenParseError, KIWIPETE_FEN, START_FEN};
pub use movegen::{
    attacks, between_bb, bishop_attacks, generate_evasions, generate_for_piece, generate_forcing,
    generate_legal, init_magic_tables, king_attack, knight_attack, pawn_attack, queen_attacks,
    rook_attacks,
};
pub use san::san;
pub use zobrist::Key;

use crate::core::*;

/******************************************\
|==========================================|
|                 Position                 |
|==========================================|
\******************************************/

/// # Chess position
///
/// Twelve per-piece bitboards, side to move, castling rights, the en-passant
/// square (if any), the Zobrist key, and one aggregate attack bitboard per
/// side.
///
/// The attack maps are a derived cache covering every square attacked by any
/// piece of that colour, own pieces included. They are rebuilt from scratch
/// by [`Position::update_attacks`] and must be refreshed before move
/// generation or check queries on a freshly applied position; [`Position::make`]
/// does both steps. Position equality ignores them.
#[derive(Debug, Clone)]
pub struct Position {
    /// One bitboard per coloured piece, indexed by `Piece`.
    pieces: [Bitboard; Piece::NUM],

    /// The side to move.
    stm: Colour,

    /// Remaining castling rights.
    castling: Castling,

    /// The square a double-pushed pawn skipped, if the last move was a
    /// double push. Always on the third or sixth rank.
    enpassant: Option<Square>,

    /// Squares attacked by each colour. Derived cache, see the type docs.
    attacks: [Bitboard; Colour::NUM],

    /// Incrementally maintained Zobrist key.
    key: Key,
}

impl PartialEq for Position {
    /// Attack maps are a derived cache and do not take part in equality.
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
            && self.stm == other.stm
            && self.castling == other.castling
            && self.enpassant == other.enpassant
            && self.key == other.key
    }
}

impl Eq for Position {}

impl Default for Position {
    /// The standard starting position.
    fn default() -> Position {
        Position::from_fen(START_FEN).expect("start position FEN is valid")
    }
}

/******************************************\
|==========================================|
|           Basic Implementation           |
|==========================================|
\******************************************/

impl Position {
    /// An empty board with White to move and no rights. Only useful as a
    /// base for FEN parsing.
    pub(crate) fn new() -> Position {
        Position {
            pieces: [Bitboard::EMPTY; Piece::NUM],
            stm: Colour::White,
            castling: Castling::NONE,
            enpassant: None,
            attacks: [Bitboard::EMPTY; Colour::NUM],
            key: 0,
        }
    }

    /// The piece standing on `square`, if any.
    #[inline]
    pub fn on(&self, square: Square) -> Option<Piece> {
        for piece in Piece::iter() {
            if self.pieces[piece.index()].contains(square) {
                return Some(piece);
            }
        }
        None
    }

    /// The bitboard of one coloured piece.
    #[inline]
    pub fn piece_bb(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    /// The bitboard of one piece type of one colour.
    #[inline]
    pub fn piece_of(&self, col: Colour, pt: PieceType) -> Bitboard {
        self.piece_bb(Piece::from_parts(col, pt))
    }

    /// All pieces of a given type, both colours.
    #[inline]
    pub fn piecetype_bb(&self, pt: PieceType) -> Bitboard {
        self.piece_of(Colour::White, pt) | self.piece_of(Colour::Black, pt)
    }

    /// All pieces of one colour.
    #[inline]
    pub fn occupied_bb(&self, colour: Colour) -> Bitboard {
        let mut bb = Bitboard::EMPTY;
        for pt in PieceType::iter() {
            bb |= self.piece_of(colour, pt);
        }
        bb
    }

    /// Every occupied square on the board.
    #[inline]
    pub fn all_occupied_bb(&self) -> Bitboard {
        self.occupied_bb(Colour::White) | self.occupied_bb(Colour::Black)
    }

    /// The side to move.
    #[inline]
    pub fn stm(&self) -> Colour {
        self.stm
    }

    /// Remaining castling rights.
    #[inline]
    pub fn castling(&self) -> Castling {
        self.castling
    }

    /// The en-passant square, if one is available this turn.
    #[inline]
    pub fn ep(&self) -> Option<Square> {
        self.enpassant
    }

    /// The square of the pawn that can be captured en passant.
    #[inline]
    pub fn ep_target(&self) -> Option<Square> {
        self.enpassant
            .map(|sq| unsafe { sq.add_unchecked(-self.stm.forward()) })
    }

    /// The Zobrist key of the position.
    #[inline]
    pub fn key(&self) -> Key {
        self.key
    }

    /// The aggregate attack map of one colour. Valid only after
    /// [`Position::update_attacks`].
    #[inline]
    pub fn attacks_by(&self, colour: Colour) -> Bitboard {
        self.attacks[colour.index()]
    }

    /// The king square of a colour. Positions always carry exactly one king
    /// per side.
    #[inline]
    pub fn king_sq(&self, colour: Colour) -> Square {
        self.piece_of(colour, PieceType::King).lsb_unchecked()
    }

    /// Whether the side to move is in check. Requires fresh attack maps.
    #[inline]
    pub fn in_check(&self) -> bool {
        (self.piece_of(self.stm, PieceType::King) & self.attacks_by(!self.stm)).is_occupied()
    }

    /// The bitboard of all pieces of either colour attacking `to` under the
    /// supplied occupancy. Central to check detection, exchange evaluation
    /// and check-response generation.
    pub fn attackers_to(&self, to: Square, occ: Bitboard) -> Bitboard {
        use crate::core::{Colour::*, PieceType::*};
        pawn_attack(White, to) & self.piece_of(Black, Pawn)
            | pawn_attack(Black, to) & self.piece_of(White, Pawn)
            | knight_attack(to) & self.piecetype_bb(Knight)
            | bishop_attacks(to, occ) & (self.piecetype_bb(Bishop) | self.piecetype_bb(Queen))
            | rook_attacks(to, occ) & (self.piecetype_bb(Rook) | self.piecetype_bb(Queen))
            | king_attack(to) & self.piecetype_bb(King)
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SEPARATOR: &str = "\n     +---+---+---+---+---+---+---+---+";

        writeln!(f, "{}", SEPARATOR)?;

        for rank in Rank::iter().rev() {
            write!(f, " {}   |", rank as u8 + 1)?;

            for file in File::iter() {
                let square = Square::from_parts(file, rank);
                let cell = match self.on(square) {
                    Some(piece) => piece.to_string(),
                    None => " ".to_string(),
                };
                write!(f, " {} |", cell)?;
            }

            writeln!(f, "{}", SEPARATOR)?;
        }

        writeln!(f)?;
        writeln!(f, "       A   B   C   D   E   F   G   H")?;
        writeln!(f)?;
        writeln!(f, "Current Side: {:?}", self.stm())?;
        writeln!(f, "Castling: {}", self.castling)?;
        writeln!(
            f,
            "En Passant Square: {}",
            match self.enpassant {
                Some(square) => square.to_string(),
                None => "None".to_string(),
            }
        )?;
        writeln!(f, "Fen: {}", self.fen())?;
        writeln!(f, "Key: {:#X}", self.key)?;

        Ok(())
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
