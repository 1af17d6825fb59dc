//! FEN (Forsyth-Edwards Notation) parsing and emission for `Position`.
//!
//! Parsing is lenient about the two move counters: the board, side,
//! castling and en-passant fields are required, the halfmove and fullmove
//! fields optional. The counters are not part of the core position state,
//! so they are validated when present and otherwise ignored.

use thiserror::Error;

use super::Position;
use crate::core::*;

/******************************************\
|==========================================|
|            Useful fen strings            |
|==========================================|
\******************************************/

/// FEN string for the standard chess starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
/// FEN string for "Kiwipete", the classic move generation stress position.
pub const KIWIPETE_FEN: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/******************************************\
|==========================================|
|               Parse Fen                  |
|==========================================|
\******************************************/

impl Position {
    /// # Position constructor from a FEN string
    ///
    /// Accepts the standard six-field format; the halfmove clock and
    /// fullmove number may be omitted.
    ///
    /// ## Errors
    /// Returns `FenParseError` if the string has fewer than four fields or
    /// any field is malformed. A parseable FEN describing a position that
    /// violates the core invariants (no king, pawns on the last rank, ...)
    /// is not diagnosed here; callers own that validation.
    ///
    /// ## Examples
    ///
    /// ```
    /// use chess::board::{Position, START_FEN};
    ///
    /// let pos = Position::from_fen(START_FEN).unwrap();
    /// assert_eq!(pos.fen(), START_FEN);
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenParseError::NotEnoughFields(parts.len()));
        }

        let mut pos = Position::new();

        // --- 1. Piece placement ---
        let mut file: u8 = 0;
        let mut rank: u8 = 7;

        for token in parts[0].chars() {
            match token {
                '/' => {
                    if file != 8 {
                        return Err(FenParseError::InvalidRankFormat(
                            "rank ended before file h".to_string(),
                        ));
                    }
                    if rank == 0 {
                        return Err(FenParseError::InvalidRankFormat(
                            "too many rank separators".to_string(),
                        ));
                    }

                    file = 0;
                    rank -= 1;
                }
                '1'..='8' => {
                    file += token.to_digit(10).unwrap() as u8;
                    if file > 8 {
                        return Err(FenParseError::InvalidRankFormat(format!(
                            "skip digit '{token}' runs past file h"
                        )));
                    }
                }
                _ => {
                    if token.is_ascii_digit() {
                        return Err(FenParseError::InvalidRankFormat(format!(
                            "invalid skip digit '{token}'"
                        )));
                    }
                    if file >= 8 {
                        return Err(FenParseError::InvalidRankFormat(format!(
                            "piece '{token}' placed past file h"
                        )));
                    }

                    let square = Square::from_unchecked(rank * 8 + file);
                    let piece = token
                        .to_string()
                        .parse::<Piece>()
                        .map_err(|_| FenParseError::InvalidPiecePlacementChar(token))?;
                    pos.pieces[piece.index()].set(square);
                    file += 1;
                }
            }
        }

        if file != 8 || rank != 0 {
            return Err(FenParseError::InvalidRankFormat(
                "placement does not cover all 64 squares".to_string(),
            ));
        }

        // --- 2. Side to move ---
        pos.stm = match parts[1] {
            "w" => Colour::White,
            "b" => Colour::Black,
            other => return Err(FenParseError::InvalidSideToMove(other.to_string())),
        };

        // --- 3. Castling rights ---
        pos.castling = parse_castling(parts[2])?;

        // --- 4. En passant square ---
        pos.enpassant = match parts[3] {
            "-" => None,
            field => {
                let ep_sq: Square = field
                    .parse()
                    .map_err(|_| FenParseError::InvalidEnPassantSquare(field.to_string()))?;

                if ep_sq.rank() != Rank::Rank3 && ep_sq.rank() != Rank::Rank6 {
                    return Err(FenParseError::InvalidEnPassantSquare(field.to_string()));
                }

                Some(ep_sq)
            }
        };

        // --- 5/6. Optional move counters, validated when present ---
        if let Some(half) = parts.get(4) {
            half.parse::<u16>()
                .map_err(|_| FenParseError::InvalidHalfmoveClock(half.to_string()))?;
        }
        if let Some(full) = parts.get(5) {
            let n: u16 = full
                .parse()
                .map_err(|_| FenParseError::InvalidFullmoveNumber(full.to_string()))?;
            if n == 0 {
                return Err(FenParseError::InvalidFullmoveNumber(full.to_string()));
            }
        }

        pos.key = pos.calc_key();
        pos.update_attacks();

        Ok(pos)
    }

    /// # Get FEN string
    ///
    /// Emits the canonical six-field FEN for the position. The core does
    /// not track the move counters, so they render as "0 1".
    pub fn fen(&self) -> String {
        let mut fen = String::new();

        // --- 1. Piece placement ---
        for rank in Rank::iter().rev() {
            let mut empty_count = 0;
            for file in File::iter() {
                let square = Square::from_parts(file, rank);
                match self.on(square) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push_str(&piece.to_string());
                    }
                    None => {
                        empty_count += 1;
                    }
                }
            }

            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank != Rank::Rank1 {
                fen.push('/');
            }
        }

        // --- 2-4. Side, castling, en passant ---
        fen.push(' ');
        fen.push(match self.stm() {
            Colour::White => 'w',
            Colour::Black => 'b',
        });

        fen.push(' ');
        fen.push_str(&self.castling().to_string());

        fen.push(' ');
        match self.ep() {
            Some(sq) => fen.push_str(&sq.to_string()),
            None => fen.push('-'),
        }

        // --- 5/6. Move counters ---
        fen.push_str(" 0 1");

        fen
    }
}

fn parse_castling(field: &str) -> Result<Castling, FenParseError> {
    if field == "-" {
        return Ok(Castling::NONE);
    }

    let mut castling = Castling::NONE;
    for c in field.chars() {
        let right = match c {
            'K' => Castling::WK,
            'Q' => Castling::WQ,
            'k' => Castling::BK,
            'q' => Castling::BQ,
            _ => return Err(FenParseError::InvalidCastlingChar(c)),
        };

        if castling.has(right) {
            return Err(FenParseError::InvalidCastlingChar(c));
        }
        castling.set(right);
    }

    Ok(castling)
}

/******************************************\
|==========================================|
|             Fen Parse Error              |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenParseError {
    #[error("FEN has {0} fields, expected at least 4")]
    NotEnoughFields(usize),
    #[error("Invalid rank format: {0}")]
    InvalidRankFormat(String),
    #[error("Invalid piece placement character: '{0}'")]
    InvalidPiecePlacementChar(char),
    #[error("Invalid side to move: '{0}', expected 'w' or 'b'")]
    InvalidSideToMove(String),
    #[error("Invalid castling character: '{0}'")]
    InvalidCastlingChar(char),
    #[error("Invalid en passant square: '{0}'")]
    InvalidEnPassantSquare(String),
    #[error("Invalid halfmove clock: '{0}'")]
    InvalidHalfmoveClock(String),
    #[error("Invalid fullmove number: '{0}'")]
    InvalidFullmoveNumber(String),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_startpos() {
        let pos = Position::from_fen(START_FEN).unwrap();

        assert_eq!(pos.on(Square::E1), Some(Piece::WhiteKing));
        assert_eq!(pos.on(Square::D1), Some(Piece::WhiteQueen));
        assert_eq!(pos.on(Square::A8), Some(Piece::BlackRook));
        assert_eq!(pos.stm(), Colour::White);
        assert_eq!(pos.castling(), Castling::ALL);
        assert_eq!(pos.ep(), None);
    }

    #[test]
    fn test_parse_kiwipete() {
        let pos = Position::from_fen(KIWIPETE_FEN).unwrap();

        assert_eq!(pos.on(Square::E5), Some(Piece::WhiteKnight));
        assert_eq!(pos.on(Square::A6), Some(Piece::BlackBishop));
        assert_eq!(pos.on(Square::H3), Some(Piece::BlackPawn));
        assert_eq!(pos.castling(), Castling::ALL);
    }

    #[test]
    fn test_parse_en_passant_and_black_to_move() {
        let pos =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap();

        assert_eq!(pos.stm(), Colour::Black);
        assert_eq!(pos.ep(), Some(Square::E3));
        assert_eq!(pos.ep_target(), Some(Square::E4));
    }

    #[test]
    fn test_counters_are_optional() {
        let four_fields = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - -").unwrap();
        let five_fields = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 12").unwrap();
        let six_fields = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 12 30").unwrap();

        assert_eq!(four_fields, five_fields);
        assert_eq!(five_fields, six_fields);
    }

    #[test]
    fn test_fen_roundtrip() {
        let fens = [
            START_FEN,
            KIWIPETE_FEN,
            "7k/6pp/8/8/8/8/8/R3K3 w Q - 0 1",
            "r5rk/5p1p/5R2/4B3/8/8/7P/7K w - - 0 1",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        ];

        for fen in fens {
            let pos = Position::from_fen(fen).unwrap();
            assert_eq!(pos.fen(), fen, "roundtrip failed");
        }
    }

    #[test]
    fn test_malformed_board_fields() {
        assert!(Position::from_fen("").is_err());
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/4K3").is_err());
        // Too few squares on a rank
        assert!(Position::from_fen("4k2/8/8/8/8/8/8/4K3 w - -").is_err());
        // Too many squares on a rank
        assert!(Position::from_fen("4k4/8/8/8/8/8/8/4K3 w - -").is_err());
        // Too many ranks
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/8/4K3 w - -").is_err());
        // Bad piece letter
        assert!(Position::from_fen("4x3/8/8/8/8/8/8/4K3 w - -").is_err());
    }

    #[test]
    fn test_malformed_state_fields() {
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 x - -"),
            Err(FenParseError::InvalidSideToMove(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w KX -"),
            Err(FenParseError::InvalidCastlingChar('X'))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w KK -"),
            Err(FenParseError::InvalidCastlingChar('K'))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - e5"),
            Err(FenParseError::InvalidEnPassantSquare(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - x"),
            Err(FenParseError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 0"),
            Err(FenParseError::InvalidFullmoveNumber(_))
        ));
    }
}
