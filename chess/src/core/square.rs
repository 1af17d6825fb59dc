use super::types::Colour;
use thiserror::Error;

/******************************************\
|==========================================|
|                 Squares                  |
|==========================================|
\******************************************/

/// # Square representation
///
/// Rank-major square indices: A1 = 0, H1 = 7, A8 = 56, H8 = 63.

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Number of squares on the board
    pub const NUM: usize = 64;
}

crate::impl_enum_utils!(Square);

/******************************************\
|==========================================|
|                  Ranks                   |
|==========================================|
\******************************************/

/// # Rank representation

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
pub enum Rank {
    Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8,
}

impl Rank {
    /// Number of ranks on the board
    pub const NUM: usize = 8;
}

crate::impl_enum_utils!(Rank);

/******************************************\
|==========================================|
|                  Files                   |
|==========================================|
\******************************************/

/// # File representation

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
pub enum File {
    FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
}

impl File {
    /// Number of files on the board
    pub const NUM: usize = 8;
}

crate::impl_enum_utils!(File);

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

impl Square {
    /// Returns the rank of a square
    ///
    /// ## Examples
    ///
    /// ```
    /// use chess::core::{Square, Rank};
    ///
    /// assert_eq!(Square::A1.rank(), Rank::Rank1);
    /// assert_eq!(Square::E4.rank(), Rank::Rank4);
    /// assert_eq!(Square::H8.rank(), Rank::Rank8);
    /// ```
    pub const fn rank(&self) -> Rank {
        Rank::from_unchecked((*self as u8) >> 3)
    }

    /// Returns the file of a square
    ///
    /// ## Examples
    ///
    /// ```
    /// use chess::core::{Square, File};
    ///
    /// assert_eq!(Square::A1.file(), File::FileA);
    /// assert_eq!(Square::E4.file(), File::FileE);
    /// ```
    pub const fn file(&self) -> File {
        File::from_unchecked((*self as u8) & 0b111)
    }

    /// Flips the rank of a square, switching between the white and black
    /// perspectives of the board
    ///
    /// ## Examples
    ///
    /// ```
    /// use chess::core::Square;
    ///
    /// assert_eq!(Square::A1.flip_rank(), Square::A8);
    /// assert_eq!(Square::E4.flip_rank(), Square::E5);
    /// ```
    pub const fn flip_rank(&self) -> Self {
        Self::from_unchecked((*self as u8) ^ Square::A8 as u8)
    }

    /// Returns the square as seen from the perspective of `col`
    ///
    /// ## Examples
    ///
    /// ```
    /// use chess::core::{Square, Colour};
    ///
    /// assert_eq!(Square::E2.relative(Colour::White), Square::E2);
    /// assert_eq!(Square::E2.relative(Colour::Black), Square::E7);
    /// ```
    pub const fn relative(&self, col: Colour) -> Self {
        match col {
            Colour::White => *self,
            Colour::Black => self.flip_rank(),
        }
    }

    /// Combines a file and a rank into a square
    pub const fn from_parts(file: File, rank: Rank) -> Self {
        Self::from_unchecked(((rank as u8) << 3) | file as u8)
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl std::fmt::Display for Square {
    /// Formats the square in algebraic notation ("e4")
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file() as u8) as char,
            (b'1' + self.rank() as u8) as char
        )
    }
}

/******************************************\
|==========================================|
|               Parse Square               |
|==========================================|
\******************************************/

impl std::str::FromStr for Square {
    type Err = ParseSquareError;

    /// Parses an algebraic square string ("e4") into a square
    ///
    /// ## Examples
    ///
    /// ```
    /// use chess::core::Square;
    ///
    /// assert_eq!("a1".parse::<Square>().unwrap(), Square::A1);
    /// assert_eq!("h8".parse::<Square>().unwrap(), Square::H8);
    /// assert!("i9".parse::<Square>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (file_char, rank_char) = match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => (f, r),
            _ => return Err(ParseSquareError::InvalidLength(s.len())),
        };

        if !('a'..='h').contains(&file_char) {
            return Err(ParseSquareError::InvalidFile(file_char));
        }
        if !('1'..='8').contains(&rank_char) {
            return Err(ParseSquareError::InvalidRank(rank_char));
        }

        let file = File::from_unchecked(file_char as u8 - b'a');
        let rank = Rank::from_unchecked(rank_char as u8 - b'1');

        Ok(Square::from_parts(file, rank))
    }
}

/******************************************\
|==========================================|
|            Square Parse Error            |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseSquareError {
    #[error("Invalid length for square string: {0}, expected 2")]
    InvalidLength(usize),
    #[error("Invalid file character: '{0}', expected 'a'-'h'")]
    InvalidFile(char),
    #[error("Invalid rank character: '{0}', expected '1'-'8'")]
    InvalidRank(char),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
