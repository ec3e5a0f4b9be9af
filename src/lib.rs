//! A chess rules library: positions, attacks, legal moves, and FEN, SAN and UCI notation.
//!
//! ```
//! use chessrules::{Position, Square};
//!
//! let mut pos = Position::new();
//! assert_eq!(pos.moves().len(), 20);
//!
//! let mv = pos.parse_notation("Nf3", true)?;
//! assert_eq!(mv.to(), Square::F3);
//! pos.play(mv);
//! assert_eq!(pos.to_fen_str(), "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 0 1");
//! # Ok::<(), chessrules::Error>(())
//! ```
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::ops;
use std::fmt;
use std::str::FromStr;
use std::convert::TryFrom;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which side a piece or player is on, based on the color of the pieces for that side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The number of colors
    pub const COUNT: usize = 2;

    /// The rank where this color's pieces start out.
    pub fn first_rank(self) -> Rank {
        match self {
            Color::White => Rank::R1,
            Color::Black => Rank::R8,
        }
    }

    /// The rank where this color's pawns promote.
    pub fn last_rank(self) -> Rank {
        (!self).first_rank()
    }
}

impl ops::Not for Color {
    type Output = Color;

    /// Returns the opposite color
    ///
    /// # Example
    /// ```
    /// use chessrules::Color;
    /// assert_eq!(!Color::White, Color::Black);
    /// assert_eq!(!Color::Black, Color::White);
    /// ```
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => 'w'.fmt(f),
            Color::Black => 'b'.fmt(f),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _   => Err(Error::ParseError),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

impl TryFrom<usize> for Color {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            0 => Ok(Color::White),
            1 => Ok(Color::Black),
            _ => Err(Error::TryFromIntError),
        }
    }
}

impl From<Color> for usize {
    fn from(value: Color) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The type of a chess piece
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// The number of piece types
    pub const COUNT: usize = Piece::King as usize + 1;

    /// All piece types, in ascending order.
    pub const ALL: [Piece; Piece::COUNT] =
        [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King];

    /// Returns the figurine (Unicode chess symbol) for a piece of the given color.
    pub fn figurine(self, color: Color) -> char {
        match (color, self) {
            (Color::White, Piece::King) => '\u{2654}',
            (Color::White, Piece::Queen) => '\u{2655}',
            (Color::White, Piece::Rook) => '\u{2656}',
            (Color::White, Piece::Bishop) => '\u{2657}',
            (Color::White, Piece::Knight) => '\u{2658}',
            (Color::White, Piece::Pawn) => '\u{2659}',
            (Color::Black, Piece::King) => '\u{265a}',
            (Color::Black, Piece::Queen) => '\u{265b}',
            (Color::Black, Piece::Rook) => '\u{265c}',
            (Color::Black, Piece::Bishop) => '\u{265d}',
            (Color::Black, Piece::Knight) => '\u{265e}',
            (Color::Black, Piece::Pawn) => '\u{265f}',
        }
    }

    /// Returns the FEN letter of a piece of the given color (uppercase for white).
    pub fn fen_char(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'P',
            Piece::Knight => 'N',
            Piece::Bishop => 'B',
            Piece::Rook => 'R',
            Piece::Queen => 'Q',
            Piece::King => 'K',
        };
        match color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Parses a FEN letter into a colored piece.
    pub fn from_fen_char(c: char) -> Option<(Color, Piece)> {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        let piece = match c.to_ascii_uppercase() {
            'P' => Piece::Pawn,
            'N' => Piece::Knight,
            'B' => Piece::Bishop,
            'R' => Piece::Rook,
            'Q' => Piece::Queen,
            'K' => Piece::King,
            _ => return None,
        };
        Some((color, piece))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fen_char(Color::White).fmt(f)
    }
}

impl FromStr for Piece {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Piece::from_fen_char(c).map(|(_, p)| p).ok_or(Error::ParseError),
            _ => Err(Error::ParseError),
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::Pawn
    }
}

impl TryFrom<usize> for Piece {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Piece::ALL.get(value).copied().ok_or(Error::TryFromIntError)
    }
}

impl From<Piece> for usize {
    fn from(value: Piece) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Vertical column of the board, labeled from left to right from `White`'s perspective as
/// `A` through `H`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum File {
    A = 0, B = 1, C = 2, D = 3, E = 4, F = 5, G = 6, H = 7,
}

impl File {
    /// The number of files
    pub const COUNT: usize = File::H as usize + 1;

    /// All files, from `A` to `H`.
    pub const ALL: [File; File::COUNT] =
        [File::A, File::B, File::C, File::D, File::E, File::F, File::G, File::H];

    /// Returns the lowercase letter of the file.
    pub fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }

    /// Parses a file letter, in either case.
    pub fn from_char(c: char) -> Option<File> {
        match c {
            'a' ..= 'h' => File::ALL.get(c as usize - 'a' as usize).copied(),
            'A' ..= 'H' => File::ALL.get(c as usize - 'A' as usize).copied(),
            _ => None,
        }
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_char().fmt(f)
    }
}

impl FromStr for File {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => File::from_char(c).ok_or(Error::ParseError),
            _ => Err(Error::ParseError),
        }
    }
}

impl Default for File {
    fn default() -> Self {
        File::A
    }
}

impl TryFrom<usize> for File {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        File::ALL.get(value).copied().ok_or(Error::TryFromIntError)
    }
}

impl From<File> for usize {
    fn from(value: File) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Horizontal row of the board, labeled from nearest to farthest from `White`'s perspective
/// as `R1` through `R8`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Rank {
    R1 = 0, R2 = 1, R3 = 2, R4 = 3, R5 = 4, R6 = 5, R7 = 6, R8 = 7,
}

impl Rank {
    /// The number of ranks
    pub const COUNT: usize = Rank::R8 as usize + 1;

    /// All ranks, from `R1` to `R8`.
    pub const ALL: [Rank; Rank::COUNT] =
        [Rank::R1, Rank::R2, Rank::R3, Rank::R4, Rank::R5, Rank::R6, Rank::R7, Rank::R8];

    /// Returns the digit of the rank.
    pub fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }

    /// Parses a rank digit.
    pub fn from_char(c: char) -> Option<Rank> {
        match c {
            '1' ..= '8' => Rank::ALL.get(c as usize - '1' as usize).copied(),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_char().fmt(f)
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::from_char(c).ok_or(Error::ParseError),
            _ => Err(Error::ParseError),
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::R1
    }
}

impl TryFrom<usize> for Rank {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Rank::ALL.get(value).copied().ok_or(Error::TryFromIntError)
    }
}

impl From<Rank> for usize {
    fn from(value: Rank) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A specific square on the board, labeled using the `File` and `Rank` as coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Square {
    A1 = 0o00, B1 = 0o01, C1 = 0o02, D1 = 0o03, E1 = 0o04, F1 = 0o05, G1 = 0o06, H1 = 0o07,
    A2 = 0o10, B2 = 0o11, C2 = 0o12, D2 = 0o13, E2 = 0o14, F2 = 0o15, G2 = 0o16, H2 = 0o17,
    A3 = 0o20, B3 = 0o21, C3 = 0o22, D3 = 0o23, E3 = 0o24, F3 = 0o25, G3 = 0o26, H3 = 0o27,
    A4 = 0o30, B4 = 0o31, C4 = 0o32, D4 = 0o33, E4 = 0o34, F4 = 0o35, G4 = 0o36, H4 = 0o37,
    A5 = 0o40, B5 = 0o41, C5 = 0o42, D5 = 0o43, E5 = 0o44, F5 = 0o45, G5 = 0o46, H5 = 0o47,
    A6 = 0o50, B6 = 0o51, C6 = 0o52, D6 = 0o53, E6 = 0o54, F6 = 0o55, G6 = 0o56, H6 = 0o57,
    A7 = 0o60, B7 = 0o61, C7 = 0o62, D7 = 0o63, E7 = 0o64, F7 = 0o65, G7 = 0o66, H7 = 0o67,
    A8 = 0o70, B8 = 0o71, C8 = 0o72, D8 = 0o73, E8 = 0o74, F8 = 0o75, G8 = 0o76, H8 = 0o77,
}

use Square::*;

impl Square {
    /// The number of squares
    pub const COUNT: usize = Square::H8 as usize + 1;

    /// All squares, rank by rank from `A1` to `H8`.
    pub const ALL: [Square; Square::COUNT] = [
        A1, B1, C1, D1, E1, F1, G1, H1,
        A2, B2, C2, D2, E2, F2, G2, H2,
        A3, B3, C3, D3, E3, F3, G3, H3,
        A4, B4, C4, D4, E4, F4, G4, H4,
        A5, B5, C5, D5, E5, F5, G5, H5,
        A6, B6, C6, D6, E6, F6, G6, H6,
        A7, B7, C7, D7, E7, F7, G7, H7,
        A8, B8, C8, D8, E8, F8, G8, H8,
    ];

    /// Returns a square from its file and rank
    pub fn from_coord(file: File, rank: Rank) -> Square {
        Square::ALL[((rank as usize) << 3) + file as usize]
    }

    /// Returns the square's file
    pub fn file(self) -> File {
        File::ALL[(self as usize) & 7]
    }

    /// Returns the square's rank
    pub fn rank(self) -> Rank {
        Rank::ALL[(self as usize) >> 3]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.file().to_string() + &self.rank().to_string()).fmt(f)
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let c: Vec<_> = s.chars().collect();
        if c.len() == 2 && c[0].is_ascii_lowercase() {
            match (File::from_char(c[0]), Rank::from_char(c[1])) {
                (Some(file), Some(rank)) => Ok(Square::from_coord(file, rank)),
                _ => Err(Error::ParseError),
            }
        } else {
            Err(Error::ParseError)
        }
    }
}

impl Default for Square {
    fn default() -> Self {
        Square::A1
    }
}

impl TryFrom<usize> for Square {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Square::ALL.get(value).copied().ok_or(Error::TryFromIntError)
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The rule set a `Position` is played under.
///
/// Besides standard chess and Chess960, three reduced-king variants exist for didactic positions:
/// they are legal with no king at all, or with a king for one side only.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Variant {
    Regular,
    Chess960,
    NoKing,
    WhiteKingOnly,
    BlackKingOnly,
}

impl Variant {
    /// Returns `true` if a legal position in this variant has exactly one king of color `c`.
    /// Otherwise a legal position has no king of that color.
    pub fn has_king(self, c: Color) -> bool {
        match (self, c) {
            (Variant::Regular, _) | (Variant::Chess960, _) => true,
            (Variant::NoKing, _) => false,
            (Variant::WhiteKingOnly, color) => color == Color::White,
            (Variant::BlackKingOnly, color) => color == Color::Black,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Regular => "regular",
            Variant::Chess960 => "chess960",
            Variant::NoKing => "no-king",
            Variant::WhiteKingOnly => "white-king-only",
            Variant::BlackKingOnly => "black-king-only",
        }.fmt(f)
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "regular" => Ok(Variant::Regular),
            "chess960" => Ok(Variant::Chess960),
            "no-king" => Ok(Variant::NoKing),
            "white-king-only" => Ok(Variant::WhiteKingOnly),
            "black-king-only" => Ok(Variant::BlackKingOnly),
            _ => Err(Error::ParseError),
        }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Regular
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The side of the board a castling move goes to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// File the king lands on.
    pub fn king_destination(self) -> File {
        match self {
            CastleSide::KingSide => File::G,
            CastleSide::QueenSide => File::C,
        }
    }

    /// File the rook lands on.
    pub fn rook_destination(self) -> File {
        match self {
            CastleSide::KingSide => File::F,
            CastleSide::QueenSide => File::D,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
mod board;
mod position;
mod moves;
pub mod error;
pub mod variations;

pub use error::{Error, Reason, Result};
pub use position::{Position, MoveCounters, CHESS960_POSITIONS, CHESS960_STANDARD};
pub use moves::{MoveDescriptor, MoveKind, MoveResolver, Promotion};



#[cfg(test)]
mod square_tests {
    use std::convert::TryFrom;
    use super::*;

    #[test]
    fn display_trait_works() {
        assert_eq!(format!("{}", Square::A1), "a1");
        assert_eq!(format!("{}", Square::E4), "e4");
        assert_eq!(format!("{}", Square::H8), "h8");
    }

    #[test]
    fn fromstr_trait_works() {
        assert_eq!("c7".parse::<Square>().unwrap(), Square::C7);
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("A1".parse::<Square>().is_err());
        assert!("a10".parse::<Square>().is_err());
    }

    #[test]
    fn coordinates_round_trip() {
        for &sq in Square::ALL.iter() {
            assert_eq!(Square::from_coord(sq.file(), sq.rank()), sq);
        }
        assert_eq!(Square::G5.file(), File::G);
        assert_eq!(Square::G5.rank(), Rank::R5);
    }

    #[test]
    fn usize_conversions_are_correct() {
        assert_eq!(usize::from(Square::B1), 1);
        assert_eq!(usize::from(Square::A2), 8);
        assert_eq!(Square::try_from(63).unwrap(), Square::H8);
        assert!(Square::try_from(64).is_err());
    }
}

#[cfg(test)]
mod variant_tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for &v in &[Variant::Regular, Variant::Chess960, Variant::NoKing,
                    Variant::WhiteKingOnly, Variant::BlackKingOnly] {
            assert_eq!(v.to_string().parse::<Variant>().unwrap(), v);
        }
        assert!("atomic".parse::<Variant>().is_err());
    }

    #[test]
    fn kings_required_by_variant() {
        assert!(Variant::Chess960.has_king(Color::Black));
        assert!(!Variant::NoKing.has_king(Color::White));
        assert!(Variant::WhiteKingOnly.has_king(Color::White));
        assert!(!Variant::WhiteKingOnly.has_king(Color::Black));
        assert!(!Variant::BlackKingOnly.has_king(Color::White));
    }
}
