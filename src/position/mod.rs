//! Contains structures related to the `Position`.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use super::*;
use board::*;
use error::illegal_argument;

use Color::*;
use Piece::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A representation of the arrangement of pieces on the board at a given point in the game, as
/// well as whose turn it is, castling availability, en passant availability, and the variant the
/// game is played under.
///
/// # Instantiation
///  -  [`new`](#method.new) (or `Default`) creates the standard starting position.
///  -  [`empty`](#method.empty) creates an empty board for any variant.
///  -  [`chess960`](#method.chess960) creates one of the 960 Chess960 starting positions.
///  -  [`from_fen`](#method.from_fen) and [`from_fen_str`](#method.from_fen_str) (along with its
///     synonyms `from_str` and `str::parse`) parse [Forsyth-Edwards
///     Notation (FEN)](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation).
///
/// # Legality
/// A position may be edited freely with the setters, so it is not necessarily legal. Whether it
/// is legal is recomputed each time it changes, and is available through
/// [`is_legal`](#method.is_legal). Illegal positions have no moves.
///
/// ```rust
/// use chessrules::{Position, Square, Color, Piece};
///
/// let mut pos = Position::new();
/// pos.set_piece_at(Square::E2, None);
/// pos.set_piece_at(Square::E8, Some((Color::White, Piece::Pawn)));
/// assert!(!pos.is_legal());
/// assert!(pos.moves().is_empty());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    turn: Color,
    // one bit per file holding a rook that may still castle
    castling: [u8; Color::COUNT],
    en_passant: Option<File>,
    variant: Variant,

    // derived from the fields above by `refresh`
    kings: [Option<Square>; Color::COUNT],
    legal: bool,
}

/// The two move counting fields of a FEN string.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MoveCounters {
    /// Number of plies since the last capture or pawn move
    pub fifty_move_clock: usize,
    /// Number of the next move, starting at 1 and incremented after each black move
    pub full_move_number: usize,
}

impl Default for MoveCounters {
    fn default() -> Self {
        MoveCounters { fifty_move_clock: 0, full_move_number: 1 }
    }
}

/// Castling bit of the rook on `file`.
fn castle_bit(file: File) -> u8 {
    1 << file as u8
}

/// Number of Chess960 starting positions
pub const CHESS960_POSITIONS: usize = 960;

/// Scharnagl code of the standard starting position among the Chess960 starting positions.
pub const CHESS960_STANDARD: usize = 518;

impl Position {
    /// Returns the standard starting Position.
    pub fn new() -> Position {
        let mut pos = Position::empty(Variant::Regular);
        pos.setup_back_ranks([Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook]);
        pos.refresh();
        pos
    }

    /// Returns a position with an empty board, white to move, for the given variant.
    pub fn empty(variant: Variant) -> Position {
        let mut pos = Position {
            board: Board::empty(),
            turn: White,
            castling: [0; Color::COUNT],
            en_passant: None,
            variant,
            kings: [None; Color::COUNT],
            legal: false,
        };
        pos.refresh();
        pos
    }

    /// Returns the Chess960 starting position with the given Scharnagl code.
    ///
    /// Returns `Err(TryFromIntError)` unless `0 <= code < 960`. Code 518 is the standard
    /// arrangement.
    ///
    /// ```rust
    /// use chessrules::Position;
    ///
    /// let pos = Position::chess960(0)?;
    /// assert_eq!(pos.to_fen_str(), "bbqnnrkr/pppppppp/8/8/8/8/PPPPPPPP/BBQNNRKR w FHfh - 0 1");
    /// # Ok::<(), chessrules::Error>(())
    /// ```
    pub fn chess960(code: usize) -> Result<Position> {
        if code >= CHESS960_POSITIONS {
            return Err(Error::TryFromIntError);
        }

        let mut pos = Position::empty(Variant::Chess960);
        pos.setup_back_ranks(scharnagl_arrangement(code));
        pos.refresh();
        Ok(pos)
    }

    /// Places pawns and the given back rank for both sides, granting castling to every rook.
    fn setup_back_ranks(&mut self, back_rank: [Piece; File::COUNT]) {
        for &c in &[White, Black] {
            let pawn_rank = if c == White { Rank::R2 } else { Rank::R7 };
            for (&file, &p) in File::ALL.iter().zip(back_rank.iter()) {
                self.board.set(offset(Square::from_coord(file, c.first_rank())), Some((c, p)));
                self.board.set(offset(Square::from_coord(file, pawn_rank)), Some((c, Pawn)));
                if p == Rook {
                    self.castling[c as usize] |= castle_bit(file);
                }
            }
        }
    }

    /// Empties the board and switches to `variant`.
    pub fn clear(&mut self, variant: Variant) {
        *self = Position::empty(variant);
    }

    /// Resets to the standard starting position.
    pub fn reset(&mut self) {
        *self = Position::new();
    }

    /// Resets to the Chess960 starting position with the given Scharnagl code. The position is
    /// left unchanged on error.
    pub fn reset_960(&mut self, code: usize) -> Result<()> {
        *self = Position::chess960(code)?;
        Ok(())
    }

    /// Returns the variant the position is played under.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns the color and type of piece, if any, at the given location.
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.board.get(offset(sq))
    }

    /// Puts a piece on `sq`, or empties it.
    pub fn set_piece_at(&mut self, sq: Square, value: Option<(Color, Piece)>) {
        self.board.set(offset(sq), value);
        self.refresh();
    }

    /// Returns the color whose turn it is.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Sets whose turn it is.
    pub fn set_turn(&mut self, c: Color) {
        self.turn = c;
        self.refresh();
    }

    /// Returns `true` if castling to the given side is available for `c`.
    ///
    /// # Panics
    /// Panics for Chess960 positions, where castling rights belong to rook files. Use
    /// [`castling_960`](#method.castling_960) instead.
    pub fn castling(&self, c: Color, side: CastleSide) -> bool {
        if self.variant == Variant::Chess960 {
            illegal_argument("Position::castling()");
        }
        self.castling[c as usize] & castle_bit(standard_rook_file(side)) != 0
    }

    /// Grants or revokes castling to the given side for `c`.
    ///
    /// # Panics
    /// Panics for Chess960 positions. Use [`set_castling_960`](#method.set_castling_960) instead.
    pub fn set_castling(&mut self, c: Color, side: CastleSide, value: bool) {
        if self.variant == Variant::Chess960 {
            illegal_argument("Position::set_castling()");
        }
        self.update_castling(c, standard_rook_file(side), value);
    }

    /// Returns `true` if `c` may castle with the rook which started on `file`.
    ///
    /// # Panics
    /// Panics unless the position is a Chess960 position.
    pub fn castling_960(&self, c: Color, file: File) -> bool {
        if self.variant != Variant::Chess960 {
            illegal_argument("Position::castling_960()");
        }
        self.castling[c as usize] & castle_bit(file) != 0
    }

    /// Grants or revokes castling for `c` with the rook which started on `file`.
    ///
    /// # Panics
    /// Panics unless the position is a Chess960 position.
    pub fn set_castling_960(&mut self, c: Color, file: File, value: bool) {
        if self.variant != Variant::Chess960 {
            illegal_argument("Position::set_castling_960()");
        }
        self.update_castling(c, file, value);
    }

    fn update_castling(&mut self, c: Color, file: File, value: bool) {
        if value {
            self.castling[c as usize] |= castle_bit(file);
        } else {
            self.castling[c as usize] &= !castle_bit(file);
        }
        self.refresh();
    }

    /// Returns the file on which an en passant capture may be available.
    pub fn en_passant(&self) -> Option<File> {
        self.en_passant
    }

    /// Sets or clears the en passant file.
    pub fn set_en_passant(&mut self, file: Option<File>) {
        self.en_passant = file;
        self.refresh();
    }

    /// Returns the en passant target square, if any: the square skipped by the pawn which just
    /// advanced two squares.
    pub fn en_passant_square(&self) -> Option<Square> {
        let rank = match self.turn {
            White => Rank::R6,
            Black => Rank::R3,
        };
        self.en_passant.map(|file| Square::from_coord(file, rank))
    }

    /// Returns the square where the king of the given color is located, or `None` if there is no
    /// such king, or more than one.
    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.kings[c as usize]
    }

    /// Returns `true` if the position is legal:
    ///
    ///  1. Each side has exactly the number of kings the variant requires (one, or none).
    ///  2. The side which is not about to play is not in check.
    ///  3. No pawn stands on the first or the last rank.
    ///  4. Every castling right is backed by a king and a rook on their initial squares.
    ///  5. If an en passant file is set, the pawn which just advanced two squares is there, and
    ///     the two squares it skipped or left are empty.
    pub fn is_legal(&self) -> bool {
        self.legal
    }

    /// Returns `true` if `sq` is attacked by a piece of color `c`, regardless of whose turn it is
    /// and of whether the attacking piece is pinned.
    pub fn square_attacked_by(&self, sq: Square, c: Color) -> bool {
        self.board.is_attacked(offset(sq), c)
    }

    /// Returns the squares of all the pieces of color `c` attacking `sq`.
    pub fn attackers(&self, sq: Square, c: Color) -> Vec<Square> {
        self.board.attackers(offset(sq), c).into_iter().map(to_square).collect()
    }

    /// Returns a multi-line picture of the position, for display in a fixed-width font.
    ///
    /// ```rust
    /// use chessrules::Position;
    ///
    /// let ascii = Position::new().ascii();
    /// assert!(ascii.starts_with("+---+---+"));
    /// assert!(ascii.contains("| r | n | b | q | k | b | n | r |"));
    /// assert!(ascii.ends_with("w KQkq -"));
    /// ```
    pub fn ascii(&self) -> String {
        let separator = "+---".repeat(File::COUNT) + "+\n";
        let mut s = separator.clone();

        for &rank in Rank::ALL.iter().rev() {
            for &file in File::ALL.iter() {
                let c = match self.piece_at(Square::from_coord(file, rank)) {
                    Some((c, p)) => p.fen_char(c),
                    None => ' ',
                };
                s += &format!("| {} ", c);
            }
            s += "|\n";
            s += &separator;
        }

        let en_passant = self.en_passant.map_or("-".to_owned(), |f| f.to_string());
        s + &format!("{} {} {}", self.turn, self.castling_field(), en_passant)
    }
}

/// Rook file of a standard castle.
fn standard_rook_file(side: CastleSide) -> File {
    match side {
        CastleSide::KingSide => File::H,
        CastleSide::QueenSide => File::A,
    }
}

/// Returns the back rank of the Chess960 starting position with the given Scharnagl code.
fn scharnagl_arrangement(code: usize) -> [Piece; File::COUNT] {
    // placements of the two knights among the five squares left after bishops and queen
    const KNIGHTS: [(usize, usize); 10] =
        [(0, 1), (0, 2), (0, 3), (0, 4), (1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)];

    fn place_on_nth_empty(rank: &mut [Option<Piece>; File::COUNT], n: usize, p: Piece) {
        if let Some(slot) = rank.iter_mut().filter(|slot| slot.is_none()).nth(n) {
            *slot = Some(p);
        }
    }

    let mut rank = [None; File::COUNT];
    let mut n = code;

    rank[(n % 4) * 2 + 1] = Some(Bishop);
    n /= 4;
    rank[(n % 4) * 2] = Some(Bishop);
    n /= 4;
    place_on_nth_empty(&mut rank, n % 6, Queen);
    n /= 6;

    let (first, second) = KNIGHTS[n % KNIGHTS.len()];
    place_on_nth_empty(&mut rank, second, Knight);
    place_on_nth_empty(&mut rank, first, Knight);

    for &p in &[Rook, King, Rook] {
        place_on_nth_empty(&mut rank, 0, p);
    }

    let mut back_rank = [Pawn; File::COUNT];
    for (slot, p) in back_rank.iter_mut().zip(rank.iter()) {
        *slot = p.unwrap_or(Pawn);
    }
    back_rank
}

impl Default for Position {
    /// Returns the standard starting Position.
    fn default() -> Self {
        Position::new()
    }
}

impl fmt::Display for Position {
    /// Writes out the position using FEN.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_fen_str().fmt(f)
    }
}

impl fmt::Debug for Position {
    /// Writes out the position using FEN.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.to_fen_str(), self.variant)
    }
}

impl FromStr for Position {
    type Err = Error;

    /// Parse a standard chess position from a FEN string.
    fn from_str(s: &str) -> Result<Self> {
        Position::from_fen_str(s)
    }
}

impl TryFrom<usize> for Position {
    type Error = Error;

    /// Returns the Chess960 starting position with the given Scharnagl code.
    fn try_from(code: usize) -> Result<Self> {
        Position::chess960(code)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
mod legality;
mod movegen;
mod fen;
mod san;
mod uci;
