//! Board addressing and attack detection.
//!
//! Squares are stored in a padded 16x8 "0x88" layout: offset = rank * 16 + file. The right half of
//! every row is unused, so any offset reached by stepping off the board, in any direction and from
//! any square, has bit `0x08` or bit `0x80` set. A ray scan therefore only needs one bitwise test
//! per step, with no file or rank bookkeeping.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

/// Index into the padded board. Signed so that stepping below `a1` stays representable.
pub(crate) type Offset = i32;

/// Number of entries in the padded board.
pub(crate) const BOARD_SIZE: usize = 128;

const OFF_BOARD: Offset = 0x88;

/// Returns `true` if `off` designates one of the 64 real squares.
#[inline]
pub(crate) fn on_board(off: Offset) -> bool {
    off & OFF_BOARD == 0
}

/// Converts a square to its padded offset.
#[inline]
pub(crate) fn offset(sq: Square) -> Offset {
    (sq.rank() as Offset) * 16 + sq.file() as Offset
}

/// Converts a padded offset back to a square, or `None` if it is off the board.
#[inline]
pub(crate) fn square(off: Offset) -> Option<Square> {
    if on_board(off) {
        Some(to_square(off))
    } else {
        None
    }
}

/// Converts a padded offset which is known to be on the board back to a square.
#[inline]
pub(crate) fn to_square(off: Offset) -> Square {
    Square::ALL[(((off >> 4) << 3) | (off & 7)) as usize]
}

/// File of a padded offset, or `None` if it is off the board.
#[inline]
pub(crate) fn file_of(off: Offset) -> Option<File> {
    square(off).map(Square::file)
}

/// Rank of a padded offset, or `None` if it is off the board.
#[inline]
pub(crate) fn rank_of(off: Offset) -> Option<Rank> {
    square(off).map(Square::rank)
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Direction tables, shared by the attack detector and the move generator.

/// One step toward the 8th rank (`+16`) or toward the 1st rank (`-16`).
pub(crate) const NORTH: Offset = 16;

const DIAGONAL: [Offset; 4] = [-17, -15, 15, 17];
const ORTHOGONAL: [Offset; 4] = [-16, -1, 1, 16];
const ALL_DIRECTIONS: [Offset; 8] = [-17, -16, -15, -1, 1, 15, 16, 17];
const KNIGHT_JUMPS: [Offset; 8] = [-33, -31, -18, -14, 14, 18, 31, 33];
const WHITE_PAWN_CAPTURES: [Offset; 2] = [15, 17];
const BLACK_PAWN_CAPTURES: [Offset; 2] = [-17, -15];

/// Direction vectors for a piece other than a pawn.
pub(crate) fn directions(p: Piece) -> &'static [Offset] {
    match p {
        Piece::Knight => &KNIGHT_JUMPS,
        Piece::Bishop => &DIAGONAL,
        Piece::Rook => &ORTHOGONAL,
        Piece::Queen | Piece::King => &ALL_DIRECTIONS,
        Piece::Pawn => &[],
    }
}

/// Returns `true` if the piece moves along rays rather than by single steps.
pub(crate) fn is_slider(p: Piece) -> bool {
    match p {
        Piece::Bishop | Piece::Rook | Piece::Queen => true,
        _ => false,
    }
}

/// Diagonal-forward capture vectors of a pawn of color `c`.
pub(crate) fn pawn_captures(c: Color) -> &'static [Offset] {
    match c {
        Color::White => &WHITE_PAWN_CAPTURES,
        Color::Black => &BLACK_PAWN_CAPTURES,
    }
}

/// Forward step of a pawn of color `c`.
pub(crate) fn pawn_forward(c: Color) -> Offset {
    match c {
        Color::White => NORTH,
        Color::Black => -NORTH,
    }
}

/// Returns `true` if a slider of type `p` moves along direction `dir`.
fn slides_along(p: Piece, dir: Offset) -> bool {
    let straight = dir == 1 || dir == -1 || dir == 16 || dir == -16;
    match p {
        Piece::Queen => true,
        Piece::Rook => straight,
        Piece::Bishop => !straight,
        _ => false,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Contents of the 64 squares, stored in the padded layout.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) struct Board([Option<(Color, Piece)>; BOARD_SIZE]);

impl Board {
    /// An empty board.
    pub fn empty() -> Board {
        Board([None; BOARD_SIZE])
    }

    /// Returns the piece at `off`, which must be on the board.
    #[inline]
    pub fn get(&self, off: Offset) -> Option<(Color, Piece)> {
        self.0[off as usize]
    }

    /// Places `value` at `off`, which must be on the board.
    #[inline]
    pub fn set(&mut self, off: Offset, value: Option<(Color, Piece)>) {
        self.0[off as usize] = value;
    }

    /// Returns `true` if `off` is empty.
    #[inline]
    pub fn is_empty(&self, off: Offset) -> bool {
        self.0[off as usize].is_none()
    }

    /// Iterates over the occupied squares in `a1, b1, ..., h8` order.
    pub fn pieces(&self) -> impl Iterator<Item = (Offset, Color, Piece)> + '_ {
        Square::ALL.iter().filter_map(move |&sq| {
            let off = offset(sq);
            self.get(off).map(|(c, p)| (off, c, p))
        })
    }

    /// Returns `true` if `target` is attacked by a piece of color `by`.
    pub fn is_attacked(&self, target: Offset, by: Color) -> bool {
        self.scan_attackers(target, by, |_| true)
    }

    /// Returns the offsets of every piece of color `by` attacking `target`.
    pub fn attackers(&self, target: Offset, by: Color) -> Vec<Offset> {
        let mut found = Vec::new();
        self.scan_attackers(target, by, |off| {
            found.push(off);
            false
        });
        found
    }

    /// Calls `visit` with every attacker of `target`, stopping as soon as `visit` returns `true`.
    /// Returns `true` if it was stopped.
    fn scan_attackers<F>(&self, target: Offset, by: Color, mut visit: F) -> bool
        where F: FnMut(Offset) -> bool
    {
        for &dir in pawn_captures(by) {
            let from = target - dir;
            if on_board(from) && self.get(from) == Some((by, Piece::Pawn)) && visit(from) {
                return true;
            }
        }

        for &p in &[Piece::Knight, Piece::King] {
            for &dir in directions(p) {
                let from = target + dir;
                if on_board(from) && self.get(from) == Some((by, p)) && visit(from) {
                    return true;
                }
            }
        }

        for &dir in &ALL_DIRECTIONS {
            let mut from = target + dir;
            while on_board(from) {
                if let Some((c, p)) = self.get(from) {
                    if c == by && slides_along(p, dir) && visit(from) {
                        return true;
                    }
                    break;
                }
                from += dir;
            }
        }

        false
    }
}
