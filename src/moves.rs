//! Contains structures to represent legal moves
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
use error::illegal_argument;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which piece to promote to for a promotion move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Promotion {
    ToKnight = 1,
    ToBishop = 2,
    ToRook = 3,
    ToQueen = 4,
}

use Promotion::*;

impl Promotion {
    /// All promotions, in the order the move generator produces them.
    pub const ALL: [Promotion; 4] = [ToQueen, ToRook, ToBishop, ToKnight];
}

impl Default for Promotion {
    fn default() -> Self {
        ToQueen
    }
}

impl From<Promotion> for Piece {
    fn from(prom: Promotion) -> Self {
        match prom {
            ToKnight => Piece::Knight,
            ToBishop => Piece::Bishop,
            ToRook => Piece::Rook,
            ToQueen => Piece::Queen,
        }
    }
}

impl TryFrom<Piece> for Promotion {
    type Error = Error;

    fn try_from(piece: Piece) -> Result<Self> {
        match piece {
            Piece::Knight => Ok(ToKnight),
            Piece::Bishop => Ok(ToBishop),
            Piece::Rook => Ok(ToRook),
            Piece::Queen => Ok(ToQueen),
            _ => Err(Error::ParseError),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// What distinguishes one kind of move from another, along with the data specific to that kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// A move that is not castling, en passant, or a promotion. Includes ordinary captures.
    Regular {
        /// The moving piece
        piece: Piece,
        /// The piece standing on the destination, if any
        captured: Option<Piece>,
    },
    /// Castling. The descriptor's origin and destination are those of the king.
    Castling {
        /// Origin of the rook
        rook_from: Square,
        /// Destination of the rook
        rook_to: Square,
    },
    /// An en passant capture.
    EnPassant {
        /// Square of the captured pawn, which differs from the destination
        captured_square: Square,
    },
    /// A pawn promotion.
    Promotion {
        /// The piece the pawn becomes
        promotion: Promotion,
        /// The piece standing on the destination, if any
        captured: Option<Piece>,
    },
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A legal move, fully resolved against the position that produced it.
///
/// Descriptors are only created by a [`Position`](struct.Position.html) (through `moves`,
/// `is_move_legal`, or notation parsing). A descriptor is meaningful only for the exact position
/// that produced it: passing it to `play` on any other position is a logic error whose result is
/// unspecified.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MoveDescriptor {
    from: Square,
    to: Square,
    color: Color,
    kind: MoveKind,
}

impl MoveDescriptor {
    pub(crate) fn new(from: Square, to: Square, color: Color, kind: MoveKind) -> Self {
        MoveDescriptor { from, to, color, kind }
    }

    /// Returns the origin of the moving piece (the king, for castling).
    pub fn from(&self) -> Square {
        self.from
    }

    /// Returns the destination of the moving piece (the king, for castling).
    pub fn to(&self) -> Square {
        self.to
    }

    /// Returns the color of the side making the move.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the kind of move along with its kind-specific data.
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Returns the type of the moving piece.
    pub fn moving_piece(&self) -> Piece {
        match self.kind {
            MoveKind::Regular { piece, .. } => piece,
            MoveKind::Castling { .. } => Piece::King,
            MoveKind::EnPassant { .. } | MoveKind::Promotion { .. } => Piece::Pawn,
        }
    }

    /// Returns the type of the piece standing on the destination once the move is played.
    pub fn final_piece(&self) -> Piece {
        match self.kind {
            MoveKind::Promotion { promotion, .. } => promotion.into(),
            _ => self.moving_piece(),
        }
    }

    /// Returns the captured piece, if any.
    pub fn captured_piece(&self) -> Option<Piece> {
        match self.kind {
            MoveKind::Regular { captured, .. } | MoveKind::Promotion { captured, .. } => captured,
            MoveKind::EnPassant { .. } => Some(Piece::Pawn),
            MoveKind::Castling { .. } => None,
        }
    }

    /// Returns `true` if the move is a capture.
    pub fn is_capture(&self) -> bool {
        self.captured_piece().is_some()
    }

    /// Returns `true` if the move is castling.
    pub fn is_castling(&self) -> bool {
        if let MoveKind::Castling { .. } = self.kind { true } else { false }
    }

    /// Returns `true` if the move is an en passant capture.
    pub fn is_en_passant(&self) -> bool {
        if let MoveKind::EnPassant { .. } = self.kind { true } else { false }
    }

    /// Returns `true` if the move is a promotion.
    pub fn is_promotion(&self) -> bool {
        if let MoveKind::Promotion { .. } = self.kind { true } else { false }
    }

    /// Returns the promotion, if any.
    pub fn promotion(&self) -> Option<Promotion> {
        if let MoveKind::Promotion { promotion, .. } = self.kind {
            Some(promotion)
        } else {
            None
        }
    }

    /// Returns the origin of the castling rook.
    ///
    /// # Panics
    /// Panics if the move is not castling.
    pub fn rook_from(&self) -> Square {
        match self.kind {
            MoveKind::Castling { rook_from, .. } => rook_from,
            _ => illegal_argument("MoveDescriptor::rook_from()"),
        }
    }

    /// Returns the destination of the castling rook.
    ///
    /// # Panics
    /// Panics if the move is not castling.
    pub fn rook_to(&self) -> Square {
        match self.kind {
            MoveKind::Castling { rook_to, .. } => rook_to,
            _ => illegal_argument("MoveDescriptor::rook_to()"),
        }
    }

    /// Returns the square of the pawn captured en passant.
    ///
    /// # Panics
    /// Panics if the move is not an en passant capture.
    pub fn en_passant_square(&self) -> Square {
        match self.kind {
            MoveKind::EnPassant { captured_square } => captured_square,
            _ => illegal_argument("MoveDescriptor::en_passant_square()"),
        }
    }

    /// Returns the side castling goes to, if the move is castling.
    pub fn castle_side(&self) -> Option<CastleSide> {
        match self.kind {
            MoveKind::Castling { rook_from, .. } if rook_from.file() > self.from.file() => {
                Some(CastleSide::KingSide)
            }
            MoveKind::Castling { .. } => Some(CastleSide::QueenSide),
            _ => None,
        }
    }
}

impl fmt::Display for MoveDescriptor {
    /// Writes the origin and the destination, followed by the promoted piece or by `O` for
    /// castling (eg `g1f3`, `e7e8Q`, `e1g1O`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.kind {
            MoveKind::Promotion { promotion, .. } => Piece::from(promotion).to_string(),
            MoveKind::Castling { .. } => "O".to_owned(),
            _ => String::new(),
        };
        format!("{}{}{}", self.from, self.to, suffix).fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result of [`Position::is_move_legal`](struct.Position.html#method.is_move_legal) when an
/// origin and a destination describe at least one legal move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveResolver {
    /// Exactly one move goes from the origin to the destination.
    Regular(MoveDescriptor),
    /// A pawn promotes on the destination: one descriptor per promoted piece, in
    /// `Promotion::ALL` order. Use [`promote`](#method.promote) to choose.
    Promotion([MoveDescriptor; 4]),
    /// Chess960 only: the king may either castle or step to the destination.
    Castle960 {
        /// The castling move
        castle: MoveDescriptor,
        /// The plain king move
        king: MoveDescriptor,
    },
}

impl MoveResolver {
    /// Returns the descriptor of a `Regular` resolver.
    pub fn regular(&self) -> Option<MoveDescriptor> {
        match *self {
            MoveResolver::Regular(mv) => Some(mv),
            _ => None,
        }
    }

    /// Returns the descriptor promoting to `prom`, if this is a `Promotion` resolver.
    pub fn promote(&self, prom: Promotion) -> Option<MoveDescriptor> {
        match self {
            MoveResolver::Promotion(moves) => {
                moves.iter().find(|mv| mv.promotion() == Some(prom)).copied()
            }
            _ => None,
        }
    }

    /// Returns the castling move, if this is a `Castle960` resolver.
    pub fn castle(&self) -> Option<MoveDescriptor> {
        match *self {
            MoveResolver::Castle960 { castle, .. } => Some(castle),
            _ => None,
        }
    }

    /// Returns the plain king move, if this is a `Castle960` resolver.
    pub fn king(&self) -> Option<MoveDescriptor> {
        match *self {
            MoveResolver::Castle960 { king, .. } => Some(king),
            _ => None,
        }
    }
}
