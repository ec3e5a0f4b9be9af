//! Error types for the `chessrules` crate
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use super::{Color, Piece, Square};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used by the crate.
///
/// Every variant is recoverable: a failed call never leaves a `Position` partially modified.
/// Calls which violate a documented precondition panic instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cannot parse a basic type (color, piece, file, rank, square or variant) from a string
    ParseError,
    /// Failed to convert an integer to another type
    TryFromIntError,
    /// A FEN string could not be parsed
    InvalidFen {
        /// The offending FEN string
        fen: String,
        /// Why it was rejected
        reason: Reason,
    },
    /// A move notation could not be parsed, or describes an illegal move
    InvalidNotation {
        /// FEN of the position the notation was parsed against
        fen: String,
        /// The offending move notation
        notation: String,
        /// Why it was rejected
        reason: Reason,
    },
}

impl Error {
    /// Returns the reason for an `InvalidFen` or `InvalidNotation` error.
    pub fn reason(&self) -> Option<&Reason> {
        match self {
            Error::InvalidFen { reason, .. } => Some(reason),
            Error::InvalidNotation { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ParseError => "parse error".fmt(f),
            Error::TryFromIntError => "integer out of range".fmt(f),
            Error::InvalidFen { fen, reason } => write!(f, "invalid FEN \"{}\": {}", fen, reason),
            Error::InvalidNotation { fen, notation, reason } => {
                write!(f, "invalid move \"{}\" in position \"{}\": {}", notation, fen, reason)
            }
        }
    }
}

impl std::error::Error for Error { }

/// Result type used by the crate
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Why a FEN string or a move notation was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    /// The FEN string does not have the expected number of fields
    WrongNumberOfFenFields,
    /// The board field does not contain 8 rows
    WrongNumberOfRows,
    /// Unexpected character in the board field
    UnexpectedCharacterInBoard(char),
    /// A row of the board field does not describe exactly 8 squares (rows counted from the top)
    WrongRowLength(usize),
    /// The turn field is neither `w` nor `b`
    InvalidTurnField,
    /// The castling field is malformed
    InvalidCastlingField,
    /// The en passant field is malformed
    InvalidEnPassantField,
    /// The en passant square is not on the rank expected for the side to move
    WrongRankInEnPassantField,
    /// A move counting field is not a non-negative integer
    InvalidMoveCountingField(&'static str),
    /// The move notation does not match any known syntax
    InvalidMoveNotationSyntax,
    /// The position is not legal, so no move can be parsed
    IllegalPosition,
    /// Castling was requested for a side which has no king in this variant
    IllegalNoKingCastling,
    /// Queen-side castling is not legal
    IllegalQueenSideCastling,
    /// King-side castling is not legal
    IllegalKingSideCastling,
    /// No piece of the given type can move to the given square
    NoPieceCanMoveTo(Piece, Square),
    /// No piece of the given type on the specified file/rank can move to the given square
    NoPieceCanMoveToWithDisambiguation(Piece, Square),
    /// More than one piece of the given type can move to the given square
    RequireDisambiguation(Piece, Square),
    /// The disambiguation symbol is not the minimal one
    WrongDisambiguationSymbol {
        /// The minimal disambiguation symbol
        expected: String,
        /// The disambiguation symbol found in the notation
        observed: String,
    },
    /// The destination is occupied by a piece of the side to move
    CapturingOwnPiece,
    /// The pawn capture does not exist
    InvalidCapturingPawnMove,
    /// The pawn advance does not exist
    InvalidNonCapturingPawnMove,
    /// The move would leave the king of the given color in check
    KingNotSafe(Color),
    /// A promotion move is missing its promoted piece
    MissingPromotion,
    /// A promoted piece is not preceded by `=`
    MissingPromotionSymbol,
    /// The piece cannot be chosen as a promoted piece
    InvalidPromotedPiece(Piece),
    /// A promoted piece was specified for a move that is not a promotion
    IllegalPromotion,
    /// A null move cannot be played in this position
    IllegalNullMove,
    /// A capture is missing its `x`
    MissingCaptureSymbol,
    /// The move is marked as a capture but is not one
    InvalidCaptureSymbol,
    /// The check or checkmate suffix does not match the move
    WrongCheckSymbol {
        /// The suffix the move should have
        expected: String,
        /// The suffix found in the notation
        observed: String,
    },
    /// The move is not legal in this position
    IllegalMove,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Reason::*;

        match self {
            WrongNumberOfFenFields => "incorrect number of fields in the FEN string".fmt(f),
            WrongNumberOfRows => "the board field of the FEN string does not have 8 rows".fmt(f),
            UnexpectedCharacterInBoard(c) => {
                write!(f, "unexpected character '{}' in the board field of the FEN string", c)
            }
            WrongRowLength(row) => {
                write!(f, "row {} of the board field of the FEN string is not 8 squares long", row)
            }
            InvalidTurnField => "invalid turn field in the FEN string".fmt(f),
            InvalidCastlingField => "invalid castling field in the FEN string".fmt(f),
            InvalidEnPassantField => "invalid en passant field in the FEN string".fmt(f),
            WrongRankInEnPassantField => {
                "wrong rank for the en passant square in the FEN string".fmt(f)
            }
            InvalidMoveCountingField(field) => {
                write!(f, "the {} field of the FEN string must be a non-negative integer", field)
            }
            InvalidMoveNotationSyntax => "the syntax of the move notation is invalid".fmt(f),
            IllegalPosition => "the position is not legal".fmt(f),
            IllegalNoKingCastling => "castling is not allowed for a side without a king".fmt(f),
            IllegalQueenSideCastling => "queen-side castling is not legal".fmt(f),
            IllegalKingSideCastling => "king-side castling is not legal".fmt(f),
            NoPieceCanMoveTo(piece, sq) => write!(f, "no {} can move to {}", piece, sq),
            NoPieceCanMoveToWithDisambiguation(piece, sq) => {
                write!(f, "no {} on the specified file or rank can move to {}", piece, sq)
            }
            RequireDisambiguation(piece, sq) => {
                write!(f, "cannot determine uniquely which {} is moving to {}", piece, sq)
            }
            WrongDisambiguationSymbol { expected, observed } => {
                write!(f, "wrong disambiguation symbol (expected `{}`, found `{}`)",
                       expected, observed)
            }
            CapturingOwnPiece => "a piece cannot capture a piece of its own color".fmt(f),
            InvalidCapturingPawnMove => "invalid capturing pawn move".fmt(f),
            InvalidNonCapturingPawnMove => "invalid non-capturing pawn move".fmt(f),
            KingNotSafe(Color::White) => "the move would leave the white king in check".fmt(f),
            KingNotSafe(Color::Black) => "the move would leave the black king in check".fmt(f),
            MissingPromotion => "a promoted piece must be specified for this move".fmt(f),
            MissingPromotionSymbol => "`=` is required before the promoted piece".fmt(f),
            InvalidPromotedPiece(piece) => {
                write!(f, "{} cannot be chosen as a promoted piece", piece)
            }
            IllegalPromotion => "a promoted piece cannot be specified for this move".fmt(f),
            IllegalNullMove => "a null move cannot be played in this position".fmt(f),
            MissingCaptureSymbol => "capture symbol `x` is missing".fmt(f),
            InvalidCaptureSymbol => "the move is not a capture".fmt(f),
            WrongCheckSymbol { expected, observed } => {
                write!(f, "wrong check or checkmate symbol (expected `{}`, found `{}`)",
                       expected, observed)
            }
            IllegalMove => "the move is not legal".fmt(f),
        }
    }
}

/// Aborts a call that violated a documented precondition.
#[cold]
pub(crate) fn illegal_argument(function: &str) -> ! {
    panic!("illegal argument in {}", function)
}
