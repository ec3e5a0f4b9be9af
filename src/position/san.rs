//! Standard algebraic notation (SAN) and figurine notation
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use lazy_static::lazy_static;
use log::debug;
use std::convert::TryFrom;
use regex::{Captures, Regex};
use super::*;

lazy_static! {
    static ref SAN: Regex = Regex::new(concat!(
        r"^(?:(O-O-O|O-O)",
        r"|([KQRBN])([a-h])?([1-8])?(x)?([a-h][1-8])",
        r"|(?:([a-h])(x)?)?([a-h][1-8])(?:(=)?([KQRBNP]))?)",
        r"([+#])?$",
    )).expect("INFALLIBLE");
}

// capture groups of `SAN`
const CASTLE: usize = 1;
const PIECE: usize = 2;
const FROM_FILE: usize = 3;
const FROM_RANK: usize = 4;
const PIECE_CAPTURE: usize = 5;
const PIECE_TO: usize = 6;
const PAWN_FILE: usize = 7;
const PAWN_CAPTURE: usize = 8;
const PAWN_TO: usize = 9;
const PROMOTION_SYMBOL: usize = 10;
const PROMOTED: usize = 11;
const CHECK: usize = 12;

impl Position {
    /// Returns the standard algebraic notation of `mv`, which must be a legal move of this
    /// position: `Nf3`, `exd5`, `Rad1`, `e8=Q+`, `O-O-O#`...
    ///
    /// The origin of a piece move is disambiguated only when needed, preferably by file, then by
    /// rank, then by the whole square.
    pub fn notation(&self, mv: &MoveDescriptor) -> String {
        self.encode(mv, |p| p.to_string())
    }

    /// Same as [`notation`](#method.notation), with pieces written as Unicode figurines of the
    /// color making the move (`♘f3`, `e8=♕`).
    ///
    /// ```rust
    /// use chessrules::Position;
    ///
    /// let pos = Position::new();
    /// let mv = pos.parse_notation("Nf3", true)?;
    /// assert_eq!(pos.figurine_notation(&mv), "\u{2658}f3");
    /// # Ok::<(), chessrules::Error>(())
    /// ```
    pub fn figurine_notation(&self, mv: &MoveDescriptor) -> String {
        let color = mv.color();
        self.encode(mv, |p| p.figurine(color).to_string())
    }

    fn encode(&self, mv: &MoveDescriptor, letter: impl Fn(Piece) -> String) -> String {
        let mut s = match mv.castle_side() {
            Some(CastleSide::KingSide) => "O-O".to_owned(),
            Some(CastleSide::QueenSide) => "O-O-O".to_owned(),
            None if mv.moving_piece() == Pawn => {
                let mut s = String::new();
                if mv.is_capture() {
                    s.push(mv.from().file().to_char());
                    s.push('x');
                }
                s += &mv.to().to_string();
                if let Some(prom) = mv.promotion() {
                    s.push('=');
                    s += &letter(prom.into());
                }
                s
            }
            None => {
                let mut s = letter(mv.moving_piece());
                s += &self.disambiguation(mv);
                if mv.is_capture() {
                    s.push('x');
                }
                s += &mv.to().to_string();
                s
            }
        };
        s += self.check_suffix(mv);
        s
    }

    /// Shortest origin hint telling `mv` apart from other moves of the same kind of piece to the
    /// same square. Empty when there are no such moves.
    fn disambiguation(&self, mv: &MoveDescriptor) -> String {
        let rivals: Vec<Square> = self.moves().into_iter()
            .filter(|other| !other.is_castling() && other.moving_piece() == mv.moving_piece())
            .filter(|other| other.to() == mv.to() && other.from() != mv.from())
            .map(|other| other.from())
            .collect();

        let from = mv.from();
        if rivals.is_empty() {
            String::new()
        } else if rivals.iter().all(|sq| sq.file() != from.file()) {
            from.file().to_string()
        } else if rivals.iter().all(|sq| sq.rank() != from.rank()) {
            from.rank().to_string()
        } else {
            from.to_string()
        }
    }

    /// `#` if `mv` checkmates, `+` if it checks, and nothing otherwise.
    fn check_suffix(&self, mv: &MoveDescriptor) -> &'static str {
        let mut next = self.clone();
        next.play(*mv);
        if next.is_checkmate() {
            "#"
        } else if next.is_check() {
            "+"
        } else {
            ""
        }
    }

    /// Parses a move in standard algebraic notation, or failing that, in UCI notation.
    ///
    /// In strict mode the notation must be exactly what [`notation`](#method.notation) produces.
    /// Otherwise a missing capture symbol, a superfluous disambiguation, a missing `=` and a
    /// missing or wrong check suffix are tolerated.
    ///
    /// ```rust
    /// use chessrules::{Position, Reason};
    ///
    /// let pos: Position = "4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1".parse()?;
    /// let mv = pos.parse_notation("O-O", true)?;
    /// assert_eq!(pos.uci_notation(&mv), "e1h1");
    ///
    /// let err = pos.parse_notation("Rxa8", false).unwrap_err();
    /// assert_eq!(err.reason(), Some(&Reason::InvalidCaptureSymbol));
    /// # Ok::<(), chessrules::Error>(())
    /// ```
    pub fn parse_notation(&self, notation: &str, strict: bool) -> Result<MoveDescriptor> {
        let caps = match SAN.captures(notation) {
            Some(caps) => caps,
            None if self.looks_like_uci(notation) => return self.parse_uci(notation),
            None => return Err(self.notation_error(notation, Reason::InvalidMoveNotationSyntax)),
        };
        if !self.legal {
            return Err(self.notation_error(notation, Reason::IllegalPosition));
        }

        let mv = if let Some(castle) = caps.get(CASTLE) {
            self.parse_castling(castle.as_str() == "O-O")
        } else if caps.get(PIECE).is_some() {
            self.parse_piece_move(&caps, strict)
        } else {
            self.parse_pawn_move(&caps, strict)
        }.map_err(|reason| self.notation_error(notation, reason))?;

        if strict {
            let expected = self.check_suffix(&mv);
            let observed = caps.get(CHECK).map_or("", |m| m.as_str());
            if expected != observed {
                let reason = Reason::WrongCheckSymbol {
                    expected: expected.to_owned(),
                    observed: observed.to_owned(),
                };
                return Err(self.notation_error(notation, reason));
            }
        }
        Ok(mv)
    }

    pub(super) fn notation_error(&self, notation: &str, reason: Reason) -> Error {
        debug!("rejected move \"{}\" in {}: {}", notation, self, reason);
        Error::InvalidNotation { fen: self.to_fen_str(), notation: notation.to_owned(), reason }
    }

    fn parse_castling(&self, king_side: bool) -> std::result::Result<MoveDescriptor, Reason> {
        if !self.variant.has_king(self.turn) {
            return Err(Reason::IllegalNoKingCastling);
        }
        let side = if king_side { CastleSide::KingSide } else { CastleSide::QueenSide };
        self.moves().into_iter()
            .find(|mv| mv.castle_side() == Some(side))
            .ok_or(if king_side {
                Reason::IllegalKingSideCastling
            } else {
                Reason::IllegalQueenSideCastling
            })
    }

    fn parse_piece_move(&self, caps: &Captures<'_>, strict: bool)
            -> std::result::Result<MoveDescriptor, Reason> {
        let syntax = |_| Reason::InvalidMoveNotationSyntax;
        let piece: Piece = group(caps, PIECE).parse().map_err(syntax)?;
        let to: Square = group(caps, PIECE_TO).parse().map_err(syntax)?;
        let from_file = caps.get(FROM_FILE).and_then(|m| m.as_str().chars().next())
            .and_then(File::from_char);
        let from_rank = caps.get(FROM_RANK).and_then(|m| m.as_str().chars().next())
            .and_then(Rank::from_char);

        if let Some((c, _)) = self.piece_at(to) {
            if c == self.turn {
                return Err(Reason::CapturingOwnPiece);
            }
        }

        let candidates: Vec<_> = self.pseudo_legal_to(to, |mv| {
            !mv.is_castling() && mv.moving_piece() == piece
                && from_file.map_or(true, |f| mv.from().file() == f)
                && from_rank.map_or(true, |r| mv.from().rank() == r)
        });
        if candidates.is_empty() {
            return Err(if from_file.is_some() || from_rank.is_some() {
                Reason::NoPieceCanMoveToWithDisambiguation(piece, to)
            } else {
                Reason::NoPieceCanMoveTo(piece, to)
            });
        }

        let legal: Vec<_> = candidates.into_iter()
            .filter(|mv| self.is_king_safe_after(mv))
            .collect();
        let mv = match legal.as_slice() {
            [] => return Err(Reason::KingNotSafe(self.turn)),
            &[mv] => mv,
            _ => return Err(Reason::RequireDisambiguation(piece, to)),
        };

        if strict {
            let expected = self.disambiguation(&mv);
            let observed = format!("{}{}", group(caps, FROM_FILE), group(caps, FROM_RANK));
            if expected != observed {
                return Err(Reason::WrongDisambiguationSymbol { expected, observed });
            }
        }
        check_capture_symbol(&mv, caps.get(PIECE_CAPTURE).is_some(), strict)?;
        Ok(mv)
    }

    fn parse_pawn_move(&self, caps: &Captures<'_>, strict: bool)
            -> std::result::Result<MoveDescriptor, Reason> {
        let to: Square = group(caps, PAWN_TO).parse()
            .map_err(|_| Reason::InvalidMoveNotationSyntax)?;
        let x = caps.get(PAWN_CAPTURE).is_some();
        let mut from_file = caps.get(PAWN_FILE).and_then(|m| m.as_str().chars().next())
            .and_then(File::from_char);

        // a file hint on the destination file is not a capture
        if from_file == Some(to.file()) {
            if x {
                return Err(Reason::InvalidCapturingPawnMove);
            }
            if strict {
                return Err(Reason::WrongDisambiguationSymbol {
                    expected: String::new(),
                    observed: to.file().to_string(),
                });
            }
            from_file = None;
        }

        let capturing = from_file.is_some();
        let origin_file = from_file.unwrap_or_else(|| to.file());
        let candidates: Vec<_> = self.pseudo_legal_to(to, |mv| {
            mv.moving_piece() == Pawn && mv.from().file() == origin_file
        });
        if candidates.is_empty() {
            return Err(if capturing {
                Reason::InvalidCapturingPawnMove
            } else {
                Reason::InvalidNonCapturingPawnMove
            });
        }
        if capturing && !x && strict {
            return Err(Reason::MissingCaptureSymbol);
        }

        let legal: Vec<_> = candidates.into_iter()
            .filter(|mv| self.is_king_safe_after(mv))
            .collect();
        let first = match legal.first() {
            Some(&mv) => mv,
            None => return Err(Reason::KingNotSafe(self.turn)),
        };

        let promoted = caps.get(PROMOTED).and_then(|m| m.as_str().parse::<Piece>().ok());
        if !first.is_promotion() {
            return match promoted {
                Some(_) => Err(Reason::IllegalPromotion),
                None => Ok(first),
            };
        }

        let piece = promoted.ok_or(Reason::MissingPromotion)?;
        let promotion = Promotion::try_from(piece)
            .map_err(|_| Reason::InvalidPromotedPiece(piece))?;
        if strict && caps.get(PROMOTION_SYMBOL).is_none() {
            return Err(Reason::MissingPromotionSymbol);
        }
        legal.into_iter()
            .find(|mv| mv.promotion() == Some(promotion))
            .ok_or(Reason::IllegalPromotion)
    }

    /// Pseudo-legal moves to `to` accepted by `filter`.
    fn pseudo_legal_to(&self, to: Square, filter: impl Fn(&MoveDescriptor) -> bool)
            -> Vec<MoveDescriptor> {
        let mut found = Vec::new();
        self.pseudo_legal_moves(&mut |mv| {
            if mv.to() == to && filter(&mv) {
                found.push(mv);
            }
            false
        });
        found
    }
}

fn group<'t>(caps: &Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map_or("", |m| m.as_str())
}

fn check_capture_symbol(mv: &MoveDescriptor, x: bool, strict: bool)
        -> std::result::Result<(), Reason> {
    match (mv.is_capture(), x) {
        (true, false) if strict => Err(Reason::MissingCaptureSymbol),
        (false, true) => Err(Reason::InvalidCaptureSymbol),
        _ => Ok(()),
    }
}
