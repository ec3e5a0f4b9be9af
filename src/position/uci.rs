//! UCI move notation
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use lazy_static::lazy_static;
use regex::Regex;
use super::*;

lazy_static! {
    static ref UCI: Regex = Regex::new(r"^([a-h][1-8])([a-h][1-8])([qrbn])?$").expect("INFALLIBLE");
}

impl Position {
    /// Returns the UCI notation of `mv`: origin, destination, and lowercase promoted piece.
    /// Castling is written as the king's origin followed by the rook's origin (`e1h1`), which
    /// works for Chess960 as well as for regular chess.
    pub fn uci_notation(&self, mv: &MoveDescriptor) -> String {
        let to = if mv.is_castling() { mv.rook_from() } else { mv.to() };
        let mut s = format!("{}{}", mv.from(), to);
        if let Some(prom) = mv.promotion() {
            s.push(Piece::from(prom).fen_char(Color::Black));
        }
        s
    }

    /// Parses a move in UCI notation.
    ///
    /// Castling is expected as king-takes-rook (`e1h1`). The king's destination (`e1g1`) is
    /// accepted too, unless the king could also step there without castling.
    pub fn parse_uci(&self, notation: &str) -> Result<MoveDescriptor> {
        let fail = |reason| self.notation_error(notation, reason);

        let caps = UCI.captures(notation).ok_or_else(|| fail(Reason::InvalidMoveNotationSyntax))?;
        if !self.legal {
            return Err(fail(Reason::IllegalPosition));
        }

        let square = |i: usize| caps.get(i).map(|m| m.as_str().parse::<Square>());
        let (from, to) = match (square(1), square(2)) {
            (Some(Ok(from)), Some(Ok(to))) => (from, to),
            _ => return Err(fail(Reason::InvalidMoveNotationSyntax)),
        };
        let promotion = caps.get(3)
            .and_then(|m| m.as_str().parse::<Piece>().ok())
            .and_then(|p| Promotion::try_from(p).ok());

        match (self.is_move_legal(from, to), promotion) {
            (None, _) => Err(fail(Reason::IllegalMove)),
            (Some(MoveResolver::Regular(mv)), None) => Ok(mv),
            (Some(MoveResolver::Promotion(_)), None) => Err(fail(Reason::MissingPromotion)),
            (Some(resolver @ MoveResolver::Promotion(_)), Some(prom)) => {
                resolver.promote(prom).ok_or_else(|| fail(Reason::IllegalPromotion))
            }
            (Some(MoveResolver::Castle960 { king, .. }), None) => Ok(king),
            (Some(_), Some(_)) => Err(fail(Reason::IllegalPromotion)),
        }
    }

    /// Returns `true` if `notation` has the shape of a UCI move.
    pub(super) fn looks_like_uci(&self, notation: &str) -> bool {
        UCI.is_match(notation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(fen: &str) -> Position {
        fen.parse().expect("valid fen")
    }

    fn reason(pos: &Position, notation: &str) -> Option<Reason> {
        pos.parse_uci(notation).err().and_then(|err| err.reason().cloned())
    }

    #[test]
    fn every_move_round_trips() {
        let pos = parse("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1");
        for mv in pos.moves() {
            assert_eq!(pos.parse_uci(&pos.uci_notation(&mv)), Ok(mv));
        }

        let pos = parse("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
        for mv in pos.moves() {
            assert_eq!(pos.parse_uci(&pos.uci_notation(&mv)), Ok(mv));
        }
    }

    #[test]
    fn castling_is_written_king_takes_rook() {
        let pos = parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let castles: Vec<_> = pos.moves().into_iter()
            .filter(|mv| mv.is_castling())
            .map(|mv| pos.uci_notation(&mv))
            .collect();
        assert_eq!(castles, vec!["e1a1", "e1h1"]);

        let by_destination = pos.parse_uci("e1g1").expect("castling");
        assert_eq!(pos.parse_uci("e1h1"), Ok(by_destination));
    }

    #[test]
    fn chess960_king_step_and_castling() {
        let fen = "4k3/8/8/8/8/8/8/RK6 w A - 0 1";
        let (pos, _) = Position::from_fen(Variant::Chess960, fen, true).expect("valid fen");
        let step = pos.parse_uci("b1c1").expect("king move");
        assert!(!step.is_castling());
        let castle = pos.parse_uci("b1a1").expect("castling");
        assert!(castle.is_castling());
        assert_eq!(castle.to(), Square::C1);
        assert_eq!(pos.uci_notation(&castle), "b1a1");
    }

    #[test]
    fn promotions() {
        let pos = parse("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        let mv = pos.parse_uci("b7b8n").expect("promotion");
        assert_eq!(mv.promotion(), Some(Promotion::ToKnight));
        assert_eq!(pos.uci_notation(&mv), "b7b8n");
        assert_eq!(reason(&pos, "b7b8"), Some(Reason::MissingPromotion));
        assert_eq!(reason(&pos, "e1e2q"), Some(Reason::IllegalPromotion));
    }

    #[test]
    fn errors() {
        let pos = Position::new();
        assert_eq!(reason(&pos, "e2e5"), Some(Reason::IllegalMove));
        assert_eq!(reason(&pos, "e2e4k"), Some(Reason::InvalidMoveNotationSyntax));
        assert_eq!(reason(&pos, "Nf3"), Some(Reason::InvalidMoveNotationSyntax));

        let illegal = parse("4k3/8/8/8/8/8/8/4K2P w - - 0 1");
        assert_eq!(reason(&illegal, "e1e2"), Some(Reason::IllegalPosition));
    }
}
