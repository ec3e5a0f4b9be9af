//! Legality of a position, and king safety after a move
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

impl Position {
    /// Recomputes the king squares and the legality flag. Called once at the end of every
    /// method that changes the position.
    pub(super) fn refresh(&mut self) {
        self.kings = [self.locate_king(White), self.locate_king(Black)];
        self.legal = self.king_counts_are_valid()
            && !self.opponent_in_check()
            && !self.pawns_on_back_ranks()
            && self.castling_is_consistent(White)
            && self.castling_is_consistent(Black)
            && self.en_passant_is_consistent();
    }

    /// Square of the only king of color `c`, if there is exactly one.
    fn locate_king(&self, c: Color) -> Option<Square> {
        let mut kings = self.board.pieces().filter(|&(_, pc, p)| pc == c && p == King);
        match (kings.next(), kings.next()) {
            (Some((off, _, _)), None) => Some(to_square(off)),
            _ => None,
        }
    }

    // 1. exactly one king for each side that needs one, none for the others
    fn king_counts_are_valid(&self) -> bool {
        [White, Black].iter().all(|&c| {
            let count = self.board.pieces().filter(|&(_, pc, p)| pc == c && p == King).count();
            count == if self.variant.has_king(c) { 1 } else { 0 }
        })
    }

    // 2. the side which just moved cannot be in check
    fn opponent_in_check(&self) -> bool {
        match self.kings[(!self.turn) as usize] {
            Some(king) => self.board.is_attacked(offset(king), self.turn),
            None => false,
        }
    }

    // 3. pawns never stand on the first or last rank
    fn pawns_on_back_ranks(&self) -> bool {
        self.board.pieces().any(|(off, _, p)| {
            p == Pawn && match rank_of(off) {
                Some(Rank::R1) | Some(Rank::R8) => true,
                _ => false,
            }
        })
    }

    // 4. castling rights need the king and rooks on their initial squares
    fn castling_is_consistent(&self, c: Color) -> bool {
        let flags = self.castling[c as usize];
        if flags == 0 {
            return true;
        }

        let king = match self.kings[c as usize] {
            Some(king) if king.rank() == c.first_rank() => king,
            _ => return false,
        };
        if self.variant != Variant::Chess960 && king.file() != File::E {
            return false;
        }

        let mut per_side = [0; 2];
        for &file in File::ALL.iter() {
            if flags & castle_bit(file) == 0 {
                continue;
            }
            if self.piece_at(Square::from_coord(file, c.first_rank())) != Some((c, Rook)) {
                return false;
            }
            // a single rook on each side of the king
            per_side[(file > king.file()) as usize] += 1;
        }

        per_side.iter().all(|&n| n <= 1)
    }

    // 5. an en passant file needs the pawn which just advanced two squares
    fn en_passant_is_consistent(&self) -> bool {
        let file = match self.en_passant {
            Some(file) => file,
            None => return true,
        };

        let (skipped, origin, pawn) = match self.turn {
            White => (Rank::R6, Rank::R7, Rank::R5),
            Black => (Rank::R3, Rank::R2, Rank::R4),
        };

        self.piece_at(Square::from_coord(file, skipped)).is_none()
            && self.piece_at(Square::from_coord(file, origin)).is_none()
            && self.piece_at(Square::from_coord(file, pawn)) == Some((!self.turn, Pawn))
    }

    /// Returns `true` if the side making `mv` does not leave its king attacked. The move is
    /// played on a copy of the board; the position itself is not modified.
    pub(super) fn is_king_safe_after(&self, mv: &MoveDescriptor) -> bool {
        let us = mv.color();
        let king = if mv.moving_piece() == King {
            Some(mv.to())
        } else {
            self.kings[us as usize]
        };

        match king {
            Some(king) => {
                let mut board = self.board;
                movegen::apply(&mut board, mv);
                !board.is_attacked(offset(king), !us)
            }
            None => true,
        }
    }

    /// Returns `true` if the player about to play is in check. Always `false` for illegal
    /// positions.
    pub fn is_check(&self) -> bool {
        self.legal && match self.kings[self.turn as usize] {
            Some(king) => self.board.is_attacked(offset(king), !self.turn),
            None => false,
        }
    }

    /// Returns `true` if the player about to play is checkmated. Always `false` for illegal
    /// positions.
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_move()
    }

    /// Returns `true` if the player about to play is stalemated. Always `false` for illegal
    /// positions.
    pub fn is_stalemate(&self) -> bool {
        self.legal && !self.is_check() && !self.has_move()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(fen: &str) -> Position {
        fen.parse().expect("valid fen")
    }

    // 1. missing or extra kings
    #[test]
    fn king_count_rules() {
        assert!(!parse("8/8/8/8/8/8/8/4K3 w - - 0 1").is_legal());
        assert!(!parse("4k3/8/8/8/8/8/8/3KK3 w - - 0 1").is_legal());
        assert!(parse("4k3/8/8/8/8/8/8/4K3 w - - 0 1").is_legal());

        let fen = "4k3/8/8/8/8/8/8/8 w - - 0 1";
        let (pos, _) = Position::from_fen(Variant::BlackKingOnly, fen, true).expect("valid fen");
        assert!(pos.is_legal());
        assert_eq!(pos.king_square(White), None);
    }

    // 2. the side not to move must not be in check
    #[test]
    fn side_not_to_move_in_check_is_illegal() {
        assert!(parse("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").is_legal());
        assert!(!parse("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1").is_legal());
        assert!(parse("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").is_legal());
    }

    // 3. pawns on the back ranks
    #[test]
    fn pawns_on_back_ranks_are_illegal() {
        assert!(!parse("4k2P/8/8/8/8/8/8/4K3 w - - 0 1").is_legal());
        assert!(!parse("4k3/8/8/8/8/8/8/p3K3 w - - 0 1").is_legal());
    }

    // 4. castling flags need a king and rook on their initial squares
    #[test]
    fn castling_rights_need_king_and_rook() {
        assert!(parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").is_legal());
        assert!(!parse("r3k2r/8/8/8/8/8/8/R3K1R1 w KQkq - 0 1").is_legal());
        assert!(!parse("r3k2r/8/8/8/8/8/8/R4K1R w KQkq - 0 1").is_legal());
    }

    #[test]
    fn chess960_castling_allows_one_rook_per_side() {
        let fen = "4k3/8/8/8/8/8/8/RR2K3 w AB - 0 1";
        let (pos, _) = Position::from_fen(Variant::Chess960, fen, false).expect("valid fen");
        assert!(!pos.is_legal());

        let fen = "4k3/8/8/8/8/8/8/1R2K1R1 w BG - 0 1";
        let (pos, _) = Position::from_fen(Variant::Chess960, fen, false).expect("valid fen");
        assert!(pos.is_legal());
    }

    // 5. en passant flag needs the pawn which just advanced
    #[test]
    fn en_passant_flag_consistency() {
        assert!(parse("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 1").is_legal());
        assert!(!parse("4k3/8/8/3P4/8/8/8/4K3 w - e6 0 1").is_legal());
        assert!(!parse("4k3/4n3/8/3Pp3/8/8/8/4K3 w - e6 0 1").is_legal());
        assert!(parse("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").is_legal());
    }

    #[test]
    fn king_safety_is_checked_on_a_copy() {
        // the knight on d2 is pinned by the bishop on b4
        let pos = parse("4k3/8/8/8/1b6/8/3N4/4K3 w - - 0 1");
        let before = pos.clone();
        let knight_moves: Vec<_> = pos.moves().into_iter()
            .filter(|mv| mv.moving_piece() == Knight)
            .collect();
        assert!(knight_moves.is_empty());
        assert_eq!(pos, before);
    }

    #[test]
    fn checkmate_and_stalemate() {
        let mate = parse("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(mate.is_check());
        assert!(mate.is_checkmate());
        assert!(!mate.is_stalemate());
        assert!(!mate.has_move());

        let stalemate = parse("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!stalemate.is_check());
        assert!(stalemate.is_stalemate());
        assert!(!stalemate.is_checkmate());

        let illegal = parse("7k/8/8/8/8/8/8/8 b - - 0 1");
        assert!(!illegal.is_check());
        assert!(!illegal.is_checkmate());
        assert!(!illegal.is_stalemate());
        assert!(!illegal.has_move());
    }
}
