//! Move generation and move application
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use log::trace;
use super::*;

/// Receives generated moves. Returning `true` stops the generation.
pub(super) type MoveSink<'a> = dyn FnMut(MoveDescriptor) -> bool + 'a;

/// Moves the pieces of `mv` on `board`, including the captured pawn of an en passant capture and
/// the rook of a castling move. Castling and en passant rights are not touched.
pub(super) fn apply(board: &mut Board, mv: &MoveDescriptor) {
    let us = mv.color();
    let from = offset(mv.from());
    let to = offset(mv.to());

    match mv.kind() {
        MoveKind::Regular { piece, .. } => {
            board.set(from, None);
            board.set(to, Some((us, piece)));
        }
        MoveKind::Promotion { promotion, .. } => {
            board.set(from, None);
            board.set(to, Some((us, promotion.into())));
        }
        MoveKind::EnPassant { captured_square } => {
            board.set(from, None);
            board.set(offset(captured_square), None);
            board.set(to, Some((us, Pawn)));
        }
        MoveKind::Castling { rook_from, rook_to } => {
            // clear both origins first: in Chess960 a destination may be the other piece's origin
            board.set(from, None);
            board.set(offset(rook_from), None);
            board.set(to, Some((us, King)));
            board.set(offset(rook_to), Some((us, Rook)));
        }
    }
}

impl Position {
    /// Returns all legal moves, in a fixed order: pieces are visited from `a1` to `h8`, and the
    /// order does not change as long as the position does not.
    ///
    /// Returns an empty list if the position is not legal.
    pub fn moves(&self) -> Vec<MoveDescriptor> {
        let mut moves = Vec::new();
        self.legal_moves(&mut |mv| {
            moves.push(mv);
            false
        });
        moves
    }

    /// Returns `true` if at least one legal move exists. Always `false` for illegal positions.
    pub fn has_move(&self) -> bool {
        self.legal_moves(&mut |_| true)
    }

    /// Checks whether moving from `from` to `to` is legal.
    ///
    /// Castling may be given either with the king's destination or with the castling rook's
    /// origin (king-takes-rook). Returns `None` if no legal move matches, or if the position is
    /// not legal.
    ///
    /// ```rust
    /// use chessrules::{Position, Square, Promotion, MoveResolver};
    ///
    /// let pos: Position = "4k3/1P6/8/8/8/8/8/4K3 w - - 0 1".parse()?;
    /// match pos.is_move_legal(Square::B7, Square::B8) {
    ///     Some(resolver @ MoveResolver::Promotion(_)) => {
    ///         let mv = resolver.promote(Promotion::ToKnight).expect("legal promotion");
    ///         assert_eq!(pos.notation(&mv), "b8=N");
    ///     }
    ///     _ => panic!("b7-b8 is a promotion"),
    /// }
    /// assert_eq!(pos.is_move_legal(Square::B7, Square::C8), None);
    /// # Ok::<(), chessrules::Error>(())
    /// ```
    pub fn is_move_legal(&self, from: Square, to: Square) -> Option<MoveResolver> {
        let candidates: Vec<_> = self.moves().into_iter()
            .filter(|mv| mv.from() == from)
            .filter(|mv| mv.to() == to || (mv.is_castling() && mv.rook_from() == to))
            .collect();

        match candidates.as_slice() {
            [] => None,
            &[mv] => Some(MoveResolver::Regular(mv)),
            &[a, b, c, d] if a.is_promotion() => Some(MoveResolver::Promotion([a, b, c, d])),
            many => {
                let castles: Vec<_> = many.iter().filter(|mv| mv.is_castling()).collect();
                let king = many.iter().find(|mv| !mv.is_castling());
                match (castles.as_slice(), king) {
                    (&[castle], Some(&king)) => {
                        Some(MoveResolver::Castle960 { castle: *castle, king })
                    }
                    // two castles share the square: the rook's origin names the intended one
                    _ => castles.iter()
                        .find(|mv| mv.rook_from() == to)
                        .map(|mv| MoveResolver::Regular(**mv)),
                }
            }
        }
    }

    /// Plays a move.
    ///
    /// `mv` must come from this very position (through [`moves`](#method.moves),
    /// [`is_move_legal`](#method.is_move_legal) or [`parse_notation`](#method.parse_notation)).
    /// Playing a descriptor produced by any other position leaves this position in an
    /// unspecified state.
    pub fn play(&mut self, mv: MoveDescriptor) {
        let us = mv.color();
        apply(&mut self.board, &mv);

        if mv.moving_piece() == King {
            self.castling[us as usize] = 0;
        }
        // a rook leaving its initial square, or captured on it
        self.revoke_castling_at(mv.from());
        self.revoke_castling_at(mv.to());

        let double_step = mv.moving_piece() == Pawn && match mv.kind() {
            MoveKind::Regular { .. } => {
                (mv.to().rank() as i32 - mv.from().rank() as i32).abs() == 2
            }
            _ => false,
        };
        self.en_passant = if double_step { Some(mv.from().file()) } else { None };

        self.turn = !us;
        self.refresh();
    }

    /// Parses `notation` (SAN, leniently, or UCI) and plays it. `--` plays a null move.
    ///
    /// Returns `false`, leaving the position untouched, if the notation cannot be parsed or the
    /// move is not legal.
    pub fn play_notation(&mut self, notation: &str) -> bool {
        if notation == "--" {
            return self.play_null_move();
        }
        match self.parse_notation(notation, false) {
            Ok(mv) => {
                self.play(mv);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns `true` if a null move may be played: the position is legal and the player about to
    /// play is not in check.
    pub fn is_null_move_legal(&self) -> bool {
        self.legal && !self.is_check()
    }

    /// Passes the turn without moving, if [`is_null_move_legal`](#method.is_null_move_legal).
    /// Returns `true` if the null move was played.
    pub fn play_null_move(&mut self) -> bool {
        if !self.is_null_move_legal() {
            trace!("null move rejected in {}", self);
            return false;
        }
        self.turn = !self.turn;
        self.en_passant = None;
        self.refresh();
        true
    }

    fn revoke_castling_at(&mut self, sq: Square) {
        for &c in &[White, Black] {
            if sq.rank() == c.first_rank() {
                self.castling[c as usize] &= !castle_bit(sq.file());
            }
        }
    }

    /// Sends every legal move to `sink`. Returns `true` if the sink stopped the generation.
    pub(super) fn legal_moves(&self, sink: &mut MoveSink<'_>) -> bool {
        if !self.legal {
            return false;
        }
        self.pseudo_legal_moves(&mut |mv| self.is_king_safe_after(&mv) && sink(mv))
    }

    /// Sends every pseudo-legal move to `sink`: moves which follow the movement rules but may leave
    /// the king in check. Castling moves already have their path checked for attacks. Returns
    /// `true` if the sink stopped the generation.
    pub(super) fn pseudo_legal_moves(&self, sink: &mut MoveSink<'_>) -> bool {
        let us = self.turn;
        for (from, c, p) in self.board.pieces() {
            if c != us {
                continue;
            }
            let stop = match p {
                Pawn => self.pawn_moves(from, sink),
                _ => self.piece_moves(from, p, sink),
            };
            if stop || (p == King && self.castling_moves(from, sink)) {
                return true;
            }
        }
        false
    }

    fn piece_moves(&self, from: Offset, p: Piece, sink: &mut MoveSink<'_>) -> bool {
        let us = self.turn;
        for &dir in directions(p) {
            let mut to = from + dir;
            while on_board(to) {
                let target = self.board.get(to);
                if let Some((c, _)) = target {
                    if c == us {
                        break;
                    }
                }

                let captured = target.map(|(_, captured)| captured);
                let kind = MoveKind::Regular { piece: p, captured };
                if sink(MoveDescriptor::new(to_square(from), to_square(to), us, kind)) {
                    return true;
                }

                if captured.is_some() || !is_slider(p) {
                    break;
                }
                to += dir;
            }
        }
        false
    }

    fn pawn_moves(&self, from: Offset, sink: &mut MoveSink<'_>) -> bool {
        let us = self.turn;
        let forward = pawn_forward(us);
        let start_rank = if us == White { Rank::R2 } else { Rank::R7 };

        let push = from + forward;
        if on_board(push) && self.board.is_empty(push) {
            if self.pawn_move(from, push, None, sink) {
                return true;
            }
            let double = push + forward;
            if rank_of(from) == Some(start_rank) && self.board.is_empty(double) {
                let kind = MoveKind::Regular { piece: Pawn, captured: None };
                if sink(MoveDescriptor::new(to_square(from), to_square(double), us, kind)) {
                    return true;
                }
            }
        }

        let en_passant = self.en_passant_square().map(offset);
        for &dir in pawn_captures(us) {
            let to = from + dir;
            if !on_board(to) {
                continue;
            }
            let stop = match self.board.get(to) {
                Some((c, captured)) if c != us => self.pawn_move(from, to, Some(captured), sink),
                None if Some(to) == en_passant => {
                    let kind = MoveKind::EnPassant { captured_square: to_square(to - forward) };
                    sink(MoveDescriptor::new(to_square(from), to_square(to), us, kind))
                }
                _ => false,
            };
            if stop {
                return true;
            }
        }
        false
    }

    /// A pawn move which is not a double step nor en passant: expands into the four promotions
    /// on the last rank.
    fn pawn_move(&self, from: Offset, to: Offset, captured: Option<Piece>,
                 sink: &mut MoveSink<'_>) -> bool {
        let us = self.turn;
        let (from, to) = (to_square(from), to_square(to));

        if to.rank() == us.last_rank() {
            Promotion::ALL.iter().any(|&promotion| {
                sink(MoveDescriptor::new(from, to, us, MoveKind::Promotion { promotion, captured }))
            })
        } else {
            sink(MoveDescriptor::new(from, to, us, MoveKind::Regular { piece: Pawn, captured }))
        }
    }

    fn castling_moves(&self, king: Offset, sink: &mut MoveSink<'_>) -> bool {
        let us = self.turn;
        let flags = self.castling[us as usize];
        if flags == 0 || self.kings[us as usize] != Some(to_square(king)) {
            return false;
        }

        File::ALL.iter()
            .filter(|&&file| flags & castle_bit(file) != 0)
            .filter_map(|&file| self.castling_move(to_square(king), file))
            .any(|mv| sink(mv))
    }

    /// Castling with the rook on `rook_file`, if no piece stands in the way and the king does not
    /// start from or pass through an attacked square. Whether the king's destination is attacked
    /// is left to the king safety check.
    fn castling_move(&self, king: Square, rook_file: File) -> Option<MoveDescriptor> {
        let us = self.turn;
        let rank = us.first_rank();
        let side = if rook_file > king.file() {
            CastleSide::KingSide
        } else {
            CastleSide::QueenSide
        };

        let king_to = Square::from_coord(side.king_destination(), rank);
        let rook_from = Square::from_coord(rook_file, rank);
        let rook_to = Square::from_coord(side.rook_destination(), rank);

        // every square covered by either piece must be empty, but for the king and rook
        let files = [king.file(), king_to.file(), rook_from.file(), rook_to.file()];
        let low = files.iter().min().copied().unwrap_or(File::A) as usize;
        let high = files.iter().max().copied().unwrap_or(File::H) as usize;
        for &file in &File::ALL[low..=high] {
            let sq = Square::from_coord(file, rank);
            if sq != king && sq != rook_from && self.piece_at(sq).is_some() {
                return None;
            }
        }

        let (low, high) = if king.file() <= king_to.file() {
            (king.file() as usize, king_to.file() as usize)
        } else {
            (king_to.file() as usize, king.file() as usize)
        };
        for &file in &File::ALL[low..=high] {
            if self.square_attacked_by(Square::from_coord(file, rank), !us) {
                return None;
            }
        }

        let kind = MoveKind::Castling { rook_from, rook_to };
        Some(MoveDescriptor::new(king, king_to, us, kind))
    }
}
