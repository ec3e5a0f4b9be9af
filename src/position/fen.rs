//! Forsyth-Edwards Notation
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
use regex::Regex;
use super::*;

lazy_static! {
    static ref CASTLING: Regex = Regex::new(r"^(?:-|K?Q?k?q?)$").expect("INFALLIBLE");
    static ref CASTLING_960: Regex = Regex::new(r"^(?:-|[A-HKQ]*[a-hkq]*)$").expect("INFALLIBLE");
    static ref EN_PASSANT: Regex = Regex::new(r"^(?:-|[a-h][1-8])$").expect("INFALLIBLE");
}

/// Number of fields in a complete FEN string.
const FEN_FIELDS: usize = 6;

impl Position {
    /// Parse a position of the given variant from a string containing [Forsyth-Edwards
    /// Notation (FEN)](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation).
    ///
    /// In strict mode the string must have exactly six fields separated by single spaces, and the
    /// castling field must list white's rights before black's, in `KQkq` order for regular chess.
    /// Otherwise surrounding and repeated whitespace is accepted, and the two move counting fields
    /// may be omitted.
    ///
    /// The parsed position may be illegal; see [`is_legal`](#method.is_legal).
    ///
    /// ```rust
    /// use chessrules::{Position, Variant};
    ///
    /// let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
    /// let (pos, counters) = Position::from_fen(Variant::Regular, fen, true)?;
    /// assert_eq!(counters.full_move_number, 1);
    /// assert_eq!(pos.to_fen_str(), fen);
    ///
    /// assert!(Position::from_fen(Variant::Regular, "8/8/8/8/8/8/8/8 w - -", true).is_err());
    /// # Ok::<(), chessrules::Error>(())
    /// ```
    pub fn from_fen(variant: Variant, fen: &str, strict: bool) -> Result<(Position, MoveCounters)> {
        use Reason::*;

        let fail = |reason: Reason| {
            debug!("rejected FEN \"{}\": {}", fen, reason);
            Error::InvalidFen { fen: fen.to_owned(), reason }
        };

        let fields: Vec<&str> = if strict {
            fen.split(' ').collect()
        } else {
            fen.split_whitespace().collect()
        };
        let field_count_ok = if strict {
            fields.len() == FEN_FIELDS
        } else {
            (4..=FEN_FIELDS).contains(&fields.len())
        };
        if !field_count_ok {
            return Err(fail(WrongNumberOfFenFields));
        }

        // the caches are computed once, at the end
        let mut pos = Position {
            board: Board::empty(),
            turn: White,
            castling: [0; Color::COUNT],
            en_passant: None,
            variant,
            kings: [None; Color::COUNT],
            legal: false,
        };

        // the board, from the 8th rank down
        let rows: Vec<&str> = fields[0].split('/').collect();
        if rows.len() != Rank::COUNT {
            return Err(fail(WrongNumberOfRows));
        }
        for (i, row) in rows.iter().enumerate() {
            let rank = Rank::ALL[Rank::COUNT - 1 - i];
            let mut f = 0;
            for c in row.chars() {
                match c {
                    '1' ..= '8' => f += c.to_digit(10).expect("INFALLIBLE") as usize,
                    _ => {
                        let piece = Piece::from_fen_char(c)
                            .ok_or_else(|| fail(UnexpectedCharacterInBoard(c)))?;
                        if f >= File::COUNT {
                            return Err(fail(WrongRowLength(i + 1)));
                        }
                        let sq = Square::from_coord(File::ALL[f], rank);
                        pos.board.set(offset(sq), Some(piece));
                        f += 1;
                    }
                }
                if f > File::COUNT {
                    return Err(fail(WrongRowLength(i + 1)));
                }
            }
            if f != File::COUNT {
                return Err(fail(WrongRowLength(i + 1)));
            }
        }

        // whose turn it is
        pos.turn = fields[1].parse().map_err(|_| fail(InvalidTurnField))?;

        let castling = fields[2];
        let well_formed = match variant {
            Variant::Chess960 => CASTLING_960.is_match(castling),
            _ => CASTLING.is_match(castling),
        };
        if castling.is_empty() || (strict && !well_formed) {
            return Err(fail(InvalidCastlingField));
        }
        if castling != "-" {
            for c in castling.chars() {
                let color = if c.is_ascii_uppercase() { White } else { Black };
                let file = pos.castling_flag_file(color, c)
                    .ok_or_else(|| fail(InvalidCastlingField))?;
                pos.castling[color as usize] |= castle_bit(file);
            }
        }

        // en passant
        let en_passant = fields[3];
        if !EN_PASSANT.is_match(en_passant) {
            return Err(fail(InvalidEnPassantField));
        }
        if en_passant != "-" {
            let sq: Square = en_passant.parse().map_err(|_| fail(InvalidEnPassantField))?;
            let expected = match pos.turn {
                White => Rank::R6,
                Black => Rank::R3,
            };
            if sq.rank() != expected {
                return Err(fail(WrongRankInEnPassantField));
            }
            pos.en_passant = Some(sq.file());
        }

        // move counting, optional outside of strict mode
        let mut counters = MoveCounters::default();
        if let Some(clock) = fields.get(4) {
            counters.fifty_move_clock = clock.parse()
                .map_err(|_| fail(InvalidMoveCountingField("fifty-move clock")))?;
        }
        if let Some(number) = fields.get(5) {
            counters.full_move_number = number.parse()
                .map_err(|_| fail(InvalidMoveCountingField("full-move number")))?;
        }

        pos.refresh();
        Ok((pos, counters))
    }

    /// Parse a standard chess position from a FEN string, leniently. Synonym of `from_str` and
    /// `str::parse`.
    pub fn from_fen_str(s: &str) -> Result<Position> {
        Position::from_fen(Variant::Regular, s, false).map(|(pos, _)| pos)
    }

    /// Replaces the position by the one described by `fen`, keeping the variant. The position is
    /// left unchanged on error.
    pub fn set_fen(&mut self, fen: &str, strict: bool) -> Result<MoveCounters> {
        let (pos, counters) = Position::from_fen(self.variant, fen, strict)?;
        *self = pos;
        Ok(counters)
    }

    /// Converts the position to a FEN string, with a fifty-move clock of 0 and a full-move number
    /// of 1.
    pub fn to_fen_str(&self) -> String {
        self.fen_with_counters(MoveCounters::default())
    }

    /// Converts the position to a FEN string with the given move counters.
    pub fn fen_with_counters(&self, counters: MoveCounters) -> String {
        let mut board = String::new();
        for (i, &rank) in Rank::ALL.iter().rev().enumerate() {
            if i > 0 {
                board.push('/');
            }
            let mut empty = 0;
            for &file in File::ALL.iter() {
                match self.piece_at(Square::from_coord(file, rank)) {
                    Some((c, p)) => {
                        if empty > 0 {
                            board += &empty.to_string();
                            empty = 0;
                        }
                        board.push(p.fen_char(c));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                board += &empty.to_string();
            }
        }

        let en_passant = match self.en_passant_square() {
            Some(sq) => sq.to_string(),
            None => "-".to_owned(),
        };

        format!("{} {} {} {} {} {}", board, self.turn, self.castling_field(), en_passant,
                                     counters.fifty_move_clock, counters.full_move_number)
    }

    /// The castling field of the FEN string: `KQkq` letters, or rook files for Chess960.
    pub(super) fn castling_field(&self) -> String {
        let mut field = String::new();
        for &c in &[White, Black] {
            let flags = self.castling[c as usize];
            let letters: Vec<char> = if self.variant == Variant::Chess960 {
                File::ALL.iter()
                    .filter(|&&file| flags & castle_bit(file) != 0)
                    .map(|file| file.to_char())
                    .collect()
            } else {
                let mut letters = Vec::new();
                if flags & castle_bit(File::H) != 0 {
                    letters.push('k');
                }
                if flags & castle_bit(File::A) != 0 {
                    letters.push('q');
                }
                letters
            };
            for letter in letters {
                field.push(match c {
                    White => letter.to_ascii_uppercase(),
                    Black => letter.to_ascii_lowercase(),
                });
            }
        }
        if field.is_empty() {
            field.push('-');
        }
        field
    }

    /// Rook file designated by one letter of the castling field, if the letter is valid in this
    /// variant.
    fn castling_flag_file(&self, color: Color, flag: char) -> Option<File> {
        let side = match flag.to_ascii_uppercase() {
            'K' => CastleSide::KingSide,
            'Q' => CastleSide::QueenSide,
            letter if self.variant == Variant::Chess960 => {
                return File::from_char(letter.to_ascii_lowercase());
            }
            _ => return None,
        };
        if self.variant != Variant::Chess960 {
            return Some(standard_rook_file(side));
        }

        // the outermost rook on that side of the only king on the first rank
        let rank = color.first_rank();
        let mut kings = self.board.pieces()
            .filter(|&(off, c, p)| c == color && p == King && rank_of(off) == Some(rank));
        let king_file = match (kings.next(), kings.next()) {
            (Some((off, _, _)), None) => file_of(off),
            _ => None,
        };
        let outermost = king_file.and_then(|king| {
            let rook_on = |&&file: &&File| {
                self.piece_at(Square::from_coord(file, rank)) == Some((color, Rook))
            };
            let rook = match side {
                CastleSide::KingSide => File::ALL[king as usize + 1..].iter().rev().find(rook_on),
                CastleSide::QueenSide => File::ALL[..king as usize].iter().find(rook_on),
            };
            rook.copied()
        });
        Some(outermost.unwrap_or_else(|| standard_rook_file(side)))
    }
}
