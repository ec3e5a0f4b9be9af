//! Tests the notation codecs and the behavior of positions across played moves
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use chessrules::*;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/// Every position reachable from `pos` in `depth` plies, `pos` included.
fn reachable(pos: &Position, depth: usize) -> Vec<Position> {
    let mut found = vec![pos.clone()];
    if depth > 0 {
        for mv in pos.moves() {
            let mut next = pos.clone();
            next.play(mv);
            found.extend(reachable(&next, depth - 1));
        }
    }
    found
}

#[test]
fn starting_position_has_twenty_moves() {
    let pos = Position::new();
    assert_eq!(pos.moves().len(), 20);

    let notations: Vec<_> = pos.moves().iter().map(|mv| pos.notation(mv)).collect();
    for san in &["a3", "a4", "h3", "h4", "Na3", "Nc3", "Nf3", "Nh3"] {
        assert!(notations.contains(&san.to_string()), "{} missing", san);
    }
}

#[test]
fn chess960_code_518_is_the_standard_arrangement() {
    let pos = Position::chess960(CHESS960_STANDARD).expect("valid code");
    assert_eq!(pos.to_fen_str(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w AHah - 0 1");
    assert_eq!(pos.ascii(), Position::new().ascii().replace("KQkq", "AHah"));
}

#[test]
fn knights_are_disambiguated_minimally() {
    // by file: knights on b1 and f1 both reach d2
    let pos: Position = "4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1".parse().expect("valid fen");
    let sans: Vec<_> = pos.moves().iter().map(|mv| pos.notation(mv)).collect();
    assert!(sans.contains(&"Nbd2".to_owned()));
    assert!(sans.contains(&"Nfd2".to_owned()));

    // by rank: knights on b1 and b5 share a file
    let pos: Position = "4k3/8/8/1N6/8/8/8/1N2K3 w - - 0 1".parse().expect("valid fen");
    let sans: Vec<_> = pos.moves().iter().map(|mv| pos.notation(mv)).collect();
    assert!(sans.contains(&"N1c3".to_owned()));
    assert!(sans.contains(&"N5c3".to_owned()));
    assert!(sans.contains(&"Nd4".to_owned()));

    // by square: b5 shares its file with b3 and its rank with f5, all three reaching d4
    let pos: Position = "4k3/8/8/1N3N2/8/1N6/8/4K3 w - - 0 1".parse().expect("valid fen");
    let sans: Vec<_> = pos.moves().iter().map(|mv| pos.notation(mv)).collect();
    assert!(sans.contains(&"Nb5d4".to_owned()));
    assert!(sans.contains(&"N3d4".to_owned()));
    assert!(sans.contains(&"Nfd4".to_owned()));
    assert!(!sans.contains(&"Nbd4".to_owned()));

    for mv in pos.moves() {
        assert_eq!(pos.parse_notation(&pos.notation(&mv), true), Ok(mv));
    }
}

#[test]
fn castling_round_trips_through_san_and_uci() {
    let pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().expect("valid fen");

    let mv = pos.parse_notation("O-O", true).expect("king-side castling");
    assert_eq!(pos.notation(&mv), "O-O");
    assert_eq!(pos.uci_notation(&mv), "e1h1");
    assert_eq!(pos.parse_uci("e1h1"), Ok(mv));
    assert_eq!(pos.parse_notation("e1h1", true), Ok(mv));

    let mut next = pos.clone();
    next.play(mv);
    assert_eq!(next.to_fen_str(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 0 1");

    let mv = next.parse_notation("O-O-O", true).expect("queen-side castling");
    assert_eq!(next.uci_notation(&mv), "e8a8");
    next.play(mv);
    assert_eq!(next.to_fen_str(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 0 1");
}

#[test]
fn chess960_castling_round_trips() {
    let fen = "4k3/8/8/8/8/8/8/RK4R1 w AG - 0 1";
    let (pos, _) = Position::from_fen(Variant::Chess960, fen, true).expect("valid fen");

    let mv = pos.parse_notation("O-O", true).expect("king-side castling");
    assert_eq!(pos.uci_notation(&mv), "b1g1");
    assert_eq!(pos.parse_uci("b1g1"), Ok(mv));
    let mut next = pos.clone();
    next.play(mv);
    assert_eq!(next.piece_at(Square::G1), Some((Color::White, Piece::King)));
    assert_eq!(next.piece_at(Square::F1), Some((Color::White, Piece::Rook)));
    assert_eq!(next.to_fen_str(), "4k3/8/8/8/8/8/8/R4RK1 b - - 0 1");

    let mv = pos.parse_notation("O-O-O", true).expect("queen-side castling");
    assert_eq!(pos.uci_notation(&mv), "b1a1");
    assert_eq!(mv.to(), Square::C1);
    assert_eq!(mv.rook_to(), Square::D1);
}

#[test]
fn last_rank_pawns_promote_four_ways() {
    let pos: Position = "3r3k/4P3/8/8/8/8/8/4K3 w - - 0 1".parse().expect("valid fen");
    for &to in &[Square::D8, Square::E8] {
        let promotions: Vec<_> = pos.moves().into_iter().filter(|mv| mv.to() == to).collect();
        assert_eq!(promotions.len(), 4);
        let mut pieces: Vec<_> = promotions.iter().map(|mv| mv.final_piece()).collect();
        pieces.sort();
        assert_eq!(pieces, vec![Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]);
    }

    let resolver = pos.is_move_legal(Square::E7, Square::D8).expect("legal capture");
    let mv = resolver.promote(Promotion::ToRook).expect("promotion");
    assert_eq!(pos.notation(&mv), "exd8=R+");
    assert_eq!(pos.uci_notation(&mv), "e7d8r");
}

#[test]
fn fen_round_trips_for_reachable_positions() {
    let start: Position = KIWIPETE.parse().expect("valid fen");
    for pos in reachable(&start, 2) {
        let fen = pos.to_fen_str();
        let (decoded, _) = Position::from_fen(pos.variant(), &fen, true).expect("valid fen");
        assert_eq!(decoded, pos, "{}", fen);
    }
}

#[test]
fn playing_on_a_copy_leaves_the_original_intact() {
    let pos: Position = KIWIPETE.parse().expect("valid fen");
    let before = pos.clone();
    for mv in pos.moves() {
        let mut next = pos.clone();
        next.play(mv);
        assert_ne!(next, pos);
    }
    assert_eq!(pos, before);
}

#[test]
fn mate_and_stalemate_follow_check_and_mobility() {
    let start: Position = KIWIPETE.parse().expect("valid fen");
    let mut positions = reachable(&start, 2);
    positions.push("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse().expect("valid fen"));
    positions.push("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1".parse().expect("valid fen"));
    positions.push("4k3/8/8/8/8/8/8/4K2P w - - 0 1".parse().expect("valid fen"));

    for pos in positions {
        assert_eq!(pos.is_checkmate(), pos.is_check() && !pos.has_move(), "{}", pos);
        assert_eq!(pos.is_stalemate(), pos.is_legal() && !pos.is_check() && !pos.has_move());
        if !pos.is_legal() {
            assert!(!pos.is_check() && !pos.is_checkmate() && !pos.is_stalemate());
        }
    }
}

#[test]
fn move_generation_is_deterministic() {
    let pos: Position = KIWIPETE.parse().expect("valid fen");
    let first: Vec<_> = pos.moves().iter().map(|mv| pos.uci_notation(mv)).collect();
    let second: Vec<_> = pos.clone().moves().iter().map(|mv| pos.uci_notation(mv)).collect();
    assert_eq!(first, second);
}

#[test]
fn a_short_game() {
    let mut pos = Position::new();
    for san in &["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6"] {
        assert!(pos.play_notation(san), "{}", san);
    }
    let mate = pos.parse_notation("Qxf7#", true).expect("checkmate");
    assert_eq!(pos.figurine_notation(&mate), "\u{2655}xf7#");
    pos.play(mate);
    assert!(pos.is_checkmate());
    assert!(!pos.play_notation("Ke7"));
    assert!(!pos.play_null_move());
    assert_eq!(
        pos.fen_with_counters(MoveCounters { fifty_move_clock: 0, full_move_number: 4 }),
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4"
    );
}

#[test]
fn strict_and_lenient_parsing() {
    let pos: Position = "4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1".parse().expect("valid fen");
    assert!(pos.parse_notation("ed5", true).is_err());
    assert!(pos.parse_notation("ed5", false).is_ok());
    assert!(pos.parse_notation("exd5+", true).is_err());
    assert!(pos.parse_notation("exd5+", false).is_ok());

    let err = pos.parse_notation("Qd5", false).unwrap_err();
    assert_eq!(err.reason(), Some(&Reason::NoPieceCanMoveTo(Piece::Queen, Square::D5)));
    assert_eq!(
        err.to_string(),
        "invalid move \"Qd5\" in position \"4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1\": \
         no Q can move to d5"
    );
}

#[test]
fn failed_mutations_leave_the_position_unchanged() {
    let mut pos = Position::new();
    let before = pos.clone();
    assert!(!pos.play_notation("e5"));
    assert!(!pos.play_notation("Nf3x"));
    assert!(pos.set_fen("not a fen", false).is_err());
    assert!(pos.reset_960(CHESS960_POSITIONS).is_err());
    assert_eq!(pos, before);
}
