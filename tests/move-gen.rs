//! Tests the move generator against known variation counts
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////

mod move_gen {
    use chessrules::{variations, Position, Variant};

    mod starting_position {
        use super::count;

        const FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

        #[test]
        fn depth_3() { assert_eq!(count(FEN, 3), 8902); }

        #[test]
        fn depth_4() { assert_eq!(count(FEN, 4), 197281); }

        #[test]
        #[ignore]
        fn depth_5() { assert_eq!(count(FEN, 5), 4865609); }
    }

    mod kiwipete {
        use super::count;

        const FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

        #[test]
        fn depth_1() { assert_eq!(count(FEN, 1), 48); }

        #[test]
        fn depth_2() { assert_eq!(count(FEN, 2), 2039); }

        #[test]
        fn depth_3() { assert_eq!(count(FEN, 3), 97862); }

        #[test]
        #[ignore]
        fn depth_4() { assert_eq!(count(FEN, 4), 4085603); }
    }

    mod en_passant_pins {
        use super::count;

        const FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

        #[test]
        fn depth_2() { assert_eq!(count(FEN, 2), 191); }

        #[test]
        fn depth_4() { assert_eq!(count(FEN, 4), 43238); }

        #[test]
        #[ignore]
        fn depth_5() { assert_eq!(count(FEN, 5), 674624); }
    }

    mod promotions {
        use super::count;

        const FEN: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";

        #[test]
        fn depth_1() { assert_eq!(count(FEN, 1), 6); }

        #[test]
        fn depth_2() { assert_eq!(count(FEN, 2), 264); }

        #[test]
        fn depth_3() { assert_eq!(count(FEN, 3), 9467); }
    }

    mod discovered_checks {
        use super::count;

        const FEN: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

        #[test]
        fn depth_1() { assert_eq!(count(FEN, 1), 44); }

        #[test]
        fn depth_2() { assert_eq!(count(FEN, 2), 1486); }

        #[test]
        fn depth_3() { assert_eq!(count(FEN, 3), 62379); }
    }

    mod chess960 {
        use super::*;

        fn count_960(fen: &str, depth: usize) -> usize {
            let (pos, _) = Position::from_fen(Variant::Chess960, fen, true).expect("valid fen");
            variations::count(&pos, depth)
        }

        #[test]
        fn position_001() {
            let fen = "bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w HFhf - 2 9";
            assert_eq!(count_960(fen, 1), 21);
            assert_eq!(count_960(fen, 2), 528);
            assert_eq!(count_960(fen, 3), 12189);
        }

        #[test]
        fn position_002() {
            let fen = "2nnrbkr/p1qppppp/8/1ppb4/6PP/3PP3/PPP2P2/BQNNRBKR w HEhe - 1 9";
            assert_eq!(count_960(fen, 1), 21);
            assert_eq!(count_960(fen, 2), 807);
            assert_eq!(count_960(fen, 3), 18002);
        }

        #[test]
        fn standard_arrangement_matches_regular_chess() {
            let pos = Position::chess960(518).expect("valid code");
            assert_eq!(variations::count(&pos, 3), 8902);
        }
    }

    #[test]
    fn position_003() { assert_eq!(count("4k3/8/8/8/8/8/8/4K2R w K - 0 1", 6), 764643); }

    #[test]
    fn position_004() { assert_eq!(count("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1", 6), 846648); }

    #[test]
    fn position_005() { assert_eq!(count("4k2r/8/8/8/8/8/8/4K3 w k - 0 1", 6), 899442); }

    #[test]
    #[ignore]
    fn position_007() { assert_eq!(count("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1", 6), 2788982); }

    #[test]
    fn position_009() { assert_eq!(count("8/8/8/8/8/8/6k1/4K2R w K - 0 1", 6), 185867); }

    #[test]
    fn position_012() { assert_eq!(count("r3k3/1K6/8/8/8/8/8/8 w q - 0 1", 6), 367724); }

    #[test]
    fn position_013() { assert_eq!(count("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", 3), 13744); }

    #[test]
    #[ignore]
    fn position_014() { assert_eq!(count("r3k2r/8/8/8/8/8/8/1R2K2R w Kkq - 0 1", 6), 195629489); }

    #[test]
    fn position_040() { assert_eq!(count("K7/8/2n5/1n6/8/8/8/k6N w - - 0 1", 6), 588695); }

    #[test]
    fn position_059() { assert_eq!(count("6kq/8/8/8/8/8/8/7K w - - 0 1", 6), 391507); }

    #[test]
    fn position_065() { assert_eq!(count("8/8/8/8/8/K7/P7/k7 w - - 0 1", 6), 6249); }

    #[test]
    fn position_069() { assert_eq!(count("8/2k1p3/3pP3/3P2K1/8/8/8/8 w - - 0 1", 6), 34834); }

    #[test]
    fn position_074() { assert_eq!(count("8/2k1p3/3pP3/3P2K1/8/8/8/8 b - - 0 1", 6), 34822); }

    #[test]
    fn position_080() { assert_eq!(count("8/3k4/3p4/8/3P4/3K4/8/8 w - - 0 1", 6), 157093); }

    #[test]
    fn position_088() { assert_eq!(count("k7/8/3p4/8/3P4/8/8/7K b - - 0 1", 6), 21104); }

    #[test]
    fn position_103() { assert_eq!(count("k7/8/8/3p4/4p3/8/8/7K b - - 0 1", 6), 22579); }

    #[test]
    fn position_111() { assert_eq!(count("3k4/3pp3/8/8/8/8/3PP3/3K4 w - - 0 1", 6), 199002); }

    #[test]
    #[ignore]
    fn position_119() { assert_eq!(count("8/Pk6/8/8/8/8/6Kp/8 w - - 0 1", 6), 1030499); }

    #[test]
    #[ignore]
    fn position_121() { assert_eq!(count("8/PPPk4/8/8/8/8/4Kppp/8 w - - 0 1", 6), 28859283); }

    fn count(fen: &str, depth: usize) -> usize {
        println!("\n{}", fen);
        let pos: Position = fen.parse().expect("valid fen");
        let count = variations::print(&pos, depth);
        println!("Depth {} total:\t{:12}", depth, count);
        count
    }
}
