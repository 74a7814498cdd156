/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use gambit::{
    movegen::pseudo_legal_destinations,
    path::{classify, path_to, Context},
    AttackMap, BlockReason, Board, Color, GameSession, MoveRecord, Piece, PieceId, PieceKind,
    RuleError, SpecialMove, Square,
};

fn id(label: &str) -> PieceId {
    label.parse().unwrap()
}

fn play(game: &mut GameSession, mv: &str) -> MoveRecord {
    game.play(mv.parse().unwrap(), PieceKind::Queen)
        .unwrap_or_else(|e| panic!("{mv} should be legal: {e}"))
}

fn play_all(game: &mut GameSession, moves: &[&str]) {
    for mv in moves {
        play(game, mv);
    }
}

fn try_play(game: &mut GameSession, mv: &str) -> Result<MoveRecord, RuleError> {
    game.play(mv.parse().unwrap(), PieceKind::Queen)
}

mod blocking {
    use super::*;

    /// Any piece dropped onto a square strictly between origin and
    /// destination turns an allowed move into a blocked one.
    fn assert_monotonic(placement: &str) {
        let board = Board::from_placement(placement).unwrap();
        let context = Context::default();

        for piece in board.pieces().filter(|p| p.kind() != PieceKind::Knight) {
            for to in pseudo_legal_destinations(piece) {
                if classify(&board, piece, to, &context).is_blocked() {
                    continue;
                }

                let path = path_to(piece.square(), to, piece.kind());
                for &between in &path[..path.len() - 1] {
                    let mut crowded = board.clone();
                    let intruder = Piece::new(Color::Black, PieceKind::Knight, 9, between);
                    crowded.place(between, Some(intruder));

                    let moved = crowded.find(piece.id()).unwrap();
                    assert!(
                        classify(&crowded, moved, to, &context).is_blocked(),
                        "{} to {to} should be blocked by a piece on {between} in {placement}",
                        piece.id()
                    );
                }
            }
        }
    }

    #[test]
    fn test_blocking_is_monotonic() {
        assert_monotonic("r3k2r/8/8/3q4/8/2B5/P3P3/R3K2R");
        assert_monotonic("4k3/1p6/8/8/3Q4/8/8/4K3");
    }

    #[test]
    fn test_knights_ignore_intervening_squares() {
        let board = Board::from_placement("4k3/8/8/8/8/8/PPP5/1N2K3").unwrap();
        let knight = board.occupant_at(Square::B1).unwrap();
        let verdict = classify(&board, knight, Square::C3, &Context::default());
        assert!(!verdict.is_blocked());
    }
}

mod pawns {
    use super::*;

    #[test]
    fn test_unmoved_pawn_has_two_forward_destinations() {
        let mut game = GameSession::new();
        let pawn = id("WP5");
        let forward = |game: &GameSession| game.legal_destinations(pawn).unwrap().population();

        assert_eq!(forward(&game), 2);
        play_all(&mut game, &["WP5-e3", "BP1-a6"]);
        assert_eq!(forward(&game), 1);
    }

    #[test]
    fn test_double_step_cannot_jump() {
        let mut game = GameSession::from_placement("4k3/8/8/8/8/4n3/4P3/4K3").unwrap();
        let err = try_play(&mut game, "WP1-e4").unwrap_err();
        assert_eq!(
            err,
            RuleError::Blocked {
                piece: id("WP1"),
                to: Square::E4,
                reason: BlockReason::PathObstructed
            }
        );
    }

    #[test]
    fn test_en_passant_only_on_the_next_ply() {
        let placement = "4k3/8/8/8/3p4/8/4P3/4K3";

        // Taken immediately: the black pawn lands behind the white one
        let mut game = GameSession::from_placement(placement).unwrap();
        play(&mut game, "WP1-e4");
        assert!(game.legal_destinations(id("BP1")).unwrap().contains(Square::E3));
        assert_eq!(
            game.resolve_special(Color::Black, id("BP1"), Square::E3).unwrap(),
            SpecialMove::EnPassant {
                captured: Square::E4
            }
        );
        let record = play(&mut game, "BP1-e3");
        assert_eq!(record.captured, Some(id("WP1")));
        assert!(game.board().is_empty(Square::E4));
        assert!(game.attacked_squares(Color::White).get(id("WP1")).is_none());

        // One full move later the chance is gone
        let mut game = GameSession::from_placement(placement).unwrap();
        play_all(&mut game, &["WP1-e4", "BK-d8", "WK-d1"]);
        assert!(!game.legal_destinations(id("BP1")).unwrap().contains(Square::E3));
        let err = try_play(&mut game, "BP1-e3").unwrap_err();
        assert_eq!(
            err,
            RuleError::Blocked {
                piece: id("BP1"),
                to: Square::E3,
                reason: BlockReason::NothingToCapture
            }
        );
    }

    #[test]
    fn test_single_step_is_not_en_passant() {
        let mut game = GameSession::from_placement("4k3/8/8/8/3p4/4P3/8/4K3").unwrap();
        play(&mut game, "WP1-e4");
        assert!(!game.legal_destinations(id("BP1")).unwrap().contains(Square::E3));
    }
}

mod castling {
    use super::*;

    #[test]
    fn test_kingside_castle_from_the_opening() {
        let mut game = GameSession::new();
        play_all(
            &mut game,
            &["WN2-f3", "BP1-a6", "WP5-e4", "BP2-b6", "WB2-c4", "BP3-c6"],
        );

        assert!(!game.is_move_blocked(Color::White, id("WK"), Square::G1).unwrap());
        let record = play(&mut game, "WK-g1");
        assert_eq!(
            record.special,
            SpecialMove::Castle {
                rook_from: Square::H1,
                rook_to: Square::F1
            }
        );
        assert_eq!(game.board().occupant_at(Square::G1).unwrap().id(), id("WK1"));
        assert_eq!(game.board().occupant_at(Square::F1).unwrap().id(), id("WR2"));
        assert!(game.board().is_empty(Square::H1));
        assert!(game.board().occupant_at(Square::F1).unwrap().has_moved());
    }

    #[test]
    fn test_queenside_castle() {
        let mut game = GameSession::from_placement("r3k2r/8/8/8/8/8/8/R3K2R b").unwrap();
        let record = play(&mut game, "BK-c8");
        assert_eq!(
            record.special,
            SpecialMove::Castle {
                rook_from: Square::A8,
                rook_to: Square::D8
            }
        );
        assert_eq!(game.board().occupant_at(Square::D8).unwrap().id(), id("BR1"));
    }

    #[test]
    fn test_castling_blocked_by_pieces_between() {
        let mut game = GameSession::new();
        let err = try_play(&mut game, "WK-g1").unwrap_err();
        assert_eq!(
            err,
            RuleError::Blocked {
                piece: id("WK1"),
                to: Square::G1,
                reason: BlockReason::CastlingPathObstructed
            }
        );
    }

    #[test]
    fn test_rook_that_moved_back_cannot_castle() {
        let mut game = GameSession::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        play_all(&mut game, &["WR2-h2", "BR1-b8", "WR2-h1", "BR1-a8"]);

        let err = try_play(&mut game, "WK-g1").unwrap_err();
        assert!(matches!(
            err,
            RuleError::Blocked {
                reason: BlockReason::CastlingRightsLost,
                ..
            }
        ));
        // The other side is untouched
        assert!(!game.is_move_blocked(Color::White, id("WK"), Square::C1).unwrap());
        // Black's a-rook also moved
        play(&mut game, "WK-c1");
        assert!(game.is_move_blocked(Color::Black, id("BK"), Square::C8).unwrap());
        assert!(!game.is_move_blocked(Color::Black, id("BK"), Square::G8).unwrap());
    }

    #[test]
    fn test_cannot_castle_out_of_check() {
        let mut game = GameSession::from_placement("4k3/8/8/8/8/8/4r3/R3K2R").unwrap();
        assert!(game.is_in_check(Color::White));
        let err = try_play(&mut game, "WK-c1").unwrap_err();
        assert_eq!(err, RuleError::WouldExposeKing { piece: id("WK1"), to: Square::C1 });
    }
}

mod king_safety {
    use super::*;

    #[test]
    fn test_king_cannot_enter_attacked_square() {
        let mut game = GameSession::from_placement("4k3/8/8/8/r7/4K3/8/8").unwrap();
        assert!(game.square_is_attacked_by(Color::Black, Square::E4));

        let before = game.clone();
        let err = try_play(&mut game, "WK-e4").unwrap_err();
        assert_eq!(err, RuleError::WouldExposeKing { piece: id("WK1"), to: Square::E4 });
        assert_eq!(game, before);
    }

    #[test]
    fn test_must_answer_check() {
        // Scholar's mate setup, one move early
        let mut game = GameSession::new();
        play_all(&mut game, &["WP5-e4", "BP5-e5", "WQ1-h5", "BN1-c6", "WB2-c4", "BN2-f6"]);
        let record = play(&mut game, "WQ1-f7");
        assert_eq!(record.captured, Some(id("BP6")));
        assert!(game.is_in_check(Color::Black));

        // The bishop defends the queen, so nothing answers the check
        let err = try_play(&mut game, "BP1-a6").unwrap_err();
        assert_eq!(err, RuleError::WouldExposeKing { piece: id("BP1"), to: Square::A6 });
        let err = try_play(&mut game, "BK-f7").unwrap_err();
        assert_eq!(err, RuleError::WouldExposeKing { piece: id("BK1"), to: Square::F7 });
        assert!(game.legal_moves().is_empty());
    }
}

mod promotion {
    use super::*;

    #[test]
    fn test_promoted_pieces_number_after_existing_ones() {
        let mut game = GameSession::from_placement("4k3/PP6/8/8/8/8/8/3QK3").unwrap();

        let record = play(&mut game, "WP1-a8");
        assert_eq!(record.promoted_to, Some(id("WQ2")));
        play(&mut game, "BK-e7");

        let record = game
            .play("WP2-b8".parse().unwrap(), |_| PieceKind::Queen)
            .unwrap();
        assert_eq!(record.promoted_to, Some(id("WQ3")));

        let retired: Vec<_> = game.retired().iter().map(Piece::id).collect();
        assert_eq!(retired, vec![id("WP1"), id("WP2")]);
        assert!(game.board().find(id("WP1")).is_none());
        assert_eq!(game.pieces(Color::White).count(), 4);
    }

    #[test]
    fn test_black_promotes_on_the_first_rank() {
        let mut game = GameSession::from_placement("4k3/8/8/8/8/8/p7/4K3 b").unwrap();
        let record = game
            .play("BP1-a1=r".parse().unwrap(), PieceKind::Queen)
            .unwrap();
        assert_eq!(record.promoted_to, Some(id("BR3")));
        assert!(game.is_in_check(Color::White));
    }

    #[test]
    fn test_chooser_only_asked_when_promoting() {
        let mut asked = 0;
        let mut game = GameSession::new();
        game.play("WP5-e4".parse().unwrap(), |_| {
            asked += 1;
            PieceKind::Queen
        })
        .unwrap();
        assert_eq!(asked, 0);
    }
}

mod attack_maps {
    use super::*;

    #[test]
    fn test_recompute_is_idempotent() {
        let mut game = GameSession::new();
        play_all(&mut game, &["WP5-e4", "BP4-d5", "WP5-d5", "BQ1-d5"]);

        for color in Color::all() {
            let first = AttackMap::compute(game.board(), color);
            let second = AttackMap::compute(game.board(), color);
            assert_eq!(first, second);
            assert_eq!(&first, game.attacked_squares(color));
        }
    }

    #[test]
    fn test_maps_track_pieces_in_play() {
        let mut game = GameSession::new();
        play_all(&mut game, &["WP5-e4", "BP4-d5", "WP5-d5"]);

        let black = game.attacked_squares(Color::Black);
        assert_eq!(black.len(), 15);
        assert!(black.get(id("BP4")).is_none());

        for color in Color::all() {
            for piece in game.pieces(color) {
                assert!(game.attacked_squares(color).get(piece.id()).is_some());
            }
        }
        assert!(game.square_is_attacked_by(Color::Black, Square::D5));
    }
}
