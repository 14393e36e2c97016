use arbiter::chess::core::{PieceKind, Player, Promotion, Square};
use arbiter::{Game, Phase};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn play(game: &mut Game, moves: &[(&str, &str)]) {
    for &(from, to) in moves {
        assert!(game.try_move(from, to), "move {from} -> {to} was rejected");
    }
}

#[test]
fn initial_position() {
    let game = Game::new();
    assert_eq!(game.phase(), Phase::WhiteToMove);
    assert_eq!(game.legal_moves().len(), 20);
    assert!(!game.is_in_check(Player::White));
    assert!(!game.is_in_check(Player::Black));
    // No castling or en passant from the start.
    let moves: Vec<String> = game.legal_moves().iter().map(ToString::to_string).collect();
    assert!(!moves.contains(&"e1g1".to_string()));
    assert!(!moves.contains(&"e1c1".to_string()));
}

#[test]
fn fools_mate() {
    let mut game = Game::new();
    play(&mut game, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4")]);
    assert_eq!(game.phase(), Phase::BlackToMove);
    assert!(game.try_move("d8", "h4"));
    assert_eq!(game.phase(), Phase::Checkmate);
    assert!(game.is_in_check(Player::White));
    assert!(game.is_checkmate());
    assert!(!game.is_stalemate());
    assert!(game.legal_moves().is_empty());
    // The game is over: nothing moves any more.
    assert!(!game.try_move("e1", "f2"));
}

#[test]
fn scholars_mate() {
    let mut game = Game::new();
    play(
        &mut game,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("f1", "c4"),
            ("b8", "c6"),
            ("d1", "h5"),
            ("g8", "f6"),
        ],
    );
    assert!(game.try_move("h5", "f7"));
    assert_eq!(game.phase(), Phase::Checkmate);
    assert!(game.is_in_check(Player::Black));
}

#[test]
fn undefended_queen_on_f7_is_check_but_not_mate() {
    // Without the bishop backing it up, the queen on f7 gives check yet can
    // simply be taken by the king.
    let mut game = Game::new();
    play(
        &mut game,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("d1", "h5"),
            ("b8", "c6"),
            ("h5", "f7"),
        ],
    );
    assert_eq!(game.phase(), Phase::BlackToMove);
    assert!(game.is_in_check(Player::Black));
    assert!(!game.is_checkmate());
    assert!(game.try_move("e8", "f7"));
    assert!(!game.is_in_check(Player::Black));
    assert_eq!(game.piece_at(Square::F7).kind(), PieceKind::King);
}

#[test]
fn en_passant_capture_removes_the_pushed_pawn() {
    let mut game = Game::new();
    play(
        &mut game,
        &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")],
    );
    // The window is open: the skipped square shows up in the position.
    assert!(game.to_string().ends_with(" d6"));
    assert!(game.try_move("e5", "d6"));
    assert_eq!(game.piece_at(Square::D6).kind(), PieceKind::Pawn);
    assert_eq!(game.piece_at(Square::D6).owner(), Player::White);
    assert_eq!(game.piece_at(Square::D5).kind(), PieceKind::Empty);
    assert_eq!(game.piece_at(Square::E5).kind(), PieceKind::Empty);
}

#[test]
fn en_passant_window_survives_exactly_one_reply() {
    let mut game = Game::new();
    play(
        &mut game,
        &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")],
    );
    // White declines the capture...
    play(&mut game, &[("h2", "h3"), ("a6", "a5")]);
    // ...and the right is gone for good.
    assert!(!game.try_move("e5", "d6"));
    assert_eq!(game.piece_at(Square::D5).kind(), PieceKind::Pawn);
}

#[test]
fn en_passant_rejected_when_it_exposes_the_king() {
    // Capturing en passant would clear the whole fifth rank between the
    // rook and the king.
    let mut game = Game::from_fen("8/8/8/KPp4r/8/8/8/7k w - c6 0 1").unwrap();
    let before = game.to_string();
    assert!(!game.try_move("b5", "c6"));
    assert_eq!(game.to_string(), before);
    assert_eq!(game.piece_at(Square::C5).kind(), PieceKind::Pawn);
    assert_eq!(game.piece_at(Square::B5).kind(), PieceKind::Pawn);
    // The untaken right is still there for a legal continuation.
    assert!(game.to_string().ends_with(" c6"));
}

#[test]
fn castling_executes_the_rook_sub_move() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    assert!(game.try_move("e1", "g1"));
    assert_eq!(game.piece_at(Square::G1).kind(), PieceKind::King);
    assert_eq!(game.piece_at(Square::F1).kind(), PieceKind::Rook);
    assert_eq!(game.piece_at(Square::E1).kind(), PieceKind::Empty);
    assert_eq!(game.piece_at(Square::H1).kind(), PieceKind::Empty);
    assert!(game.try_move("e8", "c8"));
    assert_eq!(game.piece_at(Square::C8).kind(), PieceKind::King);
    assert_eq!(game.piece_at(Square::D8).kind(), PieceKind::Rook);
    assert_eq!(game.to_string(), "2kr3r/8/8/8/8/8/8/R4RK1 w - -");
}

#[test]
fn castling_rights_do_not_come_back() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    // Both queenside rooks wander away and return to their corners.
    play(
        &mut game,
        &[("a1", "b1"), ("a8", "b8"), ("b1", "a1"), ("b8", "a8")],
    );
    // The position looks identical, but the long-castle rights are spent.
    assert_eq!(game.to_string(), "r3k2r/8/8/8/8/8/8/R3K2R w Kk -");
    assert!(!game.try_move("e1", "c1"));
    assert!(game.try_move("e1", "g1"));
    assert!(!game.try_move("e8", "c8"));

    // Black's short right survives the same shuffle. (A fresh game: after
    // White castles, the rook on f1 covers f8 and would get in the way.)
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(
        &mut game,
        &[
            ("a1", "b1"),
            ("a8", "b8"),
            ("b1", "a1"),
            ("b8", "a8"),
            ("a1", "b1"),
        ],
    );
    assert!(game.try_move("e8", "g8"));
}

#[test]
fn castling_unavailable_under_attack() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/6R1/4K3 b kq - 0 1").unwrap();
    // The rook on g2 covers g8: short castling is off, long is fine.
    assert!(!game.try_move("e8", "g8"));
    assert!(game.try_move("e8", "c8"));
}

#[test]
fn promotion_defaults_to_queen() {
    let mut game = Game::from_fen("k7/4P3/8/8/8/8/8/K7 w - - 0 1").unwrap();
    assert!(game.try_move("e7", "e8"));
    assert_eq!(game.piece_at(Square::E8).kind(), PieceKind::Queen);
    assert_eq!(game.piece_at(Square::E8).owner(), Player::White);
    // The new queen checks along the back rank.
    assert!(game.is_in_check(Player::Black));
}

#[test]
fn promotion_honors_the_configured_choice() {
    let mut game = Game::from_fen("k7/4P3/8/8/8/8/8/K7 w - - 0 1").unwrap();
    game.set_promotion(Promotion::Rook);
    assert!(game.try_move("e7", "e8"));
    assert_eq!(game.piece_at(Square::E8).kind(), PieceKind::Rook);

    // A capturing promotion works the same way.
    let mut game = Game::from_fen("3rk3/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    game.set_promotion(Promotion::Knight);
    assert!(game.try_move("e7", "d8"));
    assert_eq!(game.piece_at(Square::D8).kind(), PieceKind::Knight);
    assert_eq!(game.piece_at(Square::D8).owner(), Player::White);
}

#[test]
fn stalemate_is_detected_and_does_not_mutate() {
    let game = Game::from_fen("7k/8/6Q1/8/8/8/8/K7 b - - 0 1").unwrap();
    let before = game.to_string();
    assert!(game.is_stalemate());
    assert!(!game.is_checkmate());
    assert!(game.legal_moves().is_empty());
    assert_eq!(game.to_string(), before);
    assert_eq!(game.phase(), Phase::BlackToMove);
}

#[test]
fn stalemate_ends_the_game() {
    let mut game = Game::from_fen("7k/8/8/6Q1/8/8/8/K7 w - - 0 1").unwrap();
    assert!(game.try_move("g5", "g6"));
    assert_eq!(game.phase(), Phase::Stalemate);
    assert!(!game.is_in_check(Player::Black));
    assert!(!game.try_move("h8", "h7"));
}

// The legality filter's core invariant: a completed move never leaves the
// mover's own king attacked, along random games.
#[test]
fn random_playouts_never_leave_the_mover_in_check() {
    for seed in 0..4 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new();
        for _ in 0..120 {
            let Some(side) = game.side_to_move() else {
                break;
            };
            let moves = game.legal_moves();
            assert!(
                !moves.is_empty(),
                "an active phase implies at least one legal move"
            );
            let next = moves[rng.gen_range(0..moves.len())];
            assert!(game.try_move(
                &next.from().to_string(),
                &next.to().to_string()
            ));
            assert!(
                !game.is_in_check(side),
                "seed {seed}: {next} left the mover in check"
            );
        }
    }
}
