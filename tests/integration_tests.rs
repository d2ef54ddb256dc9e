//! Integration tests for pbrain-gomoku
//!
//! These drive the public API the way the protocol layer does: whole games
//! through `Brain`, rule scenarios on a 20x20 board, and complete protocol
//! sessions over in-memory buffers.

use std::time::Duration;

use pbrain_gomoku::board::{Board, MoveError, Player, Point};
use pbrain_gomoku::deadline::Deadline;
use pbrain_gomoku::engine::{Brain, Config, EngineError};
use pbrain_gomoku::policy::{GreedyPolicy, MovePolicy};
use pbrain_gomoku::protocol::PiskvorkServer;
use pbrain_gomoku::rules::{Forbidden, RuleMode, check, is_legal};
use pbrain_gomoku::transcript::Transcript;
use pbrain_gomoku::win::{has_five_from, winner_on_board, would_win_at};

// =============================================================================
// Helper functions
// =============================================================================

/// A 20x20 board with PlayerOne stones on `ones` and PlayerTwo on `twos`.
fn setpos(ones: &[Point], twos: &[Point]) -> Board {
    let mut board = Board::new(20).unwrap();
    for &p in ones {
        board.force_set(p, 1).unwrap();
    }
    for &p in twos {
        board.force_set(p, 2).unwrap();
    }
    board
}

/// Play `moves` alternately, PlayerOne first.
fn setup_game(moves: &[Point]) -> Board {
    let mut board = Board::new(20).unwrap();
    for &p in moves {
        let player = board.current_player();
        board.play(p, player).unwrap();
    }
    board
}

fn protocol_session(input: &str) -> String {
    let mut server = PiskvorkServer::new(Brain::new(), Transcript::disabled());
    let mut output = Vec::new();
    server.serve(input.as_bytes(), &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

fn generous() -> Deadline {
    Deadline::arm(Duration::from_secs(60))
}

// =============================================================================
// Board and fingerprint
// =============================================================================

#[test]
fn test_play_undo_restores_everything() {
    let mut board = setup_game(&[(3, 3), (4, 4), (5, 5), (6, 6)]);
    let before: Vec<_> = board.points().map(|(x, y)| board.get(x, y)).collect();
    let hash = board.fingerprint();

    for p in [(0, 0), (19, 19), (10, 0), (0, 10)] {
        let player = board.current_player();
        board.play(p, player).unwrap();
        board.undo();
        let after: Vec<_> = board.points().map(|(x, y)| board.get(x, y)).collect();
        assert_eq!(after, before);
        assert_eq!(board.fingerprint(), hash);
    }
}

#[test]
fn test_fingerprint_is_order_independent() {
    let a = setup_game(&[(1, 1), (2, 2), (3, 3), (4, 4)]);
    let b = setup_game(&[(3, 3), (4, 4), (1, 1), (2, 2)]);
    assert_eq!(a.fingerprint(), b.fingerprint());

    let c = setup_game(&[(2, 2), (1, 1), (3, 3), (4, 4)]);
    assert_ne!(a.fingerprint(), c.fingerprint());
}

#[test]
fn test_history_matches_stone_count() {
    let mut board = setup_game(&[(1, 1), (2, 2), (3, 3)]);
    assert_eq!(board.history().len(), board.stone_count());
    board.undo();
    assert_eq!(board.history().len(), board.stone_count());
}

// =============================================================================
// Win detection
// =============================================================================

#[test]
fn test_would_win_agrees_with_has_five() {
    let mut board = setup_game(&[
        (5, 5), (5, 6), (6, 5), (6, 6), (7, 5), (7, 6), (8, 5), (8, 6),
    ]);
    let points: Vec<_> = board.points().collect();
    for p in points {
        if !board.is_empty(p.0, p.1) {
            continue;
        }
        let player = board.current_player();
        let predicted = would_win_at(&board, p, player);
        board.play(p, player).unwrap();
        assert_eq!(predicted, has_five_from(&board, p), "{:?}", p);
        board.undo();
    }
}

#[test]
fn test_five_on_every_axis_at_the_edges() {
    let lines: [Vec<Point>; 4] = [
        (15..20).map(|x| (x, 19)).collect(),
        (0..5).map(|y| (0, y)).collect(),
        (15..20).map(|i| (i, i)).collect(),
        (0..5).map(|i| (i, 19 - i)).collect(),
    ];
    for line in &lines {
        let board = setpos(line, &[]);
        assert!(line.iter().all(|&p| has_five_from(&board, p)), "{:?}", line);
        assert_eq!(winner_on_board(&board), Some(Player::One));
    }
}

// =============================================================================
// Renju legality
// =============================================================================

#[test]
fn test_scenario_twenty_by_twenty() {
    let empty = Board::new(20).unwrap();
    assert!(is_legal(&empty, (10, 10), Player::One, RuleMode::FreeStyle));
    assert!(is_legal(&empty, (10, 10), Player::One, RuleMode::Renju));

    let four = setpos(&[(5, 10), (6, 10), (7, 10), (8, 10)], &[]);
    for p in [(9, 10), (4, 10)] {
        assert!(is_legal(&four, p, Player::One, RuleMode::Renju));
        assert!(would_win_at(&four, p, Player::One));
    }

    // Two open threes crossing at (14, 14).
    let threes = setpos(&[(12, 14), (13, 14), (14, 12), (14, 13)], &[]);
    assert!(is_legal(&threes, (14, 14), Player::One, RuleMode::FreeStyle));
    assert_eq!(
        check(&threes, (14, 14), Player::One, RuleMode::Renju),
        Err(MoveError::Forbidden(Forbidden::DoubleThree))
    );
}

#[test]
fn test_six_in_a_row_by_mode() {
    let board = setpos(&[(2, 3), (3, 3), (4, 3), (6, 3), (7, 3)], &[]);
    assert!(is_legal(&board, (5, 3), Player::One, RuleMode::FreeStyle));
    assert!(!is_legal(&board, (5, 3), Player::One, RuleMode::Renju));

    let mut played = board.clone();
    played.force_set((5, 3), 1).unwrap();
    assert!(has_five_from(&played, (5, 3)));
}

#[test]
fn test_double_four_rejected_through_brain() {
    let mut brain = Brain::with_config(Config {
        rule: RuleMode::Renju,
        ..Config::default()
    });
    brain.start(20).unwrap();
    for p in [(6, 10), (7, 10), (8, 10), (9, 7), (9, 8), (9, 9)] {
        brain.apply_board_move(p, 1).unwrap();
    }
    for p in [(0, 0), (0, 2), (0, 4), (0, 6), (0, 8), (0, 10)] {
        brain.apply_board_move(p, 2).unwrap();
    }
    assert_eq!(
        brain.apply_own_move((9, 10)),
        Err(EngineError::Move(MoveError::Forbidden(Forbidden::DoubleFour)))
    );
    assert_eq!(brain.board().unwrap().get(9, 10), None);
}

// =============================================================================
// Move selection
// =============================================================================

#[test]
fn test_choose_center_on_empty_board() {
    let mut brain = Brain::new();
    brain.start(20).unwrap();
    assert_eq!(brain.choose_move(), Some((10, 10)));
}

#[test]
fn test_block_then_win() {
    // PlayerTwo threatens five on row 2; PlayerOne has nothing yet.
    let board = setup_game(&[
        (10, 10), (2, 2), (12, 12), (3, 2), (14, 10), (4, 2), (10, 14), (5, 2),
    ]);
    let mv = GreedyPolicy.choose(&board, RuleMode::FreeStyle, &generous());
    assert_eq!(mv, Some((1, 2)));

    // Give PlayerOne its own four first: the win takes priority.
    let board = setup_game(&[
        (10, 10), (2, 2), (10, 11), (3, 2), (10, 12), (4, 2), (10, 13), (5, 2),
    ]);
    let mv = GreedyPolicy.choose(&board, RuleMode::FreeStyle, &generous());
    assert_eq!(mv, Some((10, 9)));
}

#[test]
fn test_self_play_terminates() {
    let mut brain = Brain::new();
    brain.start(10).unwrap();
    let mut moves = 0;
    while brain.winner().is_none() {
        let Some(mv) = brain.choose_move() else { break };
        brain.apply_own_move(mv).unwrap();
        moves += 1;
        assert!(moves <= 100);
    }
    assert!(moves > 0);
}

// =============================================================================
// Protocol sessions
// =============================================================================

#[test]
fn test_full_protocol_game() {
    let out = protocol_session(
        "ABOUT\nINFO timeout_turn 2000\nSTART 20\nTURN 10,10\nTURN 11,11\nTAKEBACK 8,8\nEND\n",
    );
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("name=\"pbrain-gomoku\""));
    assert_eq!(lines[1], "OK");
    assert_eq!(lines[2], "8,8");
    assert_eq!(lines[4], "ERROR");
}

#[test]
fn test_protocol_board_then_turn() {
    let out = protocol_session("START 20\nBOARD\n5,5,2\n6,5,2\n7,5,2\n8,5,2\n9,9,1\n10,10,1\n11,11,1\nDONE\n");
    // The opponent has the extra stone and opened; their four on row 5
    // must be blocked.
    assert_eq!(out, "OK\n4,5\n");
}

#[test]
fn test_protocol_board_colours_follow_the_opener() {
    // Equal counts: we opened, so our double three at (10, 10) is refused.
    let mut brain = Brain::with_config(Config {
        rule: RuleMode::Renju,
        ..Config::default()
    });
    brain.start(20).unwrap();
    brain
        .load_position(&[
            ((8, 10), 1), ((9, 10), 1), ((10, 8), 1), ((10, 9), 1),
            ((0, 0), 2), ((2, 0), 2), ((4, 0), 2), ((6, 0), 2),
        ])
        .unwrap();
    assert_eq!(brain.board().unwrap().current_player(), Player::One);
    assert!(brain.apply_own_move((10, 10)).is_err());

    // Same shape, but the opponent opened: the restriction is theirs.
    brain
        .load_position(&[
            ((8, 10), 1), ((9, 10), 1), ((10, 8), 1), ((10, 9), 1),
            ((0, 0), 2), ((2, 0), 2), ((4, 0), 2), ((6, 0), 2), ((8, 0), 2),
        ])
        .unwrap();
    assert_eq!(brain.board().unwrap().current_player(), Player::Two);
    assert!(brain.apply_own_move((10, 10)).is_ok());
}

#[test]
fn test_protocol_errors_do_not_stop_the_loop() {
    let out = protocol_session("TURN 1,1\nSTART 3\nSTART 20\nTURN -1,0\nTURN a\nBEGIN\n");
    assert_eq!(out, "ERROR\nERROR\nOK\nERROR\nERROR\n10,10\n");
}
