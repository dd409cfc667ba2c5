//! Integration tests for the game rules.
//!
//! These drive the public API the way a front end would: build a game,
//! apply moves, and check the state invariants after every step.

use wumpus_agent::board::{Cell, Pos, manhattan};
use wumpus_agent::moves::legal_moves;
use wumpus_agent::state::{GameState, Layout, MoveEvent, apply_move, new_game_seeded};
use wumpus_agent::{GameError, new_game};

// =============================================================================
// Helper functions
// =============================================================================

/// The 3x3 board used by the scoring scenarios:
/// wumpus top-right, gold top-left, player bottom-left, no pits.
fn three_by_three() -> GameState {
    GameState::from_layout(&Layout {
        size: 3,
        start: Pos::new(2, 0),
        wumpus: Pos::new(0, 2),
        gold: Pos::new(0, 0),
        pits: vec![],
    })
    .unwrap()
}

/// Check the invariants that must hold for every reachable state.
fn assert_invariants(state: &GameState) {
    if state.won() {
        assert!(state.game_over(), "won implies game over");
    }
    assert_eq!(
        state.player_armed(),
        state.wumpus_killed() && !state.gold_collected(),
        "armed iff wumpus dead and gold not collected"
    );
    assert!(state.is_visited(state.start_pos()));
    assert!(state.is_visited(state.player_pos()));
}

/// Score change a single resolved move must produce.
fn expected_delta(event: MoveEvent, won: bool) -> i32 {
    let base = match event {
        MoveEvent::KilledWumpus => 500,
        MoveEvent::CollectedGold => 1000,
        MoveEvent::FellInPit => -1000,
        MoveEvent::Nothing => 0,
    };
    -1 + base + if won { 2000 } else { 0 }
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_new_game_default_board() {
    let state = new_game(6, 2).unwrap();
    assert_eq!(state.size(), 6);
    assert_eq!(state.player_pos(), Pos::new(5, 0));
    assert_eq!(state.board().count(Cell::Pit), 2);
    assert_eq!(state.board().count(Cell::Wumpus), 1);
    assert_eq!(state.board().count(Cell::Gold), 1);
    assert_invariants(&state);
}

#[test]
fn test_entities_far_from_start() {
    for seed in 0..100 {
        let state = new_game_seeded(6, 2, seed).unwrap();
        let board = state.board();
        for p in board.positions() {
            if matches!(board[p], Cell::Pit | Cell::Wumpus | Cell::Gold) {
                assert!(
                    manhattan(p, state.start_pos()) > 2,
                    "seed {seed}: {:?} at {p} too close",
                    board[p]
                );
            }
        }
    }
}

#[test]
fn test_percepts_consistent_with_hazards() {
    for seed in 0..50 {
        let state = new_game_seeded(6, 2, seed).unwrap();
        let board = state.board();
        for p in board.positions() {
            match board[p] {
                Cell::Breeze => assert!(board.neighbors(p).any(|n| board[n] == Cell::Pit)),
                Cell::Stench => assert!(board.neighbors(p).any(|n| board[n] == Cell::Wumpus)),
                Cell::Empty => assert!(!board.neighbors(p).any(|n| board[n].is_hazard())),
                _ => {}
            }
        }
    }
}

#[test]
fn test_board_too_small_does_not_hang() {
    assert_eq!(
        new_game(4, 30).unwrap_err(),
        GameError::BoardTooSmall { size: 4, pit_count: 30 }
    );
    assert!(matches!(
        new_game(0, 0),
        Err(GameError::BoardTooSmall { .. })
    ));
}

// =============================================================================
// Outcome resolution scenarios
// =============================================================================

#[test]
fn test_scenario_full_win_scores_3497() {
    let state = three_by_three();
    let (s, e1) = state.resolve(Pos::new(0, 2));
    let (s, e2) = s.resolve(Pos::new(0, 0));
    let (s, e3) = s.resolve(Pos::new(2, 0));

    assert_eq!(e1, MoveEvent::KilledWumpus);
    assert_eq!(e2, MoveEvent::CollectedGold);
    assert_eq!(e3, MoveEvent::Nothing);
    assert_eq!(s.score(), -3 + 500 + 1000 + 2000);
    assert_eq!(s.score(), 3497);
    assert!(s.won());
    assert!(s.game_over());
    assert!(!s.player_armed());
}

#[test]
fn test_scenario_pit_loses() {
    let state = GameState::from_layout(&Layout {
        size: 4,
        start: Pos::new(3, 0),
        wumpus: Pos::new(0, 3),
        gold: Pos::new(0, 0),
        pits: vec![Pos::new(2, 0)],
    })
    .unwrap();
    let next = apply_move(&state, Pos::new(2, 0)).unwrap();
    assert_eq!(next.score(), state.score() - 1 - 1000);
    assert!(next.game_over());
    assert!(!next.won());
}

#[test]
fn test_gold_before_wumpus_keeps_armed_invariant() {
    let state = three_by_three();
    let (s, _) = state.resolve(Pos::new(0, 0));
    assert!(s.gold_collected());
    assert!(!s.player_armed());
    let (s, event) = s.resolve(Pos::new(0, 2));
    assert_eq!(event, MoveEvent::KilledWumpus);
    assert_invariants(&s);
    assert!(!s.player_armed());
}

#[test]
fn test_revisiting_dead_wumpus_cell_does_nothing() {
    let state = GameState::from_layout(&Layout {
        size: 4,
        start: Pos::new(3, 0),
        wumpus: Pos::new(2, 0),
        gold: Pos::new(0, 3),
        pits: vec![],
    })
    .unwrap();
    let s = apply_move(&state, Pos::new(2, 0)).unwrap();
    let s = apply_move(&s, Pos::new(1, 0)).unwrap();
    let before = s.score();
    let s = apply_move(&s, Pos::new(2, 0)).unwrap();
    assert_eq!(s.score(), before - 1);
    assert_eq!(s.visited_count(), 3);
}

#[test]
fn test_invalid_move_leaves_state_untouched() {
    let state = new_game_seeded(6, 2, 4).unwrap();
    let snapshot = state.clone();
    for bad in [Pos::new(5, 0), Pos::new(3, 0), Pos::new(4, 1), Pos::new(6, 0)] {
        assert!(matches!(
            apply_move(&state, bad),
            Err(GameError::InvalidMove { .. })
        ));
    }
    assert_eq!(state, snapshot);
}

// =============================================================================
// Random walks: invariants over arbitrary move sequences
// =============================================================================

#[test]
fn test_random_walk_invariants() {
    for seed in 0..40 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut state = new_game_seeded(6, 2, seed).unwrap();

        for _ in 0..60 {
            if state.game_over() {
                let frozen = state.clone();
                for mv in legal_moves(&frozen) {
                    assert_eq!(apply_move(&frozen, mv), Err(GameError::GameOver));
                }
                assert_eq!(state, frozen);
                break;
            }

            let moves = legal_moves(&state);
            let mv = moves[rng.usize(0..moves.len())];
            let (next, event) = state.resolve(mv);

            assert_eq!(
                next.score() - state.score(),
                expected_delta(event, next.won()),
                "seed {seed}: {event:?} at {mv}"
            );
            assert!(next.visited_count() >= state.visited_count());
            for p in state.board().positions() {
                if state.is_visited(p) {
                    assert!(next.is_visited(p));
                }
            }
            assert_eq!(apply_move(&state, mv).unwrap(), next);

            state = next;
            assert_invariants(&state);
        }
    }
}
