//! Heuristic evaluation of game states.
//!
//! Terminal states score a fixed magnitude adjusted by the depth budget left
//! when the search reached them. Non-terminal states combine the running game
//! score, an exploration bonus and a phase bonus that pulls the player toward
//! the current objective: the wumpus, then the gold, then home.

use crate::board::{Cell, Pos, manhattan};
use crate::constants::{
    GOLD_WEIGHT, HOME_WEIGHT, REVISIT_PENALTY, TERMINAL_SCORE, VISIT_BONUS, WUMPUS_WEIGHT,
};
use crate::state::GameState;

/// Score `state` for the maximizing player with `remaining_depth` plies left.
pub fn evaluate(state: &GameState, remaining_depth: u32) -> i32 {
    let depth = remaining_depth as i32;
    if state.game_over() {
        return if state.won() {
            TERMINAL_SCORE + depth
        } else {
            -TERMINAL_SCORE - depth
        };
    }

    let mut score = state.score() + VISIT_BONUS * state.visited_count() as i32;

    let player = state.player_pos();
    // Always true once a move has been made; kept as part of the formula.
    if state.is_visited(player) {
        score -= REVISIT_PENALTY;
    }

    score + phase_bonus(state, player)
}

/// Closeness bonus toward the current objective.
fn phase_bonus(state: &GameState, player: Pos) -> i32 {
    let span = 2 * state.size() as i32;
    let pull = |target: Pos, weight: i32| (span - manhattan(player, target) as i32) * weight;

    if !state.wumpus_killed() {
        pull(state.wumpus_position(), WUMPUS_WEIGHT)
    } else if !state.gold_collected() {
        state
            .board()
            .find(Cell::Gold)
            .map_or(0, |gold| pull(gold, GOLD_WEIGHT))
    } else {
        pull(state.start_pos(), HOME_WEIGHT)
    }
}
