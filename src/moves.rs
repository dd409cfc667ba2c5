//! Move generation.
//!
//! A move is the destination cell of a single orthogonal step. Diagonals and
//! standing still are never legal.

use crate::board::Pos;
use crate::state::GameState;

/// Legal destinations from the player's position, in canonical
/// East, South, West, North order.
pub fn legal_moves(state: &GameState) -> Vec<Pos> {
    state.board().neighbors(state.player_pos()).collect()
}

/// Whether `dest` is one step away from the player and on the board.
pub fn is_legal_move(state: &GameState, dest: Pos) -> bool {
    state.board().neighbors(state.player_pos()).any(|p| p == dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GameState, Layout};

    fn state_at(start: Pos) -> GameState {
        GameState::from_layout(&Layout {
            size: 4,
            start,
            wumpus: Pos::new(0, 3),
            gold: Pos::new(3, 3),
            pits: vec![],
        })
        .unwrap()
    }

    #[test]
    fn test_corner_has_two_moves() {
        let state = state_at(Pos::new(3, 0));
        assert_eq!(legal_moves(&state), vec![Pos::new(3, 1), Pos::new(2, 0)]);
    }

    #[test]
    fn test_interior_has_four_moves_in_order() {
        let state = state_at(Pos::new(1, 1));
        assert_eq!(
            legal_moves(&state),
            vec![Pos::new(1, 2), Pos::new(2, 1), Pos::new(1, 0), Pos::new(0, 1)]
        );
    }

    #[test]
    fn test_is_legal_move() {
        let state = state_at(Pos::new(1, 1));
        assert!(is_legal_move(&state, Pos::new(0, 1)));
        assert!(!is_legal_move(&state, Pos::new(1, 1)));
        assert!(!is_legal_move(&state, Pos::new(0, 0)));
        assert!(!is_legal_move(&state, Pos::new(1, 3)));
    }
}
