//! Error type shared by the game core.

use thiserror::Error;

use crate::board::Pos;

/// Errors returned by game construction and move application.
///
/// Winning and losing are ordinary terminal states, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("illegal move from {from} to {to}: not an adjacent cell")]
    InvalidMove { from: Pos, to: Pos },

    #[error("game is over, no further moves are accepted")]
    GameOver,

    #[error("board of size {size} cannot hold the wumpus, the gold and {pit_count} pits away from the start")]
    BoardTooSmall { size: usize, pit_count: usize },

    #[error("board size {size} exceeds the maximum of {max}")]
    BoardTooLarge { size: usize, max: usize },

    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}
