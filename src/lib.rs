//! Wumpus-Agent: an alpha-beta agent for Hunt the Wumpus.
//!
//! This crate provides the decision engine of an autonomous Wumpus player:
//! the board and game-state model, move generation and outcome resolution,
//! a heuristic evaluator and a depth-limited alpha-beta search.
//!
//! ## Modules
//!
//! - [`constants`] - Board defaults, rewards, evaluation weights
//! - [`board`] - Grid, positions and percepts
//! - [`state`] - Game state, initialization and move resolution
//! - [`moves`] - Legal move generation
//! - [`eval`] - Heuristic evaluation
//! - [`search`] - Alpha-beta search and move selection
//! - [`config`] - Per-run settings
//! - [`session`] - Live game driver, one decision tick at a time
//! - [`protocol`] - Text protocol for external front ends
//!
//! ## Example
//!
//! ```
//! use wumpus_agent::{apply_move, choose_move, new_game_seeded};
//!
//! // Create a new 6x6 game with 2 pits
//! let mut state = new_game_seeded(6, 2, 7).unwrap();
//!
//! // Let the agent play a few moves
//! for _ in 0..5 {
//!     let Some(mv) = choose_move(&state, 5) else { break };
//!     state = apply_move(&state, mv).unwrap();
//! }
//! println!("Score: {}", state.score());
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod eval;
pub mod moves;
pub mod protocol;
pub mod search;
pub mod session;
pub mod state;

pub use board::{Board, Cell, Pos};
pub use error::GameError;
pub use search::choose_move;
pub use state::{GameState, apply_move, new_game, new_game_seeded};
