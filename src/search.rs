//! Depth-limited game-tree search.
//!
//! The default search is alpha-beta over alternating plies. Maximizing plies
//! are the agent's real moves and get full outcome resolution. Minimizing
//! plies model an "alternative" move that only pays the movement cost and
//! never interacts with the destination cell; the environment is assumed not
//! to react on that turn.
//!
//! [`SearchMode::SingleAgent`] drops the minimizing ply altogether and
//! resolves every ply fully.
//!
//! Every branch works on its own clone of the state, so the live game is never
//! touched and siblings never see each other's mutations.
//!
//! # Example
//!
//! ```
//! use wumpus_agent::search::choose_move;
//! use wumpus_agent::state::{apply_move, new_game_seeded};
//!
//! let state = new_game_seeded(6, 2, 1).unwrap();
//! if let Some(mv) = choose_move(&state, 3) {
//!     let next = apply_move(&state, mv).unwrap();
//!     assert_eq!(next.player_pos(), mv);
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::board::Pos;
use crate::constants::INF;
use crate::eval::evaluate;
use crate::moves::legal_moves;
use crate::state::GameState;

/// Shape of the search tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Alternating max/min plies; min plies skip entity interactions.
    #[default]
    Adversarial,
    /// Max-only search with full resolution on every ply.
    SingleAgent,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Adversarial => write!(f, "adversarial"),
            SearchMode::SingleAgent => write!(f, "single-agent"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "adversarial" | "alpha-beta" | "alphabeta" => Ok(SearchMode::Adversarial),
            "single-agent" | "single" | "max" => Ok(SearchMode::SingleAgent),
            other => Err(format!(
                "unknown search mode '{other}' (expected adversarial or single-agent)"
            )),
        }
    }
}

/// Outcome of a root search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found; `None` on terminal states or at depth 0
    pub best_move: Option<Pos>,
    /// Backed-up evaluation of the root
    pub score: i32,
    /// Number of tree nodes visited
    pub nodes: u64,
}

/// Search driver holding the mode and node statistics.
#[derive(Debug, Clone)]
pub struct Searcher {
    mode: SearchMode,
    prune: bool,
    nodes: u64,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchMode::default())
    }
}

impl Searcher {
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            prune: true,
            nodes: 0,
        }
    }

    /// Disable alpha-beta cutoffs (plain minimax over the same tree).
    ///
    /// Only affects [`SearchMode::Adversarial`]; the single-agent search
    /// never prunes.
    pub fn without_pruning(mut self) -> Self {
        self.prune = false;
        self
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Search `depth` plies from `state` with a full window.
    pub fn search(&mut self, state: &GameState, depth: u32) -> SearchResult {
        self.nodes = 0;

        let (score, best_move) = match (self.mode, self.prune) {
            (SearchMode::Adversarial, true) => self.alpha_beta(state, depth, -INF, INF, true),
            (SearchMode::Adversarial, false) => self.minimax(state, depth, true),
            (SearchMode::SingleAgent, _) => self.single_agent(state, depth),
        };

        debug!(
            mode = %self.mode,
            depth,
            score,
            nodes = self.nodes,
            best_move = ?best_move,
            "search finished"
        );

        SearchResult {
            best_move,
            score,
            nodes: self.nodes,
        }
    }

    /// Alpha-beta search. Returns the extremal score and the first move
    /// that reached it.
    pub fn alpha_beta(
        &mut self,
        state: &GameState,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (i32, Option<Pos>) {
        self.nodes += 1;

        if depth == 0 || state.game_over() {
            return (evaluate(state, depth), None);
        }

        let mut best_move = None;

        if maximizing {
            let mut best = -INF;
            for mv in legal_moves(state) {
                let (child, _) = state.resolve(mv);
                let (score, _) = self.alpha_beta(&child, depth - 1, alpha, beta, false);
                if score > best {
                    best = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(score);
                if beta <= alpha {
                    trace!(depth, alpha, beta, "beta cutoff");
                    break;
                }
            }
            (best, best_move)
        } else {
            let mut best = INF;
            for mv in legal_moves(state) {
                let child = state.step(mv);
                let (score, _) = self.alpha_beta(&child, depth - 1, alpha, beta, true);
                if score < best {
                    best = score;
                    best_move = Some(mv);
                }
                beta = beta.min(score);
                if beta <= alpha {
                    trace!(depth, alpha, beta, "alpha cutoff");
                    break;
                }
            }
            (best, best_move)
        }
    }

    /// The adversarial tree without cutoffs.
    pub fn minimax(&mut self, state: &GameState, depth: u32, maximizing: bool) -> (i32, Option<Pos>) {
        self.nodes += 1;

        if depth == 0 || state.game_over() {
            return (evaluate(state, depth), None);
        }

        let mut best_move = None;
        let mut best = if maximizing { -INF } else { INF };
        for mv in legal_moves(state) {
            let child = if maximizing {
                state.resolve(mv).0
            } else {
                state.step(mv)
            };
            let (score, _) = self.minimax(&child, depth - 1, !maximizing);
            let better = if maximizing { score > best } else { score < best };
            if better {
                best = score;
                best_move = Some(mv);
            }
        }
        (best, best_move)
    }

    /// Max-only search with full outcome resolution on every ply.
    pub fn single_agent(&mut self, state: &GameState, depth: u32) -> (i32, Option<Pos>) {
        self.nodes += 1;

        if depth == 0 || state.game_over() {
            return (evaluate(state, depth), None);
        }

        let mut best_move = None;
        let mut best = -INF;
        for mv in legal_moves(state) {
            let (child, _) = state.resolve(mv);
            let (score, _) = self.single_agent(&child, depth - 1);
            if score > best {
                best = score;
                best_move = Some(mv);
            }
        }
        (best, best_move)
    }
}

/// Alpha-beta over the adversarial tree; see [`Searcher::alpha_beta`].
pub fn alpha_beta(
    state: &GameState,
    depth: u32,
    alpha: i32,
    beta: i32,
    maximizing: bool,
) -> (i32, Option<Pos>) {
    Searcher::new(SearchMode::Adversarial).alpha_beta(state, depth, alpha, beta, maximizing)
}

/// Unpruned minimax over the adversarial tree.
pub fn minimax(state: &GameState, depth: u32, maximizing: bool) -> (i32, Option<Pos>) {
    Searcher::new(SearchMode::Adversarial).minimax(state, depth, maximizing)
}

/// Pick the agent's next move with a full-window adversarial search.
///
/// Pure with respect to `state`. Returns `None` once the game is over.
pub fn choose_move(state: &GameState, depth: u32) -> Option<Pos> {
    Searcher::new(SearchMode::Adversarial)
        .search(state, depth)
        .best_move
}
