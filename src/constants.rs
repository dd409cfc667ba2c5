//! Constants for board defaults, scoring, evaluation weights and search.
//!
//! Everything that tunes the game or the agent lives here so the rules in
//! [`crate::state`] and the heuristic in [`crate::eval`] read as formulas.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board side length (NxN).
pub const DEFAULT_BOARD_SIZE: usize = 6;

/// Default number of pits placed at game start.
pub const DEFAULT_PIT_COUNT: usize = 2;

/// Smallest board that still has a legal move from every cell.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest accepted board side length.
pub const MAX_BOARD_SIZE: usize = 256;

/// Entities are only placed strictly farther than this (Manhattan) from the start.
pub const START_SAFE_DISTANCE: usize = 2;

/// Rejection-sampling draws for a single entity before falling back to
/// a uniform pick among the remaining eligible cells.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

// =============================================================================
// Scoring (applied by the outcome resolver)
// =============================================================================

/// Cost of every step.
pub const MOVE_COST: i32 = 1;

/// Reward for walking onto the live wumpus.
pub const WUMPUS_REWARD: i32 = 500;

/// Reward for picking up the gold.
pub const GOLD_REWARD: i32 = 1000;

/// Penalty for falling into a pit.
pub const PIT_PENALTY: i32 = 1000;

/// Bonus for returning to the start with both objectives done.
pub const WIN_BONUS: i32 = 2000;

// =============================================================================
// Evaluation Weights
// =============================================================================

/// Magnitude of a terminal evaluation (before the remaining-depth adjustment).
pub const TERMINAL_SCORE: i32 = 10_000;

/// Bonus per visited cell.
pub const VISIT_BONUS: i32 = 50;

/// Penalty when the player stands on an already visited cell.
pub const REVISIT_PENALTY: i32 = 30;

/// Weight of the closeness-to-wumpus term while the wumpus lives.
pub const WUMPUS_WEIGHT: i32 = 30;

/// Weight of the closeness-to-gold term once the wumpus is dead.
pub const GOLD_WEIGHT: i32 = 40;

/// Weight of the closeness-to-start term once the gold is collected.
pub const HOME_WEIGHT: i32 = 50;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default search depth in plies.
pub const DEFAULT_DEPTH: u32 = 5;

/// Stand-in for infinity in the alpha-beta window.
/// Far outside any reachable evaluation, and safe to negate.
pub const INF: i32 = i32::MAX / 2;

/// Default cap on decision ticks for the autoplay driver.
pub const DEFAULT_MAX_TICKS: usize = 200;

// =============================================================================
// Neighbor Offsets
// =============================================================================

/// Orthogonal neighbor offsets as (row, col) deltas.
/// Order: East, South, West, North. Move tie-breaking follows this order.
pub const DELTA: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
