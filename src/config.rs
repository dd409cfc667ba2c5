//! Per-run configuration.
//!
//! Defaults come from [`crate::constants`]; the binary maps its command-line
//! flags (and `WUMPUS_*` environment variables) onto a [`GameConfig`].

use anyhow::{Result, bail};

use crate::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_DEPTH, DEFAULT_MAX_TICKS, DEFAULT_PIT_COUNT, MAX_BOARD_SIZE,
    MIN_BOARD_SIZE,
};
use crate::error::GameError;
use crate::search::{SearchMode, Searcher};
use crate::state::{GameState, new_game, new_game_seeded};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Board side length
    pub board_size: usize,
    /// Number of pits placed at start
    pub pit_count: usize,
    /// Search depth in plies
    pub depth: u32,
    /// Seed for entity placement; `None` draws from entropy
    pub seed: Option<u64>,
    /// Search tree shape
    pub mode: SearchMode,
    /// Cap on decision ticks for autoplay
    pub max_ticks: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            pit_count: DEFAULT_PIT_COUNT,
            depth: DEFAULT_DEPTH,
            seed: None,
            mode: SearchMode::default(),
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

impl GameConfig {
    /// Reject settings that cannot produce a playable game.
    pub fn validate(&self) -> Result<()> {
        if self.board_size < MIN_BOARD_SIZE {
            bail!(
                "board size must be at least {MIN_BOARD_SIZE}, got {}",
                self.board_size
            );
        }
        if self.board_size > MAX_BOARD_SIZE {
            bail!(
                "board size must be at most {MAX_BOARD_SIZE}, got {}",
                self.board_size
            );
        }
        if self.depth == 0 {
            bail!("search depth must be at least 1");
        }
        if self.max_ticks == 0 {
            bail!("max ticks must be at least 1");
        }
        Ok(())
    }

    /// Create a fresh game from these settings.
    pub fn new_game(&self) -> Result<GameState, GameError> {
        match self.seed {
            Some(seed) => new_game_seeded(self.board_size, self.pit_count, seed),
            None => new_game(self.board_size, self.pit_count),
        }
    }

    pub fn searcher(&self) -> Searcher {
        Searcher::new(self.mode)
    }
}
