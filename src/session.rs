//! The driver side of the core: one live game and its decision ticks.
//!
//! A [`Session`] owns the authoritative [`GameState`]. Each tick runs the
//! search on the live state, then replaces it with the fully resolved result
//! of the chosen move, so callers only ever observe whole moves.

use tracing::info;

use crate::board::Pos;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::search::SearchResult;
use crate::state::{GameState, apply_move};

/// What happened during one decision tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub number: usize,
    pub from: Pos,
    pub to: Pos,
    pub search: SearchResult,
}

pub struct Session {
    config: GameConfig,
    state: GameState,
    ticks: usize,
}

impl Session {
    /// Start a session with a fresh game built from `config`.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let state = config.new_game()?;
        Ok(Self::with_state(config, state))
    }

    /// Start a session on an existing game.
    pub fn with_state(config: GameConfig, state: GameState) -> Self {
        Self {
            config,
            state,
            ticks: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut GameConfig {
        &mut self.config
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Replace the live game with a new one.
    pub fn reset(&mut self, state: GameState) {
        self.state = state;
        self.ticks = 0;
    }

    /// Run one decision tick: search, then apply the chosen move.
    ///
    /// Returns `Ok(None)` once the game is over, without searching.
    pub fn tick(&mut self) -> Result<Option<Tick>, GameError> {
        if self.state.game_over() {
            return Ok(None);
        }

        let search = self
            .config
            .searcher()
            .search(&self.state, self.config.depth);
        let Some(to) = search.best_move else {
            return Ok(None);
        };

        let from = self.state.player_pos();
        self.play(to)?;

        info!(
            tick = self.ticks,
            from = %from,
            to = %to,
            eval = search.score,
            nodes = search.nodes,
            score = self.state.score(),
            "agent moved"
        );

        Ok(Some(Tick {
            number: self.ticks,
            from,
            to,
            search,
        }))
    }

    /// Apply an externally chosen move to the live game.
    pub fn play(&mut self, to: Pos) -> Result<(), GameError> {
        let next = apply_move(&self.state, to)?;
        self.state = next;
        self.ticks += 1;
        if self.state.game_over() {
            info!(
                won = self.state.won(),
                score = self.state.score(),
                ticks = self.ticks,
                "game over"
            );
        }
        Ok(())
    }

    /// Tick until the game ends or `max_ticks` is reached.
    pub fn run_to_end(&mut self) -> Result<&GameState, GameError> {
        while self.ticks < self.config.max_ticks {
            if self.tick()?.is_none() {
                break;
            }
        }
        Ok(&self.state)
    }
}
