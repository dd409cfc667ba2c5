//! Game state, initialization and move resolution.
//!
//! A [`GameState`] is a plain value. The driver owns the live one and replaces
//! it with the result of [`apply_move`]; the search clones it freely and
//! throws the clones away.

use tracing::debug;

use crate::board::{Board, Cell, Pos, manhattan};
use crate::constants::{
    GOLD_REWARD, MAX_BOARD_SIZE, MAX_PLACEMENT_ATTEMPTS, MIN_BOARD_SIZE, MOVE_COST, PIT_PENALTY,
    START_SAFE_DISTANCE, WIN_BONUS, WUMPUS_REWARD,
};
use crate::error::GameError;
use crate::moves::is_legal_move;

/// Which entity interaction a resolved move triggered.
///
/// Exactly one of these fires per move; a win is reported separately
/// through [`GameState::won`] because it can layer on top of any of them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveEvent {
    KilledWumpus,
    CollectedGold,
    FellInPit,
    Nothing,
}

/// A fixed board description, used instead of random placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub size: usize,
    pub start: Pos,
    pub wumpus: Pos,
    pub gold: Pos,
    pub pits: Vec<Pos>,
}

/// Full snapshot of one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    player_pos: Pos,
    start_pos: Pos,
    score: i32,
    /// One flag per cell, row-major.
    visited: Vec<bool>,
    visited_count: usize,
    /// Where the wumpus was placed; kept after it is killed.
    wumpus_position: Pos,
    wumpus_killed: bool,
    gold_collected: bool,
    player_armed: bool,
    game_over: bool,
    won: bool,
}

/// Start a random game with an entropy-seeded generator.
pub fn new_game(size: usize, pit_count: usize) -> Result<GameState, GameError> {
    GameState::new(size, pit_count, &mut fastrand::Rng::new())
}

/// Start a random game that is reproducible from `seed`.
pub fn new_game_seeded(size: usize, pit_count: usize, seed: u64) -> Result<GameState, GameError> {
    GameState::new(size, pit_count, &mut fastrand::Rng::with_seed(seed))
}

/// Apply `mv` to `state` with full outcome resolution.
///
/// Fails without touching `state` if the game is already over or `mv` is not
/// an adjacent in-bounds cell.
pub fn apply_move(state: &GameState, mv: Pos) -> Result<GameState, GameError> {
    if state.game_over {
        return Err(GameError::GameOver);
    }
    if !is_legal_move(state, mv) {
        return Err(GameError::InvalidMove {
            from: state.player_pos,
            to: mv,
        });
    }
    let (next, event) = state.resolve(mv);
    debug!(to = %mv, ?event, score = next.score, won = next.won, "move applied");
    Ok(next)
}

fn check_size(size: usize) -> Result<(), GameError> {
    if size > MAX_BOARD_SIZE {
        return Err(GameError::BoardTooLarge {
            size,
            max: MAX_BOARD_SIZE,
        });
    }
    Ok(())
}

impl GameState {
    /// A state with an empty board and the player on `start`.
    /// `size` must already be checked against [`MAX_BOARD_SIZE`].
    fn empty(size: usize, start: Pos) -> Self {
        let mut state = GameState {
            board: Board::new(size),
            player_pos: start,
            start_pos: start,
            score: 0,
            visited: vec![false; size * size],
            visited_count: 0,
            wumpus_position: start,
            wumpus_killed: false,
            gold_collected: false,
            player_armed: false,
            game_over: false,
            won: false,
        };
        state.visit(start);
        state
    }

    /// Create a random game on a `size` x `size` board.
    ///
    /// The player starts in the bottom-left corner. The wumpus, the gold and
    /// `pit_count` pits are placed (in that order) on empty cells farther than
    /// [`START_SAFE_DISTANCE`] from the start, then percepts are computed.
    pub fn new(size: usize, pit_count: usize, rng: &mut fastrand::Rng) -> Result<Self, GameError> {
        check_size(size)?;
        let too_small = GameError::BoardTooSmall { size, pit_count };
        if size < MIN_BOARD_SIZE {
            return Err(too_small);
        }

        let start = Pos::new(size - 1, 0);
        let mut state = Self::empty(size, start);

        let eligible = state
            .board
            .positions()
            .filter(|&p| manhattan(p, start) > START_SAFE_DISTANCE)
            .count();
        if pit_count.checked_add(2).is_none_or(|need| eligible < need) {
            return Err(too_small);
        }

        let wumpus = state.random_empty_position(rng).ok_or_else(|| too_small.clone())?;
        state.board[wumpus] = Cell::Wumpus;
        state.wumpus_position = wumpus;

        let gold = state.random_empty_position(rng).ok_or_else(|| too_small.clone())?;
        state.board[gold] = Cell::Gold;

        for _ in 0..pit_count {
            let pit = state.random_empty_position(rng).ok_or_else(|| too_small.clone())?;
            state.board[pit] = Cell::Pit;
        }

        state.board.recompute_percepts();
        debug!(size, pit_count, wumpus = %wumpus, gold = %gold, "new game");
        Ok(state)
    }

    fn is_placeable(&self, p: Pos) -> bool {
        self.board[p] == Cell::Empty && manhattan(p, self.start_pos) > START_SAFE_DISTANCE
    }

    /// Uniformly pick an empty cell away from the start.
    ///
    /// Rejection-samples first; once the draws run out, picks among the
    /// remaining eligible cells directly. `None` only when there are none.
    fn random_empty_position(&self, rng: &mut fastrand::Rng) -> Option<Pos> {
        let size = self.board.size();
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let p = Pos::new(rng.usize(0..size), rng.usize(0..size));
            if self.is_placeable(p) {
                return Some(p);
            }
        }
        let remaining: Vec<Pos> = self
            .board
            .positions()
            .filter(|&p| self.is_placeable(p))
            .collect();
        rng.choice(remaining)
    }

    /// Build a game from a fixed layout.
    ///
    /// Positions must be in bounds and pairwise distinct (the start included).
    /// The start-distance rule of random games is not enforced here.
    pub fn from_layout(layout: &Layout) -> Result<Self, GameError> {
        check_size(layout.size)?;
        if layout.size < MIN_BOARD_SIZE {
            return Err(GameError::BoardTooSmall {
                size: layout.size,
                pit_count: layout.pits.len(),
            });
        }

        if layout.start.row >= layout.size || layout.start.col >= layout.size {
            return Err(GameError::InvalidLayout(format!(
                "start {} is off the board",
                layout.start
            )));
        }

        let mut state = Self::empty(layout.size, layout.start);

        let entities = [(layout.wumpus, Cell::Wumpus), (layout.gold, Cell::Gold)]
            .into_iter()
            .chain(layout.pits.iter().map(|&p| (p, Cell::Pit)));
        for (pos, cell) in entities {
            match state.board.get(pos) {
                None => {
                    return Err(GameError::InvalidLayout(format!(
                        "{cell:?} at {pos} is off the board"
                    )));
                }
                Some(Cell::Empty) if pos != layout.start => state.board[pos] = cell,
                Some(_) => {
                    return Err(GameError::InvalidLayout(format!(
                        "{cell:?} at {pos} overlaps another entity or the start"
                    )));
                }
            }
        }

        state.wumpus_position = layout.wumpus;
        state.board.recompute_percepts();
        Ok(state)
    }

    fn visit(&mut self, pos: Pos) {
        let i = pos.row * self.board.size() + pos.col;
        if !self.visited[i] {
            self.visited[i] = true;
            self.visited_count += 1;
        }
    }

    /// Movement-cost step only: relocate, mark visited, pay for the move.
    /// The destination cell is not interacted with.
    pub fn step(&self, dest: Pos) -> GameState {
        let mut next = self.clone();
        next.player_pos = dest;
        next.visit(dest);
        next.score -= MOVE_COST;
        next
    }

    /// Full outcome resolution of moving to `dest`.
    ///
    /// `dest` is trusted to be a legal move; see [`apply_move`] for the
    /// checked version.
    pub fn resolve(&self, dest: Pos) -> (GameState, MoveEvent) {
        let mut next = self.step(dest);

        let cell = next.board[dest];
        let event = match cell {
            Cell::Wumpus if !next.wumpus_killed => {
                next.score += WUMPUS_REWARD;
                next.wumpus_killed = true;
                // Armed only while the gold is still out there.
                next.player_armed = !next.gold_collected;
                next.board[dest] = Cell::Empty;
                MoveEvent::KilledWumpus
            }
            Cell::Gold if !next.gold_collected => {
                next.score += GOLD_REWARD;
                next.gold_collected = true;
                next.player_armed = false;
                next.board[dest] = Cell::Empty;
                MoveEvent::CollectedGold
            }
            Cell::Pit => {
                next.score -= PIT_PENALTY;
                next.game_over = true;
                next.won = false;
                MoveEvent::FellInPit
            }
            _ => MoveEvent::Nothing,
        };

        if next.wumpus_killed && next.gold_collected && next.player_pos == next.start_pos {
            next.game_over = true;
            next.won = true;
            next.score += WIN_BONUS;
        }

        (next, event)
    }

    // -------------------------------------------------------------------------
    // Read-only accessors
    // -------------------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Cell contents at `pos`, `None` off the board.
    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        self.board.get(pos)
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn player_pos(&self) -> Pos {
        self.player_pos
    }

    pub fn start_pos(&self) -> Pos {
        self.start_pos
    }

    pub fn wumpus_position(&self) -> Pos {
        self.wumpus_position
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn wumpus_killed(&self) -> bool {
        self.wumpus_killed
    }

    pub fn gold_collected(&self) -> bool {
        self.gold_collected
    }

    pub fn player_armed(&self) -> bool {
        self.player_armed
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn is_visited(&self, pos: Pos) -> bool {
        self.board.in_bounds(pos) && self.visited[pos.row * self.board.size() + pos.col]
    }

    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    /// Board rendering with the player drawn as `@` (`A` when armed)
    /// and visited cells in lower case.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in 0..self.size() {
            for col in 0..self.size() {
                let p = Pos::new(row, col);
                let ch = if p == self.player_pos {
                    if self.player_armed { 'A' } else { '@' }
                } else if self.is_visited(p) {
                    self.board[p].glyph().to_ascii_lowercase()
                } else {
                    self.board[p].glyph()
                };
                out.push(ch);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}
