//! Grid model: positions, cell contents and derived percepts.
//!
//! The board is a plain row-major `Vec<Cell>`. Every cell holds exactly one
//! tag; percepts (breeze, stench) are derived from hazard placement and are
//! only ever rebuilt from scratch by [`Board::recompute_percepts`].

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::constants::{DELTA, MAX_BOARD_SIZE};

/// A cell coordinate, `row` counted from the top.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offset this position by a (row, col) delta.
    /// Returns `None` when the result would be negative.
    fn offset(self, dr: isize, dc: isize) -> Option<Pos> {
        Some(Pos {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Manhattan (L1) distance between two positions.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> usize {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

/// Contents of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Pit,
    Wumpus,
    Gold,
    Breeze,
    Stench,
}

impl Cell {
    /// Single-character rendering used by [`Board`]'s `Display`.
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Pit => 'P',
            Cell::Wumpus => 'W',
            Cell::Gold => 'G',
            Cell::Breeze => 'B',
            Cell::Stench => 'S',
        }
    }

    pub fn is_hazard(self) -> bool {
        matches!(self, Cell::Pit | Cell::Wumpus)
    }

    pub fn is_percept(self) -> bool {
        matches!(self, Cell::Breeze | Cell::Stench)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an all-empty `size` x `size` board.
    ///
    /// Callers bound `size` by [`MAX_BOARD_SIZE`]; game constructors reject
    /// larger sizes before getting here.
    pub fn new(size: usize) -> Self {
        debug_assert!(size <= MAX_BOARD_SIZE);
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn idx(&self, pos: Pos) -> usize {
        pos.row * self.size + pos.col
    }

    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Cell at `pos`, or `None` outside the board.
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.cells[self.idx(pos)])
    }

    /// In-bounds orthogonal neighbors of `pos`, in [`DELTA`] order.
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        DELTA
            .iter()
            .filter_map(move |&(dr, dc)| pos.offset(dr, dc))
            .filter(move |p| self.in_bounds(*p))
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Pos::new(row, col)))
    }

    /// First position holding `cell`, scanning in row-major order.
    pub fn find(&self, cell: Cell) -> Option<Pos> {
        self.positions().find(|&p| self[p] == cell)
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Rebuild every breeze and stench from the current hazards.
    ///
    /// Percepts are cleared first, then each pit/wumpus (row-major) marks its
    /// empty neighbors. A cell that already carries a percept keeps it, and
    /// hazards or gold are never overwritten.
    pub fn recompute_percepts(&mut self) {
        for c in &mut self.cells {
            if c.is_percept() {
                *c = Cell::Empty;
            }
        }

        let hazards: Vec<(Pos, Cell)> = self
            .positions()
            .map(|p| (p, self[p]))
            .filter(|(_, c)| c.is_hazard())
            .collect();

        for (pos, hazard) in hazards {
            let percept = if hazard == Cell::Pit {
                Cell::Breeze
            } else {
                Cell::Stench
            };
            let targets: Vec<Pos> = self.neighbors(pos).collect();
            for n in targets {
                if self[n] == Cell::Empty {
                    self[n] = percept;
                }
            }
        }
    }
}

impl Index<Pos> for Board {
    type Output = Cell;

    fn index(&self, pos: Pos) -> &Cell {
        &self.cells[self.idx(pos)]
    }
}

impl IndexMut<Pos> for Board {
    fn index_mut(&mut self, pos: Pos) -> &mut Cell {
        let i = self.idx(pos);
        &mut self.cells[i]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                write!(f, "{} ", self[Pos::new(row, col)].glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
