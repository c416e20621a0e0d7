//! Immutable world snapshots and their lock-free publication.
//!
//! The tick engine builds a fresh [`Snapshot`] after every step and installs
//! it through a [`SnapshotPublisher`]. Readers hold a [`SnapshotReader`] and
//! only ever see complete snapshots, never the engine's working state.

pub mod publisher;

pub use publisher::{SnapshotPublisher, SnapshotReader};

use serde::Serialize;

use crate::game::{CellKind, Direction, GameOutcome, Position};

/// A complete, self-consistent copy of the world after one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// 0 for the freshly initialized world, then +1 per step that changed it
    pub tick: u64,
    pub rows: usize,
    pub cols: usize,
    /// Row-major cell kinds, `rows * cols` long
    pub cells: Vec<CellKind>,
    pub score: u32,
    pub game_over: bool,
    /// Why the game ended, once it has
    pub outcome: Option<GameOutcome>,
    pub food: Option<Position>,
    /// Snake segments, head first
    pub body: Vec<Position>,
    pub snake_length: usize,
    /// Direction applied on the last tick
    pub direction: Direction,
}

impl Snapshot {
    /// Cell kind at `pos`, or `Wall` when `pos` is off the board
    pub fn cell_at(&self, pos: Position) -> CellKind {
        if pos.row < 0 || pos.col < 0 {
            return CellKind::Wall;
        }
        let (row, col) = (pos.row as usize, pos.col as usize);
        if row >= self.rows || col >= self.cols {
            return CellKind::Wall;
        }
        self.cells[row * self.cols + col]
    }

    pub fn food_exists(&self) -> bool {
        self.food.is_some()
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Cross-check the fields against each other.
    ///
    /// Holds for every snapshot the engine publishes; readers use it to detect
    /// torn state.
    pub fn is_consistent(&self) -> bool {
        if self.cells.len() != self.rows * self.cols {
            return false;
        }
        if self.body.is_empty() || self.snake_length != self.body.len() {
            return false;
        }
        if self.game_over != self.outcome.is_some() {
            return false;
        }

        let body_marked = self.body.iter().all(|segment| {
            self.cell_at(*segment) == CellKind::Occupied
        });
        let occupied = self
            .cells
            .iter()
            .filter(|kind| **kind == CellKind::Occupied)
            .count();
        if !body_marked || occupied != self.body.len() {
            return false;
        }

        let food_cells = self
            .cells
            .iter()
            .filter(|kind| **kind == CellKind::Food)
            .count();
        match self.food {
            Some(pos) => food_cells == 1 && self.cell_at(pos) == CellKind::Food,
            None => food_cells == 0,
        }
    }
}
