use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::grid::{CellKind, Grid};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move position by delta
    pub fn moved_by(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.moved_by(d_row, d_col)
    }

    /// True when `other` is one step up, down, left or right of `self`
    pub fn is_adjacent(&self, other: Position) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

/// The snake body, head at the front.
///
/// Growth is deferred: [`SnakeBody::grow`] only banks segments, and each later
/// [`SnakeBody::move_to`] spends one by keeping the tail in place.
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeBody {
    body: VecDeque<Position>,
    pending_growth: u32,
}

impl SnakeBody {
    /// Lay out `length` segments starting at `head` and trailing away from
    /// `direction`, marking each one occupied on the grid.
    pub fn new(head: Position, length: usize, direction: Direction, grid: &mut Grid) -> Self {
        let trail = direction.reversed();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut segment = head;

        for _ in 0..length.max(1) {
            body.push_back(segment);
            grid.set_cell(segment, CellKind::Occupied);
            segment = segment.moved_in_direction(trail);
        }

        Self {
            body,
            pending_growth: 0,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Push `new_head` onto the front. The tail cell is vacated unless a
    /// pending growth unit is spent on this move.
    pub fn move_to(&mut self, new_head: Position, grid: &mut Grid) {
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else if let Some(tail) = self.body.pop_back() {
            grid.set_cell(tail, CellKind::Empty);
        }

        // marked after the tail is cleared: the head may take the tail's cell
        self.body.push_front(new_head);
        grid.set_cell(new_head, CellKind::Occupied);
    }

    /// Bank `amount` segments to be added over the next moves
    pub fn grow(&mut self, amount: u32) {
        self.pending_growth += amount;
    }

    /// Check `pos` against the body excluding the current head.
    ///
    /// Called before the move is applied. The tail is skipped too when the
    /// next move will vacate it, so the head may follow it into its cell.
    pub fn self_collides(&self, pos: Position) -> bool {
        let checked = if self.has_pending_growth() {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        self.body
            .iter()
            .take(checked)
            .skip(1)
            .any(|segment| *segment == pos)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    /// Copy of the segments, head first
    pub fn to_vec(&self) -> Vec<Position> {
        self.body.iter().copied().collect()
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    pub fn has_pending_growth(&self) -> bool {
        self.pending_growth > 0
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; the body keeps at least one segment
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
