use serde::{Deserialize, Serialize};

use super::state::Position;

/// What occupies a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Empty,
    /// Part of the snake body
    Occupied,
    Food,
    Wall,
}

/// Fixed-size board of cells, stored row-major.
///
/// Dimensions never change after construction. Every query is total: reads
/// outside the board report [`CellKind::Wall`] and writes outside it are
/// ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellKind::Empty; rows * cols],
        }
    }

    /// Reset every cell to empty, keeping the dimensions
    pub fn clear(&mut self) {
        self.cells.fill(CellKind::Empty);
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0
            && (pos.row as usize) < self.rows
            && pos.col >= 0
            && (pos.col as usize) < self.cols
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.row as usize * self.cols + pos.col as usize)
        } else {
            None
        }
    }

    /// Cell kind at `pos`, or `Wall` when `pos` is off the board
    pub fn cell_at(&self, pos: Position) -> CellKind {
        self.index(pos)
            .map(|idx| self.cells[idx])
            .unwrap_or(CellKind::Wall)
    }

    /// Overwrite the cell at `pos`. No-op when `pos` is off the board.
    pub fn set_cell(&mut self, pos: Position, kind: CellKind) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = kind;
        }
    }

    /// All empty cells in row-major order
    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, kind)| **kind == CellKind::Empty)
            .map(|(idx, _)| Position::new((idx / self.cols) as i32, (idx % self.cols) as i32))
            .collect()
    }

    /// Row-major view of the cells
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.empty_cells().len(), 12);
        assert!(grid.cells().iter().all(|c| *c == CellKind::Empty));
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(20, 10);

        assert!(grid.in_bounds(Position::new(0, 0)));
        assert!(grid.in_bounds(Position::new(19, 9)));
        assert!(!grid.in_bounds(Position::new(-1, 0)));
        assert!(!grid.in_bounds(Position::new(0, -1)));
        assert!(!grid.in_bounds(Position::new(20, 0)));
        assert!(!grid.in_bounds(Position::new(0, 10)));
    }

    #[test]
    fn test_out_of_bounds_reads_as_wall() {
        let grid = Grid::new(2, 2);
        assert_eq!(grid.cell_at(Position::new(-1, 0)), CellKind::Wall);
        assert_eq!(grid.cell_at(Position::new(0, 2)), CellKind::Wall);
        assert_eq!(grid.cell_at(Position::new(1, 1)), CellKind::Empty);
    }

    #[test]
    fn test_out_of_bounds_write_is_ignored() {
        let mut grid = Grid::new(2, 2);
        grid.set_cell(Position::new(5, 5), CellKind::Food);
        grid.set_cell(Position::new(-1, 1), CellKind::Occupied);
        assert_eq!(grid.empty_cells().len(), 4);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let mut grid = Grid::new(2, 3);
        grid.set_cell(Position::new(0, 1), CellKind::Occupied);
        grid.set_cell(Position::new(1, 0), CellKind::Wall);

        assert_eq!(
            grid.empty_cells(),
            vec![
                Position::new(0, 0),
                Position::new(0, 2),
                Position::new(1, 1),
                Position::new(1, 2),
            ]
        );
    }

    #[test]
    fn test_clear_keeps_dimensions() {
        let mut grid = Grid::new(2, 2);
        grid.set_cell(Position::new(0, 0), CellKind::Food);
        grid.clear();
        assert_eq!(grid.cell_at(Position::new(0, 0)), CellKind::Empty);
        assert_eq!(grid.rows(), 2);
    }
}
