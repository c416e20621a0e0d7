use log::info;
use rand::Rng;

use super::grid::{CellKind, Grid};
use super::state::Position;

/// The single food item on the board, if any.
///
/// While present, the grid cell at its position is `Food` and no other cell is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodPlacement {
    position: Option<Position>,
}

impl FoodPlacement {
    pub fn new() -> Self {
        Self { position: None }
    }

    /// Put food on a uniformly chosen empty cell.
    ///
    /// Leaves the food absent when the board has no empty cell; the caller
    /// treats that as the board being full.
    pub fn place_random<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) {
        let empty_cells = grid.empty_cells();

        if empty_cells.is_empty() {
            info!("no empty cell left for food");
            self.position = None;
            return;
        }

        let pos = empty_cells[rng.gen_range(0..empty_cells.len())];
        grid.set_cell(pos, CellKind::Food);
        self.position = Some(pos);
    }

    /// Take the food off the board
    pub fn remove(&mut self, grid: &mut Grid) {
        if let Some(pos) = self.position.take() {
            grid.set_cell(pos, CellKind::Empty);
        }
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn is_present(&self) -> bool {
        self.position.is_some()
    }

    #[cfg(test)]
    pub(crate) fn place_at(&mut self, pos: Position, grid: &mut Grid) {
        self.remove(grid);
        grid.set_cell(pos, CellKind::Food);
        self.position = Some(pos);
    }
}
