//! Pure collision predicates evaluated by the tick engine.

use serde::{Deserialize, Serialize};

use super::food::FoodPlacement;
use super::grid::{CellKind, Grid};
use super::state::Position;

/// Type of collision that ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Head left the board
    OutOfBounds,
    /// Head hit a wall cell
    Wall,
    /// Snake hit itself
    SelfCollision,
}

pub fn out_of_bounds(pos: Position, grid: &Grid) -> bool {
    !grid.in_bounds(pos)
}

pub fn is_wall(pos: Position, grid: &Grid) -> bool {
    grid.cell_at(pos) == CellKind::Wall
}

pub fn is_food(pos: Position, food: &FoodPlacement) -> bool {
    food.position() == Some(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_also_reads_as_wall() {
        let grid = Grid::new(4, 4);
        let outside = Position::new(4, 0);
        assert!(out_of_bounds(outside, &grid));
        assert!(is_wall(outside, &grid));
        assert!(!out_of_bounds(Position::new(3, 3), &grid));
    }

    #[test]
    fn test_wall_cell() {
        let mut grid = Grid::new(4, 4);
        grid.set_cell(Position::new(1, 2), CellKind::Wall);
        assert!(is_wall(Position::new(1, 2), &grid));
        assert!(!out_of_bounds(Position::new(1, 2), &grid));
        assert!(!is_wall(Position::new(2, 2), &grid));
    }

    #[test]
    fn test_food_requires_presence() {
        let mut grid = Grid::new(4, 4);
        let mut food = FoodPlacement::new();
        assert!(!is_food(Position::new(0, 0), &food));

        food.place_at(Position::new(0, 0), &mut grid);
        assert!(is_food(Position::new(0, 0), &food));
        assert!(!is_food(Position::new(0, 1), &food));

        food.remove(&mut grid);
        assert!(!is_food(Position::new(0, 0), &food));
    }
}
