use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::direction::Direction;
use super::state::Position;

/// Points awarded per food unless configured otherwise
pub const DEFAULT_POINTS_PER_FOOD: u32 = 10;

/// Why a [`GameConfig`] cannot start a game
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must be at least 1x1, got {rows}x{cols}")]
    EmptyBoard { rows: usize, cols: usize },
    #[error("starting length must be at least 1")]
    ZeroLength,
    #[error("initial direction must be Up, Down, Left or Right")]
    NoInitialDirection,
    #[error("starting snake of length {length} does not fit on a {rows}x{cols} board")]
    SnakeDoesNotFit {
        length: usize,
        rows: usize,
        cols: usize,
    },
    #[error("wall at ({row}, {col}) is off the board")]
    WallOutOfBounds { row: i32, col: i32 },
    #[error("wall at ({row}, {col}) overlaps the starting snake")]
    WallOnSnake { row: i32, col: i32 },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of board rows
    pub rows: usize,
    /// Number of board columns
    pub cols: usize,
    /// Initial length of the snake
    pub starting_length: usize,
    /// Score added for each food eaten
    pub points_per_food: u32,
    /// Direction the snake faces at start; the body trails the other way
    pub initial_direction: Direction,
    /// Cells marked as walls at start
    pub walls: Vec<Position>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            starting_length: 3,
            points_per_food: DEFAULT_POINTS_PER_FOOD,
            initial_direction: Direction::Right,
            walls: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to parse game config")?;
        Ok(config)
    }

    /// Head position at start: the centre of the board
    pub fn start_head(&self) -> Position {
        Position::new((self.rows / 2) as i32, (self.cols / 2) as i32)
    }

    /// Cells the starting snake will cover, head first
    pub fn start_body(&self) -> Vec<Position> {
        let trail = self.initial_direction.reversed();
        let mut segment = self.start_head();
        let mut body = Vec::with_capacity(self.starting_length);
        for _ in 0..self.starting_length {
            body.push(segment);
            segment = segment.moved_in_direction(trail);
        }
        body
    }

    fn contains(&self, pos: Position) -> bool {
        pos.row >= 0
            && (pos.row as usize) < self.rows
            && pos.col >= 0
            && (pos.col as usize) < self.cols
    }

    /// Check that a game can start from this configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyBoard {
                rows: self.rows,
                cols: self.cols,
            });
        }

        if self.starting_length == 0 {
            return Err(ConfigError::ZeroLength);
        }

        if self.initial_direction == Direction::None {
            return Err(ConfigError::NoInitialDirection);
        }

        let body = self.start_body();
        if !body.iter().all(|pos| self.contains(*pos)) {
            return Err(ConfigError::SnakeDoesNotFit {
                length: self.starting_length,
                rows: self.rows,
                cols: self.cols,
            });
        }

        for wall in &self.walls {
            if !self.contains(*wall) {
                return Err(ConfigError::WallOutOfBounds {
                    row: wall.row,
                    col: wall.col,
                });
            }
            if body.contains(wall) {
                return Err(ConfigError::WallOnSnake {
                    row: wall.row,
                    col: wall.col,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.rows, 20);
        assert_eq!(config.cols, 20);
        assert_eq!(config.starting_length, 3);
        assert_eq!(config.points_per_food, 10);
        assert_eq!(config.initial_direction, Direction::Right);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_start_body_centred() {
        let config = GameConfig::new(5, 5);
        assert_eq!(
            config.start_body(),
            vec![Position::new(2, 2), Position::new(2, 1), Position::new(2, 0)]
        );
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        assert_eq!(
            GameConfig::new(0, 5).validate(),
            Err(ConfigError::EmptyBoard { rows: 0, cols: 5 })
        );

        let config = GameConfig {
            starting_length: 0,
            ..GameConfig::small()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLength));

        let config = GameConfig {
            initial_direction: Direction::None,
            ..GameConfig::small()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoInitialDirection));

        // head at column 2, four segments would reach column -1
        let config = GameConfig {
            starting_length: 4,
            ..GameConfig::new(5, 5)
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SnakeDoesNotFit { length: 4, .. })
        ));

        let config = GameConfig {
            walls: vec![Position::new(10, 1)],
            ..GameConfig::small()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WallOutOfBounds { .. })
        ));

        let config = GameConfig {
            walls: vec![Position::new(5, 4)],
            ..GameConfig::small()
        };
        assert!(matches!(config.validate(), Err(ConfigError::WallOnSnake { .. })));
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            concat!(
                r#"{{"rows": 8, "cols": 12, "initial_direction": "Up", "#,
                r#""walls": [{{"row": 0, "col": 0}}]}}"#
            )
        )
        .unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.rows, 8);
        assert_eq!(config.cols, 12);
        assert_eq!(config.initial_direction, Direction::Up);
        assert_eq!(config.walls, vec![Position::new(0, 0)]);
        assert_eq!(config.starting_length, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
