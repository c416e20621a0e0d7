//! Core game logic module for Snake
//!
//! Everything here runs on the single thread that owns the [`TickEngine`].
//! It has no I/O or rendering dependencies.

pub mod collision;
pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use collision::CollisionType;
pub use config::{ConfigError, GameConfig};
pub use direction::Direction;
pub use engine::{EngineState, GameOutcome, StepInfo, StepResult, TickEngine, TickStatus};
pub use food::FoodPlacement;
pub use grid::{CellKind, Grid};
pub use state::{Position, SnakeBody};
