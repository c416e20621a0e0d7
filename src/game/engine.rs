use std::sync::Arc;

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    collision::{self, CollisionType},
    config::{ConfigError, GameConfig},
    food::FoodPlacement,
    grid::{CellKind, Grid},
    state::{Position, SnakeBody},
};
use crate::input::{DirectionController, InputSender};
use crate::snapshot::{Snapshot, SnapshotPublisher, SnapshotReader};

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The snake filled the board
    Won,
    Collided(CollisionType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    /// Terminal until [`TickEngine::reset`]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Continuing,
    Stopped,
}

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Whether this step filled the board
    pub won: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub status: TickStatus,
    pub info: StepInfo,
}

impl StepResult {
    pub fn terminated(&self) -> bool {
        self.status == TickStatus::Stopped
    }
}

/// Everything a tick mutates. Owned by the engine, never shared.
struct World {
    grid: Grid,
    snake: SnakeBody,
    food: FoodPlacement,
    controller: DirectionController,
    score: u32,
    outcome: Option<GameOutcome>,
    tick: u64,
}

impl World {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            cells: self.grid.cells().to_vec(),
            score: self.score,
            game_over: self.outcome.is_some(),
            outcome: self.outcome,
            food: self.food.position(),
            body: self.snake.to_vec(),
            snake_length: self.snake.len(),
            direction: self.controller.current(),
        }
    }

    /// Out of bounds, then wall, then self; first match is reported
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if collision::out_of_bounds(pos, &self.grid) {
            return Some(CollisionType::OutOfBounds);
        }

        if collision::is_wall(pos, &self.grid) {
            return Some(CollisionType::Wall);
        }

        if self.snake.self_collides(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}

/// Owns the live world and advances it one tick at a time.
///
/// Only the thread calling [`TickEngine::step`] touches the grid, snake and
/// food. Everyone else talks to the engine through an [`InputSender`] or a
/// [`SnapshotReader`].
pub struct TickEngine<R: Rng> {
    config: GameConfig,
    rng: R,
    world: World,
    publisher: SnapshotPublisher,
}

impl<R: Rng> TickEngine<R> {
    /// Lay out the board, snake and first food, and publish tick 0.
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut grid = Grid::new(config.rows, config.cols);
        let (snake, food) = Self::populate(&config, &mut grid, &mut rng);
        let world = World {
            grid,
            snake,
            food,
            controller: DirectionController::new(config.initial_direction),
            score: 0,
            outcome: None,
            tick: 0,
        };
        let publisher = SnapshotPublisher::new(world.snapshot());

        debug!(
            "game initialized: {}x{} board, snake length {}",
            config.rows, config.cols, config.starting_length
        );

        Ok(Self {
            config,
            rng,
            world,
            publisher,
        })
    }

    fn populate(config: &GameConfig, grid: &mut Grid, rng: &mut R) -> (SnakeBody, FoodPlacement) {
        for wall in &config.walls {
            grid.set_cell(*wall, CellKind::Wall);
        }

        let snake = SnakeBody::new(
            config.start_head(),
            config.starting_length,
            config.initial_direction,
            grid,
        );

        let mut food = FoodPlacement::new();
        food.place_random(grid, rng);

        (snake, food)
    }

    /// Start a new game with the same configuration.
    ///
    /// Existing senders and readers stay connected; readers see tick 0 of the
    /// new game next.
    pub fn reset(&mut self) {
        let world = &mut self.world;
        world.grid.clear();
        let (snake, food) = Self::populate(&self.config, &mut world.grid, &mut self.rng);
        world.snake = snake;
        world.food = food;
        world.controller.reset(self.config.initial_direction);
        world.score = 0;
        world.outcome = None;
        world.tick = 0;
        self.publish();

        debug!("game reset");
    }

    /// Handle for delivering direction changes from any thread
    pub fn input_sender(&self) -> InputSender {
        self.world.controller.sender()
    }

    /// Handle for reading published snapshots from any thread
    pub fn subscribe(&self) -> SnapshotReader {
        self.publisher.subscribe()
    }

    /// The latest published snapshot
    pub fn game_state(&self) -> Arc<Snapshot> {
        self.publisher.current()
    }

    pub fn state(&self) -> EngineState {
        if self.world.outcome.is_some() {
            EngineState::GameOver
        } else {
            EngineState::Running
        }
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.world.outcome
    }

    pub fn score(&self) -> u32 {
        self.world.score
    }

    /// Execute one tick of the game
    pub fn step(&mut self) -> StepResult {
        if self.world.outcome.is_some() {
            return StepResult {
                status: TickStatus::Stopped,
                info: StepInfo::default(),
            };
        }

        let world = &mut self.world;
        world.controller.process_input();
        let new_head = world.controller.next_position(world.snake.head());

        // Collisions win over food: nothing is scored on the tick that ends the game
        if let Some(collision_type) = world.check_collision(new_head) {
            world.tick += 1;
            world.outcome = Some(GameOutcome::Collided(collision_type));
            debug!(
                "collision {:?} at ({}, {}) on tick {}",
                collision_type, new_head.row, new_head.col, world.tick
            );
            self.publish();

            return StepResult {
                status: TickStatus::Stopped,
                info: StepInfo {
                    collision_type: Some(collision_type),
                    ..Default::default()
                },
            };
        }

        let ate_food = collision::is_food(new_head, &world.food);
        if ate_food {
            world.snake.grow(1);
            world.score += self.config.points_per_food;
            world.food.remove(&mut world.grid);
        }

        world.snake.move_to(new_head, &mut world.grid);

        if !world.food.is_present() {
            world.food.place_random(&mut world.grid, &mut self.rng);
        }

        let won = !world.food.is_present() && !world.snake.has_pending_growth();
        if won {
            info!("board filled with score {}", world.score);
            world.outcome = Some(GameOutcome::Won);
        }

        world.tick += 1;
        self.publish();

        StepResult {
            status: if won {
                TickStatus::Stopped
            } else {
                TickStatus::Continuing
            },
            info: StepInfo {
                ate_food,
                collision_type: None,
                won,
            },
        }
    }

    fn publish(&self) {
        self.publisher.publish(self.world.snapshot());
    }

    #[cfg(test)]
    pub(crate) fn place_food_at(&mut self, pos: Position) {
        self.world.food.place_at(pos, &mut self.world.grid);
        self.publish();
    }
}
