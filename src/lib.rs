//! Snake Sync - a tick-driven snake simulation with lock-free state sharing
//!
//! This library provides:
//! - Core game logic: grid, snake, food, collision rules and the tick engine (game module)
//! - Cross-thread direction input with reversal rejection (input module)
//! - Immutable snapshots published for any number of readers (snapshot module)
//! - TUI rendering (render module)
//! - Human and headless execution modes (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod snapshot;
