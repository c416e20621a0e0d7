pub mod headless;
pub mod human;
pub mod logic;

pub use headless::{HeadlessConfig, HeadlessMode, HeadlessReport};
pub use human::HumanMode;
pub use logic::LogicThread;
