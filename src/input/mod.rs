pub mod channel;
pub mod handler;

pub use channel::{DirectionController, InputSender};
pub use handler::{InputHandler, KeyAction};
