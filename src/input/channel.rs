//! Cross-thread direction input.
//!
//! Producers hold an [`InputSender`] and overwrite a single atomic slot; the
//! tick owner drains that slot once per tick through
//! [`DirectionController::process_input`]. There is no queue: a second write
//! before the next drain replaces the first.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::game::{Direction, Position};

#[derive(Debug)]
struct InputSlot {
    pending: AtomicU8,
}

impl InputSlot {
    fn new() -> Self {
        Self {
            pending: AtomicU8::new(Direction::None.to_u8()),
        }
    }
}

/// Handle for input producers. Cheap to clone and safe to share.
#[derive(Debug, Clone)]
pub struct InputSender {
    slot: Arc<InputSlot>,
}

impl InputSender {
    /// Stage `direction` for the next tick, replacing anything not yet taken
    pub fn set_direction(&self, direction: Direction) {
        self.slot.pending.store(direction.to_u8(), Ordering::Release);
    }
}

/// Direction state owned by the tick engine
#[derive(Debug)]
pub struct DirectionController {
    current: Direction,
    next: Direction,
    slot: Arc<InputSlot>,
}

impl DirectionController {
    pub fn new(initial: Direction) -> Self {
        Self {
            current: initial,
            next: initial,
            slot: Arc::new(InputSlot::new()),
        }
    }

    /// A new handle writing into this controller's slot
    pub fn sender(&self) -> InputSender {
        InputSender {
            slot: Arc::clone(&self.slot),
        }
    }

    /// Reset both directions and drop any input still pending
    pub fn reset(&mut self, initial: Direction) {
        self.current = initial;
        self.next = initial;
        self.slot
            .pending
            .store(Direction::None.to_u8(), Ordering::Relaxed);
    }

    /// Everything except an exact reversal of the current direction
    pub fn is_valid_change(&self, new_direction: Direction) -> bool {
        !self.current.is_opposite(new_direction)
    }

    /// Take and clear the pending input, then apply it if it is a valid change.
    ///
    /// Must be called only by the tick owner, once per tick.
    pub fn process_input(&mut self) {
        let taken = self
            .slot
            .pending
            .swap(Direction::None.to_u8(), Ordering::AcqRel);
        let input = Direction::from_u8(taken);

        if input != Direction::None && self.is_valid_change(input) {
            self.next = input;
        }

        self.current = self.next;
    }

    /// `head` shifted one cell in the current direction
    pub fn next_position(&self, head: Position) -> Position {
        head.moved_in_direction(self.current)
    }

    pub fn current(&self) -> Direction {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_reversal_is_rejected() {
        let mut controller = DirectionController::new(Direction::Right);
        let sender = controller.sender();

        sender.set_direction(Direction::Left);
        controller.process_input();

        assert_eq!(controller.current(), Direction::Right);
        assert_eq!(
            controller.next_position(Position::new(2, 2)),
            Position::new(2, 3)
        );
    }

    #[test]
    fn test_turn_applies_same_tick() {
        let mut controller = DirectionController::new(Direction::Right);
        controller.sender().set_direction(Direction::Up);
        controller.process_input();

        assert_eq!(controller.current(), Direction::Up);
        assert_eq!(
            controller.next_position(Position::new(2, 2)),
            Position::new(1, 2)
        );
    }

    #[test]
    fn test_last_write_wins() {
        let mut controller = DirectionController::new(Direction::Right);
        let sender = controller.sender();

        sender.set_direction(Direction::Up);
        sender.set_direction(Direction::Down);
        controller.process_input();

        assert_eq!(controller.current(), Direction::Down);
    }

    #[test]
    fn test_input_is_consumed_once() {
        let mut controller = DirectionController::new(Direction::Right);
        controller.sender().set_direction(Direction::Up);
        controller.process_input();
        controller.process_input();

        assert_eq!(controller.current(), Direction::Up);
    }

    #[test]
    fn test_rejected_input_is_still_consumed() {
        let mut controller = DirectionController::new(Direction::Right);
        let sender = controller.sender();

        sender.set_direction(Direction::Left);
        controller.process_input();
        sender.set_direction(Direction::Down);
        controller.process_input();
        controller.process_input();

        assert_eq!(controller.current(), Direction::Down);
    }

    #[test]
    fn test_same_and_none_directions_are_valid() {
        let controller = DirectionController::new(Direction::Up);
        assert!(controller.is_valid_change(Direction::Up));
        assert!(controller.is_valid_change(Direction::None));
        assert!(controller.is_valid_change(Direction::Left));
        assert!(!controller.is_valid_change(Direction::Down));
    }

    #[test]
    fn test_reset_drops_pending_input() {
        let mut controller = DirectionController::new(Direction::Right);
        controller.sender().set_direction(Direction::Up);
        controller.reset(Direction::Left);
        controller.process_input();

        assert_eq!(controller.current(), Direction::Left);
    }

    #[test]
    fn test_senders_on_other_threads() {
        let mut controller = DirectionController::new(Direction::Right);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sender = controller.sender();
                thread::spawn(move || {
                    for _ in 0..1000 {
                        sender.set_direction(Direction::Down);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        controller.process_input();
        assert_eq!(controller.current(), Direction::Down);
    }
}
