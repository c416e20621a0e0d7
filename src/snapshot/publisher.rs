use std::sync::Arc;

use tokio::sync::watch;

use super::Snapshot;
use crate::game::{CellKind, Position};

/// Single-writer side of the snapshot exchange.
///
/// Holds only the latest snapshot. Publishing swaps in a new `Arc`; readers
/// still holding the previous one keep it alive until they drop it.
///
/// Reads are never torn, but they are not wait-free: the watch slot sits
/// behind a short internal lock, so a `publish` and a `current` may wait on
/// each other for the length of an `Arc` swap or clone. Neither waits on
/// tick work.
#[derive(Debug)]
pub struct SnapshotPublisher {
    latest: watch::Sender<Arc<Snapshot>>,
}

impl SnapshotPublisher {
    /// A publisher whose current snapshot is `initial`
    pub fn new(initial: Snapshot) -> Self {
        let (latest, _) = watch::channel(Arc::new(initial));
        Self { latest }
    }

    /// Install `snapshot` as current. Readers see either the old or the new
    /// snapshot, never a mix.
    pub fn publish(&self, snapshot: Snapshot) {
        self.latest.send_replace(Arc::new(snapshot));
    }

    /// The most recently published snapshot
    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.latest.borrow())
    }

    /// A reader handle that can be moved to another thread
    pub fn subscribe(&self) -> SnapshotReader {
        SnapshotReader {
            latest: self.latest.subscribe(),
        }
    }
}

// Readers are handed to other threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SnapshotReader>();
    assert::<Snapshot>();
};

/// Read-only view of the latest published snapshot.
///
/// Every accessor loads the current snapshot on its own, so two calls may
/// observe different ticks. Take [`SnapshotReader::current`] once when fields
/// must agree with each other.
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    latest: watch::Receiver<Arc<Snapshot>>,
}

impl SnapshotReader {
    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.latest.borrow())
    }

    pub fn rows(&self) -> usize {
        self.current().rows
    }

    pub fn cols(&self) -> usize {
        self.current().cols
    }

    pub fn score(&self) -> u32 {
        self.current().score
    }

    pub fn is_game_over(&self) -> bool {
        self.current().game_over
    }

    pub fn cell_at(&self, pos: Position) -> CellKind {
        self.current().cell_at(pos)
    }

    /// Wait until a snapshot newer than the last one seen through this handle
    /// is published. Returns false once the publisher is gone.
    pub async fn changed(&mut self) -> bool {
        self.latest.changed().await.is_ok()
    }

    /// Latest snapshot, marking it seen for [`SnapshotReader::changed`]
    pub fn current_and_mark_seen(&mut self) -> Arc<Snapshot> {
        Arc::clone(&self.latest.borrow_and_update())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    fn snapshot(tick: u64, score: u32) -> Snapshot {
        Snapshot {
            tick,
            rows: 1,
            cols: 2,
            cells: vec![CellKind::Occupied, CellKind::Empty],
            score,
            game_over: false,
            outcome: None,
            food: None,
            body: vec![Position::new(0, 0)],
            snake_length: 1,
            direction: Direction::Right,
        }
    }

    #[test]
    fn test_current_is_latest() {
        let publisher = SnapshotPublisher::new(snapshot(0, 0));
        let reader = publisher.subscribe();
        assert_eq!(reader.current().tick, 0);

        publisher.publish(snapshot(1, 10));
        publisher.publish(snapshot(2, 20));

        assert_eq!(publisher.current().tick, 2);
        assert_eq!(reader.current().tick, 2);
        assert_eq!(reader.score(), 20);
        assert_eq!(reader.rows(), 1);
        assert_eq!(reader.cols(), 2);
        assert!(!reader.is_game_over());
        assert_eq!(reader.cell_at(Position::new(0, 0)), CellKind::Occupied);
    }

    #[test]
    fn test_held_snapshot_survives_publish() {
        let publisher = SnapshotPublisher::new(snapshot(0, 0));
        let reader = publisher.subscribe();
        let held = reader.current();

        publisher.publish(snapshot(1, 10));

        assert_eq!(held.tick, 0);
        assert_eq!(held.score, 0);
        assert_eq!(Arc::strong_count(&held), 1);
        assert_eq!(reader.current().tick, 1);
    }

    #[test]
    fn test_reader_outlives_publisher() {
        let publisher = SnapshotPublisher::new(snapshot(0, 0));
        let reader = publisher.subscribe();
        publisher.publish(snapshot(5, 50));
        drop(publisher);

        assert_eq!(reader.current().tick, 5);
    }

    #[tokio::test]
    async fn test_changed_wakes_on_publish() {
        let publisher = SnapshotPublisher::new(snapshot(0, 0));
        let mut reader = publisher.subscribe();
        assert_eq!(reader.current_and_mark_seen().tick, 0);

        let writer = tokio::spawn(async move {
            publisher.publish(snapshot(1, 10));
            publisher
        });

        assert!(reader.changed().await);
        assert_eq!(reader.current_and_mark_seen().tick, 1);

        drop(writer.await.unwrap());
        assert!(!reader.changed().await);
    }
}
