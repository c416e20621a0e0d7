//! Unattended run: one writer stepping flat out, a wandering input producer,
//! and a pool of reader threads checking every snapshot they load.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::game::{Direction, GameOutcome, TickEngine, TickStatus};
use crate::input::InputSender;
use crate::metrics::GameMetrics;
use crate::snapshot::{Snapshot, SnapshotReader};

#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Steps to run in total, across restarts
    pub ticks: u64,
    /// Concurrent reader threads
    pub readers: usize,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            ticks: 10_000,
            readers: 4,
        }
    }
}

/// What a single reader thread saw
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReaderReport {
    pub snapshots_seen: u64,
    pub ticks_skipped: u64,
    pub inconsistent: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeadlessReport {
    pub ticks: u64,
    pub games: u32,
    /// Games that ended by filling the board
    pub wins: u32,
    pub high_score: u32,
    pub elapsed_ms: u128,
    pub readers: Vec<ReaderReport>,
    pub final_snapshot: Arc<Snapshot>,
}

impl HeadlessReport {
    pub fn inconsistent(&self) -> u64 {
        self.readers.iter().map(|r| r.inconsistent).sum()
    }
}

pub struct HeadlessMode<R: Rng> {
    engine: TickEngine<R>,
    config: HeadlessConfig,
}

impl<R: Rng> HeadlessMode<R> {
    pub fn new(engine: TickEngine<R>, config: HeadlessConfig) -> Self {
        Self { engine, config }
    }

    /// Step on the calling thread while readers and an input producer run
    /// beside it. Restarts the game whenever it ends.
    pub fn run(mut self) -> Result<HeadlessReport> {
        let stop = StopGuard::new();
        let start = Instant::now();

        let readers = (0..self.config.readers)
            .map(|id| {
                let reader = self.engine.subscribe();
                let stop = stop.flag();
                thread::Builder::new()
                    .name(format!("snake-reader-{id}"))
                    .spawn(move || watch_snapshots(reader, &stop))
                    .context("Failed to spawn reader thread")
            })
            .collect::<Result<Vec<_>>>()?;

        let wanderer = {
            let input = self.engine.input_sender();
            let stop = stop.flag();
            thread::Builder::new()
                .name("snake-input".into())
                .spawn(move || wander(input, &stop))
                .context("Failed to spawn input thread")?
        };

        let mut games = 0;
        let mut wins = 0;
        let mut high_score = 0;
        for _ in 0..self.config.ticks {
            if self.engine.step().status == TickStatus::Stopped {
                games += 1;
                if self.engine.outcome() == Some(GameOutcome::Won) {
                    wins += 1;
                }
                high_score = high_score.max(self.engine.score());
                self.engine.reset();
            }
        }
        let final_snapshot = self.engine.game_state();

        drop(stop);
        wanderer
            .join()
            .map_err(|_| anyhow!("input thread panicked"))?;
        let readers = readers
            .into_iter()
            .map(|handle| handle.join().map_err(|_| anyhow!("reader thread panicked")))
            .collect::<Result<Vec<_>>>()?;

        let report = HeadlessReport {
            ticks: self.config.ticks,
            games,
            wins,
            high_score,
            elapsed_ms: start.elapsed().as_millis(),
            readers,
            final_snapshot,
        };

        if report.inconsistent() > 0 {
            warn!("{} inconsistent snapshots observed", report.inconsistent());
        }
        info!(
            "{} ticks, {} games finished, best score {} in {} ms",
            report.ticks, report.games, report.high_score, report.elapsed_ms
        );
        Ok(report)
    }
}

/// Stop flag shared with the worker threads. Raised when dropped, so workers
/// already running wind down on every exit path out of [`HeadlessMode::run`].
struct StopGuard(Arc<AtomicBool>);

impl StopGuard {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.0)
    }
}

impl Drop for StopGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

fn watch_snapshots(reader: SnapshotReader, stop: &AtomicBool) -> ReaderReport {
    let mut metrics = GameMetrics::new();
    let mut inconsistent = 0;

    loop {
        let snapshot = reader.current();
        if !snapshot.is_consistent() {
            inconsistent += 1;
        }
        metrics.observe(&snapshot);

        if stop.load(Ordering::Relaxed) {
            break;
        }
        thread::yield_now();
    }

    ReaderReport {
        snapshots_seen: metrics.snapshots_seen,
        ticks_skipped: metrics.ticks_skipped,
        inconsistent,
    }
}

/// Random turns, sent faster than the writer drains them
fn wander(input: InputSender, stop: &AtomicBool) {
    const TURNS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
    let mut rng = rand::thread_rng();

    while !stop.load(Ordering::Relaxed) {
        if let Some(direction) = TURNS.choose(&mut rng) {
            input.set_direction(*direction);
        }
        thread::sleep(Duration::from_micros(50));
    }
}
