use std::time::{Duration, Instant};

use crate::snapshot::Snapshot;

/// Reader-side bookkeeping across games
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    /// Snapshots handed to [`GameMetrics::observe`]
    pub snapshots_seen: u64,
    /// Ticks published but never observed by this reader
    pub ticks_skipped: u64,
    last_tick: Option<u64>,
    last_game_over: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            snapshots_seen: 0,
            ticks_skipped: 0,
            last_tick: None,
            last_game_over: false,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Record a snapshot read from the publisher.
    ///
    /// A tick lower than the previous one means the game was reset.
    pub fn observe(&mut self, snapshot: &Snapshot) {
        match self.last_tick {
            Some(last) if snapshot.tick == last => return,
            Some(last) if snapshot.tick > last => {
                self.ticks_skipped += snapshot.tick - last - 1;
            }
            Some(_) => self.on_game_start(),
            None => {}
        }

        self.snapshots_seen += 1;
        self.last_tick = Some(snapshot.tick);

        if snapshot.game_over && !self.last_game_over {
            self.on_game_over(snapshot.score);
        }
        self.last_game_over = snapshot.game_over;
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.last_game_over = false;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
