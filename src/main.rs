use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use snake_sync::game::{GameConfig, TickEngine};
use snake_sync::modes::{HeadlessConfig, HeadlessMode, HumanMode, LogicThread};
use snake_sync::render::board_lines;

#[derive(Parser)]
#[command(name = "snake_sync")]
#[command(version, about = "Snake with a lock-free tick engine")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON game config; the flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Board columns
    #[arg(long)]
    cols: Option<usize>,

    /// Starting snake length
    #[arg(long)]
    length: Option<usize>,

    /// Points per food
    #[arg(long)]
    points: Option<u32>,

    /// Milliseconds per tick in human mode
    #[arg(long, default_value = "125")]
    tick_ms: u64,

    /// Seed for food placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Steps to run in headless mode
    #[arg(long, default_value = "10000")]
    ticks: u64,

    /// Reader threads in headless mode
    #[arg(long, default_value = "4")]
    readers: usize,

    /// Print the headless report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Run without a terminal UI and check snapshots from reader threads
    Headless,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(length) = self.length {
            config.starting_length = length;
        }
        if let Some(points) = self.points {
            config.points_per_food = points;
        }

        Ok(config)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Silent unless RUST_LOG is set, so the TUI stays clean
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = Cli::parse();
    let engine = TickEngine::new(cli.game_config()?, cli.rng())?;

    match cli.mode {
        Mode::Human => {
            let logic = LogicThread::spawn(engine, Duration::from_millis(cli.tick_ms))?;
            let mut human_mode = HumanMode::new(logic);
            human_mode.run().await?;
        }
        Mode::Headless => {
            let config = HeadlessConfig {
                ticks: cli.ticks,
                readers: cli.readers,
            };
            let report =
                tokio::task::spawn_blocking(move || HeadlessMode::new(engine, config).run())
                    .await??;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for line in board_lines(&report.final_snapshot) {
                    println!("|{line}|");
                }
                println!(
                    "ticks: {}  games: {}  wins: {}  best: {}  inconsistent: {}  ({} ms)",
                    report.ticks,
                    report.games,
                    report.wins,
                    report.high_score,
                    report.inconsistent(),
                    report.elapsed_ms
                );
            }
        }
    }

    Ok(())
}
