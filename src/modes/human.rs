use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use super::logic::LogicThread;
use crate::input::{InputHandler, InputSender, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::snapshot::SnapshotReader;

/// Keyboard play in the terminal.
///
/// The tick engine runs on its own logic thread; this side only forwards
/// input and draws whatever snapshot is current.
pub struct HumanMode {
    logic: Option<LogicThread>,
    reader: SnapshotReader,
    input: InputSender,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(logic: LogicThread) -> Self {
        Self {
            reader: logic.reader(),
            input: logic.input(),
            logic: Some(logic),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        if let Some(logic) = self.logic.take() {
            logic.shutdown()?;
        }

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut updates = self.reader.clone();

        // Redraw on every publish, and twice a second for the clock
        let mut clock_timer = interval(Duration::from_millis(500));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // New snapshot from the logic thread
                alive = updates.changed() => {
                    if !alive {
                        break;
                    }
                    self.draw(terminal, &mut updates)?;
                }

                _ = clock_timer.tick() => {
                    self.draw(terminal, &mut updates)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
        updates: &mut SnapshotReader,
    ) -> Result<()> {
        let snapshot = updates.current_and_mark_seen();
        self.metrics.observe(&snapshot);
        self.metrics.update();
        terminal
            .draw(|frame| {
                self.renderer.render(frame, &snapshot, &self.metrics);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => self.input.set_direction(direction),
                KeyAction::Restart => self.restart()?,
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn restart(&mut self) -> Result<()> {
        if let Some(logic) = &self.logic {
            logic.restart()?;
        }
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
