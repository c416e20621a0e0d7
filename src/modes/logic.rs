//! The single writer thread that owns a [`TickEngine`].

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use log::debug;
use rand::Rng;

use crate::game::TickEngine;
use crate::input::InputSender;
use crate::snapshot::SnapshotReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Restart,
    Quit,
}

/// Handle to the running logic thread
pub struct LogicThread {
    commands: Sender<Command>,
    handle: JoinHandle<u64>,
    input: InputSender,
    reader: SnapshotReader,
}

impl LogicThread {
    /// Move `engine` onto its own thread and step it once per `tick_interval`.
    ///
    /// A zero interval steps as fast as possible. Stepping continues after
    /// game over; those steps are no-ops until a restart.
    pub fn spawn<R>(mut engine: TickEngine<R>, tick_interval: Duration) -> Result<Self>
    where
        R: Rng + Send + 'static,
    {
        let (commands, inbox) = mpsc::channel();
        let input = engine.input_sender();
        let reader = engine.subscribe();

        let handle = thread::Builder::new()
            .name("snake-logic".into())
            .spawn(move || run(&mut engine, &inbox, tick_interval))
            .context("Failed to spawn logic thread")?;

        Ok(Self {
            commands,
            handle,
            input,
            reader,
        })
    }

    pub fn input(&self) -> InputSender {
        self.input.clone()
    }

    pub fn reader(&self) -> SnapshotReader {
        self.reader.clone()
    }

    pub fn restart(&self) -> Result<()> {
        self.commands
            .send(Command::Restart)
            .map_err(|_| anyhow!("logic thread has stopped"))
    }

    /// Stop the thread and wait for it. Returns the number of steps it ran.
    pub fn shutdown(self) -> Result<u64> {
        // already gone if the send fails; join still reports how it ended
        let _ = self.commands.send(Command::Quit);
        self.handle
            .join()
            .map_err(|_| anyhow!("logic thread panicked"))
    }
}

fn next_command(inbox: &Receiver<Command>, tick_interval: Duration) -> Option<Command> {
    if tick_interval.is_zero() {
        match inbox.try_recv() {
            Ok(command) => Some(command),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Command::Quit),
        }
    } else {
        match inbox.recv_timeout(tick_interval) {
            Ok(command) => Some(command),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Command::Quit),
        }
    }
}

fn run<R: Rng>(
    engine: &mut TickEngine<R>,
    inbox: &Receiver<Command>,
    tick_interval: Duration,
) -> u64 {
    let mut steps = 0;

    loop {
        match next_command(inbox, tick_interval) {
            Some(Command::Quit) => break,
            Some(Command::Restart) => engine.reset(),
            None => {
                engine.step();
                steps += 1;
            }
        }
    }

    debug!("logic thread stopping after {} steps", steps);
    steps
}
