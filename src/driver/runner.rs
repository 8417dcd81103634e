//! Typist thread: owns the engine and turns wall time into ticks.

use crate::engine::{Status, TypingEngine};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Upper bound on how long the thread sleeps before re-checking the
/// shutdown flag, even when the next tick is far away.
const IDLE_POLL: Duration = Duration::from_millis(25);

/// Control commands forwarded to the engine on the typist thread.
enum Command {
    Start,
    Pause,
    Resume,
    Stop,
    Reset,
    AddLine(String),
    SetSpeed(Duration),
}

/// Drives a [`TypingEngine`] in real time on a dedicated thread.
///
/// All control methods are fire-and-forget sends; the thread applies them
/// before the next tick fires. Status reads go through a lock-free mirror
/// the thread publishes after every step.
pub struct TypingDriver {
    /// Handle to the typist thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Control command sender.
    command_tx: Sender<Command>,
    /// Mirrored engine status (`Status as u8`).
    status: Arc<AtomicU8>,
}

impl TypingDriver {
    /// Move `engine` onto a new typist thread and start driving it.
    ///
    /// The engine's current state carries over: an engine that was
    /// `start()`ed before the handoff keeps typing from its cursor.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the typist thread.
    pub fn spawn(engine: TypingEngine) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let status = Arc::new(AtomicU8::new(engine.status() as u8));
        let (command_tx, command_rx) = bounded(16);

        let shutdown_clone = shutdown.clone();
        let status_clone = status.clone();
        let handle = thread::Builder::new()
            .name("echotype-typist".to_string())
            .spawn(move || {
                Self::run_loop(engine, &command_rx, &shutdown_clone, &status_clone);
            })
            .expect("Failed to spawn typist thread");

        Self {
            handle: Some(handle),
            shutdown,
            command_tx,
            status,
        }
    }

    /// Start (or restart) typing.
    pub fn start(&self) {
        let _ = self.command_tx.send(Command::Start);
    }

    /// Pause typing at the current cursor.
    pub fn pause(&self) {
        let _ = self.command_tx.send(Command::Pause);
    }

    /// Resume paused typing.
    pub fn resume(&self) {
        let _ = self.command_tx.send(Command::Resume);
    }

    /// Stop typing without clearing progress.
    pub fn stop(&self) {
        let _ = self.command_tx.send(Command::Stop);
    }

    /// Stop and clear all progress.
    pub fn reset(&self) {
        let _ = self.command_tx.send(Command::Reset);
    }

    /// Append a line to the queue.
    pub fn add_line(&self, line: impl Into<String>) {
        let _ = self.command_tx.send(Command::AddLine(line.into()));
    }

    /// Replace the default inter-character delay. Applies from the next
    /// per-line speed resolution.
    pub fn set_speed(&self, delay: Duration) {
        let _ = self.command_tx.send(Command::SetSpeed(delay));
    }

    /// Last published engine status.
    pub fn status(&self) -> Status {
        Status::from_u8(self.status.load(Ordering::Relaxed))
    }

    /// Signal the typist thread to shut down.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the typist thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main typist loop.
    fn run_loop(
        mut engine: TypingEngine,
        command_rx: &Receiver<Command>,
        shutdown: &AtomicBool,
        status: &AtomicU8,
    ) {
        #[cfg(feature = "tracing")]
        tracing::debug!("typist thread started");

        let mut last = Instant::now();
        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            // Sleep until the pending tick is due, but never longer than
            // the idle poll so shutdown stays responsive.
            let wait = engine
                .time_to_next_tick()
                .map_or(IDLE_POLL, |until| until.min(IDLE_POLL));

            match command_rx.recv_timeout(wait) {
                Ok(command) => {
                    // Ticks already due fire before the command applies.
                    Self::advance_elapsed(&mut engine, &mut last);
                    Self::apply(&mut engine, command);
                    last = Instant::now();
                }
                Err(RecvTimeoutError::Timeout) => {
                    Self::advance_elapsed(&mut engine, &mut last);
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }

            status.store(engine.status() as u8, Ordering::Relaxed);
        }

        status.store(engine.status() as u8, Ordering::Relaxed);
        #[cfg(feature = "tracing")]
        tracing::debug!("typist thread exiting");
    }

    fn advance_elapsed(engine: &mut TypingEngine, last: &mut Instant) {
        let now = Instant::now();
        if engine.is_running() {
            engine.advance(now - *last);
        }
        *last = now;
    }

    fn apply(engine: &mut TypingEngine, command: Command) {
        match command {
            Command::Start => {
                engine.start();
            }
            Command::Pause => {
                engine.pause();
            }
            Command::Resume => {
                engine.resume();
            }
            Command::Stop => {
                engine.stop();
            }
            Command::Reset => {
                engine.reset();
            }
            Command::AddLine(line) => {
                engine.add_line(line);
            }
            Command::SetSpeed(delay) => {
                engine.set_speed(delay);
            }
        }
    }
}

impl Drop for TypingDriver {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
