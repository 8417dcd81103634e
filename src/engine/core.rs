//! The typing state machine.
//!
//! [`TypingEngine`] owns the line queue, cursor, status, and the single
//! pending character-tick deadline. It is deliberately clock-free: callers
//! (normally the [`TypingDriver`]) feed it elapsed time through
//! [`TypingEngine::advance`], and it fires however many character ticks
//! that time covers, emitting events synchronously as it goes. That keeps
//! every timing property testable without real timers.
//!
//! At most one tick is pending at any time. `pause` and `stop` clear it
//! before returning, so no `update` can fire afterwards.
//!
//! [`TypingDriver`]: crate::driver::TypingDriver

use super::events::{EventKind, Listener, ListenerId, Listeners, TypingEvent};
use super::speed::{SpeedSource, MIN_TICK};
use crate::text;
use std::time::Duration;

/// Engine status. Exactly one variant holds at any time.
///
/// A single tag rather than `is_running`/`is_paused` booleans: the pair
/// can desynchronize, the tag cannot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    /// Not typing; either never started or stopped.
    Idle = 0,
    /// Actively typing; a character tick is pending.
    Running = 1,
    /// Typing suspended; the cursor holds its position.
    Paused = 2,
    /// The queue was exhausted and `complete` has been emitted.
    Completed = 3,
}

impl Status {
    /// Decode from the `u8` mirror the driver publishes.
    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Running,
            2 => Self::Paused,
            3 => Self::Completed,
            _ => Self::Idle,
        }
    }
}

/// Snapshot of engine progress returned by [`TypingEngine::status_info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfo {
    /// Current status tag.
    pub status: Status,
    /// Index of the line currently (or last) being typed.
    pub current_line_index: usize,
    /// Current queue length, including lines appended after construction.
    pub total_lines: usize,
}

/// A queued line, optionally carrying its own inter-character delay.
struct QueuedLine {
    text: String,
    /// Takes precedence over the engine's speed source for this line.
    /// Set by [`TypingEngine::add_line_with_speed`] (prefix rules).
    speed_override: Option<Duration>,
}

/// Typewriter engine: reveals queued lines one grapheme at a time.
///
/// # Example
///
/// ```rust
/// use echotype::{EventKind, TypingEngine, TypingEvent};
/// use std::time::Duration;
///
/// let mut engine = TypingEngine::new(["Hi"], Duration::from_millis(10));
/// engine.on(EventKind::Update, |event| {
///     if let TypingEvent::Update { text, .. } = event {
///         println!("{text}");
///     }
/// });
/// engine.start();
/// engine.advance(Duration::from_millis(30)); // "H", "Hi", line done
/// assert_eq!(engine.completed_lines(), vec!["Hi".to_string()]);
/// ```
pub struct TypingEngine {
    lines: Vec<QueuedLine>,
    completed: Vec<String>,
    line_index: usize,
    char_index: usize,
    current_text: String,
    /// Grapheme split of the current line, cached when it becomes current.
    current_graphemes: Vec<String>,
    status: Status,
    speed: SpeedSource,
    /// Resolved inter-character delay for the current line.
    tick_delay: Duration,
    /// Time remaining until the pending tick fires. `None` = nothing
    /// scheduled (the only pending-timer handle in the system).
    until_tick: Option<Duration>,
    listeners: Listeners,
}

impl TypingEngine {
    /// Create an engine over `initial_lines` with the given speed.
    ///
    /// Lines are copied; the engine starts `Idle` at cursor `(0, 0)` with
    /// nothing scheduled.
    pub fn new<I>(initial_lines: I, speed: impl Into<SpeedSource>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            lines: initial_lines
                .into_iter()
                .map(|line| QueuedLine {
                    text: line.into(),
                    speed_override: None,
                })
                .collect(),
            completed: Vec::new(),
            line_index: 0,
            char_index: 0,
            current_text: String::new(),
            current_graphemes: Vec::new(),
            status: Status::Idle,
            speed: speed.into(),
            tick_delay: MIN_TICK,
            until_tick: None,
            listeners: Listeners::default(),
        }
    }

    /// Append a line to the end of the queue.
    ///
    /// Never changes the status: appending after the engine has reached
    /// [`Status::Completed`] does **not** resume typing — call
    /// [`start`](Self::start), which restarts from the first line.
    pub fn add_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(QueuedLine {
            text: line.into(),
            speed_override: None,
        });
        self
    }

    /// Append several lines, preserving order.
    pub fn add_lines<I>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for line in lines {
            self.add_line(line);
        }
        self
    }

    /// Append a line that types at `delay` per character, overriding the
    /// engine's speed source for that line only.
    pub fn add_line_with_speed(&mut self, line: impl Into<String>, delay: Duration) -> &mut Self {
        self.lines.push(QueuedLine {
            text: line.into(),
            speed_override: Some(delay),
        });
        self
    }

    /// Start (or restart) typing.
    ///
    /// - `Running`: no-op.
    /// - `Paused`: resumes from the cursor with a freshly resolved delay.
    /// - `Idle` / `Completed`: resets the cursor to `(0, 0)` and types
    ///   from the first line. An empty queue completes immediately,
    ///   emitting `complete` without scheduling a single tick.
    pub fn start(&mut self) -> &mut Self {
        match self.status {
            Status::Running => {}
            Status::Paused => {
                self.status = Status::Running;
                self.reschedule();
                #[cfg(feature = "tracing")]
                tracing::debug!(line = self.line_index, "typing resumed via start");
            }
            Status::Idle | Status::Completed => {
                self.line_index = 0;
                self.char_index = 0;
                self.current_text.clear();
                self.current_graphemes.clear();

                if self.lines.is_empty() {
                    self.status = Status::Completed;
                    self.until_tick = None;
                    let event = TypingEvent::Complete {
                        completed_lines: self.completed.clone(),
                    };
                    self.listeners.emit(&event);
                } else {
                    self.status = Status::Running;
                    self.begin_current_line();
                    #[cfg(feature = "tracing")]
                    tracing::debug!(total_lines = self.lines.len(), "typing started");
                }
            }
        }
        self
    }

    /// Pause typing. Only effective while `Running`; clears the pending
    /// tick so no further `update` fires after this call returns.
    pub fn pause(&mut self) -> &mut Self {
        if self.status == Status::Running {
            self.status = Status::Paused;
            self.until_tick = None;
            #[cfg(feature = "tracing")]
            tracing::debug!(line = self.line_index, ch = self.char_index, "typing paused");
        }
        self
    }

    /// Resume typing from the exact cursor position. Only effective while
    /// `Paused`; the delay is resolved fresh from the current line, not
    /// carried over as a remainder.
    pub fn resume(&mut self) -> &mut Self {
        if self.status == Status::Paused {
            self.status = Status::Running;
            self.reschedule();
            #[cfg(feature = "tracing")]
            tracing::debug!(line = self.line_index, "typing resumed");
        }
        self
    }

    /// Stop typing, from any state.
    ///
    /// Clears the pending tick and drops to `Idle`. The cursor, partial
    /// text, and completed lines are left as-is so reads still reflect
    /// progress. Emits nothing — not even `complete` if the queue was
    /// fully typed.
    pub fn stop(&mut self) -> &mut Self {
        self.status = Status::Idle;
        self.until_tick = None;
        #[cfg(feature = "tracing")]
        tracing::debug!("typing stopped");
        self
    }

    /// Stop and clear all progress: cursor to `(0, 0)`, partial text and
    /// completed lines emptied. Emits exactly one `update` carrying the
    /// cleared state so observers can redraw immediately.
    pub fn reset(&mut self) -> &mut Self {
        self.stop();
        self.line_index = 0;
        self.char_index = 0;
        self.current_text.clear();
        self.current_graphemes.clear();
        self.completed.clear();

        let event = TypingEvent::Update {
            text: String::new(),
            ch: None,
            line_index: 0,
            char_index: None,
            completed_lines: Vec::new(),
        };
        self.listeners.emit(&event);
        self
    }

    /// Replace the default speed source.
    ///
    /// Speed is resolved once per line, so the new source applies from the
    /// next resolution: the next line, or the next pause/resume.
    pub fn set_speed(&mut self, speed: impl Into<SpeedSource>) -> &mut Self {
        self.speed = speed.into();
        self
    }

    /// The partial text of the line currently being typed (or last typed,
    /// if stopped). Pure read.
    pub fn current_text(&self) -> &str {
        &self.current_text
    }

    /// Snapshot of all fully typed lines, in queue order.
    pub fn completed_lines(&self) -> Vec<String> {
        self.completed.clone()
    }

    /// Current status tag.
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Whether the engine is actively typing.
    pub const fn is_running(&self) -> bool {
        matches!(self.status, Status::Running)
    }

    /// Whether typing is suspended.
    pub const fn is_paused(&self) -> bool {
        matches!(self.status, Status::Paused)
    }

    /// Whether every queued line has been typed.
    pub const fn is_completed(&self) -> bool {
        matches!(self.status, Status::Completed)
    }

    /// Status plus cursor and queue-length snapshot.
    pub fn status_info(&self) -> StatusInfo {
        StatusInfo {
            status: self.status,
            current_line_index: self.line_index,
            total_lines: self.lines.len(),
        }
    }

    /// Register a listener for one event kind. Listeners fire in
    /// registration order, synchronously, on the tick that emits the
    /// event.
    pub fn on<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&TypingEvent) + Send + 'static,
    {
        self.listeners.add(kind, Box::new(listener) as Listener)
    }

    /// Remove a listener by the id `on` returned. Unknown ids are a
    /// no-op; returns whether a listener was removed.
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        self.listeners.remove(kind, id)
    }

    /// Time until the pending tick fires, if one is scheduled.
    ///
    /// Drivers use this as their sleep bound.
    pub const fn time_to_next_tick(&self) -> Option<Duration> {
        self.until_tick
    }

    /// Advance the engine by `dt` of elapsed time, firing every character
    /// tick that falls within it and carrying the remainder toward the
    /// next. No-op unless `Running`.
    pub fn advance(&mut self, mut dt: Duration) {
        while self.status == Status::Running {
            let Some(until) = self.until_tick else { break };
            if dt < until {
                self.until_tick = Some(until - dt);
                break;
            }
            dt -= until;
            self.tick();
        }
    }

    /// Cache the current line's graphemes and schedule its first tick.
    fn begin_current_line(&mut self) {
        self.current_graphemes = text::split_graphemes(&self.lines[self.line_index].text);
        self.reschedule();
    }

    /// Resolve the current line's delay and schedule a tick at it.
    fn reschedule(&mut self) {
        let line = &self.lines[self.line_index];
        self.tick_delay = match line.speed_override {
            Some(delay) => delay.max(MIN_TICK),
            None => self.speed.resolve(&line.text),
        };
        self.until_tick = Some(self.tick_delay);
    }

    /// One character tick: reveal the next grapheme, or close out the
    /// line and either move on or complete the whole run.
    fn tick(&mut self) {
        if self.char_index < self.current_graphemes.len() {
            let grapheme = self.current_graphemes[self.char_index].clone();
            self.current_text.push_str(&grapheme);
            let typed_index = self.char_index;
            self.char_index += 1;

            let event = TypingEvent::Update {
                text: self.current_text.clone(),
                ch: Some(grapheme),
                line_index: self.line_index,
                char_index: Some(typed_index),
                completed_lines: self.completed.clone(),
            };
            self.listeners.emit(&event);
            self.until_tick = Some(self.tick_delay);
            return;
        }

        // Line exhausted: record it. A restart after completion overwrites
        // the earlier entry at this index rather than duplicating it.
        if self.line_index < self.completed.len() {
            self.completed[self.line_index] = self.current_text.clone();
        } else {
            self.completed.push(self.current_text.clone());
        }

        let event = TypingEvent::LineComplete {
            line: self.current_text.clone(),
            line_index: self.line_index,
            completed_lines: self.completed.clone(),
        };
        self.listeners.emit(&event);

        if self.line_index + 1 < self.lines.len() {
            // Next line starts scheduling immediately at its own resolved
            // delay; no idle cycle in between.
            self.line_index += 1;
            self.char_index = 0;
            self.current_text.clear();
            self.begin_current_line();
        } else {
            self.status = Status::Completed;
            self.until_tick = None;
            #[cfg(feature = "tracing")]
            tracing::debug!(lines = self.completed.len(), "typing complete");
            let event = TypingEvent::Complete {
                completed_lines: self.completed.clone(),
            };
            self.listeners.emit(&event);
        }
    }
}

impl std::fmt::Debug for TypingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypingEngine")
            .field("status", &self.status)
            .field("line_index", &self.line_index)
            .field("char_index", &self.char_index)
            .field("total_lines", &self.lines.len())
            .field("completed", &self.completed.len())
            .finish_non_exhaustive()
    }
}
